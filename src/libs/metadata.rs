// Generated by build.rs from Cargo.toml
include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

/// `User-Agent` sent to the calendar and chat APIs.
pub fn user_agent() -> String {
    format!("{}/{} ({})", APP_METADATA_NAME, APP_METADATA_VERSION, APP_METADATA_OWNER)
}
