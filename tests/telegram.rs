#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_context::{test_context, AsyncTestContext};
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wlb::api::{ApiError, Telegram};
    use wlb::bot::dispatcher::report_keyboard;
    use wlb::bot::Reply;

    const TOKEN: &str = "123456:test-token";

    struct TelegramContext {
        server: MockServer,
        telegram: Telegram,
    }

    impl AsyncTestContext for TelegramContext {
        async fn setup() -> Self {
            let server = MockServer::start().await;
            let telegram = Telegram::with_api_base(TOKEN, &server.uri()).unwrap();
            TelegramContext { server, telegram }
        }
    }

    fn method_path(name: &str) -> String {
        format!("/bot{}/{}", TOKEN, name)
    }

    fn sent() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {"message_id": 7, "date": 0, "chat": {"id": 42}}}))
    }

    #[test_context(TelegramContext)]
    #[tokio::test]
    async fn test_get_me(ctx: &mut TelegramContext) {
        Mock::given(method("POST"))
            .and(path(method_path("getMe")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"id": 1, "is_bot": true, "first_name": "WLB", "username": "wlb_bot"}
            })))
            .mount(&ctx.server)
            .await;

        let me = ctx.telegram.get_me().await.unwrap();
        assert_eq!(me.username.as_deref(), Some("wlb_bot"));
    }

    #[test_context(TelegramContext)]
    #[tokio::test]
    async fn test_get_updates(ctx: &mut TelegramContext) {
        Mock::given(method("POST"))
            .and(path(method_path("getUpdates")))
            .and(body_partial_json(json!({"offset": 11, "timeout": 0, "allowed_updates": ["message"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": [
                    {
                        "update_id": 11,
                        "message": {
                            "message_id": 3,
                            "date": 1709550000,
                            "chat": {"id": 42, "type": "private"},
                            "from": {"id": 9, "is_bot": false, "first_name": "Ada", "username": "admin"},
                            "text": "/get_weekly_data"
                        }
                    },
                    {"update_id": 12, "edited_message": {"message_id": 3}}
                ]
            })))
            .expect(1)
            .mount(&ctx.server)
            .await;

        let updates = ctx.telegram.get_updates(Some(11), 0).await.unwrap();
        assert_eq!(updates.len(), 2);

        let message = updates[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.username(), Some("admin"));
        assert_eq!(message.text.as_deref(), Some("/get_weekly_data"));
        assert!(updates[1].message.is_none());
    }

    #[test_context(TelegramContext)]
    #[tokio::test]
    async fn test_send_reply_with_keyboard(ctx: &mut TelegramContext) {
        Mock::given(method("POST"))
            .and(path(method_path("sendMessage")))
            .and(body_json(json!({
                "chat_id": 42,
                "text": "Registering your calendar",
                "reply_markup": {
                    "keyboard": [
                        [{"text": "/get_weekly_data"}],
                        [{"text": "/get_week_details"}],
                        [{"text": "/get_end_of_working_day"}]
                    ],
                    "resize_keyboard": true,
                    "input_field_placeholder": "Choose a report"
                }
            })))
            .respond_with(sent())
            .expect(1)
            .mount(&ctx.server)
            .await;

        let reply = Reply::text("Registering your calendar").with_keyboard(report_keyboard());
        ctx.telegram.send_reply(42, &reply).await.unwrap();
    }

    #[test_context(TelegramContext)]
    #[tokio::test]
    async fn test_empty_reply_sends_placeholder(ctx: &mut TelegramContext) {
        Mock::given(method("POST"))
            .and(path(method_path("sendMessage")))
            .and(body_json(json!({"chat_id": 42, "text": "Nothing to show for this week."})))
            .respond_with(sent())
            .expect(1)
            .mount(&ctx.server)
            .await;

        ctx.telegram.send_reply(42, &Reply::text("")).await.unwrap();
    }

    #[test_context(TelegramContext)]
    #[tokio::test]
    async fn test_api_error_description(ctx: &mut TelegramContext) {
        Mock::given(method("POST"))
            .and(path(method_path("sendMessage")))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&ctx.server)
            .await;

        match ctx.telegram.send_reply(1, &Reply::text("hi")).await {
            Err(ApiError::Telegram(description)) => assert_eq!(description, "Bad Request: chat not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test_context(TelegramContext)]
    #[tokio::test]
    async fn test_non_json_error(ctx: &mut TelegramContext) {
        Mock::given(method("POST"))
            .and(path(method_path("getMe")))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&ctx.server)
            .await;

        match ctx.telegram.get_me().await {
            Err(ApiError::Status { status, .. }) => assert_eq!(status, 502),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
