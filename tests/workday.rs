#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset};
    use wlb::libs::event::{Event, Labels};
    use wlb::libs::workday::{resolve_day_end, DayEnd};

    fn at(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn entry(summary: &str, start: &str, end: &str) -> Event {
        Event::new(summary, at(start), at(end))
    }

    #[test]
    fn test_overwork_end_is_day_end() {
        let events = vec![
            entry("underwork", "2024-03-04T16:00:00+00:00", "2024-03-04T17:00:00+00:00"),
            entry("overwork", "2024-03-04T17:00:00+00:00", "2024-03-04T19:20:00+00:00"),
        ];

        let day_end = resolve_day_end(&events, &Labels::default());
        assert_eq!(day_end, DayEnd::Found(at("2024-03-04T19:20:00+00:00")));
        assert_eq!(day_end.message().to_string(), "Go home scheduled on 19:20");
    }

    #[test]
    fn test_zero_length_overwork_uses_underwork_start() {
        let events = vec![
            entry("underwork", "2024-03-04T15:30:00+00:00", "2024-03-04T18:00:00+00:00"),
            entry("overwork", "2024-03-04T18:00:00+00:00", "2024-03-04T18:00:00+00:00"),
        ];

        let day_end = resolve_day_end(&events, &Labels::default());
        assert_eq!(day_end, DayEnd::Found(at("2024-03-04T15:30:00+00:00")));
        assert_eq!(day_end.message().to_string(), "Go home scheduled on 15:30");
    }

    #[test]
    fn test_last_entries_by_start_win() {
        let events = vec![
            entry("overwork", "2024-03-04T20:00:00+00:00", "2024-03-04T21:00:00+00:00"),
            entry("underwork", "2024-03-04T08:00:00+00:00", "2024-03-04T09:00:00+00:00"),
            entry("overwork", "2024-03-04T10:00:00+00:00", "2024-03-04T10:00:00+00:00"),
            entry("underwork", "2024-03-04T12:00:00+00:00", "2024-03-04T13:00:00+00:00"),
        ];

        // The latest overwork is not a placeholder, so its end counts.
        assert_eq!(resolve_day_end(&events, &Labels::default()), DayEnd::Found(at("2024-03-04T21:00:00+00:00")));
    }

    #[test]
    fn test_missing_entries_mean_no_data() {
        let only_underwork = vec![entry("underwork", "2024-03-04T16:00:00+00:00", "2024-03-04T17:00:00+00:00")];
        let only_overwork = vec![entry("overwork", "2024-03-04T17:00:00+00:00", "2024-03-04T18:00:00+00:00")];

        assert_eq!(resolve_day_end(&[], &Labels::default()), DayEnd::NoDataForToday);
        assert_eq!(resolve_day_end(&only_underwork, &Labels::default()), DayEnd::NoDataForToday);
        assert_eq!(resolve_day_end(&only_overwork, &Labels::default()), DayEnd::NoDataForToday);
        assert_eq!(DayEnd::NoDataForToday.message().to_string(), "No data for today.");
    }

    #[test]
    fn test_clock_uses_event_offset() {
        let events = vec![
            entry("underwork", "2024-03-04T13:00:00+03:00", "2024-03-04T14:00:00+03:00"),
            entry("overwork", "2024-03-04T18:05:00+03:00", "2024-03-04T19:05:00+03:00"),
        ];
        assert_eq!(resolve_day_end(&events, &Labels::default()).message().to_string(), "Go home scheduled on 19:05");
    }
}
