#[cfg(test)]
mod tests {
    use jtl::libs::activity_log::ActivityLog;
    use jtl::libs::events::{Dispatcher, TrackerEvent, EVENT_ACTIVITY_LOG_REMOVED, EVENT_DAY_GRAND_TOTAL_CHANGED, EVENT_TIME_CHANGED};
    use serde_json::json;

    #[test]
    fn test_dispatch_without_subscribers_is_fine() {
        let dispatcher = Dispatcher::new();
        dispatcher.time_changed("1m".to_string());
    }

    #[test]
    fn test_every_subscriber_receives_events_in_order() {
        let dispatcher = Dispatcher::new();
        let mut first = dispatcher.subscribe();
        let mut second = dispatcher.clone().subscribe();

        dispatcher.time_changed("1m".to_string());
        dispatcher.day_grand_total_changed("1h 1m".to_string());

        for events in [&mut first, &mut second] {
            assert_eq!(events.try_recv().unwrap(), TrackerEvent::TimeChanged("1m".to_string()));
            assert_eq!(events.try_recv().unwrap(), TrackerEvent::DayGrandTotalChanged("1h 1m".to_string()));
            assert!(events.try_recv().is_err());
        }
    }

    #[test]
    fn test_event_names() {
        assert_eq!(TrackerEvent::TimeChanged(String::new()).name(), EVENT_TIME_CHANGED);
        assert_eq!(TrackerEvent::DayGrandTotalChanged(String::new()).name(), EVENT_DAY_GRAND_TOTAL_CHANGED);
        assert_eq!(TrackerEvent::ActivityLogRemoved(ActivityLog::info("x")).name(), EVENT_ACTIVITY_LOG_REMOVED);
        assert_eq!(TrackerEvent::TimeLogged(String::new()).name(), "time-logged");
    }

    #[test]
    fn test_event_serialization() {
        let value = serde_json::to_value(TrackerEvent::LoggedTotalChanged("2h 0m".to_string())).unwrap();
        assert_eq!(value, json!({ "event": "logged-total-changed", "payload": "2h 0m" }));
    }
}
