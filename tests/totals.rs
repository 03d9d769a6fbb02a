#[cfg(test)]
mod tests {
    use jtl::libs::elapsed::ElapsedTime;
    use jtl::libs::events::{Dispatcher, TrackerEvent};
    use jtl::libs::stopwatch::Stopwatch;
    use jtl::libs::totals::Totals;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_totals_are_zero() {
        let totals = Totals::new(Dispatcher::new());
        assert_eq!(totals.logged_total(), ElapsedTime::zero());
        assert_eq!(totals.logged_total_as_string(), "0m");
    }

    #[test]
    fn test_add_carries_minutes_into_hours() {
        let totals = Totals::new(Dispatcher::new());
        totals.add_to_logged_total(&ElapsedTime::new(0, 59, 0));
        let total = totals.add_to_logged_total(&ElapsedTime::new(0, 10, 0));
        assert_eq!(total, ElapsedTime::new(1, 9, 0));
        assert_eq!(totals.logged_total_as_string(), "1h 9m");
    }

    #[test]
    fn test_add_ignores_seconds() {
        let totals = Totals::new(Dispatcher::new());
        totals.add_to_logged_total(&ElapsedTime::new(0, 1, 59));
        totals.add_to_logged_total(&ElapsedTime::new(0, 0, 59));
        assert_eq!(totals.logged_total(), ElapsedTime::new(0, 1, 0));
    }

    #[test]
    fn test_add_publishes_new_total() {
        let dispatcher = Dispatcher::new();
        let mut events = dispatcher.subscribe();
        let totals = Totals::new(dispatcher);

        totals.add_to_logged_total(&ElapsedTime::new(1, 30, 0));
        assert_eq!(events.try_recv().unwrap(), TrackerEvent::LoggedTotalChanged("1h 30m".to_string()));
    }

    #[test]
    fn test_reset_reports_dropped_time_when_asked() {
        let dispatcher = Dispatcher::new();
        let mut events = dispatcher.subscribe();
        let totals = Totals::new(dispatcher);
        totals.add_to_logged_total(&ElapsedTime::new(2, 5, 0));
        let _ = events.try_recv();

        assert_eq!(totals.reset_logged_total(true), Some("2h 5m".to_string()));
        assert_eq!(totals.logged_total(), ElapsedTime::zero());
        assert_eq!(events.try_recv().unwrap(), TrackerEvent::LoggedTotalChanged("0m".to_string()));
    }

    #[test]
    fn test_reset_is_silent_without_notification_or_drop() {
        let totals = Totals::new(Dispatcher::new());
        assert_eq!(totals.reset_logged_total(true), None);

        totals.add_to_logged_total(&ElapsedTime::new(0, 30, 0));
        assert_eq!(totals.reset_logged_total(false), None);
        assert_eq!(totals.logged_total(), ElapsedTime::zero());
    }

    #[test]
    fn test_grand_total_adds_unlogged_time() {
        let totals = Totals::new(Dispatcher::new());
        totals.add_to_logged_total(&ElapsedTime::new(1, 45, 0));

        assert_eq!(totals.grand_total(&ElapsedTime::new(0, 20, 40)), ElapsedTime::new(2, 5, 0));
        // The logged total itself is unchanged
        assert_eq!(totals.logged_total(), ElapsedTime::new(1, 45, 0));
    }

    #[test]
    fn test_grand_total_of_stopwatch() {
        let totals = Totals::new(Dispatcher::new());
        totals.add_to_logged_total(&ElapsedTime::new(0, 30, 0));

        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        for _ in 0..(45 * 60 + 10) {
            stopwatch.tick();
        }
        assert_eq!(totals.grand_total_of(&stopwatch), ElapsedTime::new(1, 15, 0));
        assert_eq!(totals.grand_total_as_string(&stopwatch), "1h 15m");
    }

    #[test]
    fn test_clones_share_the_logged_total() {
        let totals = Totals::new(Dispatcher::new());
        let shared = totals.clone();
        totals.add_to_logged_total(&ElapsedTime::new(0, 15, 0));
        assert_eq!(shared.logged_total(), ElapsedTime::new(0, 15, 0));
    }
}
