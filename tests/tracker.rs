#[cfg(test)]
mod tests {
    use anyhow::Result;
    use jtl::api::IssueTracker;
    use jtl::libs::activity_log::LogLevel;
    use jtl::libs::elapsed::{ElapsedTime, Rounding};
    use jtl::libs::events::{Dispatcher, TrackerEvent};
    use jtl::libs::issue::IssueKey;
    use jtl::libs::tracker::{looks_overnight, Tracker, TrackerSettings};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tokio::sync::broadcast::Receiver;

    type Worklogs = Arc<Mutex<Vec<(String, String, String)>>>;

    /// In-memory issue tracker recording every worklog it receives.
    struct FakeJira {
        connected: bool,
        worklog_id: Option<String>,
        summary: Option<String>,
        worklogs: Worklogs,
    }

    impl FakeJira {
        fn new() -> Self {
            Self {
                connected: true,
                worklog_id: Some("10001".to_string()),
                summary: Some("Fix the login page".to_string()),
                worklogs: Arc::default(),
            }
        }
    }

    impl IssueTracker for FakeJira {
        async fn test_connection(&mut self) -> Result<bool> {
            Ok(self.connected)
        }

        async fn issue_summary(&mut self, _issue: &IssueKey) -> Result<Option<String>> {
            Ok(self.summary.clone())
        }

        async fn log_time(&mut self, issue: &IssueKey, time: &str, description: &str) -> Result<Option<String>> {
            self.worklogs.lock().push((issue.to_string(), time.to_string(), description.to_string()));
            Ok(self.worklog_id.clone())
        }
    }

    fn settings(reminder_frequency: u64, max_logs: usize) -> TrackerSettings {
        TrackerSettings {
            reminder_frequency,
            max_logs,
        }
    }

    fn started(jira: FakeJira, settings: TrackerSettings) -> (Tracker<FakeJira>, Receiver<TrackerEvent>) {
        let dispatcher = Dispatcher::new();
        let events = dispatcher.subscribe();
        let mut tracker = Tracker::new(settings, jira, dispatcher);
        tracker.start();
        (tracker, events)
    }

    fn advance(tracker: &mut Tracker<FakeJira>, seconds: u64) {
        for _ in 0..seconds {
            tracker.stopwatch_mut().tick();
        }
    }

    fn drain(events: &mut Receiver<TrackerEvent>) -> Vec<TrackerEvent> {
        std::iter::from_fn(|| events.try_recv().ok()).collect()
    }

    fn messages(tracker: &Tracker<FakeJira>) -> Vec<(LogLevel, String)> {
        tracker.activity_logs().iter().map(|log| (log.level, log.message.clone())).collect()
    }

    fn issue() -> IssueKey {
        "PROJ-1".parse().unwrap()
    }

    #[test]
    fn test_default_settings() {
        assert_eq!(TrackerSettings::default(), settings(30, 50));
    }

    #[test]
    fn test_start_publishes_zeroed_state() {
        let (tracker, mut events) = started(FakeJira::new(), TrackerSettings::default());

        assert!(tracker.stopwatch().is_running());
        let events = drain(&mut events);
        assert!(events.contains(&TrackerEvent::LoggedTotalChanged("0m".to_string())));
        assert!(events.contains(&TrackerEvent::TimeChanged("0m".to_string())));
        assert!(events.contains(&TrackerEvent::DayGrandTotalChanged("0m".to_string())));
    }

    #[test]
    fn test_minute_ticks_publish_time_and_grand_total() {
        let (mut tracker, mut events) = started(FakeJira::new(), TrackerSettings::default());
        tracker.add_to_logged_total(&ElapsedTime::new(1, 0, 0));
        drain(&mut events);

        advance(&mut tracker, 59);
        assert!(drain(&mut events).is_empty());

        advance(&mut tracker, 1);
        assert_eq!(
            drain(&mut events),
            vec![
                TrackerEvent::TimeChanged("1m".to_string()),
                TrackerEvent::DayGrandTotalChanged("1h 1m".to_string()),
            ]
        );
    }

    #[test]
    fn test_reminder_is_published_on_frequency() {
        let (mut tracker, mut events) = started(FakeJira::new(), settings(2, 50));
        drain(&mut events);

        advance(&mut tracker, 60);
        assert!(!drain(&mut events).iter().any(|event| matches!(event, TrackerEvent::ReminderDue(_))));

        advance(&mut tracker, 60);
        assert!(drain(&mut events).contains(&TrackerEvent::ReminderDue("You've not logged any time for:\n2m".to_string())));
    }

    #[test]
    fn test_restarting_does_not_duplicate_listeners() {
        let (mut tracker, mut events) = started(FakeJira::new(), TrackerSettings::default());
        tracker.start();
        drain(&mut events);

        advance(&mut tracker, 60);
        let time_changes = drain(&mut events).into_iter().filter(|event| matches!(event, TrackerEvent::TimeChanged(_))).count();
        assert_eq!(time_changes, 1);
    }

    #[test]
    fn test_reset_time_returns_and_logs_dropped_time() {
        let (mut tracker, _events) = started(FakeJira::new(), TrackerSettings::default());
        advance(&mut tracker, 5 * 60 + 20);

        let dropped = tracker.reset_time(true);
        assert_eq!(dropped, ElapsedTime::new(0, 5, 20));
        assert_eq!(tracker.time_auto(None), ElapsedTime::zero());
        assert!(tracker.stopwatch().is_running());
        assert_eq!(messages(&tracker), vec![(LogLevel::Info, "The accrued time has been reset (5m dropped)".to_string())]);
    }

    #[test]
    fn test_reset_time_under_a_minute_is_not_logged() {
        let (mut tracker, _events) = started(FakeJira::new(), TrackerSettings::default());
        advance(&mut tracker, 59);
        tracker.reset_time(true);
        assert!(tracker.activity_logs().is_empty());
    }

    #[test]
    fn test_looks_overnight() {
        assert!(looks_overnight(&ElapsedTime::new(10, 0, 0)));
        assert!(!looks_overnight(&ElapsedTime::new(9, 59, 59)));
    }

    #[test]
    fn test_overnight_reset_is_followed_by_logged_total_reset() {
        let (mut tracker, _events) = started(FakeJira::new(), TrackerSettings::default());
        tracker.add_to_logged_total(&ElapsedTime::new(2, 0, 0));
        advance(&mut tracker, 10 * 3600);

        let dropped = tracker.reset_time(true);
        assert!(looks_overnight(&dropped));
        tracker.reset_logged_total(true);

        assert_eq!(tracker.logged_total(), ElapsedTime::zero());
        assert_eq!(tracker.day_grand_total(), ElapsedTime::zero());
        assert_eq!(
            messages(&tracker),
            vec![
                (LogLevel::Info, "The accrued time has been reset (10h 0m dropped)".to_string()),
                (LogLevel::Info, "The total logged time has been reset (2h 0m dropped)".to_string()),
            ]
        );
    }

    #[test]
    fn test_pause_and_resume() {
        let (mut tracker, _events) = started(FakeJira::new(), TrackerSettings::default());
        advance(&mut tracker, 30);
        tracker.pause();
        advance(&mut tracker, 30);
        assert_eq!(tracker.time_auto(None), ElapsedTime::new(0, 0, 30));

        tracker.resume();
        advance(&mut tracker, 30);
        assert_eq!(tracker.time_auto(None), ElapsedTime::new(0, 1, 0));
    }

    #[test]
    fn test_deduct_time() {
        let (mut tracker, _events) = started(FakeJira::new(), TrackerSettings::default());
        advance(&mut tracker, 3_600);

        assert_eq!(tracker.deduct_time("15m"), Ok(ElapsedTime::new(0, 45, 0)));
        assert_eq!(tracker.deduct_time("1d"), Ok(ElapsedTime::zero()));
    }

    #[test]
    fn test_deduct_malformed_phrase_leaves_time_untouched() {
        let (mut tracker, _events) = started(FakeJira::new(), TrackerSettings::default());
        advance(&mut tracker, 600);

        assert!(tracker.deduct_time("ten minutes").is_err());
        assert_eq!(tracker.time_auto(None), ElapsedTime::new(0, 10, 0));
    }

    #[test]
    fn test_time_auto_as_string_rounds() {
        let (mut tracker, _events) = started(FakeJira::new(), TrackerSettings::default());
        advance(&mut tracker, 2 * 3_600 + 29 * 60 + 30);

        assert_eq!(tracker.time_auto_as_string(None), "2h 29m");
        assert_eq!(tracker.time_auto_as_string(Some(Rounding::Minute)), "2h 30m");
        assert_eq!(tracker.time_auto_as_string(Some(Rounding::Hour)), "2h 0m");
    }

    #[test]
    fn test_logged_and_grand_totals() {
        let (mut tracker, mut events) = started(FakeJira::new(), TrackerSettings::default());
        drain(&mut events);
        tracker.add_to_logged_total(&ElapsedTime::new(0, 59, 0));
        tracker.add_to_logged_total(&ElapsedTime::new(0, 10, 0));
        advance(&mut tracker, 20 * 60);

        assert_eq!(tracker.logged_total_as_string(), "1h 9m");
        assert_eq!(tracker.day_grand_total(), ElapsedTime::new(1, 29, 0));
        assert_eq!(tracker.day_grand_total_as_string(), "1h 29m");
        assert!(drain(&mut events).contains(&TrackerEvent::LoggedTotalChanged("1h 9m".to_string())));
    }

    #[test]
    fn test_reset_logged_total_logs_dropped_time() {
        let (mut tracker, _events) = started(FakeJira::new(), TrackerSettings::default());
        tracker.add_to_logged_total(&ElapsedTime::new(1, 9, 0));

        tracker.reset_logged_total(true);
        assert_eq!(tracker.logged_total(), ElapsedTime::zero());
        assert_eq!(
            messages(&tracker),
            vec![(LogLevel::Info, "The total logged time has been reset (1h 9m dropped)".to_string())]
        );
    }

    #[test]
    fn test_activity_log_eviction_is_published() {
        let (mut tracker, mut events) = started(FakeJira::new(), settings(30, 2));
        drain(&mut events);

        tracker.notify_user("one".to_string());
        tracker.warn_user("two".to_string());
        tracker.alert_user("three".to_string());

        let removed: Vec<String> = drain(&mut events)
            .into_iter()
            .filter_map(|event| match event {
                TrackerEvent::ActivityLogRemoved(log) => Some(log.message),
                _ => None,
            })
            .collect();
        assert_eq!(removed, vec!["one".to_string()]);
        assert_eq!(
            messages(&tracker),
            vec![(LogLevel::Warn, "two".to_string()), (LogLevel::Error, "three".to_string())]
        );

        tracker.clear_activity_logs();
        assert!(tracker.activity_logs().is_empty());
    }

    #[tokio::test]
    async fn test_connection_outcome_is_logged() {
        let (mut tracker, _events) = started(FakeJira::new(), TrackerSettings::default());
        assert!(tracker.test_connection().await);

        let mut offline = FakeJira::new();
        offline.connected = false;
        let (mut offline_tracker, _events) = started(offline, TrackerSettings::default());
        assert!(!offline_tracker.test_connection().await);

        assert_eq!(messages(&tracker), vec![(LogLevel::Info, "Connected to JIRA successfully".to_string())]);
        assert_eq!(
            messages(&offline_tracker),
            vec![(
                LogLevel::Error,
                "Connection to JIRA failed, please check your settings are correct then try again".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_submit_manual_time_deducts_it() {
        let jira = FakeJira::new();
        let worklogs = jira.worklogs.clone();
        let (mut tracker, mut events) = started(jira, TrackerSettings::default());
        advance(&mut tracker, 2 * 3_600);
        drain(&mut events);

        let id = tracker.submit(&issue(), Some("30m"), "Code review").await.unwrap();

        assert_eq!(id, "10001");
        assert_eq!(*worklogs.lock(), vec![("PROJ-1".to_string(), "30m".to_string(), "Code review".to_string())]);
        assert_eq!(tracker.logged_total(), ElapsedTime::new(0, 30, 0));
        assert_eq!(tracker.time_auto(None), ElapsedTime::new(1, 30, 0));
        assert_eq!(
            messages(&tracker),
            vec![(LogLevel::Info, "30m was successfully logged against PROJ-1 (Fix the login page)".to_string())]
        );
        assert!(drain(&mut events).contains(&TrackerEvent::TimeLogged("30m".to_string())));
    }

    #[tokio::test]
    async fn test_submit_stopwatch_time_resets_it() {
        let jira = FakeJira::new();
        let worklogs = jira.worklogs.clone();
        let (mut tracker, _events) = started(jira, TrackerSettings::default());
        advance(&mut tracker, 45 * 60 + 29);

        tracker.submit(&issue(), None, "").await.unwrap();

        assert_eq!(worklogs.lock()[0].1, "45m");
        assert_eq!(tracker.logged_total(), ElapsedTime::new(0, 45, 0));
        assert_eq!(tracker.time_auto(None), ElapsedTime::zero());
        assert!(tracker.stopwatch().is_running());
    }

    #[tokio::test]
    async fn test_submit_without_summary() {
        let mut jira = FakeJira::new();
        jira.summary = None;
        let (mut tracker, _events) = started(jira, TrackerSettings::default());

        tracker.submit(&issue(), Some("1d"), "").await.unwrap();
        assert_eq!(
            messages(&tracker),
            vec![(LogLevel::Info, "24h 0m was successfully logged against PROJ-1".to_string())]
        );
        assert_eq!(tracker.logged_total(), ElapsedTime::new(24, 0, 0));
    }

    #[tokio::test]
    async fn test_submit_with_nothing_tracked() {
        let jira = FakeJira::new();
        let worklogs = jira.worklogs.clone();
        let (mut tracker, _events) = started(jira, TrackerSettings::default());
        advance(&mut tracker, 29);

        assert!(tracker.submit(&issue(), None, "").await.is_err());
        assert!(worklogs.lock().is_empty());
        assert_eq!(messages(&tracker)[0].0, LogLevel::Warn);
    }

    #[tokio::test]
    async fn test_submit_malformed_phrase_never_reaches_jira() {
        let jira = FakeJira::new();
        let worklogs = jira.worklogs.clone();
        let (mut tracker, _events) = started(jira, TrackerSettings::default());
        advance(&mut tracker, 600);

        assert!(tracker.submit(&issue(), Some("soon"), "").await.is_err());
        assert!(worklogs.lock().is_empty());
        assert_eq!(tracker.time_auto(None), ElapsedTime::new(0, 10, 0));
        assert_eq!(messages(&tracker)[0].0, LogLevel::Error);
    }

    #[tokio::test]
    async fn test_missing_worklog_is_a_failure() {
        let mut jira = FakeJira::new();
        jira.worklog_id = None;
        let (mut tracker, _events) = started(jira, TrackerSettings::default());
        advance(&mut tracker, 3_600);

        assert!(tracker.submit(&issue(), None, "").await.is_err());
        assert_eq!(tracker.logged_total(), ElapsedTime::zero());
        assert_eq!(tracker.time_auto(None), ElapsedTime::new(1, 0, 0));
        assert_eq!(
            messages(&tracker),
            vec![(
                LogLevel::Error,
                "Failed to log 1h 0m against PROJ-1: no work log was returned by JIRA!".to_string()
            )]
        );
    }
}
