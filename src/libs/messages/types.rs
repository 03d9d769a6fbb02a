/// Every user-facing message of the application.
///
/// Text lives in [`super::display`]; call sites only pick a variant and pass
/// its parameters, so wording stays in one place.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleJira,
    ConfigModuleTracker,
    JiraNotConfigured,

    // === PROMPTS ===
    PromptSelectModules,
    PromptJiraLogin,
    PromptJiraUrl,
    PromptJiraApiPath,
    PromptJiraPassword,
    PromptReminderFrequency,
    PromptMaxLogs,

    // === JIRA MESSAGES ===
    JiraConnected,
    JiraConnectionFailed,
    JiraRequestFailed(String), // status
    WrongPassword(u32),        // attempts
    JiraCredentialsRejected,

    // === TRACKING MESSAGES ===
    AccruedTimeReset(String),                     // dropped phrase
    LoggedTotalReset(String),                     // dropped phrase
    TimeLogged(String, String, Option<String>),   // phrase, issue, summary
    TimeLogFailed(String, String, String),        // phrase, issue, reason
    NoWorklogReturned,
    NothingToLog,
    ReminderDue(String), // unlogged phrase
    OvernightWarning(String),
    ConfirmLoggedTotalReset(String), // dropped phrase
    TimeDeducted(String, String), // deducted, remaining
    TrackerPaused,
    TrackerResumed,
    TrackerAlreadyPaused,
    TrackerAlreadyRunning,

    // === SESSION MESSAGES ===
    SessionStarted,
    SessionStopped,
    SessionHelp,
    StatusHeader,
    ActivityLogsHeader,
    ActivityLogsEmpty,

    // === CONVERSION MESSAGES ===
    PhraseConverted(String, String, u64), // canonical phrase, clock, minutes
}
