#[cfg(test)]
mod tests {
    use jtl::commands::run::{split_words, Confirmation, SessionCommand, SessionLine};
    use jtl::libs::elapsed::{ElapsedTime, Rounding};
    use pretty_assertions::assert_eq;

    fn parse(line: &str) -> SessionCommand {
        SessionLine::parse_line(line).unwrap().command
    }

    #[test]
    fn test_split_words_keeps_quoted_text() {
        assert_eq!(split_words(r#"log PROJ-1 -d "Code review" -t 1h"#), vec!["log", "PROJ-1", "-d", "Code review", "-t", "1h"]);
        assert_eq!(split_words("  status   "), vec!["status"]);
        assert_eq!(split_words(r#"log PROJ-1 -d """#), vec!["log", "PROJ-1", "-d", ""]);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("pause"), SessionCommand::Pause);
        assert_eq!(parse("resume"), SessionCommand::Resume);
        assert_eq!(parse("reset"), SessionCommand::Reset);
        assert_eq!(parse("reset-total"), SessionCommand::ResetTotal);
        assert_eq!(parse("exit"), SessionCommand::Quit);
        assert_eq!(parse("logs --clear"), SessionCommand::Logs { clear: true });
    }

    #[test]
    fn test_parse_status_rounding() {
        assert_eq!(parse("status"), SessionCommand::Status { round: None });
        assert_eq!(parse("status --round hour"), SessionCommand::Status { round: Some(Rounding::Hour) });
        assert!(SessionLine::parse_line("status --round day").is_err());
    }

    #[test]
    fn test_parse_log() {
        assert_eq!(
            parse(r#"log proj-12 -t "1h 30m" -d "Sprint planning""#),
            SessionCommand::Log {
                issue: "PROJ-12".parse().unwrap(),
                time: Some("1h 30m".to_string()),
                description: "Sprint planning".to_string(),
            }
        );
        assert_eq!(
            parse("log ABC-1"),
            SessionCommand::Log {
                issue: "ABC-1".parse().unwrap(),
                time: None,
                description: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_log_rejects_bad_issue_key() {
        assert!(SessionLine::parse_line("log not-a-key!").is_err());
        assert!(SessionLine::parse_line("log").is_err());
    }

    #[test]
    fn test_parse_deduct_accepts_unquoted_phrase() {
        assert_eq!(
            parse("deduct 1h 15m"),
            SessionCommand::Deduct {
                phrase: vec!["1h".to_string(), "15m".to_string()]
            }
        );
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(SessionLine::parse_line("dance").is_err());
    }

    #[test]
    fn test_overnight_reset_offers_logged_total_reset() {
        assert_eq!(Confirmation::after_reset(&ElapsedTime::new(10, 0, 0)), Some(Confirmation::ResetLoggedTotal));
        assert_eq!(Confirmation::after_reset(&ElapsedTime::new(14, 30, 12)), Some(Confirmation::ResetLoggedTotal));
        assert_eq!(Confirmation::after_reset(&ElapsedTime::new(9, 59, 59)), None);
        assert_eq!(Confirmation::after_reset(&ElapsedTime::zero()), None);
    }

    #[test]
    fn test_only_an_explicit_yes_confirms() {
        assert!(Confirmation::is_accepted("y"));
        assert!(Confirmation::is_accepted(" YES "));
        assert!(!Confirmation::is_accepted(""));
        assert!(!Confirmation::is_accepted("n"));
        assert!(!Confirmation::is_accepted("status"));
    }
}
