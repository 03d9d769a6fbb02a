#[cfg(test)]
mod tests {
    use jtl::libs::elapsed::ElapsedTime;
    use jtl::libs::error::TrackerError;
    use jtl::libs::phrase::{from_phrase, is_valid_phrase, to_phrase};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_phrase_omits_hours_when_zero() {
        assert_eq!(to_phrase(&ElapsedTime::zero()), "0m");
        assert_eq!(to_phrase(&ElapsedTime::new(0, 45, 59)), "45m");
    }

    #[test]
    fn test_to_phrase_always_shows_minutes_with_hours() {
        assert_eq!(to_phrase(&ElapsedTime::new(1, 0, 0)), "1h 0m");
        assert_eq!(to_phrase(&ElapsedTime::new(26, 3, 12)), "26h 3m");
    }

    #[test]
    fn test_from_phrase_single_units() {
        assert_eq!(from_phrase("15m").unwrap(), ElapsedTime::new(0, 15, 0));
        assert_eq!(from_phrase("2h").unwrap(), ElapsedTime::new(2, 0, 0));
        assert_eq!(from_phrase("1d").unwrap(), ElapsedTime::new(24, 0, 0));
    }

    #[test]
    fn test_from_phrase_combined_units() {
        assert_eq!(from_phrase("1d 2h 3m").unwrap(), ElapsedTime::new(26, 3, 0));
        assert_eq!(from_phrase("1h 30m").unwrap(), ElapsedTime::new(1, 30, 0));
        assert_eq!(from_phrase("1H30M").unwrap(), ElapsedTime::new(1, 30, 0));
    }

    #[test]
    fn test_from_phrase_carries_minutes() {
        assert_eq!(from_phrase("90m").unwrap(), ElapsedTime::new(1, 30, 0));
    }

    #[test]
    fn test_from_phrase_trims_whitespace() {
        assert_eq!(from_phrase("  1h 5m \n").unwrap(), ElapsedTime::new(1, 5, 0));
    }

    #[test]
    fn test_from_phrase_rejects_malformed_input() {
        for phrase in ["", "   ", "an hour", "1m 2h", "1.5h", "-5m", "1w", "h"] {
            assert_eq!(from_phrase(phrase), Err(TrackerError::MalformedPhrase(phrase.to_string())), "phrase {:?}", phrase);
        }
    }

    #[test]
    fn test_from_phrase_rejects_overflowing_segments() {
        assert!(from_phrase("99999999999999999999d").is_err());
        assert!(from_phrase("768614336404564651d").is_err());
        assert!(matches!(from_phrase("6000000000000000h"), Err(TrackerError::MalformedPhrase(_))));
        assert!(matches!(from_phrase("18446744073709551615m"), Err(TrackerError::MalformedPhrase(_))));
        assert!(from_phrase("5124095576030431h 60m").is_err());
    }

    #[test]
    fn test_from_phrase_accepts_largest_representable_hours() {
        let time = from_phrase("5124095576030431h").unwrap();
        assert_eq!(time.hours(), 5_124_095_576_030_431);
        assert_eq!(time.seconds(), 0);
    }

    #[test]
    fn test_phrase_of_parsed_time_is_canonical() {
        assert_eq!(to_phrase(&from_phrase("1d 75m").unwrap()), "25h 15m");
    }

    #[test]
    fn test_is_valid_phrase() {
        assert!(is_valid_phrase("3h"));
        assert!(!is_valid_phrase("three hours"));
    }
}
