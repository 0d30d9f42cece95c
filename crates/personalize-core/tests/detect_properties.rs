use personalize_core::detect::{detect, detect_item_count, DetectionSource};
use proptest::prelude::*;
use proptest::test_runner::Config;

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn set_of_returns_n(
        prefix in "[A-Za-z ]{0,20}",
        suffix in "[A-Za-z ]{0,20}",
        n in 1_usize..10_000,
        upper in any::<bool>(),
    ) {
        let phrase = if upper { "SET OF" } else { "Set of" };
        let title = format!("{prefix} {phrase} {n} {suffix}");
        let d = detect(&title);
        prop_assert_eq!(d.count, n);
        prop_assert_eq!(d.source, DetectionSource::SetOf);
    }

    #[test]
    fn pack_returns_n(
        prefix in "[A-Za-z ]{0,20}",
        suffix in "[A-Za-z ]{0,20}",
        n in 1_usize..10_000,
        hyphen in any::<bool>(),
    ) {
        let sep = if hyphen { "-" } else { " " };
        let title = format!("{prefix} {n}{sep}Pack {suffix}");
        prop_assert_eq!(detect_item_count(&title), n);
    }

    #[test]
    fn no_pattern_returns_one(title in "[A-Za-z ,.!&']{0,60}") {
        prop_assert_eq!(detect_item_count(&title), 1);
    }

    #[test]
    fn always_at_least_one(title in ".{0,80}") {
        prop_assert!(detect_item_count(&title) >= 1);
    }
}
