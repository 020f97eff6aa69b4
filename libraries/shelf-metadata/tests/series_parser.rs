/// Properties of the series string parser
use proptest::prelude::*;
use shelf_core::SeriesIndex;
use shelf_metadata::parse_series;

fn index_text(raw: &str, hint: &str) -> Option<String> {
    parse_series(raw, hint)
        .index
        .as_ref()
        .map(|i| i.as_str().to_string())
}

#[test]
fn scenario_values() {
    let parsed = parse_series("Chronicles #2", "");
    assert_eq!(parsed.name, "Chronicles");
    assert_eq!(index_text("Chronicles #2", ""), Some("2".to_string()));

    let parsed = parse_series("Saga", "Saga - 03");
    assert_eq!(parsed.name, "Saga");
    assert_eq!(index_text("Saga", "Saga - 03"), Some("3".to_string()));
    assert!(parsed.used_fallback);
}

#[test]
fn no_suffix_and_no_digits_means_no_index() {
    let parsed = parse_series("The Long Road", "the-long-road");
    assert_eq!(parsed.name, "The Long Road");
    assert!(parsed.index.is_none());
    assert!(!parsed.used_fallback);
}

#[test]
fn malformed_suffix_is_part_of_the_name() {
    let parsed = parse_series("Saga #", "book");
    assert_eq!(parsed.name, "Saga #");
    assert!(parsed.index.is_none());

    let parsed = parse_series("Saga #two", "book");
    assert_eq!(parsed.name, "Saga #two");
    assert!(parsed.index.is_none());
}

proptest! {
    /// Property: "name #n" always splits back into name and n
    #[test]
    fn suffix_round_trips(
        name in "[A-Za-z][A-Za-z ']{0,20}[A-Za-z]",
        whole in 0u32..10_000,
        fraction in proptest::option::of(0u32..100),
    ) {
        let index = match fraction {
            Some(f) => format!("{whole}.{f}"),
            None => whole.to_string(),
        };
        let parsed = parse_series(&format!("{name} #{index}"), "ignored 42");

        prop_assert_eq!(parsed.name, name);
        prop_assert_eq!(parsed.index.as_ref().map(SeriesIndex::as_str), Some(index.as_str()));
        prop_assert!(!parsed.used_fallback);
    }

    /// Property: parsing never panics and never yields an empty name for non-blank input
    #[test]
    fn arbitrary_input_is_total(raw in "\\PC{1,40}", hint in "\\PC{0,40}") {
        prop_assume!(!raw.trim().is_empty());
        let parsed = parse_series(&raw, &hint);
        prop_assert!(!parsed.name.is_empty());
        prop_assert_eq!(parsed.used_fallback, parsed.index.is_some() && !parsed.has_explicit_index());
    }

    /// Property: the fallback index is the first digit run of the hint without leading zeros
    #[test]
    fn fallback_uses_first_digit_run(prefix in "[a-z -]{0,10}", n in 0u32..100_000, pad in 0usize..3) {
        let hint = format!("{prefix}{}{n} part 9", "0".repeat(pad));
        let parsed = parse_series("Saga", &hint);
        let expected = n.to_string();
        prop_assert_eq!(parsed.index.as_ref().map(SeriesIndex::as_str), Some(expected.as_str()));
        prop_assert!(parsed.used_fallback);
    }
}
