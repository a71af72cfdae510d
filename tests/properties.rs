//! Property-based tests for parsing and resolution invariants.

use proptest::prelude::*;
use xcsettings::{types, Condition, Environment, Level, Setting, Value};

/// Text made only of literals and well-formed `$(NAME)` references.
fn well_formed_text() -> impl Strategy<Value = String> {
    let literal = "[a-z0-9 _.,/-]{0,8}";
    let name = "[A-Z][A-Z0-9_]{0,7}";
    (literal, prop::collection::vec((name, literal), 0..4)).prop_map(|(head, tail)| {
        let mut text = head;
        for (name, trailing) in tail {
            text.push_str("$(");
            text.push_str(&name);
            text.push(')');
            text.push_str(&trailing);
        }
        text
    })
}

/// Arbitrary text, heavy on reference syntax fragments.
fn hostile_text() -> impl Strategy<Value = String> {
    "[\\$\\(\\)\\{\\}a-zA-Z0-9_ .:]{0,24}"
}

/// Setting value text that may reference itself or an undeclared name, but
/// never a second declared name (so resolution cannot cycle).
fn self_referential_value() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        "[a-z ]{0,5}",
        Just("$(FOO)".to_string()),
        Just("$(inherited)".to_string()),
        Just("$(MISSING)".to_string()),
        Just("$(".to_string()),
        Just("${x".to_string()),
    ];
    prop::collection::vec(token, 0..6).prop_map(|tokens| tokens.concat())
}

proptest! {
    #[test]
    fn prop_parse_raw_round_trips_well_formed(text in well_formed_text()) {
        prop_assert_eq!(Value::parse(&text).raw(), text);
    }

    #[test]
    fn prop_parse_is_total_and_raw_idempotent(text in hostile_text()) {
        let first = Value::parse(&text).raw();
        let second = Value::parse(&first).raw();
        prop_assert_eq!(second, first);
    }

    #[test]
    fn prop_spellings_normalize(name in "[A-Z][A-Z0-9_]{0,7}") {
        let normalized = format!("$({name})");
        prop_assert_eq!(Value::parse(&format!("${{{name}}}")).raw(), normalized.clone());
        prop_assert_eq!(Value::parse(&format!("${name}")).raw(), normalized);
    }

    #[test]
    fn prop_literal_conditions_are_reflexive(
        values in prop::collection::btree_map("[a-z]{1,6}", "[A-Za-z0-9.]{0,8}", 0..4)
    ) {
        let condition = Condition::new(values);
        prop_assert!(condition.matches(&condition));
        prop_assert!(Condition::empty().matches(&condition));
    }

    #[test]
    fn prop_prefix_wildcard_subsumes(
        prefix in "[a-z]{0,8}",
        suffix in "[a-z0-9.]{0,8}",
    ) {
        let declared: Condition = [("sdk", format!("{prefix}*"))].into_iter().collect();
        let query: Condition = [("sdk", format!("{prefix}{suffix}"))].into_iter().collect();
        prop_assert!(declared.matches(&query));
    }

    #[test]
    fn prop_list_round_trips(
        items in prop::collection::vec("[a-zA-Z0-9 '\"\\\\./-]{1,10}", 0..5)
    ) {
        prop_assert_eq!(types::parse_list(&types::format_list(&items)), items);
    }

    #[test]
    fn prop_integer_text_round_trips(value in any::<i64>()) {
        prop_assert_eq!(types::parse_integer(&types::format_integer(value)), value);
    }

    #[test]
    fn prop_inheritance_chain_terminates(spellings in prop::collection::vec(any::<bool>(), 1..6)) {
        let mut environment = Environment::new();
        for (index, inherited) in spellings.iter().enumerate() {
            let reference = if *inherited { "$(inherited)" } else { "$(FOO)" };
            let line = format!("FOO = {reference}{index}");
            environment.insert_back(
                Level::new(vec![Setting::parse(&line).unwrap()]),
                false,
            );
        }

        // Each hop advances one level, so the digits come out bottom-up.
        let expected: String = (0..spellings.len()).rev().map(|i| i.to_string()).collect();
        prop_assert_eq!(environment.resolve("FOO", &Condition::empty()), expected);
    }

    #[test]
    fn prop_resolution_of_junk_terminates(value in self_referential_value()) {
        let mut environment = Environment::new();
        environment.insert_back(
            Level::new(vec![Setting::parse_pair("FOO", &value)]),
            false,
        );
        // Totality is the property; junk may resolve to anything.
        let _ = environment.resolve("FOO", &Condition::empty());
        let _ = environment.compute_values(&Condition::empty());
    }
}
