//! Property-based tests for the tag parser and rule helpers.
//!
//! Properties tested:
//! - Formatting parsed rules and parsing again yields the same rules
//! - Parsing never reorders rules
//! - `as_int` accepts exactly the decimal literals of `i64`
//! - `as_list` yields trimmed, non-empty elements in order

use proptest::prelude::*;
use vgen_core::tag::is_known_rule;
use vgen_core::{format_tag, parse_tag, Rule};

// =============================================================================
// Generators
// =============================================================================

/// A value that survives tag syntax: no separators, no surrounding space.
fn arb_value() -> impl Strategy<Value = String> {
    "[a-z0-9_.@-]{1,8}"
}

/// A rule built from the known rule names plus a few unknown ones.
fn arb_rule() -> impl Strategy<Value = Rule> {
    prop_oneof![
        Just(Rule::flag("required")),
        Just(Rule::flag("email")),
        (-1000i64..1000).prop_map(|n| Rule::new("min", n.to_string())),
        (-1000i64..1000).prop_map(|n| Rule::new("max", n.to_string())),
        (0i64..100).prop_map(|n| Rule::new("len", n.to_string())),
        proptest::collection::vec("v[a-z0-9]{0,6}", 1..4)
            .prop_map(|values| Rule::new("in", values.join(","))),
        ("x[a-z]{1,6}", proptest::option::of(arb_value())).prop_map(|(name, value)| {
            match value {
                Some(v) => Rule::new(name, v),
                None => Rule::flag(name),
            }
        }),
    ]
}

/// Raw tags, including stray separators and padding.
fn arb_raw_tag() -> impl Strategy<Value = String> {
    proptest::collection::vec("[ ]{0,2}[a-z=,0-9]{0,6}[ ]{0,2}", 0..6)
        .prop_map(|parts| parts.join(","))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_format_then_parse_is_identity(rules in proptest::collection::vec(arb_rule(), 0..6)) {
        // An `in` list absorbs unknown flags that follow it.
        let rules: Vec<Rule> = rules
            .into_iter()
            .scan(false, |after_in, rule| {
                if *after_in && !rule.has_value() && !is_known_rule(rule.name()) {
                    return Some(None);
                }
                *after_in = rule.name() == "in";
                Some(Some(rule))
            })
            .flatten()
            .collect();

        let parsed = parse_tag(&format_tag(&rules)).unwrap();
        prop_assert_eq!(parsed, rules);
    }

    #[test]
    fn prop_parse_is_idempotent(raw in arb_raw_tag()) {
        if let Ok(rules) = parse_tag(&raw) {
            let again = parse_tag(&format_tag(&rules)).unwrap();
            prop_assert_eq!(again, rules);
        }
    }

    #[test]
    fn prop_parse_keeps_rule_order(names in proptest::collection::vec("[a-df-hj-z]{1,6}", 1..8)) {
        let raw = names.join(",");
        let rules = parse_tag(&raw).unwrap();
        let parsed: Vec<&str> = rules.iter().map(Rule::name).collect();
        prop_assert_eq!(parsed, names.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn prop_as_int_accepts_decimal_literals(n in any::<i64>()) {
        prop_assert_eq!(Rule::new("min", n.to_string()).as_int().unwrap(), n);
    }

    #[test]
    fn prop_as_int_rejects_non_integers(s in "[a-z ._]{1,6}") {
        prop_assert!(Rule::new("max", s).as_int().is_err());
    }

    #[test]
    fn prop_as_list_trims_and_drops_empty(
        values in proptest::collection::vec("[ ]{0,2}[a-z]{0,5}[ ]{0,2}", 0..6)
    ) {
        let rule = Rule::new("in", values.join(","));
        let expected: Vec<String> = values
            .iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();

        prop_assert_eq!(rule.as_list().unwrap(), expected);
    }
}
