//! Annotation tag parsing.
//!
//! A tag is the string inside `#[vgen("...")]`, for example
//! `required,min=2,max=50`. Parsing turns it into an ordered list of
//! [`Rule`]s; nothing is sorted or deduplicated.
//!
//! Rule values cannot contain `,`, so the allowed values of an `in` rule are
//! written as trailing segments: `in=active,pending,disabled`. After an `in`
//! rule, every segment that has no `=` and is not itself a rule name is taken
//! as one more allowed value.

use std::fmt;

use crate::error::{TagSyntaxError, ValueError};

/// Rule names understood by the compiler.
pub const KNOWN_RULES: &[&str] = &["required", "min", "max", "len", "email", "in"];

const SEPARATOR: char = ',';
const KEY_VALUE: char = '=';

/// One rule parsed from a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    value: String,
}

impl Rule {
    /// Create a rule with a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a flag-style rule (no value).
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }

    /// Rule name, e.g. `min`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value; empty for flag-style rules.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether a value was given.
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    /// Interpret the value as a base-10 integer.
    ///
    /// A leading sign is accepted; whitespace, digit separators and
    /// fractional parts are not.
    pub fn as_int(&self) -> Result<i64, ValueError> {
        if self.value.is_empty() {
            return Err(ValueError::Missing {
                rule: self.name.clone(),
            });
        }

        self.value.parse().map_err(|_| ValueError::NotAnInteger {
            rule: self.name.clone(),
            value: self.value.clone(),
        })
    }

    /// Split the value of an `in` rule into its allowed values.
    ///
    /// Elements are trimmed and empty ones dropped. Order and duplicates are
    /// kept.
    pub fn as_list(&self) -> Result<Vec<String>, ValueError> {
        if self.name != "in" {
            return Err(ValueError::NotAList {
                rule: self.name.clone(),
            });
        }

        Ok(self
            .value
            .split(SEPARATOR)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}{}{}", self.name, KEY_VALUE, self.value)
        }
    }
}

/// Returns `true` if `name` is a rule the compiler understands.
pub fn is_known_rule(name: &str) -> bool {
    KNOWN_RULES.contains(&name)
}

/// Parse a raw tag into rules, in order.
///
/// Empty segments (leading, trailing or doubled separators) are skipped.
/// A segment with a value but no name is an error.
pub fn parse_tag(raw: &str) -> Result<Vec<Rule>, TagSyntaxError> {
    let mut rules: Vec<Rule> = Vec::new();
    let mut collecting_list = false;

    for segment in raw.split(SEPARATOR) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        if collecting_list && !segment.contains(KEY_VALUE) && !is_known_rule(segment) {
            if let Some(last) = rules.last_mut() {
                if !last.value.is_empty() {
                    last.value.push(SEPARATOR);
                }
                last.value.push_str(segment);
                continue;
            }
        }

        let rule = match segment.split_once(KEY_VALUE) {
            Some((name, value)) => Rule::new(name, value),
            None => Rule::flag(segment),
        };

        if rule.name.is_empty() {
            return Err(TagSyntaxError {
                segment: segment.to_string(),
            });
        }

        collecting_list = rule.name == "in";
        rules.push(rule);
    }

    Ok(rules)
}

/// Render rules back into tag syntax.
pub fn format_tag(rules: &[Rule]) -> String {
    rules
        .iter()
        .map(Rule::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags_and_values() {
        let rules = parse_tag("required,min=2,max=50").unwrap();

        assert_eq!(
            rules,
            vec![
                Rule::flag("required"),
                Rule::new("min", "2"),
                Rule::new("max", "50"),
            ]
        );
    }

    #[test]
    fn test_parse_skips_stray_separators() {
        let rules = parse_tag(" ,required,, email , ").unwrap();

        assert_eq!(rules, vec![Rule::flag("required"), Rule::flag("email")]);
    }

    #[test]
    fn test_parse_empty_tag() {
        assert!(parse_tag("").unwrap().is_empty());
        assert!(parse_tag("  ,  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_missing_name_is_error() {
        let err = parse_tag("required,=5").unwrap_err();
        assert_eq!(err.segment, "=5");
    }

    #[test]
    fn test_parse_splits_at_first_equals() {
        let rules = parse_tag("in=a=b").unwrap();
        assert_eq!(rules, vec![Rule::new("in", "a=b")]);
    }

    #[test]
    fn test_parse_keeps_order_and_duplicates() {
        let rules = parse_tag("max=5,required,max=5").unwrap();
        let names: Vec<_> = rules.iter().map(Rule::name).collect();
        assert_eq!(names, vec!["max", "required", "max"]);
    }

    #[test]
    fn test_in_collects_trailing_values() {
        let rules = parse_tag("in=active,pending,disabled").unwrap();
        assert_eq!(rules, vec![Rule::new("in", "active,pending,disabled")]);
    }

    #[test]
    fn test_in_list_stops_at_known_rule() {
        let rules = parse_tag("in=a, b,required,c").unwrap();

        assert_eq!(
            rules,
            vec![
                Rule::new("in", "a,b"),
                Rule::flag("required"),
                Rule::flag("c"),
            ]
        );
    }

    #[test]
    fn test_in_list_stops_at_key_value() {
        let rules = parse_tag("in=a,b,len=5").unwrap();
        assert_eq!(rules, vec![Rule::new("in", "a,b"), Rule::new("len", "5")]);
    }

    #[test]
    fn test_as_int() {
        for ok in ["0", "-3", "150", "+7"] {
            assert!(Rule::new("min", ok).as_int().is_ok(), "{ok} should parse");
        }
        assert_eq!(Rule::new("min", "-3").as_int().unwrap(), -3);

        for bad in ["", "abc", "1.5", "1_000", " 5", "0x10"] {
            assert!(Rule::new("min", bad).as_int().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn test_as_int_missing_value() {
        assert_eq!(
            Rule::flag("min").as_int().unwrap_err(),
            ValueError::Missing {
                rule: "min".to_string()
            }
        );
    }

    #[test]
    fn test_as_list_trims_and_drops_empty() {
        let rule = Rule::new("in", "active, pending ,disabled");
        assert_eq!(
            rule.as_list().unwrap(),
            vec!["active", "pending", "disabled"]
        );

        let rule = Rule::new("in", " a,,b , a,");
        assert_eq!(rule.as_list().unwrap(), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_as_list_only_for_in() {
        assert!(matches!(
            Rule::new("min", "1,2").as_list(),
            Err(ValueError::NotAList { .. })
        ));
    }

    #[test]
    fn test_format_round_trip() {
        let rules = parse_tag("required, min=2 ,in=x, y").unwrap();
        let formatted = format_tag(&rules);

        assert_eq!(formatted, "required,min=2,in=x,y");
        assert_eq!(parse_tag(&formatted).unwrap(), rules);
    }
}
