//! Validation error types returned by generated validators.
//!
//! A generated `validate()` never stops at the first failing check. Every
//! failure is recorded, in field declaration order and then rule order, into
//! a [`ValidationErrors`] list.

use std::fmt;

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationError {
    /// Name of the validated struct.
    pub struct_name: &'static str,

    /// Name of the field that failed.
    pub field: &'static str,

    /// Rule that produced the failure (`required`, `min`, ...).
    pub rule: &'static str,

    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(
        struct_name: &'static str,
        field: &'static str,
        rule: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            struct_name,
            field,
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Ordered collection of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns `true` if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The first recorded failure, if any.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Iterate over failures in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Failures recorded for one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Consume the collection and return the underlying list.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn error(field: &'static str, message: &str) -> ValidationError {
        ValidationError::new("User", field, "required", message)
    }

    #[test]
    fn test_empty_into_result_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_non_empty_into_result_is_err() {
        let mut errors = ValidationErrors::new();
        errors.push(error("name", "field name is required"));

        let err = errors.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.first().unwrap().field, "name");
    }

    #[test]
    fn test_display_joins_with_newlines() {
        let errors: ValidationErrors = vec![
            error("name", "field name is required"),
            error("email", "field email is required"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            errors.to_string(),
            "field name is required\nfield email is required"
        );
    }

    #[test]
    fn test_for_field_filters() {
        let errors: ValidationErrors = vec![
            error("name", "a"),
            error("email", "b"),
            error("name", "c"),
        ]
        .into_iter()
        .collect();

        let messages: Vec<_> = errors.for_field("name").map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "c"]);
    }

    proptest! {
        #[test]
        fn prop_push_preserves_order(messages in proptest::collection::vec("[a-z]{1,8}", 0..16)) {
            let mut errors = ValidationErrors::new();
            for m in &messages {
                errors.push(error("f", m));
            }

            let recorded: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            prop_assert_eq!(recorded, messages);
        }
    }
}
