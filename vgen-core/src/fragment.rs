//! Validation fragments.
//!
//! A [`ValidationFragment`] is the compiled form of one rule on one field: a
//! [`Check`] plus the names needed to report a failure. Fragments are plain
//! data; the emitter turns them into Rust source and builds the failure
//! messages from their [`MessageTemplate`].

use std::fmt;

/// Email pattern enforced by the `email` rule. Anchored at both ends.
///
/// Generated code embeds it in its email helper.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// What a length check measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Unicode scalar values of a string.
    Chars,
    /// Elements of a sequence.
    Items,
}

/// Direction of a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    AtMost,
    Exactly,
}

impl Comparison {
    /// Operator that detects a violation, as Rust source.
    pub fn failing_operator(self) -> &'static str {
        match self {
            Comparison::AtLeast => "<",
            Comparison::AtMost => ">",
            Comparison::Exactly => "!=",
        }
    }

    /// Whether a value too large for `i128` violates the bound.
    ///
    /// Only unsigned values above `i128::MAX` fail to widen, and those are
    /// above every `i64` bound.
    pub fn fails_above_i128(self) -> bool {
        !matches!(self, Comparison::AtLeast)
    }

    fn phrase(self) -> &'static str {
        match self {
            Comparison::AtLeast => "at least ",
            Comparison::AtMost => "at most ",
            Comparison::Exactly => "",
        }
    }
}

/// Condition a fragment enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// String must not be empty.
    NotEmpty,
    /// Integer must not be zero.
    NotZero,
    /// Length of a string or sequence against a bound.
    Length {
        measure: Measure,
        op: Comparison,
        bound: i64,
    },
    /// Integer value against a bound.
    Value { op: Comparison, bound: i64 },
    /// String must match [`EMAIL_PATTERN`].
    Email,
    /// String must equal one of the listed values.
    OneOf(Vec<String>),
}

/// Failure message with one optional slot for the observed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    before: String,
    after: Option<String>,
}

impl MessageTemplate {
    fn fixed(text: String) -> Self {
        Self {
            before: text,
            after: None,
        }
    }

    fn with_actual(before: String, after: impl Into<String>) -> Self {
        Self {
            before,
            after: Some(after.into()),
        }
    }

    /// Whether the message includes the observed value.
    pub fn takes_actual(&self) -> bool {
        self.after.is_some()
    }

    /// Fill in the observed value. Ignored for fixed messages.
    pub fn render(&self, actual: &dyn fmt::Display) -> String {
        match &self.after {
            Some(after) => format!("{}{}{}", self.before, actual, after),
            None => self.before.clone(),
        }
    }

    /// The template as a `format!` string with a `{}` slot.
    pub fn format_string(&self) -> String {
        match &self.after {
            Some(after) => format!(
                "{}{{}}{}",
                escape_braces(&self.before),
                escape_braces(after)
            ),
            None => escape_braces(&self.before),
        }
    }
}

fn escape_braces(s: &str) -> String {
    s.replace('{', "{{").replace('}', "}}")
}

/// One compiled check bound to a struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFragment {
    /// Struct declaring the field.
    pub struct_name: String,
    /// Field the check reads.
    pub field: String,
    /// Rule name that produced the check.
    pub rule: String,
    /// The condition.
    pub check: Check,
}

impl ValidationFragment {
    pub fn new(
        struct_name: impl Into<String>,
        field: impl Into<String>,
        rule: impl Into<String>,
        check: Check,
    ) -> Self {
        Self {
            struct_name: struct_name.into(),
            field: field.into(),
            rule: rule.into(),
            check,
        }
    }

    /// Message reported when the check fails.
    pub fn message(&self) -> MessageTemplate {
        let field = &self.field;

        match &self.check {
            Check::NotEmpty | Check::NotZero => {
                MessageTemplate::fixed(format!("field {field} is required"))
            }
            Check::Length { op, bound, .. } => MessageTemplate::with_actual(
                format!("field {field} length must be {}{bound}, got ", op.phrase()),
                "",
            ),
            Check::Value { op, bound } => MessageTemplate::with_actual(
                format!("field {field} must be {}{bound}, got ", op.phrase()),
                "",
            ),
            Check::Email => MessageTemplate::fixed(format!("field {field} is not a valid email")),
            Check::OneOf(allowed) => MessageTemplate::with_actual(
                format!("field {field} value '"),
                format!("' is not in the allowed list [{}]", allowed.join(", ")),
            ),
        }
    }
}
