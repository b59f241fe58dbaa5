//! Error types for annotation parsing, rule compilation and source reading.
//!
//! Every error here is a generation-time error: it means the annotated
//! source is wrong, and the run stops before anything is written.

use thiserror::Error;

/// A tag segment has a value but no rule name (e.g. `=5`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tag part: '{segment}'")]
pub struct TagSyntaxError {
    /// The offending segment, trimmed.
    pub segment: String,
}

/// A rule value could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The rule needs a value but has none.
    #[error("rule {rule} has no value")]
    Missing { rule: String },

    /// The value is not a base-10 integer literal.
    #[error("rule {rule}: invalid integer value '{value}'")]
    NotAnInteger { rule: String, value: String },

    /// A list value was requested from a rule that does not take one.
    #[error("rule {rule} does not take a list of values")]
    NotAList { rule: String },
}

/// Why a rule could not be compiled for a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileFailure {
    /// The rule name is not recognized.
    #[error("unknown rule")]
    UnknownRule,

    /// The rule exists but cannot be applied to the field's type.
    #[error("not applicable to type {ty}")]
    NotApplicable { ty: String },

    /// The rule's value is malformed.
    #[error(transparent)]
    InvalidValue(#[from] ValueError),

    /// `in` was given no values.
    #[error("allowed list is empty")]
    EmptyList,
}

/// A rule/type combination that cannot be turned into a check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rule '{rule}' on field {struct_name}.{field}: {reason}")]
pub struct RuleCompileError {
    /// Struct declaring the field.
    pub struct_name: String,
    /// Field carrying the rule.
    pub field: String,
    /// Rule name as written.
    pub rule: String,
    /// What went wrong.
    pub reason: CompileFailure,
}

impl RuleCompileError {
    /// Create a compile error for a struct field.
    pub fn new(
        struct_name: impl Into<String>,
        field: impl Into<String>,
        rule: impl Into<String>,
        reason: CompileFailure,
    ) -> Self {
        Self {
            struct_name: struct_name.into(),
            field: field.into(),
            rule: rule.into(),
            reason,
        }
    }
}

/// Error reading struct declarations from a source unit.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source unit is not valid Rust.
    #[error("syntax error in {unit}:{line}:{column}: {message}")]
    Syntax {
        unit: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// A `#[vgen(...)]` attribute is malformed.
    #[error("invalid attribute on {struct_name}.{field} (line {line}): {message}")]
    Attribute {
        struct_name: String,
        field: String,
        line: usize,
        message: String,
    },

    /// The source unit could not be read.
    #[error("failed to read {unit}: {source}")]
    Io {
        unit: String,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Create a syntax error with location information.
    pub fn syntax(
        unit: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            unit: unit.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// Create an attribute error.
    pub fn attribute(
        struct_name: impl Into<String>,
        field: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Attribute {
            struct_name: struct_name.into(),
            field: field.into(),
            line,
            message: message.into(),
        }
    }
}

/// Any failure of a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A field's annotation could not be tokenized.
    #[error("error parsing tag for field {struct_name}.{field}: {source}")]
    Tag {
        struct_name: String,
        field: String,
        #[source]
        source: TagSyntaxError,
    },

    /// A rule could not be compiled.
    #[error(transparent)]
    Compile(#[from] RuleCompileError),

    /// Several rules could not be compiled; one per line.
    #[error("{}", join_lines(.0))]
    Multiple(Vec<RuleCompileError>),

    /// The source unit could not be read or parsed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl GenerateError {
    /// Rule errors carried by this error, in reporting order.
    pub fn compile_errors(&self) -> &[RuleCompileError] {
        match self {
            GenerateError::Compile(e) => std::slice::from_ref(e),
            GenerateError::Multiple(errors) => errors,
            _ => &[],
        }
    }
}

fn join_lines(errors: &[RuleCompileError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
