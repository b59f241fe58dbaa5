//! Rule compiler.
//!
//! Maps each (rule, field type) pair to a [`ValidationFragment`], a no-op
//! marker, or a [`RuleCompileError`]:
//!
//! | Rule | string | integer | sequence | other |
//! |---|---|---|---|---|
//! | `required` | not empty | not zero | no-op | no-op |
//! | `min=N` | length >= N | value >= N | no-op | no-op |
//! | `max=N` | length <= N | value <= N | no-op | no-op |
//! | `len=N` | length == N | error | length == N | error |
//! | `email` | pattern | error | error | error |
//! | `in=a,b` | one of | no-op | error | error |
//!
//! Unknown rule names are always an error. Bounds are parsed only where a
//! check is produced, so a no-op never looks at its value.

use tracing::{debug, trace};

use crate::descriptor::{FieldDescriptor, ImplGenerics, SemanticType, StructDescriptor};
use crate::error::{CompileFailure, RuleCompileError};
use crate::fragment::{Check, Comparison, Measure, ValidationFragment};
use crate::tag::{is_known_rule, Rule};

/// A rule that is accepted but not enforced for the field's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoOpMarker {
    /// Field carrying the rule.
    pub field: String,
    /// Rule name.
    pub rule: String,
    /// Type the rule does not apply to.
    pub ty: SemanticType,
}

/// Result of compiling one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledRule {
    Check(ValidationFragment),
    NoOp(NoOpMarker),
}

/// A field with its compiled rules, in tag order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub name: String,
    pub ty: SemanticType,
    pub rules: Vec<CompiledRule>,
}

/// A struct ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStruct {
    pub name: String,
    pub generics: ImplGenerics,
    pub fields: Vec<CompiledField>,
}

impl CompiledStruct {
    /// Iterate over the checks of every field, in order.
    pub fn checks(&self) -> impl Iterator<Item = &ValidationFragment> {
        self.fields.iter().flat_map(|f| {
            f.rules.iter().filter_map(|r| match r {
                CompiledRule::Check(fragment) => Some(fragment),
                CompiledRule::NoOp(_) => None,
            })
        })
    }
}

/// Stateless compiler from rules to fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleCompiler;

impl RuleCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile every field of a struct, collecting every failure.
    ///
    /// Failures are returned in field order, then rule order.
    pub fn compile_struct(
        &self,
        descriptor: &StructDescriptor,
    ) -> Result<CompiledStruct, Vec<RuleCompileError>> {
        debug!(name = %descriptor.name, fields = descriptor.fields.len(), "compiling struct");

        let mut fields = Vec::with_capacity(descriptor.fields.len());
        let mut errors = Vec::new();

        for field in &descriptor.fields {
            match self.compile_field(&descriptor.name, field) {
                Ok(compiled) => fields.push(compiled),
                Err(mut field_errors) => errors.append(&mut field_errors),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CompiledStruct {
            name: descriptor.name.clone(),
            generics: descriptor.generics.clone(),
            fields,
        })
    }

    /// Compile every rule of a field.
    pub fn compile_field(
        &self,
        struct_name: &str,
        field: &FieldDescriptor,
    ) -> Result<CompiledField, Vec<RuleCompileError>> {
        debug!(struct_name, field = %field.name, ty = %field.ty, "compiling field");

        let mut rules = Vec::with_capacity(field.rules.len());
        let mut errors = Vec::new();

        for rule in &field.rules {
            match self.compile_rule(struct_name, field, rule) {
                Ok(compiled) => rules.push(compiled),
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CompiledField {
            name: field.name.clone(),
            ty: field.ty.clone(),
            rules,
        })
    }

    /// Compile one rule for a field.
    pub fn compile_rule(
        &self,
        struct_name: &str,
        field: &FieldDescriptor,
        rule: &Rule,
    ) -> Result<CompiledRule, RuleCompileError> {
        trace!(struct_name, field = %field.name, rule = %rule, "compiling rule");

        let fail = |reason: CompileFailure| {
            RuleCompileError::new(struct_name, &field.name, rule.name(), reason)
        };
        let check = |check: Check| {
            CompiledRule::Check(ValidationFragment::new(
                struct_name,
                &field.name,
                rule.name(),
                check,
            ))
        };
        let no_op = || {
            trace!(
                struct_name,
                field = %field.name,
                rule = rule.name(),
                "rule not enforced for type"
            );
            CompiledRule::NoOp(NoOpMarker {
                field: field.name.clone(),
                rule: rule.name().to_string(),
                ty: field.ty.clone(),
            })
        };
        let not_applicable = || {
            fail(CompileFailure::NotApplicable {
                ty: field.ty.to_string(),
            })
        };

        if !is_known_rule(rule.name()) {
            return Err(fail(CompileFailure::UnknownRule));
        }

        let compiled = match (rule.name(), &field.ty) {
            ("required", SemanticType::String) => check(Check::NotEmpty),
            ("required", SemanticType::Integer) => check(Check::NotZero),
            ("required", _) => no_op(),

            ("min" | "max", SemanticType::String | SemanticType::Integer) => {
                let op = if rule.name() == "min" {
                    Comparison::AtLeast
                } else {
                    Comparison::AtMost
                };
                let bound = rule.as_int().map_err(|e| fail(e.into()))?;

                if field.ty == SemanticType::String {
                    check(Check::Length {
                        measure: Measure::Chars,
                        op,
                        bound,
                    })
                } else {
                    check(Check::Value { op, bound })
                }
            }
            ("min" | "max", _) => no_op(),

            ("len", SemanticType::String | SemanticType::Sequence(_)) => {
                let bound = rule.as_int().map_err(|e| fail(e.into()))?;
                let measure = if field.ty == SemanticType::String {
                    Measure::Chars
                } else {
                    Measure::Items
                };
                check(Check::Length {
                    measure,
                    op: Comparison::Exactly,
                    bound,
                })
            }
            ("len", _) => return Err(not_applicable()),

            ("email", SemanticType::String) => check(Check::Email),
            ("email", _) => return Err(not_applicable()),

            ("in", SemanticType::String) => {
                let allowed = rule.as_list().map_err(|e| fail(e.into()))?;
                if allowed.is_empty() {
                    return Err(fail(CompileFailure::EmptyList));
                }
                check(Check::OneOf(allowed))
            }
            ("in", SemanticType::Integer) => no_op(),
            ("in", _) => return Err(not_applicable()),

            _ => return Err(fail(CompileFailure::UnknownRule)),
        };

        Ok(compiled)
    }
}
