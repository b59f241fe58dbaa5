//! Code emitter.
//!
//! Turns compiled structs into Rust source implementing `Validate`. The
//! output is a pure function of the input: the same structs always produce
//! the same bytes.

use crate::compiler::{CompiledRule, CompiledStruct, NoOpMarker};
use crate::fragment::{Check, Measure, ValidationFragment, EMAIL_PATTERN};

/// Name of the email helper function in emitted code.
pub const EMAIL_HELPER: &str = "__vgen_is_email_valid";

const INDENT: &str = "    ";

/// Emission settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Path of the runtime crate in emitted code.
    pub runtime_path: String,
    /// Emit the "generated by" header.
    pub header: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            runtime_path: "::vgen".to_string(),
            header: true,
        }
    }
}

/// Emits the validation artifact for one source unit.
#[derive(Debug, Clone, Default)]
pub struct CodeEmitter {
    options: EmitOptions,
}

impl CodeEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Emit the artifact for `structs`, which came from `unit_name`.
    pub fn emit(&self, unit_name: &str, structs: &[CompiledStruct]) -> String {
        let mut out = String::new();

        if self.options.header {
            out.push_str(&format!(
                "// Code generated by vgen from {}. DO NOT EDIT.\n\n",
                unit_name
            ));
        }

        self.emit_email_helper(&mut out);

        for s in structs {
            out.push('\n');
            self.emit_struct(&mut out, s);
        }

        out
    }

    fn emit_email_helper(&self, out: &mut String) {
        let regex = format!("{}::__private::Regex", self.options.runtime_path);

        out.push_str("#[allow(dead_code)]\n");
        out.push_str(&format!("fn {}(value: &str) -> bool {{\n", EMAIL_HELPER));
        out.push_str(&format!(
            "{INDENT}static PATTERN: ::std::sync::LazyLock<{regex}> = \
             ::std::sync::LazyLock::new(|| {{\n"
        ));
        out.push_str(&format!(
            "{INDENT}{INDENT}{regex}::new({:?}).expect(\"email pattern compiles\")\n",
            EMAIL_PATTERN
        ));
        out.push_str(&format!("{INDENT}}});\n"));
        out.push_str(&format!("{INDENT}PATTERN.is_match(value)\n"));
        out.push_str("}\n");
    }

    fn emit_struct(&self, out: &mut String, s: &CompiledStruct) {
        let rt = &self.options.runtime_path;
        let where_clause = if s.generics.where_clause.is_empty() {
            String::new()
        } else {
            format!(" {}", s.generics.where_clause)
        };

        out.push_str("#[automatically_derived]\n");
        out.push_str(&format!(
            "impl{} {}::Validate for {}{}{} {{\n",
            s.generics.params, rt, s.name, s.generics.args, where_clause
        ));
        out.push_str(&format!("{INDENT}#[allow(unused_mut, clippy::all)]\n"));
        out.push_str(&format!(
            "{INDENT}fn validate(&self) -> ::core::result::Result<(), {rt}::ValidationErrors> {{\n"
        ));
        out.push_str(&format!(
            "{INDENT}{INDENT}let mut errs = {rt}::ValidationErrors::new();\n"
        ));

        for field in &s.fields {
            for rule in &field.rules {
                match rule {
                    CompiledRule::Check(fragment) => self.emit_check(out, fragment),
                    CompiledRule::NoOp(marker) => emit_no_op(out, marker),
                }
            }
        }

        out.push_str(&format!("{INDENT}{INDENT}errs.into_result()\n"));
        out.push_str(&format!("{INDENT}}}\n"));
        out.push_str("}\n");
    }

    fn emit_check(&self, out: &mut String, fragment: &ValidationFragment) {
        let indent = INDENT.repeat(2);
        let access = format!("self.{}", fragment.field);

        match &fragment.check {
            Check::NotEmpty => {
                let push = self.push_error(fragment, None);
                push_block(out, &indent, &format!("{access}.is_empty()"), &push);
            }
            Check::NotZero => {
                let push = self.push_error(fragment, None);
                push_block(out, &indent, &format!("{access} == 0"), &push);
            }
            Check::Length { measure, op, bound } => {
                let measured = match measure {
                    Measure::Chars => format!("{access}.chars().count()"),
                    Measure::Items => format!("{access}.len()"),
                };
                let condition = if *bound < 0 {
                    format!("(len as i128) {} {}", op.failing_operator(), bound)
                } else {
                    format!("len {} {}", op.failing_operator(), bound)
                };
                let push = self.push_error(fragment, Some("len"));

                out.push_str(&format!("{indent}{{\n"));
                out.push_str(&format!("{indent}{INDENT}let len = {measured};\n"));
                push_block(out, &format!("{indent}{INDENT}"), &condition, &push);
                out.push_str(&format!("{indent}}}\n"));
            }
            Check::Value { op, bound } => {
                let condition = format!(
                    "<i128 as ::core::convert::TryFrom<_>>::try_from({access})\
                     .map_or({}, |value| value {} {})",
                    op.fails_above_i128(),
                    op.failing_operator(),
                    bound
                );
                let push = self.push_error(fragment, Some(access.as_str()));
                push_block(out, &indent, &condition, &push);
            }
            Check::Email => {
                let push = self.push_error(fragment, None);
                push_block(out, &indent, &format!("!{EMAIL_HELPER}(&{access})"), &push);
            }
            Check::OneOf(allowed) => {
                let list = allowed
                    .iter()
                    .map(|v| format!("{v:?}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let push = self.push_error(fragment, Some(access.as_str()));

                out.push_str(&format!("{indent}{{\n"));
                out.push_str(&format!("{indent}{INDENT}const ALLOWED: &[&str] = &[{list}];\n"));
                push_block(
                    out,
                    &format!("{indent}{INDENT}"),
                    &format!("!ALLOWED.iter().any(|allowed| *allowed == {access})"),
                    &push,
                );
                out.push_str(&format!("{indent}}}\n"));
            }
        }
    }

    /// The `errs.push(...)` statement for a failing fragment.
    fn push_error(&self, fragment: &ValidationFragment, actual: Option<&str>) -> String {
        let rt = &self.options.runtime_path;
        let template = fragment.message();

        let message = match (actual, template.takes_actual()) {
            (Some(actual), true) => {
                format!("::std::format!({:?}, {})", template.format_string(), actual)
            }
            _ => format!("{:?}", template.render(&"")),
        };

        format!(
            "errs.push({rt}::ValidationError::new({:?}, {:?}, {:?}, {}));",
            fragment.struct_name, fragment.field, fragment.rule, message
        )
    }
}

fn push_block(out: &mut String, indent: &str, condition: &str, body: &str) {
    out.push_str(&format!("{indent}if {condition} {{\n"));
    out.push_str(&format!("{indent}{INDENT}{body}\n"));
    out.push_str(&format!("{indent}}}\n"));
}

fn emit_no_op(out: &mut String, marker: &NoOpMarker) {
    out.push_str(&format!(
        "{INDENT}{INDENT}// vgen: `{}` is not enforced for field `{}` ({})\n",
        marker.rule, marker.field, marker.ty
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompiledField;
    use crate::descriptor::{ImplGenerics, SemanticType};
    use crate::fragment::Comparison;

    fn single(field: &str, ty: SemanticType, rule: &str, check: Check) -> CompiledStruct {
        CompiledStruct {
            name: "S".to_string(),
            generics: ImplGenerics::default(),
            fields: vec![CompiledField {
                name: field.to_string(),
                ty,
                rules: vec![CompiledRule::Check(ValidationFragment::new(
                    "S", field, rule, check,
                ))],
            }],
        }
    }

    #[test]
    fn test_header_names_unit() {
        let out = CodeEmitter::default().emit("user.rs", &[]);
        assert!(out.starts_with("// Code generated by vgen from user.rs. DO NOT EDIT.\n"));
    }

    #[test]
    fn test_header_can_be_disabled() {
        let emitter = CodeEmitter::new(EmitOptions {
            header: false,
            ..EmitOptions::default()
        });
        let out = emitter.emit("user.rs", &[]);
        assert!(out.starts_with("#[allow(dead_code)]"));
    }

    #[test]
    fn test_email_helper_uses_pattern() {
        let out = CodeEmitter::default().emit("user.rs", &[]);
        assert!(out.contains(&format!("{:?}", EMAIL_PATTERN)));
        assert!(out.contains("::vgen::__private::Regex::new("));
    }

    #[test]
    fn test_runtime_path() {
        let emitter = CodeEmitter::new(EmitOptions {
            runtime_path: "crate::rt".to_string(),
            header: true,
        });
        let s = single("name", SemanticType::String, "required", Check::NotEmpty);
        let out = emitter.emit("s.rs", &[s]);

        assert!(out.contains("impl crate::rt::Validate for S {"));
        assert!(out.contains(
            "crate::rt::ValidationError::new(\"S\", \"name\", \"required\", \"field name is required\")"
        ));
    }

    #[test]
    fn test_value_check_widens_without_wrapping() {
        let max = single(
            "age",
            SemanticType::Integer,
            "max",
            Check::Value {
                op: Comparison::AtMost,
                bound: 150,
            },
        );
        let out = CodeEmitter::default().emit("s.rs", &[max]);

        assert!(out.contains(
            "if <i128 as ::core::convert::TryFrom<_>>::try_from(self.age)\
             .map_or(true, |value| value > 150) {"
        ));
        assert!(!out.contains("as i128"));
        assert!(out.contains(
            "::std::format!(\"field age must be at most 150, got {}\", self.age)"
        ));

        let min = single(
            "age",
            SemanticType::Integer,
            "min",
            Check::Value {
                op: Comparison::AtLeast,
                bound: 0,
            },
        );
        let out = CodeEmitter::default().emit("s.rs", &[min]);

        assert!(out.contains(".map_or(false, |value| value < 0) {"));
    }

    #[test]
    fn test_negative_length_bound_casts() {
        let s = single(
            "name",
            SemanticType::String,
            "min",
            Check::Length {
                measure: Measure::Chars,
                op: Comparison::AtLeast,
                bound: -1,
            },
        );
        let out = CodeEmitter::default().emit("s.rs", &[s]);

        assert!(out.contains("if (len as i128) < -1 {"));
    }

    #[test]
    fn test_sequence_length_uses_len() {
        let s = single(
            "tags",
            SemanticType::Sequence(Box::new(SemanticType::String)),
            "len",
            Check::Length {
                measure: Measure::Items,
                op: Comparison::Exactly,
                bound: 2,
            },
        );
        let out = CodeEmitter::default().emit("s.rs", &[s]);

        assert!(out.contains("let len = self.tags.len();"));
        assert!(out.contains("if len != 2 {"));
    }

    #[test]
    fn test_no_op_is_a_comment() {
        let s = CompiledStruct {
            name: "S".to_string(),
            generics: ImplGenerics::default(),
            fields: vec![CompiledField {
                name: "tags".to_string(),
                ty: SemanticType::Sequence(Box::new(SemanticType::String)),
                rules: vec![CompiledRule::NoOp(NoOpMarker {
                    field: "tags".to_string(),
                    rule: "required".to_string(),
                    ty: SemanticType::Sequence(Box::new(SemanticType::String)),
                })],
            }],
        };
        let out = CodeEmitter::default().emit("s.rs", &[s]);

        assert!(out.contains(
            "// vgen: `required` is not enforced for field `tags` (sequence of string)"
        ));
        assert!(!out.contains("errs.push"));
    }

    #[test]
    fn test_generic_impl_header() {
        let mut s = single("name", SemanticType::String, "required", Check::NotEmpty);
        s.generics = ImplGenerics {
            params: "<'a, T>".to_string(),
            args: "<'a, T>".to_string(),
            where_clause: "where T: Clone".to_string(),
        };
        let out = CodeEmitter::default().emit("s.rs", &[s]);

        assert!(out.contains("impl<'a, T> ::vgen::Validate for S<'a, T> where T: Clone {"));
    }
}
