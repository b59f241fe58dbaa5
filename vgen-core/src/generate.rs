//! One generation run: provider in, artifact text out.

use tracing::{debug, info};

use crate::compiler::{CompiledStruct, RuleCompiler};
use crate::descriptor::{StructDescriptor, StructDescriptorProvider};
use crate::emitter::{CodeEmitter, EmitOptions};
use crate::error::{GenerateError, RuleCompileError};

/// Output of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Artifact source text.
    pub content: String,
    /// Names of the structs that received a validator, in order.
    pub structs: Vec<String>,
}

impl Generated {
    /// Whether any struct was annotated.
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}

/// Runs parser, compiler and emitter over one source unit.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    compiler: RuleCompiler,
    emitter: CodeEmitter,
}

impl Generator {
    pub fn new(options: EmitOptions) -> Self {
        Self {
            compiler: RuleCompiler::new(),
            emitter: CodeEmitter::new(options),
        }
    }

    /// Compile every annotated struct of `provider` and emit the artifact.
    ///
    /// Nothing is emitted unless every struct compiles. Structs without
    /// annotated fields are skipped.
    pub fn generate<P>(&self, provider: &P) -> Result<Generated, GenerateError>
    where
        P: StructDescriptorProvider + ?Sized,
    {
        let unit = provider.unit_name();
        let declarations = provider.declarations()?;
        debug!(unit, structs = declarations.len(), "read declarations");

        let compiled = self.compile_all(
            declarations
                .iter()
                .filter(|decl| !decl.fields.is_empty())
                .map(StructDescriptor::from_declaration)
                .collect::<Result<Vec<_>, _>>()?,
        )?;

        let content = self.emitter.emit(unit, &compiled);
        let structs: Vec<String> = compiled.into_iter().map(|s| s.name).collect();
        info!(unit, structs = structs.len(), "generated validators");

        Ok(Generated { content, structs })
    }

    fn compile_all(
        &self,
        descriptors: Vec<StructDescriptor>,
    ) -> Result<Vec<CompiledStruct>, GenerateError> {
        let mut compiled = Vec::with_capacity(descriptors.len());
        let mut errors: Vec<RuleCompileError> = Vec::new();

        for descriptor in &descriptors {
            match self.compiler.compile_struct(descriptor) {
                Ok(s) => compiled.push(s),
                Err(mut e) => errors.append(&mut e),
            }
        }

        match errors.len() {
            0 => Ok(compiled),
            1 => Err(errors.remove(0).into()),
            _ => Err(GenerateError::Multiple(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RustSource;

    fn generate(code: &str) -> Result<Generated, GenerateError> {
        let source = RustSource::parse("test.rs", code)?;
        Generator::default().generate(&source)
    }

    #[test]
    fn test_skips_unannotated_structs() {
        let out = generate(
            r#"
            struct Plain { a: String }
            struct User {
                #[vgen("required")]
                name: String,
            }
            "#,
        )
        .unwrap();

        assert_eq!(out.structs, vec!["User"]);
        assert!(!out.content.contains("for Plain"));
    }

    #[test]
    fn test_no_annotations_is_empty() {
        let out = generate("struct Plain { a: String }").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_error_is_unwrapped() {
        let err = generate(
            r#"
            struct S {
                #[vgen("len=5")]
                age: u32,
            }
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::Compile(ref e) if e.field == "age"));
    }

    #[test]
    fn test_all_errors_reported() {
        let err = generate(
            r#"
            struct A {
                #[vgen("email")]
                age: u32,
            }
            struct B {
                #[vgen("frobnicate")]
                name: String,
            }
            "#,
        )
        .unwrap_err();

        match err {
            GenerateError::Multiple(errors) => {
                let names: Vec<_> = errors.iter().map(|e| e.struct_name.as_str()).collect();
                assert_eq!(names, vec!["A", "B"]);
            }
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn test_tag_error() {
        let err = generate(
            r#"
            struct S {
                #[vgen("required,=3")]
                name: String,
            }
            "#,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "error parsing tag for field S.name: invalid tag part: '=3'"
        );
    }
}
