//! # vgen-core
//!
//! The compiler behind `vgen`: it turns field annotations such as
//! `#[vgen("required,min=2,max=50")]` into Rust source implementing
//! `vgen::Validate`.
//!
//! ## Pipeline
//!
//! ```text
//! source unit ─▶ StructDescriptorProvider ─▶ parse_tag ─▶ RuleCompiler ─▶ CodeEmitter ─▶ text
//! ```
//!
//! - [`tag`] tokenizes an annotation into ordered [`Rule`]s.
//! - [`source`] reads struct declarations from Rust code with `syn`.
//! - [`compiler`] maps each (rule, field type) pair to a check, a no-op or
//!   an error.
//! - [`emitter`] renders the checks as one `validate` routine per struct.
//! - [`generate`] ties the stages together for one source unit.
//!
//! ## Example
//!
//! ```rust
//! use vgen_core::{Generator, RustSource};
//!
//! let source = RustSource::parse(
//!     "user.rs",
//!     r#"
//!     pub struct User {
//!         #[vgen("required,min=2")]
//!         pub name: String,
//!     }
//!     "#,
//! )?;
//!
//! let generated = Generator::default().generate(&source)?;
//! assert_eq!(generated.structs, vec!["User"]);
//! assert!(generated.content.contains("impl ::vgen::Validate for User"));
//! # Ok::<(), vgen_core::GenerateError>(())
//! ```

pub mod compiler;
pub mod descriptor;
pub mod emitter;
pub mod error;
pub mod fragment;
pub mod generate;
pub mod source;
pub mod tag;

pub use compiler::{CompiledField, CompiledRule, CompiledStruct, NoOpMarker, RuleCompiler};
pub use descriptor::{
    FieldDeclaration, FieldDescriptor, ImplGenerics, SemanticType, StructDeclaration,
    StructDescriptor, StructDescriptorProvider,
};
pub use emitter::{CodeEmitter, EmitOptions};
pub use error::{
    CompileFailure, GenerateError, RuleCompileError, SourceError, TagSyntaxError, ValueError,
};
pub use fragment::{
    Check, Comparison, Measure, MessageTemplate, ValidationFragment, EMAIL_PATTERN,
};
pub use generate::{Generated, Generator};
pub use source::RustSource;
pub use tag::{format_tag, parse_tag, Rule};
