//! Struct and field descriptors consumed by the compiler.
//!
//! A [`StructDescriptorProvider`] hands over raw declarations (field name,
//! semantic type, tag string). [`StructDescriptor::from_declaration`] parses
//! each tag, producing the descriptors the [`RuleCompiler`] works on.
//!
//! [`RuleCompiler`]: crate::compiler::RuleCompiler

use std::fmt;

use crate::error::{GenerateError, SourceError};
use crate::tag::{parse_tag, Rule};

/// What the compiler knows about a field's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticType {
    /// `String`, `str`, `&str`.
    String,
    /// Any built-in integer type.
    Integer,
    /// `Vec<T>`, `[T; N]`, `&[T]`.
    Sequence(Box<SemanticType>),
    /// Everything else, with the type as written.
    Unsupported(String),
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::String => f.write_str("string"),
            SemanticType::Integer => f.write_str("integer"),
            SemanticType::Sequence(inner) => write!(f, "sequence of {}", inner),
            SemanticType::Unsupported(name) => f.write_str(name),
        }
    }
}

/// Generic parameters of a struct, pre-rendered for an `impl` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImplGenerics {
    /// `<'a, T: Clone>` or empty.
    pub params: String,
    /// `<'a, T>` or empty.
    pub args: String,
    /// `where T: Default` or empty.
    pub where_clause: String,
}

/// A field as reported by a provider, tag not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// Field name.
    pub name: String,
    /// Semantic type.
    pub ty: SemanticType,
    /// Raw annotation string.
    pub tag: String,
    /// 1-indexed source line, 0 when unknown.
    pub line: usize,
}

/// A struct as reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDeclaration {
    /// Struct name.
    pub name: String,
    /// Generic parameters.
    pub generics: ImplGenerics,
    /// Annotated fields in declaration order.
    pub fields: Vec<FieldDeclaration>,
}

/// A field with its parsed rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Semantic type.
    pub ty: SemanticType,
    /// Rules in tag order.
    pub rules: Vec<Rule>,
}

/// A struct with parsed field descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDescriptor {
    /// Struct name.
    pub name: String,
    /// Generic parameters.
    pub generics: ImplGenerics,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl FieldDescriptor {
    /// Create a descriptor from already-parsed rules.
    pub fn new(name: impl Into<String>, ty: SemanticType, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            ty,
            rules,
        }
    }
}

impl StructDescriptor {
    /// Parse every field tag of a declaration.
    pub fn from_declaration(decl: &StructDeclaration) -> Result<Self, GenerateError> {
        let fields = decl
            .fields
            .iter()
            .map(|field| {
                let rules = parse_tag(&field.tag).map_err(|source| GenerateError::Tag {
                    struct_name: decl.name.clone(),
                    field: field.name.clone(),
                    source,
                })?;
                Ok(FieldDescriptor::new(field.name.clone(), field.ty.clone(), rules))
            })
            .collect::<Result<Vec<_>, GenerateError>>()?;

        Ok(Self {
            name: decl.name.clone(),
            generics: decl.generics.clone(),
            fields,
        })
    }
}

/// Source of struct declarations for one source unit.
///
/// Declarations must come back in source order; the order of emitted checks
/// follows it.
pub trait StructDescriptorProvider {
    /// Identity of the source unit (a file name), used in the artifact header.
    fn unit_name(&self) -> &str;

    /// All struct declarations of the unit, in order.
    fn declarations(&self) -> Result<Vec<StructDeclaration>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(tag: &str) -> StructDeclaration {
        StructDeclaration {
            name: "User".to_string(),
            generics: ImplGenerics::default(),
            fields: vec![FieldDeclaration {
                name: "name".to_string(),
                ty: SemanticType::String,
                tag: tag.to_string(),
                line: 3,
            }],
        }
    }

    #[test]
    fn test_semantic_type_display() {
        assert_eq!(SemanticType::String.to_string(), "string");
        assert_eq!(
            SemanticType::Sequence(Box::new(SemanticType::Integer)).to_string(),
            "sequence of integer"
        );
        assert_eq!(
            SemanticType::Unsupported("Option<String>".to_string()).to_string(),
            "Option<String>"
        );
    }

    #[test]
    fn test_from_declaration_parses_tags() {
        let descriptor =
            StructDescriptor::from_declaration(&declaration("required,min=2")).unwrap();

        assert_eq!(descriptor.name, "User");
        assert_eq!(
            descriptor.fields[0].rules,
            vec![Rule::flag("required"), Rule::new("min", "2")]
        );
    }

    #[test]
    fn test_from_declaration_reports_field() {
        let err = StructDescriptor::from_declaration(&declaration("=2")).unwrap_err();

        match err {
            GenerateError::Tag {
                struct_name, field, ..
            } => {
                assert_eq!(struct_name, "User");
                assert_eq!(field, "name");
            }
            other => panic!("expected tag error, got {other:?}"),
        }
    }
}
