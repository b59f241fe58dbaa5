//! Rust source provider.
//!
//! Reads struct declarations out of a Rust file with `syn`. A field takes
//! part in generation when it carries a `#[vgen("...")]` attribute with a
//! non-empty tag; structs are reported in file order.

use std::path::Path;

use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{
    Attribute, Field, FieldsNamed, GenericArgument, Generics, Item, LitStr, PathArguments, Type,
};
use tracing::{debug, warn};

use crate::descriptor::{
    FieldDeclaration, ImplGenerics, SemanticType, StructDeclaration, StructDescriptorProvider,
};
use crate::error::SourceError;

/// Attribute name that carries a tag.
pub const TAG_ATTRIBUTE: &str = "vgen";

const INTEGER_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

/// A parsed Rust source unit.
#[derive(Debug, Clone)]
pub struct RustSource {
    unit_name: String,
    file: syn::File,
}

impl RustSource {
    /// Parse source text. `unit_name` identifies the unit in diagnostics and
    /// in the generated header.
    pub fn parse(unit_name: impl Into<String>, content: &str) -> Result<Self, SourceError> {
        let unit_name = unit_name.into();
        let file = syn::parse_file(content).map_err(|e| {
            let start = e.span().start();
            SourceError::syntax(unit_name.clone(), start.line, start.column + 1, e.to_string())
        })?;

        Ok(Self { unit_name, file })
    }

    /// Read and parse a file. The unit name is the file name.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let unit_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            unit: path.display().to_string(),
            source,
        })?;

        Self::parse(unit_name, &content)
    }
}

impl StructDescriptorProvider for RustSource {
    fn unit_name(&self) -> &str {
        &self.unit_name
    }

    fn declarations(&self) -> Result<Vec<StructDeclaration>, SourceError> {
        let mut structs = Vec::new();

        for item in &self.file.items {
            let Item::Struct(item_struct) = item else {
                continue;
            };

            let syn::Fields::Named(fields) = &item_struct.fields else {
                debug!(name = %item_struct.ident, "skipping struct without named fields");
                continue;
            };

            let decl = declare_struct(&item_struct.ident, &item_struct.generics, fields)?;
            structs.push(decl);
        }

        Ok(structs)
    }
}

/// Build a declaration from the pieces of a named-field struct.
pub fn declare_struct(
    ident: &syn::Ident,
    generics: &Generics,
    fields: &FieldsNamed,
) -> Result<StructDeclaration, SourceError> {
    let name = ident.to_string();
    let mut declared = Vec::new();

    for field in &fields.named {
        if let Some(decl) = declare_field(&name, field)? {
            declared.push(decl);
        }
    }

    Ok(StructDeclaration {
        name,
        generics: impl_generics(generics),
        fields: declared,
    })
}

/// Build a field declaration, or `None` if the field is not annotated.
pub fn declare_field(
    struct_name: &str,
    field: &Field,
) -> Result<Option<FieldDeclaration>, SourceError> {
    let Some(ident) = &field.ident else {
        return Ok(None);
    };
    let name = ident.to_string();
    let line = ident.span().start().line;

    let Some(tag) = field_tag(field.attrs.as_slice())
        .map_err(|e| SourceError::attribute(struct_name, &name, line, e.to_string()))?
    else {
        return Ok(None);
    };

    if tag.trim().is_empty() {
        warn!(struct_name, field = %name, "ignoring empty vgen tag");
        return Ok(None);
    }

    Ok(Some(FieldDeclaration {
        name,
        ty: classify_type(&field.ty),
        tag,
        line,
    }))
}

/// Extract the tag string from a field's attributes.
///
/// Accepts exactly one `#[vgen("...")]`.
pub fn field_tag(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut found: Option<(String, &Attribute)> = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident(TAG_ATTRIBUTE)) {
        if found.is_some() {
            return Err(syn::Error::new(
                attr.span(),
                "duplicate #[vgen] attribute; put all rules in one tag",
            ));
        }

        let lit: LitStr = attr.parse_args().map_err(|_| {
            syn::Error::new(
                attr.span(),
                "expected a rule string, e.g. #[vgen(\"required,min=2\")]",
            )
        })?;
        found = Some((lit.value(), attr));
    }

    Ok(found.map(|(tag, _)| tag))
}

/// Map a Rust type to the compiler's semantic type.
///
/// Only `&str` and slices are looked through. Any other reference is
/// unsupported, since generated checks read the field by value.
pub fn classify_type(ty: &Type) -> SemanticType {
    match ty {
        Type::Reference(r) => match r.elem.as_ref() {
            Type::Slice(_) => classify_type(&r.elem),
            Type::Path(p) if p.qself.is_none() && p.path.is_ident("str") => SemanticType::String,
            _ => unsupported(ty),
        },
        Type::Paren(p) => classify_type(&p.elem),
        Type::Group(g) => classify_type(&g.elem),
        Type::Slice(s) => SemanticType::Sequence(Box::new(classify_type(&s.elem))),
        Type::Array(a) => SemanticType::Sequence(Box::new(classify_type(&a.elem))),
        Type::Path(type_path) if type_path.qself.is_none() => {
            let Some(segment) = type_path.path.segments.last() else {
                return unsupported(ty);
            };
            let ident = segment.ident.to_string();

            match (&segment.arguments, ident.as_str()) {
                (PathArguments::None, "String" | "str") => SemanticType::String,
                (PathArguments::None, name) if INTEGER_TYPES.contains(&name) => {
                    SemanticType::Integer
                }
                (PathArguments::AngleBracketed(args), "Vec") => match args.args.first() {
                    Some(GenericArgument::Type(inner)) => {
                        SemanticType::Sequence(Box::new(classify_type(inner)))
                    }
                    _ => unsupported(ty),
                },
                _ => unsupported(ty),
            }
        }
        _ => unsupported(ty),
    }
}

fn unsupported(ty: &Type) -> SemanticType {
    SemanticType::Unsupported(type_text(ty))
}

/// Render a type compactly for diagnostics, e.g. `Option<String>` rather
/// than `Option < String >`.
pub fn type_text(ty: &Type) -> String {
    compact(&ty.to_token_stream().to_string())
}

/// Generics for the impl header, printed by `proc-macro2` so the text
/// always re-parses.
fn impl_generics(generics: &Generics) -> ImplGenerics {
    if generics.params.is_empty() && generics.where_clause.is_none() {
        return ImplGenerics::default();
    }

    let (params, args, where_clause) = generics.split_for_impl();
    ImplGenerics {
        params: params.to_token_stream().to_string(),
        args: args.to_token_stream().to_string(),
        where_clause: where_clause.to_token_stream().to_string(),
    }
}

fn compact(tokens: &str) -> String {
    let mut out = String::with_capacity(tokens.len());
    let chars: Vec<char> = tokens.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let prev = if i > 0 { chars[i - 1] } else { ' ' };
            let next = chars.get(i + 1).copied().unwrap_or(' ');
            let glue_left = matches!(prev, '<' | '&' | '(' | '[' | ':');
            let glue_right = matches!(next, '<' | '>' | ',' | ')' | ']' | ':' | ';');
            if glue_left || glue_right {
                continue;
            }
        }
        out.push(c);
    }

    out
}
