//! # vgen-macros
//!
//! `#[derive(Vgen)]` registers the `vgen` field attribute and checks every
//! annotation while the crate compiles. It expands to nothing: the
//! `Validate` impl comes from the file written by the `vgen` command.
//!
//! A bad annotation is reported on the field that carries it:
//!
//! ```rust,ignore
//! #[derive(Vgen)]
//! struct User {
//!     #[vgen("len=5")]
//!     age: u32, // error: rule 'len' on field User.age: not applicable to type integer
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Field, Fields};
use vgen_core::source::{classify_type, field_tag};
use vgen_core::{parse_tag, FieldDescriptor, RuleCompiler};

/// Check `#[vgen("...")]` annotations at compile time.
///
/// # Example
///
/// ```rust,ignore
/// use vgen::Vgen;
///
/// #[derive(Vgen)]
/// struct User {
///     #[vgen("required,min=2,max=50")]
///     name: String,
/// }
/// ```
#[proc_macro_derive(Vgen, attributes(vgen))]
pub fn derive_vgen(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named,
            Fields::Unit => return Ok(quote! {}),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Vgen annotations require named fields",
                ))
            }
        },
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Vgen cannot be derived for enums",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Vgen cannot be derived for unions",
            ))
        }
    };

    let struct_name = input.ident.to_string();
    let mut errors: Option<syn::Error> = None;

    for field in &fields.named {
        if let Err(err) = check_field(&struct_name, field) {
            match errors.as_mut() {
                Some(existing) => existing.combine(err),
                None => errors = Some(err),
            }
        }
    }

    match errors {
        Some(err) => Err(err),
        None => Ok(quote! {}),
    }
}

/// Parse and compile one field's annotation.
fn check_field(struct_name: &str, field: &Field) -> syn::Result<()> {
    let Some(tag) = field_tag(&field.attrs)? else {
        return Ok(());
    };
    let Some(ident) = &field.ident else {
        return Ok(());
    };

    let rules = parse_tag(&tag).map_err(|e| {
        syn::Error::new(
            field.span(),
            format!("error parsing tag for field {}.{}: {}", struct_name, ident, e),
        )
    })?;

    let descriptor = FieldDescriptor::new(ident.to_string(), classify_type(&field.ty), rules);

    RuleCompiler::new()
        .compile_field(struct_name, &descriptor)
        .map(|_| ())
        .map_err(|errors| {
            let mut combined: Option<syn::Error> = None;
            for err in errors {
                let err = syn::Error::new(field.span(), err.to_string());
                match combined.as_mut() {
                    Some(existing) => existing.combine(err),
                    None => combined = Some(err),
                }
            }
            combined.unwrap_or_else(|| syn::Error::new(field.span(), "invalid vgen annotation"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(input: TokenStream2) -> syn::Result<TokenStream2> {
        let input: DeriveInput = syn::parse2(input).unwrap();
        expand(&input)
    }

    fn messages(err: syn::Error) -> Vec<String> {
        err.into_iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_valid_struct_expands_to_nothing() {
        let out = expand_str(quote! {
            struct User {
                #[vgen("required,min=2,max=50")]
                name: String,
                #[vgen("required,min=0,max=150")]
                age: u32,
                #[vgen("in=active,pending,disabled")]
                status: String,
                nickname: Option<String>,
            }
        })
        .unwrap();

        assert!(out.is_empty());
    }

    #[test]
    fn test_no_op_combinations_are_accepted() {
        let out = expand_str(quote! {
            struct Tagged {
                #[vgen("required,min=1")]
                tags: Vec<String>,
                #[vgen("in=1,2")]
                level: u8,
            }
        });

        assert!(out.is_ok());
    }

    #[test]
    fn test_inapplicable_rule_is_error() {
        let err = expand_str(quote! {
            struct User {
                #[vgen("len=5")]
                age: u32,
            }
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "rule 'len' on field User.age: not applicable to type integer"
        );
    }

    #[test]
    fn test_errors_from_all_fields_are_reported() {
        let err = expand_str(quote! {
            struct User {
                #[vgen("email")]
                age: u32,
                #[vgen("required,uuid")]
                id: String,
            }
        })
        .unwrap_err();

        assert_eq!(
            messages(err),
            vec![
                "rule 'email' on field User.age: not applicable to type integer",
                "rule 'uuid' on field User.id: unknown rule",
            ]
        );
    }

    #[test]
    fn test_tag_syntax_error() {
        let err = expand_str(quote! {
            struct User {
                #[vgen("required,=5")]
                name: String,
            }
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "error parsing tag for field User.name: invalid tag part: '=5'"
        );
    }

    #[test]
    fn test_enum_is_rejected() {
        let err = expand_str(quote! {
            enum Status { Active }
        })
        .unwrap_err();

        assert!(err.to_string().contains("enums"));
    }

    #[test]
    fn test_tuple_struct_is_rejected() {
        assert!(expand_str(quote! { struct Id(String); }).is_err());
    }
}
