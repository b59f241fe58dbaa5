//! # vgen
//!
//! Runtime support for validators generated by the `vgen` code generator.
//!
//! Fields are annotated with a rule string in a `#[vgen("...")]` attribute.
//! The `vgen` command compiles those annotations into a companion source file
//! that implements [`Validate`] for every annotated struct:
//!
//! ```rust,ignore
//! use vgen::{Validate, Vgen};
//!
//! #[derive(Vgen)]
//! pub struct User {
//!     #[vgen("required,min=2,max=50")]
//!     pub name: String,
//!     #[vgen("required,email")]
//!     pub email: String,
//!     #[vgen("required,min=0,max=150")]
//!     pub age: u32,
//! }
//!
//! // Produced by `vgen src/user.rs`
//! include!("user_vgen.rs");
//!
//! let user = User { name: "A".into(), email: "a@b.co".into(), age: 30 };
//! let errors = user.validate().unwrap_err();
//! assert_eq!(errors.first().unwrap().field, "name");
//! ```
//!
//! ## Rules
//!
//! | Rule | `String` | integers | `Vec<T>` / arrays |
//! |------|----------|----------|-------------------|
//! | `required` | non-empty | non-zero | not enforced |
//! | `min=N` | length >= N | value >= N | not enforced |
//! | `max=N` | length <= N | value <= N | not enforced |
//! | `len=N` | length == N | rejected | length == N |
//! | `email` | matches the email pattern | rejected | rejected |
//! | `in=a,b,c` | one of the listed values | not enforced | rejected |
//!
//! "Rejected" combinations fail generation. String lengths count Unicode
//! scalar values.
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `derive` | Re-export `#[derive(Vgen)]` | ✅ |
//! | `serde` | `Serialize` for validation errors | ❌ |

pub mod error;
pub mod traits;

pub use error::{ValidationError, ValidationErrors};
pub use traits::Validate;

// Re-export derive macro when available
#[cfg(feature = "derive")]
pub use vgen_macros::Vgen;

/// Items referenced by generated code. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use regex::Regex;
}
