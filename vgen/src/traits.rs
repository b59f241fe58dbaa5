//! The [`Validate`] trait implemented by generated code.

use crate::error::ValidationErrors;

/// Types whose field annotations have been compiled into a validator.
///
/// Implementations are produced by the `vgen` generator; writing one by hand
/// is possible but unusual.
///
/// ```rust
/// use vgen::{Validate, ValidationError, ValidationErrors};
///
/// struct Port(u16);
///
/// impl Validate for Port {
///     fn validate(&self) -> Result<(), ValidationErrors> {
///         let mut errs = ValidationErrors::new();
///         if self.0 == 0 {
///             errs.push(ValidationError::new("Port", "0", "required", "field 0 is required"));
///         }
///         errs.into_result()
///     }
/// }
///
/// assert!(!Port(0).is_valid());
/// assert!(Port(8080).is_valid());
/// ```
pub trait Validate {
    /// Run every check and return all failures in declaration order.
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Returns `true` if [`validate`](Validate::validate) succeeds.
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    fn validate(&self) -> Result<(), ValidationErrors> {
        (**self).validate()
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        (**self).validate()
    }
}
