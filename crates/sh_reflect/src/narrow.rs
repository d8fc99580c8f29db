//! Checked narrowing of untyped values.
//!
//! ```
//! use sh_reflect::{Reflect, narrow};
//!
//! let value: &dyn Reflect = &12_i32;
//! assert_eq!(narrow::pars_to::<i32>(Some(value)), Ok(12));
//!
//! let err = narrow::pars_to::<u8>(Some(value)).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Unexpected type i32 of object 12. Expected type like u8",
//! );
//! ```

use core::{error, fmt};

use crate::Reflect;
use crate::access::print_value;
use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// UnexpectedTypeError

/// A value did not have any of the expected types.
///
/// The message names the runtime type and printed value of the offending
/// object, followed by the expected type names in the given order. A missing
/// object is reported as `Unexpected null object`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedTypeError {
    found: Option<&'static str>,
    target: Option<String>,
    expected: Vec<&'static str>,
}

impl UnexpectedTypeError {
    /// Creates the error for `found`, which matched none of `expected`.
    ///
    /// An empty `expected` list leaves the "Expected type like" part out of the message.
    pub fn new(
        found: Option<&dyn Reflect>,
        expected: impl IntoIterator<Item = &'static TypeInfo>,
    ) -> Self {
        let expected: Vec<&'static str> = expected.into_iter().map(TypeInfo::name).collect();
        let Some(value) = found else {
            return Self {
                found: None,
                target: None,
                expected,
            };
        };

        let info = value.reflect_type_info();
        Self {
            found: Some(info.name()),
            target: Some(print_value(value).unwrap_or_else(|| info.name().to_owned())),
            expected,
        }
    }

    /// Creates the error for `found`, which is not a `T`.
    #[inline]
    pub fn expecting<T: Typed>(found: Option<&dyn Reflect>) -> Self {
        Self::new(found, [T::type_info()])
    }

    /// The name of the offending runtime type, or `None` for a null object.
    #[inline]
    pub fn found(&self) -> Option<&'static str> {
        self.found
    }

    /// The printed offending object.
    #[inline]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// The expected type names, in order.
    #[inline]
    pub fn expected(&self) -> &[&'static str] {
        &self.expected
    }
}

impl fmt::Display for UnexpectedTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found {
            Some(found) => write!(
                f,
                "Unexpected type {found} of object {}.",
                self.target.as_deref().unwrap_or(found)
            )?,
            None => f.write_str("Unexpected null object.")?,
        }
        if self.expected.is_empty() {
            return Ok(());
        }
        write!(f, " Expected type like {}", self.expected.join(", "))
    }
}

impl error::Error for UnexpectedTypeError {}

// -----------------------------------------------------------------------------
// Narrowing

/// Narrows `value` to a `T` by downcast and clone.
///
/// Fails with [`UnexpectedTypeError`] when `value` is `None` or of another type.
pub fn pars_to<T: Typed + Reflect + Clone>(
    value: Option<&dyn Reflect>,
) -> Result<T, UnexpectedTypeError> {
    value
        .and_then(|v| v.downcast_ref::<T>())
        .cloned()
        .ok_or_else(|| UnexpectedTypeError::expecting::<T>(value))
}

/// Like [`pars_to`], without the error.
#[inline]
pub fn try_pars_to<T: Reflect + Clone>(value: Option<&dyn Reflect>) -> Option<T> {
    value?.downcast_ref::<T>().cloned()
}

/// Narrows an owned value to a `T`.
pub fn narrow<T: Typed + Reflect>(value: Box<dyn Reflect>) -> Result<T, UnexpectedTypeError> {
    value
        .take::<T>()
        .map_err(|value| UnexpectedTypeError::expecting::<T>(Some(&*value)))
}

#[cfg(test)]
mod tests {
    use super::{UnexpectedTypeError, narrow, pars_to, try_pars_to};
    use crate::Reflect;
    use crate::info::{TypeInfo, Typed};

    #[test]
    fn lists_every_expected_type_in_order() {
        let value: &dyn Reflect = &String::from("abc");
        let err = UnexpectedTypeError::new(
            Some(value),
            [i32::type_info(), <Option<i64>>::type_info(), bool::type_info()],
        );

        assert_eq!(err.found(), Some("String"));
        assert_eq!(err.expected(), ["i32", "Option<i64>", "bool"]);
        assert_eq!(
            err.to_string(),
            "Unexpected type String of object abc. Expected type like i32, Option<i64>, bool"
        );
    }

    #[test]
    fn null_object_message() {
        let err = pars_to::<u8>(None).unwrap_err();
        assert_eq!(err.found(), None);
        assert_eq!(
            err.to_string(),
            "Unexpected null object. Expected type like u8"
        );
    }

    #[test]
    fn empty_expected_list() {
        let err = UnexpectedTypeError::new(None, core::iter::empty::<&'static TypeInfo>());
        assert!(err.expected().is_empty());
        assert_eq!(err.to_string(), "Unexpected null object.");

        let err = UnexpectedTypeError::new(Some(&7_i32), []);
        assert_eq!(err.to_string(), "Unexpected type i32 of object 7.");
    }

    #[test]
    fn narrowing() {
        assert_eq!(try_pars_to::<u8>(Some(&3_u8)), Some(3));
        assert_eq!(try_pars_to::<u8>(Some(&3_u16)), None);
        assert_eq!(try_pars_to::<u8>(None), None);

        assert_eq!(narrow::<bool>(Box::new(true)), Ok(true));
        let err = narrow::<bool>(Box::new(1.5_f64)).unwrap_err();
        assert_eq!(err.found(), Some("f64"));
        assert_eq!(err.target(), Some("1.5"));
    }
}
