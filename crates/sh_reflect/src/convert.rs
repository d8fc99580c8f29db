//! Conversions an accessor may apply between a member type and the requested type.
//!
//! Exactly three kinds exist:
//!
//! - identity,
//! - lossless widening, i.e. the `From` impls std provides between `bool`,
//!   `char`, the integer types and the float types,
//! - wrapping into `Option`, optionally after a widening.
//!
//! ```
//! use sh_reflect::{convert::Conversion, info::Typed};
//!
//! let widen = Conversion::resolve(u8::type_info(), i64::type_info()).unwrap();
//! let value = widen.apply(&7_u8).unwrap();
//! assert_eq!(value.take::<i64>().unwrap(), 7);
//!
//! // `i64` does not losslessly fit in `f64`.
//! assert!(Conversion::resolve(i64::type_info(), f64::type_info()).is_none());
//! ```

use core::any::TypeId;
use core::fmt;
use std::sync::LazyLock;

use sh_utils::hash::HashMap;

use crate::Reflect;
use crate::info::{NullableInfo, TypeInfo};

/// Converts a value of one concrete type into a boxed value of another.
///
/// Returns `None` when the input is not of the expected source type.
pub type ConvertFn = fn(&dyn Reflect) -> Option<Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// Widening table

fn widen<A, B>(value: &dyn Reflect) -> Option<Box<dyn Reflect>>
where
    A: Reflect + Copy,
    B: Reflect + From<A>,
{
    let value = *value.downcast_ref::<A>()?;
    Some(Box::new(B::from(value)))
}

macro_rules! widening_table {
    ($($from:ty => [$($to:ty),+ $(,)?]),+ $(,)?) => {{
        let mut table: HashMap<(TypeId, TypeId), ConvertFn> = HashMap::default();
        $($(
            table.insert((TypeId::of::<$from>(), TypeId::of::<$to>()), widen::<$from, $to>);
        )+)+
        table
    }};
}

static WIDENING: LazyLock<HashMap<(TypeId, TypeId), ConvertFn>> = LazyLock::new(|| {
    widening_table! {
        bool => [i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64],
        char => [u32, u64, u128],
        i8 => [i16, i32, i64, i128, isize, f32, f64],
        i16 => [i32, i64, i128, isize, f32, f64],
        i32 => [i64, i128, f64],
        i64 => [i128],
        u8 => [char, u16, u32, u64, u128, usize, i16, i32, i64, i128, isize, f32, f64],
        u16 => [u32, u64, u128, usize, i32, i64, i128, f32, f64],
        u32 => [u64, u128, i64, i128, f64],
        u64 => [u128, i128],
        f32 => [f64],
    }
});

/// Returns the lossless widening from `from` to `to`, if one exists.
///
/// Identity is not a widening.
#[inline]
pub fn widening(from: TypeId, to: TypeId) -> Option<ConvertFn> {
    WIDENING.get(&(from, to)).copied()
}

// -----------------------------------------------------------------------------
// Conversion

/// A conversion resolved once, when an accessor is built.
#[derive(Clone, Copy)]
pub enum Conversion {
    Identity,
    Widen(ConvertFn),
    /// Boxes into `Option`, after an optional widening to the wrapped type.
    Wrap {
        widen: Option<ConvertFn>,
        nullable: NullableInfo,
    },
}

impl Conversion {
    /// Resolves the conversion from values of `from` to values of `to`.
    ///
    /// Returns `None` if no legal conversion exists.
    pub fn resolve(from: &TypeInfo, to: &TypeInfo) -> Option<Self> {
        if from.ty_id() == to.ty_id() {
            return Some(Self::Identity);
        }
        if let Some(f) = widening(from.ty_id(), to.ty_id()) {
            return Some(Self::Widen(f));
        }

        let nullable = *to.as_nullable()?;
        let inner = nullable.inner().ty_id();
        if inner == from.ty_id() {
            Some(Self::Wrap {
                widen: None,
                nullable,
            })
        } else {
            let widen = widening(from.ty_id(), inner)?;
            Some(Self::Wrap {
                widen: Some(widen),
                nullable,
            })
        }
    }

    #[inline]
    pub const fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Converts a borrowed value. Identity and plain wrapping need `reflect_clone`.
    pub fn apply(&self, value: &dyn Reflect) -> Option<Box<dyn Reflect>> {
        match self {
            Self::Identity => value.reflect_clone(),
            Self::Widen(f) => f(value),
            Self::Wrap { widen, nullable } => {
                let inner = match widen {
                    Some(f) => f(value)?,
                    None => value.reflect_clone()?,
                };
                nullable.wrap(inner)
            }
        }
    }

    /// Converts an owned value.
    pub fn apply_owned(&self, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
        match self {
            Self::Identity => Some(value),
            Self::Widen(f) => f(&*value),
            Self::Wrap { widen, nullable } => {
                let inner = match widen {
                    Some(f) => f(&*value)?,
                    None => value,
                };
                nullable.wrap(inner)
            }
        }
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Widen(_) => f.write_str("Widen"),
            Self::Wrap { widen, nullable } => f
                .debug_struct("Wrap")
                .field("widen", &widen.is_some())
                .field("inner", &nullable.inner().path())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Conversion, widening};
    use crate::info::Typed;
    use core::any::TypeId;

    fn can_convert<A: Typed, B: Typed>() -> bool {
        Conversion::resolve(A::type_info(), B::type_info()).is_some()
    }

    #[test]
    fn lossless_only() {
        assert!(can_convert::<u8, u64>());
        assert!(can_convert::<i16, f32>());
        assert!(can_convert::<u32, f64>());
        assert!(can_convert::<bool, u8>());
        assert!(can_convert::<char, u32>());

        assert!(!can_convert::<u64, u32>());
        assert!(!can_convert::<i32, f32>());
        assert!(!can_convert::<u64, i64>());
        assert!(!can_convert::<f64, f32>());
        assert!(!can_convert::<String, u8>());
        assert!(widening(TypeId::of::<u8>(), TypeId::of::<u8>()).is_none());
    }

    #[test]
    fn wrap_into_option() {
        let plain = Conversion::resolve(u16::type_info(), <Option<u16>>::type_info()).unwrap();
        let value = plain.apply(&5_u16).unwrap();
        assert_eq!(value.take::<Option<u16>>().unwrap(), Some(5));

        let widened = Conversion::resolve(u16::type_info(), <Option<u64>>::type_info()).unwrap();
        let value = widened.apply_owned(Box::new(5_u16)).unwrap();
        assert_eq!(value.take::<Option<u64>>().unwrap(), Some(5));

        // Unwrapping is not a conversion.
        assert!(!can_convert::<Option<u16>, u16>());
    }

    #[test]
    fn apply_rejects_wrong_input() {
        let widen = Conversion::resolve(i8::type_info(), i32::type_info()).unwrap();
        assert!(widen.apply(&1_u8).is_none());
    }
}
