use core::cmp::Ordering;
use core::fmt;

use sh_reflect::Reflect;
use sh_reflect::info::{Scalar, TypeKind};

/// A scalar produced by evaluating an expression.
///
/// Integers of every width are held as `i128` so that comparisons between
/// different integer types are exact. Integers compare with floats through
/// `f64`. Strings, dates and identifiers are held in their display form.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    Int(i128),
    Float(f64),
    Str(String),
}

impl Value {
    /// Reads a reflected value as a scalar.
    ///
    /// `None` becomes [`Value::Null`] and `Some` is looked through. Returns
    /// `None` for types without a scalar form, such as structs and
    /// collections.
    pub fn from_reflect(value: &dyn Reflect) -> Option<Self> {
        macro_rules! int {
            ($value:ident, $ty:ty) => {
                Value::Int(*$value.downcast_ref::<$ty>()? as i128)
            };
        }

        let info = value.reflect_type_info();
        let scalar = match info.kind() {
            TypeKind::Scalar(scalar) => *scalar,
            TypeKind::Nullable(nullable) => {
                return match nullable.unwrap(value) {
                    Some(inner) => Self::from_reflect(inner),
                    None => Some(Self::Null),
                };
            }
            _ => return None,
        };

        Some(match scalar {
            Scalar::Bool => Value::Bool(*value.downcast_ref::<bool>()?),
            Scalar::Char => Value::Char(*value.downcast_ref::<char>()?),
            Scalar::I8 => int!(value, i8),
            Scalar::I16 => int!(value, i16),
            Scalar::I32 => int!(value, i32),
            Scalar::I64 => int!(value, i64),
            Scalar::I128 => int!(value, i128),
            Scalar::Isize => int!(value, isize),
            Scalar::U8 => int!(value, u8),
            Scalar::U16 => int!(value, u16),
            Scalar::U32 => int!(value, u32),
            Scalar::U64 => int!(value, u64),
            Scalar::Usize => int!(value, usize),
            Scalar::U128 => {
                let v = *value.downcast_ref::<u128>()?;
                i128::try_from(v).map_or(Value::Float(v as f64), Value::Int)
            }
            Scalar::F32 => Value::Float(f64::from(*value.downcast_ref::<f32>()?)),
            Scalar::F64 => Value::Float(*value.downcast_ref::<f64>()?),
            Scalar::String
            | Scalar::Str
            | Scalar::Date
            | Scalar::DateTime
            | Scalar::DateTimeUtc
            | Scalar::Uuid => Value::Str(value.reflect_display()?),
        })
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Value {
    /// `Null` equals only `Null` and is unordered against everything else.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => a.partial_cmp(b),
            (Self::Char(a), Self::Char(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Int(b)) => a.partial_cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Str(a), Self::Str(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => write!(f, "{v:?}"),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Debug::fmt(v, f),
            Self::Str(v) => write!(f, "{v:?}"),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::$variant(value.into())
            }
        }
    )+};
}

impl_from! {
    bool => Bool,
    char => Char,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    i128 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    u64 => Int,
    f32 => Float,
    f64 => Float,
    String => Str,
    &str => Str,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use sh_reflect::Reflect;

    #[test]
    fn reads_reflected_scalars() {
        let cases: [(&dyn Reflect, Value); 7] = [
            (&7_u8, Value::Int(7)),
            (&-3_i64, Value::Int(-3)),
            (&1.5_f32, Value::Float(1.5)),
            (&true, Value::Bool(true)),
            (&Some(4_u16), Value::Int(4)),
            (&None::<u16>, Value::Null),
            (&String::from("a"), Value::Str("a".into())),
        ];
        for (reflected, expected) in cases {
            assert_eq!(Value::from_reflect(reflected), Some(expected));
        }
        assert_eq!(Value::from_reflect(&vec![1_u8]), None);
    }

    #[test]
    fn numeric_comparison_widens() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert!(Value::Int(2) < Value::Float(2.5));
        assert!(Value::from(u64::MAX) > Value::from(-1_i8));
        assert_eq!(Value::Null.partial_cmp(&Value::Int(0)), None);
        assert_ne!(Value::Str("1".into()), Value::Int(1));
    }

    #[test]
    fn display_form() {
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::from(0.5_f64).to_string(), "0.5");
        assert_eq!(Value::from(None::<i32>).to_string(), "null");
    }
}
