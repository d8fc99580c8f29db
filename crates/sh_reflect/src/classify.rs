//! Type classification.
//!
//! Pure predicates over [`TypeInfo`], available both as methods and as free
//! functions. A nullable type is classified by the type it wraps, except by
//! [`is_string`] and [`is_collection`].
//!
//! None of these predicates fails: a type they do not know is simply `false`.
//!
//! ```
//! use sh_reflect::{classify, info::Typed};
//!
//! assert!(classify::is_int_number(<Option<u16>>::type_info()));
//! assert!(classify::is_line_space(f32::type_info()));
//! assert!(!classify::is_collection(String::type_info()));
//! ```

use crate::info::{Scalar, TypeInfo, TypeKind};

impl TypeInfo {
    /// Returns the scalar of this type, looking through one `Option`.
    fn nullable_scalar(&self) -> Option<Scalar> {
        match self.kind() {
            TypeKind::Scalar(scalar) => Some(*scalar),
            TypeKind::Nullable(info) => info.inner().as_scalar(),
            _ => None,
        }
    }

    /// `true` for scalars and `Option` of a non-string scalar.
    pub fn is_primitive(&self) -> bool {
        match self.kind() {
            TypeKind::Scalar(_) => true,
            TypeKind::Nullable(info) => info.inner().as_scalar().is_some_and(|s| !s.is_string()),
            _ => false,
        }
    }

    /// `true` for the integer types and their `Option`.
    pub fn is_int_number(&self) -> bool {
        self.nullable_scalar().is_some_and(Scalar::is_int_number)
    }

    /// `true` for `f32`, `f64` and their `Option`.
    pub fn is_dec_number(&self) -> bool {
        self.nullable_scalar().is_some_and(Scalar::is_dec_number)
    }

    /// `true` for the chrono date types and their `Option`.
    pub fn is_date(&self) -> bool {
        self.nullable_scalar().is_some_and(Scalar::is_date)
    }

    pub fn is_bool(&self) -> bool {
        self.nullable_scalar() == Some(Scalar::Bool)
    }

    /// `true` for `uuid::Uuid` and `Option<Uuid>`.
    pub fn is_guid(&self) -> bool {
        self.nullable_scalar() == Some(Scalar::Uuid)
    }

    /// `true` for `String` and `&'static str`.
    pub fn is_string(&self) -> bool {
        self.as_scalar().is_some_and(Scalar::is_string)
    }

    /// `true` for values that lie on a line: numbers and dates.
    pub fn is_line_space(&self) -> bool {
        self.nullable_scalar()
            .is_some_and(|s| s.is_int_number() || s.is_dec_number() || s.is_date())
    }

    /// `true` for `Vec`, `VecDeque`, arrays and sets. Strings are not collections.
    pub fn is_collection(&self) -> bool {
        matches!(self.kind(), TypeKind::Collection(_))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self.kind(), TypeKind::Nullable(_))
    }

    /// `true` if values of this type can be ordered.
    pub fn is_comparable(&self) -> bool {
        self.is_ordered()
    }

    /// Returns the item type of a collection.
    pub fn collection_item(&self) -> Option<&'static TypeInfo> {
        self.as_collection().map(|info| info.item())
    }
}

macro_rules! free_predicates {
    ($($name:ident),+ $(,)?) => {$(
        #[doc = concat!("See [`TypeInfo::", stringify!($name), "`].")]
        #[inline]
        pub fn $name(info: &TypeInfo) -> bool {
            info.$name()
        }
    )+};
}

free_predicates! {
    is_primitive,
    is_int_number,
    is_dec_number,
    is_date,
    is_bool,
    is_guid,
    is_string,
    is_line_space,
    is_collection,
    is_nullable,
    is_comparable,
}

/// See [`TypeInfo::collection_item`].
#[inline]
pub fn collection_item(info: &TypeInfo) -> Option<&'static TypeInfo> {
    info.collection_item()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet, VecDeque};

    use crate::info::{TypeInfo, Typed};

    fn classes(info: &TypeInfo) -> [bool; 8] {
        [
            info.is_primitive(),
            info.is_int_number(),
            info.is_dec_number(),
            info.is_bool(),
            info.is_string(),
            info.is_line_space(),
            info.is_collection(),
            info.is_nullable(),
        ]
    }

    #[test]
    fn classification_table() {
        const F: bool = false;
        const T: bool = true;

        assert_eq!(classes(i64::type_info()), [T, T, F, F, F, T, F, F]);
        assert_eq!(classes(<Option<usize>>::type_info()), [T, T, F, F, F, T, F, T]);
        assert_eq!(classes(f32::type_info()), [T, F, T, F, F, T, F, F]);
        assert_eq!(classes(<Option<f64>>::type_info()), [T, F, T, F, F, T, F, T]);
        assert_eq!(classes(bool::type_info()), [T, F, F, T, F, F, F, F]);
        assert_eq!(classes(String::type_info()), [T, F, F, F, T, F, F, F]);
        assert_eq!(classes(<&'static str>::type_info()), [T, F, F, F, T, F, F, F]);
        assert_eq!(classes(<Option<String>>::type_info()), [F, F, F, F, F, F, F, T]);
        assert_eq!(classes(<Vec<u8>>::type_info()), [F, F, F, F, F, F, T, F]);
    }

    #[test]
    fn collections_and_items() {
        assert!(<VecDeque<u8>>::type_info().is_collection());
        assert!(<[i32; 2]>::type_info().is_collection());
        assert!(<HashSet<u8>>::type_info().is_collection());
        assert!(<BTreeSet<String>>::type_info().is_collection());

        let item = <Vec<Option<u8>>>::type_info().collection_item().unwrap();
        assert!(item.type_is::<Option<u8>>());
        assert!(i32::type_info().collection_item().is_none());
    }

    #[test]
    fn comparability() {
        assert!(u8::type_info().is_comparable());
        assert!(<Option<String>>::type_info().is_comparable());
        assert!(!<Vec<u8>>::type_info().is_comparable());
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn dates() {
        use chrono::{DateTime, NaiveDate, Utc};

        assert!(NaiveDate::type_info().is_date());
        assert!(<Option<DateTime<Utc>>>::type_info().is_date());
        assert!(NaiveDate::type_info().is_line_space());
        assert!(!NaiveDate::type_info().is_int_number());
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn guids() {
        assert!(uuid::Uuid::type_info().is_guid());
        assert!(<Option<uuid::Uuid>>::type_info().is_guid());
        assert!(!String::type_info().is_guid());
    }
}
