/// Implements `Typed` and `Reflect` for a `Clone + Default + PartialOrd + Display` leaf type.
macro_rules! impl_scalar_reflect {
    ($($ty:ty => $scalar:ident),+ $(,)?) => {$(
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::new::<Self>($crate::info::TypeKind::Scalar(
                        $crate::info::Scalar::$scalar,
                    ))
                    .with_ordering(true)
                    .with_default($crate::info::default_of::<Self>)
                })
            }
        }

        impl $crate::Reflect for $ty {
            #[inline]
            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn $crate::Reflect>,
            ) -> Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            #[inline]
            fn reflect_clone(&self) -> Option<::std::boxed::Box<dyn $crate::Reflect>> {
                Some(::std::boxed::Box::new(Clone::clone(self)))
            }

            fn reflect_partial_eq(&self, other: &dyn $crate::Reflect) -> Option<bool> {
                Some(
                    other
                        .downcast_ref::<Self>()
                        .is_some_and(|other| PartialEq::eq(self, other)),
                )
            }

            fn reflect_partial_cmp(
                &self,
                other: &dyn $crate::Reflect,
            ) -> Option<::core::cmp::Ordering> {
                PartialOrd::partial_cmp(self, other.downcast_ref::<Self>()?)
            }

            fn reflect_display(&self) -> Option<::std::string::String> {
                Some(::std::string::ToString::to_string(self))
            }
        }
    )+};
}

pub(crate) use impl_scalar_reflect;

impl_scalar_reflect! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
    &'static str => Str,
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use crate::Reflect;
    use crate::info::{Scalar, Typed};

    #[test]
    fn scalar_descriptors() {
        let info = u16::type_info();
        assert_eq!(info.as_scalar(), Some(Scalar::U16));
        assert!(info.is_ordered());
        assert_eq!(info.name(), "u16");

        let s = <&'static str>::type_info();
        assert_eq!(s.as_scalar(), Some(Scalar::Str));
        assert_eq!(s.name(), "&str");
    }

    #[test]
    fn scalar_comparisons() {
        let a: &dyn Reflect = &3_i32;
        let b: &dyn Reflect = &5_i32;
        let c: &dyn Reflect = &5_i64;

        assert_eq!(a.reflect_partial_cmp(b), Some(Ordering::Less));
        assert_eq!(b.reflect_partial_eq(b), Some(true));
        // Different types never compare equal and are unordered.
        assert_eq!(b.reflect_partial_eq(c), Some(false));
        assert_eq!(b.reflect_partial_cmp(c), None);
        assert_eq!(f64::NAN.reflect_partial_cmp(&1.0_f64), None);
    }

    #[test]
    fn scalar_set_checks_type() {
        let mut text = String::from("a");
        assert!(text.set(Box::new(String::from("b"))).is_ok());
        assert_eq!(text, "b");

        let rejected = text.set(Box::new(1_u8)).unwrap_err();
        assert!(rejected.is::<u8>());
        assert_eq!(text, "b");
    }

    #[test]
    fn default_values() {
        let value = String::type_info().create_default().unwrap();
        assert_eq!(value.take::<String>().unwrap(), "");
    }
}
