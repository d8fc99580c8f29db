use core::cmp::Ordering;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{NullableInfo, TypeInfo, TypeKind, Typed, default_of};

impl<T: Typed + Reflect> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::new::<Self>(TypeKind::Nullable(NullableInfo::new::<T>()))
                .with_ordering(T::type_info().is_ordered())
                .with_default(default_of::<Self>)
        })
    }
}

impl<T: Typed + Reflect> Reflect for Option<T> {
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        let cloned = match self {
            None => None::<T>,
            Some(inner) => Some(inner.reflect_clone()?.take::<T>().ok()?),
        };
        Some(Box::new(cloned))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        let Some(other) = other.downcast_ref::<Self>() else {
            return Some(false);
        };
        match (self, other) {
            (None, None) => Some(true),
            (Some(a), Some(b)) => a.reflect_partial_eq(b),
            _ => Some(false),
        }
    }

    /// `None` orders before every `Some`.
    fn reflect_partial_cmp(&self, other: &dyn Reflect) -> Option<Ordering> {
        match (self, other.downcast_ref::<Self>()?) {
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(_), None) => Some(Ordering::Greater),
            (Some(a), Some(b)) => a.reflect_partial_cmp(b),
        }
    }

    fn reflect_display(&self) -> Option<String> {
        self.as_ref()?.reflect_display()
    }
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use crate::Reflect;
    use crate::info::Typed;

    #[test]
    fn nullable_descriptor() {
        let info = <Option<u8>>::type_info();
        let nullable = info.as_nullable().unwrap();
        assert!(nullable.inner().type_is::<u8>());
        assert!(info.is_ordered());
        assert_eq!(info.name(), "Option<u8>");

        let wrapped = nullable.wrap(Box::new(4_u8)).unwrap();
        assert_eq!(wrapped.take::<Option<u8>>().unwrap(), Some(4));
        assert!(nullable.wrap(Box::new(4_i8)).is_none());

        let value: &dyn Reflect = &Some(9_u8);
        let inner = nullable.unwrap(value).unwrap();
        assert_eq!(inner.downcast_ref::<u8>(), Some(&9));
    }

    #[test]
    fn none_orders_first() {
        let none: &dyn Reflect = &None::<i32>;
        let some: &dyn Reflect = &Some(-5_i32);
        assert_eq!(none.reflect_partial_cmp(some), Some(Ordering::Less));
        assert_eq!(some.reflect_partial_eq(&Some(-5_i32)), Some(true));
        assert_eq!(some.reflect_display().as_deref(), Some("-5"));
        assert_eq!(none.reflect_display(), None);
    }
}
