use core::hash::Hash;
use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{CollectionInfo, CollectionKind, TypeInfo, TypeKind, Typed, default_of};

// Clones every item through `Reflect::reflect_clone`.
fn clone_items<'a, T: Reflect, C: FromIterator<T>>(
    items: impl Iterator<Item = &'a T>,
) -> Option<C> {
    items
        .map(|item| item.reflect_clone()?.take::<T>().ok())
        .collect()
}

// Item-wise equality through `Reflect::reflect_partial_eq`.
fn items_eq<'a, T: Reflect>(
    a: impl ExactSizeIterator<Item = &'a T>,
    b: impl ExactSizeIterator<Item = &'a T>,
) -> Option<bool> {
    if a.len() != b.len() {
        return Some(false);
    }
    for (x, y) in a.zip(b) {
        if !x.reflect_partial_eq(y)? {
            return Some(false);
        }
    }
    Some(true)
}

macro_rules! impl_list_reflect {
    ($ty:ident, $kind:ident) => {
        impl<T: Typed + Reflect> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::new::<Self>(TypeKind::Collection(CollectionInfo::new::<T>(
                        CollectionKind::$kind,
                    )))
                    .with_default(default_of::<Self>)
                })
            }
        }

        impl<T: Typed + Reflect> Reflect for $ty<T> {
            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
                Some(Box::new(clone_items::<T, Self>(self.iter())?))
            }

            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                match other.downcast_ref::<Self>() {
                    Some(other) => items_eq(self.iter(), other.iter()),
                    None => Some(false),
                }
            }
        }
    };
}

impl_list_reflect!(Vec, Vec);
impl_list_reflect!(VecDeque, VecDeque);

impl<T: Typed + Reflect, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::new::<Self>(TypeKind::Collection(CollectionInfo::new::<T>(
                CollectionKind::Array(N),
            )))
        })
    }
}

impl<T: Typed + Reflect, const N: usize> Reflect for [T; N] {
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        let items: Vec<T> = clone_items(self.iter())?;
        let array: Self = items.try_into().ok()?;
        Some(Box::new(array))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        match other.downcast_ref::<Self>() {
            Some(other) => items_eq(self.iter(), other.iter()),
            None => Some(false),
        }
    }
}

macro_rules! impl_set_reflect {
    ($ty:ident, $kind:ident, $($bound:path),+) => {
        impl<T: Typed + Reflect $(+ $bound)+> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::new::<Self>(TypeKind::Collection(CollectionInfo::new::<T>(
                        CollectionKind::$kind,
                    )))
                    .with_default(default_of::<Self>)
                })
            }
        }

        impl<T: Typed + Reflect $(+ $bound)+> Reflect for $ty<T> {
            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
                Some(Box::new(clone_items::<T, Self>(self.iter())?))
            }

            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                Some(other.downcast_ref::<Self>().is_some_and(|other| self == other))
            }
        }
    };
}

impl_set_reflect!(HashSet, HashSet, Eq, Hash);
impl_set_reflect!(BTreeSet, BTreeSet, Ord);

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::Reflect;
    use crate::info::{CollectionKind, Typed};

    #[test]
    fn collection_descriptors() {
        let info = <Vec<String>>::type_info();
        let collection = info.as_collection().unwrap();
        assert_eq!(collection.kind(), CollectionKind::Vec);
        assert!(collection.item().type_is::<String>());

        let array = <[u8; 3]>::type_info().as_collection().unwrap();
        assert_eq!(array.kind(), CollectionKind::Array(3));
        assert!(!<[u8; 3]>::type_info().has_default());
    }

    #[test]
    fn clone_and_compare() {
        let list = vec![1_u32, 2, 3];
        let cloned = list.reflect_clone().unwrap();
        assert_eq!(cloned.reflect_partial_eq(&list), Some(true));
        assert_eq!(cloned.reflect_partial_eq(&vec![1_u32, 2]), Some(false));

        let array = [Some(1_i8), None];
        let cloned = array.reflect_clone().unwrap();
        assert_eq!(cloned.take::<[Option<i8>; 2]>().unwrap(), array);

        let set: BTreeSet<char> = ['a', 'b'].into();
        let cloned = set.reflect_clone().unwrap();
        assert_eq!(cloned.take::<BTreeSet<char>>().unwrap(), set);
    }
}
