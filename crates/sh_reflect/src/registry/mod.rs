//! Lookup of [`TypeInfo`] by [`TypeId`], type path or short type name.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`].
//!
//! We use the [`inventory`] crate to implement static registration. Not all
//! platforms support it, although major platforms do.
//!
//! [`inventory`]: https://docs.rs/inventory

use core::any::TypeId;
use core::fmt;

use sh_utils::TypeIdMap;
use sh_utils::hash::{HashMap, HashSet};

use crate::info::{TypeInfo, TypeKind, Typed};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types.
///
/// Types can be looked up by [`TypeId`], by full path, or by short name.
/// When two registered types share a short name, the name becomes ambiguous
/// and is dropped from the name index.
///
/// # Examples
///
/// ```
/// use sh_reflect::{derive::Reflect, registry::TypeRegistry};
///
/// #[derive(Reflect)]
/// struct Invoice {
///     lines: Vec<Option<u32>>,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Invoice>();
///
/// // Member and item types are registered too.
/// assert!(registry.get_with_type_name("Vec<Option<u32>>").is_some());
/// assert!(registry.get_with_type_name("i32").is_some_and(|info| info.is_int_number()));
/// ```
pub struct TypeRegistry {
    infos: TypeIdMap<&'static TypeInfo>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry without any types.
    #[inline]
    pub fn empty() -> Self {
        Self {
            infos: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    /// Creates a registry with the scalar types.
    ///
    /// With the `chrono` and `uuid` features, the date types and `Uuid` are
    /// included.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<&'static str>();
        crate::cfg::chrono! {
            registry.register::<chrono::NaiveDate>();
            registry.register::<chrono::NaiveDateTime>();
            registry.register::<chrono::DateTime<chrono::Utc>>();
        }
        crate::cfg::uuid! {
            registry.register::<uuid::Uuid>();
        }
        registry
    }

    // The type must not already exist.
    fn add_new_type_indices(&mut self, info: &'static TypeInfo) {
        let type_name = info.name();

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.remove(type_name).is_some() {
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, info.ty_id());
            }
        }

        self.type_path_to_id.insert(info.path(), info.ty_id());
    }

    /// Registers a type and, recursively, its member and item types.
    ///
    /// Returns `false` if the type was already registered.
    pub fn register_info(&mut self, info: &'static TypeInfo) -> bool {
        if !self.infos.try_insert(info.ty_id(), || info) {
            return false;
        }
        self.add_new_type_indices(info);

        match info.kind() {
            TypeKind::Nullable(nullable) => {
                self.register_info(nullable.inner());
            }
            TypeKind::Collection(collection) => {
                self.register_info(collection.item());
            }
            TypeKind::Struct(members) => {
                for member in members.iter() {
                    self.register_info(member.type_info());
                }
            }
            TypeKind::Scalar(_) | TypeKind::Opaque => {}
        }
        true
    }

    /// Registers `T` and, recursively, its member and item types.
    #[inline]
    pub fn register<T: Typed>(&mut self) -> &mut Self {
        self.register_info(T::type_info());
        self
    }

    /// Registers every non-generic type derived with `#[reflect(auto_register)]`.
    ///
    /// Returns `false` when the `auto_register` feature is disabled, in which
    /// case nothing happens.
    ///
    /// ```
    /// use sh_reflect::{derive::Reflect, registry::TypeRegistry};
    ///
    /// #[derive(Reflect)]
    /// #[reflect(auto_register)]
    /// struct Shipment {
    ///     weight: f32,
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// if registry.auto_register() {
    ///     assert!(registry.get_with_type_name("Shipment").is_some());
    /// }
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        crate::cfg::auto_register! {
            if {
                let mut added = 0_usize;
                for registration in crate::__macro_exports::auto_register::registrations() {
                    added += usize::from(self.register_info((registration.0)()));
                }
                log::debug!("auto registered {added} types");
                true
            } else {
                false
            }
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.infos.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.infos.get(&type_id).copied()
    }

    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static TypeInfo> {
        self.get(*self.type_path_to_id.get(type_path)?)
    }

    /// Looks a type up by its short name, e.g. `Option<u8>`.
    ///
    /// Returns `None` for ambiguous names, see [`is_ambiguous`](Self::is_ambiguous).
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static TypeInfo> {
        self.get(*self.type_name_to_id.get(type_name)?)
    }

    /// Returns `true` if more than one registered type has this short name.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeInfo> + '_ {
        self.infos.values().copied()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::TypeRegistry;
    use crate::info::Typed;

    mod a {
        #[derive(crate::derive::Reflect)]
        pub struct Item {
            pub id: u8,
        }
    }

    mod b {
        #[derive(crate::derive::Reflect)]
        pub struct Item {
            pub code: String,
        }
    }

    #[test]
    fn ambiguous_names_are_dropped() {
        let mut registry = TypeRegistry::empty();
        registry.register::<a::Item>();
        assert!(registry.get_with_type_name("Item").is_some());

        registry.register::<b::Item>();
        assert!(registry.get_with_type_name("Item").is_none());
        assert!(registry.is_ambiguous("Item"));

        let path = b::Item::type_info().path();
        assert!(registry.get_with_type_path(path).is_some());
    }

    #[test]
    fn registers_dependencies_once() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<Option<u8>>>();
        assert_eq!(registry.len(), 3);
        assert!(!registry.register_info(u8::type_info()));
    }

    #[test]
    fn classification_by_name() {
        let registry = TypeRegistry::new();
        let is_int = |name: &str| registry.get_with_type_name(name).map(|info| info.is_int_number());
        assert_eq!(is_int("u64"), Some(true));
        assert_eq!(is_int("f64"), Some(false));
        assert_eq!(is_int("Nope"), None);
    }
}
