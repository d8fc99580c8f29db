use core::any::{Any, TypeId};
use core::fmt;
use core::hash::Hash;
use std::sync::Arc;

use sh_utils::KeyedCache;
use sh_utils::hash::Equivalent;

use crate::Reflect;
use crate::access::{AccessError, AccessMode, AccessorBuilder, Getter, Setter};
use crate::access::{CopyPlan, print_value};
use crate::info::{GetFn, TypeInfo, Typed};
use crate::narrow::UnexpectedTypeError;

// -----------------------------------------------------------------------------
// Keys

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AccessorKey {
    owner: TypeId,
    member: Box<str>,
    value: TypeId,
}

// Borrowed form of `AccessorKey`; hashes identically.
#[derive(Hash)]
struct AccessorKeyRef<'a> {
    owner: TypeId,
    member: &'a str,
    value: TypeId,
}

impl AccessorKeyRef<'_> {
    fn to_key(&self) -> AccessorKey {
        AccessorKey {
            owner: self.owner,
            member: self.member.into(),
            value: self.value,
        }
    }
}

impl Equivalent<AccessorKey> for AccessorKeyRef<'_> {
    #[inline]
    fn equivalent(&self, key: &AccessorKey) -> bool {
        self.owner == key.owner && self.value == key.value && self.member == &*key.member
    }
}

type Entry = Arc<dyn Any + Send + Sync>;

// -----------------------------------------------------------------------------
// AccessorCache

/// Memoized accessors, keyed by `(instance type, member name, value type)`.
///
/// Entries are built by [`AccessorBuilder`] on first use and never evicted.
/// Under concurrent first use of a key exactly one build succeeds and every
/// caller receives that entry. Failed builds are not cached.
///
/// [`AccessorCache::global`] is the process-wide instance; [`AccessorCache::new`]
/// creates an independent one.
///
/// # Examples
///
/// ```
/// use sh_reflect::{Reflect, derive::Reflect, access::AccessorCache};
///
/// #[derive(Reflect, Default)]
/// struct User {
///     name: String,
///     age: Option<u8>,
/// }
///
/// let cache = AccessorCache::new();
/// let mut user = User::default();
///
/// cache.set_property(&mut user, "name", String::from("Ada")).unwrap();
/// cache.set_property(&mut user, "age", 36_u8).unwrap();
///
/// let age: Option<u8> = cache.get_property(Some(user.as_reflect()), "age").unwrap();
/// assert_eq!(user.name, "Ada");
/// assert_eq!(age, Some(36));
///
/// // A null instance reads as the default value.
/// assert_eq!(cache.get_property::<u32>(None, "age"), Ok(0));
/// ```
pub struct AccessorCache {
    getters: KeyedCache<AccessorKey, Entry>,
    setters: KeyedCache<AccessorKey, Entry>,
    readers: KeyedCache<AccessorKey, GetFn>,
    plans: KeyedCache<TypeId, Arc<CopyPlan>>,
}

impl AccessorCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            getters: KeyedCache::new(),
            setters: KeyedCache::new(),
            readers: KeyedCache::new(),
            plans: KeyedCache::new(),
        }
    }

    /// Returns the process-wide cache.
    #[inline]
    pub fn global() -> &'static Self {
        static GLOBAL: AccessorCache = AccessorCache::new();
        &GLOBAL
    }

    /// Returns the number of cached getters and setters.
    pub fn len(&self) -> usize {
        self.getters.len() + self.setters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Entries

    fn entry(
        map: &KeyedCache<AccessorKey, Entry>,
        key: AccessorKeyRef<'_>,
        owner: &'static TypeInfo,
        requested: &'static TypeInfo,
        build: impl FnOnce() -> Result<Entry, AccessError>,
    ) -> Result<Entry, AccessError> {
        if let Some(entry) = map.get(&key) {
            crate::cfg::debug! {
                log::trace!("accessor hit: {}.{} as {}", owner.name(), key.member, requested.name());
            }
            return Ok(entry);
        }

        map.get_or_try_insert_with(&key, AccessorKeyRef::to_key, || {
            build()
                .inspect(|_| {
                    log::debug!(
                        "built accessor {}.{} as {}",
                        owner.path(),
                        key.member,
                        requested.path()
                    );
                })
                .inspect_err(|err| {
                    log::warn!("cannot build accessor {}.{}: {err}", owner.path(), key.member);
                })
        })
    }

    /// Returns the cached getter of `member`, building it on first use.
    pub fn getter<T: Typed + Reflect + Clone>(
        &self,
        owner: &'static TypeInfo,
        member: &str,
    ) -> Result<Getter<T>, AccessError> {
        let key = AccessorKeyRef {
            owner: owner.ty_id(),
            member,
            value: TypeId::of::<T>(),
        };
        let entry = Self::entry(&self.getters, key, owner, T::type_info(), || {
            let getter = AccessorBuilder::new(owner, member).getter::<T>()?;
            Ok(Arc::new(getter))
        })?;
        entry
            .downcast_ref::<Getter<T>>()
            .cloned()
            .ok_or_else(|| UnexpectedTypeError::expecting::<T>(None).into())
    }

    /// Returns the cached setter of `member`, building it on first use.
    pub fn setter<T: Typed + Reflect>(
        &self,
        owner: &'static TypeInfo,
        member: &str,
    ) -> Result<Setter<T>, AccessError> {
        let key = AccessorKeyRef {
            owner: owner.ty_id(),
            member,
            value: TypeId::of::<T>(),
        };
        let entry = Self::entry(&self.setters, key, owner, T::type_info(), || {
            let setter = AccessorBuilder::new(owner, member).setter::<T>()?;
            Ok(Arc::new(setter))
        })?;
        entry
            .downcast_ref::<Setter<T>>()
            .cloned()
            .ok_or_else(|| UnexpectedTypeError::expecting::<T>(None).into())
    }

    /// Returns the cached function borrowing `member` out of an instance.
    pub fn reader(&self, owner: &'static TypeInfo, member: &str) -> Result<GetFn, AccessError> {
        let key = AccessorKeyRef {
            owner: owner.ty_id(),
            member,
            value: TypeId::of::<GetFn>(),
        };
        self.readers
            .get_or_try_insert_with(&key, AccessorKeyRef::to_key, || {
                let info = AccessorBuilder::new(owner, member).member_info(AccessMode::Read)?;
                info.getter().ok_or_else(|| AccessError::MemberNotFound {
                    type_path: owner.path(),
                    member: member.to_owned(),
                    mode: AccessMode::Read,
                })
            })
    }

    // -------------------------------------------------------------------------
    // Properties

    /// Reads `member` of `instance` as a `T`.
    ///
    /// A `None` instance returns `T::default()` and never fails.
    pub fn get_property<T: Typed + Reflect + Clone + Default>(
        &self,
        instance: Option<&dyn Reflect>,
        member: &str,
    ) -> Result<T, AccessError> {
        let Some(instance) = instance else {
            return Ok(T::default());
        };
        let owner = instance.reflect_type_info();
        let getter = self.getter::<T>(owner, member)?;
        getter(instance).ok_or_else(|| AccessError::NotCloneable {
            type_path: owner.path(),
            member: member.to_owned(),
        })
    }

    /// Writes `value` into `member` of `instance`.
    ///
    /// Every error is raised before `instance` is modified.
    pub fn set_property<T: Typed + Reflect>(
        &self,
        instance: &mut dyn Reflect,
        member: &str,
        value: T,
    ) -> Result<(), AccessError> {
        let setter = self.setter::<T>(instance.reflect_type_info(), member)?;
        setter(instance, value)
    }

    /// Borrows `member` out of `instance` without knowing its type.
    pub fn member_ref<'a>(
        &self,
        instance: &'a dyn Reflect,
        member: &str,
    ) -> Result<&'a dyn Reflect, AccessError> {
        let owner = instance.reflect_type_info();
        let read = self.reader(owner, member)?;
        read(instance).ok_or_else(|| UnexpectedTypeError::new(Some(instance), [owner]).into())
    }

    /// Reads `member` of `instance` as an untyped value.
    ///
    /// An empty member name reads the instance itself. Returns `Ok(None)` for a
    /// `None` instance.
    pub fn get_property_boxed(
        &self,
        instance: Option<&dyn Reflect>,
        member: &str,
    ) -> Result<Option<Box<dyn Reflect>>, AccessError> {
        let Some(instance) = instance else {
            return Ok(None);
        };
        let value = if member.is_empty() {
            instance
        } else {
            self.member_ref(instance, member)?
        };
        value.reflect_clone().map(Some).ok_or_else(|| AccessError::NotCloneable {
            type_path: instance.reflect_type_info().path(),
            member: member.to_owned(),
        })
    }

    /// Reads a string member of `instance`.
    ///
    /// An empty member name prints the instance itself with [`print_value`].
    /// Both `String` and `Option<String>` members are accepted.
    pub fn get_property_string(
        &self,
        instance: Option<&dyn Reflect>,
        member: &str,
    ) -> Result<Option<String>, AccessError> {
        let Some(instance) = instance else {
            return Ok(None);
        };
        if member.is_empty() {
            return Ok(print_value(instance));
        }
        let declared = AccessorBuilder::new(instance.reflect_type_info(), member)
            .member_info(AccessMode::Read)?;
        if declared.type_is::<Option<String>>() {
            self.get_property::<Option<String>>(Some(instance), member)
        } else {
            self.get_property::<String>(Some(instance), member).map(Some)
        }
    }

    // -------------------------------------------------------------------------
    // Member copy

    /// Copies every readable and writable member of `src` into `dst`.
    ///
    /// All values are cloned before the first write, so a member that cannot
    /// be cloned leaves `dst` untouched.
    pub fn member_copy<T: Typed + Reflect>(&self, src: &T, dst: &mut T) -> Result<(), AccessError> {
        let plan = self
            .plans
            .get_or_insert_with(&TypeId::of::<T>(), |id| *id, || {
                Arc::new(CopyPlan::new(T::type_info()))
            });
        plan.copy(src, dst)
    }
}

impl Default for AccessorCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AccessorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorCache")
            .field("getters", &self.getters.len())
            .field("setters", &self.setters.len())
            .field("readers", &self.readers.len())
            .field("plans", &self.plans.len())
            .finish()
    }
}
