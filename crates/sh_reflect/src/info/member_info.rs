use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::info::{TypeInfo, Typed};

/// Borrows one member out of an instance of the owning type.
///
/// Returns `None` when the instance is not of the owning type.
pub type GetFn = fn(&dyn Reflect) -> Option<&dyn Reflect>;

/// Mutably borrows one member out of an instance of the owning type.
pub type GetMutFn = fn(&mut dyn Reflect) -> Option<&mut dyn Reflect>;

// -----------------------------------------------------------------------------
// MemberInfo

/// Information for a named struct member.
///
/// A member is readable when it carries a [`GetFn`] and writable when it
/// carries a [`GetMutFn`]. `#[derive(Reflect)]` emits both for every field,
/// unless the field is marked `#[reflect(readonly)]` or `#[reflect(writeonly)]`.
///
/// # Examples
///
/// ```
/// use sh_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Foo {
///     field_a: f32,
///     #[reflect(readonly)]
///     field_b: u8,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
///
/// let a = info.member("field_a").unwrap();
/// assert!(a.type_is::<f32>());
/// assert!(a.is_readable() && a.is_writable());
///
/// let b = info.member("field_b").unwrap();
/// assert!(b.is_readable() && !b.is_writable());
/// ```
#[derive(Clone, Copy)]
pub struct MemberInfo {
    name: &'static str,
    ty_id: TypeId,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    get: Option<GetFn>,
    get_mut: Option<GetMutFn>,
}

impl MemberInfo {
    /// Creates a member of type `T` that is neither readable nor writable.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty_id: TypeId::of::<T>(),
            type_info: T::type_info,
            get: None,
            get_mut: None,
        }
    }

    /// Makes the member readable through `get`.
    #[inline]
    pub const fn with_getter(mut self, get: GetFn) -> Self {
        self.get = Some(get);
        self
    }

    /// Makes the member writable through `get_mut`.
    #[inline]
    pub const fn with_setter(mut self, get_mut: GetMutFn) -> Self {
        self.get_mut = Some(get_mut);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeId`] of the member's declared type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the member's declared type is `T`.
    #[inline]
    pub fn type_is<T: 'static>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the member's declared type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn is_readable(&self) -> bool {
        self.get.is_some()
    }

    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.get_mut.is_some()
    }

    #[inline]
    pub const fn getter(&self) -> Option<GetFn> {
        self.get
    }

    #[inline]
    pub const fn setter(&self) -> Option<GetMutFn> {
        self.get_mut
    }

    /// Borrows this member out of `instance`.
    ///
    /// Returns `None` if the member is not readable, or `instance` is not
    /// of the owning type.
    #[inline]
    pub fn read<'a>(&self, instance: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        (self.get?)(instance)
    }

    /// Mutably borrows this member out of `instance`.
    #[inline]
    pub fn write<'a>(&self, instance: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        (self.get_mut?)(instance)
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("type", &self.type_info().path())
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}
