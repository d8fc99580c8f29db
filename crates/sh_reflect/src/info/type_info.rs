use core::any::{Any, TypeId};
use core::fmt;

use sh_utils::hash::HashMap;

use crate::Reflect;
use crate::info::{MemberInfo, Scalar, Type, Typed};

// -----------------------------------------------------------------------------
// NullableInfo

/// Information for `Option<T>`.
#[derive(Clone, Copy)]
pub struct NullableInfo {
    inner: fn() -> &'static TypeInfo,
    wrap: fn(Box<dyn Reflect>) -> Option<Box<dyn Reflect>>,
    unwrap: fn(&dyn Reflect) -> Option<&dyn Reflect>,
}

impl NullableInfo {
    /// Creates the information of `Option<T>`.
    pub fn new<T: Typed + Reflect>() -> Self {
        Self {
            inner: T::type_info,
            wrap: wrap_some::<T>,
            unwrap: unwrap_some::<T>,
        }
    }

    /// Returns the [`TypeInfo`] of the wrapped type.
    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// Boxes an inner value into `Some`.
    ///
    /// Returns `None` if `value` is not of the wrapped type.
    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
        (self.wrap)(value)
    }

    /// Borrows the inner value of a `Some`.
    ///
    /// Returns `None` for `None`, or when `value` is not of this option type.
    #[inline]
    pub fn unwrap<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        (self.unwrap)(value)
    }
}

fn wrap_some<T: Typed + Reflect>(value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
    value
        .take::<T>()
        .ok()
        .map(|inner| Box::new(Some(inner)) as Box<dyn Reflect>)
}

fn unwrap_some<T: Reflect>(value: &dyn Reflect) -> Option<&dyn Reflect> {
    value
        .downcast_ref::<Option<T>>()?
        .as_ref()
        .map(|inner| inner as &dyn Reflect)
}

// -----------------------------------------------------------------------------
// CollectionInfo

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Vec,
    VecDeque,
    /// `[T; N]`, with its length.
    Array(usize),
    HashSet,
    BTreeSet,
}

/// Information for sequence and set types.
#[derive(Clone, Copy)]
pub struct CollectionInfo {
    kind: CollectionKind,
    item: fn() -> &'static TypeInfo,
}

impl CollectionInfo {
    #[inline]
    pub fn new<T: Typed>(kind: CollectionKind) -> Self {
        Self {
            kind,
            item: T::type_info,
        }
    }

    #[inline]
    pub const fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Returns the [`TypeInfo`] of the item type.
    #[inline]
    pub fn item(&self) -> &'static TypeInfo {
        (self.item)()
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// Information for a named struct.
///
/// # Examples
///
/// ```
/// use sh_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct A {
///     val: f32,
///     tag: String,
/// }
///
/// let info = <A as Typed>::type_info().as_struct().unwrap();
///
/// assert_eq!(info.len(), 2);
/// assert_eq!(info.index_of("tag"), Some(1));
/// ```
#[derive(Clone)]
pub struct StructInfo {
    members: Box<[MemberInfo]>,
    indices: HashMap<&'static str, usize>,
}

impl StructInfo {
    /// Creates a new [`StructInfo`].
    ///
    /// The member order is the input order.
    pub fn new(members: &[MemberInfo]) -> Self {
        let indices = members
            .iter()
            .enumerate()
            .map(|(index, member)| (member.name(), index))
            .collect();
        Self {
            members: members.into(),
            indices,
        }
    }

    /// Returns the [`MemberInfo`] for the given `name`, if present.
    #[inline]
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.get(*self.indices.get(name)?)
    }

    /// Returns the [`MemberInfo`] at the given index, if present.
    #[inline]
    pub fn member_at(&self, index: usize) -> Option<&MemberInfo> {
        self.members.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns an iterator over the members in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MemberInfo> {
        self.members.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// -----------------------------------------------------------------------------
// TypeKind

/// The shape of a reflected type.
#[derive(Clone)]
pub enum TypeKind {
    Scalar(Scalar),
    Nullable(NullableInfo),
    Collection(CollectionInfo),
    Struct(StructInfo),
    /// A type without a visible structure.
    Opaque,
}

impl fmt::Debug for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            Self::Nullable(info) => f.debug_tuple("Nullable").field(&info.inner().path()).finish(),
            Self::Collection(info) => f
                .debug_struct("Collection")
                .field("kind", &info.kind())
                .field("item", &info.item().path())
                .finish(),
            Self::Struct(info) => f.debug_list().entries(info.iter()).finish(),
            Self::Opaque => f.write_str("Opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information for a reflected type.
///
/// # Content
///
/// - **ty**: the [`TypeId`], full path and short name.
/// - **kind**: the [`TypeKind`], e.g. a scalar or a struct with its members.
/// - **ordered**: whether values of the type can be ordered with
///   [`Reflect::reflect_partial_cmp`].
/// - **default**: an optional constructor for the default value.
///
/// # Obtain
///
/// - If you know the type at compile time, use [`Typed::type_info`].
/// - If you have a `dyn Reflect`, use [`DynamicTyped::reflect_type_info`].
/// - If all you have is a [`TypeId`] or a name, use the [`TypeRegistry`].
///
/// [`DynamicTyped::reflect_type_info`]: crate::info::DynamicTyped::reflect_type_info
/// [`TypeRegistry`]: crate::registry::TypeRegistry
#[derive(Clone)]
pub struct TypeInfo {
    ty: Type,
    kind: TypeKind,
    ordered: bool,
    default: Option<fn() -> Box<dyn Reflect>>,
}

impl TypeInfo {
    /// Creates the information of `T`.
    ///
    /// The type is unordered and has no default until
    /// [`with_ordering`](Self::with_ordering) and
    /// [`with_default`](Self::with_default) say otherwise.
    #[inline]
    pub fn new<T: Any>(kind: TypeKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            ordered: false,
            default: None,
        }
    }

    #[inline]
    pub fn with_ordering(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    /// Sets the constructor of the default value, usually [`default_of::<T>`].
    #[inline]
    pub fn with_default(mut self, default: fn() -> Box<dyn Reflect>) -> Self {
        self.default = Some(default);
        self
    }

    #[inline(always)]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline(always)]
    pub const fn ty_id(&self) -> TypeId {
        self.ty.id()
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty.is::<T>()
    }

    /// See [`Type::path`].
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.ty.path()
    }

    /// See [`Type::name`].
    #[inline]
    pub fn name(&self) -> &str {
        self.ty.name()
    }

    #[inline(always)]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Returns `true` if values of this type can be ordered.
    #[inline]
    pub const fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Returns `true` if this type has a default value.
    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Builds the default value of this type.
    #[inline]
    pub fn create_default(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|f| f())
    }

    pub const fn as_scalar(&self) -> Option<Scalar> {
        match self.kind {
            TypeKind::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub const fn as_nullable(&self) -> Option<&NullableInfo> {
        match &self.kind {
            TypeKind::Nullable(info) => Some(info),
            _ => None,
        }
    }

    pub const fn as_collection(&self) -> Option<&CollectionInfo> {
        match &self.kind {
            TypeKind::Collection(info) => Some(info),
            _ => None,
        }
    }

    pub const fn as_struct(&self) -> Option<&StructInfo> {
        match &self.kind {
            TypeKind::Struct(info) => Some(info),
            _ => None,
        }
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("ty", &self.ty)
            .field("kind", &self.kind)
            .field("ordered", &self.ordered)
            .finish_non_exhaustive()
    }
}

/// Boxes the default value of `T`.
///
/// Used with [`TypeInfo::with_default`].
pub fn default_of<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}
