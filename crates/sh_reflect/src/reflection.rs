use core::any::{Any, TypeId};
use core::cmp::Ordering;
use core::fmt;

use crate::info::{DynamicTyped, TypeInfo};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime member access.
///
/// A `dyn Reflect` is the untyped instance handle accessors operate on. It
/// knows its own [`TypeInfo`] (through [`DynamicTyped`]) and can be downcast
/// back to its concrete type.
///
/// # Recommendations
///
/// Use [the derive macro] for structs. Scalars, `Option<T>` and the common
/// collections are implemented by this crate.
///
/// # Type Identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the id of the box. Use
/// [`Reflect::ty_id`] instead:
///
/// ```
/// # use sh_reflect::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = Box::new(32_i32);
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
///
/// # Optional capabilities
///
/// `reflect_clone`, `reflect_partial_eq`, `reflect_partial_cmp` and
/// `reflect_display` return `None` unless the type opts in. The derive
/// macro opts in through the `clone`, `partial_eq`, `partial_cmp` and
/// `display` flags.
///
/// [the derive macro]: crate::derive::Reflect
pub trait Reflect: DynamicTyped + Send + Sync + Any {
    /// Casts this type to a reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as a reflected value.
    ///
    /// ```
    /// use sh_reflect::Reflect;
    ///
    /// let r = 32_u8.into_boxed_reflect();
    /// assert!(r.is::<u8>());
    /// ```
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Performs a type-checked assignment.
    ///
    /// Returns the value back if its type is not `Self`.
    ///
    /// ```
    /// # use sh_reflect::Reflect;
    /// let mut x = 1_i64;
    /// assert!(x.set(Box::new(5_i64)).is_ok());
    /// assert!(x.set(Box::new(5_i32)).is_err());
    /// assert_eq!(x, 5);
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Clones the value behind the handle, when the type supports it.
    #[inline]
    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        None
    }

    /// Compares two reflected values for equality.
    ///
    /// `None` means the type does not support comparison.
    #[inline]
    fn reflect_partial_eq(&self, _other: &dyn Reflect) -> Option<bool> {
        None
    }

    /// Orders two reflected values.
    ///
    /// `None` means the values are unordered, of different types, or
    /// the type does not support ordering.
    #[inline]
    fn reflect_partial_cmp(&self, _other: &dyn Reflect) -> Option<Ordering> {
        None
    }

    /// Renders the value for display, when the type supports it.
    #[inline]
    fn reflect_display(&self) -> Option<String> {
        None
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// ```
    /// # use sh_reflect::Reflect;
    /// let value: Box<dyn Reflect> = Box::new(String::from("abc"));
    /// assert_eq!(value.take::<String>().unwrap(), "abc");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }

    /// Shorthand for [`DynamicTyped::reflect_type_info`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.reflect_type_info()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect_display() {
            Some(text) => write!(f, "{}({text})", self.reflect_type_info().name()),
            None => write!(f, "{}(..)", self.reflect_type_info().name()),
        }
    }
}
