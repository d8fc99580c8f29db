use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Automatically implemented by [`#[derive(Reflect)]`](crate::derive::Reflect),
/// allowing access to type information without an instance of the type.
///
/// # Examples
///
/// ```
/// use sh_reflect::{derive::Reflect, info::{Typed, TypeInfo}};
///
/// #[derive(Reflect)]
/// struct A {
///     val: u8,
/// }
///
/// let info: &'static TypeInfo = <A as Typed>::type_info();
/// assert!(info.as_struct().is_some());
/// ```
///
/// # Manually Impl
///
/// It is not recommended to implement manually. [`NonGenericTypeInfoCell`]
/// and [`GenericTypeInfoCell`] keep the returned reference `'static`:
///
/// ```
/// use sh_reflect::{
///     Reflect,
///     impls::NonGenericTypeInfoCell,
///     info::{Typed, TypeInfo, TypeKind},
/// };
///
/// struct Token(u64);
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::new::<Self>(TypeKind::Opaque))
///     }
/// }
/// # impl Reflect for Token {
/// #     fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
/// #         *self = value.take::<Self>()?;
/// #         Ok(())
/// #     }
/// # }
///
/// assert_eq!(Token::type_info().name(), "Token");
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: 'static {
    /// A static accessor to compile-time type information.
    ///
    /// Note: Use [`DynamicTyped`] for dynamic dispatch.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Provide dynamic dispatch for types that implement [`Typed`].
///
/// Auto impl for all types that implemented [`Typed`].
pub trait DynamicTyped {
    /// Returns the [`TypeInfo`] of the underlying type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sh_reflect::{derive::Reflect, Reflect, info::DynamicTyped};
    /// #[derive(Reflect)]
    /// struct A {
    ///     id: u64,
    /// }
    ///
    /// let a = Box::new(A { id: 1 }) as Box<dyn Reflect>;
    /// assert_eq!(a.reflect_type_info().name(), "A");
    /// ```
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
