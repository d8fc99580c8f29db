//! Compile-time type information.
//!
//! ## Menu
//!
//! - [`Type`]: a [`TypeId`] with its full path and short display name.
//! - [`TypeInfo`]: the descriptor of one reflected type. Its [`TypeKind`] is one of:
//!     - [`Scalar`]: primitives, strings, dates and identifiers.
//!     - [`NullableInfo`]: `Option<T>`, with the wrapped type.
//!     - [`CollectionInfo`]: sequence and set types, with the item type.
//!     - [`StructInfo`]: named structs, with one [`MemberInfo`] per field.
//!     - `Opaque`: anything else.
//! - [`Typed`]: static access to a type's [`TypeInfo`].
//! - [`DynamicTyped`]: dynamic dispatch for [`Typed`].
//!
//! [`TypeId`]: core::any::TypeId

// -----------------------------------------------------------------------------
// Modules

mod member_info;
mod scalar;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use member_info::{GetFn, GetMutFn, MemberInfo};
pub use scalar::Scalar;
pub use ty::Type;
pub use type_info::{CollectionInfo, CollectionKind, NullableInfo, StructInfo};
pub use type_info::{TypeInfo, TypeKind, default_of};
pub use typed::{DynamicTyped, Typed};
