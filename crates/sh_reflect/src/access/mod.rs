//! Typed member access for reflected values.
//!
//! - [`AccessorBuilder`]: builds a [`Getter`], a [`Setter`] or both for one
//!   member, resolving the [`Conversion`](crate::convert::Conversion) up front.
//! - [`AccessorCache`]: memoizes built accessors per `(type, member, value type)`,
//!   and provides `get_property`, `set_property` and their untyped forms.
//! - [`CopyPlan`]: the members copied by [`AccessorCache::member_copy`].
//! - [`print_value`] and [`create_new`]: display and default construction.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod cache;
mod copy;
mod error;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use builder::{Accessor, AccessorBuilder, Getter, Setter};
pub use cache::AccessorCache;
pub use copy::CopyPlan;
pub use error::{AccessError, AccessMode};
pub use value::{create_new, print_value};
