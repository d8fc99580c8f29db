//! Runtime member access for statically typed values.
//!
//! `#[derive(Reflect)]` emits, at compile time, a [`TypeInfo`] describing a
//! struct's members along with one getter and one setter function per member.
//! On top of that this crate provides:
//!
//! - [`access`]: typed getters and setters built once per
//!   `(type, member, value type)` and memoized in an [`AccessorCache`].
//! - [`classify`]: table-driven type classification (`is_int_number`, `is_date`, ...).
//! - [`convert`]: the lossless widening and nullable-wrapping conversions accessors may apply.
//! - [`narrow`]: checked narrowing of untyped values, reporting [`UnexpectedTypeError`].
//! - [`registry`]: lookup of [`TypeInfo`] by id, path or short name.
//!
//! # Example
//!
//! ```
//! use sh_reflect::{Reflect, access::AccessorCache, derive::Reflect};
//!
//! #[derive(Reflect, Default)]
//! struct Order {
//!     id: u32,
//!     total: f64,
//! }
//!
//! let cache = AccessorCache::new();
//! let mut order = Order::default();
//!
//! cache.set_property(&mut order, "id", 7_u32).unwrap();
//! // `u32` widens to `u64` on read.
//! let id: u64 = cache.get_property(Some(order.as_reflect()), "id").unwrap();
//! assert_eq!(id, 7);
//! ```
//!
//! [`TypeInfo`]: info::TypeInfo
//! [`AccessorCache`]: access::AccessorCache
//! [`UnexpectedTypeError`]: narrow::UnexpectedTypeError
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    sh_cfg::define_alias! {
        #[cfg(feature = "chrono")] => chrono,
        #[cfg(feature = "uuid")] => uuid,
        #[cfg(feature = "auto_register")] => auto_register,
        #[cfg(all(debug_assertions, feature = "debug"))] => debug,
    }
}

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::sh_reflect::...` paths, which must also resolve
// inside this crate's own tests and doc tests.
extern crate self as sh_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod access;
pub mod classify;
pub mod convert;
pub mod impls;
pub mod info;
pub mod narrow;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::Reflect;
pub use sh_reflect_derive as derive;
