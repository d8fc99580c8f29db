//! `Reflect` and `Typed` implementations for foreign types.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `char`, `i8`-`i128`, `isize`, `u8`-`u128`, `usize`,
//!   `f32`, `f64`, `String`, `&'static str`
//! - `Option<T>`
//! - collections: `Vec<T>`, `VecDeque<T>`, `[T; N]`, `HashSet<T>`, `BTreeSet<T>`
//! - chrono ("chrono" feature): `NaiveDate`, `NaiveDateTime`, `DateTime<Utc>`
//! - uuid ("uuid" feature): `Uuid`
//!
//! [`NonGenericTypeInfoCell`] and [`GenericTypeInfoCell`] are used to
//! implement [`Typed`](crate::info::Typed) by hand.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod collections;
mod option;
mod scalar;

crate::cfg::chrono! { mod chrono; }
crate::cfg::uuid! { mod uuid; }

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};

pub(crate) use scalar::impl_scalar_reflect;
