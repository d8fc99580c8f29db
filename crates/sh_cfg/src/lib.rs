//! Compile-time configuration helpers shared by the `sh_*` crates.
//!
//! Each crate declares its own `cfg` module with [`define_alias!`], which turns
//! a `#[cfg(...)]` predicate into a macro of the same name:
//!
//! ```
//! mod cfg {
//!     sh_cfg::define_alias! {
//!         #[cfg(test)] => testing,
//!         #[cfg(debug_assertions)] => debug,
//!     }
//! }
//!
//! // Item position: the body is kept only when the predicate holds.
//! cfg::debug! {
//!     fn only_in_debug() {}
//! }
//!
//! // Expression position: expands to a `bool` literal.
//! let _in_test: bool = cfg::testing!();
//!
//! // Either branch, picked at compile time.
//! fn mode() -> &'static str {
//!     cfg::debug! {
//!         if { "debug" } else { "release" }
//!     }
//! }
//! # let _ = mode();
//! ```
#![no_std]

/// Declares one alias macro per `#[cfg(...)] => name` pair.
///
/// The alias re-exports [`enabled!`] when the predicate holds and
/// [`disabled!`] otherwise.
#[macro_export]
macro_rules! define_alias {
    ($(#[cfg($meta:meta)] => $alias:ident),+ $(,)?) => {
        $(
            #[cfg($meta)]
            #[doc(hidden)]
            pub use $crate::enabled as $alias;

            #[cfg(not($meta))]
            #[doc(hidden)]
            pub use $crate::disabled as $alias;
        )+
    };
}

/// Keeps its input, or expands to `true` when called without input.
///
/// The `if { .. } else { .. }` form keeps the first block.
#[macro_export]
#[doc(hidden)]
macro_rules! enabled {
    () => {
        true
    };
    (if { $($then:tt)* } else { $($else:tt)* }) => {
        { $($then)* }
    };
    ($($tokens:tt)*) => {
        $($tokens)*
    };
}

/// Drops its input, or expands to `false` when called without input.
///
/// The `if { .. } else { .. }` form keeps the second block.
#[macro_export]
#[doc(hidden)]
macro_rules! disabled {
    () => {
        false
    };
    (if { $($then:tt)* } else { $($else:tt)* }) => {
        { $($else)* }
    };
    ($($tokens:tt)*) => {};
}
