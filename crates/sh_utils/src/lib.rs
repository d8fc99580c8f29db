//! Containers shared by the `sh_*` crates.
//!
//! - [`hash`]: `hashbrown` containers with a fixed `foldhash` seed.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`KeyedCache`]: a thread-safe get-or-create map.
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod keyed_cache;
mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use keyed_cache::KeyedCache;
pub use typeid_map::TypeIdMap;
