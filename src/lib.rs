//! Memoized runtime member access and predicate expressions.
//!
//! This facade re-exports the workspace crates:
//!
//! - [`reflect`]: `#[derive(Reflect)]`, the accessor cache and type classification.
//! - [`expr`]: expression trees, predicate combination and in-memory queries.
//! - [`utils`]: the concurrent keyed cache and hashing helpers.
//! - [`cfg`]: compilation control macros.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use sh_cfg as cfg;
pub use sh_expr as expr;
pub use sh_reflect as reflect;
pub use sh_utils as utils;
