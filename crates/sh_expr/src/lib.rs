//! Predicate expression trees over reflected values.
//!
//! An [`Expr`] is a small boolean expression language: parameters, constants,
//! member reads, comparisons and the logical connectives. A [`Lambda`] binds
//! parameters to a body, and a [`Predicate<T>`] is a one-parameter lambda over
//! a `T`.
//!
//! - [`combine`] joins two lambdas by rewriting the second one's parameters
//!   to the first one's, see [`ParameterRewriter`].
//! - [`Lambda::evaluate`] runs a lambda against `dyn Reflect` arguments,
//!   reading members through the global [`AccessorCache`].
//! - [`member`] extracts member paths (`name_of`, `type_of`).
//! - [`Query`] filters and orders a homogeneous list of reflected values.
//!
//! # Example
//!
//! ```
//! use sh_expr::{Expr, Predicate};
//! use sh_reflect::derive::Reflect;
//!
//! #[derive(Reflect)]
//! struct Reading {
//!     a: i32,
//!     b: i32,
//! }
//!
//! let x = Predicate::<Reading>::new("x", |x| x.member("a").gt(Expr::constant(0)));
//! let y = Predicate::<Reading>::new("y", |y| y.member("b").lt(Expr::constant(0)));
//! let both = x.and_also(&y);
//!
//! assert!(both.matches(&Reading { a: 1, b: -1 }).unwrap());
//! assert!(!both.matches(&Reading { a: 0, b: -1 }).unwrap());
//! assert_eq!(both.to_string(), "x => x.a > 0 && x.b < 0");
//! ```
//!
//! [`AccessorCache`]: sh_reflect::access::AccessorCache
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod combine;
mod error;
mod eval;
mod expr;
mod value;
mod visit;

pub mod member;
pub mod query;

// -----------------------------------------------------------------------------
// Exports

pub use combine::{LogicOp, Predicate, and_also, combine, or, or_else};
pub use error::ExprError;
pub use expr::{CompareOp, Expr, Lambda, Param, ParamId};
pub use query::{Query, SortDirection};
pub use value::Value;
pub use visit::{ExprVisitorMut, ParameterRewriter, visit_expr_mut};
