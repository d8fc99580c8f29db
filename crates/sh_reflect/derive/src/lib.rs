//! Derive macro for `sh_reflect`.
//!
//! See [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements `Typed` and `Reflect`.
///
/// Structs with named fields are described as `TypeKind::Struct`: every
/// field becomes a member with a compile-time getter and setter. Unit
/// structs, tuple structs and enums are described as `TypeKind::Opaque`,
/// they can be passed around as `dyn Reflect` but expose no members.
///
/// Lifetime parameters are not supported. Every type parameter must
/// implement `Typed + Reflect`.
///
/// ## Type Flags
///
/// The macro cannot see which standard traits a type implements, so
/// optional capabilities are opt-in:
///
/// - `clone`: `Clone`, enables `reflect_clone`.
/// - `default`: `Default`, enables `TypeInfo::create_default`.
/// - `partial_eq`: `PartialEq`, enables `reflect_partial_eq`.
/// - `partial_cmp`: `PartialOrd`, enables `reflect_partial_cmp` and marks the
///   type as ordered.
/// - `display`: `Display`, enables `reflect_display`.
///
/// ```rust, ignore
/// #[derive(Reflect, Clone, Default, PartialEq)]
/// #[reflect(clone, default, partial_eq)]
/// struct Point { x: i32, y: i32 }
/// ```
///
/// ## Auto Registration
///
/// `#[reflect(auto_register)]` submits the type to the global list that
/// `TypeRegistry::auto_register` collects. Generic types are ignored, and
/// the flag is a no-op without the `auto_register` feature.
///
/// ## Member Attributes
///
/// - `#[reflect(skip)]`: the field is not a member.
/// - `#[reflect(readonly)]`: the member has no setter.
/// - `#[reflect(writeonly)]`: the member has no getter.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct User {
///     name: String,
///     #[reflect(readonly)]
///     id: u64,
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let reflect_data = match derive_data::ReflectDerive::from_input(&ast) {
        Ok(data) => data,
        Err(err) => return err.into_compile_error().into(),
    };

    let typed_impl = impls::impl_trait_typed(&reflect_data);
    let reflect_impl = impls::impl_trait_reflect(reflect_data.meta());
    let auto_register = impls::get_auto_register_impl(reflect_data.meta());

    TokenStream::from(quote! {
        const _: () = {
            #typed_impl

            #reflect_impl
        };

        #auto_register
    })
}
