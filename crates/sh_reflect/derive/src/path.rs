//! Paths into `sh_reflect` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `sh_reflect` crate.
///
/// 1. For crates that depend on `sh_reflect`, `::sh_reflect` is returned.
/// 2. For crates that depend on `sh_core`, `::sh_core::reflect` is returned.
/// 3. Otherwise `::sh_reflect` is returned, which may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so it is called once per derive and
/// the path is passed around afterwards.
pub(crate) fn sh_reflect() -> syn::Path {
    sh_macro_utils::Manifest::shared_crate_path("sh_reflect")
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn reflect_(sh_reflect_path: &syn::Path) -> TokenStream {
    quote! { #sh_reflect_path::Reflect }
}

#[inline(always)]
pub(crate) fn typed_(sh_reflect_path: &syn::Path) -> TokenStream {
    quote! { #sh_reflect_path::info::Typed }
}

#[inline(always)]
pub(crate) fn type_info_(sh_reflect_path: &syn::Path) -> TokenStream {
    quote! { #sh_reflect_path::info::TypeInfo }
}

#[inline(always)]
pub(crate) fn type_kind_(sh_reflect_path: &syn::Path) -> TokenStream {
    quote! { #sh_reflect_path::info::TypeKind }
}

#[inline(always)]
pub(crate) fn struct_info_(sh_reflect_path: &syn::Path) -> TokenStream {
    quote! { #sh_reflect_path::info::StructInfo }
}

#[inline(always)]
pub(crate) fn member_info_(sh_reflect_path: &syn::Path) -> TokenStream {
    quote! { #sh_reflect_path::info::MemberInfo }
}

#[inline(always)]
pub(crate) fn default_of_(sh_reflect_path: &syn::Path) -> TokenStream {
    quote! { #sh_reflect_path::info::default_of }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(sh_reflect_path: &syn::Path) -> TokenStream {
    quote! { #sh_reflect_path::impls::NonGenericTypeInfoCell }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(sh_reflect_path: &syn::Path) -> TokenStream {
    quote! { #sh_reflect_path::impls::GenericTypeInfoCell }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(sh_reflect_path: &syn::Path) -> TokenStream {
    quote! { #sh_reflect_path::__macro_exports::auto_register }
}
