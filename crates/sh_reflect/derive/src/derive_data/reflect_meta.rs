use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, ImplGenerics, Path, TypeGenerics, WhereClause};

use super::TypeAttributes;

/// Everything the generated impls need to know about the derived type,
/// apart from its members.
pub(crate) struct ReflectMeta<'a> {
    sh_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("sh_reflect_path", &self.sh_reflect_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> syn::Result<Self> {
        if let Some(lifetime) = generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "`Reflect` cannot be derived for types with lifetime parameters",
            ));
        }

        Ok(Self {
            sh_reflect_path: crate::path::sh_reflect(),
            attrs,
            ident,
            generics,
        })
    }

    #[inline]
    pub fn sh_reflect_path(&self) -> &Path {
        &self.sh_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    /// Whether `Typed` must cache one `TypeInfo` per instantiation.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }

    /// Splits generics for an impl block, adding `Typed + Reflect` bounds to
    /// every type parameter.
    pub fn split_generics(&self) -> (ImplGenerics<'a>, TypeGenerics<'a>, Option<WhereClause>) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let typed_ = crate::path::typed_(&self.sh_reflect_path);
        let reflect_ = crate::path::reflect_(&self.sh_reflect_path);

        let bounds: Vec<TokenStream> = self
            .generics
            .type_params()
            .map(|param| {
                let ident = &param.ident;
                quote! { #ident: #typed_ + #reflect_ }
            })
            .collect();

        if bounds.is_empty() {
            return (impl_generics, ty_generics, where_clause.cloned());
        }

        let mut where_clause = where_clause.cloned().unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });
        for bound in bounds {
            where_clause.predicates.push(syn::parse_quote!(#bound));
        }
        (impl_generics, ty_generics, Some(where_clause))
    }
}
