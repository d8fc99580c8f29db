use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect` trait.
///
/// Optional methods are only overridden when the matching type flag is set.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta) -> TokenStream {
    let sh_reflect_path = meta.sh_reflect_path();
    let reflect_ = crate::path::reflect_(sh_reflect_path);
    let attrs = meta.attrs();

    let reflect_clone = attrs.clone.map(|span| {
        quote::quote_spanned! { span =>
            #[inline]
            fn reflect_clone(&self) -> ::core::option::Option<::std::boxed::Box<dyn #reflect_>> {
                ::core::option::Option::Some(::std::boxed::Box::new(
                    <Self as ::core::clone::Clone>::clone(self)
                ))
            }
        }
    });

    let reflect_partial_eq = attrs.partial_eq.map(|span| {
        quote::quote_spanned! { span =>
            fn reflect_partial_eq(&self, other: &dyn #reflect_) -> ::core::option::Option<bool> {
                ::core::option::Option::Some(
                    other
                        .downcast_ref::<Self>()
                        .is_some_and(|other| <Self as ::core::cmp::PartialEq>::eq(self, other)),
                )
            }
        }
    });

    let reflect_partial_cmp = attrs.partial_cmp.map(|span| {
        quote::quote_spanned! { span =>
            fn reflect_partial_cmp(
                &self,
                other: &dyn #reflect_,
            ) -> ::core::option::Option<::core::cmp::Ordering> {
                <Self as ::core::cmp::PartialOrd>::partial_cmp(self, other.downcast_ref::<Self>()?)
            }
        }
    });

    let reflect_display = attrs.display.map(|span| {
        quote::quote_spanned! { span =>
            fn reflect_display(&self) -> ::core::option::Option<::std::string::String> {
                ::core::option::Option::Some(::std::string::ToString::to_string(self))
            }
        }
    });

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn #reflect_>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #reflect_clone

            #reflect_partial_eq

            #reflect_partial_cmp

            #reflect_display
        }
    }
}
