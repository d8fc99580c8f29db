use crate::derive_data::ReflectMeta;

/// Generate `auto_register` implementation.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &ReflectMeta) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    let Some(span) = meta.attrs().auto_register else {
        return crate::utils::empty();
    };
    // Invalid for generic types.
    if meta.impl_with_generic() {
        return crate::utils::empty();
    }

    let sh_reflect_path = meta.sh_reflect_path();
    let auto_register_ = crate::path::auto_register_(sh_reflect_path);
    let typed_ = crate::path::typed_(sh_reflect_path);
    let ident = meta.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::AutoRegistration(<#ident as #typed_>::type_info)
        }
    }
}

/// Generate `auto_register` implementation.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectMeta) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
