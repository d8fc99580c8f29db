use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ReflectDerive, ReflectField, ReflectKind, ReflectMeta};

/// Generate implementation code for `Typed`.
///
/// Non-generic types keep their `TypeInfo` in a `NonGenericTypeInfoCell`,
/// generic types keep one per instantiation in a `GenericTypeInfoCell`.
pub(crate) fn impl_trait_typed(derive: &ReflectDerive) -> TokenStream {
    let meta = derive.meta();
    let sh_reflect_path = meta.sh_reflect_path();
    let trait_typed_ = crate::path::typed_(sh_reflect_path);
    let type_info_ = crate::path::type_info_(sh_reflect_path);

    let type_info_tokens = type_info_tokens(derive);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(sh_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(sh_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #trait_typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}

/// Similar to following:
///
/// ```ignore
/// TypeInfo::new::<Self>(TypeKind::Struct(StructInfo::new(&[ .. ])))
///     .with_ordering(false)
///     .with_default(default_of::<Self>)
/// ```
fn type_info_tokens(derive: &ReflectDerive) -> TokenStream {
    let meta = derive.meta();
    let sh_reflect_path = meta.sh_reflect_path();
    let type_info_ = crate::path::type_info_(sh_reflect_path);
    let type_kind_ = crate::path::type_kind_(sh_reflect_path);

    let kind = match derive.kind() {
        ReflectKind::Struct(fields) => {
            let struct_info_ = crate::path::struct_info_(sh_reflect_path);
            let members = fields.iter().map(|field| member_tokens(meta, field));
            quote! {
                #type_kind_::Struct(#struct_info_::new(&[ #(#members),* ]))
            }
        }
        ReflectKind::Opaque => quote! { #type_kind_::Opaque },
    };

    let ordered = meta.attrs().partial_cmp.is_some();
    let with_default = meta.attrs().default.map(|_| {
        let default_of_ = crate::path::default_of_(sh_reflect_path);
        quote! { .with_default(#default_of_::<Self>) }
    });

    quote! {
        #type_info_::new::<Self>(#kind)
            .with_ordering(#ordered)
            #with_default
    }
}

/// Similar to following:
///
/// ```ignore
/// MemberInfo::new::<u32>("id")
///     .with_getter(|this| Some(&this.downcast_ref::<Self>()?.id as &dyn Reflect))
///     .with_setter(|this| Some(&mut this.downcast_mut::<Self>()?.id as &mut dyn Reflect))
/// ```
fn member_tokens(meta: &ReflectMeta, field: &ReflectField) -> TokenStream {
    let sh_reflect_path = meta.sh_reflect_path();
    let member_info_ = crate::path::member_info_(sh_reflect_path);
    let reflect_ = crate::path::reflect_(sh_reflect_path);

    let ReflectField {
        ident, name, ty, attrs, ..
    } = field;

    let getter = attrs.access.readable().then(|| {
        quote! {
            .with_getter(|this| {
                ::core::option::Option::Some(
                    &this.downcast_ref::<Self>()?.#ident as &dyn #reflect_
                )
            })
        }
    });

    let setter = attrs.access.writable().then(|| {
        quote! {
            .with_setter(|this| {
                ::core::option::Option::Some(
                    &mut this.downcast_mut::<Self>()?.#ident as &mut dyn #reflect_
                )
            })
        }
    });

    quote! {
        #member_info_::new::<#ty>(#name)
            #getter
            #setter
    }
}
