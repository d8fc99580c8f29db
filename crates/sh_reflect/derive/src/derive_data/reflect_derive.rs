use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Type};

use super::{FieldAttributes, ReflectMeta, TypeAttributes};

/// A named field that becomes a member.
pub(crate) struct ReflectField<'a> {
    pub ident: &'a Ident,
    /// Member name, without a raw identifier prefix.
    pub name: String,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

pub(crate) enum ReflectKind<'a> {
    /// A struct with named fields. Skipped fields are already removed.
    Struct(Vec<ReflectField<'a>>),
    /// Unit structs, tuple structs and enums.
    Opaque,
}

pub(crate) struct ReflectDerive<'a> {
    meta: ReflectMeta<'a>,
    kind: ReflectKind<'a>,
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = ReflectMeta::new(attrs, &input.ident, &input.generics)?;

        let kind = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => {
                    let mut members = Vec::with_capacity(fields.named.len());
                    for field in &fields.named {
                        let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
                        if attrs.skip {
                            continue;
                        }
                        // Named fields always carry an ident.
                        let Some(ident) = field.ident.as_ref() else {
                            continue;
                        };
                        members.push(ReflectField {
                            ident,
                            name: ident.unraw().to_string(),
                            ty: &field.ty,
                            attrs,
                        });
                    }
                    ReflectKind::Struct(members)
                }
                Fields::Unnamed(fields) => {
                    reject_field_attrs(fields.unnamed.iter().flat_map(|f| &f.attrs))?;
                    ReflectKind::Opaque
                }
                Fields::Unit => ReflectKind::Opaque,
            },
            Data::Enum(_) => ReflectKind::Opaque,
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Reflect` cannot be derived for unions",
                ));
            }
        };

        Ok(Self { meta, kind })
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn kind(&self) -> &ReflectKind<'a> {
        &self.kind
    }
}

fn reject_field_attrs<'a>(attrs: impl Iterator<Item = &'a syn::Attribute>) -> syn::Result<()> {
    for attr in attrs {
        if attr.path().is_ident(crate::REFLECT_ATTRIBUTE_NAME) {
            return Err(syn::Error::new_spanned(
                attr,
                "member attributes are only supported on named fields",
            ));
        }
    }
    Ok(())
}
