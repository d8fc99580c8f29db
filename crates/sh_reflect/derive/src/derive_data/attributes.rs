use proc_macro2::Span;
use syn::Attribute;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Helpers

fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate reflect attribute"));
    }
    *slot = Some(meta.path.span());
    Ok(())
}

fn reflect_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME))
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type-level `#[reflect(..)]` flags.
///
/// Each flag stores the span it was written at, for error reporting.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub clone: Option<Span>,
    pub default: Option<Span>,
    pub partial_eq: Option<Span>,
    pub partial_cmp: Option<Span>,
    pub display: Option<Span>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| this.parse_meta(&meta))?;
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected a reflect flag"));
        };
        match ident.to_string().as_str() {
            "clone" => set_flag(&mut self.clone, meta),
            "default" => set_flag(&mut self.default, meta),
            "partial_eq" => set_flag(&mut self.partial_eq, meta),
            "partial_cmp" => set_flag(&mut self.partial_cmp, meta),
            "display" => set_flag(&mut self.display, meta),
            "auto_register" => set_flag(&mut self.auto_register, meta),
            "skip" | "readonly" | "writeonly" => {
                Err(meta.error(format_args!("`{ident}` can only be applied to fields")))
            }
            _ => Err(meta.error(format_args!("unknown reflect flag `{ident}`"))),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Which accessors a member gets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MemberAccess {
    #[default]
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

impl MemberAccess {
    #[inline]
    pub fn readable(self) -> bool {
        self != Self::WriteOnly
    }

    #[inline]
    pub fn writable(self) -> bool {
        self != Self::ReadOnly
    }
}

/// Field-level `#[reflect(..)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub access: MemberAccess,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        let mut access_span: Option<Span> = None;

        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                let Some(ident) = meta.path.get_ident() else {
                    return Err(meta.error("expected a reflect field attribute"));
                };
                let access = match ident.to_string().as_str() {
                    "skip" => {
                        if this.skip {
                            return Err(meta.error("duplicate reflect attribute"));
                        }
                        this.skip = true;
                        return Ok(());
                    }
                    "readonly" => MemberAccess::ReadOnly,
                    "writeonly" => MemberAccess::WriteOnly,
                    _ => {
                        return Err(meta.error(format_args!(
                            "unknown reflect field attribute `{ident}`"
                        )));
                    }
                };
                set_flag(&mut access_span, &meta)
                    .map_err(|_| meta.error("`readonly` and `writeonly` are exclusive"))?;
                this.access = access;
                Ok(())
            })?;
        }

        Ok(this)
    }
}
