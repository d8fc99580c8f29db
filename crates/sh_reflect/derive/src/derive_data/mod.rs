//! Parsed form of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod reflect_derive;
mod reflect_meta;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use reflect_derive::{ReflectDerive, ReflectField, ReflectKind};
pub(crate) use reflect_meta::ReflectMeta;
