// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use auto_register::get_auto_register_impl;
pub(crate) use trait_reflect::impl_trait_reflect;
pub(crate) use trait_typed::impl_trait_typed;
