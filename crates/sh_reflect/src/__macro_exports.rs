//! Items the derive macro refers to. Not public API.

crate::cfg::auto_register! {
    pub mod auto_register {
        use crate::info::TypeInfo;

        pub use inventory;

        /// One type submitted by `#[reflect(auto_register)]`.
        pub struct AutoRegistration(pub fn() -> &'static TypeInfo);

        inventory::collect!(AutoRegistration);

        pub(crate) fn registrations() -> impl Iterator<Item = &'static AutoRegistration> {
            inventory::iter::<AutoRegistration>.into_iter()
        }
    }
}
