use uuid::Uuid;

crate::impls::impl_scalar_reflect! {
    Uuid => Uuid,
}
