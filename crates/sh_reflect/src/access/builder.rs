use std::sync::Arc;

use crate::Reflect;
use crate::access::{AccessError, AccessMode};
use crate::convert::Conversion;
use crate::info::{MemberInfo, TypeInfo, Typed};
use crate::narrow::UnexpectedTypeError;

// -----------------------------------------------------------------------------
// Accessor

/// Reads a member as a `T`.
///
/// Returns `None` when the instance is not of the owning type, or when the
/// member value cannot be cloned.
pub type Getter<T> = Arc<dyn Fn(&dyn Reflect) -> Option<T> + Send + Sync>;

/// Writes a `T` into a member.
///
/// Fails before any mutation when the instance is not of the owning type.
pub type Setter<T> = Arc<dyn Fn(&mut dyn Reflect, T) -> Result<(), AccessError> + Send + Sync>;

/// A getter and a setter for one member, both working with values of `T`.
pub struct Accessor<T> {
    pub getter: Getter<T>,
    pub setter: Setter<T>,
}

impl<T> Accessor<T> {
    #[inline]
    pub fn get(&self, instance: &dyn Reflect) -> Option<T> {
        (self.getter)(instance)
    }

    #[inline]
    pub fn set(&self, instance: &mut dyn Reflect, value: T) -> Result<(), AccessError> {
        (self.setter)(instance, value)
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        Self {
            getter: Arc::clone(&self.getter),
            setter: Arc::clone(&self.setter),
        }
    }
}

// -----------------------------------------------------------------------------
// AccessorBuilder

/// Builds typed accessors for one member of one type.
///
/// Every check happens here: a missing member, a member that is not readable
/// or writable, or a member type without a legal [`Conversion`] to the
/// requested type fails the build. The built closures only dispatch through the
/// member's function pointers.
///
/// Building has no side effects; use an [`AccessorCache`] to keep the results.
///
/// # Examples
///
/// ```
/// use sh_reflect::{access::AccessorBuilder, derive::Reflect};
///
/// #[derive(Reflect)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let y = AccessorBuilder::of::<Point>("y").getter::<i64>().unwrap();
///
/// let mut p = Point { x: 1, y: 2 };
/// assert_eq!(y(&p), Some(2_i64));
///
/// // `i64` does not fit in `i32`, so there is no setter.
/// assert!(AccessorBuilder::of::<Point>("y").setter::<i64>().is_err());
///
/// AccessorBuilder::of::<Point>("x").setter::<i8>().unwrap()(&mut p, -3).unwrap();
/// assert_eq!(p.x, -3);
/// ```
///
/// [`AccessorCache`]: crate::access::AccessorCache
#[derive(Debug, Clone)]
pub struct AccessorBuilder<'a> {
    owner: &'static TypeInfo,
    member: &'a str,
}

impl<'a> AccessorBuilder<'a> {
    #[inline]
    pub fn new(owner: &'static TypeInfo, member: &'a str) -> Self {
        Self { owner, member }
    }

    #[inline]
    pub fn of<O: Typed>(member: &'a str) -> Self {
        Self::new(O::type_info(), member)
    }

    /// Returns the [`TypeInfo`] of the owning type.
    #[inline]
    pub fn owner(&self) -> &'static TypeInfo {
        self.owner
    }

    /// Finds the member, checking that it supports `mode`.
    pub fn member_info(&self, mode: AccessMode) -> Result<&'static MemberInfo, AccessError> {
        self.owner
            .as_struct()
            .and_then(|info| info.member(self.member))
            .filter(|member| match mode {
                AccessMode::Read => member.is_readable(),
                AccessMode::Write => member.is_writable(),
            })
            .ok_or_else(|| AccessError::MemberNotFound {
                type_path: self.owner.path(),
                member: self.member.to_owned(),
                mode,
            })
    }

    fn mismatch(&self, member: &MemberInfo, requested: &'static TypeInfo) -> AccessError {
        AccessError::TypeMismatch {
            type_path: self.owner.path(),
            member: self.member.to_owned(),
            member_type: member.type_info().path(),
            requested: requested.path(),
        }
    }

    /// Builds a getter reading the member as a `T`.
    pub fn getter<T: Typed + Reflect + Clone>(&self) -> Result<Getter<T>, AccessError> {
        let member = self.member_info(AccessMode::Read)?;
        let conversion = Conversion::resolve(member.type_info(), T::type_info())
            .ok_or_else(|| self.mismatch(member, T::type_info()))?;

        let getter: Getter<T> = match conversion {
            Conversion::Identity => {
                Arc::new(move |instance: &dyn Reflect| {
                    member.read(instance)?.downcast_ref::<T>().cloned()
                })
            }
            conversion => Arc::new(move |instance: &dyn Reflect| {
                conversion
                    .apply(member.read(instance)?)?
                    .take::<T>()
                    .ok()
            }),
        };
        Ok(getter)
    }

    /// Builds a setter writing a `T` into the member.
    pub fn setter<T: Typed + Reflect>(&self) -> Result<Setter<T>, AccessError> {
        let member = self.member_info(AccessMode::Write)?;
        let conversion = Conversion::resolve(T::type_info(), member.type_info())
            .ok_or_else(|| self.mismatch(member, T::type_info()))?;
        let owner = self.owner;

        let setter: Setter<T> = match conversion {
            Conversion::Identity => Arc::new(
                move |instance: &mut dyn Reflect, value: T| -> Result<(), AccessError> {
                    check_owner(owner, instance)?;
                    let slot = member
                        .write(instance)
                        .and_then(|slot| slot.downcast_mut::<T>())
                        .ok_or_else(|| unexpected_member(member))?;
                    *slot = value;
                    Ok(())
                },
            ),
            conversion => Arc::new(
                move |instance: &mut dyn Reflect, value: T| -> Result<(), AccessError> {
                    check_owner(owner, instance)?;
                    let converted = conversion
                        .apply_owned(Box::new(value))
                        .ok_or_else(|| unexpected_member(member))?;
                    let slot = member
                        .write(instance)
                        .ok_or_else(|| unexpected_member(member))?;
                    slot.set(converted).map_err(|rejected| {
                        UnexpectedTypeError::new(Some(&*rejected), [member.type_info()]).into()
                    })
                },
            ),
        };
        Ok(setter)
    }

    /// Builds both the getter and the setter.
    pub fn build<T: Typed + Reflect + Clone>(&self) -> Result<Accessor<T>, AccessError> {
        Ok(Accessor {
            getter: self.getter()?,
            setter: self.setter()?,
        })
    }
}

fn check_owner(owner: &'static TypeInfo, instance: &dyn Reflect) -> Result<(), AccessError> {
    if instance.ty_id() == owner.ty_id() {
        Ok(())
    } else {
        Err(UnexpectedTypeError::new(Some(instance), [owner]).into())
    }
}

fn unexpected_member(member: &MemberInfo) -> AccessError {
    UnexpectedTypeError::new(None, [member.type_info()]).into()
}

#[cfg(test)]
mod tests {
    use super::AccessorBuilder;
    use crate::access::{AccessError, AccessMode};
    use crate::derive::Reflect;

    #[derive(Reflect, Default)]
    struct Sample {
        count: u16,
        label: String,
        maybe: Option<u32>,
        #[reflect(readonly)]
        fixed: u8,
    }

    #[test]
    fn widening_getter_and_wrapping_setter() {
        let mut sample = Sample {
            count: 7,
            ..Sample::default()
        };

        let count = AccessorBuilder::of::<Sample>("count").getter::<u64>().unwrap();
        assert_eq!(count(&sample), Some(7));

        let maybe = AccessorBuilder::of::<Sample>("maybe").setter::<u8>().unwrap();
        maybe(&mut sample, 200).unwrap();
        assert_eq!(sample.maybe, Some(200));
    }

    #[test]
    fn build_fails_on_missing_or_readonly_member() {
        let missing = AccessorBuilder::of::<Sample>("nope").getter::<u8>().err();
        assert!(matches!(
            missing,
            Some(AccessError::MemberNotFound { mode: AccessMode::Read, .. })
        ));

        let readonly = AccessorBuilder::of::<Sample>("fixed").setter::<u8>().err();
        assert!(matches!(
            readonly,
            Some(AccessError::MemberNotFound { mode: AccessMode::Write, .. })
        ));
        assert!(AccessorBuilder::of::<Sample>("fixed").getter::<u8>().is_ok());
    }

    #[test]
    fn build_fails_on_type_mismatch() {
        let err = AccessorBuilder::of::<Sample>("label").getter::<u32>().err();
        let Some(AccessError::TypeMismatch { member, member_type, .. }) = err else {
            panic!("expected a type mismatch, got {err:?}");
        };
        assert_eq!(member, "label");
        assert_eq!(member_type, "alloc::string::String");
    }

    #[test]
    fn setter_rejects_foreign_instance() {
        let setter = AccessorBuilder::of::<Sample>("count").setter::<u16>().unwrap();
        let mut other = 5_u16;
        let err = setter(&mut other, 1).unwrap_err();
        assert!(matches!(err, AccessError::Unexpected(_)));
        assert_eq!(other, 5);
    }
}
