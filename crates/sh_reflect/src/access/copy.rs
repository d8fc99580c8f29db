use crate::Reflect;
use crate::access::AccessError;
use crate::info::{MemberInfo, TypeInfo};

/// The members [`AccessorCache::member_copy`] copies for one type.
///
/// [`AccessorCache::member_copy`]: crate::access::AccessorCache::member_copy
#[derive(Debug)]
pub struct CopyPlan {
    owner: &'static TypeInfo,
    members: Vec<&'static MemberInfo>,
}

impl CopyPlan {
    /// Collects the members of `owner` that are both readable and writable.
    ///
    /// Types without members produce an empty plan.
    pub fn new(owner: &'static TypeInfo) -> Self {
        let members = owner
            .as_struct()
            .map(|info| {
                info.iter()
                    .filter(|member| member.is_readable() && member.is_writable())
                    .collect()
            })
            .unwrap_or_default();
        Self { owner, members }
    }

    #[inline]
    pub fn members(&self) -> impl ExactSizeIterator<Item = &'static MemberInfo> + '_ {
        self.members.iter().copied()
    }

    /// Copies the planned members of `src` into `dst`.
    pub fn copy(&self, src: &dyn Reflect, dst: &mut dyn Reflect) -> Result<(), AccessError> {
        let not_cloneable = |member: &MemberInfo| AccessError::NotCloneable {
            type_path: self.owner.path(),
            member: member.name().to_owned(),
        };

        let values = self
            .members
            .iter()
            .map(|member| {
                member
                    .read(src)
                    .and_then(|value| value.reflect_clone())
                    .ok_or_else(|| not_cloneable(member))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (member, value) in self.members.iter().zip(values) {
            let slot = member.write(dst).ok_or_else(|| not_cloneable(member))?;
            // Values were cloned from a member of the same declared type.
            slot.set(value).map_err(|_| not_cloneable(member))?;
        }
        Ok(())
    }
}
