use core::fmt;

use thiserror::Error;

use crate::narrow::UnexpectedTypeError;

// -----------------------------------------------------------------------------
// AccessMode

/// The kind of access an operation needs from a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    Read,
    Write,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.pad("readable"),
            Self::Write => f.pad("writable"),
        }
    }
}

// -----------------------------------------------------------------------------
// AccessError

/// Errors raised while building or invoking an accessor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("Type {type_path} has no {mode} member `{member}`")]
    MemberNotFound {
        type_path: &'static str,
        member: String,
        mode: AccessMode,
    },

    #[error(
        "Member `{member}` of {type_path} has type {member_type}, which does not convert to {requested}"
    )]
    TypeMismatch {
        type_path: &'static str,
        member: String,
        member_type: &'static str,
        requested: &'static str,
    },

    #[error("Member `{member}` of {type_path} holds a value that cannot be cloned")]
    NotCloneable {
        type_path: &'static str,
        member: String,
    },

    #[error(transparent)]
    Unexpected(#[from] UnexpectedTypeError),
}
