use sh_reflect::access::AccessError;
use thiserror::Error;

/// Errors raised while combining or evaluating expressions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExprError {
    /// Two parameter lists that must line up have different lengths.
    #[error("Parameter lengths must match")]
    ParameterArity { left: usize, right: usize },

    #[error("Expression `{expr}` evaluates to {found}, not to a boolean")]
    NotBoolean { expr: String, found: String },

    #[error("Expression `{0}` is not a member path")]
    InvalidMemberPath(String),

    #[error("Cannot compare {left} with {right}")]
    Incomparable { left: String, right: String },

    #[error("Cannot read member `{member}` of {found}")]
    NotAnObject { member: String, found: String },

    #[error("Parameter `{0}` is not bound")]
    UnboundParameter(String),

    #[error("Value of type {0} has no scalar form")]
    Unrepresentable(&'static str),

    #[error(transparent)]
    Access(#[from] AccessError),
}
