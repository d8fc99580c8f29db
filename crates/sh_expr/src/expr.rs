use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::Value;

// -----------------------------------------------------------------------------
// Param

/// Identity of a lambda parameter.
///
/// Two parameters with the same name are still different parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamId(u64);

impl ParamId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A lambda parameter. The name is only used for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    id: ParamId,
    name: String,
}

impl Param {
    /// Creates a parameter with a fresh identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ParamId::next(),
            name: name.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> ParamId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// An expression referring to this parameter.
    #[inline]
    pub fn to_expr(&self) -> Expr {
        Expr::Param(self.clone())
    }
}

// -----------------------------------------------------------------------------
// CompareOp

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Applies the operator to the result of a comparison.
    ///
    /// Unordered operands are only ever not-equal.
    pub fn test(self, ordering: Option<core::cmp::Ordering>) -> bool {
        use core::cmp::Ordering::{Equal, Greater, Less};

        match (self, ordering) {
            (Self::Eq, ordering) => ordering == Some(Equal),
            (Self::Ne, ordering) => ordering != Some(Equal),
            (_, None) => false,
            (Self::Lt, Some(o)) => o == Less,
            (Self::Le, Some(o)) => o != Greater,
            (Self::Gt, Some(o)) => o == Greater,
            (Self::Ge, Some(o)) => o != Less,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

// -----------------------------------------------------------------------------
// Expr

/// A node of an expression tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    Param(Param),
    Const(Value),
    /// Reads member `name` of `target`.
    Member { target: Box<Expr>, name: String },
    /// An implicit conversion. Evaluates to its operand.
    Convert(Box<Expr>),
    Not(Box<Expr>),
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Short-circuiting AND.
    AndAlso(Box<Expr>, Box<Expr>),
    /// Short-circuiting OR.
    OrElse(Box<Expr>, Box<Expr>),
    /// Inclusive OR, both sides are always evaluated.
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    #[inline]
    pub fn param(param: &Param) -> Self {
        param.to_expr()
    }

    #[inline]
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Const(value.into())
    }

    /// Reads member `name` of this expression.
    #[inline]
    pub fn member(self, name: impl Into<String>) -> Self {
        Self::Member {
            target: Box::new(self),
            name: name.into(),
        }
    }

    #[inline]
    pub fn convert(self) -> Self {
        Self::Convert(Box::new(self))
    }

    #[inline]
    pub fn compare(self, op: CompareOp, right: Expr) -> Self {
        Self::Compare {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    #[inline]
    pub fn equals(self, right: Expr) -> Self {
        self.compare(CompareOp::Eq, right)
    }

    #[inline]
    pub fn not_equals(self, right: Expr) -> Self {
        self.compare(CompareOp::Ne, right)
    }

    #[inline]
    pub fn lt(self, right: Expr) -> Self {
        self.compare(CompareOp::Lt, right)
    }

    #[inline]
    pub fn le(self, right: Expr) -> Self {
        self.compare(CompareOp::Le, right)
    }

    #[inline]
    pub fn gt(self, right: Expr) -> Self {
        self.compare(CompareOp::Gt, right)
    }

    #[inline]
    pub fn ge(self, right: Expr) -> Self {
        self.compare(CompareOp::Ge, right)
    }

    #[inline]
    pub fn and_also(self, right: Expr) -> Self {
        Self::AndAlso(Box::new(self), Box::new(right))
    }

    #[inline]
    pub fn or_else(self, right: Expr) -> Self {
        Self::OrElse(Box::new(self), Box::new(right))
    }

    #[inline]
    pub fn or(self, right: Expr) -> Self {
        Self::Or(Box::new(self), Box::new(right))
    }

    // Binding strength, used to print the fewest parentheses.
    fn precedence(&self) -> u8 {
        match self {
            Self::OrElse(..) => 1,
            Self::AndAlso(..) => 2,
            Self::Or(..) => 3,
            Self::Compare { .. } => 4,
            Self::Not(_) => 5,
            Self::Convert(inner) => inner.precedence(),
            Self::Param(_) | Self::Const(_) | Self::Member { .. } => 6,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "({self})")
        } else {
            fmt::Display::fmt(self, f)
        }
    }
}

impl core::ops::Not for Expr {
    type Output = Expr;

    #[inline]
    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binary = |f: &mut fmt::Formatter<'_>, l: &Expr, symbol: &str, r: &Expr| {
            let p = self.precedence();
            l.fmt_operand(f, p)?;
            write!(f, " {symbol} ")?;
            r.fmt_operand(f, p + 1)
        };

        match self {
            Self::Param(param) => f.write_str(param.name()),
            Self::Const(value) => fmt::Display::fmt(value, f),
            Self::Member { target, name } => {
                target.fmt_operand(f, 6)?;
                write!(f, ".{name}")
            }
            Self::Convert(inner) => fmt::Display::fmt(inner, f),
            Self::Not(inner) => {
                f.write_str("!")?;
                inner.fmt_operand(f, 5)
            }
            Self::Compare { op, left, right } => {
                left.fmt_operand(f, 5)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_operand(f, 5)
            }
            Self::AndAlso(l, r) => binary(f, l, "&&", r),
            Self::OrElse(l, r) => binary(f, l, "||", r),
            Self::Or(l, r) => binary(f, l, "|", r),
        }
    }
}

// -----------------------------------------------------------------------------
// Lambda

/// Parameters bound to a body expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lambda {
    params: Vec<Param>,
    body: Expr,
}

impl Lambda {
    #[inline]
    pub fn new(params: Vec<Param>, body: Expr) -> Self {
        Self { params, body }
    }

    /// Creates a one-parameter lambda, building the body from the parameter.
    ///
    /// ```
    /// use sh_expr::{Expr, Lambda};
    ///
    /// let positive = Lambda::unary("x", |x| x.member("a").gt(Expr::constant(0)));
    /// assert_eq!(positive.to_string(), "x => x.a > 0");
    /// ```
    pub fn unary(name: impl Into<String>, body: impl FnOnce(Expr) -> Expr) -> Self {
        let param = Param::new(name);
        let body = body(param.to_expr());
        Self::new(vec![param], body)
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    #[inline]
    pub fn body(&self) -> &Expr {
        &self.body
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<Param>, Expr) {
        (self.params, self.body)
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.params.as_slice() {
            [single] => write!(f, "{} => {}", single.name(), self.body),
            params => {
                f.write_str("(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(param.name())?;
                }
                write!(f, ") => {}", self.body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CompareOp, Expr, Lambda, Param};
    use core::cmp::Ordering;

    #[test]
    fn fresh_param_identities() {
        let a = Param::new("x");
        let b = Param::new("x");
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn display_uses_minimal_parentheses() {
        let x = Param::new("x");
        let a = || x.to_expr().member("a");

        let expr = a()
            .gt(Expr::constant(1))
            .or_else(a().lt(Expr::constant(-1)))
            .and_also(!a().equals(Expr::constant(5)));
        assert_eq!(expr.to_string(), "(x.a > 1 || x.a < -1) && !(x.a == 5)");

        let lambda = Lambda::new(vec![x.clone(), Param::new("y")], a().convert().ge(Expr::constant(0.5)));
        assert_eq!(lambda.to_string(), "(x, y) => x.a >= 0.5");
    }

    #[test]
    fn compare_op_on_unordered() {
        assert!(CompareOp::Ne.test(None));
        assert!(!CompareOp::Eq.test(None));
        assert!(!CompareOp::Le.test(None));
        assert!(CompareOp::Le.test(Some(Ordering::Equal)));
        assert!(!CompareOp::Gt.test(Some(Ordering::Equal)));
    }
}
