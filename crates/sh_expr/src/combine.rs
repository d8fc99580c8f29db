use core::fmt;
use core::marker::PhantomData;

use sh_reflect::Reflect;

use crate::{Expr, ExprError, ExprVisitorMut, Lambda, Param, ParameterRewriter};

// -----------------------------------------------------------------------------
// LogicOp

/// How [`combine`] joins two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOp {
    AndAlso,
    OrElse,
    Or,
}

impl LogicOp {
    fn join(self, left: Expr, right: Expr) -> Expr {
        match self {
            Self::AndAlso => left.and_also(right),
            Self::OrElse => left.or_else(right),
            Self::Or => left.or(right),
        }
    }
}

// -----------------------------------------------------------------------------
// Untyped combination

/// Joins the bodies of `x` and `y` with `op`.
///
/// The result takes `x`'s parameters. Every reference to `y`'s parameters is
/// rewritten to the `x` parameter at the same position, so both bodies address
/// the same arguments. Fails with [`ExprError::ParameterArity`] when the
/// parameter lists differ in length. Neither input is modified.
pub fn combine(x: &Lambda, y: &Lambda, op: LogicOp) -> Result<Lambda, ExprError> {
    let mut right = y.body().clone();
    ParameterRewriter::new(y.params(), x.params())?.visit_expr_mut(&mut right);
    Ok(Lambda::new(
        x.params().to_vec(),
        op.join(x.body().clone(), right),
    ))
}

/// `x && y`, see [`combine`].
#[inline]
pub fn and_also(x: &Lambda, y: &Lambda) -> Result<Lambda, ExprError> {
    combine(x, y, LogicOp::AndAlso)
}

/// `x || y`, see [`combine`].
#[inline]
pub fn or_else(x: &Lambda, y: &Lambda) -> Result<Lambda, ExprError> {
    combine(x, y, LogicOp::OrElse)
}

/// `x | y`, see [`combine`].
#[inline]
pub fn or(x: &Lambda, y: &Lambda) -> Result<Lambda, ExprError> {
    combine(x, y, LogicOp::Or)
}

// -----------------------------------------------------------------------------
// Predicate

/// A one-parameter boolean lambda over a `T`.
///
/// Because both operands always take exactly one parameter, combining two
/// predicates cannot fail.
pub struct Predicate<T> {
    lambda: Lambda,
    _marker: PhantomData<fn(&T)>,
}

impl<T> Predicate<T> {
    /// Creates a predicate whose parameter is named `name`.
    pub fn new(name: impl Into<String>, body: impl FnOnce(Expr) -> Expr) -> Self {
        Self {
            lambda: Lambda::unary(name, body),
            _marker: PhantomData,
        }
    }

    /// Wraps a lambda, which must take exactly one parameter.
    pub fn from_lambda(lambda: Lambda) -> Result<Self, ExprError> {
        if lambda.arity() != 1 {
            return Err(ExprError::ParameterArity {
                left: 1,
                right: lambda.arity(),
            });
        }
        Ok(Self {
            lambda,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn param(&self) -> &Param {
        // Checked on construction.
        &self.lambda.params()[0]
    }

    #[inline]
    pub fn as_lambda(&self) -> &Lambda {
        &self.lambda
    }

    #[inline]
    pub fn into_lambda(self) -> Lambda {
        self.lambda
    }

    /// Typed form of [`combine`].
    pub fn combine(&self, other: &Self, op: LogicOp) -> Self {
        let mut right = other.lambda.body().clone();
        ParameterRewriter::single(other.param(), self.param()).visit_expr_mut(&mut right);
        Self {
            lambda: Lambda::new(
                vec![self.param().clone()],
                op.join(self.lambda.body().clone(), right),
            ),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn and_also(&self, other: &Self) -> Self {
        self.combine(other, LogicOp::AndAlso)
    }

    #[inline]
    pub fn or_else(&self, other: &Self) -> Self {
        self.combine(other, LogicOp::OrElse)
    }

    #[inline]
    pub fn or(&self, other: &Self) -> Self {
        self.combine(other, LogicOp::Or)
    }
}

impl<T: Reflect> Predicate<T> {
    /// Evaluates the predicate against `subject`.
    pub fn matches(&self, subject: &T) -> Result<bool, ExprError> {
        self.lambda.evaluate_bool(&[subject as &dyn Reflect])
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            lambda: self.lambda.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.lambda).finish()
    }
}

impl<T> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.lambda, f)
    }
}

#[cfg(test)]
mod tests {
    use super::{LogicOp, Predicate, and_also, combine, or};
    use crate::{Expr, ExprError, Lambda, Param};

    #[test]
    fn result_takes_first_parameters() {
        let x = Lambda::unary("x", |x| x.member("a").gt(Expr::constant(0)));
        let y = Lambda::unary("y", |y| y.member("b").lt(Expr::constant(0)));

        let joined = and_also(&x, &y).unwrap();
        assert_eq!(joined.params(), x.params());
        assert_eq!(joined.to_string(), "x => x.a > 0 && x.b < 0");

        let param = &x.params()[0];
        let expected = param
            .to_expr()
            .member("a")
            .gt(Expr::constant(0))
            .or(param.to_expr().member("b").lt(Expr::constant(0)));
        assert_eq!(or(&x, &y).unwrap().body(), &expected);
    }

    #[test]
    fn untyped_combination_checks_arity() {
        let x = Lambda::unary("x", |x| x);
        let y = Lambda::new(vec![Param::new("a"), Param::new("b")], Expr::constant(true));
        let err = combine(&x, &y, LogicOp::OrElse).unwrap_err();
        assert!(matches!(err, ExprError::ParameterArity { left: 2, right: 1 }));
    }

    #[test]
    fn predicate_requires_one_parameter() {
        let two = Lambda::new(vec![Param::new("a"), Param::new("b")], Expr::constant(true));
        assert!(Predicate::<u8>::from_lambda(two).is_err());

        let one = Lambda::unary("v", |v| v.gt(Expr::constant(3)));
        let p = Predicate::<u8>::from_lambda(one).unwrap();
        assert!(p.matches(&4).unwrap());
        assert!(!p.matches(&3).unwrap());
    }

    #[test]
    fn inputs_are_untouched() {
        let x = Predicate::<u8>::new("x", |x| x.gt(Expr::constant(1)));
        let y = Predicate::<u8>::new("y", |y| y.lt(Expr::constant(9)));
        let before = y.clone().into_lambda();

        let _ = x.or_else(&y);
        assert_eq!(y.as_lambda(), &before);
    }
}
