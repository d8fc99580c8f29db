use sh_reflect::Reflect;
use sh_reflect::access::AccessorCache;
use sh_reflect::info::TypeKind;

use crate::{CompareOp, Expr, ExprError, Lambda, Value};

// -----------------------------------------------------------------------------
// Operand

/// An intermediate result: either a borrowed member or a computed scalar.
enum Operand<'a> {
    Ref(&'a dyn Reflect),
    Value(Value),
}

impl Operand<'_> {
    fn describe(&self) -> String {
        match self {
            Self::Ref(value) => value.reflect_type_info().name().to_owned(),
            Self::Value(value) => value.kind_name().to_owned(),
        }
    }

    /// Looks through `Option`: `Some` becomes its inner value, `None` becomes [`Value::Null`].
    fn lift(self) -> Self {
        match self {
            Self::Ref(value) => match value.reflect_type_info().kind() {
                TypeKind::Nullable(nullable) => match nullable.unwrap(value) {
                    Some(inner) => Self::Ref(inner),
                    None => Self::Value(Value::Null),
                },
                _ => Self::Ref(value),
            },
            operand => operand,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    fn into_value(self) -> Result<Value, ExprError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Ref(value) => Value::from_reflect(value)
                .ok_or_else(|| ExprError::Unrepresentable(value.reflect_type_info().path())),
        }
    }
}

// -----------------------------------------------------------------------------
// Evaluator

struct Evaluator<'l, 'a> {
    lambda: &'l Lambda,
    args: &'l [&'a dyn Reflect],
    cache: &'static AccessorCache,
}

impl<'a> Evaluator<'_, 'a> {
    fn operand(&self, expr: &Expr) -> Result<Operand<'a>, ExprError> {
        match expr {
            Expr::Param(param) => self
                .lambda
                .params()
                .iter()
                .position(|p| p.id() == param.id())
                .and_then(|index| self.args.get(index))
                .map(|arg| Operand::Ref(*arg))
                .ok_or_else(|| ExprError::UnboundParameter(param.name().to_owned())),
            Expr::Const(value) => Ok(Operand::Value(value.clone())),
            Expr::Member { target, name } => match self.operand(target)? {
                Operand::Ref(target) => self.member(target, name),
                // Reading through a null yields null.
                Operand::Value(Value::Null) => Ok(Operand::Value(Value::Null)),
                found => Err(ExprError::NotAnObject {
                    member: name.clone(),
                    found: found.describe(),
                }),
            },
            Expr::Convert(inner) => self.operand(inner),
            Expr::Not(inner) => Ok(Operand::Value(Value::Bool(!self.boolean(inner)?))),
            Expr::Compare { op, left, right } => {
                let left = self.operand(left)?;
                let right = self.operand(right)?;
                Ok(Operand::Value(Value::Bool(compare(*op, left, right)?)))
            }
            Expr::AndAlso(left, right) => {
                let value = self.boolean(left)? && self.boolean(right)?;
                Ok(Operand::Value(Value::Bool(value)))
            }
            Expr::OrElse(left, right) => {
                let value = self.boolean(left)? || self.boolean(right)?;
                Ok(Operand::Value(Value::Bool(value)))
            }
            Expr::Or(left, right) => {
                let left = self.boolean(left)?;
                let right = self.boolean(right)?;
                Ok(Operand::Value(Value::Bool(left | right)))
            }
        }
    }

    fn member(&self, target: &'a dyn Reflect, name: &str) -> Result<Operand<'a>, ExprError> {
        let target = match target.reflect_type_info().kind() {
            TypeKind::Nullable(nullable) => match nullable.unwrap(target) {
                Some(inner) => inner,
                None => return Ok(Operand::Value(Value::Null)),
            },
            _ => target,
        };
        Ok(Operand::Ref(self.cache.member_ref(target, name)?))
    }

    fn boolean(&self, expr: &Expr) -> Result<bool, ExprError> {
        let operand = self.operand(expr)?;
        let found = operand.describe();
        match operand.into_value() {
            Ok(Value::Bool(value)) => Ok(value),
            _ => Err(ExprError::NotBoolean {
                expr: expr.to_string(),
                found,
            }),
        }
    }
}

fn compare(op: CompareOp, left: Operand<'_>, right: Operand<'_>) -> Result<bool, ExprError> {
    let (left, right) = (left.lift(), right.lift());

    // Null equals only null and is unordered against everything else.
    if left.is_null() || right.is_null() {
        let ordering = (left.is_null() && right.is_null()).then_some(core::cmp::Ordering::Equal);
        return Ok(op.test(ordering));
    }

    // Same-typed reflected values use their own ordering first.
    if let (Operand::Ref(l), Operand::Ref(r)) = (&left, &right)
        && l.ty_id() == r.ty_id()
    {
        if let Some(ordering) = l.reflect_partial_cmp(*r) {
            return Ok(op.test(Some(ordering)));
        }
        if matches!(op, CompareOp::Eq | CompareOp::Ne)
            && let Some(equal) = l.reflect_partial_eq(*r)
        {
            return Ok(equal == (op == CompareOp::Eq));
        }
    }

    let (left_name, right_name) = (left.describe(), right.describe());
    let incomparable = || ExprError::Incomparable {
        left: left_name.clone(),
        right: right_name.clone(),
    };
    let left = left.into_value().map_err(|_| incomparable())?;
    let right = right.into_value().map_err(|_| incomparable())?;
    Ok(op.test(left.partial_cmp(&right)))
}

// -----------------------------------------------------------------------------
// Lambda evaluation

impl Lambda {
    /// Evaluates the body with `args` bound to the parameters by position.
    ///
    /// Member reads go through [`AccessorCache::global`]. `&&` and `||` stop
    /// at the first operand that decides the result, `|` evaluates both.
    ///
    /// ```
    /// use sh_expr::{Expr, Lambda, Value};
    ///
    /// let double_digit = Lambda::unary("n", |n| n.ge(Expr::constant(10)));
    /// assert_eq!(double_digit.evaluate(&[&42_u32]), Ok(Value::Bool(true)));
    /// ```
    pub fn evaluate(&self, args: &[&dyn Reflect]) -> Result<Value, ExprError> {
        self.evaluator(args)?.operand(self.body())?.into_value()
    }

    /// Like [`evaluate`](Self::evaluate), requiring a boolean result.
    pub fn evaluate_bool(&self, args: &[&dyn Reflect]) -> Result<bool, ExprError> {
        self.evaluator(args)?.boolean(self.body())
    }

    fn evaluator<'l, 'a>(
        &'l self,
        args: &'l [&'a dyn Reflect],
    ) -> Result<Evaluator<'l, 'a>, ExprError> {
        if args.len() != self.arity() {
            return Err(ExprError::ParameterArity {
                left: self.arity(),
                right: args.len(),
            });
        }
        Ok(Evaluator {
            lambda: self,
            args,
            cache: AccessorCache::global(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Expr, ExprError, Lambda, Param, Value};

    #[test]
    fn short_circuit_skips_the_right_side() {
        let x = Param::new("x");
        // `x.missing` fails to resolve, but is never reached.
        let failing = x.to_expr().member("missing").equals(Expr::constant(1));

        let and = Lambda::new(vec![x.clone()], Expr::constant(false).and_also(failing.clone()));
        assert_eq!(and.evaluate(&[&1_u8]), Ok(Value::Bool(false)));

        let or_else = Lambda::new(vec![x.clone()], Expr::constant(true).or_else(failing.clone()));
        assert_eq!(or_else.evaluate(&[&1_u8]), Ok(Value::Bool(true)));

        let or = Lambda::new(vec![x], Expr::constant(true).or(failing));
        assert!(matches!(or.evaluate(&[&1_u8]), Err(ExprError::Access(_))));
    }

    #[test]
    fn non_boolean_conditions_fail() {
        let lambda = Lambda::unary("x", |x| x.and_also(Expr::constant(true)));
        let err = lambda.evaluate(&[&3_i32]).unwrap_err();
        assert_eq!(
            err,
            ExprError::NotBoolean {
                expr: "x".into(),
                found: "i32".into(),
            }
        );
    }

    #[test]
    fn argument_count_must_match() {
        let lambda = Lambda::unary("x", |x| x);
        assert!(matches!(
            lambda.evaluate(&[]),
            Err(ExprError::ParameterArity { left: 1, right: 0 })
        ));
    }

    #[test]
    fn mixed_numeric_comparison() {
        let lambda = Lambda::unary("x", |x| x.lt(Expr::constant(2.5)));
        assert_eq!(lambda.evaluate(&[&2_u64]), Ok(Value::Bool(true)));

        let lambda = Lambda::unary("x", |x| x.equals(Expr::constant("a")));
        assert!(matches!(
            lambda.evaluate(&[&vec![1_u8]]),
            Err(ExprError::Incomparable { .. })
        ));
    }

    #[test]
    fn null_comparisons() {
        let is_null = Lambda::unary("x", |x| x.equals(Expr::constant(Value::Null)));
        assert_eq!(is_null.evaluate(&[&None::<u8>]), Ok(Value::Bool(true)));
        assert_eq!(is_null.evaluate(&[&Some(1_u8)]), Ok(Value::Bool(false)));

        let positive = Lambda::unary("x", |x| x.gt(Expr::constant(0)));
        assert_eq!(positive.evaluate(&[&None::<u8>]), Ok(Value::Bool(false)));
    }

    #[test]
    fn nullable_operands_compare_lifted() {
        let (x, y) = (Param::new("x"), Param::new("y"));
        let less = Lambda::new(vec![x.clone(), y.clone()], x.to_expr().lt(y.to_expr()));
        let same = Lambda::new(vec![x.clone(), y.clone()], x.to_expr().equals(y.to_expr()));
        let differ = Lambda::new(vec![x.clone(), y.clone()], x.to_expr().not_equals(y.to_expr()));

        // `None` is neither less nor greater than a value, same as against a constant.
        assert_eq!(less.evaluate(&[&None::<i32>, &Some(1_i32)]), Ok(Value::Bool(false)));
        assert_eq!(less.evaluate(&[&Some(1_i32), &None::<i32>]), Ok(Value::Bool(false)));
        assert_eq!(less.evaluate(&[&Some(0_i32), &Some(1_i32)]), Ok(Value::Bool(true)));

        assert_eq!(same.evaluate(&[&None::<i32>, &None::<i32>]), Ok(Value::Bool(true)));
        assert_eq!(differ.evaluate(&[&None::<i32>, &Some(1_i32)]), Ok(Value::Bool(true)));
    }
}
