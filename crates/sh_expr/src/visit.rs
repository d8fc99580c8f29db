use crate::{Expr, ExprError, Param, ParamId};

// -----------------------------------------------------------------------------
// ExprVisitorMut

/// In-place traversal of an expression tree.
///
/// Every method defaults to visiting the children, so an implementation only
/// overrides the nodes it cares about and calls [`visit_expr_mut`] to keep
/// descending.
pub trait ExprVisitorMut {
    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        visit_expr_mut(self, expr);
    }

    fn visit_param_mut(&mut self, _param: &mut Param) {}
}

/// Visits the children of `expr`.
pub fn visit_expr_mut<V: ExprVisitorMut + ?Sized>(visitor: &mut V, expr: &mut Expr) {
    match expr {
        Expr::Param(param) => visitor.visit_param_mut(param),
        Expr::Const(_) => {}
        Expr::Member { target, .. } => visitor.visit_expr_mut(target),
        Expr::Convert(inner) | Expr::Not(inner) => visitor.visit_expr_mut(inner),
        Expr::Compare { left, right, .. }
        | Expr::AndAlso(left, right)
        | Expr::OrElse(left, right)
        | Expr::Or(left, right) => {
            visitor.visit_expr_mut(left);
            visitor.visit_expr_mut(right);
        }
    }
}

// -----------------------------------------------------------------------------
// ParameterRewriter

/// Replaces references to `from[i]` with `to[i]`.
///
/// References to any other parameter are left alone.
///
/// ```
/// use sh_expr::{ExprVisitorMut, Param, ParameterRewriter};
///
/// let (x, y) = (Param::new("x"), Param::new("y"));
/// let mut body = y.to_expr().member("b");
///
/// ParameterRewriter::new(&[y], &[x.clone()]).unwrap().visit_expr_mut(&mut body);
/// assert_eq!(body, x.to_expr().member("b"));
/// ```
#[derive(Debug)]
pub struct ParameterRewriter<'a> {
    map: Vec<(ParamId, &'a Param)>,
}

impl<'a> ParameterRewriter<'a> {
    /// Pairs the parameters of `from` and `to` by position.
    pub fn new(from: &[Param], to: &'a [Param]) -> Result<Self, ExprError> {
        if from.len() != to.len() {
            return Err(ExprError::ParameterArity {
                left: from.len(),
                right: to.len(),
            });
        }
        Ok(Self {
            map: from.iter().map(Param::id).zip(to).collect(),
        })
    }

    /// Rewrites a single parameter.
    #[inline]
    pub fn single(from: &Param, to: &'a Param) -> Self {
        Self {
            map: vec![(from.id(), to)],
        }
    }
}

impl ExprVisitorMut for ParameterRewriter<'_> {
    fn visit_param_mut(&mut self, param: &mut Param) {
        if let Some((_, to)) = self.map.iter().find(|(from, _)| *from == param.id()) {
            *param = Param::clone(to);
        }
    }
}
