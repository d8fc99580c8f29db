//! Member paths inside expressions.
//!
//! A member path is a chain of member reads rooted at a parameter, such as
//! `x.address.city`, possibly wrapped in conversions.
//!
//! ```
//! use sh_expr::{Lambda, member};
//! use sh_reflect::{derive::Reflect, info::Typed};
//!
//! #[derive(Reflect)]
//! struct Address {
//!     city: String,
//! }
//!
//! #[derive(Reflect)]
//! struct Person {
//!     address: Option<Address>,
//! }
//!
//! let city = Lambda::unary("p", |p| p.member("address").member("city").convert());
//! assert_eq!(member::name_of(&city).unwrap(), "address.city");
//! assert!(member::type_of(&city, Person::type_info()).unwrap().type_is::<String>());
//! ```

use sh_reflect::info::{TypeInfo, TypeKind};

use crate::{Expr, ExprError, Lambda};

/// Strips every conversion wrapped around `expr`.
pub fn remove_convert(mut expr: &Expr) -> &Expr {
    while let Expr::Convert(inner) = expr {
        expr = &**inner;
    }
    expr
}

// Collects member names from the root outwards, returning the root expression.
fn member_chain<'e>(expr: &'e Expr, names: &mut Vec<&'e str>) -> &'e Expr {
    match remove_convert(expr) {
        Expr::Member { target, name } => {
            let root = member_chain(target, names);
            names.push(name);
            root
        }
        other => other,
    }
}

/// Returns the dotted member path of `expr`, if it is a member chain rooted at
/// a parameter.
pub fn try_member_name(expr: &Expr) -> Option<String> {
    let mut names = Vec::new();
    match member_chain(expr, &mut names) {
        Expr::Param(_) if !names.is_empty() => Some(names.join(".")),
        _ => None,
    }
}

/// Returns the declared type at the end of the member chain `expr`, starting
/// from `root`.
///
/// `Option` wrappers between steps are looked through.
pub fn try_member_type(expr: &Expr, root: &'static TypeInfo) -> Option<&'static TypeInfo> {
    let mut names = Vec::new();
    let Expr::Param(_) = member_chain(expr, &mut names) else {
        return None;
    };
    if names.is_empty() {
        return None;
    }

    names.into_iter().try_fold(root, |owner, name| {
        let owner = match owner.kind() {
            TypeKind::Nullable(nullable) => nullable.inner(),
            _ => owner,
        };
        Some(owner.as_struct()?.member(name)?.type_info())
    })
}

fn rooted_at_own_param(lambda: &Lambda) -> bool {
    let mut names = Vec::new();
    match member_chain(lambda.body(), &mut names) {
        Expr::Param(param) => lambda.params().contains(param),
        _ => false,
    }
}

/// Returns the member path selected by `lambda`.
///
/// Fails with [`ExprError::InvalidMemberPath`] unless the body is a member
/// chain on one of the lambda's own parameters.
pub fn name_of(lambda: &Lambda) -> Result<String, ExprError> {
    try_member_name(lambda.body())
        .filter(|_| rooted_at_own_param(lambda))
        .ok_or_else(|| ExprError::InvalidMemberPath(lambda.body().to_string()))
}

/// Returns the declared type of the member selected by `lambda`, with the
/// parameter typed as `root`.
pub fn type_of(lambda: &Lambda, root: &'static TypeInfo) -> Result<&'static TypeInfo, ExprError> {
    try_member_type(lambda.body(), root)
        .filter(|_| rooted_at_own_param(lambda))
        .ok_or_else(|| ExprError::InvalidMemberPath(lambda.body().to_string()))
}

#[cfg(test)]
mod tests {
    use super::{name_of, remove_convert, try_member_name, type_of};
    use crate::{Expr, ExprError, Lambda, Param};
    use sh_reflect::derive::Reflect;
    use sh_reflect::info::Typed;

    #[derive(Reflect)]
    struct Inner {
        value: u32,
    }

    #[derive(Reflect)]
    struct Outer {
        inner: Inner,
        label: String,
    }

    #[test]
    fn strips_nested_conversions() {
        let x = Param::new("x");
        let expr = x.to_expr().convert().convert();
        assert_eq!(remove_convert(&expr), &x.to_expr());
    }

    #[test]
    fn dotted_paths() {
        let x = Param::new("x");
        let path = x.to_expr().member("inner").convert().member("value");
        assert_eq!(try_member_name(&path).as_deref(), Some("inner.value"));

        assert_eq!(try_member_name(&x.to_expr()), None);
        assert_eq!(try_member_name(&Expr::constant(1).member("a")), None);
    }

    #[test]
    fn member_types() {
        let value = Lambda::unary("o", |o| o.member("inner").member("value"));
        assert!(type_of(&value, Outer::type_info()).unwrap().type_is::<u32>());

        let missing = Lambda::unary("o", |o| o.member("nope"));
        assert!(type_of(&missing, Outer::type_info()).is_err());
    }

    #[test]
    fn foreign_parameters_are_rejected() {
        let stranger = Param::new("s");
        let lambda = Lambda::new(vec![Param::new("o")], stranger.to_expr().member("label"));
        assert_eq!(
            name_of(&lambda),
            Err(ExprError::InvalidMemberPath("s.label".into()))
        );

        let compare = Lambda::unary("o", |o| o.member("label").equals(Expr::constant("a")));
        assert!(matches!(name_of(&compare), Err(ExprError::InvalidMemberPath(_))));
    }
}
