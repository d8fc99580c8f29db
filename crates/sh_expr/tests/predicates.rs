use sh_expr::{Expr, ExprError, Lambda, LogicOp, Predicate, Query, SortDirection, Value, combine};
use sh_reflect::derive::Reflect;

#[derive(Reflect, Debug)]
struct Pair {
    a: i32,
    b: i32,
}

fn positive_a() -> Predicate<Pair> {
    Predicate::new("x", |x| x.member("a").gt(Expr::constant(0)))
}

fn negative_b() -> Predicate<Pair> {
    Predicate::new("y", |y| y.member("b").lt(Expr::constant(0)))
}

#[test]
fn and_combination_truth_table() {
    let both = positive_a().and_also(&negative_b());

    assert!(both.matches(&Pair { a: 1, b: -1 }).unwrap());
    assert!(!both.matches(&Pair { a: 0, b: -1 }).unwrap());
    assert!(!both.matches(&Pair { a: 1, b: 1 }).unwrap());
}

#[test]
fn or_combinations_agree_with_operands() {
    let cases = [(1, 1), (0, -1), (0, 0), (5, -5)];
    let (x, y) = (positive_a(), negative_b());

    for op in [LogicOp::OrElse, LogicOp::Or] {
        let joined = x.combine(&y, op);
        for (a, b) in cases {
            let pair = Pair { a, b };
            let expected = x.matches(&pair).unwrap() || y.matches(&pair).unwrap();
            assert_eq!(joined.matches(&pair).unwrap(), expected, "{op:?} on {pair:?}");
        }
    }
}

#[test]
fn combined_predicate_has_one_parameter() {
    let joined = positive_a().or_else(&negative_b());
    let lambda = joined.as_lambda();
    assert_eq!(lambda.arity(), 1);
    assert_eq!(lambda.to_string(), "x => x.a > 0 || x.b < 0");
}

#[test]
fn untyped_combination_rejects_arity_mismatch() {
    let one = Lambda::unary("x", |x| x.member("a").gt(Expr::constant(0)));
    let none = Lambda::new(Vec::new(), Expr::constant(true));

    let err = combine(&one, &none, LogicOp::AndAlso).unwrap_err();
    assert_eq!(err.to_string(), "Parameter lengths must match");
}

#[test]
fn missing_member_surfaces_as_access_error() {
    let broken = Predicate::<Pair>::new("p", |p| p.member("c").equals(Expr::constant(1)));
    let err = broken.matches(&Pair { a: 0, b: 0 }).unwrap_err();
    assert!(matches!(err, ExprError::Access(_)));
}

#[test]
fn evaluation_from_many_threads() {
    let both = positive_a().and_also(&negative_b());
    let results: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let both = &both;
                scope.spawn(move || both.matches(&Pair { a: i % 2, b: -1 }).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, [false, true, false, true, false, true, false, true]);
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip_keeps_parameter_identity() {
    let both = positive_a().and_also(&negative_b()).into_lambda();

    let json = serde_json::to_string(&both).unwrap();
    let back: Lambda = serde_json::from_str(&json).unwrap();

    assert_eq!(back, both);
    assert_eq!(
        back.evaluate(&[&Pair { a: 3, b: -3 }]),
        Ok(Value::Bool(true))
    );
}

#[cfg(feature = "serde")]
#[test]
fn value_serializes_by_variant() {
    let json = serde_json::to_value(Value::from(7_u8)).unwrap();
    assert_eq!(json, serde_json::json!({ "Int": 7 }));

    let back: Value = serde_json::from_value(serde_json::json!("Null")).unwrap();
    assert!(back.is_null());
}

#[test]
fn query_over_pairs() {
    let pairs = [
        Pair { a: 3, b: 0 },
        Pair { a: -1, b: 0 },
        Pair { a: 2, b: 0 },
    ];
    let keep = positive_a().into_lambda();
    let by_a = Lambda::unary("p", |p| p.member("a"));

    let query = Query::from_slice(&pairs)
        .filter(&keep)
        .unwrap()
        .order_by(&[(by_a, SortDirection::Ascending)])
        .unwrap();

    let values: Vec<i32> = query.iter_as::<Pair>().map(|p| p.a).collect();
    assert_eq!(values, [2, 3]);
}
