use std::sync::Arc;

use sh_reflect::Reflect;
use sh_reflect::access::{AccessError, AccessMode, AccessorCache};
use sh_reflect::derive::Reflect;
use sh_reflect::info::{Typed, TypeKind};
use sh_reflect::narrow::{UnexpectedTypeError, pars_to};

#[derive(Reflect, Default, Clone, PartialEq, Debug)]
#[reflect(clone, default, partial_eq)]
struct Customer {
    name: String,
    age: Option<u8>,
    score: i32,
    #[reflect(readonly)]
    id: u64,
    #[reflect(skip)]
    scratch: Vec<u8>,
}

#[derive(Reflect, Debug, PartialEq, PartialOrd, Clone, Copy)]
#[reflect(clone, partial_cmp, partial_eq)]
struct Version(u16, u16);

#[derive(Reflect, Default)]
struct Wrapper<T> {
    inner: T,
}

#[test]
fn derived_type_info() {
    let info = Customer::type_info();
    let TypeKind::Struct(members) = info.kind() else {
        panic!("expected a struct, got {info:?}");
    };
    let names: Vec<_> = members.iter().map(|m| m.name()).collect();
    assert_eq!(names, ["name", "age", "score", "id"]);
    assert!(info.has_default());
    assert!(!info.is_ordered());

    let id = members.member("id").unwrap();
    assert!(id.is_readable());
    assert!(!id.is_writable());

    let version = Version::type_info();
    assert!(matches!(version.kind(), TypeKind::Opaque));
    assert!(version.is_ordered());
}

#[test]
fn generic_types_get_one_info_per_instantiation() {
    let a = Wrapper::<u8>::type_info();
    let b = Wrapper::<String>::type_info();
    assert!(!core::ptr::eq(a, b));
    assert!(core::ptr::eq(a, Wrapper::<u8>::type_info()));
    assert_eq!(a.as_struct().unwrap().member("inner").unwrap().ty_id(), core::any::TypeId::of::<u8>());
}

#[test]
fn set_then_get_round_trip() {
    let cache = AccessorCache::new();
    let mut customer = Customer::default();

    cache.set_property(&mut customer, "name", String::from("Ada")).unwrap();
    cache.set_property(&mut customer, "age", 36_u8).unwrap();
    cache.set_property(&mut customer, "score", -4_i8).unwrap();

    let name: String = cache.get_property(Some(customer.as_reflect()), "name").unwrap();
    let age: Option<u8> = cache.get_property(Some(customer.as_reflect()), "age").unwrap();
    let score: i64 = cache.get_property(Some(customer.as_reflect()), "score").unwrap();

    assert_eq!(name, "Ada");
    assert_eq!(age, Some(36));
    assert_eq!(score, -4);
}

#[test]
fn null_instance_reads_default() {
    let cache = AccessorCache::new();
    assert_eq!(cache.get_property::<String>(None, "name"), Ok(String::new()));
    assert_eq!(cache.get_property::<Option<u8>>(None, "anything"), Ok(None));
    // Nothing is built for a null instance.
    assert!(cache.is_empty());
}

#[test]
fn failures_leave_instance_untouched() {
    let cache = AccessorCache::new();
    let mut customer = Customer {
        score: 10,
        id: 3,
        ..Customer::default()
    };
    let before = customer.clone();

    let missing = cache.set_property(&mut customer, "nope", 1_i32).unwrap_err();
    assert!(matches!(
        missing,
        AccessError::MemberNotFound { mode: AccessMode::Write, .. }
    ));

    let readonly = cache.set_property(&mut customer, "id", 9_u64).unwrap_err();
    assert_eq!(
        readonly.to_string(),
        format!("Type {} has no writable member `id`", Customer::type_info().path())
    );

    // `i64` does not fit in `i32`.
    let narrowing = cache.set_property(&mut customer, "score", 1_i64).unwrap_err();
    assert!(matches!(narrowing, AccessError::TypeMismatch { .. }));

    let skipped = cache.get_property::<Vec<u8>>(Some(customer.as_reflect()), "scratch");
    assert!(matches!(skipped, Err(AccessError::MemberNotFound { .. })));

    assert_eq!(customer, before);
    // Failed builds are not cached.
    assert!(cache.is_empty());
}

#[test]
fn concurrent_first_use_shares_one_entry() {
    let cache = Arc::new(AccessorCache::new());
    let customer = Arc::new(Customer {
        score: 21,
        ..Customer::default()
    });

    let results: Vec<i64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let customer = Arc::clone(&customer);
                scope.spawn(move || {
                    cache
                        .get_property::<i64>(Some(customer.as_reflect()), "score")
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(|&score| score == 21));
    assert_eq!(cache.len(), 1);

    let first = cache.getter::<i64>(Customer::type_info(), "score").unwrap();
    let second = cache.getter::<i64>(Customer::type_info(), "score").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn value_type_is_part_of_the_key() {
    let cache = AccessorCache::new();
    let customer = Customer {
        score: 5,
        ..Customer::default()
    };

    let as_i32: i32 = cache.get_property(Some(customer.as_reflect()), "score").unwrap();
    let as_f64: f64 = cache.get_property(Some(customer.as_reflect()), "score").unwrap();
    assert_eq!(as_i32, 5);
    assert_eq!(as_f64, 5.0);
    assert_eq!(cache.len(), 2);
}

#[test]
fn untyped_reads() {
    let cache = AccessorCache::new();
    let customer = Customer {
        name: String::from("Lin"),
        age: None,
        ..Customer::default()
    };

    let name = cache
        .get_property_string(Some(customer.as_reflect()), "name")
        .unwrap();
    assert_eq!(name.as_deref(), Some("Lin"));

    let age = cache
        .get_property_boxed(Some(customer.as_reflect()), "age")
        .unwrap()
        .unwrap();
    assert_eq!(age.take::<Option<u8>>().ok(), Some(None));

    let whole = cache
        .get_property_boxed(Some(customer.as_reflect()), "")
        .unwrap()
        .unwrap();
    assert_eq!(whole.take::<Customer>().ok(), Some(customer));
}

#[test]
fn member_copy_copies_writable_members() {
    let cache = AccessorCache::new();
    let src = Customer {
        name: String::from("src"),
        age: Some(1),
        score: 2,
        id: 3,
        scratch: vec![4],
    };
    let mut dst = Customer::default();

    cache.member_copy(&src, &mut dst).unwrap();

    assert_eq!(dst.name, "src");
    assert_eq!(dst.age, Some(1));
    assert_eq!(dst.score, 2);
    // Read-only and skipped fields are not copied.
    assert_eq!(dst.id, 0);
    assert!(dst.scratch.is_empty());
}

#[test]
fn unexpected_type_message() {
    let value: &dyn Reflect = &12_i32;
    let err = pars_to::<u8>(Some(value)).unwrap_err();
    assert_eq!(err.to_string(), "Unexpected type i32 of object 12. Expected type like u8");

    let err = UnexpectedTypeError::new(None, [u8::type_info(), String::type_info()]);
    assert_eq!(err.to_string(), "Unexpected null object. Expected type like u8, String");
}
