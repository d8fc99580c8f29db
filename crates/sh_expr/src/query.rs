//! Untyped query operators over reflected values.
//!
//! ```
//! use sh_expr::{Expr, Lambda, Query, SortDirection};
//! use sh_reflect::derive::Reflect;
//!
//! #[derive(Reflect)]
//! struct Item {
//!     name: String,
//!     price: u32,
//! }
//!
//! let items = [
//!     Item { name: "b".into(), price: 30 },
//!     Item { name: "a".into(), price: 10 },
//!     Item { name: "c".into(), price: 20 },
//! ];
//!
//! let cheap = Lambda::unary("i", |i| i.member("price").lt(Expr::constant(25)));
//! let by_price = Lambda::unary("i", |i| i.member("price"));
//!
//! let names: Vec<_> = Query::from_slice(&items)
//!     .filter(&cheap)
//!     .unwrap()
//!     .order_by(&[(by_price, SortDirection::Descending)])
//!     .unwrap()
//!     .iter_as::<Item>()
//!     .map(|item| item.name.as_str())
//!     .collect();
//! assert_eq!(names, ["c", "a"]);
//! ```

use core::any::TypeId;
use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use sh_reflect::Reflect;
use sh_reflect::access::{AccessError, AccessMode, AccessorBuilder};
use sh_reflect::info::{MemberInfo, TypeInfo, TypeKind};
use sh_reflect::narrow::UnexpectedTypeError;
use sh_utils::KeyedCache;
use sh_utils::hash::Equivalent;

use crate::{ExprError, Lambda, Value, member};

// -----------------------------------------------------------------------------
// SortDirection

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[inline]
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

// -----------------------------------------------------------------------------
// Comparator cache

/// Orders two instances of the same type by one member path.
pub type Comparator = Arc<dyn Fn(&dyn Reflect, &dyn Reflect) -> Ordering + Send + Sync>;

#[derive(Debug, PartialEq, Eq, Hash)]
struct ComparatorKey {
    owner: TypeId,
    path: Box<str>,
    direction: SortDirection,
}

#[derive(Hash)]
struct ComparatorKeyRef<'a> {
    owner: TypeId,
    path: &'a str,
    direction: SortDirection,
}

impl ComparatorKeyRef<'_> {
    fn to_key(&self) -> ComparatorKey {
        ComparatorKey {
            owner: self.owner,
            path: self.path.into(),
            direction: self.direction,
        }
    }
}

impl Equivalent<ComparatorKey> for ComparatorKeyRef<'_> {
    #[inline]
    fn equivalent(&self, key: &ComparatorKey) -> bool {
        self.owner == key.owner && self.direction == key.direction && self.path == &*key.path
    }
}

static COMPARATORS: KeyedCache<ComparatorKey, Comparator> = KeyedCache::new();

fn unwrap_nullable(value: &dyn Reflect) -> Option<&dyn Reflect> {
    match value.reflect_type_info().kind() {
        TypeKind::Nullable(nullable) => nullable.unwrap(value),
        _ => Some(value),
    }
}

fn read_path<'a>(steps: &[&'static MemberInfo], mut value: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
    for step in steps {
        value = step.read(unwrap_nullable(value)?)?;
    }
    unwrap_nullable(value)
}

/// Nulls first, then the type's own ordering, then the scalar ordering.
fn compare_reflect(a: Option<&dyn Reflect>, b: Option<&dyn Reflect>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .reflect_partial_cmp(b)
            .or_else(|| Value::from_reflect(a)?.partial_cmp(&Value::from_reflect(b)?))
            .unwrap_or(Ordering::Equal),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

/// Returns the cached comparator for `path` on `owner`, building it on first use.
///
/// Fails when a step of the path is not a readable member.
pub fn comparator(
    owner: &'static TypeInfo,
    path: &str,
    direction: SortDirection,
) -> Result<Comparator, AccessError> {
    let key = ComparatorKeyRef {
        owner: owner.ty_id(),
        path,
        direction,
    };
    COMPARATORS.get_or_try_insert_with(&key, ComparatorKeyRef::to_key, || {
        let mut steps = Vec::new();
        let mut current = owner;
        for name in path.split('.') {
            let step = AccessorBuilder::new(current, name).member_info(AccessMode::Read)?;
            current = match step.type_info().kind() {
                TypeKind::Nullable(nullable) => nullable.inner(),
                _ => step.type_info(),
            };
            steps.push(step);
        }

        log::debug!("built comparator {}.{path} {direction:?}", owner.path());

        let comparator: Comparator = Arc::new(move |a: &dyn Reflect, b: &dyn Reflect| {
            direction.apply(compare_reflect(read_path(&steps, a), read_path(&steps, b)))
        });
        Ok(comparator)
    })
}

// -----------------------------------------------------------------------------
// Query

enum SortKey {
    Path(Comparator),
    Values(Vec<Value>, SortDirection),
}

/// A list of reflected values of one runtime type.
///
/// Every operator consumes the query and returns the result, so calls chain.
/// Orderings are stable.
pub struct Query<'a> {
    element: Option<&'static TypeInfo>,
    items: Vec<&'a dyn Reflect>,
    ordering: Vec<(Lambda, SortDirection)>,
}

impl<'a> Query<'a> {
    /// Creates a query over `items`, which must all have the same type.
    pub fn new(items: impl IntoIterator<Item = &'a dyn Reflect>) -> Result<Self, ExprError> {
        let items: Vec<_> = items.into_iter().collect();
        let element = items.first().map(|item| item.reflect_type_info());

        if let Some(element) = element
            && let Some(stranger) = items.iter().find(|item| item.ty_id() != element.ty_id())
        {
            let err = UnexpectedTypeError::new(Some(*stranger), [element]);
            return Err(AccessError::from(err).into());
        }

        Ok(Self {
            element,
            items,
            ordering: Vec::new(),
        })
    }

    /// Creates a query over a typed slice.
    pub fn from_slice<T: Reflect>(items: &'a [T]) -> Self {
        Self {
            element: items.first().map(|item| item.reflect_type_info()),
            items: items.iter().map(|item| item as &dyn Reflect).collect(),
            ordering: Vec::new(),
        }
    }

    /// The type of the items, `None` when the query is empty.
    #[inline]
    pub fn element(&self) -> Option<&'static TypeInfo> {
        self.element
    }

    /// Keeps the items for which `predicate` is `true`.
    pub fn filter(mut self, predicate: &Lambda) -> Result<Self, ExprError> {
        let mut kept = Vec::with_capacity(self.items.len());
        for item in self.items {
            if predicate.evaluate_bool(&[item])? {
                kept.push(item);
            }
        }
        self.items = kept;
        Ok(self)
    }

    /// Sorts by the given keys, replacing any previous ordering.
    ///
    /// A selector that is a member path is compared through a cached
    /// [`comparator`], any other selector is evaluated once per item.
    pub fn order_by(mut self, keys: &[(Lambda, SortDirection)]) -> Result<Self, ExprError> {
        self.ordering = keys.to_vec();
        self.sort()
    }

    /// Adds keys after the current ordering.
    pub fn then_by(mut self, keys: &[(Lambda, SortDirection)]) -> Result<Self, ExprError> {
        self.ordering.extend_from_slice(keys);
        self.sort()
    }

    fn sort(mut self) -> Result<Self, ExprError> {
        let Some(element) = self.element else {
            return Ok(self);
        };

        let keys = self
            .ordering
            .iter()
            .map(|(selector, direction)| -> Result<SortKey, ExprError> {
                match member::name_of(selector) {
                    Ok(path) => Ok(SortKey::Path(comparator(element, &path, *direction)?)),
                    Err(_) => {
                        let values = self
                            .items
                            .iter()
                            .map(|item| selector.evaluate(&[*item]))
                            .collect::<Result<_, _>>()?;
                        Ok(SortKey::Values(values, *direction))
                    }
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let items = &self.items;
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&i, &j| {
            keys.iter()
                .map(|key| match key {
                    SortKey::Path(compare) => compare(items[i], items[j]),
                    SortKey::Values(values, direction) => {
                        direction.apply(compare_values(&values[i], &values[j]))
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        self.items = order.into_iter().map(|i| self.items[i]).collect();
        Ok(self)
    }

    /// Drops the first `n` items.
    pub fn skip(mut self, n: usize) -> Self {
        self.items.drain(..n.min(self.items.len()));
        self
    }

    /// Keeps at most the first `n` items.
    pub fn take(mut self, n: usize) -> Self {
        self.items.truncate(n);
        self
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn first(&self) -> Option<&'a dyn Reflect> {
        self.items.first().copied()
    }

    #[inline]
    pub fn items(&self) -> &[&'a dyn Reflect] {
        &self.items
    }

    #[inline]
    pub fn into_items(self) -> Vec<&'a dyn Reflect> {
        self.items
    }

    /// Iterates the items as `T`, skipping any of another type.
    pub fn iter_as<T: Reflect>(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items.iter().copied().filter_map(|item| item.downcast_ref::<T>())
    }
}

impl fmt::Debug for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("element", &self.element.map(TypeInfo::path))
            .field("len", &self.items.len())
            .field("ordering", &self.ordering)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Query, SortDirection, comparator};
    use crate::{Expr, ExprError, Lambda};
    use sh_reflect::Reflect;
    use sh_reflect::derive::Reflect;
    use sh_reflect::info::Typed;

    #[derive(Reflect)]
    struct Row {
        group: u8,
        rank: Option<i32>,
        tag: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { group: 2, rank: Some(1), tag: "a".into() },
            Row { group: 1, rank: None, tag: "b".into() },
            Row { group: 2, rank: None, tag: "c".into() },
            Row { group: 1, rank: Some(5), tag: "d".into() },
        ]
    }

    fn tags(query: &Query<'_>) -> String {
        query.iter_as::<Row>().map(|row| row.tag.as_str()).collect()
    }

    #[test]
    fn order_then_by() {
        let data = rows();
        let group = Lambda::unary("r", |r| r.member("group"));
        let rank = Lambda::unary("r", |r| r.member("rank"));

        let query = Query::from_slice(&data)
            .order_by(&[(group, SortDirection::Ascending)])
            .unwrap();
        // Stable: ties keep their input order.
        assert_eq!(tags(&query), "bdac");

        let query = query.then_by(&[(rank, SortDirection::Descending)]).unwrap();
        // Nulls sort first, so they come last when descending.
        assert_eq!(tags(&query), "dbac");
    }

    #[test]
    fn computed_selector_falls_back_to_evaluation() {
        let data = rows();
        let is_big = Lambda::unary("r", |r| r.member("group").gt(Expr::constant(1)));
        let query = Query::from_slice(&data)
            .order_by(&[(is_big, SortDirection::Descending)])
            .unwrap();
        assert_eq!(tags(&query), "acbd");
    }

    #[test]
    fn skip_take_count() {
        let data = rows();
        let query = Query::from_slice(&data).skip(1).take(2);
        assert_eq!(query.count(), 2);
        assert_eq!(tags(&query), "bc");
        assert_eq!(Query::from_slice(&data).skip(10).count(), 0);
    }

    #[test]
    fn filter_needs_boolean() {
        let data = rows();
        let not_bool = Lambda::unary("r", |r| r.member("group"));
        let err = Query::from_slice(&data).filter(&not_bool).unwrap_err();
        assert!(matches!(err, ExprError::NotBoolean { .. }));
    }

    #[test]
    fn mixed_items_are_rejected() {
        let items: [&dyn Reflect; 2] = [&1_u8, &2_u16];
        assert!(matches!(Query::new(items), Err(ExprError::Access(_))));
    }

    #[test]
    fn comparators_are_cached() {
        let a = comparator(Row::type_info(), "group", SortDirection::Ascending).unwrap();
        let b = comparator(Row::type_info(), "group", SortDirection::Ascending).unwrap();
        assert!(std::sync::Arc::ptr_eq(&a, &b));
        assert!(comparator(Row::type_info(), "nope", SortDirection::Ascending).is_err());
    }
}
