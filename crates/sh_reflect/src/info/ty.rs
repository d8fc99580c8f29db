use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// Type

/// The base representation of a Rust type.
///
/// Includes a [`TypeId`], the full path from [`core::any::type_name`] and a
/// short name with every module path removed.
///
/// # Examples
///
/// ```
/// use sh_reflect::info::Type;
///
/// let ty = Type::of::<Vec<String>>();
///
/// assert!(ty.is::<Vec<String>>());
/// assert_eq!(ty.path(), "alloc::vec::Vec<alloc::string::String>");
/// assert_eq!(ty.name(), "Vec<String>");
/// ```
#[derive(Clone)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: Box<str>,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    pub fn of<T: Any + ?Sized>() -> Self {
        let path = core::any::type_name::<T>();
        Self {
            id: TypeId::of::<T>(),
            path,
            name: short_name(path).into_boxed_str(),
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Check if the given type matches this one.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        TypeId::of::<T>() == self.id
    }

    /// Returns the full type path, e.g. `core::option::Option<i32>`.
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the type name without module paths, e.g. `Option<i32>`.
    ///
    /// Different types may share a name.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// This implementation purely relies on the [`TypeId`] of the type.
impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

/// This implementation purely relies on the [`TypeId`] of the type.
impl core::hash::Hash for Type {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// This implementation will only output the path of the type.
impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// Short name

/// Removes the module path of every segment in a type path.
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
pub(crate) fn short_name(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut segment_start = 0;
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.truncate(segment_start);
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' | '*' => {
                out.push(c);
                segment_start = out.len();
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::short_name;

    #[test]
    fn strips_nested_paths() {
        assert_eq!(short_name("i32"), "i32");
        assert_eq!(short_name("alloc::string::String"), "String");
        assert_eq!(
            short_name("std::collections::hash::map::HashMap<alloc::string::String, my::Foo>"),
            "HashMap<String, Foo>"
        );
        assert_eq!(short_name("[core::option::Option<u8>; 4]"), "[Option<u8>; 4]");
        assert_eq!(short_name("&str"), "&str");
    }
}
