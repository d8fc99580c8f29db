use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for another crate as seen from the
/// caller's `Cargo.toml`.
///
/// Emitted code must name `sh_reflect` the way the invoking crate can reach
/// it, which depends on whether it depends on `sh_reflect` directly or on the
/// `sh_core` facade.
///
/// # Example
///
/// ```rust
/// # use sh_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared_crate_path("sh_reflect");
/// ```
///
/// Reading the manifest is not cheap; call this once per macro invocation.
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `sh_` and `sh_core` is listed,
///    return `::sh_core::short_name` (e.g. `sh_reflect` -> `::sh_core::reflect`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// ## Note
///
/// A crate deriving on its own types should add
/// `extern crate self as sh_reflect;` to its root so the fallback resolves.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "sh_core";
const CRATE_PREFIX: &str = "sh_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        path.exists().then_some(path)
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
    }

    fn read(path: &Path) -> Option<Document<Box<str>>> {
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        Document::parse(text).ok()
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Default::default(),
        };
        for segment in segments {
            path.segments
                .push(syn::Ident::new(segment, Span::call_site()).into());
        }
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::absolute(&[FACADE_NAME, module]))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's `Cargo.toml`. See the type documentation for the resolution order.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Runs `func` with the [`Manifest`] of the caller's `Cargo.toml`.
    ///
    /// Parsed manifests are cached per path and refreshed when the file
    /// changes. Returns `None` if the manifest cannot be found or parsed.
    pub fn try_shared<R>(func: impl FnOnce(&Self) -> R) -> Option<R> {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path()?;
        let modified_time = Self::modified_time(&path)?;

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return Some(func(manifest));
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path)?,
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        Some(result)
    }

    /// Resolves the path of crate `name`, falling back to `::name` when the
    /// caller's manifest is unavailable.
    pub fn shared_crate_path(name: &str) -> syn::Path {
        Self::try_shared(|manifest| manifest.get_crate_path(name))
            .unwrap_or_else(|| Self::absolute(&[name]))
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use toml_edit::Document;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.into()).unwrap(),
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        }
    }

    fn path_of(manifest: &Manifest, name: &str) -> String {
        let path = manifest.get_crate_path(name);
        path.segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn direct_dependency_wins() {
        let m = manifest("[dependencies]\nsh_reflect = \"0.1\"\nsh_core = \"0.1\"\n");
        assert_eq!(path_of(&m, "sh_reflect"), "sh_reflect");
    }

    #[test]
    fn facade_dependency() {
        let m = manifest("[dev-dependencies]\nsh_core = { path = \"..\" }\n");
        assert_eq!(path_of(&m, "sh_reflect"), "sh_core::reflect");
    }

    #[test]
    fn fallback_to_absolute_path() {
        let m = manifest("[package]\nname = \"demo\"\n");
        assert_eq!(path_of(&m, "sh_reflect"), "sh_reflect");
    }
}
