//! Vendor libraries: external package content served under the vendored prefix.

use rustc_hash::FxHashMap;

// =============================================================================
// VendorLibrary Trait
// =============================================================================

/// Source of files for packages the fixture tree does not carry.
///
/// Paths are package-relative and rooted, e.g. `/@scope/pkg/index.d.ts`
/// for the host path `/node_modules/@scope/pkg/index.d.ts`.
///
/// # Example
///
/// ```ignore
/// use fixture_host::file::VendorLibrary;
///
/// struct Generated;
///
/// impl VendorLibrary for Generated {
///     fn read(&self, path: &str) -> Option<String> {
///         path.strip_suffix(".d.ts").map(|m| format!("export declare const name: '{m}';"))
///     }
/// }
/// ```
pub trait VendorLibrary: Send + Sync {
    /// Read a package file, or `None` if this library does not provide it.
    fn read(&self, path: &str) -> Option<String>;

    /// Check if this library provides `path`.
    fn contains(&self, path: &str) -> bool {
        self.read(path).is_some()
    }
}

// =============================================================================
// MapLibrary - Simple Map-based Implementation
// =============================================================================

/// A map-based vendor library.
///
/// # Example
///
/// ```ignore
/// use fixture_host::file::MapLibrary;
///
/// let mut lib = MapLibrary::new();
/// lib.insert("/@scope/pkg/index.d.ts", "export declare class Pkg {}");
/// ```
#[derive(Debug, Default, Clone)]
pub struct MapLibrary {
    files: FxHashMap<String, String>,
}

impl MapLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Remove a file.
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.files.remove(path)
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all file paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for MapLibrary {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(p, c)| (p.into(), c.into()))
                .collect(),
        }
    }
}

impl VendorLibrary for MapLibrary {
    fn read(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned()
    }

    fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

/// Path inside a vendor library for a host path under `prefix`.
///
/// The prefix's trailing slash is kept as the library path's root, so
/// `/node_modules/pkg/a.ts` under `/node_modules/` becomes `/pkg/a.ts`.
pub(crate) fn library_path<'p>(path: &'p str, prefix: &str) -> Option<&'p str> {
    let trimmed = prefix.strip_suffix('/').unwrap_or(prefix);
    let rest = path.strip_prefix(trimmed)?;
    rest.starts_with('/').then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_library() {
        let lib: MapLibrary = [("/pkg/index.d.ts", "export {}")].into_iter().collect();
        assert!(lib.contains("/pkg/index.d.ts"));
        assert_eq!(lib.read("/pkg/index.d.ts").as_deref(), Some("export {}"));
        assert!(lib.read("/pkg/other.d.ts").is_none());
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn test_library_path() {
        assert_eq!(
            library_path("/node_modules/pkg/a.ts", "/node_modules/"),
            Some("/pkg/a.ts")
        );
        assert_eq!(
            library_path("/node_modules/pkg/a.ts", "/node_modules"),
            Some("/pkg/a.ts")
        );
        assert_eq!(library_path("/node_modulesx/a.ts", "/node_modules/"), None);
        assert_eq!(library_path("/app/a.ts", "/node_modules/"), None);
    }
}
