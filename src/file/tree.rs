//! In-memory fixture tree and pure path lookups over it.

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::diagnostic::{HostError, HostResult};

// =============================================================================
// VirtualNode
// =============================================================================

/// A node in a fixture tree.
///
/// A `File` is always a leaf: lookups never descend through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualNode {
    /// Literal file text.
    File(String),
    /// Named children.
    Directory(FxHashMap<String, VirtualNode>),
}

impl Default for VirtualNode {
    fn default() -> Self {
        Self::Directory(FxHashMap::default())
    }
}

impl VirtualNode {
    /// Create a file node.
    pub fn file(content: impl Into<String>) -> Self {
        Self::File(content.into())
    }

    /// Create a directory node from `(name, node)` pairs.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let tree = VirtualNode::dir([
    ///     ("app", VirtualNode::dir([("main.ts", VirtualNode::file("export {}"))])),
    /// ]);
    /// ```
    pub fn dir<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, VirtualNode)>,
        K: Into<String>,
    {
        Self::Directory(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a tree from flat `(path, content)` pairs.
    ///
    /// Intermediate directories are created as needed. A later entry whose
    /// path runs through an earlier file replaces that file with a directory.
    pub fn from_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let mut root = Self::default();
        for (path, content) in files {
            root.insert(path.as_ref(), content.into());
        }
        root
    }

    /// Convert a JSON fixture: strings become files, objects become directories.
    pub fn from_json(value: &Value) -> HostResult<Self> {
        from_json_at(value, "")
    }

    /// Check if this node is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// Get the file text, if this node is a file.
    pub fn as_file(&self) -> Option<&str> {
        match self {
            Self::File(text) => Some(text),
            Self::Directory(_) => None,
        }
    }

    /// Get the children, if this node is a directory.
    pub fn children(&self) -> Option<&FxHashMap<String, VirtualNode>> {
        match self {
            Self::File(_) => None,
            Self::Directory(entries) => Some(entries),
        }
    }

    fn insert(&mut self, path: &str, content: String) {
        let mut names = segments(path).peekable();
        if names.peek().is_some() {
            self.insert_at(names, content);
        }
    }

    fn insert_at<'p>(&mut self, mut names: impl Iterator<Item = &'p str>, content: String) {
        let Some(name) = names.next() else {
            *self = Self::File(content);
            return;
        };
        if !self.is_directory() {
            *self = Self::default();
        }
        if let Self::Directory(entries) = self {
            entries
                .entry(name.to_string())
                .or_default()
                .insert_at(names, content);
        }
    }
}

fn from_json_at(value: &Value, at: &str) -> HostResult<VirtualNode> {
    match value {
        Value::String(text) => Ok(VirtualNode::File(text.clone())),
        Value::Object(map) => map
            .iter()
            .map(|(name, child)| {
                let child_at = format!("{at}/{name}");
                from_json_at(child, &child_at).map(|node| (name.clone(), node))
            })
            .collect::<HostResult<_>>()
            .map(VirtualNode::Directory),
        other => Err(HostError::InvalidFixture {
            path: if at.is_empty() { "/".into() } else { at.into() },
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Path Lookups
// =============================================================================

/// Split a slash-delimited path into its non-empty segments.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Locate the node at `path`, or `None` if any component is missing.
///
/// Resolution fails when an intermediate component is a file.
pub fn find<'t>(path: &str, tree: Option<&'t VirtualNode>) -> Option<&'t VirtualNode> {
    let mut node = tree?;
    for name in segments(path) {
        node = match node {
            VirtualNode::Directory(entries) => entries.get(name)?,
            VirtualNode::File(_) => return None,
        };
    }
    Some(node)
}

/// Check whether `path` names a file or directory in the tree.
pub fn exists(path: &str, tree: Option<&VirtualNode>) -> bool {
    find(path, tree).is_some()
}

/// Check whether `path` names a directory (the root included).
pub fn is_directory(path: &str, tree: Option<&VirtualNode>) -> bool {
    find(path, tree).is_some_and(VirtualNode::is_directory)
}

/// Read the text of the file at `path`.
pub fn read_file<'t>(path: &str, tree: Option<&'t VirtualNode>) -> Option<&'t str> {
    find(path, tree)?.as_file()
}

/// Names of the directory children of `path`, sorted.
pub fn subdirectories(path: &str, tree: Option<&VirtualNode>) -> Vec<String> {
    let Some(entries) = find(path, tree).and_then(VirtualNode::children) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .iter()
        .filter(|(_, node)| node.is_directory())
        .map(|(name, _)| name.clone())
        .collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> VirtualNode {
        VirtualNode::dir([
            ("a", VirtualNode::file("text")),
            (
                "app",
                VirtualNode::dir([
                    ("main.ts", VirtualNode::file("export const x = 1;")),
                    ("lib", VirtualNode::dir([("util.ts", VirtualNode::file(""))])),
                ]),
            ),
        ])
    }

    #[test]
    fn test_find_does_not_tunnel_through_file() {
        let tree = sample();
        assert!(find("a/b", Some(&tree)).is_none());
        assert!(find("/a/b", Some(&tree)).is_none());
    }

    #[test]
    fn test_find_without_tree() {
        assert!(find("/a", None).is_none());
        assert!(!exists("/", None));
        assert!(!is_directory("/", None));
    }

    #[test]
    fn test_root_is_directory() {
        let tree = sample();
        assert!(is_directory("/", Some(&tree)));
        assert!(is_directory("", Some(&tree)));
    }

    #[test]
    fn test_read_file() {
        let tree = sample();
        assert_eq!(
            read_file("/app/main.ts", Some(&tree)),
            Some("export const x = 1;")
        );
        assert_eq!(read_file("/app/lib/util.ts", Some(&tree)), Some(""));
        assert_eq!(read_file("/app", Some(&tree)), None);
        assert_eq!(read_file("/app/missing.ts", Some(&tree)), None);
    }

    #[test]
    fn test_exists_files_and_directories() {
        let tree = sample();
        assert!(exists("/app", Some(&tree)));
        assert!(exists("/app/lib/util.ts", Some(&tree)));
        assert!(!exists("/nope", Some(&tree)));
    }

    #[test]
    fn test_subdirectories_excludes_files() {
        let tree = VirtualNode::dir([
            ("x", VirtualNode::default()),
            ("y", VirtualNode::file("text")),
        ]);
        assert_eq!(subdirectories("/", Some(&tree)), vec!["x".to_string()]);
        assert!(subdirectories("/y", Some(&tree)).is_empty());
    }

    #[test]
    fn test_from_files_builds_nested_directories() {
        let tree = VirtualNode::from_files([
            ("/app/main.ts", "main"),
            ("/app/lib/util.ts", "util"),
            ("/readme.md", "hi"),
        ]);
        assert_eq!(read_file("/app/main.ts", Some(&tree)), Some("main"));
        assert_eq!(read_file("/app/lib/util.ts", Some(&tree)), Some("util"));
        assert_eq!(subdirectories("/app", Some(&tree)), vec!["lib".to_string()]);
    }

    #[test]
    fn test_from_files_replaces_file_with_directory() {
        let tree = VirtualNode::from_files([("/a", "leaf"), ("/a/b", "nested")]);
        assert!(is_directory("/a", Some(&tree)));
        assert_eq!(read_file("/a/b", Some(&tree)), Some("nested"));
    }

    #[test]
    fn test_from_json() {
        let tree = VirtualNode::from_json(&json!({
            "app": { "main.ts": "export {}", "empty": {} }
        }))
        .unwrap();
        assert_eq!(read_file("/app/main.ts", Some(&tree)), Some("export {}"));
        assert!(is_directory("/app/empty", Some(&tree)));
    }

    #[test]
    fn test_from_json_rejects_numbers() {
        let err = VirtualNode::from_json(&json!({ "app": { "n": 1 } })).unwrap_err();
        match err {
            HostError::InvalidFixture { path, found } => {
                assert_eq!(path, "/app/n");
                assert_eq!(found, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
