//! Host configuration.
//!
//! Every naming convention and path policy the host applies lives in a
//! [`HostConfig`] value passed to the host at construction. Two hosts with
//! different settings can coexist in one process.
//!
//! Use [`HostConfigBuilder`] to override the defaults.

use std::borrow::Cow;
use std::path::PathBuf;

use regex::Regex;

use crate::file::{NameRewriter, RewriteRule};

/// Default vendored package prefix.
pub const DEFAULT_VENDOR_PREFIX: &str = "/node_modules/";

/// Compile one of the built-in patterns below. They are constants.
fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in pattern must compile")
}

// =============================================================================
// FileNaming
// =============================================================================

/// File naming conventions: known extensions, declaration and metadata
/// suffixes, and generated-artifact detection.
#[derive(Debug, Clone)]
pub struct FileNaming {
    /// Known source/declaration/script extensions, anchored at the end.
    pub extensions: Regex,
    /// Declaration file suffix (e.g. `.d.ts`).
    pub declaration_suffix: String,
    /// Metadata sibling suffix (e.g. `.metadata.json`).
    pub metadata_suffix: String,
    /// Compiler-generated artifacts that are never treated as source.
    pub generated: Regex,
    /// Extension appended to logical module names (e.g. `.ts`).
    pub source_extension: String,
    /// Suffix stripped from paths before module-resolution existence checks.
    pub resource_suffix: Option<String>,
}

impl Default for FileNaming {
    fn default() -> Self {
        Self {
            extensions: pattern(r"(\.ts|\.d\.ts|\.js|\.jsx|\.tsx)$"),
            declaration_suffix: ".d.ts".into(),
            metadata_suffix: ".metadata.json".into(),
            generated: pattern(r"\.ngfactory\.ts$|\.ngstyle\.ts$"),
            source_extension: ".ts".into(),
            resource_suffix: Some(".ngresource".into()),
        }
    }
}

impl FileNaming {
    /// Check if `path` is a declaration file.
    pub fn is_declaration(&self, path: &str) -> bool {
        path.ends_with(&self.declaration_suffix)
    }

    /// Check if `path` is a compiler-generated artifact.
    pub fn is_generated(&self, path: &str) -> bool {
        self.generated.is_match(path)
    }

    /// Metadata sibling of a declaration file, or `None` for other paths.
    ///
    /// `/lib/a.d.ts` becomes `/lib/a.metadata.json`.
    pub fn metadata_path(&self, path: &str) -> Option<String> {
        path.strip_suffix(self.declaration_suffix.as_str())
            .map(|stem| format!("{stem}{}", self.metadata_suffix))
    }

    /// Strip one known extension from the end of `path`.
    pub fn strip_extension<'p>(&self, path: &'p str) -> Cow<'p, str> {
        self.extensions.replace(path, "")
    }

    /// Declaration output path for a source path.
    pub fn output_file_name(&self, path: &str) -> String {
        format!("{}{}", self.strip_extension(path), self.declaration_suffix)
    }

    /// Strip the resource suffix, if configured and present.
    pub fn strip_resource_suffix<'p>(&self, path: &'p str) -> &'p str {
        self.resource_suffix
            .as_deref()
            .and_then(|suffix| path.strip_suffix(suffix))
            .unwrap_or(path)
    }
}

// =============================================================================
// HostConfig
// =============================================================================

/// Configuration for a [`LayeredHost`](crate::host::LayeredHost).
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Prefix under which vendor libraries are consulted.
    pub vendor_prefix: String,
    /// Vendored-package redirections.
    pub rewriter: NameRewriter,
    /// Redirected paths matching this go to the real filesystem; all other
    /// redirected paths go to the external module map.
    pub external_library: Option<Regex>,
    /// Basenames read from the default library directory.
    pub default_lib_pattern: Regex,
    /// Directory holding runtime library declarations. Falls back to the
    /// compiler's own default when unset.
    pub default_lib_dir: Option<PathBuf>,
    /// Write a metadata sibling next to every emitted declaration file.
    pub emit_metadata: bool,
    /// Whether file names are case sensitive.
    pub case_sensitive: bool,
    /// Newline sequence reported to the compiler.
    pub new_line: String,
    /// Current directory reported to the compiler.
    pub current_directory: String,
    /// Default library file name reported to the compiler.
    pub default_lib_file_name: String,
    /// File naming conventions.
    pub naming: FileNaming,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            vendor_prefix: DEFAULT_VENDOR_PREFIX.into(),
            rewriter: NameRewriter::default(),
            external_library: None,
            default_lib_pattern: pattern(r"^lib.*\.d\.ts$"),
            default_lib_dir: None,
            emit_metadata: false,
            case_sensitive: false,
            new_line: "\n".into(),
            current_directory: "/".into(),
            default_lib_file_name: "lib.d.ts".into(),
            naming: FileNaming::default(),
        }
    }
}

impl HostConfig {
    /// Create a configuration builder.
    pub fn builder() -> HostConfigBuilder {
        HostConfigBuilder::new()
    }

    /// Check if a redirected path belongs on the real filesystem.
    pub fn is_external_library(&self, rewritten: &str) -> bool {
        self.external_library
            .as_ref()
            .is_some_and(|re| re.is_match(rewritten))
    }

    /// Check if `path`'s basename names a default library declaration.
    pub fn is_default_lib(&self, path: &str) -> bool {
        let basename = path.rsplit('/').next().unwrap_or(path);
        self.default_lib_pattern.is_match(basename)
    }
}

// =============================================================================
// HostConfigBuilder
// =============================================================================

/// Configuration builder for fluent API.
///
/// # Example
///
/// ```ignore
/// use fixture_host::config::HostConfigBuilder;
///
/// let config = HostConfigBuilder::new()
///     .rewrite("/node_modules/@angular", "/src/angular/dist/packages")
///     .rewrite("/node_modules/rxjs", "/src/angular/node_modules/rxjs")
///     .external_library(regex::Regex::new("/rxjs/").unwrap())
///     .emit_metadata(true)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostConfigBuilder {
    config: HostConfig,
    rules: Vec<RewriteRule>,
}

impl HostConfigBuilder {
    /// Create a new configuration builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vendored package prefix.
    ///
    /// Default: `/node_modules/`
    pub fn vendor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.vendor_prefix = prefix.into();
        self
    }

    /// Append a rewrite rule. Rules are tried in the order added.
    pub fn rewrite(mut self, prefix: impl Into<String>, root: impl Into<String>) -> Self {
        self.rules.push(RewriteRule::new(prefix, root));
        self
    }

    /// Set the pattern selecting redirected paths served from disk.
    pub fn external_library(mut self, pattern: Regex) -> Self {
        self.config.external_library = Some(pattern);
        self
    }

    /// Set the basename pattern for default library declarations.
    ///
    /// Default: `^lib.*\.d\.ts$`
    pub fn default_lib_pattern(mut self, pattern: Regex) -> Self {
        self.config.default_lib_pattern = pattern;
        self
    }

    /// Set the directory holding runtime library declarations.
    pub fn default_lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.default_lib_dir = Some(dir.into());
        self
    }

    /// Enable or disable metadata siblings for emitted declarations.
    pub fn emit_metadata(mut self, enabled: bool) -> Self {
        self.config.emit_metadata = enabled;
        self
    }

    /// Set file name case sensitivity.
    ///
    /// Default: `false`
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.config.case_sensitive = enabled;
        self
    }

    /// Set the newline sequence.
    pub fn new_line(mut self, new_line: impl Into<String>) -> Self {
        self.config.new_line = new_line.into();
        self
    }

    /// Set the reported current directory.
    pub fn current_directory(mut self, dir: impl Into<String>) -> Self {
        self.config.current_directory = dir.into();
        self
    }

    /// Set the reported default library file name.
    pub fn default_lib_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.default_lib_file_name = name.into();
        self
    }

    /// Replace the file naming conventions.
    pub fn naming(mut self, naming: FileNaming) -> Self {
        self.config.naming = naming;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HostConfig {
        let mut config = self.config;
        config.rewriter = NameRewriter::new(self.rules);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.vendor_prefix, "/node_modules/");
        assert_eq!(config.current_directory, "/");
        assert_eq!(config.new_line, "\n");
        assert!(!config.emit_metadata);
        assert!(config.rewriter.rules().is_empty());
    }

    #[test]
    fn test_builder() {
        let config = HostConfig::builder()
            .rewrite("/node_modules/@scope", "/src/scope")
            .rewrite("/node_modules/dep", "/opt/dep")
            .emit_metadata(true)
            .build();
        assert_eq!(config.rewriter.rules().len(), 2);
        assert_eq!(config.rewriter.rules()[0].prefix(), "/node_modules/@scope");
        assert!(config.emit_metadata);
    }

    #[rstest]
    #[case("/a/b.ts", "/a/b")]
    #[case("/a/b.d.ts", "/a/b")]
    #[case("/a/b.tsx", "/a/b")]
    #[case("/a/b.js", "/a/b")]
    #[case("/a/b.json", "/a/b.json")]
    fn test_strip_extension(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(FileNaming::default().strip_extension(path), expected);
    }

    #[test]
    fn test_output_file_name() {
        let naming = FileNaming::default();
        assert_eq!(naming.output_file_name("/app/main.ts"), "/app/main.d.ts");
        assert_eq!(naming.output_file_name("/app/main.tsx"), "/app/main.d.ts");
    }

    #[test]
    fn test_metadata_path() {
        let naming = FileNaming::default();
        assert_eq!(
            naming.metadata_path("/m.d.ts").as_deref(),
            Some("/m.metadata.json")
        );
        assert_eq!(naming.metadata_path("/m.ts"), None);
    }

    #[rstest]
    #[case("/app/main.ngfactory.ts", true)]
    #[case("/app/main.ngstyle.ts", true)]
    #[case("/app/main.ts", false)]
    fn test_is_generated(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(FileNaming::default().is_generated(path), expected);
    }

    #[rstest]
    #[case("/any/where/lib.d.ts", true)]
    #[case("lib.es2015.d.ts", true)]
    #[case("/app/mylib.d.ts", false)]
    #[case("/lib/index.d.ts", false)]
    fn test_is_default_lib(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(HostConfig::default().is_default_lib(path), expected);
    }

    #[test]
    fn test_strip_resource_suffix() {
        let naming = FileNaming::default();
        assert_eq!(naming.strip_resource_suffix("/a.css.ngresource"), "/a.css");
        assert_eq!(naming.strip_resource_suffix("/a.css"), "/a.css");
    }
}
