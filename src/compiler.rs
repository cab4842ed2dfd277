//! Collaborator contracts between the host and a compiler toolchain.
//!
//! The host does not parse, type-check, or extract metadata itself. It
//! calls out to a [`Compiler`] and a [`MetadataCollector`] for that, and it
//! exposes itself to the toolchain through [`CompilerHost`].

use std::path::PathBuf;

use serde_json::Value;

use crate::diagnostic::HostResult;

/// Language level a source file is parsed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LanguageVersion {
    /// ECMAScript 3.
    Es3,
    /// ECMAScript 5.
    Es5,
    /// ECMAScript 2015.
    Es2015,
    /// ECMAScript 2016.
    Es2016,
    /// ECMAScript 2017.
    Es2017,
    /// Newest supported level.
    #[default]
    Latest,
}

/// Options handed to module resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOptions {
    /// Highest directory searched for `node_modules`.
    pub base_dir: String,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self {
            base_dir: "/".into(),
        }
    }
}

/// The subset of host operations module resolution needs.
pub trait ModuleResolutionHost {
    /// Check whether `path` exists. Never fails.
    fn file_exists(&self, path: &str) -> bool;

    /// Read the text at `path`.
    fn read_file(&self, path: &str) -> HostResult<String>;

    /// Record a resolution diagnostic.
    fn trace(&self, _message: &str) {}
}

/// External compiler: parsing, library discovery and module resolution.
pub trait Compiler {
    /// Structured representation of a parsed file.
    type Source: Clone;

    /// Parse `text` as the file at `path`.
    fn parse(&self, path: &str, text: &str, version: LanguageVersion) -> Self::Source;

    /// Directory that holds the runtime library declaration files.
    fn default_lib_dir(&self) -> PathBuf;

    /// Resolve `module_name` imported from `containing_file` to a path.
    fn resolve_module_name(
        &self,
        module_name: &str,
        containing_file: &str,
        options: &ResolutionOptions,
        host: &dyn ModuleResolutionHost,
    ) -> Option<String> {
        crate::resolve::resolve_module(module_name, containing_file, options, host)
    }
}

/// External metadata collector.
pub trait MetadataCollector<S> {
    /// Extract metadata from a parsed source, if it declares any.
    fn collect(&self, source: &S) -> Option<Value>;
}

/// A collector that never finds metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl<S> MetadataCollector<S> for NoMetadata {
    fn collect(&self, _source: &S) -> Option<Value> {
        None
    }
}

impl<S, M: MetadataCollector<S> + ?Sized> MetadataCollector<S> for &M {
    fn collect(&self, source: &S) -> Option<Value> {
        (**self).collect(source)
    }
}

/// The environment a compiler pipeline runs against.
///
/// Every operation the toolchain needs is declared here. Adapters wrap a
/// `CompilerHost` and delegate to it explicitly.
pub trait CompilerHost: ModuleResolutionHost {
    /// Parsed source type produced by the host's compiler.
    type Source: Clone;

    /// Retrieve the parsed source for `path`.
    fn get_source_file(&self, path: &str, version: LanguageVersion) -> HostResult<Self::Source>;

    /// Check whether `path` is a directory. Never fails.
    fn directory_exists(&self, path: &str) -> bool;

    /// Names of the immediate subdirectories of `path`.
    fn get_directories(&self, path: &str) -> Vec<String>;

    /// Capture compiler output. `sources` are the inputs that produced it.
    fn write_file(&self, path: &str, content: &str, sources: &[Self::Source]);

    /// Resolve a module name with the compiler's algorithm.
    fn resolve_module_name(
        &self,
        module_name: &str,
        containing_file: &str,
        options: &ResolutionOptions,
        host: &dyn ModuleResolutionHost,
    ) -> Option<String>;

    /// Name of the default library declaration file.
    fn default_lib_file_name(&self) -> String;

    /// Directory relative paths are resolved against.
    fn current_directory(&self) -> String;

    /// Normalize `path` for identity comparisons.
    fn canonical_file_name(&self, path: &str) -> String;

    /// Whether file names are case sensitive.
    fn use_case_sensitive_file_names(&self) -> bool;

    /// Newline sequence for emitted text.
    fn new_line(&self) -> String;
}
