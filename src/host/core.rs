//! `LayeredHost`: the compiler host backed by resolution layers.
//!
//! # Layers
//!
//! Reads consult, in order:
//!
//! 1. overrides installed by the test
//! 2. files written by a previous compilation pass
//! 3. the fixture tree
//! 4. vendor libraries (under the vendored prefix only)
//! 5. the real filesystem
//!
//! Paths the name rewriter redirects skip layers 3 and 4 and go to the real
//! filesystem or the external module map. Overrides and written files win
//! even over redirected paths.
//!
//! # Usage
//!
//! ```ignore
//! let host = LayeredHost::builder(compiler)
//!     .tree(fixtures)
//!     .scripts(["/app/main.ts"])
//!     .config(config)
//!     .build();
//!
//! host.override_file("/app/main.ts", Some("export const x = 1;".into()));
//! let source = host.get_source_file("/app/main.ts", LanguageVersion::Latest)?;
//! ```

use std::path::Path;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use super::builder::HostBuilder;
use crate::compiler::{
    Compiler, CompilerHost, LanguageVersion, MetadataCollector, ModuleResolutionHost, NoMetadata,
    ResolutionOptions,
};
use crate::config::HostConfig;
use crate::diagnostic::{HostError, HostResult};
use crate::file::{disk, library_path, tree, Rewrite, SourceCache, VendorLibrary, VirtualNode};

// =============================================================================
// HostState
// =============================================================================

/// Everything the host mutates after construction.
pub(crate) struct HostState<S> {
    pub(crate) overrides: FxHashMap<String, String>,
    pub(crate) written: FxHashMap<String, String>,
    pub(crate) assumed: FxHashSet<String>,
    pub(crate) external: FxHashMap<String, String>,
    pub(crate) sources: SourceCache<S>,
    pub(crate) scripts: Vec<String>,
    pub(crate) traces: Vec<String>,
}

impl<S> HostState<S> {
    pub(crate) fn new(scripts: Vec<String>, external: FxHashMap<String, String>) -> Self {
        Self {
            overrides: FxHashMap::default(),
            written: FxHashMap::default(),
            assumed: FxHashSet::default(),
            external,
            sources: SourceCache::new(),
            scripts,
            traces: Vec::new(),
        }
    }
}

// =============================================================================
// LayeredHost
// =============================================================================

/// Compiler host that serves files from in-memory layers with real
/// filesystem fallbacks.
///
/// All operations take `&self`; the mutable layers sit behind a lock so the
/// host can be handed to a compiler by shared reference. Callers must still
/// not interleave mutation with resolution from several threads.
pub struct LayeredHost<C: Compiler, M = NoMetadata> {
    compiler: C,
    collector: M,
    config: HostConfig,
    tree: Option<VirtualNode>,
    libraries: Vec<Box<dyn VendorLibrary>>,
    state: RwLock<HostState<C::Source>>,
}

impl<C: Compiler> LayeredHost<C> {
    /// Create a builder for explicit configuration.
    pub fn builder(compiler: C) -> HostBuilder<C> {
        HostBuilder::new(compiler)
    }

    /// Create a host over `tree` with `scripts` as the initial roster.
    pub fn new<I, P>(compiler: C, scripts: I, tree: VirtualNode) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self::builder(compiler).scripts(scripts).tree(tree).build()
    }
}

impl<C, M> LayeredHost<C, M>
where
    C: Compiler,
    M: MetadataCollector<C::Source>,
{
    pub(crate) fn from_parts(
        compiler: C,
        collector: M,
        config: HostConfig,
        tree: Option<VirtualNode>,
        libraries: Vec<Box<dyn VendorLibrary>>,
        state: HostState<C::Source>,
    ) -> Self {
        Self {
            compiler,
            collector,
            config,
            tree,
            libraries,
            state: RwLock::new(state),
        }
    }

    /// Get the host configuration.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Get the compiler collaborator.
    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Get the metadata collector.
    pub fn collector(&self) -> &M {
        &self.collector
    }

    /// Get the fixture tree.
    pub fn tree(&self) -> Option<&VirtualNode> {
        self.tree.as_ref()
    }

    // =========================================================================
    // Mutation API
    // =========================================================================

    /// Install (`Some`) or remove (`None`) an override for `path`.
    pub fn override_file(&self, path: &str, content: Option<String>) {
        let mut state = self.state.write();
        match content {
            Some(text) => {
                state.overrides.insert(path.to_string(), text);
            }
            None => {
                state.overrides.remove(path);
            }
        }
        state.sources.evict(path);
    }

    /// Override `path` and append it to the script roster.
    ///
    /// A path already on the roster is not appended twice.
    pub fn add_script(&self, path: &str, content: impl Into<String>) {
        let mut state = self.state.write();
        state.overrides.insert(path.to_string(), content.into());
        if !state.scripts.iter().any(|s| s == path) {
            state.scripts.push(path.to_string());
        }
        state.sources.evict(path);
    }

    /// Make `file_exists` report `path` without giving it any content.
    pub fn assume_file_exists(&self, path: &str) {
        self.state.write().assumed.insert(path.to_string());
    }

    /// Keep only the roster entries listed in `paths`, and drop the written
    /// files at those paths.
    pub fn remove<I, P>(&self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let keep: FxHashSet<String> = paths.into_iter().map(|p| p.as_ref().to_string()).collect();
        let mut state = self.state.write();
        state.scripts.retain(|s| keep.contains(s));
        state.written.retain(|path, _| !keep.contains(path));
        for path in &keep {
            state.sources.evict(path);
        }
    }

    /// Replace the external module map and drop every cached source.
    pub fn set_external_modules<I, P, T>(&self, modules: I)
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<String>,
        T: Into<String>,
    {
        let mut state = self.state.write();
        state.external = modules
            .into_iter()
            .map(|(p, t)| (p.into(), t.into()))
            .collect();
        state.sources.clear();
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// The script roster, in compilation order.
    pub fn script_names(&self) -> Vec<String> {
        self.state.read().scripts.clone()
    }

    /// All written files as `(path, content)`, sorted by path.
    pub fn written_files(&self) -> Vec<(String, String)> {
        let mut files: Vec<(String, String)> = self
            .state
            .read()
            .written
            .iter()
            .map(|(p, c)| (p.clone(), c.clone()))
            .collect();
        files.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        files
    }

    /// Content written at `path`, if any.
    pub fn written_file(&self, path: &str) -> Option<String> {
        self.state.read().written.get(path).cloned()
    }

    /// Trace log entries, oldest first.
    pub fn traces(&self) -> Vec<String> {
        self.state.read().traces.clone()
    }

    /// Check if `path` has a cached parsed source.
    pub fn is_cached(&self, path: &str) -> bool {
        self.state.read().sources.contains(path)
    }

    // =========================================================================
    // Layer Lookups
    // =========================================================================

    fn exists_in_layers(&self, path: &str) -> bool {
        let state = self.state.read();
        if state.overrides.contains_key(path)
            || state.written.contains_key(path)
            || state.assumed.contains(path)
        {
            return true;
        }

        let found = match self.config.rewriter.rewrite(path) {
            Rewrite::Unchanged(path) => {
                tree::read_file(path, self.tree.as_ref()).is_some()
                    || self.vendor_contains(path)
            }
            Rewrite::Redirected(real) => {
                if self.config.is_external_library(&real) {
                    disk::file_exists(Path::new(&real))
                } else {
                    state.external.contains_key(&real)
                }
            }
        };
        tracing::trace!(path, found, "probed file");
        found
    }

    fn lookup(&self, path: &str) -> HostResult<Option<String>> {
        {
            let state = self.state.read();
            if let Some(text) = state.overrides.get(path) {
                tracing::debug!(path, layer = "override", "read file");
                return Ok(Some(text.clone()));
            }
            if let Some(text) = state.written.get(path) {
                tracing::debug!(path, layer = "written", "read file");
                return Ok(Some(text.clone()));
            }
        }

        if self.config.is_default_lib(path) {
            let basename = path.rsplit('/').next().unwrap_or(path);
            let dir = self
                .config
                .default_lib_dir
                .clone()
                .unwrap_or_else(|| self.compiler.default_lib_dir());
            tracing::debug!(path, layer = "default-lib", dir = %dir.display(), "read file");
            return read_disk_optional(&dir.join(basename));
        }

        match self.config.rewriter.rewrite(path) {
            Rewrite::Unchanged(path) => {
                if let Some(text) = tree::read_file(path, self.tree.as_ref()) {
                    tracing::debug!(path, layer = "tree", "read file");
                    return Ok(Some(text.to_string()));
                }
                let vendored = self.vendor_read(path);
                if vendored.is_some() {
                    tracing::debug!(path, layer = "vendor", "read file");
                }
                Ok(vendored)
            }
            Rewrite::Redirected(real) => {
                if self.config.is_external_library(&real) {
                    tracing::debug!(path, real = %real, layer = "disk", "read file");
                    read_disk_optional(Path::new(&real))
                } else {
                    tracing::debug!(path, real = %real, layer = "external", "read file");
                    Ok(self.state.read().external.get(&real).cloned())
                }
            }
        }
    }

    fn vendor_contains(&self, path: &str) -> bool {
        library_path(path, &self.config.vendor_prefix)
            .is_some_and(|lib_path| self.libraries.iter().any(|lib| lib.contains(lib_path)))
    }

    fn vendor_read(&self, path: &str) -> Option<String> {
        let lib_path = library_path(path, &self.config.vendor_prefix)?;
        self.libraries.iter().find_map(|lib| lib.read(lib_path))
    }
}

/// Read from disk, mapping absence to `None`.
fn read_disk_optional(path: &Path) -> HostResult<Option<String>> {
    match disk::read_file(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

// =============================================================================
// Host Trait Implementations
// =============================================================================

impl<C, M> ModuleResolutionHost for LayeredHost<C, M>
where
    C: Compiler,
    M: MetadataCollector<C::Source>,
{
    fn file_exists(&self, path: &str) -> bool {
        self.exists_in_layers(path)
    }

    fn read_file(&self, path: &str) -> HostResult<String> {
        self.lookup(path)?.ok_or_else(|| HostError::not_found(path))
    }

    fn trace(&self, message: &str) {
        self.state.write().traces.push(message.to_string());
    }
}

impl<C, M> CompilerHost for LayeredHost<C, M>
where
    C: Compiler,
    M: MetadataCollector<C::Source>,
{
    type Source = C::Source;

    fn get_source_file(&self, path: &str, version: LanguageVersion) -> HostResult<C::Source> {
        if let Some(source) = self.state.read().sources.get(path) {
            return Ok(source.clone());
        }

        let text = self.read_file(path)?;
        let source = self.compiler.parse(path, &text, version);
        self.state.write().sources.insert(path, source.clone());
        Ok(source)
    }

    fn directory_exists(&self, path: &str) -> bool {
        match self.config.rewriter.rewrite(path) {
            Rewrite::Unchanged(path) => tree::is_directory(path, self.tree.as_ref()),
            Rewrite::Redirected(real) => Path::new(&real).is_dir(),
        }
    }

    fn get_directories(&self, path: &str) -> Vec<String> {
        match self.config.rewriter.rewrite(path) {
            Rewrite::Unchanged(path) => tree::subdirectories(path, self.tree.as_ref()),
            Rewrite::Redirected(real) => disk::subdirectories(Path::new(&real)),
        }
    }

    fn write_file(&self, path: &str, content: &str, sources: &[C::Source]) {
        let mut state = self.state.write();
        state.written.insert(path.to_string(), content.to_string());
        state.sources.evict(path);
        tracing::debug!(path, bytes = content.len(), "captured output");

        if !self.config.emit_metadata {
            return;
        }
        if let Some(metadata_path) = self.config.naming.metadata_path(path)
            && let Some(first) = sources.first()
            && let Some(metadata) = self.collector.collect(first)
        {
            tracing::debug!(path = %metadata_path, "captured metadata");
            state.sources.evict(&metadata_path);
            state.written.insert(metadata_path, metadata.to_string());
        }
    }

    fn resolve_module_name(
        &self,
        module_name: &str,
        containing_file: &str,
        options: &ResolutionOptions,
        host: &dyn ModuleResolutionHost,
    ) -> Option<String> {
        self.compiler
            .resolve_module_name(module_name, containing_file, options, host)
    }

    fn default_lib_file_name(&self) -> String {
        self.config.default_lib_file_name.clone()
    }

    fn current_directory(&self) -> String {
        self.config.current_directory.clone()
    }

    fn canonical_file_name(&self, path: &str) -> String {
        path.to_string()
    }

    fn use_case_sensitive_file_names(&self) -> bool {
        self.config.case_sensitive
    }

    fn new_line(&self) -> String {
        self.config.new_line.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
