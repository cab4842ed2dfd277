//! Ahead-of-time compiler adapter.
//!
//! Answers the questions an AOT compiler asks on top of plain file access:
//! where a module's metadata lives, how module names map to files, and
//! which files are real sources rather than generated artifacts.

use futures::future::{self, Ready};
use serde_json::Value;

use crate::compiler::{
    CompilerHost, LanguageVersion, MetadataCollector, ModuleResolutionHost, ResolutionOptions,
};
use crate::config::FileNaming;
use crate::diagnostic::{HostError, HostResult};

/// Containing file assumed for absolute imports requested without one.
const DEFAULT_CONTAINING_FILE: &str = "/index.ts";

// =============================================================================
// ResourceAwareHost
// =============================================================================

/// Resolution host that strips the resource suffix before existence checks,
/// so `styles.css.ngresource` resolves wherever `styles.css` does.
struct ResourceAwareHost<'a, H> {
    host: &'a H,
    naming: &'a FileNaming,
}

impl<H: CompilerHost> ModuleResolutionHost for ResourceAwareHost<'_, H> {
    fn file_exists(&self, path: &str) -> bool {
        self.host.file_exists(self.naming.strip_resource_suffix(path))
    }

    fn read_file(&self, path: &str) -> HostResult<String> {
        self.host.read_file(path)
    }

    fn trace(&self, message: &str) {
        self.host.trace(message);
    }
}

// =============================================================================
// AotAdapter
// =============================================================================

/// AOT compiler façade over a [`CompilerHost`].
///
/// # Example
///
/// ```ignore
/// let mut aot = AotAdapter::new(&host, collector);
/// aot.hide_metadata();
///
/// let file = aot.module_name_to_file_name("@scope/core", "")?;
/// let metadata = aot.get_metadata_for("/app/main.ts")?;
/// ```
pub struct AotAdapter<'h, H, M> {
    host: &'h H,
    collector: M,
    naming: FileNaming,
    options: ResolutionOptions,
    metadata_visible: bool,
    dts_are_source: bool,
}

impl<'h, H, M> AotAdapter<'h, H, M>
where
    H: CompilerHost,
    M: MetadataCollector<H::Source>,
{
    /// Wrap `host`, extracting source metadata with `collector`.
    pub fn new(host: &'h H, collector: M) -> Self {
        Self {
            host,
            collector,
            naming: FileNaming::default(),
            options: ResolutionOptions::default(),
            metadata_visible: true,
            dts_are_source: true,
        }
    }

    /// Use the given file naming conventions.
    pub fn with_naming(mut self, naming: FileNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Use the given module resolution options.
    pub fn with_options(mut self, options: ResolutionOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the wrapped host.
    pub fn host(&self) -> &'h H {
        self.host
    }

    /// Ignore metadata siblings of declaration files.
    pub fn hide_metadata(&mut self) {
        self.metadata_visible = false;
    }

    /// Stop treating declaration files as source.
    pub fn ts_files_only(&mut self) {
        self.dts_are_source = false;
    }

    /// Metadata records for the module at `path`.
    ///
    /// Returns `None` when the module does not exist, or when it is a
    /// declaration file without a visible metadata sibling. Source files
    /// yield zero or one records from the collector.
    pub fn get_metadata_for(&self, path: &str) -> HostResult<Option<Vec<Value>>> {
        if !self.host.file_exists(path) {
            return Ok(None);
        }

        if self.naming.is_declaration(path) {
            if !self.metadata_visible {
                return Ok(None);
            }
            let Some(metadata_path) = self.naming.metadata_path(path) else {
                return Ok(None);
            };
            if !self.host.file_exists(&metadata_path) {
                return Ok(None);
            }
            let text = self.host.read_file(&metadata_path)?;
            return match serde_json::from_str::<Value>(&text)? {
                Value::Array(records) => Ok(Some(records)),
                record => Ok(Some(vec![record])),
            };
        }

        let source = self.host.get_source_file(path, LanguageVersion::Latest)?;
        Ok(Some(self.collector.collect(&source).into_iter().collect()))
    }

    /// Resolve `module_name` imported from `containing_file` to a path.
    ///
    /// An empty containing file is allowed for absolute imports only; they
    /// resolve as if imported from `/index.ts`.
    pub fn module_name_to_file_name(
        &self,
        module_name: &str,
        containing_file: &str,
    ) -> HostResult<Option<String>> {
        let containing = if containing_file.is_empty() {
            if module_name.starts_with('.') {
                return Err(HostError::RelativeWithoutContainingFile {
                    module: module_name.to_string(),
                });
            }
            DEFAULT_CONTAINING_FILE.to_string()
        } else {
            containing_file.replace('\\', "/")
        };

        let module_name = self.naming.strip_extension(module_name);
        let resolution_host = ResourceAwareHost {
            host: self.host,
            naming: &self.naming,
        };
        Ok(self.host.resolve_module_name(
            &module_name,
            &containing,
            &self.options,
            &resolution_host,
        ))
    }

    /// Check if `path` is a real source file rather than a generated artifact.
    pub fn is_source_file(&self, path: &str) -> bool {
        !self.naming.is_generated(path)
            && (self.dts_are_source || !self.naming.is_declaration(path))
    }

    /// Declaration output path for a source path.
    pub fn get_output_file_name(&self, path: &str) -> String {
        self.naming.output_file_name(path)
    }

    /// Module name for an imported file: the path without its extension.
    pub fn file_name_to_module_name(&self, imported_file: &str, _containing_file: &str) -> String {
        self.naming.strip_extension(imported_file).into_owned()
    }

    /// Importable name for a file, with the extension and everything up to
    /// the last `node_modules/` removed.
    pub fn get_import_as(&self, path: &str) -> String {
        let stem = self.naming.strip_extension(path);
        match stem.rfind("/node_modules/") {
            Some(i) => stem[i + "/node_modules/".len()..].to_string(),
            None => stem.into_owned(),
        }
    }

    /// Load a resource's text.
    ///
    /// The returned future is already complete. A missing resource, including
    /// one that is only assumed to exist, fails with `ResourceNotFound`.
    pub fn load_resource(&self, path: &str) -> Ready<HostResult<String>> {
        let not_found = || HostError::ResourceNotFound {
            path: path.to_string(),
        };
        let result = if self.host.file_exists(path) {
            match self.host.read_file(path) {
                Err(e) if e.is_not_found() => Err(not_found()),
                read => read,
            }
        } else {
            Err(not_found())
        };
        future::ready(result)
    }
}
