//! Metadata bundler adapter.

use serde_json::Value;

use crate::compiler::{CompilerHost, LanguageVersion, MetadataCollector};
use crate::diagnostic::HostResult;

/// Serves module metadata to a bundler by logical module name.
///
/// The module name gets the source extension appended, is parsed through
/// the host, and the collector extracts its metadata.
pub struct MetadataBundlerAdapter<'h, H, M> {
    host: &'h H,
    collector: M,
    source_extension: String,
}

impl<'h, H, M> MetadataBundlerAdapter<'h, H, M>
where
    H: CompilerHost,
    M: MetadataCollector<H::Source>,
{
    /// Wrap `host`, appending `.ts` to module names.
    pub fn new(host: &'h H, collector: M) -> Self {
        Self {
            host,
            collector,
            source_extension: ".ts".into(),
        }
    }

    /// Use a different source extension.
    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }

    /// Metadata for `module_name`, or `None` if the source has none.
    ///
    /// Fails with `FileNotFound` when the source does not exist.
    pub fn get_metadata_for(&self, module_name: &str) -> HostResult<Option<Value>> {
        let path = format!("{module_name}{}", self.source_extension);
        let source = self.host.get_source_file(&path, LanguageVersion::Latest)?;
        Ok(self.collector.collect(&source))
    }
}
