//! Compiler-facing adapters over a [`CompilerHost`](crate::compiler::CompilerHost).
//!
//! - [`AotAdapter`]: metadata lookup, module name mapping, resources
//! - [`MetadataBundlerAdapter`]: metadata by logical module name

mod aot;
mod bundler;

pub use aot::AotAdapter;
pub use bundler::MetadataBundlerAdapter;

use crate::compiler::{Compiler, MetadataCollector};
use crate::host::LayeredHost;

impl<C: Compiler, M: MetadataCollector<C::Source>> LayeredHost<C, M> {
    /// AOT adapter using this host's file naming conventions.
    pub fn aot_adapter<N>(&self, collector: N) -> AotAdapter<'_, Self, N>
    where
        N: MetadataCollector<C::Source>,
    {
        AotAdapter::new(self, collector).with_naming(self.config().naming.clone())
    }

    /// Bundler adapter using this host's source extension.
    pub fn bundler_adapter<N>(&self, collector: N) -> MetadataBundlerAdapter<'_, Self, N>
    where
        N: MetadataCollector<C::Source>,
    {
        MetadataBundlerAdapter::new(self, collector)
            .with_source_extension(self.config().naming.source_extension.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{FileNaming, HostConfig};
    use crate::file::VirtualNode;
    use crate::host::LayeredHost;
    use crate::testing::{HeaderMetadata, TextCompiler};

    fn host(naming: FileNaming) -> LayeredHost<TextCompiler> {
        LayeredHost::builder(TextCompiler::default())
            .tree(VirtualNode::from_files([
                ("/app/main.mts", "// @metadata {\"kind\":\"mts\"}"),
                ("/app/util.mts", "export {}"),
            ]))
            .config(HostConfig::builder().naming(naming).build())
            .build()
    }

    fn mts_naming() -> FileNaming {
        FileNaming {
            extensions: regex::Regex::new(r"\.mts$").unwrap(),
            source_extension: ".mts".into(),
            ..FileNaming::default()
        }
    }

    #[test]
    fn test_aot_adapter_uses_host_naming() {
        let host = host(mts_naming());
        let aot = host.aot_adapter(HeaderMetadata);
        assert_eq!(aot.file_name_to_module_name("/app/main.mts", ""), "/app/main");
        assert_eq!(aot.get_output_file_name("/app/main.mts"), "/app/main.d.ts");
    }

    #[test]
    fn test_bundler_adapter_uses_host_extension() {
        let host = host(mts_naming());
        let bundler = host.bundler_adapter(HeaderMetadata);
        assert_eq!(
            bundler.get_metadata_for("/app/main").unwrap(),
            Some(serde_json::json!({ "kind": "mts" }))
        );
        assert_eq!(bundler.get_metadata_for("/app/util").unwrap(), None);
    }
}
