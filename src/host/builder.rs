//! Builder pattern for `LayeredHost`.

use rustc_hash::FxHashMap;

use super::core::{HostState, LayeredHost};
use crate::compiler::{Compiler, MetadataCollector, NoMetadata};
use crate::config::HostConfig;
use crate::file::{VendorLibrary, VirtualNode};

/// Builder for configuring `LayeredHost`.
///
/// Use `LayeredHost::builder()` to create a builder.
pub struct HostBuilder<C, M = NoMetadata> {
    compiler: C,
    collector: M,
    config: HostConfig,
    tree: Option<VirtualNode>,
    scripts: Vec<String>,
    libraries: Vec<Box<dyn VendorLibrary>>,
    external: FxHashMap<String, String>,
}

impl<C: Compiler> HostBuilder<C> {
    /// Create a new builder.
    pub(crate) fn new(compiler: C) -> Self {
        Self {
            compiler,
            collector: NoMetadata,
            config: HostConfig::default(),
            tree: None,
            scripts: Vec::new(),
            libraries: Vec::new(),
            external: FxHashMap::default(),
        }
    }
}

impl<C: Compiler, M> HostBuilder<C, M> {
    /// Set the fixture tree.
    pub fn tree(mut self, tree: VirtualNode) -> Self {
        self.tree = Some(tree);
        self
    }

    /// Set the initial script roster.
    pub fn scripts<I, P>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.scripts = scripts.into_iter().map(Into::into).collect();
        self
    }

    /// Append a vendor library. Libraries are consulted in the order added.
    pub fn library(mut self, library: impl VendorLibrary + 'static) -> Self {
        self.libraries.push(Box::new(library));
        self
    }

    /// Set the external module map, keyed by rewritten path.
    pub fn external_modules<I, P, T>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<String>,
        T: Into<String>,
    {
        self.external = modules
            .into_iter()
            .map(|(p, t)| (p.into(), t.into()))
            .collect();
        self
    }

    /// Set the host configuration.
    pub fn config(mut self, config: HostConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the metadata collector used for emitted declaration files.
    pub fn collector<N>(self, collector: N) -> HostBuilder<C, N> {
        HostBuilder {
            compiler: self.compiler,
            collector,
            config: self.config,
            tree: self.tree,
            scripts: self.scripts,
            libraries: self.libraries,
            external: self.external,
        }
    }

    /// Build the `LayeredHost`.
    pub fn build(self) -> LayeredHost<C, M>
    where
        M: MetadataCollector<C::Source>,
    {
        LayeredHost::from_parts(
            self.compiler,
            self.collector,
            self.config,
            self.tree,
            self.libraries,
            HostState::new(self.scripts, self.external),
        )
    }
}
