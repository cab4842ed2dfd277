//! # fixture-host
//!
//! A layered virtual filesystem that stands in for the real filesystem
//! when driving a TypeScript-style compiler from tests.
//!
//! A [`LayeredHost`] answers every file question the compiler asks from a
//! stack of sources, highest priority first:
//!
//! - **Overrides**: per-test replacements, also used to add new scripts
//! - **Written files**: output the compiler emitted during this run
//! - **Default libraries**: `lib*.d.ts`, always read from the real directory
//! - **Fixture tree**: an in-memory directory tree
//! - **Vendor libraries**: pre-packaged `node_modules` content
//!
//! Paths under rewritten package prefixes skip the stack entirely and are
//! served from the real filesystem or an external module map.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fixture_host::prelude::*;
//! use serde_json::json;
//!
//! let tree = VirtualNode::from_json(&json!({
//!     "app": { "main.ts": "import { x } from './util';", "util.ts": "export const x = 1;" }
//! }))?;
//! let host = LayeredHost::new(compiler, ["/app/main.ts"], tree);
//!
//! host.override_file("/app/util.ts", Some("export const x = 2;".into()));
//! let source = host.get_source_file("/app/main.ts", LanguageVersion::Latest)?;
//!
//! let aot = host.aot_adapter(collector);
//! let resolved = aot.module_name_to_file_name("./util", "/app/main.ts")?;
//! ```
//!
//! ## Modules
//!
//! - [`host`]: the layered host and its builder
//! - [`adapter`]: AOT and metadata bundler façades over a host
//! - [`compiler`]: traits the host implements and the compiler provides
//! - [`mod@file`]: fixture tree, name rewriting, vendor libraries, caching
//! - [`config`]: naming conventions and path policy
//! - [`resolve`]: standard module resolution
//! - [`diagnostic`]: error type and trace formatting

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod compiler;
pub mod config;
pub mod diagnostic;
pub mod file;
pub mod host;
pub mod prelude;
pub mod resolve;

#[cfg(test)]
mod testing;

// =============================================================================
// Host
// =============================================================================

pub use host::{HostBuilder, LayeredHost};

// =============================================================================
// Adapters
// =============================================================================

pub use adapter::{AotAdapter, MetadataBundlerAdapter};

// =============================================================================
// Collaborator traits
// =============================================================================

pub use compiler::{
    Compiler, CompilerHost, LanguageVersion, MetadataCollector, ModuleResolutionHost,
    NoMetadata, ResolutionOptions,
};

// =============================================================================
// Infrastructure
// =============================================================================

pub use config::{FileNaming, HostConfig, HostConfigBuilder};
pub use diagnostic::{
    format_traces, format_traces_with_options, HostError, HostResult, TraceOptions,
};
pub use file::{MapLibrary, NameRewriter, RewriteRule, VendorLibrary, VirtualNode};
