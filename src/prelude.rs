//! Prelude module for convenient imports.
//!
//! ```ignore
//! use fixture_host::prelude::*;
//! ```
//!
//! Brings the host traits into scope, so `file_exists`, `read_file` and
//! `get_source_file` are callable on a [`LayeredHost`].

// Host
pub use crate::host::{HostBuilder, LayeredHost};

// Adapters
pub use crate::adapter::{AotAdapter, MetadataBundlerAdapter};

// Collaborator traits
pub use crate::compiler::{
    Compiler, CompilerHost, LanguageVersion, MetadataCollector, ModuleResolutionHost,
    ResolutionOptions,
};

// Fixtures
pub use crate::file::{MapLibrary, VendorLibrary, VirtualNode};

// Configuration & errors
pub use crate::config::{FileNaming, HostConfig};
pub use crate::diagnostic::{HostError, HostResult};
