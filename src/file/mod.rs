//! File layers backing the host: fixture tree, name rewriting, vendor
//! libraries, the real filesystem, and the parsed source cache.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    File Resolution Flow                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  path ──► LayeredHost::read_file(path)                      │
//! │                    │                                        │
//! │                    ├─► 1. Overrides                         │
//! │                    ├─► 2. Written files                     │
//! │                    ├─► lib*.d.ts ─► default library dir     │
//! │                    │                                        │
//! │                    └─► NameRewriter::rewrite(path)          │
//! │                        │                                    │
//! │                        ├─► Unchanged                        │
//! │                        │   ├─► 3. Fixture tree              │
//! │                        │   └─► 4. Vendor libraries          │
//! │                        │        (vendored prefix only)      │
//! │                        │                                    │
//! │                        └─► Redirected                       │
//! │                            ├─► external-library pattern     │
//! │                            │   └─► 5. Real filesystem       │
//! │                            └─► external module map          │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod disk;
pub mod tree;

mod cache;
mod rewrite;
mod vendor;

pub use cache::SourceCache;
pub use rewrite::{NameRewriter, Rewrite, RewriteRule};
pub use tree::VirtualNode;
pub use vendor::{MapLibrary, VendorLibrary};

pub(crate) use vendor::library_path;
