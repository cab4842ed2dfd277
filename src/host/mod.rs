//! The layered compiler host.

mod builder;
mod core;

pub use builder::HostBuilder;
pub use core::LayeredHost;
