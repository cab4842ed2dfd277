//! Host errors and trace log formatting.

mod error;
mod format;

pub use error::{HostError, HostResult};
pub use format::{format_traces, format_traces_with_options, TraceOptions};
