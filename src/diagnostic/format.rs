//! Trace log formatting for test failure output.

use std::fmt::Write;

// ============================================================================
// Options
// ============================================================================

/// Options for controlling trace formatting.
///
/// # Example
///
/// ```ignore
/// use fixture_host::diagnostic::{format_traces_with_options, TraceOptions};
///
/// // Plain text (no ANSI colors) for logging
/// let text = format_traces_with_options(&host.traces(), TraceOptions::plain());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TraceOptions {
    /// Whether to use ANSI colors in output.
    pub colored: bool,
    /// Whether to prefix each entry with its index.
    pub numbered: bool,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            colored: true,
            numbered: true,
        }
    }
}

impl TraceOptions {
    /// Create options for plain text output (no ANSI colors).
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::default()
        }
    }

    /// Set whether to use colors.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set whether to number entries.
    pub fn with_numbered(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }
}

// ============================================================================
// Internal Coloring (private)
// ============================================================================

#[cfg(feature = "colored-diagnostics")]
fn colorize_index(text: &str) -> String {
    use owo_colors::OwoColorize;
    text.dimmed().to_string()
}

#[cfg(feature = "colored-diagnostics")]
fn colorize_message(text: &str) -> String {
    use owo_colors::OwoColorize;
    text.cyan().to_string()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize_index(text: &str) -> String {
    text.to_owned()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize_message(text: &str) -> String {
    text.to_owned()
}

// ============================================================================
// Public API
// ============================================================================

/// Format trace entries with default options.
pub fn format_traces(traces: &[String]) -> String {
    format_traces_with_options(traces, TraceOptions::default())
}

/// Format trace entries, one per line.
pub fn format_traces_with_options(traces: &[String], options: TraceOptions) -> String {
    let width = traces.len().to_string().len();
    let mut output = String::new();

    for (index, message) in traces.iter().enumerate() {
        if options.numbered {
            let label = format!("{:>width$} |", index + 1);
            let label = if options.colored {
                colorize_index(&label)
            } else {
                label
            };
            let _ = write!(output, "{label} ");
        }
        if options.colored {
            output.push_str(&colorize_message(message));
        } else {
            output.push_str(message);
        }
        output.push('\n');
    }

    output
}
