//! Test doubles for the compiler collaborators.

use std::path::PathBuf;

use serde_json::Value;

use crate::compiler::{Compiler, LanguageVersion, MetadataCollector};

/// "Parsed" source: the text plus where and how it was parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedText {
    pub path: String,
    pub text: String,
    pub version: LanguageVersion,
}

/// Compiler whose parse step just records its inputs.
#[derive(Debug, Clone)]
pub struct TextCompiler {
    pub lib_dir: PathBuf,
}

impl TextCompiler {
    pub fn new(lib_dir: impl Into<PathBuf>) -> Self {
        Self {
            lib_dir: lib_dir.into(),
        }
    }
}

impl Default for TextCompiler {
    fn default() -> Self {
        Self::new("/nonexistent/typescript/lib")
    }
}

impl Compiler for TextCompiler {
    type Source = ParsedText;

    fn parse(&self, path: &str, text: &str, version: LanguageVersion) -> ParsedText {
        ParsedText {
            path: path.to_string(),
            text: text.to_string(),
            version,
        }
    }

    fn default_lib_dir(&self) -> PathBuf {
        self.lib_dir.clone()
    }
}

/// Reads metadata from a `// @metadata <json>` line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderMetadata;

impl MetadataCollector<ParsedText> for HeaderMetadata {
    fn collect(&self, source: &ParsedText) -> Option<Value> {
        source
            .text
            .lines()
            .find_map(|line| line.strip_prefix("// @metadata "))
            .and_then(|json| serde_json::from_str(json).ok())
    }
}
