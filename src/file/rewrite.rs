//! Prefix-based redirection of vendored package paths to real locations.

/// Redirects paths under `prefix` to the same remainder under `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    prefix: String,
    root: String,
}

impl RewriteRule {
    /// Create a rule.
    ///
    /// A trailing slash on either side is ignored, so `/node_modules/@scope`
    /// and `/node_modules/@scope/` behave the same.
    pub fn new(prefix: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            prefix: trim_trailing_slash(prefix.into()),
            root: trim_trailing_slash(root.into()),
        }
    }

    /// The matched prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The real root the prefix maps to.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Apply this rule, or `None` if `path` is not under the prefix.
    ///
    /// The match is on whole segments: `/node_modules/rxjs` covers
    /// `/node_modules/rxjs/index.d.ts` but not `/node_modules/rxjs-compat`.
    pub fn apply(&self, path: &str) -> Option<String> {
        let rest = path.strip_prefix(&self.prefix)?;
        if !(rest.is_empty() || rest.starts_with('/')) {
            return None;
        }
        Some(format!("{}{}", self.root, rest))
    }
}

fn trim_trailing_slash(mut s: String) -> String {
    while s.len() > 1 && s.ends_with('/') {
        s.pop();
    }
    s
}

/// Outcome of [`NameRewriter::rewrite`].
///
/// The two branches are backed by different storage: unchanged paths go to
/// the override and fixture layers, redirected ones to the real filesystem
/// or the external module map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite<'a> {
    /// No rule matched.
    Unchanged(&'a str),
    /// A rule matched and produced this path.
    Redirected(String),
}

/// Ordered list of rewrite rules; the first matching rule wins.
///
/// A rule's prefix must end on a path segment boundary: a rule for
/// `/node_modules/@angular` rewrites `/node_modules/@angular/core/index.d.ts`
/// but leaves `/node_modules/@angularx/a.ts` unchanged.
#[derive(Debug, Clone, Default)]
pub struct NameRewriter {
    rules: Vec<RewriteRule>,
}

impl NameRewriter {
    /// Create a rewriter from rules in priority order.
    pub fn new(rules: impl IntoIterator<Item = RewriteRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// The configured rules.
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Rewrite `path` with the first matching rule.
    pub fn rewrite<'a>(&self, path: &'a str) -> Rewrite<'a> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(path))
            .map_or(Rewrite::Unchanged(path), |rewritten| {
                tracing::trace!(from = path, to = %rewritten, "rewrote path");
                Rewrite::Redirected(rewritten)
            })
    }
}
