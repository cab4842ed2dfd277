//! Standard module resolution over a [`ModuleResolutionHost`].
//!
//! Relative and rooted names resolve against the containing file's
//! directory. Bare names are looked up in `node_modules` directories, from
//! the containing directory upwards to the configured base directory.
//!
//! For each candidate base path, the first existing file wins:
//!
//! 1. `<base>.ts`, `<base>.tsx`, `<base>.d.ts`
//! 2. the `typings`/`types` entry of `<base>/package.json`
//! 3. `<base>/index.ts`, `<base>/index.tsx`, `<base>/index.d.ts`

use serde_json::Value;

use crate::compiler::{ModuleResolutionHost, ResolutionOptions};

const EXTENSIONS: [&str; 3] = [".ts", ".tsx", ".d.ts"];

/// Resolve `module_name` imported from `containing_file`.
pub fn resolve_module(
    module_name: &str,
    containing_file: &str,
    options: &ResolutionOptions,
    host: &dyn ModuleResolutionHost,
) -> Option<String> {
    host.trace(&format!(
        "======== Resolving module '{module_name}' from '{containing_file}'. ========"
    ));

    let containing_dir = dirname(containing_file);
    let resolved = if module_name.starts_with('/') {
        try_base(&normalize(module_name), host)
    } else if is_relative(module_name) {
        try_base(&normalize(&join(containing_dir, module_name)), host)
    } else {
        ancestors(containing_dir, &options.base_dir).find_map(|dir| {
            let base = normalize(&join(&dir, &format!("node_modules/{module_name}")));
            try_base(&base, host)
        })
    };

    match &resolved {
        Some(path) => host.trace(&format!(
            "======== Module name '{module_name}' was successfully resolved to '{path}'. ========"
        )),
        None => host.trace(&format!(
            "======== Module name '{module_name}' was not resolved. ========"
        )),
    }
    resolved
}

fn is_relative(name: &str) -> bool {
    name == "." || name == ".." || name.starts_with("./") || name.starts_with("../")
}

fn try_base(base: &str, host: &dyn ModuleResolutionHost) -> Option<String> {
    let probe = |candidate: String| {
        let found = host.file_exists(&candidate);
        if !found {
            host.trace(&format!("File '{candidate}' does not exist."));
        }
        found.then_some(candidate)
    };

    EXTENSIONS
        .iter()
        .find_map(|ext| probe(format!("{base}{ext}")))
        .or_else(|| package_typings(base, host).and_then(&probe))
        .or_else(|| {
            EXTENSIONS
                .iter()
                .find_map(|ext| probe(format!("{base}/index{ext}")))
        })
}

fn package_typings(base: &str, host: &dyn ModuleResolutionHost) -> Option<String> {
    let manifest = format!("{base}/package.json");
    if !host.file_exists(&manifest) {
        return None;
    }
    let text = host.read_file(&manifest).ok()?;
    let json: Value = serde_json::from_str(&text).ok()?;
    let typings = ["typings", "types"]
        .iter()
        .find_map(|key| json.get(*key)?.as_str())?;
    Some(normalize(&join(base, typings)))
}

/// Directory part of a slash-delimited path.
pub(crate) fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => "",
    }
}

/// Join two slash-delimited paths.
pub(crate) fn join(base: &str, rest: &str) -> String {
    if rest.starts_with('/') || base.is_empty() {
        rest.to_string()
    } else if base.ends_with('/') {
        format!("{base}{rest}")
    } else {
        format!("{base}/{rest}")
    }
}

/// Lexically collapse `.`, `..`, and repeated slashes in a rooted path.
pub(crate) fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            name => parts.push(name),
        }
    }
    format!("/{}", parts.join("/"))
}

/// `dir` and its parents, stopping at `stop` or the root.
fn ancestors(dir: &str, stop: &str) -> impl Iterator<Item = String> {
    let stop = normalize(stop);
    let mut next = Some(normalize(dir));
    std::iter::from_fn(move || {
        let current = next.take()?;
        if current != stop && current != "/" {
            next = Some(dirname(&current).to_string());
        }
        Some(current)
    })
}
