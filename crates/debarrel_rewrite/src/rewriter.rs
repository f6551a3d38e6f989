use log::{debug, error, trace};
use path_clean::clean;
use regex::{Captures, Regex};
use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};

use debarrel_core::{is_supported_extension, path_str, sorted_walk, PathFilter, ALIAS_SIGIL};

use crate::registry::ModuleRegistry;

// import type { Name } from 'module' || import { Name } from 'module'
static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+(type \{[^}]+\}|\{[^}]+\})\s+from\s+(['"])([^'"]+)['"]"#).unwrap()
});

// type { exportName }
static TYPE_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"type\s+\{?\s*(\w+)").unwrap());

// exportName as Alias
static ALIASED_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s+as\s+\w+").unwrap());

/// What a rewrite pass did. A failed write is reported here and never
/// counted as changed.
#[derive(Debug, Default)]
pub struct RewriteOutcome {
    pub files_changed: usize,
    pub write_failures: Vec<(PathBuf, String)>,
}

/// Rewrite every supported file under `target_root`, replacing barrel
/// imports with direct module imports. Files are persisted only when
/// their content actually changed; the in-place write keeps the original
/// permissions. With `verbose`, a before/after block per substitution
/// goes to `sink`.
pub fn rewrite_tree<W: Write>(
    target_root: &Path,
    registry: &ModuleRegistry,
    filter: &Arc<PathFilter>,
    extensions: &[String],
    verbose: bool,
    sink: &mut W,
) -> RewriteOutcome {
    let mut outcome = RewriteOutcome::default();
    for entry in sorted_walk(target_root, filter) {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if !path.is_file() || !is_supported_extension(path, extensions) {
            continue;
        }
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!("Skipping unreadable file {}: {}", path.display(), err);
                continue;
            }
        };
        let rewritten = rewrite_text(&contents, path, registry, verbose, sink);
        if rewritten == contents {
            continue;
        }
        match fs::write(path, rewritten.as_bytes()) {
            Ok(()) => outcome.files_changed += 1,
            Err(err) => {
                error!("Failed to write {}: {}", path.display(), err);
                outcome.write_failures.push((path.to_path_buf(), err.to_string()));
            }
        }
    }
    outcome
}

/// Replace the barrel imports of one file's text in a single
/// non-overlapping pass. Statements whose path is not a resolved barrel
/// identity, or whose names all fail to resolve, are left untouched.
pub fn rewrite_text<W: Write>(
    contents: &str,
    file: &Path,
    registry: &ModuleRegistry,
    verbose: bool,
    sink: &mut W,
) -> String {
    let dir = file.parent().unwrap_or(Path::new("."));
    IMPORT_LINE
        .replace_all(contents, |caps: &Captures| {
            let statement = &caps[0];
            let clause = &caps[1];
            let quote = &caps[2];
            let import_path = &caps[3];

            let is_alias_path = import_path.starts_with(ALIAS_SIGIL);
            let key = if is_alias_path {
                import_path.to_string()
            } else {
                path_str(&clean(dir.join(import_path)))
            };
            if !registry.is_resolved(&key) {
                trace!("'{}' is not a barrel import, leaving as is", import_path);
                return statement.to_string();
            }

            let is_type_clause = clause.starts_with("type");
            let members = clause
                .strip_prefix("type")
                .unwrap_or(clause)
                .trim()
                .trim_start_matches('{')
                .trim_end_matches('}');

            let mut ordered_paths: Vec<String> = Vec::new();
            let mut members_by_path: HashMap<String, Vec<String>> = HashMap::new();
            let mut unresolved: Vec<String> = Vec::new();

            for token in members.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                let name = member_name(token);
                match registry.resolve_name(&key, &name) {
                    Some(target) => {
                        let new_path = if is_alias_path {
                            path_str(&clean(Path::new(&key).join(target)))
                        } else {
                            relative_path(&clean(Path::new(import_path).join(target)))
                        };
                        if !ordered_paths.contains(&new_path) {
                            ordered_paths.push(new_path.clone());
                        }
                        members_by_path.entry(new_path).or_default().push(token.to_string());
                    }
                    None => unresolved.push(token.to_string()),
                }
            }

            if ordered_paths.is_empty() {
                return statement.to_string();
            }

            let mut statements = Vec::new();
            for new_path in &ordered_paths {
                let tokens = &members_by_path[new_path];
                let type_only =
                    is_type_clause || (tokens.len() == 1 && tokens[0].contains("type "));
                let joined = if type_only {
                    tokens.iter().map(|t| member_name(t)).collect::<Vec<_>>().join(", ")
                } else {
                    tokens.join(", ")
                };
                let prefix = if type_only { "type " } else { "" };
                statements
                    .push(format!("import {prefix}{{ {joined} }} from {quote}{new_path}{quote}"));
            }
            if !unresolved.is_empty() {
                // Names the registry cannot place keep importing through
                // the original path
                let prefix = if is_type_clause { "type " } else { "" };
                statements.push(format!(
                    "import {prefix}{{ {} }} from {quote}{import_path}{quote}",
                    unresolved.join(", ")
                ));
            }
            let replacement = statements.join("\n");

            if verbose {
                let _ = writeln!(
                    sink,
                    "Updating imports in {}:\nBefore:\n{}\nAfter:\n{}\n",
                    file.display(),
                    statement,
                    replacement
                );
            }
            replacement
        })
        .into_owned()
}

fn member_name(token: &str) -> String {
    if let Some(caps) = TYPE_MEMBER.captures(token) {
        return caps[1].to_string();
    }
    if let Some(caps) = ALIASED_MEMBER.captures(token) {
        return caps[1].to_string();
    }
    token.to_string()
}

fn relative_path(path: &Path) -> String {
    let joined = path_str(path);
    if joined.starts_with("./") || joined.starts_with("../") {
        joined
    } else {
        format!("./{joined}")
    }
}
