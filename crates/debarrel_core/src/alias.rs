use log::{debug, trace, warn};
use path_clean::clean;
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::paths::path_str;
use crate::types::Alias;

/// Maps real directories to the symbolic alias prefixes configured in a
/// tsconfig/jsconfig-style file.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    rules: Vec<AliasRule>,
}

#[derive(Debug, Clone)]
struct AliasRule {
    real_dir: PathBuf,
    alias: String,
}

#[derive(Debug, Default, Deserialize)]
struct AliasConfig {
    #[serde(default, rename = "compilerOptions")]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
struct CompilerOptions {
    #[serde(default, rename = "baseUrl")]
    base_url: Option<String>,
    #[serde(default)]
    paths: HashMap<String, Vec<String>>,
}

impl AliasResolver {
    /// Load alias rules from `root/config_path`. A missing, unreadable or
    /// malformed config yields a resolver with zero rules, never an error.
    pub fn new(root: &Path, config_path: Option<&str>) -> Self {
        let rules = match config_path {
            Some(rel) if !rel.is_empty() => load_rules(root, rel),
            _ => Vec::new(),
        };
        debug!("Loaded {} alias rules", rules.len());
        Self { rules }
    }

    /// A resolver with no rules; every lookup falls back to identity.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Map a directory to its symbolic form. The rule with the longest
    /// matching real-directory prefix wins, ties broken by alias lexical
    /// order. Without a match, both fields carry the directory itself.
    pub fn alias_path(&self, dir: &Path) -> Alias {
        for rule in &self.rules {
            if let Ok(remainder) = dir.strip_prefix(&rule.real_dir) {
                let full = clean(Path::new(&rule.alias).join(remainder));
                trace!("Aliased {} to {}", dir.display(), full.display());
                return Alias { short_path: rule.alias.clone(), full_path: path_str(&full) };
            }
        }
        Alias { short_path: path_str(dir), full_path: path_str(dir) }
    }
}

fn load_rules(root: &Path, config_rel_path: &str) -> Vec<AliasRule> {
    let config_path = root.join(config_rel_path);
    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(err) => {
            warn!("Unable to read alias config {}: {}", config_path.display(), err);
            return Vec::new();
        }
    };

    // Strip // comments, tsconfig files routinely carry them
    let content_no_comments: String = content
        .lines()
        .map(|line| if let Some(idx) = line.find("//") { &line[..idx] } else { line })
        .collect::<Vec<_>>()
        .join("\n");

    let config: AliasConfig = match serde_json::from_str(&content_no_comments) {
        Ok(config) => config,
        Err(err) => {
            warn!("Ignoring malformed alias config {}: {}", config_path.display(), err);
            return Vec::new();
        }
    };

    let base_url = config.compiler_options.base_url.unwrap_or_else(|| ".".to_string());
    let config_dir = config_path.parent().unwrap_or(root);
    let base = clean(config_dir.join(&base_url));

    let mut rules = Vec::new();
    for (alias, templates) in &config.compiler_options.paths {
        // Only wildcard-suffixed alias/template pairs are meaningful
        let Some(alias_prefix) = alias.strip_suffix("/*") else {
            trace!("Skipping non-wildcard alias '{}'", alias);
            continue;
        };
        for template in templates {
            let Some(template_prefix) = template.strip_suffix("/*") else {
                continue;
            };
            let real_dir = clean(base.join(template_prefix));
            trace!("Alias rule: {} -> '{}'", real_dir.display(), alias_prefix);
            rules.push(AliasRule { real_dir, alias: alias_prefix.to_string() });
        }
    }

    // Longest real-directory prefix first, alias lexical order on ties
    rules.sort_by(|a, b| {
        b.real_dir
            .as_os_str()
            .len()
            .cmp(&a.real_dir.as_os_str().len())
            .then_with(|| a.alias.cmp(&b.alias))
    });
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_alias_path_simple() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@components/*": ["src/components/*"] } } }"#,
        );

        let resolver = AliasResolver::new(root, Some("tsconfig.json"));
        let alias = resolver.alias_path(&root.join("src/components/buttons"));
        assert_eq!(alias.short_path, "@components");
        assert_eq!(alias.full_path, "@components/buttons");

        let exact = resolver.alias_path(&root.join("src/components"));
        assert_eq!(exact.full_path, "@components");
    }

    #[test]
    fn test_alias_path_longest_prefix_wins() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "@app/*": ["src/*"], "@components/*": ["src/components/*"] } } }"#,
        );

        let resolver = AliasResolver::new(root, Some("tsconfig.json"));
        let deep = resolver.alias_path(&root.join("src/components/buttons"));
        assert_eq!(deep.short_path, "@components");
        let shallow = resolver.alias_path(&root.join("src/lib"));
        assert_eq!(shallow.short_path, "@app");
        assert_eq!(shallow.full_path, "@app/lib");
    }

    #[test]
    fn test_alias_path_tie_breaks_lexically() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "@zeta/*": ["src/*"], "@alpha/*": ["src/*"] } } }"#,
        );

        let resolver = AliasResolver::new(root, Some("tsconfig.json"));
        let alias = resolver.alias_path(&root.join("src/lib"));
        assert_eq!(alias.short_path, "@alpha");
    }

    #[test]
    fn test_alias_path_identity_without_match() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let resolver = AliasResolver::empty();
        let dir = root.join("src/other");
        let alias = resolver.alias_path(&dir);
        assert_eq!(alias.short_path, dir.to_string_lossy());
        assert_eq!(alias.full_path, dir.to_string_lossy());
    }

    #[test]
    fn test_base_url_prefixes_real_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "baseUrl": "src", "paths": { "@components/*": ["components/*"] } } }"#,
        );

        let resolver = AliasResolver::new(root, Some("tsconfig.json"));
        let alias = resolver.alias_path(&root.join("src/components/Button"));
        assert_eq!(alias.full_path, "@components/Button");
    }

    #[test]
    fn test_missing_config_degrades_to_zero_rules() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let resolver = AliasResolver::new(root, Some("tsconfig.json"));
        let dir = root.join("src/components");
        assert_eq!(resolver.alias_path(&dir).short_path, dir.to_string_lossy());
    }

    #[test]
    fn test_malformed_config_degrades_to_zero_rules() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "tsconfig.json", r#"{ "compilerOptions": { "paths": "nope" }"#);

        let resolver = AliasResolver::new(root, Some("tsconfig.json"));
        let dir = root.join("src/components");
        assert_eq!(resolver.alias_path(&dir).short_path, dir.to_string_lossy());
    }

    #[test]
    fn test_comments_are_stripped_before_parsing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "tsconfig.json",
            "{\n  // project aliases\n  \"compilerOptions\": {\n    \"paths\": { \"@lib/*\": [\"lib/*\"] } // wildcard\n  }\n}\n",
        );

        let resolver = AliasResolver::new(root, Some("tsconfig.json"));
        assert_eq!(resolver.alias_path(&root.join("lib/util")).full_path, "@lib/util");
    }

    #[test]
    fn test_non_wildcard_pairs_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "@utils": ["src/utils"], "@lib/*": ["src/lib"] } } }"#,
        );

        let resolver = AliasResolver::new(root, Some("tsconfig.json"));
        let utils = root.join("src/utils");
        assert_eq!(resolver.alias_path(&utils).short_path, utils.to_string_lossy());
        let lib = root.join("src/lib");
        assert_eq!(resolver.alias_path(&lib).short_path, lib.to_string_lossy());
    }
}
