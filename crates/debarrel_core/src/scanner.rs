use log::{debug, trace};
use path_clean::clean;
use regex::Regex;
use std::{fs, path::Path, sync::LazyLock};

use crate::constants::INDEX_STEM;
use crate::types::{ReExport, ReExportKind};

// export * from './module' || export * as Name from './module' ||
// export type { Name } from './module' || export { Name } from './module'
static RE_EXPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)export\s+(\*\s+from|\*\s+as\s+\w+\s+from|type\s+\{[^}]+\}\s+from|\{[^}]+\}\s+from)\s+['"]([^'"]+)['"]"#,
    )
    .unwrap()
});

// export [default] class|function|const|let|var|enum|type|interface Name ||
// export { Names }
static LOCAL_EXPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"export\s+(?:default\s+)?(?:class|function|const|let|var|enum|type|interface)\s+([A-Za-z_$][A-Za-z0-9_$]*)|\bexport\s+\{([^}]*)\}",
    )
    .unwrap()
});

/// Extract the re-export targets of a file, in statement order.
///
/// Each target path is resolved against the file's directory: an existing
/// directory is recorded verbatim, otherwise `extensions` are probed in
/// order and the first hit is appended. Targets that resolve to nothing
/// are dropped. Duplicates are preserved.
pub fn re_exports(file: &Path, extensions: &[String]) -> Vec<ReExport> {
    let text = match fs::read_to_string(file) {
        Ok(text) => text,
        Err(err) => {
            debug!("Unable to read {}: {}", file.display(), err);
            return Vec::new();
        }
    };

    let dir = file.parent().unwrap_or(Path::new("."));
    let mut out = Vec::new();
    for caps in RE_EXPORT_LINE.captures_iter(&text) {
        let clause = &caps[1];
        let target = &caps[2];
        let resolved = clean(dir.join(target));
        if resolved.is_dir() {
            trace!("Re-export of directory '{}' in {}", target, file.display());
            out.push(ReExport { target: target.to_string(), kind: kind_of(clause) });
            continue;
        }
        for ext in extensions {
            let candidate = format!("{}{}", resolved.display(), ext);
            if Path::new(&candidate).exists() {
                out.push(ReExport { target: format!("{target}{ext}"), kind: kind_of(clause) });
                break;
            }
        }
        // No extension matched: the target is dropped
    }
    out
}

/// Extract the export names a module declares or forwards.
///
/// Covers named declarations (`export const Foo`, `export default class
/// Bar`, ...) and the members of `export { ... }` lists, where `X as Y`
/// contributes the name consumers import (`Y`) and a `type` marker is
/// stripped.
pub fn local_export_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    for caps in LOCAL_EXPORT_LINE.captures_iter(text) {
        if let Some(declared) = caps.get(1) {
            names.push(declared.as_str().to_string());
        } else if let Some(list) = caps.get(2) {
            for token in list.as_str().split(',') {
                if let Some(name) = export_list_name(token) {
                    names.push(name);
                }
            }
        }
    }
    names
}

/// Barrel file candidate test: base name equals exactly `index<ext>`.
pub fn is_index_file(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    extensions.iter().any(|ext| name == format!("{INDEX_STEM}{ext}"))
}

/// General supported-extension test, a looser suffix match than
/// [`is_index_file`].
pub fn is_supported_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

fn kind_of(clause: &str) -> ReExportKind {
    let lowered = clause.to_ascii_lowercase();
    if lowered.starts_with('*') {
        if lowered.contains(" as ") { ReExportKind::AllAsName } else { ReExportKind::All }
    } else if lowered.starts_with("type") {
        ReExportKind::TypeNamed
    } else {
        ReExportKind::Named
    }
}

fn export_list_name(token: &str) -> Option<String> {
    let token = token.trim();
    let token = token.strip_prefix("type ").map(str::trim).unwrap_or(token);
    let name = match token.split_once(" as ") {
        Some((_, public)) => public.trim(),
        None => token,
    };
    let starts_like_identifier =
        name.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if starts_like_identifier { Some(name.to_string()) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec![".ts".to_string(), ".js".to_string(), ".tsx".to_string(), ".jsx".to_string()]
    }

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_re_exports_kinds_and_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "mod/a.ts", "export const A = 1;");
        create_test_file(root, "mod/b.ts", "export const B = 1;");
        create_test_file(root, "mod/nested/x.ts", "export const X = 1;");
        let barrel = create_test_file(
            root,
            "mod/index.ts",
            "export * from './a';\nexport * as NS from './b';\nexport { X } from './nested';\nexport type { A } from './a';\nexport * from './missing';\n",
        );

        let found = re_exports(&barrel, &exts());
        let targets: Vec<&str> = found.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["./a.ts", "./b.ts", "./nested", "./a.ts"]);
        let kinds: Vec<ReExportKind> = found.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ReExportKind::All,
                ReExportKind::AllAsName,
                ReExportKind::Named,
                ReExportKind::TypeNamed
            ]
        );
    }

    #[test]
    fn test_re_exports_probe_priority_follows_configured_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "mod/c.ts", "export const C = 1;");
        create_test_file(root, "mod/c.js", "export const C = 1;");
        let barrel = create_test_file(root, "mod/index.ts", "export * from './c';\n");

        let ts_first = re_exports(&barrel, &exts());
        assert_eq!(ts_first[0].target, "./c.ts");

        let js_first = vec![".js".to_string(), ".ts".to_string()];
        let found = re_exports(&barrel, &js_first);
        assert_eq!(found[0].target, "./c.js");
    }

    #[test]
    fn test_re_exports_preserves_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "mod/a.ts", "export const A = 1;");
        let barrel =
            create_test_file(root, "mod/index.ts", "export * from './a';\nexport * from './a';\n");

        let found = re_exports(&barrel, &exts());
        let targets: Vec<&str> = found.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["./a.ts", "./a.ts"]);
    }

    #[test]
    fn test_re_exports_unreadable_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope/index.ts");
        assert!(re_exports(&missing, &exts()).is_empty());
    }

    #[test]
    fn test_local_export_names_declarations() {
        let text = "export class Button {}\n\
                    export default function render() {}\n\
                    export const SIZE = 2;\n\
                    export let state = 0;\n\
                    export var legacy = 0;\n\
                    export enum Color { Red }\n\
                    export type Props = {};\n\
                    export interface Theme {}\n";
        assert_eq!(
            local_export_names(text),
            vec!["Button", "render", "SIZE", "state", "legacy", "Color", "Props", "Theme"]
        );
    }

    #[test]
    fn test_local_export_names_list_members() {
        let text = "const a = 1;\nconst b = 2;\nexport { a, b as renamed, type Kind };\n";
        assert_eq!(local_export_names(text), vec!["a", "renamed", "Kind"]);
    }

    #[test]
    fn test_local_export_names_forwarding_list_counts() {
        // A leaf module forwarding names still provides them
        let text = "export { Widget } from './widget';\n";
        assert_eq!(local_export_names(text), vec!["Widget"]);
    }

    #[test]
    fn test_local_export_names_ignores_destructuring() {
        let text = "export const { a, b } = config;\n";
        assert!(local_export_names(text).is_empty());
    }

    #[test]
    fn test_is_index_file_exact_match() {
        let extensions = exts();
        assert!(is_index_file(Path::new("src/index.ts"), &extensions));
        assert!(is_index_file(Path::new("index.jsx"), &extensions));
        assert!(!is_index_file(Path::new("src/myindex.ts"), &extensions));
        assert!(!is_index_file(Path::new("src/index.spec.ts"), &extensions));
        assert!(!is_index_file(Path::new("src/index.md"), &extensions));
    }

    #[test]
    fn test_is_supported_extension_suffix_match() {
        let extensions = exts();
        assert!(is_supported_extension(Path::new("src/app.ts"), &extensions));
        assert!(is_supported_extension(Path::new("src/app.test.ts"), &extensions));
        assert!(!is_supported_extension(Path::new("src/app.rs"), &extensions));
    }
}
