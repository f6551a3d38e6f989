use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::{debug, warn};
use path_clean::clean;
use std::path::{Path, PathBuf};

/// Decides which paths the walks skip. Combines an optional
/// gitignore-style rule file with an explicit ignore list; directories in
/// the explicit list ignore their whole subtree.
#[derive(Debug)]
pub struct PathFilter {
    gitignore: Option<Gitignore>,
    manual: Vec<ManualIgnore>,
    root: PathBuf,
}

#[derive(Debug)]
struct ManualIgnore {
    path: PathBuf,
    is_dir: bool,
}

impl PathFilter {
    pub fn new(root: &Path, ignore_paths: &[String], gitignore_path: &str) -> Self {
        let gitignore = load_gitignore(root, gitignore_path);
        let manual = ignore_paths
            .iter()
            .filter(|rel| !rel.is_empty())
            .map(|rel| {
                let path = clean(root.join(rel));
                let is_dir = path.is_dir();
                ManualIgnore { path, is_dir }
            })
            .collect();
        Self { gitignore, manual, root: root.to_path_buf() }
    }

    /// Deterministic for fixed inputs; queried for directories (subtree
    /// pruning) and files alike.
    pub fn is_ignored(&self, path: &Path) -> bool {
        if let Some(gitignore) = &self.gitignore
            && let Ok(relative) = path.strip_prefix(&self.root)
            && gitignore.matched_path_or_any_parents(relative, path.is_dir()).is_ignore()
        {
            return true;
        }
        self.manual.iter().any(|entry| {
            if entry.is_dir { path.starts_with(&entry.path) } else { path == entry.path }
        })
    }
}

fn load_gitignore(root: &Path, gitignore_rel_path: &str) -> Option<Gitignore> {
    if gitignore_rel_path.is_empty() {
        return None;
    }
    let full_path = root.join(gitignore_rel_path);
    if !full_path.is_file() {
        debug!("No gitignore file at {}", full_path.display());
        return None;
    }
    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(&full_path) {
        warn!("Unable to read gitignore {}: {}", full_path.display(), err);
        return None;
    }
    match builder.build() {
        Ok(gitignore) => Some(gitignore),
        Err(err) => {
            warn!("Unable to compile gitignore {}: {}", full_path.display(), err);
            None
        }
    }
}
