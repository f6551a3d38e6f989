use log::{debug, trace};
use path_clean::clean;
use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::Arc,
};

use debarrel_core::{is_index_file, path_str, re_exports, sorted_walk, PathFilter};

/// Barrel directory to ordered re-export target list. Targets keep their
/// statement order and duplicates; after [`BarrelIndex::flatten`] they
/// reference only non-barrel paths.
#[derive(Debug, Default)]
pub struct BarrelIndex {
    dirs: BTreeMap<PathBuf, Vec<String>>,
}

impl BarrelIndex {
    /// Walk `root` and index every barrel: an `index.<ext>` file with at
    /// least one resolvable re-export target.
    pub fn build(root: &Path, filter: &Arc<PathFilter>, extensions: &[String]) -> Self {
        let mut dirs = BTreeMap::new();
        for entry in sorted_walk(root, filter) {
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            if !path.is_file() || !is_index_file(path, extensions) {
                continue;
            }
            let targets: Vec<String> =
                re_exports(path, extensions).into_iter().map(|r| r.target).collect();
            if targets.is_empty() {
                continue;
            }
            let dir = path.parent().unwrap_or(root).to_path_buf();
            trace!("Barrel at {} with {} targets", dir.display(), targets.len());
            dirs.insert(dir, targets);
        }
        debug!("Indexed {} barrel directories", dirs.len());
        Self { dirs }
    }

    /// Expand nested barrels so every directory maps to leaf module paths
    /// only. Expansion always reads the pre-flattening snapshot, which
    /// makes the result independent of iteration order and idempotent. A
    /// visited set scoped to each top-level pass breaks cycles: a branch
    /// that re-enters a visited directory contributes nothing.
    pub fn flatten(&mut self) {
        let raw = self.dirs.clone();
        for (dir, targets) in &raw {
            let mut visited: HashSet<PathBuf> = HashSet::new();
            visited.insert(dir.clone());
            let mut flat = Vec::new();
            for target in targets {
                let nested = clean(dir.join(target));
                if raw.contains_key(&nested) {
                    expand(&nested, target, &raw, &mut visited, &mut flat);
                } else {
                    flat.push(target.clone());
                }
            }
            self.dirs.insert(dir.clone(), flat);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &Vec<String>)> {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

fn expand(
    full_dir: &Path,
    prefix: &str,
    raw: &BTreeMap<PathBuf, Vec<String>>,
    visited: &mut HashSet<PathBuf>,
    out: &mut Vec<String>,
) {
    if visited.contains(full_dir) {
        return;
    }
    let Some(targets) = raw.get(full_dir) else { return };
    visited.insert(full_dir.to_path_buf());
    for target in targets {
        let child = clean(full_dir.join(target));
        let rebased = path_str(&clean(Path::new(prefix).join(target)));
        if raw.contains_key(&child) {
            expand(&child, &rebased, raw, visited, out);
        } else {
            out.push(rebased);
        }
    }
}

/// Barrel file paths under `root`, in walk order. This is the looser
/// file-level view used by the listing surface.
pub fn barrel_files(root: &Path, filter: &Arc<PathFilter>, extensions: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in sorted_walk(root, filter) {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.is_file()
            && is_index_file(path, extensions)
            && !re_exports(path, extensions).is_empty()
        {
            files.push(path.to_path_buf());
        }
    }
    files
}
