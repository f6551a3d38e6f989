use anyhow::{bail, Result};
use log::{debug, info};
use path_clean::clean;
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use debarrel_core::{AliasResolver, PathFilter};

use crate::{
    config::{RewriteConfig, ScanConfig},
    index::{barrel_files, BarrelIndex},
    registry::ModuleRegistry,
    rewriter::{rewrite_tree, RewriteOutcome},
};

/// Count barrel directories that forward at least one resolvable name
/// after flattening.
pub fn count_barrels(cfg: &ScanConfig) -> Result<usize> {
    let (root, filter) = prepare(cfg)?;
    let mut index = BarrelIndex::build(&root, &filter, &cfg.extensions);
    index.flatten();
    let registry = ModuleRegistry::build(&index, &AliasResolver::empty(), &filter, &cfg.extensions);
    Ok(registry.resolved_dir_count())
}

/// List barrel file paths relative to the root, in walk order.
pub fn list_barrels(cfg: &ScanConfig) -> Result<Vec<PathBuf>> {
    let (root, filter) = prepare(cfg)?;
    let files = barrel_files(&root, &filter, &cfg.extensions);
    Ok(files
        .into_iter()
        .map(|file| file.strip_prefix(&root).map(Path::to_path_buf).unwrap_or(file))
        .collect())
}

/// Build the barrel index and registry, then rewrite the target subtree.
/// The index-build phase completes before the first file is touched.
pub fn rewrite_imports<W: Write>(cfg: &RewriteConfig, sink: &mut W) -> Result<RewriteOutcome> {
    let (root, filter) = prepare(&cfg.scan)?;
    info!("Rewriting barrel imports under {}", root.display());

    let aliases = AliasResolver::new(&root, cfg.alias_config_path.as_deref());
    let barrel_root = clean(root.join(&cfg.barrel_path));
    let mut index = BarrelIndex::build(&barrel_root, &filter, &cfg.scan.extensions);
    index.flatten();
    debug!("Flattened {} barrel directories", index.len());
    let registry = ModuleRegistry::build(&index, &aliases, &filter, &cfg.scan.extensions);

    let target_root = clean(root.join(&cfg.target_path));
    if !target_root.exists() {
        bail!("target path does not exist: {}", target_root.display());
    }
    Ok(rewrite_tree(&target_root, &registry, &filter, &cfg.scan.extensions, cfg.verbose, sink))
}

fn prepare(cfg: &ScanConfig) -> Result<(PathBuf, Arc<PathFilter>)> {
    let root = cfg.root.clone();
    if !root.exists() {
        bail!("root path does not exist: {}", root.display());
    }
    let root = root.canonicalize().unwrap_or(root);
    let filter = Arc::new(PathFilter::new(&root, &cfg.ignore_paths, &cfg.gitignore_path));
    Ok((root, filter))
}
