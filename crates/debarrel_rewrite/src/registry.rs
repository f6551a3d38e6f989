use log::{debug, trace};
use path_clean::clean;
use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::PathBuf,
    sync::Arc,
};

use debarrel_core::{
    is_supported_extension, local_export_names, path_str, sorted_walk, AliasResolver, PathFilter,
};

use crate::index::BarrelIndex;

/// Queryable result of an index build: which barrel identities forward at
/// least one concrete name, and which module declares each name.
///
/// Every barrel directory registers under two identities, its raw path
/// and its alias-qualified path. Built once per invocation, read-only
/// during rewriting.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    existence: BTreeSet<String>,
    resolver: HashMap<(String, String), String>,
    resolved_dirs: BTreeSet<PathBuf>,
}

impl ModuleRegistry {
    pub fn build(
        index: &BarrelIndex,
        aliases: &AliasResolver,
        filter: &Arc<PathFilter>,
        extensions: &[String],
    ) -> Self {
        let mut registry = Self::default();
        for (barrel_dir, targets) in index.iter() {
            let alias = aliases.alias_path(barrel_dir);
            let raw_identity = path_str(barrel_dir);
            for target in targets {
                let module_root = clean(barrel_dir.join(target));
                let stem = path_str(&clean(PathBuf::from(target).with_extension("")));
                for entry in sorted_walk(&module_root, filter) {
                    let Ok(entry) = entry else { continue };
                    let path = entry.path();
                    if !path.is_file() || !is_supported_extension(path, extensions) {
                        continue;
                    }
                    let text = match fs::read_to_string(path) {
                        Ok(text) => text,
                        Err(err) => {
                            debug!("Skipping unreadable module {}: {}", path.display(), err);
                            continue;
                        }
                    };
                    for name in local_export_names(&text) {
                        trace!("'{}' in {} resolves to '{}'", name, raw_identity, stem);
                        registry.existence.insert(alias.full_path.clone());
                        registry.existence.insert(raw_identity.clone());
                        registry.resolved_dirs.insert(barrel_dir.clone());
                        registry
                            .resolver
                            .insert((alias.full_path.clone(), name.clone()), stem.clone());
                        registry.resolver.insert((raw_identity.clone(), name), stem.clone());
                    }
                }
            }
        }
        debug!(
            "Registry holds {} identities and {} name mappings",
            registry.existence.len(),
            registry.resolver.len()
        );
        registry
    }

    /// Whether `identity` is a barrel that forwards at least one name.
    pub fn is_resolved(&self, identity: &str) -> bool {
        self.existence.contains(identity)
    }

    /// The extensionless module path declaring `name` under `identity`.
    pub fn resolve_name(&self, identity: &str, name: &str) -> Option<&str> {
        self.resolver.get(&(identity.to_string(), name.to_string())).map(String::as_str)
    }

    /// Number of distinct barrel directories with at least one resolvable
    /// name after flattening.
    pub fn resolved_dir_count(&self) -> usize {
        self.resolved_dirs.len()
    }
}
