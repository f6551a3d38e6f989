use ignore::{Walk, WalkBuilder};
use std::{ffi::OsStr, path::Path, sync::Arc};

use crate::filter::PathFilter;

/// Build a lexically-ordered walk rooted at `root`, pruned through the
/// path filter. A filtered directory is never descended into; a filtered
/// file is skipped. Standard gitignore handling is off since the filter
/// owns all ignore decisions.
pub fn sorted_walk(root: &Path, filter: &Arc<PathFilter>) -> Walk {
    let filter = Arc::clone(filter);
    WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a: &OsStr, b: &OsStr| a.cmp(b))
        .filter_entry(move |entry| !filter.is_ignored(entry.path()))
        .build()
}
