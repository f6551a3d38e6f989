//! Core utilities for debarrel.
//!
//! This crate provides the building blocks for locating and dissolving
//! barrel files in JavaScript/TypeScript projects:
//! - Scanning re-export statements and local export names out of file text
//! - Resolving path aliases from a tsconfig/jsconfig-style config file
//! - Gitignore-style path filtering
//! - Deterministic, lexically-ordered directory walking

mod alias;
mod constants;
mod filter;
mod paths;
mod scanner;
mod types;
mod walk;

// Re-export public API
pub use alias::AliasResolver;
pub use constants::{ALIAS_SIGIL, DEFAULT_EXTENSIONS, INDEX_STEM};
pub use filter::PathFilter;
pub use paths::path_str;
pub use scanner::{is_index_file, is_supported_extension, local_export_names, re_exports};
pub use types::{Alias, ReExport, ReExportKind};
pub use walk::sorted_walk;
