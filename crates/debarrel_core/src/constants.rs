//! Constants for file extension handling.
//!
//! Extensions are configured with their leading dot and their order
//! matters: it is the probe priority when resolving extensionless
//! re-export targets.

/// Default file extensions to process, in resolution priority order
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".js", ".tsx", ".jsx"];

/// Base name stem of barrel file candidates (`index.ts`, `index.js`, ...)
pub const INDEX_STEM: &str = "index";

/// Leading character of alias-qualified import paths
pub const ALIAS_SIGIL: char = '@';
