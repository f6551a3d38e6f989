//! Barrel import rewriting for JavaScript/TypeScript projects.
//!
//! This crate indexes barrel files (re-export aggregators like
//! `index.ts`), flattens nested barrels into leaf module references, and
//! rewrites consumer imports to target the concrete defining module
//! directly.
//!
//! # Examples
//!
//! ```no_run
//! use debarrel_rewrite::{rewrite_imports, RewriteConfig, ScanConfig};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = RewriteConfig {
//!     scan: ScanConfig {
//!         root: std::path::PathBuf::from("/path/to/project"),
//!         extensions: vec![".ts".into(), ".js".into(), ".tsx".into(), ".jsx".into()],
//!         gitignore_path: ".gitignore".into(),
//!         ignore_paths: vec![],
//!     },
//!     target_path: ".".into(),
//!     barrel_path: ".".into(),
//!     alias_config_path: Some("tsconfig.json".into()),
//!     verbose: false,
//! };
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! let outcome = rewrite_imports(&cfg, &mut stdout)?;
//! writeln!(stdout, "{} files updated", outcome.files_changed)?;
//! # Ok(())
//! # }
//! ```

mod config;
mod index;
mod ops;
mod registry;
mod rewriter;

// Re-export public API
pub use config::{RewriteConfig, ScanConfig};
pub use index::{barrel_files, BarrelIndex};
pub use ops::{count_barrels, list_barrels, rewrite_imports};
pub use registry::ModuleRegistry;
pub use rewriter::{rewrite_tree, RewriteOutcome};
