use clap::Parser;
use debarrel_core::DEFAULT_EXTENSIONS;
use std::path::PathBuf;

/// Shared options for every walk over the project tree.
#[derive(Debug, Clone, Parser)]
#[command(name = "scan")]
pub struct ScanConfig {
    /// Root path of the targeted project
    #[arg(long, short = 'r')]
    pub root: PathBuf,

    /// Comma-separated list of file extensions to process, in resolution
    /// priority order
    #[arg(
        long,
        short = 'e',
        value_delimiter = ',',
        default_values_t = DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string())
    )]
    pub extensions: Vec<String>,

    /// Relative path to a .gitignore file to apply ignore rules
    #[arg(long, short = 'g', default_value = ".gitignore")]
    pub gitignore_path: String,

    /// Comma-separated list of directories or files to ignore
    #[arg(long, short = 'i', value_delimiter = ',')]
    pub ignore_paths: Vec<String>,
}

/// Options for the rewrite operation.
#[derive(Debug, Clone, Parser)]
#[command(name = "rewrite")]
pub struct RewriteConfig {
    #[command(flatten)]
    pub scan: ScanConfig,

    /// Relative path where imports should be rewritten
    #[arg(long, short = 't', default_value = ".")]
    pub target_path: String,

    /// Relative path of the barrel tree whose imports get replaced
    #[arg(long, short = 'b', default_value = ".")]
    pub barrel_path: String,

    /// Relative path to a tsconfig.json or jsconfig.json used for alias
    /// resolution
    #[arg(long, short = 'a')]
    pub alias_config_path: Option<String>,

    /// Print a before/after block for every substitution
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
