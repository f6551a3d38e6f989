use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use debarrel_rewrite::{count_barrels, list_barrels, rewrite_imports, RewriteConfig, ScanConfig};
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "debarrel")]
#[command(about = "Replace barrel file imports with direct module imports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Count barrel files in the root path
    Count(ScanConfig),
    /// List barrel files in the root path
    List(ScanConfig),
    /// Rewrite imports that go through barrel files
    Rewrite(RewriteConfig),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Count(cfg) => {
            let total = count_barrels(&cfg)?;
            writeln!(stdout, "{}", total)?;
        }
        Commands::List(cfg) => {
            let barrels = list_barrels(&cfg)?;
            writeln!(stdout, "{} barrel files found", barrels.len())?;
            for path in &barrels {
                writeln!(stdout, "{}", path.display())?;
            }
        }
        Commands::Rewrite(cfg) => {
            info!(
                "Rewriting imports, target '{}', barrels '{}'",
                cfg.target_path, cfg.barrel_path
            );
            let outcome = rewrite_imports(&cfg, &mut stdout)?;
            let elapsed_ms = start.elapsed().as_millis();

            writeln!(stdout, "{} files updated", outcome.files_changed.to_string().cyan())?;
            writeln!(
                stdout,
                "\n{} Finished in {}ms.",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan()
            )?;

            if !outcome.write_failures.is_empty() {
                stdout.flush()?;
                for (path, err) in &outcome.write_failures {
                    eprintln!("{} failed to write {}: {}", "✗".red().bold(), path.display(), err);
                }
                // Non-zero exit so CI catches partial rewrites
                std::process::exit(1);
            }
        }
    }

    stdout.flush()?;
    Ok(())
}
