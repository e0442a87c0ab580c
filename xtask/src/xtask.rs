use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use xshell::{cmd, Shell};

/// Feature sets the library is tested under. Each lane encoding and each block-driver path has
/// to pass the same suite.
const FEATURE_SETS: &[&str] = &[
    "std,lane-complementing,fast-1344",
    "std,lane-complementing",
    "std,fast-1344",
    "std",
    "std,zeroize",
];

#[derive(Debug, Parser)]
struct Xtask {
    #[clap(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format, lint, and test all feature combinations.
    Ci,
    /// Format the code.
    Fmt,
    /// Run the benchmarks.
    Bench {
        /// Only run benchmarks matching this filter.
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    let xtask = Xtask::parse();

    let sh = Shell::new()?;
    sh.change_dir(project_root()?);

    match xtask.cmd.unwrap_or(Command::Ci) {
        Command::Ci => ci(&sh),
        Command::Fmt => fmt(&sh),
        Command::Bench { filter } => bench(&sh, filter),
    }
}

fn ci(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all --check").run()?;
    cmd!(sh, "cargo clippy --all-features --all-targets -- -D warnings").run()?;
    cmd!(sh, "cargo build --no-default-features").run()?;
    for features in FEATURE_SETS {
        cmd!(sh, "cargo test --no-default-features --features {features}").run()?;
    }
    Ok(())
}

fn fmt(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all").run()?;
    Ok(())
}

fn bench(sh: &Shell, filter: Option<String>) -> Result<()> {
    let filter = filter.as_deref();
    cmd!(sh, "cargo bench --bench benchmarks -- {filter...}").run()?;
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("xtask must live inside the workspace"))
}
