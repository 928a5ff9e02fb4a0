//! deadmethod CLI - unused class method detector for TypeScript projects.
//!
//! Features:
//! - Project root or source directory as the only required argument
//! - tsconfig.json driven file set (extends, include/exclude, allowJs)
//! - Controller and declaration files are usage sources, never scan targets
//! - Optional keep-going mode for partially broken code bases

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use deadmethod_core::{init_structured_logging, print_plain, DeadMethod};

const USAGE: &str = "Usage: deadmethod /absolute/path/to/your/project-or-src";

#[derive(Parser, Debug)]
#[command(author, version, about = "Find class methods that nothing references in a TypeScript project")]
pub struct Cli {
    /// Project root (containing tsconfig.json) or its source directory
    path: Option<PathBuf>,

    /// Extra glob, relative to the source directory, of files not to scan
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Skip files that fail to parse and methods that fail to resolve
    #[arg(long)]
    keep_going: bool,
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] deadmethod internal error: {}", info);
        eprintln!("[PANIC] No results were printed.");
    }));

    // Initialize structured logging (JSON to stderr, respects RUST_LOG)
    init_structured_logging();

    let cli = Cli::parse();

    let Some(path) = cli.path else {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    };

    let result = DeadMethod::new(&path)
        .exclude(cli.exclude)
        .keep_going(cli.keep_going)
        .analyze()?;

    print_plain(&result.findings).context("Failed to write report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "deadmethod",
            "/p",
            "--exclude",
            "**/*.spec.ts",
            "--exclude",
            "legacy/**",
            "--keep-going",
        ]);
        assert_eq!(cli.path, Some(PathBuf::from("/p")));
        assert_eq!(cli.exclude, vec!["**/*.spec.ts", "legacy/**"]);
        assert!(cli.keep_going);
    }

    #[test]
    fn test_cli_path_optional() {
        let cli = Cli::parse_from(["deadmethod"]);
        assert!(cli.path.is_none());
        assert!(!cli.keep_going);
    }
}
