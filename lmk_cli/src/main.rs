//! LMK scanner CLI
//!
//! Thin wrapper over the `lmk_lexer` pipeline: scan one source file against
//! a catalog and optionally dump the token stream to JSON.

use clap::Parser;
use lmk_lexer::config::runtime::ScanPreferences;
use lmk_lexer::pipeline;
use lmk_lexer::preprocess::PreprocessOptions;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "lmk", version, about = "Tokenize LMK markup sources")]
struct Cli {
    /// Source file to scan
    source: PathBuf,

    /// Token type catalog (TOML)
    #[arg(short, long, default_value = "catalog.toml")]
    catalog: PathBuf,

    /// Write the token stream to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Overwrite an existing output file
    #[arg(long)]
    force: bool,

    /// Name of the fallback token type for unmatched text
    #[arg(long)]
    default_type: Option<String>,

    /// Suppress the scan summary on stdout
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = lmk_lexer::logging::init_global_logging() {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("scan failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), pipeline::PipelineError> {
    log::info!(
        "scanning {} with catalog {}",
        cli.source.display(),
        cli.catalog.display()
    );

    let prefs = ScanPreferences {
        default_type: cli.default_type.clone(),
        log_token_statistics: !cli.quiet,
        ..ScanPreferences::default()
    };

    let result = pipeline::scan_file_with(
        &cli.source,
        &cli.catalog,
        &PreprocessOptions::default(),
        &prefs,
    )?;

    if !cli.quiet {
        println!("{}: {}", cli.source.display(), result.summary());
    }

    if let Some(output) = &cli.output {
        let source_name = cli.source.display().to_string();
        pipeline::write_token_dump(output, &source_name, &result, cli.pretty, cli.force)?;
        if !cli.quiet {
            println!("tokens written to {}", output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_minimal_invocation() {
        let cli = Cli::parse_from(["lmk", "input.lmk"]);
        assert_eq!(cli.source, PathBuf::from("input.lmk"));
        assert_eq!(cli.catalog, PathBuf::from("catalog.toml"));
        assert!(cli.output.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_parses_full_invocation() {
        let cli = Cli::parse_from([
            "lmk",
            "input.lmk",
            "--catalog",
            "types.toml",
            "--output",
            "tokens.json",
            "--pretty",
            "--force",
            "--default-type",
            "WORD",
            "--quiet",
        ]);

        assert_eq!(cli.catalog, PathBuf::from("types.toml"));
        assert_eq!(cli.output, Some(PathBuf::from("tokens.json")));
        assert!(cli.pretty && cli.force && cli.quiet);
        assert_eq!(cli.default_type.as_deref(), Some("WORD"));
    }
}
