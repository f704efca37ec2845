//! secretlint config merge CLI
//!
//! Entry point for the `secretlint-merge` command-line tool.

use clap::Parser;
use secretlint_config_merge::{EffectiveConfig, MergeDefaults, MergeSummary};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "secretlint-merge")]
#[command(about = "Merge a default secretlint config with an external override", version)]
struct Cli {
    /// Path to the external override config
    external: Option<PathBuf>,

    /// Path to the default config (default: .secretlint/secretlintrc.default.json)
    #[arg(long = "default", short = 'd')]
    default_path: Option<PathBuf>,

    /// Path to write the merged config (default: .secretlintrc.json)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Print the merged config instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Output the summary in JSON format
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run_merge(cli);
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "secretlint_config_merge={},secretlint_rule_merge={}",
            level, level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_merge(cli: Cli) {
    let paths = MergeDefaults::default().with_overrides(cli.default_path, cli.output);

    eprintln!("Reading default config: {}", paths.default_path().display());
    if let Some(ref external) = cli.external {
        eprintln!("Reading external config: {}", external.display());
    }

    let effective = match EffectiveConfig::build(paths.default_path(), cli.external.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if effective.resolution.is_fallback() {
        eprintln!("Warning: {}", effective.resolution.describe());
    }

    let output_path = if cli.dry_run {
        match effective.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing merged config: {}", e);
                process::exit(1);
            }
        }
        None
    } else {
        if let Err(e) = effective.write_to_file(paths.output_path()) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        Some(paths.output_path().display().to_string())
    };

    let summary = MergeSummary::from_effective(&effective, output_path.as_deref());
    let rendered = if cli.json {
        match summary.to_json() {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error serializing summary: {}", e);
                process::exit(1);
            }
        }
    } else {
        summary.to_human()
    };

    // Keep stdout clean for the merged document on dry runs.
    if cli.dry_run {
        eprintln!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
}
