//! SSO Simplifier CLI: thin shell over the [`sso_simplifier_core`] library.
//!
//! Exit codes: 0 on success (per-stub write failures are printed but don't
//! change it), 1 for missing required paths, config or scan errors, and a
//! failed compile step.

use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use tracing::error;

use sso_simplifier_core::compile::{archive_file_name, compile_archive, Toolchain};
use sso_simplifier_core::scan::scan_for_ssos;
use sso_simplifier_core::types::SourceUnit;
use sso_simplifier_core::{load_config, simplify};

// ---------------------------------------------------------------------------
// CLI definition (clap derive)
// ---------------------------------------------------------------------------

/// Simplifies SSO Java class files for the VIP SSO Gallery by extracting the package line,
/// class signature, and public method signatures with minimal method code.
#[derive(Parser, Debug)]
#[command(name = "sso_simplifier", version, about, long_about = None)]
struct Cli {
    /// (Required) Path to search for ServerSideObjects (SSOs) to simplify
    #[arg(long = "inputPath", value_name = "DIR")]
    input_path: Option<PathBuf>,

    /// (Required) Path to save simplified SSOs
    #[arg(long = "outputPath", value_name = "DIR")]
    output_path: Option<PathBuf>,

    /// Compile simplified SSOs into a single Java archive (".jar" appended if missing)
    #[arg(long, value_name = "NAME")]
    compile: Option<String>,

    /// Config file (default: sso-simplifier.toml in the input path, if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the scanned SSOs as JSON
    #[arg(long)]
    json: bool,

    /// Scan and report without writing or compiling stubs
    #[arg(long)]
    dry_run: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sso_simplifier=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    // No arguments at all behaves like --help
    if std::env::args_os().len() <= 1 {
        let _ = Cli::command().print_help();
        println!();
        std::process::exit(0);
    }

    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "sso_simplifier", &mut std::io::stdout());
        return 0;
    }

    let (Some(input), Some(output)) = (cli.input_path.as_deref(), cli.output_path.as_deref()) else {
        eprintln!("Error: Both --inputPath and --outputPath flags are required.");
        return 1;
    };

    let config = match load_config(input, cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    if cli.dry_run {
        let units = match scan_for_ssos(input, &config) {
            Ok(units) => units,
            Err(e) => {
                eprintln!("Error parsing directory: {e}");
                return 1;
            }
        };
        report_units(&units, cli.json);
        println!("Dry run: no simplified SSOs written.");
        return 0;
    }

    let report = match simplify(input, output, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error parsing directory: {e}");
            return 1;
        }
    };
    report_units(&report.units, cli.json);
    for failure in &report.failures {
        eprintln!("{failure}");
    }
    println!("Simplified SSOs have been written to the output directory: {}", output.display());

    match cli.compile.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => compile_step(output, name, &Toolchain::default()),
        None => 0,
    }
}

fn report_units(units: &[SourceUnit], json: bool) {
    if units.is_empty() {
        println!("No matching files found.");
    } else {
        println!("Parsed {} matching files.", units.len());
    }

    if json {
        match serde_json::to_string_pretty(units) {
            Ok(json) => println!("{json}"),
            Err(e) => error!(error = %e, "Failed to serialize scanned SSOs"),
        }
    }
}

fn compile_step(output: &Path, name: &str, toolchain: &Toolchain) -> i32 {
    println!("Compiling the simplified SSOs into: {}", archive_file_name(name));
    match compile_archive(output, name, toolchain) {
        Ok(archive) => {
            println!("Compiled .jar file created at: {}", archive.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}
