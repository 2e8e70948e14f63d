//! # nrc-bench
//!
//! Stages the renderer, generates the hyperparameter sweep and runs it.
//!
//! With no subcommand the full pipeline runs with the reference sweep.

use clap::{Parser, Subcommand};
use nrc_bench::AppError;
use nrc_bench::cli::{
    Overrides, cmd_check, cmd_execute, cmd_generate, cmd_init_config, cmd_plan, cmd_run,
    cmd_stage, load_config, report_run,
};
use nrc_bench::launcher::ProcessLauncher;
use nrc_bench_core::{FailurePolicy, LineStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "nrc-bench",
    version,
    about = "Benchmark sweep runner for the Neural Radiance Caching renderer"
)]
struct Cli {
    /// JSON config document (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// What to do when a configuration fails: ignore, halt or collect
    #[arg(long, global = true)]
    policy: Option<FailurePolicy>,

    /// How tokens are joined in the configs file: compact or trailing_space
    #[arg(long, global = true)]
    line_style: Option<LineStyle>,

    /// Write configs with a trailing space on every line
    #[arg(long, global = true, conflicts_with = "line_style")]
    legacy_trailing_space: bool,

    /// Configs file, relative to the bench directory
    #[arg(long, global = true)]
    configs_file: Option<PathBuf>,

    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stage, generate, execute and evaluate (the default)
    Run,
    /// Replace the staged executable, libraries and data
    Stage,
    /// Write the sweep to the configs file
    Generate,
    /// Run every configuration in the configs file
    Execute,
    /// Show the stage plan and sweep without changing anything
    Plan,
    /// Verify the configs file has one token per parameter on every line
    Check,
    /// Write the default config document
    InitConfig {
        path: PathBuf,
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "nrc_bench=debug"
    } else {
        "nrc_bench=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    let overrides = Overrides {
        policy: cli.policy,
        line_style: cli.line_style,
        legacy_trailing_space: cli.legacy_trailing_space,
        configs_file: cli.configs_file,
    };
    let mut config = load_config(cli.config.as_deref())?;
    overrides.apply(&mut config);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let launcher = ProcessLauncher::from_layout(&config.layout);
            let report = cmd_run(&config, launcher)?;
            report_run(&report, cli.json)
        }
        Commands::Stage => {
            let summary = cmd_stage(&config)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Ok(())
        }
        Commands::Generate => {
            let count = cmd_generate(&config)?;
            if cli.json {
                println!("{}", serde_json::json!({ "configs": count }));
            } else {
                println!("{count} configs written to {}", config.configs_path().display());
            }
            Ok(())
        }
        Commands::Execute => {
            let launcher = ProcessLauncher::from_layout(&config.layout);
            let report = cmd_execute(&config, launcher)?;
            report_run(&report, cli.json)
        }
        Commands::Plan => cmd_plan(&config, cli.json),
        Commands::Check => cmd_check(&config, cli.json).map(|_| ()),
        Commands::InitConfig { path, force } => cmd_init_config(&path, force),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
