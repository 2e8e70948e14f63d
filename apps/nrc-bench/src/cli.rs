//! # CLI Commands
//!
//! One function per subcommand. Each takes an already-resolved
//! [`BenchConfig`] so tests can drive the pipeline without going through
//! argument parsing.
//!
//! Pipeline order for `run`: stage, generate, execute, evaluate.

use crate::AppError;
use crate::stager::{StageSummary, execute_plan};
use nrc_bench_core::formats::{check_config_file, parse_config_file, render_config_file};
use nrc_bench_core::{
    BenchConfig, Evaluator, FailurePolicy, LaunchFailure, Launcher, LineStyle, NoopEvaluator,
    RunReport, Runner, StagePlan,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

// =============================================================================
// CONFIG LOADING
// =============================================================================

/// Command-line settings that take precedence over the config document.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub policy: Option<FailurePolicy>,
    pub line_style: Option<LineStyle>,
    pub legacy_trailing_space: bool,
    pub configs_file: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(&self, config: &mut BenchConfig) {
        if let Some(policy) = self.policy {
            config.failure_policy = policy;
        }
        if let Some(style) = self.line_style {
            config.line_style = style;
        }
        if self.legacy_trailing_space {
            config.line_style = LineStyle::TrailingSpace;
        }
        if let Some(path) = &self.configs_file {
            config.configs_file = path.clone();
        }
    }
}

/// Load the config document, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<BenchConfig, AppError> {
    let Some(path) = path else {
        return Ok(BenchConfig::default());
    };

    let text = fs::read_to_string(path).map_err(AppError::io(path))?;
    BenchConfig::from_json(&text).map_err(|source| AppError::Config {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// INIT-CONFIG COMMAND
// =============================================================================

/// Write the default config document to `path`.
pub fn cmd_init_config(path: &Path, force: bool) -> Result<(), AppError> {
    if path.exists() && !force {
        return Err(AppError::AlreadyExists(path.to_path_buf()));
    }

    let mut json = BenchConfig::default().to_json_pretty()?;
    json.push('\n');
    fs::write(path, json).map_err(AppError::io(path))?;

    info!("Wrote default config to {}", path.display());
    Ok(())
}

// =============================================================================
// PLAN COMMAND
// =============================================================================

#[derive(Debug, Serialize)]
struct ParameterView<'a> {
    name: &'static str,
    options: &'a [String],
}

#[derive(Debug, Serialize)]
struct PlanView<'a> {
    stage: StagePlan,
    parameters: Vec<ParameterView<'a>>,
    combinations: usize,
    configs_file: PathBuf,
    line_style: LineStyle,
    failure_policy: FailurePolicy,
}

/// Print what `run` would do, without side effects.
pub fn cmd_plan(config: &BenchConfig, json: bool) -> Result<(), AppError> {
    let view = PlanView {
        stage: StagePlan::from_layout(&config.layout),
        parameters: config
            .space
            .lists()
            .map(|(parameter, options)| ParameterView {
                name: parameter.name(),
                options,
            })
            .collect(),
        combinations: config.space.combination_count()?,
        configs_file: config.configs_path(),
        line_style: config.line_style,
        failure_policy: config.failure_policy,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Stage:");
    for step in view.stage.iter() {
        println!("  {step}");
    }
    println!("Parameters:");
    for p in &view.parameters {
        println!("  {:<20} {}", p.name, p.options.join(" "));
    }
    println!("Combinations:   {}", view.combinations);
    println!("Configs file:   {}", view.configs_file.display());
    println!("Line style:     {}", view.line_style);
    println!("Failure policy: {}", view.failure_policy);
    Ok(())
}

// =============================================================================
// STAGE COMMAND
// =============================================================================

/// Replace the staged executable, libraries and data with fresh copies.
pub fn cmd_stage(config: &BenchConfig) -> Result<StageSummary, AppError> {
    info!("Removing old copies of executable file and data directory");
    let plan = StagePlan::from_layout(&config.layout);
    let summary = execute_plan(&plan)?;
    info!(
        removed = summary.removed,
        copied_files = summary.copied_files,
        copied_dirs = summary.copied_dirs,
        "Staging complete"
    );
    Ok(summary)
}

// =============================================================================
// GENERATE COMMAND
// =============================================================================

/// Write the full sweep to the configs file. Returns the number of lines.
pub fn cmd_generate(config: &BenchConfig) -> Result<usize, AppError> {
    info!("Generating app configs for {}", config.layout.executable);

    let rendered = render_config_file(config.space.configurations()?, config.line_style);
    info!("{} configs created", rendered.count);

    let path = config.configs_path();
    fs::write(&path, rendered.text).map_err(AppError::io(&path))?;
    Ok(rendered.count)
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Read the configs file back as whitespace-stripped lines.
pub fn read_configs(config: &BenchConfig) -> Result<Vec<String>, AppError> {
    let path = config.configs_path();
    let text = fs::read_to_string(&path).map_err(AppError::io(&path))?;
    Ok(parse_config_file(&text))
}

#[derive(Debug, Serialize)]
struct CheckView {
    configs_file: String,
    configs: usize,
    valid: bool,
}

/// Verify every line carries one token per parameter.
pub fn cmd_check(config: &BenchConfig, json: bool) -> Result<usize, AppError> {
    let path = config.configs_path();
    let text = fs::read_to_string(&path).map_err(AppError::io(&path))?;
    let configs = check_config_file(&text)?;

    if json {
        let view = CheckView {
            configs_file: path.display().to_string(),
            configs: configs.len(),
            valid: true,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}: {} valid configs", path.display(), configs.len());
    }
    Ok(configs.len())
}

// =============================================================================
// EXECUTE COMMAND
// =============================================================================

/// Logs each launch and its failure, then delegates.
struct Logged<L> {
    inner: L,
}

impl<L: Launcher> Launcher for Logged<L> {
    fn launch(&mut self, index: usize, arguments: &str) -> Result<(), LaunchFailure> {
        info!("Executing config {index}: {arguments}");
        let result = self.inner.launch(index, arguments);
        if let Err(failure) = &result {
            warn!(index, "{failure}");
        }
        result
    }
}

/// Launch every configuration of the configs file in order.
///
/// Each line is split on whitespace; quoting in a hand-edited configs file
/// is not interpreted.
pub fn cmd_execute<L: Launcher>(config: &BenchConfig, launcher: L) -> Result<RunReport, AppError> {
    info!("Executing app configs");
    let lines = read_configs(config)?;
    info!("{} configs loaded", lines.len());

    let runner = Runner::new(config.failure_policy);
    let report = runner.run(&lines, Logged { inner: launcher })?;
    Ok(report)
}

// =============================================================================
// EVALUATE COMMAND
// =============================================================================

pub fn cmd_evaluate<E: Evaluator>(report: &RunReport, evaluator: &mut E) -> Result<(), AppError> {
    info!("Evaluating results");
    evaluator.evaluate(report)?;
    Ok(())
}

// =============================================================================
// RUN (FULL PIPELINE)
// =============================================================================

/// Stage, generate, execute and evaluate.
pub fn cmd_run<L: Launcher>(config: &BenchConfig, launcher: L) -> Result<RunReport, AppError> {
    info!("Starting nrc-bench");
    cmd_stage(config)?;
    cmd_generate(config)?;
    let report = cmd_execute(config, launcher)?;
    cmd_evaluate(&report, &mut NoopEvaluator)?;
    Ok(report)
}

/// Print the outcome of a run and turn collected failures into an error.
pub fn report_run(report: &RunReport, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!(
            "{} configs run, {} succeeded, {} failed (policy: {})",
            report.total,
            report.succeeded,
            report.failed(),
            report.policy
        );
    }

    if report.is_failure() {
        for failure in &report.failures {
            error!(
                index = failure.index,
                arguments = %failure.arguments,
                "{}",
                failure.failure
            );
        }
        return Err(AppError::RunFailures {
            failed: report.failed(),
            total: report.total,
        });
    }
    Ok(())
}
