//! Integration tests for nrc-bench CLI commands.
//!
//! Uses tempfile for a throwaway build/data/bench tree and a recording
//! launcher in place of the renderer.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use nrc_bench::AppError;
use nrc_bench::cli::{
    Overrides, cmd_check, cmd_execute, cmd_generate, cmd_init_config, cmd_plan, cmd_run,
    cmd_stage, load_config, read_configs, report_run,
};
use nrc_bench::launcher::ProcessLauncher;
use nrc_bench_core::{
    BenchConfig, BenchError, FailurePolicy, LaunchFailure, Launcher, LineStyle, Parameter,
    StageLayout, SweepSpace,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Lay out `build/`, `data/` and `bench/` like a renderer checkout and return
/// a config pointing at them.
fn create_workspace(dir: &TempDir) -> BenchConfig {
    let root = dir.path();
    let build = root.join("build");
    let data = root.join("data");
    let bench = root.join("bench");

    fs::create_dir_all(&build).unwrap();
    fs::create_dir_all(data.join("scenes")).unwrap();
    fs::create_dir_all(&bench).unwrap();

    fs::write(build.join("NeuralRadianceCaching.exe"), b"renderer v2").unwrap();
    fs::write(build.join("glfw3.dll"), b"glfw").unwrap();
    fs::write(data.join("scenes").join("cloud.vdb"), b"density").unwrap();
    fs::write(data.join("env.hdr"), b"sky").unwrap();

    BenchConfig {
        layout: StageLayout {
            bench_dir: bench,
            build_dir: build,
            data_source: data,
            ..StageLayout::default()
        },
        ..BenchConfig::default()
    }
}

/// All parameters singleton except learning rate, as in the two-line
/// end-to-end scenario.
fn two_config_space() -> SweepSpace {
    SweepSpace::from_fn(|p| vec![format!("{}", p.position())])
        .with_options(Parameter::LossFn, ["A"])
        .with_options(Parameter::LearningRate, ["1", "2"])
}

/// Records every launch and fails the configured indices.
#[derive(Default)]
struct RecordingLauncher {
    fail_at: Vec<usize>,
    calls: Vec<(usize, String)>,
}

impl Launcher for RecordingLauncher {
    fn launch(&mut self, index: usize, arguments: &str) -> Result<(), LaunchFailure> {
        self.calls.push((index, arguments.to_string()));
        if self.fail_at.contains(&index) {
            Err(LaunchFailure::Exit { code: Some(1) })
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// CONFIG LOADING TESTS
// =============================================================================

#[test]
fn test_load_config_without_path_is_default() {
    let config = load_config(None).unwrap();
    assert_eq!(config, BenchConfig::default());
}

#[test]
fn test_init_config_then_load_roundtrips() {
    let temp = create_temp_dir();
    let path = temp.path().join("bench.json");

    cmd_init_config(&path, false).unwrap();
    let loaded = load_config(Some(path.as_path())).unwrap();
    assert_eq!(loaded, BenchConfig::default());
}

#[test]
fn test_init_config_fails_if_exists_without_force() {
    let temp = create_temp_dir();
    let path = temp.path().join("bench.json");

    cmd_init_config(&path, false).unwrap();
    let result = cmd_init_config(&path, false);
    assert!(matches!(result, Err(AppError::AlreadyExists(_))));
}

#[test]
fn test_init_config_succeeds_with_force() {
    let temp = create_temp_dir();
    let path = temp.path().join("bench.json");
    fs::write(&path, "stale").unwrap();

    cmd_init_config(&path, true).unwrap();
    assert!(load_config(Some(path.as_path())).is_ok());
}

#[test]
fn test_load_invalid_config_names_path() {
    let temp = create_temp_dir();
    let path = temp.path().join("bad.json");
    fs::write(&path, "not valid json").unwrap();

    let err = load_config(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, AppError::Config { .. }));
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn test_load_missing_config_is_io_error() {
    let temp = create_temp_dir();
    let result = load_config(Some(temp.path().join("absent.json").as_path()));
    assert!(matches!(result, Err(AppError::Io { .. })));
}

#[test]
fn test_overrides_take_precedence() {
    let mut config = BenchConfig::default();
    let overrides = Overrides {
        policy: Some(FailurePolicy::Halt),
        line_style: None,
        legacy_trailing_space: true,
        configs_file: Some("sweep.txt".into()),
    };
    overrides.apply(&mut config);

    assert_eq!(config.failure_policy, FailurePolicy::Halt);
    assert_eq!(config.line_style, LineStyle::TrailingSpace);
    assert_eq!(config.configs_file, Path::new("sweep.txt"));
}

#[test]
fn test_line_style_override_parses_names() {
    let mut config = BenchConfig {
        line_style: LineStyle::TrailingSpace,
        ..BenchConfig::default()
    };
    let overrides = Overrides {
        line_style: Some("compact".parse().unwrap()),
        ..Overrides::default()
    };
    overrides.apply(&mut config);
    assert_eq!(config.line_style, LineStyle::Compact);

    let err = "tabs".parse::<LineStyle>().unwrap_err();
    assert!(matches!(err, BenchError::UnknownLineStyle(ref s) if s == "tabs"));
}

#[test]
fn test_default_overrides_change_nothing() {
    let mut config = BenchConfig::default();
    Overrides::default().apply(&mut config);
    assert_eq!(config, BenchConfig::default());
}

// =============================================================================
// STAGE COMMAND TESTS
// =============================================================================

#[test]
fn test_stage_copies_fresh_artifacts() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);
    let bench = &config.layout.bench_dir;

    let summary = cmd_stage(&config).unwrap();

    assert_eq!(summary.removed, 0);
    assert_eq!(summary.copied_files, 2);
    assert_eq!(summary.copied_dirs, 1);
    assert_eq!(
        fs::read(bench.join("NeuralRadianceCaching.exe")).unwrap(),
        b"renderer v2"
    );
    assert!(bench.join("glfw3.dll").is_file());
    assert_eq!(
        fs::read(bench.join("data").join("scenes").join("cloud.vdb")).unwrap(),
        b"density"
    );
}

#[test]
fn test_stage_replaces_old_copies() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);
    let bench = &config.layout.bench_dir;

    fs::write(bench.join("NeuralRadianceCaching.exe"), b"renderer v1").unwrap();
    fs::create_dir_all(bench.join("data")).unwrap();
    fs::write(bench.join("data").join("stale.txt"), b"old").unwrap();

    let summary = cmd_stage(&config).unwrap();

    assert_eq!(summary.removed, 2);
    assert_eq!(
        fs::read(bench.join("NeuralRadianceCaching.exe")).unwrap(),
        b"renderer v2"
    );
    assert!(!bench.join("data").join("stale.txt").exists());
    assert!(bench.join("data").join("env.hdr").is_file());
}

#[test]
fn test_stage_fails_fast_on_missing_source() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);
    fs::remove_file(config.layout.build_dir.join("glfw3.dll")).unwrap();

    let err = cmd_stage(&config).unwrap_err();
    assert!(matches!(err, AppError::Io { ref path, .. } if path.ends_with("glfw3.dll")));

    // The executable was copied before the failure; the data dir was not.
    assert!(config.layout.staged_executable().is_file());
    assert!(!config.layout.staged_data_dir().exists());
}

#[test]
fn test_stage_missing_bench_dir_names_destination() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);
    fs::remove_dir_all(&config.layout.bench_dir).unwrap();

    let err = cmd_stage(&config).unwrap_err();
    assert!(matches!(
        err,
        AppError::Io { ref path, .. } if path == &config.layout.staged_executable()
    ));
    assert!(config.layout.build_dir.join("NeuralRadianceCaching.exe").is_file());
}

// =============================================================================
// GENERATE COMMAND TESTS
// =============================================================================

#[test]
fn test_generate_reference_sweep() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);

    let count = cmd_generate(&config).unwrap();
    assert_eq!(count, 3200);

    let lines = read_configs(&config).unwrap();
    assert_eq!(lines.len(), 3200);
    assert_eq!(lines[0], "RelativeL2 Adam 0.01 0 64 2 12 0 1920 1080 0.01 1");
    assert!(lines.iter().all(|l| l.split(' ').count() == 12));
}

#[test]
fn test_generate_is_idempotent() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);

    cmd_generate(&config).unwrap();
    let first = fs::read(config.configs_path()).unwrap();
    cmd_generate(&config).unwrap();
    let second = fs::read(config.configs_path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_generate_overwrites_previous_file() {
    let temp = create_temp_dir();
    let mut config = create_workspace(&temp);
    config.space = two_config_space();

    fs::write(config.configs_path(), "leftover\n".repeat(10)).unwrap();
    cmd_generate(&config).unwrap();

    assert_eq!(read_configs(&config).unwrap().len(), 2);
}

#[test]
fn test_generate_legacy_style_reads_back_identically() {
    let temp = create_temp_dir();
    let mut config = create_workspace(&temp);

    cmd_generate(&config).unwrap();
    let compact = read_configs(&config).unwrap();

    config.line_style = LineStyle::TrailingSpace;
    cmd_generate(&config).unwrap();
    let raw = fs::read_to_string(config.configs_path()).unwrap();
    assert!(raw.lines().all(|l| l.ends_with(' ')));

    assert_eq!(read_configs(&config).unwrap(), compact);
}

#[test]
fn test_generate_rejects_invalid_space() {
    let temp = create_temp_dir();
    let mut config = create_workspace(&temp);
    config.space = SweepSpace::default().with_options(Parameter::Scene, Vec::<String>::new());

    let err = cmd_generate(&config).unwrap_err();
    assert!(matches!(
        err,
        AppError::Core(BenchError::EmptyOptions {
            parameter: Parameter::Scene
        })
    ));
    assert!(!config.configs_path().exists());
}

// =============================================================================
// CHECK / PLAN COMMAND TESTS
// =============================================================================

#[test]
fn test_check_accepts_generated_file() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);
    cmd_generate(&config).unwrap();

    assert_eq!(cmd_check(&config, false).unwrap(), 3200);
    assert_eq!(cmd_check(&config, true).unwrap(), 3200);
}

#[cfg(unix)]
#[test]
fn test_check_json_with_non_utf8_configs_path() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = create_temp_dir();
    let mut config = create_workspace(&temp);
    config.configs_file = OsStr::from_bytes(b"cfg\xff.csv").into();
    cmd_generate(&config).unwrap();

    assert_eq!(cmd_check(&config, true).unwrap(), 3200);
}

#[test]
fn test_check_rejects_short_line() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);
    fs::write(config.configs_path(), "RelativeL2 Adam 0.01\n").unwrap();

    let err = cmd_check(&config, false).unwrap_err();
    assert!(matches!(
        err,
        AppError::Core(BenchError::ArityMismatch { line: 1, found: 3, .. })
    ));
}

#[test]
fn test_plan_has_no_side_effects() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);

    cmd_plan(&config, false).unwrap();
    cmd_plan(&config, true).unwrap();

    assert!(!config.configs_path().exists());
    assert!(!config.layout.staged_executable().exists());
}

// =============================================================================
// EXECUTE COMMAND TESTS
// =============================================================================

#[test]
fn test_execute_missing_configs_file_fails() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);

    let result = cmd_execute(&config, RecordingLauncher::default());
    assert!(matches!(result, Err(AppError::Io { .. })));
}

#[test]
fn test_execute_passes_stripped_lines_in_order() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);
    fs::write(config.configs_path(), "  a 1 \nb 2 \n\tc 3\n").unwrap();

    let mut launcher = RecordingLauncher::default();
    let report = cmd_execute(&config, &mut launcher).unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(
        launcher.calls,
        vec![
            (0, "a 1".to_string()),
            (1, "b 2".to_string()),
            (2, "c 3".to_string()),
        ]
    );
}

#[test]
fn test_execute_policies() {
    let temp = create_temp_dir();
    let mut config = create_workspace(&temp);
    fs::write(config.configs_path(), "x\ny\nz\n").unwrap();

    config.failure_policy = FailurePolicy::Ignore;
    let mut launcher = RecordingLauncher {
        fail_at: vec![1],
        ..RecordingLauncher::default()
    };
    let report = cmd_execute(&config, &mut launcher).unwrap();
    assert_eq!(launcher.calls.len(), 3);
    assert!(report_run(&report, false).is_ok());

    config.failure_policy = FailurePolicy::Collect;
    let mut launcher = RecordingLauncher {
        fail_at: vec![1],
        ..RecordingLauncher::default()
    };
    let report = cmd_execute(&config, &mut launcher).unwrap();
    assert_eq!(launcher.calls.len(), 3);
    assert!(matches!(
        report_run(&report, false),
        Err(AppError::RunFailures { failed: 1, total: 3 })
    ));

    config.failure_policy = FailurePolicy::Halt;
    let mut launcher = RecordingLauncher {
        fail_at: vec![1],
        ..RecordingLauncher::default()
    };
    let result = cmd_execute(&config, &mut launcher);
    assert_eq!(launcher.calls.len(), 2);
    assert!(matches!(
        result,
        Err(AppError::Core(BenchError::RunHalted { index: 1, .. }))
    ));
}

#[test]
fn test_execute_with_missing_renderer_collects_spawn_failures() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);
    fs::write(config.configs_path(), "a\nb\n").unwrap();

    // Nothing staged, so the executable is absent.
    let report = cmd_execute(&config, ProcessLauncher::from_layout(&config.layout)).unwrap();

    assert_eq!(report.failed(), 2);
    assert!(
        report
            .failures
            .iter()
            .all(|f| matches!(f.failure, LaunchFailure::Spawn(_)))
    );
    assert!(report.is_failure());
}

// =============================================================================
// END-TO-END TESTS
// =============================================================================

#[test]
fn test_run_two_config_sweep_end_to_end() {
    let temp = create_temp_dir();
    let mut config = create_workspace(&temp);
    config.space = two_config_space();

    let mut launcher = RecordingLauncher::default();
    let report = cmd_run(&config, &mut launcher).unwrap();

    assert!(config.layout.staged_executable().is_file());
    assert_eq!(report.total, 2);
    assert_eq!(report.succeeded, 2);

    assert_eq!(
        launcher.calls,
        vec![
            (0, "A 1 1 3 4 5 6 7 8 9 10 11".to_string()),
            (1, "A 1 2 3 4 5 6 7 8 9 10 11".to_string()),
        ]
    );
    assert!(report_run(&report, true).is_ok());
}

#[test]
fn test_run_aborts_before_generating_when_staging_fails() {
    let temp = create_temp_dir();
    let config = create_workspace(&temp);
    fs::remove_dir_all(&config.layout.data_source).unwrap();

    let mut launcher = RecordingLauncher::default();
    let result = cmd_run(&config, &mut launcher);

    assert!(matches!(result, Err(AppError::Io { .. })));
    assert!(!config.configs_path().exists());
    assert!(launcher.calls.is_empty());
}
