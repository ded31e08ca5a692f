//! Config layering: defaults, config file, environment, command line.

use crate::common::{LogDir, json_stdout, ping_log, stderr};

fn title(output: &std::process::Output) -> String {
    json_stdout(output)[0]["title"]
        .as_str()
        .expect("figure title")
        .to_string()
}

fn setup() -> LogDir {
    let dir = LogDir::new();
    dir.write("a.log", &ping_log("a", "17.10.2026 09:00:00", &[Some(5), Some(6)]));
    dir.write("b.log", &ping_log("b", "17.10.2026 09:00:00", &[Some(7), Some(8)]));
    dir
}

#[test]
fn test_default_window() {
    let dir = setup();
    let output = dir.run(&["a.log", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(title(&output), "ping statistics: moving average = 20 s");
}

#[test]
fn test_env_sets_window_and_flag_overrides_it() {
    let dir = setup();

    let output = dir
        .command()
        .env("PING_ANALYSIS_MA_WINDOW", "5")
        .args(["a.log", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(title(&output), "ping statistics: moving average = 5 s");

    let output = dir
        .command()
        .env("PING_ANALYSIS_MA_WINDOW", "5")
        .args(["a.log", "--format", "json", "--ma-window", "7.5"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(title(&output), "ping statistics: moving average = 7.5 s");
}

#[test]
fn test_env_sets_plot_and_format() {
    let dir = setup();
    let output = dir
        .command()
        .env("PING_ANALYSIS_PLOT", "multi")
        .env("PING_ANALYSIS_FORMAT", "json")
        .args(["a.log", "b.log"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let figures = json_stdout(&output);
    assert_eq!(figures[0]["layout"], "separated");
    assert_eq!(figures[0]["panels"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_file() {
    let dir = setup();
    dir.write("analysis.toml", "ma-window = 3\nplot = \"both\"\nformat = \"json\"\n");

    let output = dir.run(&["a.log", "--config", "analysis.toml"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let figures = json_stdout(&output);
    assert_eq!(figures.as_array().unwrap().len(), 2);
    assert_eq!(figures[0]["title"], "ping statistics: moving average = 3 s");
}

#[test]
fn test_default_config_path_from_env() {
    let dir = setup();
    let config = dir.write("elsewhere/config.toml", "ma-window = 9\n");

    let output = dir
        .command()
        .env("PING_ANALYSIS_CONFIG_PATH", &config)
        .args(["a.log", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(title(&output), "ping statistics: moving average = 9 s");
}

#[test]
fn test_missing_explicit_config_file_fails() {
    let dir = setup();
    let output = dir.run(&["a.log", "--config", "nope.toml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid configuration"));
}

#[test]
fn test_window_below_one_is_rejected() {
    let dir = setup();
    let output = dir.run(&["a.log", "--ma-window", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("ma-window must be a number >= 1, got 0"),
        "stderr: {}",
        stderr(&output)
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_window_in_env_is_rejected() {
    let dir = setup();
    let output = dir
        .command()
        .env("PING_ANALYSIS_MA_WINDOW", "0.5")
        .args(["a.log"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ma-window"));
}
