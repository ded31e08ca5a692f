//! End-to-end runs of the `ping-analysis` binary on well-formed logs.

use crate::common::{LogDir, json_stdout, ping_log, stderr, stdout};

#[test]
fn test_table_output_for_two_sources() {
    let dir = LogDir::new();
    dir.write(
        "dns.log",
        &ping_log("9.9.9.9", "17.10.2026 09:15:00", &[Some(10), Some(20), Some(30), Some(40), Some(50)]),
    );
    dir.write(
        "gw.log",
        &ping_log("192.168.1.1", "17.10.2026 11:00:00", &[Some(1), None, Some(3)]),
    );

    let output = dir.run(&["dns.log", "gw.log"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.starts_with("ping statistics: moving average = 20 s\n"));
    assert!(out.contains("dns.log"));
    assert!(out.contains("gw.log"));
    let row = |label: &str| -> Vec<String> {
        out.lines()
            .find(|l| l.split_whitespace().next() == Some(label))
            .unwrap_or_else(|| panic!("no {label} row in:\n{out}"))
            .split_whitespace()
            .skip(1)
            .map(str::to_string)
            .collect()
    };
    assert_eq!(row("count"), vec!["5", "2"]);
    assert_eq!(row("Δt"), vec!["0:00:04", "0:00:02"]);
    assert_eq!(row("mean"), vec!["30.00", "ms", "2.00", "ms"]);
    assert!(stderr(&output).is_empty(), "unexpected stderr: {}", stderr(&output));
}

#[test]
fn test_json_output_single_figure() {
    let dir = LogDir::new();
    dir.write(
        "dns.log",
        &ping_log("9.9.9.9", "17.10.2026 09:15:00", &[Some(10), Some(20), Some(30), Some(40), Some(50)]),
    );

    let output = dir.run(&["dns.log", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let figures = json_stdout(&output);
    let figures = figures.as_array().unwrap();
    assert_eq!(figures.len(), 1);
    assert_eq!(figures[0]["layout"], "combined");

    let stats = &figures[0]["panels"][0]["stats"]["dns.log"];
    assert_eq!(stats["count"], 5);
    assert_eq!(stats["mean"], 30.0);
    assert_eq!(stats["median"], 30.0);
    assert_eq!(stats["min"], 10.0);
    assert_eq!(stats["max"], 50.0);
    assert_eq!(stats["last_elapsed"], 4.0);
}

#[test]
fn test_multi_mode_has_panel_per_source() {
    let dir = LogDir::new();
    dir.write("a.log", &ping_log("a", "17.10.2026 09:00:00", &[Some(5), Some(6)]));
    dir.write("b.log", &ping_log("b", "17.10.2026 09:30:00", &[Some(7)]));

    let output = dir.run(&["a.log", "b.log", "-p", "multi", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let figures = json_stdout(&output);
    let panels = figures[0]["panels"].as_array().unwrap();
    assert_eq!(figures[0]["layout"], "separated");
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[0]["sources"], serde_json::json!(["a.log"]));
    assert_eq!(panels[1]["sources"], serde_json::json!(["b.log"]));
    assert_eq!(panels[1]["latency"]["columns"]["b.log"], serde_json::json!([7, null]));
}

#[test]
fn test_both_mode_writes_two_out_files() {
    let dir = LogDir::new();
    dir.write("a.log", &ping_log("a", "17.10.2026 09:00:00", &[Some(5), Some(6), Some(7)]));
    dir.write("b.log", &ping_log("b", "17.10.2026 09:30:00", &[Some(8), Some(9)]));

    let output = dir.run(&["a.log", "b.log", "-p", "both", "-o", "combined.json", "separated.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let read = |name: &str| -> serde_json::Value {
        let text = std::fs::read_to_string(dir.path().join(name)).unwrap();
        serde_json::from_str(&text).unwrap()
    };
    let combined = read("combined.json");
    let separated = read("separated.json");
    assert_eq!(combined["layout"], "combined");
    assert_eq!(combined["panels"].as_array().unwrap().len(), 1);
    assert_eq!(separated["layout"], "separated");
    assert_eq!(separated["panels"].as_array().unwrap().len(), 2);

    // Table output still goes to stdout: one title per figure
    assert_eq!(stdout(&output).matches("ping statistics").count(), 2);
}

#[test]
fn test_smoothed_trend_blends_samples() {
    let dir = LogDir::new();
    dir.write("a.log", &ping_log("a", "17.10.2026 09:00:00", &[Some(10), None, Some(20)]));

    let output = dir.run(&["a.log", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let figures = json_stdout(&output);
    let panel = &figures[0]["panels"][0];
    assert_eq!(panel["latency"]["index"], serde_json::json!([0.0, 2.0]));
    assert_eq!(panel["latency"]["columns"]["a.log"], serde_json::json!([10, 20]));

    let trend = panel["trend"]["columns"]["a.log"].as_array().unwrap();
    assert_eq!(trend[0], 10.0);
    let blended = trend[1].as_f64().unwrap();
    assert!(blended > 10.0 && blended < 20.0, "got {blended}");
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = LogDir::new();
    dir.write("a.log", &ping_log("a", "17.10.2026 09:00:00", &[Some(10), None, Some(20)]));

    let output = dir.run(&["a.log", "-v", "--format", "json"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Ingested 1 sources"));
    // stdout stays parseable
    json_stdout(&output);
}
