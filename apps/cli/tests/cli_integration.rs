use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

fn unique_path(test_name: &str, ext: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    std::env::temp_dir().join(format!("spectrum_{test_name}_{nanos}.{ext}"))
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let exe = env!("CARGO_BIN_EXE_spectrum");
    let out = Command::new(exe)
        .args(args)
        .env_remove("SPECTRUM_LOG")
        .output()
        .expect("failed to run spectrum cli");

    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    (out.status.code().unwrap_or(-1), stdout, stderr)
}

fn run_json(args: &[&str]) -> (i32, Value) {
    let (code, stdout, stderr) = run_cli(args);
    let body = if code == 0 { stdout } else { stderr };
    (code, serde_json::from_str(&body).unwrap_or(Value::Null))
}

#[test]
fn json_envelope_structure() {
    let (code, json) = run_json(&["--json", "scale"]);

    assert_eq!(code, 0);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], "1.0");
    assert_eq!(json["command"], "scale");
    assert_eq!(json["data"].as_array().map(Vec::len), Some(21));
    assert!(json["error"].is_null());
}

#[test]
fn summary_for_social_traits() {
    let (code, json) = run_json(&[
        "--json",
        "render",
        "--format",
        "summary",
        "--trait",
        "Assertive=4",
        "--trait",
        "Charismatic=2.5M",
        "--trait",
        "Ambitious=3.5",
    ]);

    assert_eq!(code, 0);
    assert_eq!(json["data"]["count"], 3);
    assert_eq!(json["data"]["mean_label"], "Mean: 3.3");
    assert_eq!(json["data"]["traits"][1]["score"], 2.5);
}

#[test]
fn scene_json_has_bubbles_at_scores() {
    let (code, json) = run_json(&[
        "--json",
        "render",
        "--format",
        "json",
        "--trait",
        "Nurturing=4.5F",
        "--trait",
        "Stoic=4.5",
    ]);

    assert_eq!(code, 0);
    let bubbles = json["data"]["bubbles"].as_array().expect("bubbles");
    assert_eq!(bubbles.len(), 2);
    assert_eq!(bubbles[0]["center"]["x"], -4.5);
    assert_eq!(bubbles[1]["center"]["x"], 4.5);
    assert_eq!(json["data"]["mean"]["label"]["text"], "Mean: 0.0");
}

#[test]
fn svg_is_written_to_output_file() {
    let path = unique_path("svg", "svg");
    let path_str = path.to_string_lossy().to_string();
    let (code, json) = run_json(&[
        "--json",
        "render",
        "--preset",
        "Emotional Traits",
        "--output",
        &path_str,
    ]);

    assert_eq!(code, 0);
    assert_eq!(json["data"]["count"], 5);
    let svg = std::fs::read_to_string(&path).expect("svg written");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Nurturing"));
    let _ = std::fs::remove_file(path);
}

#[test]
fn input_file_is_read_before_flags() {
    let path = unique_path("input", "json");
    std::fs::write(&path, r#"[{"label": "Handy", "score": 3.0}]"#).unwrap();
    let path_str = path.to_string_lossy().to_string();

    let (code, json) = run_json(&[
        "--json",
        "render",
        "--format",
        "summary",
        "--input",
        &path_str,
        "--trait",
        "Graceful=-4.5",
    ]);

    assert_eq!(code, 0);
    assert_eq!(json["data"]["traits"][0]["label"], "Handy");
    assert_eq!(json["data"]["traits"][1]["label"], "Graceful");
    let _ = std::fs::remove_file(path);
}

#[test]
fn empty_render_plain_svg() {
    let (code, stdout, _) = run_cli(&["render"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("Mean: 0.0"));
    assert!(stdout.contains("Gender-Coded Spectrum of Traits"));
}

#[test]
fn out_of_range_score_is_invalid_input() {
    let (code, json) = run_json(&["--json", "render", "--trait", "Loud=7"]);

    assert_eq!(code, 1);
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["type"], "InvalidInput");
}

#[test]
fn missing_input_file_is_io_error() {
    let path = unique_path("missing", "json");
    let path_str = path.to_string_lossy().to_string();
    let (code, json) = run_json(&["--json", "render", "--input", &path_str]);

    assert_eq!(code, 2);
    assert_eq!(json["error"]["type"], "IoError");
}

#[test]
fn unknown_command_is_rejected() {
    let (code, json) = run_json(&["--json", "frobnicate"]);

    assert_eq!(code, 3);
    assert_eq!(json["error"]["type"], "InvalidCommand");
}

#[test]
fn verbose_json_error_keeps_stderr_parseable() {
    let (code, _, stderr) = run_cli(&[
        "--json",
        "--verbose",
        "render",
        "--preset",
        "Emotional Traits",
        "--trait",
        "Loud=7",
    ]);

    assert_eq!(code, 1);
    let json: Value = serde_json::from_str(&stderr).expect("stderr is a JSON envelope");
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["type"], "InvalidInput");
}

#[test]
fn verbose_logs_go_to_log_file() {
    let log_path = unique_path("log", "log");
    let log_str = log_path.to_string_lossy().to_string();
    let (code, json) = run_json(&[
        "--json",
        "--verbose",
        "--log-file",
        &log_str,
        "render",
        "--format",
        "summary",
        "--preset",
        "Emotional Traits",
    ]);

    assert_eq!(code, 0);
    assert_eq!(json["data"]["count"], 5);
    let log = std::fs::read_to_string(&log_path).expect("log written");
    assert!(log.contains("Emotional Traits"));
    let _ = std::fs::remove_file(log_path);
}
