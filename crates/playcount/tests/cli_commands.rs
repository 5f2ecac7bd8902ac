#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn playcount(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_playcount"))
        .arg("--log-level")
        .arg("off")
        .args(args)
        .output()
        .expect("playcount should run")
}

fn json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("command should emit json")
}

#[test]
fn decode_reports_count() {
    let output = playcount(&["--format", "json", "decode", "000000ff"]);
    assert!(output.status.success());

    let payload = json(&output);
    assert_eq!(payload["count"], 255);
    assert_eq!(payload["width"], 4);
}

#[test]
fn decode_wide_counter_is_unrepresentable() {
    let output = playcount(&["--format", "json", "decode", "010000000000000000"]);
    assert!(output.status.success());
    assert!(json(&output)["count"].is_null());
}

#[test]
fn decode_rejects_narrow_payload() {
    let output = playcount(&["decode", "00ff"]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 4 bytes"));
}

#[test]
fn decode_rejects_bad_hex() {
    let output = playcount(&["decode", "00xx00ff"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn inc_crosses_byte_boundary() {
    let output = playcount(&["--format", "raw", "inc", "000000ff"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "00000100");
}

#[test]
fn inc_widens_saturated_counter() {
    let output = playcount(&["--format", "json", "inc", "ffffffff", "-n", "2"]);
    assert!(output.status.success());

    let payload = json(&output);
    assert_eq!(payload["payload"], "0100000001");
    assert_eq!(payload["count"], 4_294_967_297u64);
    assert_eq!(payload["resized"], true);
}

#[test]
fn encode_grows_past_four_bytes() {
    let output = playcount(&["--format", "raw", "encode", "5000000000"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "012a05f200");
}

#[test]
fn encode_rejects_narrow_width() {
    let output = playcount(&["encode", "1", "--width", "2"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn frame_decodes_v24_header() {
    let output = playcount(&["--format", "json", "frame", "50434e5400000004000000000100"]);
    assert!(output.status.success());

    let payload = json(&output);
    assert_eq!(payload["id"], "PCNT");
    assert_eq!(payload["count"], 256);
    assert_eq!(payload["version"], 4);
    assert!(payload.get("unrepresentable").is_none());
}

#[test]
fn frame_flags_wide_counter() {
    let output = playcount(&[
        "--format",
        "json",
        "frame",
        "50434e54000000090000010000000000000000",
    ]);
    assert!(output.status.success());

    let payload = json(&output);
    assert_eq!(payload["size"], 9);
    assert_eq!(payload["unrepresentable"], true);
    assert!(payload.get("count").is_none());
}

#[test]
fn frame_omits_count_for_other_ids() {
    let output = playcount(&["--format", "json", "frame", "5449543200000002000000aa"]);
    assert!(output.status.success());

    let payload = json(&output);
    assert_eq!(payload["id"], "TIT2");
    assert!(payload.get("count").is_none());
    assert!(payload.get("unrepresentable").is_none());
}

#[test]
fn frame_rejects_incomplete_input() {
    let output = playcount(&["frame", "50434e5400000004"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn play_on_untagged_track_creates_counter() {
    let output = playcount(&["--format", "json", "play", "-n", "3"]);
    assert!(output.status.success());

    let payload = json(&output);
    assert_eq!(payload["count"], 3);
    assert_eq!(payload["frame_count"], 1);
    assert_eq!(payload["frames"], "50434e5400000004000000000003");
}

#[test]
fn play_then_reset_existing_counter() {
    let output = playcount(&[
        "--format",
        "json",
        "play",
        "--id3v23",
        "50434e540000000500000100000000",
        "--reset",
    ]);
    assert!(output.status.success());

    let payload = json(&output);
    assert_eq!(payload["count"], 0);
    assert_eq!(payload["frames"], "50434e5400000004000000000000");
}

#[test]
fn version_prints_package_version() {
    let output = playcount(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("playcount {}", env!("CARGO_PKG_VERSION"))
    );
}
