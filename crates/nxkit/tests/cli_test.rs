//! Integration tests for the `nxkit` CLI binary.
//!
//! Argument parsing, config handling and full report runs against a
//! wiremock NX-API endpoint. No real switch or keyring is touched.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `nxkit` binary with env isolation.
fn nxkit_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("nxkit");
    cmd.env("HOME", "/tmp/nxkit-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/nxkit-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("NXKIT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

fn device_entry(name: &str, address: &str) -> String {
    format!(
        "[[devices]]\nname = \"{name}\"\naddress = \"{address}\"\nusername = \"admin\"\npassword = \"hunter2\"\n\n"
    )
}

fn envelope(body: Value) -> Value {
    json!({ "jsonrpc": "2.0", "result": { "body": body }, "id": 1 })
}

/// A wiremock server answering the three NX-API queries.
async fn fake_switch() -> MockServer {
    let server = MockServer::start().await;

    let replies = [
        (
            "show version",
            json!({
                "host_name": "leaf-01",
                "chassis_id": "Nexus9000 C93180YC-EX chassis",
                "proc_board_id": "FDO21120U8N",
                "kickstart_ver_str": "9.3(8)"
            }),
        ),
        (
            "show interface",
            json!({
                "TABLE_interface": { "ROW_interface": [
                    { "interface": "mgmt0", "state": "up", "admin_state": "up" },
                    {
                        "interface": "Ethernet1/1",
                        "admin_state": "up",
                        "state": "down",
                        "eth_reliability": 255,
                        "eth_rxload": 128,
                        "eth_txload": 0,
                        "eth_inerr": 0,
                        "eth_inpkts": 0,
                        "eth_outerr": 10,
                        "eth_outpkts": 1000
                    }
                ]}
            }),
        ),
        (
            "show cdp neighbors detail",
            json!({
                "TABLE_cdp_neighbor_detail_info": { "ROW_cdp_neighbor_detail_info": {
                    "intf_id": "Ethernet1/49",
                    "sysname": "spine-01",
                    "platform_id": "N9K-C9364C",
                    "port_id": "Ethernet1/1",
                    "v4mgmtaddr": "10.0.0.1"
                }}
            }),
        ),
    ];

    for (cmd, body) in replies {
        Mock::given(method("POST"))
            .and(path("/ins"))
            .and(body_partial_json(json!({ "params": { "cmd": cmd } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(body)))
            .mount(&server)
            .await;
    }

    server
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    nxkit_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Nexus")
            .and(predicate::str::contains("alerts"))
            .and(predicate::str::contains("neighbors"))
            .and(predicate::str::contains("devices")),
    );
}

#[test]
fn test_version_flag() {
    nxkit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nxkit"));
}

#[test]
fn test_completions_bash() {
    nxkit_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_menu_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let output = nxkit_cmd()
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("requires a terminal"));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_no_devices_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = nxkit_cmd()
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg("alerts")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("No devices configured"));
}

#[test]
fn test_config_path_honours_env() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("custom.toml");
    nxkit_cmd()
        .env("NXKIT_CONFIG", &cfg)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_show_redacts_passwords() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), &device_entry("leaf-01", "10.0.0.1"));
    nxkit_cmd()
        .arg("--config")
        .arg(&cfg)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("leaf-01")
                .and(predicate::str::contains("********"))
                .and(predicate::str::contains("hunter2").not()),
        );
}

#[test]
fn test_devices_lists_inventory_without_secrets() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        "{}[[devices]]\nname = \"spine-01\"\naddress = \"10.0.0.2\"\nusername = \"ops\"\npassword_env = \"SPINE_PW\"\n",
        device_entry("leaf-01", "10.0.0.1")
    );
    let cfg = write_config(dir.path(), &body);
    nxkit_cmd()
        .arg("--config")
        .arg(&cfg)
        .arg("devices")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("leaf-01")
                .and(predicate::str::contains("spine-01"))
                .and(predicate::str::contains("env SPINE_PW"))
                .and(predicate::str::contains("config"))
                .and(predicate::str::contains("hunter2").not()),
        );
}

#[test]
fn test_invalid_scheme_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        "[defaults]\nscheme = \"telnet\"\n\n{}",
        device_entry("leaf-01", "10.0.0.1")
    );
    let cfg = write_config(dir.path(), &body);
    let output = nxkit_cmd()
        .arg("--config")
        .arg(&cfg)
        .arg("alerts")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("scheme"));
}

#[test]
fn test_set_password_unknown_device() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), &device_entry("leaf-01", "10.0.0.1"));
    let output = nxkit_cmd()
        .arg("--config")
        .arg(&cfg)
        .args(["config", "set-password", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("'nope' not found"));
}

// ── Report runs ─────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_alerts_prints_interface_table() {
    let server = fake_switch().await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(
        dir.path(),
        &device_entry("leaf-01", &server.address().to_string()),
    );

    let mut cmd = nxkit_cmd();
    cmd.arg("--config").arg(&cfg).arg("alerts");
    let output = run_blocking(cmd).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0), "{}", combined_output(&output));
    assert!(stdout.contains("Device hostname: leaf-01"));
    assert!(stdout.contains(&format!("Device IP address: {}", server.address())));
    assert!(stdout.contains(
        "Ethernet1/1     Down           100.00%     50.20%      0.00%      0.00%      1.00%"
    ));
    assert!(!stdout.contains("mgmt0"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_neighbors_save_writes_report_file() {
    let server = fake_switch().await;
    let dir = tempfile::tempdir().unwrap();
    let reports = dir.path().join("reports");
    std::fs::create_dir(&reports).unwrap();
    let cfg = write_config(
        dir.path(),
        &device_entry("leaf-01", &server.address().to_string()),
    );

    let mut cmd = nxkit_cmd();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("--report-dir")
        .arg(&reports)
        .args(["neighbors", "--save"]);
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(0), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("The CDP neighbors detail has been saved"));

    let files: Vec<_> = std::fs::read_dir(&reports)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("cdp_neighbor_") && name.ends_with(".txt"), "got {name}");

    let text = std::fs::read_to_string(&files[0]).unwrap();
    assert!(text.starts_with("\nGenerated on "));
    assert!(text.contains("Ethernet1/49    spine-01        N9K-C9364C"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_device_exits_with_connection_code() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), &device_entry("gone", "127.0.0.1:1"));

    let mut cmd = nxkit_cmd();
    cmd.arg("--config")
        .arg(&cfg)
        .args(["--timeout", "5", "neighbors"]);
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).trim().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_one_failed_device_keeps_other_reports() {
    let server = fake_switch().await;
    let dir = tempfile::tempdir().unwrap();
    let body = format!(
        "{}{}",
        device_entry("gone", "127.0.0.1:1"),
        device_entry("leaf-01", &server.address().to_string())
    );
    let cfg = write_config(dir.path(), &body);

    let mut cmd = nxkit_cmd();
    cmd.arg("--config")
        .arg(&cfg)
        .args(["--timeout", "5", "alerts"]);
    let output = run_blocking(cmd).await;

    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(1), "{text}");
    assert!(text.contains("1 of 2 devices failed"));
    assert!(text.contains("gone (127.0.0.1:1)"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Device hostname: leaf-01"));
}
