//! Integration tests for the `topoview` CLI binary.
//!
//! Everything runs against the built-in demo fabric or temp files, with the
//! config path pointed at a scratch location.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;

// ── Helpers ─────────────────────────────────────────────────────────

/// A `topoview` command isolated from the user's environment. The config
/// file lives at `config` (which need not exist).
fn topoview_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("topoview");
    cmd.env("HOME", "/tmp/topoview-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/topoview-cli-test-nonexistent")
        .env("TOPOVIEW_CONFIG", config)
        .env_remove("TOPOVIEW_PROFILE")
        .env_remove("TOPOVIEW_TOPOLOGY")
        .env_remove("TOPOVIEW_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn scratch() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    (dir, config)
}

fn json_stdout(cmd: &mut assert_cmd::Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

const DANGLING: &str = r#"{
    "nodes": [
        {"id": "s1", "label": "S1", "type": "switch", "layer": 1},
        {"id": "h1", "label": "H1", "type": "host", "layer": 2}
    ],
    "links": [
        {"id": "ok", "source": "s1", "target": "h1", "bandwidth": 1000},
        {"id": "bad", "source": "s1", "target": "ghost", "bandwidth": 1000}
    ]
}"#;

const CLEAN: &str = r#"{
    "nodes": [{"id": "s1", "label": "S1", "type": "switch", "layer": 1}],
    "links": []
}"#;

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let (_dir, config) = scratch();
    let output = topoview_cmd(&config).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    let (_dir, config) = scratch();
    topoview_cmd(&config).arg("--help").assert().success().stdout(
        predicate::str::contains("tree")
            .and(predicate::str::contains("layout"))
            .and(predicate::str::contains("attrs"))
            .and(predicate::str::contains("popup")),
    );
}

#[test]
fn test_version_flag() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("topoview"));
}

#[test]
fn test_completions_bash() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("topoview"));
}

#[test]
fn test_demo_conflicts_with_topology() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["tree", "--demo", "--topology", "x.json"])
        .assert()
        .code(2);
}

// ── Topology source resolution ──────────────────────────────────────

#[test]
fn test_missing_topology_is_a_config_error() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .arg("tree")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn test_unsupported_extension_is_invalid_data() {
    let (dir, config) = scratch();
    let path = dir.path().join("topo.txt");
    std::fs::write(&path, "{}").unwrap();
    topoview_cmd(&config)
        .args(["tree", "--topology"])
        .arg(&path)
        .assert()
        .code(3);
}

// ── Tree ────────────────────────────────────────────────────────────

#[test]
fn test_tree_table_draws_guides() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["tree", "--demo", "--color", "never"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("Network")
                .and(predicate::str::contains("├── "))
                .and(predicate::str::contains("└── ")),
        );
}

#[test]
fn test_tree_json_physical_root() {
    let (_dir, config) = scratch();
    let tree = json_stdout(topoview_cmd(&config).args(["tree", "--demo", "-o", "json"]));
    assert_eq!(tree["id"], "root");
    assert_eq!(tree["label"], "Network");
    let tops: Vec<&str> = tree["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert!(tops.contains(&"spine-1"));
    assert!(!tops.contains(&"web-01"));
}

#[test]
fn test_tree_logical_buckets_by_vlan() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["tree", "--demo", "--view", "logical", "-o", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("infrastructure")
                .and(predicate::str::contains("vlan-100"))
                .and(predicate::str::contains("vlan-300")),
        );
}

#[test]
fn test_tree_depth_prunes() {
    let (_dir, config) = scratch();
    let tree = json_stdout(topoview_cmd(&config).args(["tree", "--demo", "-d", "1", "-o", "json"]));
    for child in tree["children"].as_array().unwrap() {
        assert!(child["children"].as_array().unwrap().is_empty());
    }
}

// ── Layout ──────────────────────────────────────────────────────────

#[test]
fn test_layout_physical_pins_everything() {
    let (_dir, config) = scratch();
    let report = json_stdout(topoview_cmd(&config).args(["layout", "--demo", "-o", "json"]));
    assert_eq!(report["mode"], "physical");
    for node in report["nodes"].as_array().unwrap() {
        assert_eq!(node["pinned"], true, "{node}");
        assert!(node["x"].is_number());
    }
}

#[test]
fn test_layout_logical_leaves_nodes_free() {
    let (_dir, config) = scratch();
    let report = json_stdout(topoview_cmd(&config).args([
        "layout", "--demo", "--view", "logical", "-o", "json",
    ]));
    assert_eq!(report["forces"]["linkDistance"], 160.0);
    for node in report["nodes"].as_array().unwrap() {
        assert_eq!(node["pinned"], false);
        assert!(node.get("x").is_none());
    }
}

#[test]
fn test_layout_simulation_assigns_positions() {
    let (_dir, config) = scratch();
    let report = json_stdout(topoview_cmd(&config).args([
        "layout",
        "--demo",
        "--view",
        "logical",
        "--simulate",
        "--iterations",
        "50",
        "-o",
        "json",
    ]));
    assert_eq!(report["simulated"], true);
    for node in report["nodes"].as_array().unwrap() {
        assert!(node["x"].as_f64().unwrap().is_finite());
    }
}

// ── Attributes ──────────────────────────────────────────────────────

#[test]
fn test_attrs_nodes_json() {
    let (_dir, config) = scratch();
    let nodes = json_stdout(topoview_cmd(&config).args(["attrs", "nodes", "--demo", "-o", "json"]));
    let spine = nodes
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "spine-1")
        .unwrap();
    assert_eq!(spine["size"], 40.0);
    assert!(spine["color"].as_str().unwrap().starts_with('#'));
}

#[test]
fn test_attrs_links_marks_down_link_dashed() {
    let (_dir, config) = scratch();
    let links = json_stdout(topoview_cmd(&config).args(["attrs", "links", "--demo", "-o", "json"]));
    let down = links
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["id"] == "spine-2--leaf-3")
        .unwrap();
    assert_eq!(down["dash"]["style"], "dashed");
}

// ── Popup ───────────────────────────────────────────────────────────

#[test]
fn test_popup_flips_below_near_the_top() {
    let (_dir, config) = scratch();
    let placed = json_stdout(topoview_cmd(&config).args(["popup", "400", "100", "-o", "json"]));
    assert_eq!(placed["placement"]["direction"], "down");
    assert_eq!(placed["placement"]["y"], 150.0);
}

#[test]
fn test_popup_opens_up_with_room() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["popup", "10", "500", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("up 180.0 460.0\n"));
}

#[test]
fn test_popup_rejects_non_finite_coordinates() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["popup", "10", "500", "--container-width", "NaN"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("container-width"));
    topoview_cmd(&config)
        .args(["popup", "inf", "500"])
        .assert()
        .failure()
        .code(2);
}

// ── Validate ────────────────────────────────────────────────────────

#[test]
fn test_validate_clean_demo() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["validate", "--demo"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no issues"));
}

#[test]
fn test_validate_reports_dangling_links() {
    let (dir, config) = scratch();
    let path = dir.path().join("topo.json");
    std::fs::write(&path, DANGLING).unwrap();
    topoview_cmd(&config)
        .args(["validate", "-o", "plain", "--topology"])
        .arg(&path)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("bad"));
}

// ── Device ──────────────────────────────────────────────────────────

#[test]
fn test_device_test_uses_default_port() {
    let (_dir, config) = scratch();
    let result = json_stdout(topoview_cmd(&config).args([
        "device", "test", "10.0.0.9", "--demo", "-u", "admin", "-o", "json",
    ]));
    assert_eq!(result["port"], 22);
    assert_eq!(result["success"], true);
}

#[test]
fn test_device_test_snmp_needs_community() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["device", "test", "10.0.0.9", "--demo", "-P", "snmp"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("community"));
}

#[test]
fn test_device_add_duplicate_conflicts() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["device", "add", "spine-1", "--demo"])
        .assert()
        .code(6);
}

#[test]
fn test_device_add_write_persists() {
    let (dir, config) = scratch();
    let path = dir.path().join("topo.json");
    std::fs::write(&path, CLEAN).unwrap();

    let node = json_stdout(
        topoview_cmd(&config)
            .args(["device", "add", "sw-9", "--type", "switch", "--layer", "2", "-w", "-o", "json"])
            .arg("--topology")
            .arg(&path),
    );
    assert_eq!(node["status"], "inactive");

    topoview_cmd(&config)
        .args(["attrs", "nodes", "-o", "plain", "--topology"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("sw-9"));
}

#[test]
fn test_device_add_write_rejects_demo() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["device", "add", "sw-9", "--demo", "--write"])
        .assert()
        .code(2);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_then_profile_drives_commands() {
    let (dir, config) = scratch();
    let topo = dir.path().join("lab.json");
    std::fs::write(&topo, DANGLING).unwrap();

    topoview_cmd(&config)
        .args(["config", "init", "--name", "lab", "--topology"])
        .arg(&topo)
        .assert()
        .success();
    assert!(config.exists());

    topoview_cmd(&config)
        .args(["config", "init", "--topology"])
        .arg(&topo)
        .assert()
        .code(5);

    topoview_cmd(&config)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lab *"));

    topoview_cmd(&config)
        .args(["tree", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("h1"));
}

#[test]
fn test_config_set_and_show() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["config", "set", "popup.reserved_top", "64"])
        .assert()
        .success();
    topoview_cmd(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reserved_top = 64"));
}

#[test]
fn test_popup_reads_geometry_from_config() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["config", "set", "popup.reserved_top", "450"])
        .assert()
        .success();
    let placed = json_stdout(topoview_cmd(&config).args(["popup", "400", "500", "-o", "json"]));
    assert_eq!(placed["geometry"]["reserved_top"], 450.0);
    assert_eq!(placed["placement"]["direction"], "down");
}

#[test]
fn test_config_use_unknown_profile() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["config", "use", "nope"])
        .assert()
        .code(5);
}

#[test]
fn test_config_path_honours_override() {
    let (_dir, config) = scratch();
    topoview_cmd(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
