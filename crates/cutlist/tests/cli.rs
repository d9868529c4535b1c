// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the `cutlist` binary against temporary plugin environments.

use std::process::{Command, Output};

use cutlist_test_utils::{PackageFixture, PluginFixture, adapters_manifest, mock_manifest};

/// Command isolated from the user's config and data directories.
fn cutlist(fixture: &PluginFixture) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cutlist"));
    cmd.current_dir(fixture.path())
        .env("HOME", fixture.path())
        .env("XDG_CONFIG_HOME", fixture.path().join("config"))
        .env("XDG_DATA_HOME", fixture.path().join("data"))
        .env("CUTLIST_PACKAGE_PATH", fixture.package_root())
        .env_remove("CUTLIST_PLUGIN_MANIFEST_PATH")
        .env_remove("CUTLIST_DISABLE_PACKAGE_PLUGINS")
        .env_remove("CUTLIST_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn list_json_includes_environment_manifest() {
    let fixture = PluginFixture::new().unwrap();
    let path = fixture
        .write_manifest("studio.json", &adapters_manifest(&["studio_adapter"]))
        .unwrap();

    let output = cutlist(&fixture)
        .args(["list", "--json"])
        .env("CUTLIST_PLUGIN_MANIFEST_PATH", &path)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let studio = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["name"] == "studio_adapter")
        .unwrap();
    assert_eq!(studio["origin"], "environment");
    assert_eq!(studio["kind"], "adapter");
}

#[test]
fn sources_prints_static_package_manifest() {
    let fixture = PluginFixture::new().unwrap();
    let location = fixture
        .install(
            &PackageFixture::new("cutlist-jsonplugin")
                .entry_point("json_plugin", "cutlist_jsonplugin")
                .static_manifest("cutlist_jsonplugin", mock_manifest("json_adapter", "json_linker")),
        )
        .unwrap();

    let output = cutlist(&fixture).arg("sources").output().unwrap();
    assert!(output.status.success());
    let expected = location.join("cutlist_jsonplugin").join("plugin_manifest.json");
    assert_eq!(stdout(&output).trim(), expected.display().to_string());
}

#[test]
fn which_reports_builtin_adapter() {
    let fixture = PluginFixture::new().unwrap();
    let output = cutlist(&fixture)
        .args(["--plain", "which", "reel1.edl"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("cmx_3600 (built-in manifest)"));
}

#[test]
fn which_unknown_suffix_fails() {
    let fixture = PluginFixture::new().unwrap();
    let output = cutlist(&fixture)
        .args(["--plain", "which", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no adapter registered for `nope`"), "stderr: {stderr}");
    assert!(!stderr.contains("configuration error"), "stderr: {stderr}");
    assert!(!stderr.contains("error:"), "stderr: {stderr}");
}

#[test]
fn missing_manifest_fails_with_parse_error() {
    let fixture = PluginFixture::new().unwrap();
    let output = cutlist(&fixture)
        .arg("sources")
        .env("CUTLIST_PLUGIN_MANIFEST_PATH", fixture.path().join("missing.json"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.json"), "stderr: {stderr}");
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn config_check_rejects_unknown_key() {
    let fixture = PluginFixture::new().unwrap();
    std::fs::write(
        fixture.path().join("cutlist.toml"),
        "[plugins]\nmanifestz = []\n",
    )
    .unwrap();

    let output = cutlist(&fixture).args(["config", "check"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("manifestz"), "stderr: {stderr}");
}

#[test]
fn config_check_accepts_local_file() {
    let fixture = PluginFixture::new().unwrap();
    std::fs::write(
        fixture.path().join("cutlist.toml"),
        "[plugins]\ndisable_package_plugins = true\n",
    )
    .unwrap();

    let output = cutlist(&fixture)
        .args(["--plain", "config", "check"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("[OK] configuration is valid"));
    assert!(out.contains("disabled"));
}
