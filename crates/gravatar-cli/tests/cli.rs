use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const USER_URL: &str = "https://www.gravatar.com/avatar/b58996c504c5638798eb6b511e6f49af";
const PLACEHOLDER_URL: &str =
    "https://www.gravatar.com/avatar/243a658fd5860f7cc2b21e501b21472a";

fn gravatar(config_home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("gravatar");
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG");
    cmd
}

fn run_cmd(config_home: &Path, args: &[&str]) -> String {
    let output = gravatar(config_home)
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(config_home: &Path, args: &[&str]) -> Value {
    let output = gravatar(config_home)
        .arg("--json")
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn write_config(config_home: &Path, contents: &str) {
    let dir = config_home.join("gravatar");
    fs::create_dir_all(&dir).expect("config dir");
    fs::write(dir.join("config.toml"), contents).expect("write config");
}

#[test]
fn cli_url_normalizes_and_hashes() {
    let temp = TempDir::new().expect("temp dir");
    let out = run_cmd(temp.path(), &["url", "USER@EXAMPLE.COM", " user@example.com "]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec![USER_URL, USER_URL]);
}

#[test]
fn cli_url_reads_stdin() {
    let temp = TempDir::new().expect("temp dir");
    let output = gravatar(temp.path())
        .arg("url")
        .write_stdin("User@Example.com\n\n")
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8(output.stdout).expect("utf8"), format!("{USER_URL}\n"));
}

#[test]
fn cli_url_json_reports_digest_and_source() {
    let temp = TempDir::new().expect("temp dir");
    let value = run_cmd_json(temp.path(), &["url", "", "--size", "80"]);
    let items = value.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["normalized"], "");
    assert_eq!(items[0]["digest"], "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(items[0]["source"], "computed");
    assert_eq!(
        items[0]["url"],
        "https://www.gravatar.com/avatar/d41d8cd98f00b204e9800998ecf8427e?s=80"
    );
}

#[test]
fn cli_pinned_flag_embeds_placeholder() {
    let temp = TempDir::new().expect("temp dir");
    let out = run_cmd(temp.path(), &["url", "--pinned", "someone@example.org"]);
    assert_eq!(out.trim_end(), PLACEHOLDER_URL);

    let custom = run_cmd(
        temp.path(),
        &["url", "--pinned=B58996C504C5638798EB6B511E6F49AF", "x@y.z"],
    );
    assert_eq!(custom.trim_end(), USER_URL);
}

#[test]
fn cli_digest_ignores_pinned_source() {
    let temp = TempDir::new().expect("temp dir");
    let value = run_cmd_json(temp.path(), &["--pinned", "digest", " USER@example.com"]);
    assert_eq!(value["normalized"], "user@example.com");
    assert_eq!(value["digest"], "b58996c504c5638798eb6b511e6f49af");
}

#[test]
fn cli_config_pins_digest_and_computed_flag_overrides() {
    let temp = TempDir::new().expect("temp dir");
    write_config(temp.path(), "[digest]\nsource = \"pinned\"\n");

    let pinned = run_cmd(temp.path(), &["url", "user@example.com"]);
    assert_eq!(pinned.trim_end(), PLACEHOLDER_URL);

    let computed = run_cmd(temp.path(), &["--computed", "url", "user@example.com"]);
    assert_eq!(computed.trim_end(), USER_URL);
}

#[test]
fn cli_render_registers_filter() {
    let temp = TempDir::new().expect("temp dir");
    let template = temp.path().join("author.txt");
    let data = temp.path().join("data.json");
    fs::write(&template, "{{ author.name }}: {{ author.email | gravatar }}\n").expect("template");
    fs::write(
        &data,
        r#"{"author": {"name": "Ada", "email": " USER@Example.com "}}"#,
    )
    .expect("data");

    let out = run_cmd(
        temp.path(),
        &[
            "render",
            template.to_str().expect("template path"),
            "--data",
            data.to_str().expect("data path"),
        ],
    );
    assert_eq!(out, format!("Ada: {USER_URL}\n"));
}

#[test]
fn cli_invalid_pinned_digest_exits_with_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let output = gravatar(temp.path())
        .args(["url", "--pinned=not-a-digest", "user@example.com"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("--pinned"), "stderr: {stderr}");
}

#[test]
fn cli_missing_template_exits_with_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing.html");
    let output = gravatar(temp.path())
        .args(["render", missing.to_str().expect("path")])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_invalid_config_exits_with_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    write_config(temp.path(), "base_url = \"https://example.com/avatar\"\n");
    let output = gravatar(temp.path())
        .args(["url", "user@example.com"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
}
