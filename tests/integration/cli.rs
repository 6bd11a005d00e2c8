//! Tests of the `javadoc-links` binary.

use assert_cmd::Command;
use javadoc_links::test_utils::write_javadoc_jar;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Binary isolated from the user's global configuration and the network.
fn javadoc_links(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("javadoc-links").unwrap();
    cmd.current_dir(dir)
        .env("JAVADOC_LINKS_CONFIG_PATH", dir.join("no-global-config.toml"))
        .env("JAVADOC_LINKS_NO_PROGRESS", "1")
        .env_remove("JAVADOC_LINKS_CHECK_AVAILABILITY")
        .env_remove("RUST_LOG");
    cmd
}

fn write_resolution(dir: &Path) -> std::path::PathBuf {
    write_javadoc_jar(&dir.join("libs/bar-2.0-javadoc.jar"), "com.example.bar");
    let path = dir.join("main.resolution.toml");
    std::fs::write(
        &path,
        r#"
[[api]]
file = "libs/foo-1.0.jar"
group = "com.example"
module = "foo"
version = "1.0"

[[api]]
file = "libs/bar-2.0.jar"
group = "com.example"
module = "bar"
version = "2.0"

[[api]]
file = "libs/baz-3.0-SNAPSHOT.jar"
group = "com.example"
module = "baz"
version = "3.0-SNAPSHOT"

[[javadoc]]
file = "libs/bar-2.0-javadoc.jar"
group = "com.example"
module = "bar"
version = "2.0"

[[sources]]
file = "src/main/java"
"#,
    )
    .unwrap();
    path
}

#[test]
fn test_generate_writes_links_file() {
    let temp = TempDir::new().unwrap();
    let resolution = write_resolution(temp.path());
    std::fs::write(
        temp.path().join("javadoc-links.toml"),
        "default-javadoc-provider = \"https://docs.example.com/{name}/{version}\"\n",
    )
    .unwrap();

    javadoc_links(temp.path())
        .args(["generate", "--no-check"])
        .arg(&resolution)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 links, 1 offline, 1 source paths, 1 skipped"));

    let links = std::fs::read_to_string(temp.path().join("links.options")).unwrap();
    let lines: Vec<_> = links.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "-link https://docs.example.com/foo/1.0");
    assert!(lines[1].starts_with("-linkoffline https://docs.example.com/bar/2.0 "));
    assert!(lines[1].ends_with("com.example_bar_2.0"));
    assert!(lines[2].starts_with("-sourcepath "));
    assert!(temp.path().join("unpackedJavadocs/com.example_bar_2.0/element-list").is_file());
}

#[test]
fn test_generate_checks_can_be_disabled_by_env() {
    let temp = TempDir::new().unwrap();
    let resolution = write_resolution(temp.path());

    javadoc_links(temp.path())
        .env("JAVADOC_LINKS_CHECK_AVAILABILITY", "false")
        .args(["--quiet", "generate"])
        .arg(&resolution)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("links.options").is_file());
}

#[test]
fn test_generate_invalid_env_value_fails() {
    let temp = TempDir::new().unwrap();
    let resolution = write_resolution(temp.path());

    javadoc_links(temp.path())
        .env("JAVADOC_LINKS_CHECK_AVAILABILITY", "sometimes")
        .arg("generate")
        .arg(&resolution)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JAVADOC_LINKS_CHECK_AVAILABILITY"));
}

#[test]
fn test_generate_missing_resolution_fails() {
    let temp = TempDir::new().unwrap();

    javadoc_links(temp.path())
        .args(["generate", "--no-check", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn test_generate_malformed_resolution_fails() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("broken.toml"), "[[api]]\nfile = 42\n").unwrap();

    javadoc_links(temp.path())
        .args(["generate", "--no-check", "broken.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid resolution file"));
}

#[test]
fn test_resolve_prints_links() {
    let temp = TempDir::new().unwrap();

    javadoc_links(temp.path())
        .args(["resolve", "io.papermc.paper:paper-api:1.21.1", "com.example:foo:1.0-SNAPSHOT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://jd.papermc.io/paper/1.21/"))
        .stdout(predicate::str::contains("filtered"));
}

#[test]
fn test_resolve_json_uses_project_config() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("javadoc-links.toml"),
        "[overrides-by-key]\n\"com.example:foo\" = \"https://foo.example.com/{version}/\"\n",
    )
    .unwrap();

    let output = javadoc_links(temp.path())
        .args(["resolve", "--format", "json", "com.example:foo:2.1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["coordinates"], "com.example:foo:2.1");
    assert_eq!(json[0]["status"], "linked");
    assert_eq!(json[0]["link"], "https://foo.example.com/2.1/");
}

#[test]
fn test_resolve_rejects_bad_coordinate() {
    let temp = TempDir::new().unwrap();

    javadoc_links(temp.path())
        .args(["resolve", "com.example:foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coordinate"))
        .stderr(predicate::str::contains("group:module:version"));
}

#[test]
fn test_explicit_config_flag() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("custom.toml"),
        "default-javadoc-provider = \"https://custom.example.com/{group}/{name}\"\n",
    )
    .unwrap();

    javadoc_links(temp.path())
        .args(["--config", "custom.toml", "resolve", "com.example:foo:1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://custom.example.com/com.example/foo"));
}
