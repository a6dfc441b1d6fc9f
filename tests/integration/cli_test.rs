use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;

#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::TestFixture;

#[cfg(test)]
mod tests {
    use super::*;

    /// Command with an isolated config home and no inherited path overrides
    fn overlay_cmd(fixture: &TestFixture) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_json-overlay"));
        cmd.env("XDG_CONFIG_HOME", fixture.temp.path().join("empty-config"))
            .env_remove("OVERLAY_TARGET")
            .env_remove("OVERLAY_SOURCE")
            .env_remove("OVERLAY_OUTPUT")
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn test_cli_help() {
        let fixture = TestFixture::new().unwrap();
        overlay_cmd(&fixture)
            .arg("--help")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("json-overlay merges the values of a source JSON document")
                    .and(predicate::str::contains("--target"))
                    .and(predicate::str::contains("--source"))
                    .and(predicate::str::contains("--output"))
                    .and(predicate::str::contains("ubios-udapi-server.state")),
            );
    }

    #[test]
    fn test_cli_short_help_does_not_merge() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target(r#"{"a": 1}"#).unwrap().with_source(r#"{"a": 2}"#).unwrap();

        overlay_cmd(&fixture)
            .arg("-h")
            .arg("-t")
            .arg(&fixture.target)
            .arg("-s")
            .arg(&fixture.source)
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));

        assert_eq!(fixture.read_target(), json!({"a": 1}));
    }

    #[test]
    fn test_cli_version() {
        let fixture = TestFixture::new().unwrap();
        overlay_cmd(&fixture)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("json-overlay"));
    }

    #[test]
    fn test_merge_into_output_file() {
        let fixture = TestFixture::new().unwrap();
        fixture
            .with_target(r#"{"net": {"ip": "1.1.1.1", "port": 80}, "keep": true}"#)
            .unwrap()
            .with_source(r#"{"net": {"port": 8080}, "added": [1, 2]}"#)
            .unwrap();

        overlay_cmd(&fixture)
            .arg("-t")
            .arg(&fixture.target)
            .arg("-s")
            .arg(&fixture.source)
            .arg("-o")
            .arg(&fixture.output)
            .assert()
            .success()
            .stdout(predicate::str::contains("Merge completed successfully."));

        assert_eq!(
            fixture.read_output(),
            json!({"net": {"ip": "1.1.1.1", "port": 8080}, "keep": true, "added": [1, 2]})
        );
        // Target is untouched when a separate output is given
        assert_eq!(fixture.read_target(), json!({"net": {"ip": "1.1.1.1", "port": 80}, "keep": true}));
    }

    #[test]
    fn test_output_defaults_to_target() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target(r#"{"a": 1}"#).unwrap().with_source(r#"{"b": 2}"#).unwrap();

        overlay_cmd(&fixture)
            .arg("--target")
            .arg(&fixture.target)
            .arg("--source")
            .arg(&fixture.source)
            .assert()
            .success();

        assert_eq!(fixture.read_target(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_output_is_pretty_printed() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target(r#"{"a":{"b":1}}"#).unwrap().with_source("{}").unwrap();

        overlay_cmd(&fixture)
            .args(["-t", fixture.target.to_str().unwrap()])
            .args(["-s", fixture.source.to_str().unwrap()])
            .args(["-o", fixture.output.to_str().unwrap()])
            .assert()
            .success();

        assert_eq!(fs::read_to_string(&fixture.output).unwrap(), "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
    }

    #[test]
    fn test_paths_from_environment() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target(r#"{"a": 1}"#).unwrap().with_source(r#"{"a": 3}"#).unwrap();

        overlay_cmd(&fixture)
            .env("OVERLAY_TARGET", &fixture.target)
            .env("OVERLAY_SOURCE", &fixture.source)
            .env("OVERLAY_OUTPUT", &fixture.output)
            .assert()
            .success();

        assert_eq!(fixture.read_output(), json!({"a": 3}));
    }

    #[test]
    fn test_paths_from_app_config() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target(r#"{"a": 1}"#).unwrap().with_source(r#"{"c": 3}"#).unwrap();
        let config_home = fixture
            .with_app_config(&format!(
                "[paths]\ntarget = {:?}\nsource = {:?}\noutput = {:?}\n",
                fixture.target.to_str().unwrap(),
                fixture.source.to_str().unwrap(),
                fixture.output.to_str().unwrap()
            ))
            .unwrap();

        overlay_cmd(&fixture).env("XDG_CONFIG_HOME", &config_home).assert().success();

        assert_eq!(fixture.read_output(), json!({"a": 1, "c": 3}));
    }

    #[test]
    fn test_flags_override_app_config() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target(r#"{"a": 1}"#).unwrap().with_source(r#"{"c": 3}"#).unwrap();
        let config_home = fixture
            .with_app_config("[paths]\nsource = \"/nonexistent/source.json\"\n")
            .unwrap();

        overlay_cmd(&fixture)
            .env("XDG_CONFIG_HOME", &config_home)
            .arg("-t")
            .arg(&fixture.target)
            .arg("-s")
            .arg(&fixture.source)
            .arg("-o")
            .arg(&fixture.output)
            .assert()
            .success();

        assert_eq!(fixture.read_output(), json!({"a": 1, "c": 3}));
    }

    #[test]
    fn test_dry_run_prints_and_does_not_write() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target(r#"{"a": 1}"#).unwrap().with_source(r#"{"a": 2}"#).unwrap();

        overlay_cmd(&fixture)
            .arg("-t")
            .arg(&fixture.target)
            .arg("-s")
            .arg(&fixture.source)
            .arg("--dry-run")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"a\": 2"))
            .stdout(predicate::str::contains("Merge completed successfully.").not());

        assert_eq!(fixture.read_target(), json!({"a": 1}));
    }

    #[test]
    fn test_backup_created_before_overwrite() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target(r#"{"a": 1}"#).unwrap().with_source(r#"{"a": 2}"#).unwrap();

        overlay_cmd(&fixture)
            .arg("-t")
            .arg(&fixture.target)
            .arg("-s")
            .arg(&fixture.source)
            .arg("--backup")
            .assert()
            .success();

        let backups: Vec<_> = fs::read_dir(fixture.temp.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("target.json.backup."))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(backups[0].path()).unwrap(), r#"{"a": 1}"#);
        assert_eq!(fixture.read_target(), json!({"a": 2}));
    }

    #[test]
    fn test_missing_target_fails() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_source("{}").unwrap();

        overlay_cmd(&fixture)
            .arg("-t")
            .arg(fixture.temp.path().join("missing.json"))
            .arg("-s")
            .arg(&fixture.source)
            .assert()
            .failure()
            .stderr(
                predicate::str::contains("Failed to load target document")
                    .and(predicate::str::contains("missing.json")),
            );
    }

    #[test]
    fn test_invalid_source_json_fails() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target("{}").unwrap().with_source("{ invalid json").unwrap();

        overlay_cmd(&fixture)
            .arg("-t")
            .arg(&fixture.target)
            .arg("-s")
            .arg(&fixture.source)
            .arg("-o")
            .arg(&fixture.output)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load source document"));

        assert!(!fixture.output.exists());
    }

    #[test]
    fn test_non_object_target_fails() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target("[1, 2, 3]").unwrap().with_source("{}").unwrap();

        overlay_cmd(&fixture)
            .arg("-t")
            .arg(&fixture.target)
            .arg("-s")
            .arg(&fixture.source)
            .assert()
            .failure()
            .stderr(predicate::str::contains("must be a JSON object, found array"));
    }

    #[test]
    fn test_unwritable_output_fails() {
        let fixture = TestFixture::new().unwrap();
        fixture.with_target("{}").unwrap().with_source("{}").unwrap();
        let blocker = fixture.temp.path().join("blocker");
        fs::write(&blocker, "file").unwrap();

        overlay_cmd(&fixture)
            .arg("-t")
            .arg(&fixture.target)
            .arg("-s")
            .arg(&fixture.source)
            .arg("-o")
            .arg(blocker.join("merged.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to write merged document"));
    }

    #[test]
    fn test_trace_logs_merge_decisions() {
        let fixture = TestFixture::new().unwrap();
        fixture
            .with_target(r#"{"rules": [{"id": 1}]}"#)
            .unwrap()
            .with_source(r#"{"rules": [{"id": 2}]}"#)
            .unwrap();

        overlay_cmd(&fixture)
            .arg("-t")
            .arg(&fixture.target)
            .arg("-s")
            .arg(&fixture.source)
            .arg("-o")
            .arg(&fixture.output)
            .arg("--trace")
            .assert()
            .success()
            .stderr(predicate::str::contains("appending unmatched record"));
    }
}
