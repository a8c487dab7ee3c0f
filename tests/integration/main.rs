//! Integration tests for modguard

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn modguard(dir: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("modguard");
        cmd.current_dir(dir)
            .env_remove("TF_DATA_DIR")
            .env_remove("MODGUARD_CONFIG")
            .env("CI", "1");
        cmd
    }

    /// Project with audit logging off and the given tool program
    fn project(program: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".modguard.toml"),
            format!("[general]\naudit_log = false\n\n[tool]\nprogram = \"{program}\"\n"),
        )
        .unwrap();
        dir
    }

    fn add_module(root: &Path, key: &str, content: &str) {
        let modules = root.join(".terraform/modules");
        fs::create_dir_all(modules.join(key)).unwrap();
        fs::write(modules.join(key).join("main.tf"), content).unwrap();
        fs::write(
            modules.join("modules.json"),
            format!(
                r#"{{"Modules": [
                    {{"Key": "", "Source": "", "Dir": "."}},
                    {{"Key": "{key}", "Source": "registry.terraform.io/acme/{key}/aws", "Version": "1.0.0"}}
                ]}}"#
            ),
        )
        .unwrap();
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        modguard(dir.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Terraform module integrity guard"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        modguard(dir.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("modguard"));
    }

    #[test]
    fn verify_without_metadata_is_noop() {
        let dir = project("terraform");
        modguard(dir.path())
            .arg("verify")
            .assert()
            .success()
            .stdout(predicate::str::contains("No modules metadata file found"));
        assert!(!dir.path().join(".module_hashes.json").exists());
    }

    #[test]
    fn verify_records_then_detects_tamper() {
        let dir = project("terraform");
        add_module(dir.path(), "vpc", "module v1");

        modguard(dir.path())
            .arg("verify")
            .assert()
            .success()
            .stdout(predicate::str::contains("vpc added to the lock file"));
        let lock = fs::read_to_string(dir.path().join(".module_hashes.json")).unwrap();
        assert!(lock.contains("\"vpc\""));

        modguard(dir.path())
            .arg("verify")
            .assert()
            .success()
            .stdout(predicate::str::contains("vpc unchanged"));

        add_module(dir.path(), "vpc", "module v1, quietly patched");
        modguard(dir.path())
            .arg("verify")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Module vpc has changed"));
        assert_eq!(
            fs::read_to_string(dir.path().join(".module_hashes.json")).unwrap(),
            lock
        );
    }

    #[test]
    fn verify_frozen_rejects_unlocked_module() {
        let dir = project("terraform");
        add_module(dir.path(), "vpc", "module v1");

        modguard(dir.path())
            .args(["verify", "--frozen"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not present in the lock file"));
    }

    #[test]
    fn corrupt_lock_file_fails_with_hint() {
        let dir = project("terraform");
        add_module(dir.path(), "vpc", "module v1");
        fs::write(dir.path().join(".module_hashes.json"), "not json").unwrap();

        modguard(dir.path())
            .arg("verify")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Corrupt lock file"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn hashes_json_output() {
        let dir = project("terraform");
        fs::write(
            dir.path().join(".module_hashes.json"),
            r#"{"vpc": "abc123"}"#,
        )
        .unwrap();

        modguard(dir.path())
            .args(["hashes", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"vpc\": \"abc123\""));
    }

    #[test]
    fn chdir_selects_project() {
        let dir = project("terraform");
        add_module(dir.path(), "vpc", "module v1");
        let elsewhere = TempDir::new().unwrap();

        modguard(elsewhere.path())
            .arg("-C")
            .arg(dir.path())
            .arg("verify")
            .assert()
            .success();
        assert!(dir.path().join(".module_hashes.json").exists());
    }

    #[cfg(unix)]
    #[test]
    fn other_commands_pass_through() {
        let dir = project("echo");
        modguard(dir.path())
            .args(["plan", "-out=tfplan"])
            .assert()
            .success()
            .stdout(predicate::str::contains("plan -out=tfplan"));
    }

    #[cfg(unix)]
    #[test]
    fn pass_through_propagates_exit_code() {
        let dir = project("false");
        modguard(dir.path()).arg("apply").assert().code(1);
    }

    #[cfg(unix)]
    #[test]
    fn init_verifies_after_tool_succeeds() {
        let dir = project("true");
        add_module(dir.path(), "vpc", "module v1");

        modguard(dir.path())
            .args(["init", "-upgrade"])
            .assert()
            .success()
            .stdout(predicate::str::contains("vpc added to the lock file"));
    }

    #[cfg(unix)]
    #[test]
    fn init_failure_skips_verification() {
        let dir = project("false");
        add_module(dir.path(), "vpc", "module v1");

        modguard(dir.path()).arg("init").assert().code(1);
        assert!(!dir.path().join(".module_hashes.json").exists());
    }

    #[test]
    fn missing_tool_reports_error() {
        let dir = project("modguard-test-no-such-program");
        modguard(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Command failed"));
    }
}
