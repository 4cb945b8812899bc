//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the CLI tool,
//! following behavior-driven testing principles.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a command for the fmtlint CLI
fn fmtlint_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fmtlint"))
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        fmtlint_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        fmtlint_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn dry_run_requires_fix() {
        fmtlint_cmd()
            .args(["lint", "--dry-run", "."])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--fix"));
    }
}

mod rules_command {
    use super::*;

    #[test]
    fn lists_rule_and_preset() {
        fmtlint_cmd()
            .arg("rules")
            .assert()
            .success()
            .stdout(predicate::str::contains("oxfmt/oxfmt (fixable): Format code via oxfmt"))
            .stdout(predicate::str::contains("recommended (oxfmt/recommended)"))
            .stdout(predicate::str::contains("oxfmt/oxfmt: error"));
    }
}

mod init_command {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn creates_config_once() {
        let temp = assert_fs::TempDir::new().unwrap();

        fmtlint_cmd()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .success();

        temp.child(".fmtlint.jsonc")
            .assert(predicate::str::contains("\"oxfmt/oxfmt\": \"error\""));

        fmtlint_cmd()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("already exists"));

        fmtlint_cmd()
            .current_dir(temp.path())
            .args(["init", "--force"])
            .assert()
            .success();
    }
}

mod lint_command {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn reports_zero_files_for_nonexistent_path() {
        let temp = assert_fs::TempDir::new().unwrap();

        fmtlint_cmd()
            .current_dir(temp.path())
            .args(["lint", "nonexistent_file.js"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Checked 0 files, found 0 issues"));
    }

    #[test]
    fn invalid_config_exits_with_two() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".fmtlint.json")
            .write_str(r#"{ "granularity": "word" }"#)
            .unwrap();

        fmtlint_cmd()
            .current_dir(temp.path())
            .args(["lint", "."])
            .assert()
            .code(2);
    }

    #[test]
    fn invalid_rule_options_exit_with_two() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".fmtlint.json")
            .write_str(r#"{ "rules": { "oxfmt/oxfmt": ["error", { "semi": "never" }] } }"#)
            .unwrap();

        fmtlint_cmd()
            .current_dir(temp.path())
            .args(["lint", "."])
            .assert()
            .code(2);
    }
}

#[cfg(unix)]
mod with_formatter_worker {
    use super::*;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// Sets up a project whose formatter is a shell script printing `response`.
    fn project(response: &str) -> assert_fs::TempDir {
        let temp = assert_fs::TempDir::new().unwrap();

        let script = temp.child("worker.sh");
        script
            .write_str(&format!(
                "#!/bin/sh\ncat > /dev/null\nprintf '%s' '{}'\n",
                response
            ))
            .unwrap();
        fs::set_permissions(script.path(), fs::Permissions::from_mode(0o755)).unwrap();

        let config = serde_json::json!({
            "include": ["**/*.js"],
            "formatter": { "command": script.path(), "workers": 1 }
        });
        temp.child(".fmtlint.json")
            .write_str(&config.to_string())
            .unwrap();

        temp.child("a.js").write_str("const a = 1\n").unwrap();
        temp
    }

    const FORMATTED: &str = r#"{"code":"const a = 1;\n"}"#;

    #[test]
    fn reports_missing_semicolon() {
        let temp = project(FORMATTED);

        fmtlint_cmd()
            .current_dir(temp.path())
            .args(["lint", "."])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "1:11 error [oxfmt/oxfmt] Insert `;`",
            ))
            .stdout(predicate::str::contains("Checked 1 files, found 1 issues"));
    }

    #[test]
    fn json_output_carries_fix() {
        let temp = project(FORMATTED);

        let output = fmtlint_cmd()
            .current_dir(temp.path())
            .args(["lint", "--format", "json", "a.js"])
            .output()
            .unwrap();

        let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(results[0]["errorCount"], 1);
        assert_eq!(results[0]["fixableCount"], 1);
        let diagnostic = &results[0]["diagnostics"][0];
        assert_eq!(diagnostic["message"], "Insert `;`");
        assert_eq!(diagnostic["fix"]["text"], ";");
        assert_eq!(diagnostic["span"]["start"], 11);
    }

    #[test]
    fn fix_rewrites_file() {
        let temp = project(FORMATTED);

        fmtlint_cmd()
            .current_dir(temp.path())
            .args(["lint", "--fix", "."])
            .assert()
            .success()
            .stdout(predicate::str::contains("Fixed 1 issues in 1 files"));

        temp.child("a.js").assert("const a = 1;\n");
    }

    #[test]
    fn dry_run_leaves_file_untouched() {
        let temp = project(FORMATTED);

        fmtlint_cmd()
            .current_dir(temp.path())
            .args(["lint", "--fix", "--dry-run", "."])
            .assert()
            .success()
            .stdout(predicate::str::contains("Would fix 1 issues"));

        temp.child("a.js").assert("const a = 1\n");
    }

    #[test]
    fn formatter_error_is_reported_without_fix() {
        let temp = project(
            r#"{"code":"","errors":[{"message":"Unexpected token","labels":[{"start":6,"end":7}]}]}"#,
        );

        fmtlint_cmd()
            .current_dir(temp.path())
            .args(["lint", "--fix", "."])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "1:6 error [oxfmt/oxfmt] Unexpected token",
            ));

        temp.child("a.js").assert("const a = 1\n");
    }

    #[test]
    fn failing_worker_is_reported_at_file_start() {
        let temp = assert_fs::TempDir::new().unwrap();
        let script = temp.child("worker.sh");
        script.write_str("#!/bin/sh\ncat > /dev/null\nexit 3\n").unwrap();
        fs::set_permissions(script.path(), fs::Permissions::from_mode(0o755)).unwrap();
        let config = serde_json::json!({ "formatter": { "command": script.path() } });
        temp.child(".fmtlint.json")
            .write_str(&config.to_string())
            .unwrap();
        temp.child("a.js").write_str("const a = 1\n").unwrap();

        fmtlint_cmd()
            .current_dir(temp.path())
            .args(["lint", "a.js"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("1:0 error [oxfmt/oxfmt] Failed to format file"));
    }
}
