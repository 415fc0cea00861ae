//! Integration tests for the `cmdtree` binary.
//!
//! Each test writes a manifest into a temp dir and runs the binary with
//! config lookup pointed at that dir, so no user config leaks in.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[command]]
path = "root1"
description = "first"

[[command.option]]
long = "arg1"
short = "a"
type = "int"

[[command]]
path = "root2 sub1"

[[command.option]]
long = "name"
required = true
"#;

// =============================================================================
// Test Fixtures
// =============================================================================

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::write(dir.path().join("commands.toml"), MANIFEST).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn manifest(&self) -> PathBuf {
        self.path().join("commands.toml")
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// The binary with config lookup isolated to this workspace.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cmdtree").unwrap();
        cmd.env_remove("CMDTREE_CONFIG")
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", self.path())
            .env("HOME", self.path());
        cmd
    }

    /// The binary with `--manifest` already set for `subcommand`.
    fn with_manifest(&self, subcommand: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.arg(subcommand).arg("--manifest").arg(self.manifest());
        cmd
    }
}

// =============================================================================
// tokens
// =============================================================================

mod tokens {
    use super::*;

    #[test]
    fn lists_tokens() {
        let ws = Workspace::new();
        ws.with_manifest("tokens")
            .args(["--", "root2", "sub1", "--name", "x"])
            .assert()
            .success()
            .stdout(predicate::str::contains("COMMAND(root2) @0"))
            .stdout(predicate::str::contains("COMMAND(sub1) @1"))
            .stdout(predicate::str::contains("OPTION(--name) @2"))
            .stdout(predicate::str::contains("ARGUMENT(x) @3"));
    }

    #[test]
    fn reports_lexer_messages() {
        let ws = Workspace::new();
        ws.with_manifest("tokens")
            .args(["--", "junk", "root1"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "1000E:(pos 0): Illegal content before commands 'junk'",
            ));
    }

    #[test]
    fn json_output() {
        let ws = Workspace::new();
        let output = ws
            .with_manifest("tokens")
            .args(["--json", "--", "root1", "-a", "1"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["tokens"][0]["type"], "COMMAND");
        assert_eq!(value["tokens"][1]["value"], "-a");
        assert_eq!(value["tokens"][1]["type"], "OPTION");
        assert_eq!(value["tokens"][2]["position"], 2);
        assert_eq!(value["messages"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn no_words() {
        let ws = Workspace::new();
        ws.with_manifest("tokens")
            .assert()
            .success()
            .stdout(predicate::str::contains("(no tokens)"));
    }
}

// =============================================================================
// parse
// =============================================================================

mod parse {
    use super::*;

    #[test]
    fn clean_parse_exits_zero() {
        let ws = Workspace::new();
        ws.with_manifest("parse")
            .args(["--", "root1", "--arg1", "5"])
            .assert()
            .success()
            .stdout(predicate::str::contains("command: root1 -> root1"))
            .stdout(predicate::str::contains("--arg1 = 5 (named)"));
    }

    #[test]
    fn errors_exit_one() {
        let ws = Workspace::new();
        ws.with_manifest("parse")
            .args(["--", "root2", "sub1"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("command: root2 sub1 -> root2-sub1"))
            .stdout(predicate::str::contains(
                "2000E:(pos 0): Missing mandatory option '--name'",
            ));
    }

    #[test]
    fn unresolved_exits_one() {
        let ws = Workspace::new();
        ws.with_manifest("parse")
            .args(["--", "nope"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("command: (none)"));
    }

    #[test]
    fn json_output() {
        let ws = Workspace::new();
        let output = ws
            .with_manifest("parse")
            .args(["--json", "--", "root1", "--arg1", "x"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["registration"]["path"], "root1");
        assert_eq!(value["messages"][0]["code"], 2002);
        assert_eq!(value["options"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn quiet_suppresses_text() {
        let ws = Workspace::new();
        ws.with_manifest("parse")
            .args(["--quiet", "--", "root1"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

// =============================================================================
// tree
// =============================================================================

mod tree {
    use super::*;

    #[test]
    fn prints_nested_tree() {
        let ws = Workspace::new();
        ws.with_manifest("tree")
            .assert()
            .success()
            .stdout(predicate::str::contains("root1 - first"))
            .stdout(predicate::str::contains("--arg1, -a <int>"))
            .stdout(predicate::str::contains("  sub1"))
            .stdout(predicate::str::contains("required"));
    }

    #[test]
    fn json_lists_commands() {
        let ws = Workspace::new();
        let output = ws.with_manifest("tree").arg("--json").output().unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let commands = value["commands"].as_array().unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1]["path"], "root2 sub1");
        assert_eq!(commands[1]["target"], "root2-sub1");
    }
}

// =============================================================================
// Configuration and errors
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn missing_manifest_is_an_error() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["parse", "--", "root1"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("error: No manifest given"));
    }

    #[test]
    fn unreadable_manifest_is_an_error() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["tree", "--manifest"])
            .arg(ws.path().join("missing.toml"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Failed to load manifest"));
    }

    #[test]
    fn manifest_path_from_config_is_relative_to_config() {
        let ws = Workspace::new();
        let config = ws.write("cmdtree.toml", "[manifest]\npath = \"commands.toml\"\n");
        ws.cmd()
            .arg("--config")
            .arg(&config)
            .args(["parse", "--", "root1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("command: root1 -> root1"));
    }

    #[test]
    fn parser_features_from_config() {
        let ws = Workspace::new();
        let config = ws.write(
            "cmdtree.toml",
            "[parser]\ncase_sensitive_commands = false\nallow_directives = true\n",
        );
        ws.with_manifest("parse")
            .arg("--config")
            .arg(&config)
            .args(["--", "[debug]", "ROOT1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("command: root1"))
            .stdout(predicate::str::contains("directives:\n  debug"));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let ws = Workspace::new();
        let config = ws.write("cmdtree.toml", "[parser]\nunknown_key = true\n");
        ws.with_manifest("tree")
            .arg("--config")
            .arg(&config)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Failed to load config"));
    }
}
