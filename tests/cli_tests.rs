//! End-to-end CLI test suite.
//!
//! Tests organized by command group. Each test runs the `domtool` binary
//! against a freshly provisioned domain.

mod common;

use common::harness::{DomtoolCommand, TestEnv};
use predicates::prelude::*;
use serde_json::Value;

// ===========================================
// general behavior
// ===========================================
mod general_tests {
    use super::*;

    #[test]
    fn test_help_succeeds() {
        DomtoolCommand::new()
            .args(["--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage: domtool"));
    }

    #[test]
    fn test_unknown_subcommand_is_usage_error() {
        DomtoolCommand::new()
            .args(["user", "frobnicate"])
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("frobnicate"));
    }

    #[test]
    fn test_missing_subcommand_is_usage_error() {
        DomtoolCommand::new()
            .args(["user"])
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Usage: domtool user"));
    }

    #[test]
    fn test_handler_failure_exits_one() {
        let env = TestEnv::new();
        let admin = env.domain().admin_user_arg();
        env.cmd()
            .args(["domain", "demote", "--remove-other-dead-server=GHOST"])
            .args([admin.as_str()])
            .assert()
            .code(1)
            .stderr(predicate::str::starts_with("ERROR: "))
            .stderr(predicate::str::contains("server not found: GHOST"));
    }

    #[test]
    fn test_completions() {
        DomtoolCommand::new()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("domtool"));
    }

    #[test]
    fn test_debuglevel_logs_to_stderr() {
        let env = TestEnv::new();
        env.cmd()
            .user_list()
            .args(["-d", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Administrator"))
            .stderr(predicate::str::contains("connected to directory"));
    }
}

// ===========================================
// user command tests
// ===========================================
mod user_tests {
    use super::*;
    use domtool::directory::AccountName;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_add_and_list() {
        let env = TestEnv::new();
        env.cmd()
            .user_add("alice")
            .assert()
            .success()
            .stdout("User 'alice' added successfully\n");

        let out = env.cmd().user_list().output_success();
        assert_eq!(out, "Administrator\nalice\n");
    }

    #[test]
    fn test_user_list_json() {
        let env = TestEnv::new();
        env.cmd()
            .user_add("bob")
            .args(["--uid-number", "4711100"])
            .assert()
            .success();

        let value: Value = env.cmd().user_list().format_json().output_json();
        assert_eq!(value["data"][1]["name"], "bob");
        assert_eq!(value["data"][1]["id_number"], 4711100);
    }

    #[test]
    fn test_user_add_duplicate_fails() {
        let env = TestEnv::new();
        env.cmd().user_add("carol").assert().success();
        env.cmd()
            .user_add("CAROL")
            .assert()
            .failure()
            .stderr(predicate::str::contains("user already exists: CAROL"));
    }

    #[test]
    fn test_user_list_skips_machine_accounts() {
        let env = TestEnv::new();
        let out = env.cmd().user_list().output_success();
        assert_eq!(out, "Administrator\n");
        let machine: AccountName = "DC1$".parse().unwrap();
        assert!(env.db().find_user(&machine).unwrap().is_some());
    }
}

// ===========================================
// domain command tests
// ===========================================
mod domain_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_provision_output() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("sam.db");
        let out = DomtoolCommand::new()
            .args(["domain", "provision", "--realm", "lab.example.org"])
            .args(["--domain", "lab", "--host-name", "LABDC"])
            .args(["-H", url.to_str().unwrap()])
            .output_success();
        assert_eq!(
            out,
            "Provisioned domain LAB.EXAMPLE.ORG\nNetBIOS domain:    LAB\nDomain controller: LABDC\n"
        );
    }

    #[test]
    fn test_join_needs_account() {
        let env = TestEnv::new();
        env.cmd()
            .domain_join("SAMDOM", "DC1", "M3")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("domain join needs an account to act as"));
    }

    #[test]
    fn test_join_then_remove_dead_server() {
        let env = TestEnv::new();
        let admin = env.domain().admin_user_arg();
        env.cmd()
            .domain_join("SAMDOM", "DC1", "M2")
            .args([admin.as_str()])
            .assert()
            .success()
            .stdout(predicate::str::contains("as member server M2"));

        env.cmd()
            .args(["domain", "demote", "--remove-other-dead-server=M2", "--server=DC1"])
            .args([admin.as_str()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed dead server M2"));
    }
}
