//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test binaries
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;

/// Fluent wrapper around `assert_cmd::Command` for the `domtool` binary.
pub struct DomtoolCommand {
    args: Vec<String>,
}

impl DomtoolCommand {
    /// Creates a new command for the `domtool` binary.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("domtool").expect("Failed to find domtool binary");
        cmd.args(&self.args);
        cmd.env_remove("RUST_LOG");
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for `user add NAME`.
    pub fn user_add(self, name: &str) -> Self {
        self.args(["user", "add", name])
    }

    /// Configures for `user list`.
    pub fn user_list(self) -> Self {
        self.args(["user", "list"])
    }

    /// Configures for `domain join DOMAIN --server SERVER --host-name HOST`.
    pub fn domain_join(self, domain: &str, server: &str, host: &str) -> Self {
        self.args(["domain", "join", domain, "--server", server, "--host-name", host])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for DomtoolCommand {
    fn default() -> Self {
        Self::new()
    }
}
