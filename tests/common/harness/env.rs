//! Isolated test environment around a provisioned domain.

#![allow(dead_code)]

use super::DomtoolCommand;
use domtool::directory::DirectoryDb;
use domtool::testing::{CmdOutput, CmdTest, TestDomain};

/// A provisioned domain in a temporary directory, plus ways to drive it.
///
/// The domain is removed when the TestEnv is dropped.
pub struct TestEnv {
    domain: TestDomain,
}

impl TestEnv {
    /// Creates a freshly provisioned domain.
    pub fn new() -> Self {
        let domain = TestDomain::provision().expect("Failed to provision test domain");
        Self { domain }
    }

    pub fn domain(&self) -> &TestDomain {
        &self.domain
    }

    /// Opens a system-session handle on the directory.
    pub fn db(&self) -> DirectoryDb {
        self.domain.db().expect("Failed to open test directory")
    }

    /// Creates a DomtoolCommand aimed at this domain.
    pub fn cmd(&self) -> DomtoolCommand {
        DomtoolCommand::new().args(self.domain.connect_args())
    }

    /// Runs `name args..` in-process against this domain.
    pub fn run(&self, t: &CmdTest, name: &str, args: &[&str]) -> CmdOutput {
        let mut argv = args.to_vec();
        argv.extend(self.domain.connect_args());
        t.run_cmd(name, &argv)
    }

    /// Like [`run`](Self::run), authenticating as the administrator.
    pub fn run_as_admin(&self, t: &CmdTest, name: &str, args: &[&str]) -> CmdOutput {
        let admin = self.domain.admin_user_arg();
        let mut argv = args.to_vec();
        argv.push(&admin);
        self.run(t, name, &argv)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
