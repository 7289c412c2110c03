//! Teardown for tests that join a server to a domain.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use super::{Capture, CmdTest};
use super::assertions::assert_cmd_success;
use crate::cli::CommandResolver;

/// Who performs the removal of a joined server, and through which DC.
#[derive(Clone, PartialEq, Eq)]
pub struct JoinCredentials {
    pub username: String,
    pub password: String,
    /// Domain controller the removal is performed through.
    pub server: String,
    /// Directory URL passed as `-H`, when not the configured default.
    pub url: Option<String>,
    /// Configuration file passed as `-s`, when not the default.
    pub configfile: Option<PathBuf>,
}

impl std::fmt::Debug for JoinCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoinCredentials")
            .field("username", &self.username)
            .field("password", &"********")
            .field("server", &self.server)
            .field("url", &self.url)
            .field("configfile", &self.configfile)
            .finish()
    }
}

impl JoinCredentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            server: server.into(),
            url: None,
            configfile: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_configfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.configfile = Some(path.into());
        self
    }

    /// Reads `USERNAME`, `PASSWORD` and `SERVER`, plus the optional
    /// `DOMTOOL_URL` and `DOMTOOL_CONFIGFILE`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| env::var(name).with_context(|| format!("{} is not set", name));
        let mut creds = Self::new(var("USERNAME")?, var("PASSWORD")?, var("SERVER")?);
        creds.url = env::var("DOMTOOL_URL").ok();
        creds.configfile = env::var_os("DOMTOOL_CONFIGFILE").map(PathBuf::from);
        Ok(creds)
    }

    /// Arguments for `domain demote` removing `netbios_name`.
    pub fn demote_args(&self, netbios_name: &str) -> Vec<String> {
        let mut args = vec![
            format!("--remove-other-dead-server={}", netbios_name),
            format!("-U{}%{}", self.username, self.password),
            format!("--server={}", self.server),
        ];
        if let Some(url) = &self.url {
            args.push(format!("--URL={}", url));
        }
        if let Some(path) = &self.configfile {
            args.push(format!("--configfile={}", path.display()));
        }
        args
    }
}

impl<R: CommandResolver, C: Capture> CmdTest<R, C> {
    /// Removes a server joined during a test and asserts that it worked.
    #[track_caller]
    pub fn cleanup_join(&self, netbios_name: &str, creds: &JoinCredentials) {
        let args = creds.demote_args(netbios_name);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let (result, out, err) = self
            .run_sublevel_cmd("domain", &["demote"], &args)
            .into_tuple();
        assert_cmd_success(&result, &out, &err, "");
    }
}
