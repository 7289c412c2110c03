//! Throwaway provisioned domains for integration tests.

use anyhow::{Context, Result};
use std::path::Path;
use tempfile::TempDir;

use super::cleanup::JoinCredentials;
use super::samdb::get_samdb;
use crate::directory::{ADMINISTRATOR, AccountName, DirectoryDb};

pub const TEST_REALM: &str = "SAMDOM.EXAMPLE.COM";
pub const TEST_DOMAIN: &str = "SAMDOM";
pub const TEST_DC: &str = "DC1";
pub const TEST_ADMIN_PASSWORD: &str = "Passw0rd.Admin";

/// A provisioned directory in a temporary directory, removed on drop.
///
/// The generated configuration file names the DC as the local host, so
/// commands run with [`connect_args`](Self::connect_args) act as if on DC1.
#[derive(Debug)]
pub struct TestDomain {
    _dir: TempDir,
    url: String,
    configfile: String,
}

impl TestDomain {
    /// Creates and provisions a fresh domain.
    pub fn provision() -> Result<Self> {
        let dir = TempDir::new().context("failed to create temporary directory")?;
        let configfile = dir.path().join("domtool.toml");
        let private_dir = dir.path().join("private");
        std::fs::write(
            &configfile,
            format!(
                "realm = \"{}\"\nworkgroup = \"{}\"\nnetbios_name = \"{}\"\nprivate_dir = {:?}\n",
                TEST_REALM,
                TEST_DOMAIN,
                TEST_DC,
                private_dir.to_string_lossy()
            ),
        )
        .with_context(|| format!("failed to write {}", configfile.display()))?;
        let url = private_dir.join("sam.db").to_string_lossy().into_owned();
        let configfile = configfile.to_string_lossy().into_owned();

        let domain = Self {
            _dir: dir,
            url,
            configfile,
        };
        let db = domain.db()?;
        db.provision(TEST_REALM, TEST_DOMAIN, &AccountName::new(TEST_DC)?)?;
        Ok(domain)
    }

    /// URL of the directory database.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn configfile(&self) -> &Path {
        Path::new(&self.configfile)
    }

    /// `-U` value for the administrator.
    pub fn admin_user_arg(&self) -> String {
        format!("-U{}%{}", ADMINISTRATOR, TEST_ADMIN_PASSWORD)
    }

    /// `-H` and `-s` arguments pointing commands at this domain.
    pub fn connect_args(&self) -> [&str; 4] {
        ["-H", self.url.as_str(), "-s", self.configfile.as_str()]
    }

    /// Opens a system-session handle on the directory.
    pub fn db(&self) -> Result<DirectoryDb> {
        get_samdb(&self.connect_args())
    }

    /// Credentials for removing servers joined to this domain.
    pub fn join_credentials(&self) -> JoinCredentials {
        JoinCredentials::new(ADMINISTRATOR, TEST_ADMIN_PASSWORD, TEST_DC)
            .with_url(self.url.clone())
            .with_configfile(self.configfile.clone())
    }
}
