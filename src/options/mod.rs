//! Option groups shared by every command: loadparm, credentials, URL.

mod credentials;
mod loadparm;

pub use credentials::{Credentials, CredentialsError, CredentialsKind};
pub use loadparm::{DEFAULT_NETBIOS_NAME, DEFAULT_WORKGROUP, LoadParm, LoadParmError};

use clap::{ArgAction, Args};
use std::path::PathBuf;

/// Loadparm options (`-s`, `--option`, `--realm`).
#[derive(Args, Debug, Clone, Default)]
pub struct SambaOptions {
    /// Configuration file to use
    #[arg(short = 's', long = "configfile", value_name = "FILE", global = true)]
    pub configfile: Option<PathBuf>,

    /// Set a configuration parameter (can be specified multiple times)
    #[arg(long = "option", value_name = "KEY=VALUE", action = ArgAction::Append, global = true)]
    pub options: Vec<String>,

    /// Set the realm name
    #[arg(long, global = true)]
    pub realm: Option<String>,
}

impl SambaOptions {
    /// Loads the config file and applies command-line overrides.
    pub fn get_loadparm(&self) -> Result<LoadParm, LoadParmError> {
        let mut lp = LoadParm::load(self.configfile.as_deref())?;
        for option in &self.options {
            lp.set_option(option)?;
        }
        if let Some(realm) = &self.realm {
            lp.realm = Some(realm.clone());
        }
        Ok(lp)
    }
}

/// Credential options (`-U`, `--password`, `-W`, `-N`).
#[derive(Args, Debug, Clone, Default)]
pub struct CredentialsOptions {
    /// Username to authenticate as
    #[arg(
        short = 'U',
        long = "user",
        value_name = "[DOMAIN\\]USERNAME[%PASSWORD]",
        global = true
    )]
    pub user: Option<String>,

    /// Password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Workgroup (NetBIOS domain) of the user
    #[arg(short = 'W', long, global = true)]
    pub workgroup: Option<String>,

    /// Don't require a password
    #[arg(short = 'N', long = "no-pass", global = true)]
    pub no_pass: bool,
}

impl CredentialsOptions {
    /// Resolves credentials.
    ///
    /// Precedence order:
    /// 1. `-U` user (password from `%PASSWORD` or `--password`)
    /// 2. The machine account, when `fallback_machine` is set and a machine
    ///    password is configured
    /// 3. Anonymous
    pub fn get_credentials(
        &self,
        lp: &LoadParm,
        fallback_machine: bool,
    ) -> Result<Credentials, CredentialsError> {
        let Some(user) = &self.user else {
            if fallback_machine && let Some(machine) = Credentials::machine(lp) {
                return Ok(machine);
            }
            return Ok(Credentials::anonymous());
        };

        let mut creds = Credentials::parse_user_string(user)?;
        if let Some(password) = &self.password {
            creds = creds.with_password(password.clone());
        }

        let domain = self
            .workgroup
            .clone()
            .or_else(|| creds.domain().map(str::to_string))
            .unwrap_or_else(|| lp.workgroup());
        creds = creds.with_domain(domain);

        if creds.password().is_none() && !self.no_pass {
            return Err(CredentialsError::MissingPassword(
                creds.username().unwrap_or_default().to_string(),
            ));
        }

        Ok(creds)
    }
}

/// Connection options (`-H`).
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectOptions {
    /// LDB URL for database or target server
    #[arg(short = 'H', long = "URL", value_name = "URL", global = true)]
    pub url: Option<String>,
}

impl ConnectOptions {
    /// Returns the explicit URL, or the local database from loadparm.
    pub fn url_or_default(&self, lp: &LoadParm) -> String {
        self.url.clone().unwrap_or_else(|| lp.sam_url())
    }
}
