//! Command handlers for the CLI.

mod domain;
mod user;


use anyhow::{Context as _, Result, bail};
use clap::CommandFactory;
use std::io::Write;
use tracing::debug;

use super::{Cli, Command, CompletionsArgs, PROG};
use crate::directory::{AccountName, DirectoryDb, DomainInfo, SessionInfo};
use crate::options::{Credentials, CredentialsOptions, LoadParm};

/// Output sinks a handler writes to.
pub struct Io<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

/// Runs the parsed command.
pub fn dispatch(cli: &Cli, io: &mut Io<'_>) -> Result<()> {
    match &cli.command {
        Command::Domain(cmd) => domain::handle(cmd, &Context::from_cli(cli)?, io),
        Command::User(cmd) => user::handle(cmd, &Context::from_cli(cli)?, io),
        Command::Completions(args) => handle_completions(args, io),
    }
}

fn handle_completions(args: &CompletionsArgs, io: &mut Io<'_>) -> Result<()> {
    clap_complete::generate(args.shell, &mut Cli::command(), PROG, &mut *io.out);
    Ok(())
}

// ===========================================
// Shared Utilities
// ===========================================

/// Loadparm, credentials and target URL shared by every directory command.
pub(crate) struct Context {
    pub(crate) lp: LoadParm,
    credopts: CredentialsOptions,
    url: String,
}

impl Context {
    pub(crate) fn from_cli(cli: &Cli) -> Result<Self> {
        let lp = cli
            .sambaopts
            .get_loadparm()
            .context("failed to load configuration")?;
        let url = cli.connect.url_or_default(&lp);
        Ok(Self {
            lp,
            credopts: cli.credopts.clone(),
            url,
        })
    }

    /// Opens the directory with the local system session.
    pub(crate) fn connect(&self) -> Result<DirectoryDb> {
        self.connect_as(SessionInfo::System)
    }

    /// Opens a provisioned domain for writing.
    pub(crate) fn open_domain(&self) -> Result<(DirectoryDb, DomainInfo)> {
        let db = self.connect()?;
        let info = db.domain_info()?;
        Ok((db, info))
    }

    /// Opens a provisioned domain read-only.
    pub(crate) fn open_domain_read_only(&self) -> Result<(DirectoryDb, DomainInfo)> {
        let db = self.connect_as(SessionInfo::Anonymous)?;
        let info = db.domain_info()?;
        Ok((db, info))
    }

    /// Returns the `-U` account a domain operation acts as.
    pub(crate) fn require_account(&self, operation: &str) -> Result<Credentials> {
        let creds = self.credopts.get_credentials(&self.lp, false)?;
        if creds.is_anonymous() {
            bail!("{} needs an account to act as; pass -U USERNAME%PASSWORD", operation);
        }
        Ok(creds)
    }

    fn connect_as(&self, session: SessionInfo) -> Result<DirectoryDb> {
        let creds = self.credopts.get_credentials(&self.lp, false)?;
        debug!(url = %self.url, principal = %creds.principal(), "opening directory");
        DirectoryDb::connect(&self.url, session, creds, &self.lp)
            .with_context(|| format!("failed to connect to {}", self.url))
    }
}

/// Parses a user or server name from the command line.
pub(crate) fn parse_account(name: &str, kind: &str) -> Result<AccountName> {
    AccountName::new(name).with_context(|| format!("invalid {} name '{}'", kind, name))
}

/// Writes pretty JSON followed by a newline.
pub(crate) fn write_json<T: serde::Serialize>(io: &mut Io<'_>, value: &T) -> Result<()> {
    writeln!(io.out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
