//! Direct database handles for test setup and verification.

use clap::Parser;

use super::{Capture, CmdTest};
use crate::cli::CommandResolver;
use crate::directory::{DirectoryDb, system_session};
use crate::options::{ConnectOptions, CredentialsOptions, SambaOptions};

/// The options `get_samdb` understands: the CLI's own `-H`, loadparm and
/// credential groups.
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct SamDbArgs {
    #[command(flatten)]
    sambaopts: SambaOptions,

    #[command(flatten)]
    credopts: CredentialsOptions,

    #[command(flatten)]
    connect: ConnectOptions,
}

/// Opens the directory named by CLI-style `argv`, bypassing the command tree.
///
/// Credentials fall back to the machine account when no `-U` is given. The
/// handle uses the system session. Errors are returned as raised.
pub fn get_samdb(argv: &[&str]) -> anyhow::Result<DirectoryDb> {
    let args = SamDbArgs::try_parse_from(argv.iter().copied())?;
    let lp = args.sambaopts.get_loadparm()?;
    let creds = args.credopts.get_credentials(&lp, true)?;
    let url = args.connect.url_or_default(&lp);
    Ok(DirectoryDb::connect(&url, system_session(), creds, &lp)?)
}

impl<R: CommandResolver, C: Capture> CmdTest<R, C> {
    /// See [`get_samdb`].
    pub fn get_samdb(&self, argv: &[&str]) -> anyhow::Result<DirectoryDb> {
        get_samdb(argv)
    }
}
