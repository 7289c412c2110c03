//! Resolution of an argument vector to a runnable command.
//!
//! Resolution walks the leading arguments down the command tree until the
//! first token that is not a subcommand name. The resolved command owns the
//! output sinks and reports its outcome as an [`ExitIndicator`].

use std::io::Write;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use thiserror::Error;
use tracing::debug;

use super::{Cli, PROG, handlers};
use crate::logging;

/// Outcome of running a command: `None` is success, anything else failed.
pub type ExitIndicator = Option<CommandError>;

/// Failure reported by a command run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The arguments did not parse.
    #[error("usage error: {0}")]
    Usage(String),

    /// The command ran and failed.
    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Failed(_) => 1,
        }
    }
}

/// A command that has been resolved and bound to its output sinks.
pub trait ResolvedCommand {
    /// Subcommand path the command was resolved to, e.g. `["user", "add"]`.
    fn path(&self) -> &[String];

    /// Runs the command with the arguments left over after resolution.
    fn run(&mut self, args: &[String]) -> ExitIndicator;
}

/// Maps an argument vector to a command and its remaining arguments.
pub trait CommandResolver {
    /// Program name reported in usage output.
    fn program(&self) -> &str;

    /// Resolves `argv`, binding the command's output to `outf` and `errf`.
    fn resolve<'io>(
        &self,
        argv: &[String],
        outf: &'io mut dyn Write,
        errf: &'io mut dyn Write,
    ) -> (Box<dyn ResolvedCommand + 'io>, Vec<String>);
}

/// Resolver for the `domtool` command tree.
#[derive(Debug, Clone, Default)]
pub struct CommandTree {
    install_logging: bool,
}

impl CommandTree {
    /// Resolver for in-process use. Leaves the global subscriber alone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver for the binary. Installs logging at the `-d` level on run.
    pub fn for_process() -> Self {
        Self {
            install_logging: true,
        }
    }
}

impl CommandResolver for CommandTree {
    fn program(&self) -> &str {
        PROG
    }

    fn resolve<'io>(
        &self,
        argv: &[String],
        outf: &'io mut dyn Write,
        errf: &'io mut dyn Write,
    ) -> (Box<dyn ResolvedCommand + 'io>, Vec<String>) {
        let root = Cli::command();
        let mut current = &root;
        let mut path = Vec::new();
        for arg in argv {
            match current.find_subcommand(arg) {
                Some(sub) => {
                    path.push(sub.get_name().to_string());
                    current = sub;
                }
                None => break,
            }
        }
        let rest = argv[path.len()..].to_vec();
        debug!(path = ?path, rest = ?rest, "resolved command");

        let cmd = CliCommand {
            path,
            outf,
            errf,
            install_logging: self.install_logging,
        };
        (Box::new(cmd), rest)
    }
}

/// A resolved `domtool` command.
pub struct CliCommand<'io> {
    path: Vec<String>,
    outf: &'io mut dyn Write,
    errf: &'io mut dyn Write,
    install_logging: bool,
}

impl ResolvedCommand for CliCommand<'_> {
    fn path(&self) -> &[String] {
        &self.path
    }

    fn run(&mut self, args: &[String]) -> ExitIndicator {
        let argv = std::iter::once(PROG)
            .chain(self.path.iter().map(String::as_str))
            .chain(args.iter().map(String::as_str));

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => return self.parse_failure(&err),
        };

        if self.install_logging {
            logging::init(cli.debuglevel);
        }

        let mut io = handlers::Io {
            out: &mut *self.outf,
            err: &mut *self.errf,
        };
        match handlers::dispatch(&cli, &mut io) {
            Ok(()) => None,
            Err(err) => {
                let message = format!("{err:#}");
                let _ = writeln!(self.errf, "ERROR: {message}");
                Some(CommandError::Failed(message))
            }
        }
    }
}

impl CliCommand<'_> {
    fn parse_failure(&mut self, err: &clap::Error) -> ExitIndicator {
        let rendered = err.render().to_string();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = write!(self.outf, "{rendered}");
                None
            }
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let _ = write!(self.errf, "{rendered}");
                Some(CommandError::Usage("missing subcommand".to_string()))
            }
            _ => {
                let _ = write!(self.errf, "{rendered}");
                let summary = rendered.lines().next().unwrap_or_default().trim();
                Some(CommandError::Usage(summary.to_string()))
            }
        }
    }
}
