//! domtool - directory domain administration, with an in-process test harness

pub mod cli;
pub mod directory;
pub mod logging;
pub mod options;
pub mod testing;

use std::io;

use cli::{CommandResolver, CommandTree, ExitIndicator};

/// Main entry point for the CLI application.
///
/// Errors have already been written to stderr when this returns.
pub fn run() -> ExitIndicator {
    let argv: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let tree = CommandTree::for_process();
    let (mut cmd, rest) = tree.resolve(&argv, &mut out, &mut err);
    cmd.run(&rest)
}
