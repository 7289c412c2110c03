//! In-process command invocation with captured output.

use std::fmt;
use std::io::Write;
use std::marker::PhantomData;

use tracing::debug;

use super::assertions::assert_cmd_success;
use super::random::XidRegistry;
use crate::cli::{CommandResolver, CommandTree, ExitIndicator};

/// Result of one command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CmdOutput {
    /// `None` on success.
    pub result: ExitIndicator,
    /// Text written to the command's output sink.
    pub out: String,
    /// Text written to the command's error sink.
    pub err: String,
}

impl CmdOutput {
    /// Splits into `(result, out, err)`.
    pub fn into_tuple(self) -> (ExitIndicator, String, String) {
        (self.result, self.out, self.err)
    }

    pub fn is_success(&self) -> bool {
        self.result.is_none()
    }

    /// Panics with the captured streams unless the command succeeded.
    #[track_caller]
    pub fn assert_success(&self) {
        assert_cmd_success(&self.result, &self.out, &self.err, "");
    }
}

/// A sink that captures one output stream of a command run.
///
/// A fresh sink is created for every stream of every invocation. The
/// default is `Vec<u8>`. Implement this to change how captured bytes
/// become text, or to give commands a sink with different behavior.
pub trait Capture: Write + Default {
    /// Consumes the sink and returns what was written.
    fn into_text(self) -> String;
}

impl Capture for Vec<u8> {
    fn into_text(self) -> String {
        String::from_utf8_lossy(&self).into_owned()
    }
}

/// Harness that runs commands in-process and records generated ids.
///
/// ```no_run
/// use domtool::testing::{CmdTest, assert_cmd_success};
///
/// let t = CmdTest::new();
/// let (result, out, err) = t.run_cmd("user", &["list", "-H", "/tmp/sam.db"]).into_tuple();
/// assert_cmd_success(&result, &out, &err, "listing users");
/// ```
pub struct CmdTest<R: CommandResolver = CommandTree, C: Capture = Vec<u8>> {
    resolver: R,
    xids: XidRegistry,
    capture: PhantomData<fn() -> C>,
}

impl<R: CommandResolver + fmt::Debug, C: Capture> fmt::Debug for CmdTest<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CmdTest")
            .field("resolver", &self.resolver)
            .field("xids", &self.xids)
            .finish()
    }
}

impl CmdTest<CommandTree> {
    /// Harness over the `domtool` command tree.
    pub fn new() -> Self {
        Self::with_resolver(CommandTree::new())
    }
}

impl Default for CmdTest<CommandTree> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandResolver> CmdTest<R> {
    /// Harness over any command resolver.
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            resolver,
            xids: XidRegistry::new(),
            capture: PhantomData,
        }
    }

    /// Switches the sinks output is captured into.
    pub fn with_capture<C: Capture>(self) -> CmdTest<R, C> {
        CmdTest {
            resolver: self.resolver,
            xids: self.xids,
            capture: PhantomData,
        }
    }
}

impl<R: CommandResolver, C: Capture> CmdTest<R, C> {
    /// Runs `name` with `args`, capturing both output streams.
    pub fn run_cmd(&self, name: &str, args: &[&str]) -> CmdOutput {
        self.invoke(std::iter::once(name).chain(args.iter().copied()))
    }

    /// Same as [`run_cmd`](Self::run_cmd).
    pub fn run_subcmd(&self, name: &str, args: &[&str]) -> CmdOutput {
        self.run_cmd(name, args)
    }

    /// Runs `name`, then `sublevels` in order, then `args`.
    ///
    /// `run_sublevel_cmd("domain", &["demote"], args)` is the same as
    /// `run_cmd("domain", ["demote", args..])`.
    pub fn run_sublevel_cmd(&self, name: &str, sublevels: &[&str], args: &[&str]) -> CmdOutput {
        self.invoke(
            std::iter::once(name)
                .chain(sublevels.iter().copied())
                .chain(args.iter().copied()),
        )
    }

    /// Returns a random id in the test range not yet returned by this harness.
    ///
    /// # Panics
    ///
    /// Panics with `No Xid are available` when no unused id is found.
    pub fn random_xid(&mut self) -> u32 {
        self.xids.next_xid()
    }

    /// Ids handed out so far.
    pub fn used_xids(&self) -> &XidRegistry {
        &self.xids
    }

    fn invoke<'a>(&self, argv: impl Iterator<Item = &'a str>) -> CmdOutput {
        let argv: Vec<String> = argv.map(str::to_string).collect();
        let mut out = C::default();
        let mut err = C::default();

        let result = {
            let (mut cmd, rest) = self.resolver.resolve(&argv, &mut out, &mut err);
            debug!(program = self.resolver.program(), path = ?cmd.path(), "running command");
            cmd.run(&rest)
        };

        CmdOutput {
            result,
            out: out.into_text(),
            err: err.into_text(),
        }
    }
}
