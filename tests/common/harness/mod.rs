//! Test harness for CLI integration tests.
//!
//! Provides provisioned test domains and a fluent `assert_cmd` wrapper for
//! the `domtool` binary.

mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::DomtoolCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
