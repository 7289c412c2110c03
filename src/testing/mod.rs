//! Test harness for command trees.
//!
//! [`CmdTest`] resolves and runs commands in-process with captured output
//! sinks and hands back `(result, out, err)`. A `None` result means the
//! command succeeded. The module also carries the assertion helpers, random
//! name and id generators, a direct database factory ([`get_samdb`]) and
//! join cleanup used by integration tests.

mod assertions;
mod cleanup;
mod domain;
mod invoke;
mod random;
mod samdb;

pub use assertions::{
    MATCH_CUTOFF, assert_cmd_fail, assert_cmd_success, assert_match, assert_within,
    cmd_success_message, truncate_string,
};
pub use cleanup::JoinCredentials;
pub use domain::{TEST_ADMIN_PASSWORD, TEST_DC, TEST_DOMAIN, TEST_REALM, TestDomain};
pub use invoke::{Capture, CmdOutput, CmdTest};
pub use random::{DEFAULT_NAME_LEN, XID_ATTEMPTS, XID_RANGE, XidRegistry, random_name};
pub use samdb::get_samdb;
