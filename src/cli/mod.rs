//! CLI command definitions, resolver and handlers

pub mod handlers;
pub mod output;
pub mod resolve;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::options::{ConnectOptions, CredentialsOptions, SambaOptions};
use output::OutputFormat;

pub use resolve::{CliCommand, CommandError, CommandResolver, CommandTree, ExitIndicator, ResolvedCommand};

/// Program name used when resolving and rendering usage.
pub const PROG: &str = "domtool";

/// domtool - directory domain administration
#[derive(Parser, Debug)]
#[command(name = PROG, version, about, long_about = None)]
pub struct Cli {
    /// Debug level (0 = warnings only, 1 = info, 2 = debug, 3+ = trace)
    #[arg(short = 'd', long = "debuglevel", global = true, default_value_t = 0)]
    pub debuglevel: u8,

    #[command(flatten)]
    pub sambaopts: SambaOptions,

    #[command(flatten)]
    pub credopts: CredentialsOptions,

    #[command(flatten)]
    pub connect: ConnectOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Domain management
    #[command(subcommand)]
    Domain(DomainCommand),

    /// User management
    #[command(subcommand)]
    User(UserCommand),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ===========================================
// domain
// ===========================================

#[derive(Subcommand, Debug)]
pub enum DomainCommand {
    /// Provision a new domain in the local database (realm from --realm)
    Provision(ProvisionArgs),

    /// Join this host to a domain as a member server
    Join(JoinArgs),

    /// Demote a server, removing it from the domain
    Demote(DemoteArgs),
}

/// Arguments for `domain provision`
#[derive(Parser, Debug)]
pub struct ProvisionArgs {
    /// NetBIOS domain name (defaults to the first realm label)
    #[arg(long)]
    pub domain: Option<String>,

    /// NetBIOS name of the first domain controller (defaults to this host)
    #[arg(long)]
    pub host_name: Option<String>,
}

/// Arguments for `domain join`
#[derive(Parser, Debug)]
pub struct JoinArgs {
    /// Domain to join (NetBIOS name or realm)
    pub domain: String,

    /// Domain controller to join through
    #[arg(long)]
    pub server: String,

    /// NetBIOS name to join as (defaults to this host)
    #[arg(long)]
    pub host_name: Option<String>,
}

/// Arguments for `domain demote`
#[derive(Parser, Debug)]
pub struct DemoteArgs {
    /// Remove a dead server's objects instead of demoting this host
    #[arg(long, value_name = "NETBIOS_NAME")]
    pub remove_other_dead_server: Option<String>,

    /// Domain controller to perform the removal through
    #[arg(long)]
    pub server: Option<String>,
}

// ===========================================
// user
// ===========================================

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a new user
    #[command(visible_alias = "create")]
    Add(UserAddArgs),

    /// List all users
    List(UserListArgs),
}

/// Arguments for `user add`
#[derive(Parser, Debug)]
pub struct UserAddArgs {
    /// Account name
    pub username: String,

    /// POSIX uidNumber
    #[arg(long)]
    pub uid_number: Option<u32>,

    /// POSIX gidNumber
    #[arg(long)]
    pub gid_number: Option<u32>,
}

/// Arguments for `user list`
#[derive(Parser, Debug)]
pub struct UserListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
