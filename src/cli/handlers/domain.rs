//! Domain command handlers.

use anyhow::{Context as _, Result, bail};
use std::io::Write;
use tracing::info;

use super::{Context, Io, parse_account};
use crate::cli::{DemoteArgs, DomainCommand, JoinArgs, ProvisionArgs};
use crate::directory::{AccountName, DirectoryDb, DomainInfo, ServerRole};

pub fn handle(cmd: &DomainCommand, ctx: &Context, io: &mut Io<'_>) -> Result<()> {
    match cmd {
        DomainCommand::Provision(args) => handle_provision(args, ctx, io),
        DomainCommand::Join(args) => handle_join(args, ctx, io),
        DomainCommand::Demote(args) => handle_demote(args, ctx, io),
    }
}

fn handle_provision(args: &ProvisionArgs, ctx: &Context, io: &mut Io<'_>) -> Result<()> {
    let realm = ctx.lp.realm();
    if realm.is_empty() {
        bail!("a realm is required (use --realm or set realm in the configuration file)");
    }
    let netbios_domain = args
        .domain
        .clone()
        .or_else(|| ctx.lp.workgroup.clone())
        .unwrap_or_else(|| realm.split('.').next().unwrap_or_default().to_string());
    let host = parse_account(
        &args.host_name.clone().unwrap_or_else(|| ctx.lp.netbios_name()),
        "host",
    )?;

    let db = ctx.connect()?;
    let info = db
        .provision(&realm, &netbios_domain, &host)
        .with_context(|| format!("failed to provision {}", realm))?;

    writeln!(io.out, "Provisioned domain {}", info.realm)?;
    writeln!(io.out, "NetBIOS domain:    {}", info.netbios_domain)?;
    writeln!(io.out, "Domain controller: {}", host)?;
    Ok(())
}

fn handle_join(args: &JoinArgs, ctx: &Context, io: &mut Io<'_>) -> Result<()> {
    let creds = ctx.require_account("domain join")?;
    let (db, info) = ctx.open_domain()?;
    if !names_domain(&args.domain, &info) {
        bail!(
            "domain '{}' does not match {} ({})",
            args.domain,
            info.netbios_domain,
            info.realm
        );
    }
    require_domain_controller(&db, &args.server)?;

    let host = parse_account(
        &args.host_name.clone().unwrap_or_else(|| ctx.lp.netbios_name()),
        "host",
    )?;
    let server = db
        .add_server(&host, ServerRole::MemberServer)
        .with_context(|| format!("failed to join {} to {}", host, info.realm))?;

    info!(server = %server.name, realm = %info.realm, by = %creds.principal(), "joined domain");
    writeln!(
        io.out,
        "Joined domain {} ({}) as member server {}",
        info.netbios_domain, info.realm, server.name
    )?;
    Ok(())
}

fn handle_demote(args: &DemoteArgs, ctx: &Context, io: &mut Io<'_>) -> Result<()> {
    let creds = ctx.require_account("domain demote")?;
    let (db, info) = ctx.open_domain()?;
    let via = match &args.server {
        Some(server) => Some(require_domain_controller(&db, server)?),
        None => None,
    };

    let (target, dead) = match &args.remove_other_dead_server {
        Some(name) => (parse_account(name, "server")?, true),
        None => (parse_account(&ctx.lp.netbios_name(), "server")?, false),
    };
    if dead && via.as_ref() == Some(&target) {
        bail!(
            "cannot remove {} while using it to perform the removal",
            target
        );
    }

    let server = db
        .get_server(&target)
        .with_context(|| format!("{} is not a server of {}", target, info.realm))?;
    if server.role == ServerRole::DomainController {
        let controllers = db
            .list_servers()?
            .iter()
            .filter(|s| s.role == ServerRole::DomainController)
            .count();
        if controllers <= 1 {
            bail!("cannot remove {}: it is the last domain controller of {}", target, info.realm);
        }
    }

    db.remove_server(&target)
        .with_context(|| format!("failed to remove {} from {}", target, info.realm))?;
    info!(server = %target, realm = %info.realm, by = %creds.principal(), "removed server");

    if dead {
        writeln!(io.out, "Removed dead server {} from {}", target, info.realm)?;
    } else {
        writeln!(io.out, "Demote successful")?;
    }
    Ok(())
}

/// Looks up `name` and checks it is a domain controller.
fn require_domain_controller(db: &DirectoryDb, name: &str) -> Result<AccountName> {
    let name = parse_account(name, "server")?;
    let server = db
        .get_server(&name)
        .with_context(|| format!("cannot contact server {}", name))?;
    if server.role != ServerRole::DomainController {
        bail!("{} is not a domain controller", server.name);
    }
    Ok(server.name)
}

fn names_domain(domain: &str, info: &DomainInfo) -> bool {
    domain.eq_ignore_ascii_case(&info.netbios_domain) || domain.eq_ignore_ascii_case(&info.realm)
}
