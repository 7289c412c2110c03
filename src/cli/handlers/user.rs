//! User command handlers.

use anyhow::{Context as _, Result};
use std::io::Write;

use super::{Context, Io, parse_account, write_json};
use crate::cli::output::{AccountListing, Output, OutputFormat};
use crate::cli::{UserAddArgs, UserCommand, UserListArgs};
use crate::directory::NewUser;

pub fn handle(cmd: &UserCommand, ctx: &Context, io: &mut Io<'_>) -> Result<()> {
    match cmd {
        UserCommand::Add(args) => handle_add(args, ctx, io),
        UserCommand::List(args) => handle_list(args, ctx, io),
    }
}

fn handle_add(args: &UserAddArgs, ctx: &Context, io: &mut Io<'_>) -> Result<()> {
    let (db, _) = ctx.open_domain()?;
    let name = parse_account(&args.username, "user")?;

    let mut user = NewUser::new(name.clone());
    if let Some(uid) = args.uid_number {
        user = user.uid_number(uid);
    }
    if let Some(gid) = args.gid_number {
        user = user.gid_number(gid);
    }

    db.add_user(user)
        .with_context(|| format!("failed to add user '{}'", name))?;
    writeln!(io.out, "User '{}' added successfully", name)?;
    Ok(())
}

/// Lists user accounts. Machine accounts are left out.
fn handle_list(args: &UserListArgs, ctx: &Context, io: &mut Io<'_>) -> Result<()> {
    let (db, _) = ctx.open_domain_read_only()?;
    let users: Vec<_> = db
        .list_users()?
        .into_iter()
        .filter(|u| !u.is_machine_account())
        .collect();

    match args.format {
        OutputFormat::Human => {
            for user in &users {
                writeln!(io.out, "{}", user.name)?;
            }
        }
        OutputFormat::Json => {
            let listings: Vec<_> = users
                .iter()
                .map(|u| AccountListing {
                    name: u.name.to_string(),
                    id_number: u.uid_number,
                })
                .collect();
            write_json(io, &Output::new(listings))?;
        }
    }
    Ok(())
}
