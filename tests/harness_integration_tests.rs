//! Integration tests written against the in-process harness.
//!
//! These tests drive `domtool` commands through `CmdTest`, the way a
//! directory test suite would: run a command, assert on the captured
//! output, then verify through a direct database handle.

mod common;

use chrono::{TimeDelta, Utc};
use common::harness::TestEnv;
use domtool::cli::CommandError;
use domtool::directory::AccountName;
use domtool::testing::{
    CmdTest, XID_RANGE, assert_cmd_fail, assert_cmd_success, assert_match, assert_within,
    random_name,
};

fn account(name: &str) -> AccountName {
    AccountName::new(name).unwrap()
}

// ===========================================
// users
// ===========================================

#[test]
fn test_user_create_with_random_name_and_xid() {
    let env = TestEnv::new();
    let mut t = CmdTest::new();

    let name = random_name(8);
    let uid = t.random_xid();
    let gid = t.random_xid();
    assert_ne!(uid, gid);
    let uid_arg = uid.to_string();
    let gid_arg = gid.to_string();

    let before = Utc::now();
    let (result, out, err) = env
        .run(
            &t,
            "user",
            &[
                "add",
                name.as_str(),
                "--uid-number",
                uid_arg.as_str(),
                "--gid-number",
                gid_arg.as_str(),
            ],
        )
        .into_tuple();
    assert_cmd_success(&result, &out, &err, "Ensure user is created");
    assert_eq!(err, "", "Shouldn't be any error messages");
    assert_match(&out, &format!("User '{}' added successfully", name), None);

    let user = env.db().get_user(&account(&name)).unwrap();
    assert_eq!(user.uid_number, Some(uid));
    assert_eq!(user.gid_number, Some(gid));
    assert!(XID_RANGE.contains(&uid));
    assert_within(user.created, before, TimeDelta::seconds(5), "whenCreated is recent");
}

#[test]
fn test_user_add_duplicate_fails() {
    let env = TestEnv::new();
    let t = CmdTest::new();
    env.run(&t, "user", &["add", "grace"]).assert_success();

    let (result, out, err) = env.run(&t, "user", &["add", "grace"]).into_tuple();
    assert_cmd_fail(&result, "Adding an existing user should fail");
    assert_eq!(out, "");
    assert_match(&err, "user already exists: grace", None);
}

#[test]
fn test_user_list_through_subcmd() {
    let env = TestEnv::new();
    let t = CmdTest::new();
    env.run(&t, "user", &["create", "heidi"]).assert_success();

    let mut argv = vec!["list"];
    argv.extend(env.domain().connect_args());
    let (result, out, err) = t.run_subcmd("user", &argv).into_tuple();
    assert_cmd_success(&result, &out, &err, "");
    assert_eq!(out, "Administrator\nheidi\n");
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let t = CmdTest::new();
    let (result, out, err) = t.run_cmd("user", &[]).into_tuple();
    assert_eq!(
        result,
        Some(CommandError::Usage("missing subcommand".to_string()))
    );
    assert_eq!(out, "");
    assert_match(&err, "Usage: domtool user", None);
}

// ===========================================
// domain join
// ===========================================

#[test]
fn test_join_and_cleanup() {
    let env = TestEnv::new();
    let t = CmdTest::new();
    let netbios_name = random_name(8);

    let output = env.run_as_admin(
        &t,
        "domain",
        &["join", "SAMDOM", "--server", "DC1", "--host-name", netbios_name.as_str()],
    );
    output.assert_success();

    let machine = account(&format!("{}$", netbios_name));
    assert!(env.db().find_user(&machine).unwrap().is_some());

    t.cleanup_join(netbios_name.as_str(), &env.domain().join_credentials());

    let db = env.db();
    assert!(db.get_server(&account(&netbios_name)).is_err());
    assert!(db.find_user(&machine).unwrap().is_none());
}

#[test]
fn test_join_without_account_fails() {
    let env = TestEnv::new();
    let t = CmdTest::new();
    let (result, out, err) = env
        .run(&t, "domain", &["join", "SAMDOM", "--server", "DC1", "--host-name", "M9"])
        .into_tuple();
    assert_cmd_fail(&result, "join needs -U");
    assert_eq!(out, "");
    assert_match(&err, "domain join needs an account to act as", None);
    assert!(env.db().get_server(&account("M9")).is_err());
}

#[test]
fn test_demote_through_unknown_server_fails() {
    let env = TestEnv::new();
    let t = CmdTest::new();
    let admin = env.domain().admin_user_arg();
    let (result, out, err) = t
        .run_sublevel_cmd(
            "domain",
            &["demote"],
            &[
                "--remove-other-dead-server=M1",
                "--server=NOTADC",
                admin.as_str(),
                "-H",
                env.domain().url(),
                "-s",
                env.domain().configfile().to_str().unwrap(),
            ],
        )
        .into_tuple();
    assert_cmd_fail(&result, "");
    assert_eq!(out, "");
    assert_match(&err, "cannot contact server NOTADC", None);
}

// ===========================================
// get_samdb
// ===========================================

#[test]
fn test_get_samdb_sees_cli_changes() {
    let env = TestEnv::new();
    let mut t = CmdTest::new();
    let uid = t.random_xid().to_string();
    env.run(&t, "user", &["add", "ivan", "--uid-number", uid.as_str()])
        .assert_success();

    let db = t.get_samdb(&env.domain().connect_args()).unwrap();
    assert!(db.session().is_system());
    let user = db.get_user(&account("IVAN")).unwrap();
    assert_eq!(user.name.as_str(), "ivan");
    assert_eq!(user.uid_number.map(|n| n.to_string()), Some(uid));
}
