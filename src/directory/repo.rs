//! Directory object operations for DirectoryDb.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use super::{
    ADMINISTRATOR, AccountName, DirectoryDb, DirectoryError, DirectoryResult, DomainInfo, NewUser,
    ObjectGuid, ServerRecord, ServerRole, UserRecord,
};

impl DirectoryDb {
    // ===========================================
    // Domain
    // ===========================================

    /// Creates a new domain with the administrator account and the first
    /// domain controller.
    pub fn provision(
        &self,
        realm: &str,
        netbios_domain: &str,
        dc_name: &AccountName,
    ) -> DirectoryResult<DomainInfo> {
        if self.is_provisioned()? {
            return Err(DirectoryError::AlreadyProvisioned(self.url().to_string()));
        }

        let info = DomainInfo {
            realm: realm.to_uppercase(),
            netbios_domain: netbios_domain.to_uppercase(),
            provisioned: Utc::now(),
        };

        let tx = self.transaction()?;
        for (key, value) in [
            ("realm", info.realm.clone()),
            ("netbios_domain", info.netbios_domain.clone()),
            ("provisioned", info.provisioned.to_rfc3339()),
        ] {
            tx.execute(
                "INSERT INTO domain_info (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        insert_user(tx.conn(), &NewUser::new(AccountName::new(ADMINISTRATOR)?))?;
        insert_server(tx.conn(), dc_name, &info.realm, ServerRole::DomainController)?;
        tx.commit()?;

        info!(realm = %info.realm, domain = %info.netbios_domain, dc = %dc_name, "provisioned domain");
        Ok(info)
    }

    /// Returns true once a domain has been provisioned.
    pub fn is_provisioned(&self) -> DirectoryResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM domain_info WHERE key = 'realm'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Returns the domain settings.
    pub fn domain_info(&self) -> DirectoryResult<DomainInfo> {
        let get = |key: &str| -> DirectoryResult<Option<String>> {
            Ok(self
                .conn
                .query_row(
                    "SELECT value FROM domain_info WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?)
        };

        let (Some(realm), Some(netbios_domain), Some(provisioned)) =
            (get("realm")?, get("netbios_domain")?, get("provisioned")?)
        else {
            return Err(DirectoryError::NotProvisioned(self.url().to_string()));
        };

        Ok(DomainInfo {
            realm,
            netbios_domain,
            provisioned: parse_timestamp(&provisioned)?,
        })
    }

    // ===========================================
    // Users
    // ===========================================

    pub fn add_user(&self, user: NewUser) -> DirectoryResult<UserRecord> {
        if !self.is_provisioned()? {
            return Err(DirectoryError::NotProvisioned(self.url().to_string()));
        }

        insert_user(&self.conn, &user)?;
        debug!(user = %user.name, "added user");
        self.get_user(&user.name)
    }

    /// Looks up a user by name.
    pub fn get_user(&self, name: &AccountName) -> DirectoryResult<UserRecord> {
        self.find_user(name)?.ok_or_else(|| DirectoryError::NotFound {
            kind: "user",
            name: name.to_string(),
        })
    }

    /// Looks up a user by name, returning `None` if absent.
    pub fn find_user(&self, name: &AccountName) -> DirectoryResult<Option<UserRecord>> {
        let mut stmt = self.conn.prepare(&format!("{USER_COLUMNS} WHERE name = ?1"))?;
        let raw = stmt.query_row([name.as_str()], RawUser::from_row).optional()?;
        raw.map(RawUser::into_record).transpose()
    }

    /// Lists all accounts, machine accounts included, ordered by name.
    pub fn list_users(&self) -> DirectoryResult<Vec<UserRecord>> {
        let mut stmt = self.conn.prepare(&format!("{USER_COLUMNS} ORDER BY name"))?;
        let rows = stmt.query_map([], RawUser::from_row)?;
        rows.map(|r| r.map_err(DirectoryError::from).and_then(RawUser::into_record))
            .collect()
    }

    // ===========================================
    // Servers
    // ===========================================

    /// Adds a server object and its machine account (`NAME$`).
    pub fn add_server(&self, name: &AccountName, role: ServerRole) -> DirectoryResult<ServerRecord> {
        let info = self.domain_info()?;

        let tx = self.transaction()?;
        insert_server(tx.conn(), name, &info.realm, role)?;
        tx.commit()?;

        info!(server = %name, role = %role, "added server");
        self.get_server(name)
    }

    /// Looks up a server by NetBIOS name.
    pub fn get_server(&self, name: &AccountName) -> DirectoryResult<ServerRecord> {
        let raw = self
            .conn
            .query_row(
                &format!("{SERVER_COLUMNS} WHERE name = ?1"),
                [name.as_str()],
                RawServer::from_row,
            )
            .optional()?;
        raw.map(RawServer::into_record)
            .transpose()?
            .ok_or_else(|| DirectoryError::NotFound {
                kind: "server",
                name: name.to_string(),
            })
    }

    /// Lists all servers ordered by name.
    pub fn list_servers(&self) -> DirectoryResult<Vec<ServerRecord>> {
        let mut stmt = self.conn.prepare(&format!("{SERVER_COLUMNS} ORDER BY name"))?;
        let rows = stmt.query_map([], RawServer::from_row)?;
        rows.map(|r| r.map_err(DirectoryError::from).and_then(RawServer::into_record))
            .collect()
    }

    /// Removes a server object and its machine account.
    pub fn remove_server(&self, name: &AccountName) -> DirectoryResult<ServerRecord> {
        let server = self.get_server(name)?;
        let machine = machine_account(name)?;

        let tx = self.transaction()?;
        tx.execute("DELETE FROM servers WHERE name = ?1", [name.as_str()])?;
        tx.execute("DELETE FROM users WHERE name = ?1", [machine.as_str()])?;
        tx.commit()?;

        info!(server = %name, "removed server");
        Ok(server)
    }
}

// ===========================================
// Row helpers
// ===========================================

const USER_COLUMNS: &str = "SELECT name, guid, uid_number, gid_number, created FROM users";
const SERVER_COLUMNS: &str = "SELECT name, guid, dns_name, role, created FROM servers";

struct RawUser {
    name: String,
    guid: String,
    uid_number: Option<u32>,
    gid_number: Option<u32>,
    created: String,
}

impl RawUser {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            guid: row.get(1)?,
            uid_number: row.get(2)?,
            gid_number: row.get(3)?,
            created: row.get(4)?,
        })
    }

    fn into_record(self) -> DirectoryResult<UserRecord> {
        Ok(UserRecord {
            name: parse_name(&self.name)?,
            guid: parse_guid(&self.guid)?,
            uid_number: self.uid_number,
            gid_number: self.gid_number,
            created: parse_timestamp(&self.created)?,
        })
    }
}

struct RawServer {
    name: String,
    guid: String,
    dns_name: String,
    role: String,
    created: String,
}

impl RawServer {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            guid: row.get(1)?,
            dns_name: row.get(2)?,
            role: row.get(3)?,
            created: row.get(4)?,
        })
    }

    fn into_record(self) -> DirectoryResult<ServerRecord> {
        Ok(ServerRecord {
            name: parse_name(&self.name)?,
            guid: parse_guid(&self.guid)?,
            dns_name: self.dns_name,
            role: self.role.parse().map_err(DirectoryError::Corrupt)?,
            created: parse_timestamp(&self.created)?,
        })
    }
}

fn parse_name(s: &str) -> DirectoryResult<AccountName> {
    AccountName::new(s).map_err(|e| DirectoryError::Corrupt(format!("stored name: {}", e)))
}

fn parse_guid(s: &str) -> DirectoryResult<ObjectGuid> {
    s.parse()
        .map_err(|e| DirectoryError::Corrupt(format!("stored GUID: {}", e)))
}

fn parse_timestamp(s: &str) -> DirectoryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DirectoryError::Corrupt(format!("invalid timestamp '{}': {}", s, e)))
}

fn machine_account(server: &AccountName) -> DirectoryResult<AccountName> {
    Ok(AccountName::new(&format!("{}$", server.as_str()))?)
}

// ===========================================
// Insert helpers (run inside a caller's transaction)
// ===========================================

fn insert_user(conn: &Connection, user: &NewUser) -> DirectoryResult<()> {
    let exists: Option<i64> = conn
        .query_row("SELECT 1 FROM users WHERE name = ?1", [user.name.as_str()], |row| {
            row.get(0)
        })
        .optional()?;
    if exists.is_some() {
        return Err(DirectoryError::AlreadyExists {
            kind: "user",
            name: user.name.to_string(),
        });
    }
    if let Some(uid) = user.uid_number {
        let taken: Option<i64> = conn
            .query_row("SELECT 1 FROM users WHERE uid_number = ?1", [uid], |row| {
                row.get(0)
            })
            .optional()?;
        if taken.is_some() {
            return Err(DirectoryError::AlreadyExists {
                kind: "uidNumber",
                name: uid.to_string(),
            });
        }
    }

    conn.execute(
        "INSERT INTO users (name, guid, uid_number, gid_number, created)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user.name.as_str(),
            ObjectGuid::new().to_string(),
            user.uid_number,
            user.gid_number,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Inserts the server object together with its machine account.
fn insert_server(
    conn: &Connection,
    name: &AccountName,
    realm: &str,
    role: ServerRole,
) -> DirectoryResult<()> {
    let exists: Option<i64> = conn
        .query_row("SELECT 1 FROM servers WHERE name = ?1", [name.as_str()], |row| {
            row.get(0)
        })
        .optional()?;
    if exists.is_some() {
        return Err(DirectoryError::AlreadyExists {
            kind: "server",
            name: name.to_string(),
        });
    }

    let dns_name = format!("{}.{}", name.as_str(), realm).to_lowercase();
    conn.execute(
        "INSERT INTO servers (name, guid, dns_name, role, created) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            name.as_str(),
            ObjectGuid::new().to_string(),
            dns_name,
            role.as_str(),
            Utc::now().to_rfc3339(),
        ],
    )?;
    insert_user(conn, &NewUser::new(machine_account(name)?))
}
