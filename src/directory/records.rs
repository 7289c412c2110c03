//! Directory object records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::{AccountName, ObjectGuid};

/// Domain-wide settings written at provision time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainInfo {
    /// DNS realm, uppercase (e.g. `EXAMPLE.COM`).
    pub realm: String,
    /// NetBIOS domain name, uppercase (e.g. `EXAMPLE`).
    pub netbios_domain: String,
    /// When the domain was provisioned.
    pub provisioned: DateTime<Utc>,
}

/// A user account as stored in the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub name: AccountName,
    #[serde(serialize_with = "serialize_guid")]
    pub guid: ObjectGuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid_number: Option<u32>,
    pub created: DateTime<Utc>,
}

impl UserRecord {
    /// Returns true for machine accounts (`NAME$`).
    pub fn is_machine_account(&self) -> bool {
        self.name.as_str().ends_with('$')
    }
}

/// Fields for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: AccountName,
    pub uid_number: Option<u32>,
    pub gid_number: Option<u32>,
}

impl NewUser {
    pub fn new(name: AccountName) -> Self {
        Self {
            name,
            uid_number: None,
            gid_number: None,
        }
    }

    /// Sets the POSIX uidNumber.
    pub fn uid_number(mut self, uid: u32) -> Self {
        self.uid_number = Some(uid);
        self
    }

    /// Sets the POSIX gidNumber.
    pub fn gid_number(mut self, gid: u32) -> Self {
        self.gid_number = Some(gid);
        self
    }
}

/// Role of a server object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerRole {
    DomainController,
    MemberServer,
}

impl ServerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DomainController => "domain_controller",
            Self::MemberServer => "member_server",
        }
    }
}

impl fmt::Display for ServerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domain_controller" => Ok(Self::DomainController),
            "member_server" => Ok(Self::MemberServer),
            other => Err(format!("unknown server role '{}'", other)),
        }
    }
}

/// A domain controller or joined member server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerRecord {
    pub name: AccountName,
    #[serde(serialize_with = "serialize_guid")]
    pub guid: ObjectGuid,
    pub dns_name: String,
    pub role: ServerRole,
    pub created: DateTime<Utc>,
}

fn serialize_guid<S>(guid: &ObjectGuid, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(guid)
}
