//! Credentials resolved from command-line options.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use super::LoadParm;

/// `[DOMAIN\]USER[@REALM][%PASSWORD]`
static USER_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<domain>[^\\/%@]+)[\\/])?(?P<user>[^\\/%@]+)(?:@(?P<realm>[^%]+))?(?:%(?P<password>.*))?$")
        .expect("user string regex is valid")
});

/// Errors resolving credentials.
#[derive(Debug, Error, PartialEq)]
pub enum CredentialsError {
    #[error("malformed user string '{0}': expected [DOMAIN\\]USERNAME[%PASSWORD]")]
    MalformedUser(String),

    #[error("no password supplied for {0}; use -U{0}%PASSWORD, --password or -N")]
    MissingPassword(String),
}

/// What kind of identity a set of credentials carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsKind {
    Anonymous,
    User,
    Machine,
}

/// Authentication material for a directory connection.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    kind: CredentialsKind,
    username: Option<String>,
    password: Option<String>,
    domain: Option<String>,
    realm: Option<String>,
}

impl Credentials {
    /// Credentials carrying no identity.
    pub fn anonymous() -> Self {
        Self {
            kind: CredentialsKind::Anonymous,
            username: None,
            password: None,
            domain: None,
            realm: None,
        }
    }

    /// Explicit user credentials.
    pub fn user(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            kind: CredentialsKind::User,
            username: Some(username.into()),
            password,
            domain: None,
            realm: None,
        }
    }

    /// The host's machine account (`NETBIOS$`), if a machine password is configured.
    pub fn machine(lp: &LoadParm) -> Option<Self> {
        let password = lp.machine_password.clone()?;
        Some(Self {
            kind: CredentialsKind::Machine,
            username: Some(format!("{}$", lp.netbios_name())),
            password: Some(password),
            domain: Some(lp.workgroup()),
            realm: Some(lp.realm()).filter(|r| !r.is_empty()),
        })
    }

    /// Parses a `-U` value such as `EXAMPLE\alice%secret`.
    pub fn parse_user_string(s: &str) -> Result<Self, CredentialsError> {
        let caps = USER_STRING
            .captures(s)
            .ok_or_else(|| CredentialsError::MalformedUser(s.to_string()))?;

        let name = |n: &str| caps.name(n).map(|m| m.as_str().to_string());
        Ok(Self {
            kind: CredentialsKind::User,
            username: name("user"),
            password: name("password"),
            domain: name("domain"),
            realm: name("realm"),
        })
    }

    /// Replaces the domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Replaces the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn kind(&self) -> CredentialsKind {
        self.kind
    }

    pub fn is_anonymous(&self) -> bool {
        self.kind == CredentialsKind::Anonymous
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    /// Returns `DOMAIN\user`, `user`, or `ANONYMOUS`.
    pub fn principal(&self) -> String {
        match (&self.domain, &self.username) {
            (Some(d), Some(u)) => format!("{}\\{}", d, u),
            (None, Some(u)) => u.clone(),
            _ => "ANONYMOUS".to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("kind", &self.kind)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("domain", &self.domain)
            .field("realm", &self.realm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_user() {
        let creds = Credentials::parse_user_string("alice").unwrap();
        assert_eq!(creds.username(), Some("alice"));
        assert_eq!(creds.password(), None);
        assert_eq!(creds.domain(), None);
        assert_eq!(creds.kind(), CredentialsKind::User);
    }

    #[test]
    fn parses_user_and_password() {
        let creds = Credentials::parse_user_string("Administrator%Passw0rd%x").unwrap();
        assert_eq!(creds.username(), Some("Administrator"));
        assert_eq!(creds.password(), Some("Passw0rd%x"));
    }

    #[test]
    fn parses_domain_prefix() {
        let creds = Credentials::parse_user_string("EXAMPLE\\bob%pw").unwrap();
        assert_eq!(creds.domain(), Some("EXAMPLE"));
        assert_eq!(creds.username(), Some("bob"));
        assert_eq!(creds.principal(), "EXAMPLE\\bob");

        let slash = Credentials::parse_user_string("EXAMPLE/bob").unwrap();
        assert_eq!(slash.domain(), Some("EXAMPLE"));
    }

    #[test]
    fn parses_realm_suffix() {
        let creds = Credentials::parse_user_string("bob@EXAMPLE.COM%pw").unwrap();
        assert_eq!(creds.username(), Some("bob"));
        assert_eq!(creds.realm(), Some("EXAMPLE.COM"));
        assert_eq!(creds.password(), Some("pw"));
    }

    #[test]
    fn empty_password_is_kept() {
        let creds = Credentials::parse_user_string("bob%").unwrap();
        assert_eq!(creds.password(), Some(""));
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "%pw", "\\bob", "a\\b\\c"] {
            assert!(
                Credentials::parse_user_string(bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn machine_credentials_need_a_password() {
        let mut lp = LoadParm::default();
        assert!(Credentials::machine(&lp).is_none());

        lp.machine_password = Some("machinepw".to_string());
        lp.netbios_name = Some("dc1".to_string());
        let creds = Credentials::machine(&lp).unwrap();
        assert_eq!(creds.username(), Some("DC1$"));
        assert_eq!(creds.kind(), CredentialsKind::Machine);
    }

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials::user("alice", Some("hunter2".to_string()));
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn anonymous_principal() {
        assert_eq!(Credentials::anonymous().principal(), "ANONYMOUS");
        assert!(Credentials::anonymous().is_anonymous());
    }
}
