//! Validated account names for users and servers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Maximum length of a pre-Windows 2000 logon name.
pub const MAX_ACCOUNT_NAME_LEN: usize = 20;

/// Characters that may not appear in an account name.
const FORBIDDEN: &[char] = &[
    '"', '/', '\\', '[', ']', ':', '|', '<', '>', '+', '=', ';', '?', ',', '*', '@',
];

/// An account name (sAMAccountName).
///
/// Names keep the case they were created with but compare
/// case-insensitively, so `Alice` and `ALICE` name the same account.
///
/// # Validation Rules
/// - Non-empty after trimming surrounding whitespace
/// - At most 20 characters
/// - No control characters and none of `" / \ [ ] : | < > + = ; ? , * @`
/// - Not made up only of dots and spaces
///
/// # Examples
///
/// ```
/// use domtool::directory::AccountName;
///
/// let name = AccountName::new("Alice").unwrap();
/// assert_eq!(name, AccountName::new("ALICE").unwrap());
/// assert_eq!(name.as_str(), "Alice");
/// ```
#[derive(Clone, Eq)]
pub struct AccountName(String);

/// Error returned when parsing an invalid account name.
#[derive(Debug, Clone)]
pub struct ParseAccountNameError(String);

impl fmt::Display for ParseAccountNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseAccountNameError {}

impl AccountName {
    /// Creates a new AccountName, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ParseAccountNameError` if the name is empty, too long, or
    /// contains a forbidden character.
    pub fn new(s: &str) -> Result<Self, ParseAccountNameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseAccountNameError(
                "account name cannot be empty".to_string(),
            ));
        }

        let len = trimmed.chars().count();
        if len > MAX_ACCOUNT_NAME_LEN {
            return Err(ParseAccountNameError(format!(
                "invalid account name '{}': {} characters exceeds the limit of {}",
                trimmed, len, MAX_ACCOUNT_NAME_LEN
            )));
        }

        if let Some(c) = trimmed
            .chars()
            .find(|c| c.is_control() || FORBIDDEN.contains(c))
        {
            return Err(ParseAccountNameError(format!(
                "invalid account name '{}': character {:?} is not allowed",
                trimmed, c
            )));
        }

        if trimmed.chars().all(|c| c == '.' || c == ' ') {
            return Err(ParseAccountNameError(format!(
                "invalid account name '{}': names cannot consist only of dots and spaces",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name with its original case.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for AccountName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Hash for AccountName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountName(\"{}\")", self.0)
    }
}

impl FromStr for AccountName {
    type Err = ParseAccountNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for AccountName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AccountName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}
