//! Email address types.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{MailError, Result};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$").unwrap()
});

/// Shortest accepted address, in characters.
pub const MIN_ADDRESS_LEN: usize = 6;

/// Longest accepted address, in characters.
pub const MAX_ADDRESS_LEN: usize = 64;

/// A validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and validate an address.
    ///
    /// Surrounding whitespace is trimmed. The address must be between
    /// [`MIN_ADDRESS_LEN`] and [`MAX_ADDRESS_LEN`] characters and look like
    /// `local@domain.tld`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(MailError::InvalidAddress(s.to_string()))
        }
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check an address against the length and syntax rules.
pub fn is_valid(address: &str) -> bool {
    let len = address.chars().count();
    (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&len) && EMAIL_REGEX.is_match(address)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Address {
    type Error = MailError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = MailError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Types that can be turned into a list of raw addresses.
///
/// A single address becomes a one-element list; a blank string becomes an
/// empty list. Validation happens later, in the builder.
pub trait IntoAddresses {
    /// Convert into raw address strings.
    fn into_addresses(self) -> Vec<String>;
}

fn single(s: &str) -> Vec<String> {
    if s.trim().is_empty() {
        Vec::new()
    } else {
        vec![s.to_string()]
    }
}

impl IntoAddresses for &str {
    fn into_addresses(self) -> Vec<String> {
        single(self)
    }
}

impl IntoAddresses for String {
    fn into_addresses(self) -> Vec<String> {
        single(&self)
    }
}

impl IntoAddresses for &String {
    fn into_addresses(self) -> Vec<String> {
        single(self)
    }
}

impl IntoAddresses for Address {
    fn into_addresses(self) -> Vec<String> {
        vec![self.0]
    }
}

impl<S: AsRef<str>> IntoAddresses for Vec<S> {
    fn into_addresses(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> IntoAddresses for &[S] {
    fn into_addresses(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> IntoAddresses for [S; N] {
    fn into_addresses(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<T: IntoAddresses> IntoAddresses for Option<T> {
    fn into_addresses(self) -> Vec<String> {
        self.map(IntoAddresses::into_addresses).unwrap_or_default()
    }
}

/// Validate every raw address, failing on the first bad one.
pub(crate) fn parse_all(raw: Vec<String>) -> Result<Vec<Address>> {
    raw.iter().map(|s| Address::parse(s)).collect()
}
