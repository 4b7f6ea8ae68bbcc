//! Canonical identifiers correlating machines with backend microvm instances.
//!
//! A provider id is a URI-like string of the form `scheme://segment[/...]`.
//! The reconciler writes one into a machine's spec once the backend has
//! assigned an instance, and later uses it as a cache index key to find the
//! machine again. Because the string is the identity, equality and hashing
//! are defined on the canonical form and nothing else.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Scheme under which this provider issues identifiers.
pub const SCHEME: &str = "microvm";

/// Reasons a provider id string fails to parse.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ProviderIdError {
    /// The input was the empty string.
    #[error("provider id is empty")]
    Empty,

    /// The input could not be split into a scheme and at least one segment.
    #[error("provider id is malformed, expected scheme://segment[/segment]")]
    Malformed,
}

/// Parsed, canonical identity of a backend-managed microvm instance.
///
/// Two ids are equal iff their canonical string forms are byte-identical;
/// `PartialEq`, `Hash` and `Ord` all follow from that, so a `ProviderId` can
/// be used directly as a map or index key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderId(String);

impl ProviderId {
    /// Parse `raw` into a provider id.
    ///
    /// The canonical form of the result is exactly `raw`; no normalization
    /// is applied beyond validation.
    pub fn parse(raw: &str) -> Result<Self, ProviderIdError> {
        if raw.is_empty() {
            return Err(ProviderIdError::Empty);
        }

        let (scheme, rest) = raw.split_once("://").ok_or(ProviderIdError::Malformed)?;
        if scheme.is_empty() || rest.is_empty() {
            return Err(ProviderIdError::Malformed);
        }

        Ok(Self(raw.to_owned()))
    }

    /// The canonical string form used at construction.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key under which this id is indexed in controller caches.
    ///
    /// Identical to [`ProviderId::as_str`] by contract: anything indexed by
    /// one must be findable by the other.
    pub fn index_key(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProviderId {
    type Err = ProviderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Build the canonical id string for an instance issued under `scheme`.
///
/// The joined segments carry a leading `/` of their own, so the output reads
/// `scheme:///first/second`. Identifiers already in the field were issued
/// with that double separator; it must be reproduced exactly for them to
/// keep resolving.
pub fn generate(scheme: &str, segments: &[&str]) -> String {
    format!("{scheme}:///{}", segments.join("/"))
}
