//! Correlation ids attached to every dispatched request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;
use ulid::Ulid;

/// Groups the log events of one dispatch.
///
/// Minted when a [`Request`](crate::dispatcher::Request) is built and
/// replaced by an upstream `X-Request-Id` when that header holds a ULID,
/// so a front proxy and the controller log under the same id. Serialized as
/// its 26-character text form.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RequestId(Ulid);

impl RequestId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Parse an `X-Request-Id` header value. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse_header(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }

    #[must_use]
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }

    /// Timestamp encoded in the id; for adopted ids this is when the upstream minted it.
    #[must_use]
    pub fn minted_at(&self) -> SystemTime {
        self.0.datetime()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

impl From<RequestId> for String {
    fn from(id: RequestId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for RequestId {
    type Error = ulid::DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
