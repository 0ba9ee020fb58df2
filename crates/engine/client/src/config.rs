//! Configuration for connecting an [`EngineClient`](crate::EngineClient).

use crate::TransportBuildError;
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr, time::Duration};
use url::Url;

/// Default engine endpoint.
pub const DEFAULT_ENGINE_RPC: &str = "http://localhost:8551";

/// Default per-call timeout, in seconds.
pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 30;

/// Where the execution node listens for engine calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EngineEndpoint {
    /// An `http://` or `https://` URL.
    Http(Url),
    /// A local socket path.
    Ipc(PathBuf),
}

impl EngineEndpoint {
    /// Parses an endpoint.
    ///
    /// `http://` and `https://` URLs resolve to [`EngineEndpoint::Http`]. An `ipc://` prefix or a
    /// bare path resolves to [`EngineEndpoint::Ipc`]. Any other URL scheme is rejected.
    pub fn parse(s: &str) -> Result<Self, TransportBuildError> {
        let s = s.trim();
        let invalid = || TransportBuildError::InvalidEndpoint(s.to_owned());

        if let Some(path) = s.strip_prefix("ipc://") {
            if path.is_empty() {
                return Err(invalid());
            }
            return Ok(Self::Ipc(PathBuf::from(path)));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Url::parse(s).map(Self::Http).map_err(|_| invalid());
        }
        if s.is_empty() || s.contains("://") {
            return Err(invalid());
        }
        Ok(Self::Ipc(PathBuf::from(s)))
    }
}

impl Default for EngineEndpoint {
    fn default() -> Self {
        Self::Http(Url::parse(DEFAULT_ENGINE_RPC).expect("default engine rpc is a valid url"))
    }
}

impl FromStr for EngineEndpoint {
    type Err = TransportBuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EngineEndpoint {
    type Error = TransportBuildError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<EngineEndpoint> for String {
    fn from(endpoint: EngineEndpoint) -> Self {
        endpoint.to_string()
    }
}

impl fmt::Display for EngineEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::Ipc(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Engine client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineClientConfig {
    /// The execution node endpoint.
    pub endpoint: EngineEndpoint,
    /// Default per-call timeout in seconds. Zero disables the default deadline.
    pub timeout_secs: u64,
}

impl Default for EngineClientConfig {
    fn default() -> Self {
        Self { endpoint: EngineEndpoint::default(), timeout_secs: DEFAULT_ENGINE_TIMEOUT_SECS }
    }
}

impl EngineClientConfig {
    /// Returns the default per-call timeout, if any.
    pub const fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
