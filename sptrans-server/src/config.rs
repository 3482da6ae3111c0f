//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::sptrans::SptransConfig;

/// Environment variable holding the Olho Vivo API token.
pub const CREDENTIAL_VAR: &str = "SPTRANS_PAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_REQUEST_DEADLINE_SECS: u64 = 45;

/// Errors while reading configuration. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub sptrans: SptransConfig,
    pub bind_addr: SocketAddr,
    /// Caller-level deadline for a whole query, authentication included.
    /// Always longer than the network timeout.
    pub request_deadline: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Recognised variables: `SPTRANS_PAT` (required), `SPTRANS_BASE_URL`,
    /// `SPTRANS_TIMEOUT_SECS`, `SPTRANS_REQUEST_DEADLINE_SECS`,
    /// `SPTRANS_BIND_ADDR`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let credential = lookup(CREDENTIAL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(CREDENTIAL_VAR))?;

        let mut sptrans = SptransConfig::new(credential);

        if let Some(url) = lookup("SPTRANS_BASE_URL") {
            sptrans = sptrans.with_base_url(url);
        }

        if let Some(secs) = parse_var(&lookup, "SPTRANS_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    name: "SPTRANS_TIMEOUT_SECS",
                    message: "network timeout must be at least 1s".to_string(),
                });
            }
            sptrans = sptrans.with_timeout(secs);
        }

        let deadline_secs = parse_var(&lookup, "SPTRANS_REQUEST_DEADLINE_SECS")?
            .unwrap_or(DEFAULT_REQUEST_DEADLINE_SECS);

        if deadline_secs <= sptrans.timeout_secs {
            return Err(ConfigError::Invalid {
                name: "SPTRANS_REQUEST_DEADLINE_SECS",
                message: format!(
                    "deadline ({deadline_secs}s) must exceed the network timeout ({}s)",
                    sptrans.timeout_secs
                ),
            });
        }

        let bind_addr = lookup("SPTRANS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "SPTRANS_BIND_ADDR",
                message: e.to_string(),
            })?;

        Ok(Self {
            sptrans,
            bind_addr,
            request_deadline: Duration::from_secs(deadline_secs),
        })
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    lookup(name)
        .map(|v| {
            v.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name,
                message: e.to_string(),
            })
        })
        .transpose()
}
