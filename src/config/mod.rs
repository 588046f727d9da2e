//
//  billplz
//  config/mod.rs
//

//! # Client Configuration
//!
//! Configuration for the Billplz client consists of exactly two inputs: the
//! API key and the target [`Environment`]. Nothing is read from environment
//! variables, files, or flags.
//!
//! # Example
//!
//! ```rust
//! use billplz::config::{Config, Environment};
//!
//! let config = Config::new("my-api-key", Environment::Sandbox);
//! assert_eq!(
//!     config.environment.base_url(),
//!     "https://www.billplz-sandbox.com/api/v3/"
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while constructing client configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment name other than `sandbox` or `production` was supplied.
    ///
    /// Unrecognized environments are rejected at construction time rather
    /// than silently falling back to production.
    #[error("Unknown environment: {0} (expected \"sandbox\" or \"production\")")]
    UnknownEnvironment(String),
}

/// The Billplz environment a client targets.
///
/// Each variant maps to a fixed base URL; there is no way to point the
/// client at an arbitrary host.
///
/// # Example
///
/// ```rust
/// use billplz::config::Environment;
///
/// let env: Environment = "sandbox".parse().unwrap();
/// assert_eq!(env, Environment::Sandbox);
/// assert!("staging".parse::<Environment>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// The Billplz sandbox at `www.billplz-sandbox.com`.
    ///
    /// Use this for development and testing; sandbox accounts and API keys
    /// are separate from production ones.
    Sandbox,

    /// The live Billplz gateway at `www.billplz.com`.
    Production,
}

impl Environment {
    /// Returns the API v3 base URL for this environment.
    ///
    /// The returned URL always ends with a trailing slash; request paths are
    /// appended to it verbatim, so they must not start with a slash.
    #[must_use]
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://www.billplz-sandbox.com/api/v3/",
            Environment::Production => "https://www.billplz.com/api/v3/",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Per-client configuration, immutable once the client is constructed.
#[derive(Debug, Clone)]
pub struct Config {
    /// The Billplz API key (secret). Sent base64-encoded as HTTP Basic
    /// credentials on every request.
    pub api_key: String,

    /// The environment to target.
    pub environment: Environment,
}

impl Config {
    /// Creates a configuration from an API key and environment.
    pub fn new(api_key: impl Into<String>, environment: Environment) -> Self {
        Self {
            api_key: api_key.into(),
            environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_urls() {
        assert_eq!(
            Environment::Sandbox.base_url(),
            "https://www.billplz-sandbox.com/api/v3/"
        );
        assert_eq!(
            Environment::Production.base_url(),
            "https://www.billplz.com/api/v3/"
        );
    }

    #[test]
    fn test_parse_known_environments() {
        assert_eq!("sandbox".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn test_parse_rejects_unknown_environment() {
        let err = "staging".parse::<Environment>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment(ref name) if name == "staging"));
        // Exact-match only: case variants are rejected too.
        assert!("Production".parse::<Environment>().is_err());
        assert!("".parse::<Environment>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for env in [Environment::Sandbox, Environment::Production] {
            assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }
    }
}
