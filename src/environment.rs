//! Selects which configuration file set the store loads.
//!
//! The environment comes from `OAUTH_STORE_ENV` and defaults to
//! `development`. Names other than the three well-known ones are kept as
//! [`Environment::Any`] and map to `config/<name>.yaml`.
//!
//! ```rust,no_run
//! use oauth2_client_store::environment::Environment;
//!
//! let config = Environment::current().load().expect("store configuration");
//! ```
use std::{convert::Infallible, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use super::config::Config;
use crate::{env_vars, Result};

pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Raw environment name from `OAUTH_STORE_ENV`, or [`DEFAULT_ENVIRONMENT`].
#[must_use]
pub fn resolve_from_env() -> String {
    env_vars::get_or_default(env_vars::ENV, DEFAULT_ENVIRONMENT)
}

/// Runtime environment
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Environment {
    Production,
    Development,
    Test,
    Any(String),
}

impl Environment {
    /// The environment selected by `OAUTH_STORE_ENV`.
    #[must_use]
    pub fn current() -> Self {
        resolve_from_env().into()
    }

    /// Name used for the configuration file stem.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
            Self::Any(name) => name,
        }
    }

    /// Load configuration for this environment from the configuration folder
    ///
    /// # Errors
    ///
    /// Returns error if an error occurs during loading
    /// configuration file an parse into [`Config`] struct.
    pub fn load(&self) -> Result<Config> {
        Config::new(self)
    }

    /// Load configuration for this environment from the given config path
    ///
    /// # Errors
    ///
    /// Returns error if an error occurs during loading
    /// configuration file an parse into [`Config`] struct.
    pub fn load_from_folder<P: AsRef<Path>>(&self, path: P) -> Result<Config> {
        Config::from_folder(self, path.as_ref())
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        match name {
            "production" => Self::Production,
            "development" => Self::Development,
            "test" => Self::Test,
            other => Self::Any(other.to_string()),
        }
    }
}

impl From<String> for Environment {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Environment> for String {
    fn from(env: Environment) -> Self {
        env.name().to_string()
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(name))
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
