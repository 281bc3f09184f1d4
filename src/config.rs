//! # Configuration Management
//!
//! This module defines the configuration structures and functions to manage and
//! load configuration settings for the client store.

/***
Notes:
* Configuration is "stage" dependent: development, test, production
* Values are rendered through tera before parsing, so
  `{{ get_env(name="MONGODB_URI", default="...") }}` can be used anywhere
***/

use std::path::{Path, PathBuf};

use fs_err as fs;
use lazy_static::lazy_static;
use mongodb::options::ClientOptions;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::json;
use tracing::info;

use crate::{env_vars, environment::Environment, logger, store, Error, Result};

lazy_static! {
    static ref DEFAULT_FOLDER: PathBuf = PathBuf::from("config");
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logger: Logger,
    pub store: StoreConfig,
}

/// Logger configuration
///
/// Example (development):
/// ```yaml
/// # config/development.yaml
/// logger:
///   enable: true
///   level: debug
///   format: compact
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Logger {
    /// Enable log write to stdout
    pub enable: bool,

    /// Set the logger level.
    ///
    /// * options: `trace` | `debug` | `info` | `warn` | `error`
    #[serde(default)]
    pub level: logger::LogLevel,

    /// Set the logger format.
    ///
    /// * options: `compact` | `pretty` | `json`
    #[serde(default)]
    pub format: logger::Format,

    /// Override our custom tracing filter.
    ///
    /// Set this to your own filter if you want to see traces from internal
    /// libraries. See more [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives)
    pub override_filter: Option<String>,
}

/// Client store driver selection.
///
/// Example (development):
/// ```yaml
/// # config/development.yaml
/// store:
///   kind: Mongo
///   uri: {{ get_env(name="MONGODB_URI", default="mongodb://localhost:27017") }}
///   db_name: oauth
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind")]
pub enum StoreConfig {
    /// MongoDB collection. Requires a reachable server.
    Mongo(MongoDb),
    /// Process memory. Useful for `test` and local development.
    InMem(InMem),
}

/// MongoDB store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MongoDb {
    /// Connection string, for example `mongodb://localhost:27017`
    pub uri: String,

    /// Database holding the client collection
    pub db_name: String,

    /// Collection name, `oauth_client` when omitted
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Deadline for each store call, in milliseconds. Must be non-zero.
    #[serde(default = "default_timeout", deserialize_with = "non_zero_timeout")]
    pub timeout: u64,

    /// Driver options that take precedence over the ones parsed from `uri`
    #[serde(skip_serializing)]
    pub client_options: Option<ClientOptions>,
}

/// In-memory store configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InMem {}

fn default_collection() -> String {
    store::DEFAULT_COLLECTION.to_string()
}

fn default_timeout() -> u64 {
    u64::try_from(store::DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX)
}

fn non_zero_timeout<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match u64::deserialize(deserializer)? {
        0 => Err(de::Error::custom("store timeout must be greater than 0ms")),
        timeout => Ok(timeout),
    }
}

impl Config {
    /// Creates a new configuration instance based on the specified environment.
    ///
    /// The folder is taken from `OAUTH_STORE_CONFIG_FOLDER`, falling back to
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns error when could not convert the give path to
    /// [`Config`] struct.
    pub fn new(env: &Environment) -> Result<Self> {
        let config = env_vars::get(env_vars::CONFIG_FOLDER).map_or_else(
            |_| Self::from_folder(env, DEFAULT_FOLDER.as_path()),
            |folder| Self::from_folder(env, Path::new(&folder)),
        )?;
        Ok(config)
    }

    /// Loads configuration settings from a folder for the specified
    /// environment.
    ///
    /// # Errors
    /// Returns error when could not convert the give path to
    /// [`Config`] struct.
    pub fn from_folder(env: &Environment, path: &Path) -> Result<Self> {
        // by order of precedence
        let files = [
            path.join(format!("{env}.local.yaml")),
            path.join(format!("{env}.yaml")),
        ];

        let selected_path = files
            .iter()
            .find(|p| p.exists())
            .ok_or_else(|| Error::Message("no configuration file found".to_string()))?;

        info!(selected_path =? selected_path, "loading environment from");

        let content = fs::read_to_string(selected_path)?;
        let rendered = crate::tera::render_string(&content, &json!({}))?;

        serde_yaml::from_str(&rendered)
            .map_err(|err| Error::YAMLFile(err, selected_path.to_string_lossy().to_string()))
    }
}
