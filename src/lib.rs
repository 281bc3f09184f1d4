#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
//! ## OAuth2 client store
//!
//! Persists OAuth2 client registrations (secret, domain, owning user) in a
//! MongoDB collection and exposes them through the client lookup capability
//! an authorization server needs.
//!
//! ```rust,no_run
//! use oauth2_client_store::{
//!     client::Client,
//!     store::{drivers::mongo::MongoClientStore, ClientStore, OAuthClientStorer},
//! };
//!
//! async fn register(db: mongodb::Client) -> oauth2_client_store::Result<Client> {
//!     let store = MongoClientStore::new(db, "oauth");
//!     store
//!         .set(&Client::new("s3cr3t", "https://example.com", "user-1"))
//!         .await?;
//!     store.get_by_id("user-1").await
//! }
//! ```
//!
//! ## Available Features
//!
//! | Feature            | Default | Description                               |
//! |--------------------|---------|-------------------------------------------|
//! | `store_inmem`      | true    | In-memory client store driver.            |
//! | `integration_test` | false   | Run tests against a live `MONGODB_URI`.   |
pub use self::errors::Error;

pub mod client;
pub mod config;
pub mod env_vars;
pub mod environment;
pub mod errors;
pub mod logger;
pub mod mongo;
pub mod store;
mod tera;
#[cfg(test)]
pub mod tests_cfg;

/// Result of every fallible store, config and logger call
pub type Result<T> = std::result::Result<T, Error>;
