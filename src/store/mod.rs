//! # Client Store Module
//!
//! This module defines the client store capabilities and a factory that
//! builds a store driver from configuration.
pub mod drivers;

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;

#[cfg(feature = "store_inmem")]
use self::drivers::inmem::InMemClientStore;
use self::drivers::mongo::MongoClientStore;
use crate::{
    client::{Client, ClientInfo},
    config::{self, Config},
    mongo, Error, Result,
};

/// Document field used as the lookup key for reads and deletes.
pub const USER_ID_KEY: &str = "user_id";

/// Collection client documents are stored in unless configured otherwise.
pub const DEFAULT_COLLECTION: &str = "oauth_client";

/// Deadline applied to every store call unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client lookup, the part of a store an authorization server consumes.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Fetches the client registered for the given user id.
    ///
    /// The argument is matched against the `user_id` field, not against the
    /// document primary key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no client matches, [`Error::Timeout`]
    /// when the store does not answer in time, and the driver error for
    /// anything else.
    async fn get_by_id(&self, id: &str) -> Result<Client>;
}

/// Full client store: lookup plus create and delete.
#[async_trait]
pub trait OAuthClientStorer: ClientStore {
    /// Inserts a new client record. The record id is assigned by the store;
    /// `info.id()` is ignored. Existing records with the same user id are
    /// left in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] or the driver error, unmodified.
    async fn set(&self, info: &dyn ClientInfo) -> Result<()>;

    /// Deletes every client registered for the given user id. Deleting
    /// nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] or the driver error, unmodified.
    async fn remove_by_id(&self, id: &str) -> Result<()>;
}

/// Runs a store call under a deadline.
///
/// On expiry the call future is dropped, releasing whatever it held, and
/// [`Error::Timeout`] is returned.
///
/// # Errors
///
/// Returns [`Error::Timeout`] on expiry, or the call's own error.
pub async fn with_timeout<T, E, F>(duration: Duration, call: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>> + Send,
    E: Into<Error>,
{
    tokio::time::timeout(duration, call)
        .await
        .map_err(|_| Error::Timeout(duration))?
        .map_err(Into::into)
}

/// Create a client store provider
///
/// # Errors
///
/// This function will return an error if the store fails to connect
pub async fn create_client_store(config: &Config) -> Result<Arc<dyn OAuthClientStorer>> {
    match &config.store {
        config::StoreConfig::Mongo(config) => {
            let client = mongo::connect(config).await?;
            Ok(Arc::new(MongoClientStore::from_config(client, config)))
        }
        #[cfg(feature = "store_inmem")]
        config::StoreConfig::InMem(config) => Ok(Arc::new(InMemClientStore::from_config(config))),

        #[allow(unreachable_patterns)]
        _ => Err(Error::string(
            "no client store driver was selected and compiled, but store configuration is \
             present",
        )),
    }
}
