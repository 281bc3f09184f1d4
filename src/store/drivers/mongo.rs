//! # MongoDB Client Store Driver
//!
//! Stores client registrations as documents in a single collection. The
//! `user_id` field, not `_id`, is the lookup key for reads and deletes, and
//! no uniqueness is enforced on it.
use std::time::Duration;

use async_trait::async_trait;
use mongodb::{
    bson::{Bson, Document},
    Client, Collection,
};
use tracing::debug;

use super::ClientDocument;
use crate::{
    client::{self, ClientInfo},
    config,
    store::{
        with_timeout, ClientStore, OAuthClientStorer, DEFAULT_COLLECTION, DEFAULT_TIMEOUT,
        USER_ID_KEY,
    },
    Error, Result,
};

/// Client store backed by a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoClientStore {
    client: Client,
    database: String,
    collection: String,
    timeout: Duration,
}

impl MongoClientStore {
    /// Creates a store over `database` using the default collection and
    /// timeout.
    #[must_use]
    pub fn new(client: Client, database: &str) -> Self {
        Self {
            client,
            database: database.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a store from the `store` section of the configuration. A zero
    /// timeout falls back to [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn from_config(client: Client, config: &config::MongoDb) -> Self {
        let timeout = match config.timeout {
            0 => DEFAULT_TIMEOUT,
            ms => Duration::from_millis(ms),
        };
        Self {
            client,
            database: config.db_name.clone(),
            collection: config.collection.clone(),
            timeout,
        }
    }

    #[must_use]
    pub fn with_collection(mut self, collection: &str) -> Self {
        self.collection = collection.to_string();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn collection(&self) -> Collection<ClientDocument> {
        self.client
            .database(&self.database)
            .collection(&self.collection)
    }
}

fn user_id_filter(id: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(USER_ID_KEY, Bson::String(id.to_string()));
    filter
}

#[async_trait]
impl ClientStore for MongoClientStore {
    async fn get_by_id(&self, id: &str) -> Result<client::Client> {
        debug!(user_id = id, collection = %self.collection, "fetching client");
        let coll = self.collection();
        let found = with_timeout(self.timeout, coll.find_one(user_id_filter(id), None)).await?;

        found
            .map(ClientDocument::into_client)
            .ok_or(Error::NotFound)
    }
}

#[async_trait]
impl OAuthClientStorer for MongoClientStore {
    async fn set(&self, info: &dyn ClientInfo) -> Result<()> {
        debug!(
            user_id = info.user_id(),
            collection = %self.collection,
            "inserting client"
        );
        let document = ClientDocument::from_info(info);
        let coll = self.collection();
        let inserted = with_timeout(self.timeout, coll.insert_one(&document, None)).await?;

        debug!(id = %inserted.inserted_id, "client inserted");
        Ok(())
    }

    async fn remove_by_id(&self, id: &str) -> Result<()> {
        debug!(user_id = id, collection = %self.collection, "removing clients");
        let coll = self.collection();
        let deleted =
            with_timeout(self.timeout, coll.delete_many(user_id_filter(id), None)).await?;

        debug!(user_id = id, count = deleted.deleted_count, "clients removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client as OAuthClient;

    // Nothing listens on port 1, so server selection outlives the store deadline.
    async fn unreachable_store() -> MongoClientStore {
        let client =
            Client::with_uri_str("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=30000")
                .await
                .unwrap();
        MongoClientStore::new(client, "oauth_test").with_timeout(Duration::from_millis(100))
    }

    #[test]
    fn filters_on_user_id() {
        let filter = user_id_filter("u1");
        assert_eq!(filter.len(), 1);
        assert_eq!(filter.get_str("user_id").unwrap(), "u1");
    }

    #[tokio::test]
    async fn uses_defaults() {
        let client = Client::with_uri_str("mongodb://127.0.0.1:1").await.unwrap();
        let store = MongoClientStore::new(client, "oauth");
        assert_eq!(store.database, "oauth");
        assert_eq!(store.collection, "oauth_client");
        assert_eq!(store.timeout, Duration::from_secs(5));

        let store = store
            .with_collection("clients")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(store.collection().name(), "clients");
        assert_eq!(store.timeout, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn zero_config_timeout_uses_default() {
        let client = Client::with_uri_str("mongodb://127.0.0.1:1").await.unwrap();
        let config = config::MongoDb {
            uri: "mongodb://127.0.0.1:1".to_string(),
            db_name: "oauth".to_string(),
            collection: "clients".to_string(),
            timeout: 0,
            client_options: None,
        };

        let store = MongoClientStore::from_config(client.clone(), &config);
        assert_eq!(store.timeout, DEFAULT_TIMEOUT);
        assert_eq!(store.collection().name(), "clients");

        let config = config::MongoDb {
            timeout: 750,
            ..config
        };
        let store = MongoClientStore::from_config(client, &config);
        assert_eq!(store.timeout, Duration::from_millis(750));
    }

    #[tokio::test]
    async fn set_times_out() {
        let store = unreachable_store().await;
        let res = store.set(&OAuthClient::new("s1", "example.com", "u1")).await;
        assert!(matches!(res, Err(Error::Timeout(_))));
    }

    #[tokio::test]
    async fn get_by_id_times_out() {
        let store = unreachable_store().await;
        let res = store.get_by_id("u1").await;
        assert!(matches!(res, Err(Error::Timeout(_))));
    }

    #[tokio::test]
    async fn remove_by_id_times_out() {
        let store = unreachable_store().await;
        let res = store.remove_by_id("u1").await;
        assert!(matches!(res, Err(Error::Timeout(_))));
    }
}
