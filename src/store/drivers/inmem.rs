//! # In-Memory Client Store Driver
//!
//! Keeps client documents in process memory with the same lookup semantics
//! as the MongoDB driver. Nothing survives a restart.
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::ClientDocument;
use crate::{
    client::{Client, ClientInfo},
    config,
    store::{ClientStore, OAuthClientStorer},
    Error, Result,
};

/// Client store held in memory. Documents are kept in insertion order, so
/// `get_by_id` returns the earliest inserted match.
#[derive(Debug, Default)]
pub struct InMemClientStore {
    documents: RwLock<Vec<ClientDocument>>,
}

impl InMemClientStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(_config: &config::InMem) -> Self {
        Self::new()
    }

    /// Number of stored client records.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    async fn push(&self, document: ClientDocument) {
        self.documents.write().await.push(document);
    }
}

#[async_trait]
impl ClientStore for InMemClientStore {
    async fn get_by_id(&self, id: &str) -> Result<Client> {
        self.documents
            .read()
            .await
            .iter()
            .find(|doc| doc.user_id == id)
            .cloned()
            .map(ClientDocument::into_client)
            .ok_or(Error::NotFound)
    }
}

#[async_trait]
impl OAuthClientStorer for InMemClientStore {
    async fn set(&self, info: &dyn ClientInfo) -> Result<()> {
        let mut document = ClientDocument::from_info(info);
        document.id = Some(ObjectId::new());
        self.push(document).await;
        Ok(())
    }

    async fn remove_by_id(&self, id: &str) -> Result<()> {
        self.documents
            .write()
            .await
            .retain(|doc| doc.user_id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[tokio::test]
    async fn can_set_and_get() {
        let store = InMemClientStore::new();
        store
            .set(&Client::new("s1", "example.com", "u1"))
            .await
            .unwrap();

        let client = store.get_by_id("u1").await.unwrap();
        assert_eq!(client.secret, "s1");
        assert_eq!(client.domain, "example.com");
        assert_eq!(client.user_id, "u1");
        assert_eq!(client.id.len(), 24);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = InMemClientStore::new();
        assert!(matches!(store.get_by_id("nobody").await, Err(Error::NotFound)));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    #[tokio::test]
    async fn remove_deletes_every_match(#[case] copies: usize) {
        let store = InMemClientStore::new();
        for _ in 0..copies {
            store
                .set(&Client::new("s1", "example.com", "u1"))
                .await
                .unwrap();
        }
        store
            .set(&Client::new("s2", "other.com", "u2"))
            .await
            .unwrap();

        assert!(store.remove_by_id("u1").await.is_ok());
        assert!(matches!(store.get_by_id("u1").await, Err(Error::NotFound)));
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get_by_id("u2").await.unwrap().secret, "s2");
    }

    #[tokio::test]
    async fn duplicates_are_kept_apart() {
        let store = InMemClientStore::new();
        store
            .set(&Client::new("first", "example.com", "u1"))
            .await
            .unwrap();
        store
            .set(&Client::new("second", "example.com", "u1"))
            .await
            .unwrap();

        assert_eq!(store.len().await, 2);
        let docs = store.documents.read().await;
        let secrets: Vec<_> = docs.iter().map(|d| d.secret.as_str()).collect();
        assert_eq!(secrets, vec!["first", "second"]);
        drop(docs);

        assert_eq!(store.get_by_id("u1").await.unwrap().secret, "first");
    }

    fn document(oid: [u8; 12], secret: &str) -> ClientDocument {
        ClientDocument {
            id: Some(ObjectId::from_bytes(oid)),
            secret: secret.to_string(),
            domain: "example.com".to_string(),
            user_id: "u1".to_string(),
        }
    }

    #[tokio::test]
    async fn earliest_insert_wins_regardless_of_id_order() {
        let store = InMemClientStore::new();
        // same second, counter wrapped between the two inserts
        store
            .push(document([0, 0, 0, 1, 0, 0, 0, 0, 0, 0xff, 0xff, 0xff], "first"))
            .await;
        store
            .push(document([0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0], "second"))
            .await;

        let client = store.get_by_id("u1").await.unwrap();
        assert_eq!(client.secret, "first");
        assert_eq!(client.id, "000000010000000000ffffff");
    }
}
