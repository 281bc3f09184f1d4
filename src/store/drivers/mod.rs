//! # Client Store Drivers Module
//!
//! Store driver implementations and the persisted document shape they share.
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientInfo};

#[cfg(feature = "store_inmem")]
pub mod inmem;
pub mod mongo;

/// A client registration as persisted: `{ _id, secret, domain, user_id }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDocument {
    /// Assigned by the store. Never sent on insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub secret: String,
    pub domain: String,
    pub user_id: String,
}

impl ClientDocument {
    /// Builds the document to insert for `info`. The caller's id is dropped.
    #[must_use]
    pub fn from_info(info: &dyn ClientInfo) -> Self {
        Self {
            id: None,
            secret: info.secret().to_string(),
            domain: info.domain().to_string(),
            user_id: info.user_id().to_string(),
        }
    }

    /// Maps the document back to the domain model, exposing the hex form of
    /// `_id` as the client id.
    #[must_use]
    pub fn into_client(self) -> Client {
        Client {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            secret: self.secret,
            domain: self.domain,
            user_id: self.user_id,
        }
    }
}
