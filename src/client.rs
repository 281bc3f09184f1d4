//! # OAuth2 Client Model
//!
//! The client registration as seen by an authorization server: an id, a
//! shared secret, the redirect domain and the owning user.
use serde::{Deserialize, Serialize};

/// Read access to a client registration.
///
/// Stores accept any implementation on write and hand back a [`Client`] on
/// read.
pub trait ClientInfo: Send + Sync {
    fn id(&self) -> &str;
    fn secret(&self) -> &str;
    fn domain(&self) -> &str;
    fn user_id(&self) -> &str;
}

/// Owned client registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub secret: String,
    pub domain: String,
    pub user_id: String,
}

impl Client {
    /// Creates a client without an id. Stores assign one on insert.
    #[must_use]
    pub fn new(secret: &str, domain: &str, user_id: &str) -> Self {
        Self {
            id: String::new(),
            secret: secret.to_string(),
            domain: domain.to_string(),
            user_id: user_id.to_string(),
        }
    }
}

impl ClientInfo for Client {
    fn id(&self) -> &str {
        &self.id
    }

    fn secret(&self) -> &str {
        &self.secret
    }

    fn domain(&self) -> &str {
        &self.domain
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}
