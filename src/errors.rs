//! # Client Store Error Handling

use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    /// No client document matched the lookup key.
    #[error("client not found")]
    NotFound,

    /// The store did not answer before the per-call deadline.
    #[error("store operation timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error(transparent)]
    Store(#[from] mongodb::error::Error),

    #[error(transparent)]
    Tera(#[from] tera::Error),

    #[error("cannot parse `{1}`: {0}")]
    YAMLFile(#[source] serde_yaml::Error, String),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn string(s: &str) -> Self {
        Self::Message(s.to_string())
    }

    /// `true` when the error means "no such client" rather than a broken
    /// store.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_display_errors() {
        insta::assert_snapshot!(Error::NotFound.to_string(), @"client not found");
        insta::assert_snapshot!(
            Error::Timeout(Duration::from_secs(5)).to_string(),
            @"store operation timed out after 5000ms"
        );
        insta::assert_snapshot!(Error::string("boom").to_string(), @"boom");
    }

    #[test]
    fn not_found_is_distinct() {
        assert!(Error::NotFound.is_not_found());
        assert!(!Error::Timeout(Duration::from_millis(1)).is_not_found());
        assert!(!Error::string("not found").is_not_found());
    }
}
