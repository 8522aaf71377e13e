use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiKeyError {
    #[error("api key missing")]
    Missing,

    #[error("api key rejected")]
    Rejected,
}

/// Validates the shared key callers present with every request.
pub trait ApiKeyValidator: Send + Sync {
    fn validate(&self, presented: Option<&str>) -> Result<(), ApiKeyError>;
}

/// Single shared key loaded from configuration.
#[derive(Clone)]
pub struct StaticApiKey {
    key: Vec<u8>,
}

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into().into_bytes(),
        }
    }
}

impl core::fmt::Debug for StaticApiKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StaticApiKey").finish_non_exhaustive()
    }
}

impl ApiKeyValidator for StaticApiKey {
    fn validate(&self, presented: Option<&str>) -> Result<(), ApiKeyError> {
        let presented = presented
            .filter(|k| !k.is_empty())
            .ok_or(ApiKeyError::Missing)?;

        if constant_time_eq(presented.as_bytes(), &self.key) {
            Ok(())
        } else {
            tracing::debug!("api key mismatch");
            Err(ApiKeyError::Rejected)
        }
    }
}

/// Compare without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_key() {
        let v = StaticApiKey::new("shop-key");
        assert_eq!(v.validate(Some("shop-key")), Ok(()));
    }

    #[test]
    fn rejects_missing_or_empty_key() {
        let v = StaticApiKey::new("shop-key");
        assert_eq!(v.validate(None), Err(ApiKeyError::Missing));
        assert_eq!(v.validate(Some("")), Err(ApiKeyError::Missing));
    }

    #[test]
    fn padded_key_is_not_an_exact_match() {
        let v = StaticApiKey::new("shop-key");
        assert_eq!(v.validate(Some("  shop-key ")), Err(ApiKeyError::Rejected));
        assert_eq!(v.validate(Some("   ")), Err(ApiKeyError::Rejected));
    }

    #[test]
    fn rejects_wrong_key() {
        let v = StaticApiKey::new("shop-key");
        assert_eq!(v.validate(Some("shop-kez")), Err(ApiKeyError::Rejected));
        assert_eq!(v.validate(Some("shop")), Err(ApiKeyError::Rejected));
    }

    #[test]
    fn debug_does_not_leak_key() {
        let v = StaticApiKey::new("shop-key");
        assert!(!format!("{v:?}").contains("shop-key"));
    }
}
