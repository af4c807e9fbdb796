use async_trait::async_trait;

use crate::error::Result;

/// Supplies the bearer token attached to database requests.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// `Ok(None)` means the request goes out unauthenticated.
    async fn access_token(&self) -> Result<Option<String>>;
}

/// Never has a token; every request is anonymous.
pub struct EmptyCredentials;

#[async_trait]
impl CredentialsProvider for EmptyCredentials {
    async fn access_token(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_credentials_has_no_token() {
        assert_eq!(EmptyCredentials.access_token().await.unwrap(), None);
    }
}
