//! Credential providers for the Agents API
//!
//! The Agents API authenticates with a bearer token. Rather than reading
//! ambient credential state, the client takes a `TokenCredential` as a
//! constructor dependency and asks it for a fresh token before each
//! request, so callers stay in charge of acquisition and refresh.
//!
//! # Example: closure-based credential
//!
//! ```ignore
//! use grounding_agent_sdk::auth::{token_credential, AccessToken};
//!
//! let credential = token_credential(|| async {
//!     let token = refresh_from_entra().await?;
//!     Ok(AccessToken::new(token))
//! });
//! ```

use anyhow::{Context, Result};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A bearer token for the Agents API
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The raw token placed in the Authorization header
    pub token: String,
}

impl AccessToken {
    /// Wrap a raw bearer token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Type alias for the boxed future returned by credential providers
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<AccessToken>> + Send + 'a>>;

/// Trait for supplying bearer tokens to the Agents API client
///
/// Called before each request. Implementations should handle caching and
/// refresh internally; the client never stores a token across calls.
pub trait TokenCredential: Send + Sync {
    /// Get a token valid for the next request
    fn get_token(&self) -> TokenFuture<'_>;
}

/// Credential backed by a fixed token
///
/// Useful for tests and short-lived demos. The token is never refreshed,
/// so long sessions will eventually start failing with authentication
/// errors once it expires.
pub struct StaticTokenCredential {
    token: AccessToken,
}

impl StaticTokenCredential {
    /// Create a credential from a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token),
        }
    }
}

impl TokenCredential for StaticTokenCredential {
    fn get_token(&self) -> TokenFuture<'_> {
        let token = self.token.clone();
        Box::pin(async move { Ok(token) })
    }
}

/// Credential that reads a token from an environment variable per request
///
/// Re-reads the variable every time, so an external refresher can rotate
/// the token while the process runs.
pub struct EnvTokenCredential {
    var: String,
}

impl EnvTokenCredential {
    /// Create a credential reading from `var`
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenCredential for EnvTokenCredential {
    fn get_token(&self) -> TokenFuture<'_> {
        Box::pin(async move {
            let token = std::env::var(&self.var)
                .with_context(|| format!("{} environment variable not set", self.var))?;
            Ok(AccessToken::new(token))
        })
    }
}

/// Wrapper to implement TokenCredential for async closures
pub struct FnTokenCredential<F> {
    func: F,
}

impl<F, Fut> TokenCredential for FnTokenCredential<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<AccessToken>> + Send + 'static,
{
    fn get_token(&self) -> TokenFuture<'_> {
        Box::pin((self.func)())
    }
}

/// Create a credential provider from an async closure
pub fn token_credential<F, Fut>(func: F) -> FnTokenCredential<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<AccessToken>> + Send + 'static,
{
    FnTokenCredential { func }
}

/// Convenience: a shareable static credential
pub fn static_credential(token: impl Into<String>) -> Arc<dyn TokenCredential> {
    Arc::new(StaticTokenCredential::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_credential_returns_token() {
        let credential = StaticTokenCredential::new("tok-123");
        let token = credential.get_token().await.unwrap();
        assert_eq!(token.token, "tok-123");
    }

    #[tokio::test]
    async fn test_fn_credential_is_called_per_request() {
        use std::sync::atomic::{AtomicU32, Ordering};

        static CALLS: AtomicU32 = AtomicU32::new(0);
        let credential = token_credential(|| async {
            let n = CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(AccessToken::new(format!("tok-{}", n)))
        });

        assert_eq!(credential.get_token().await.unwrap().token, "tok-0");
        assert_eq!(credential.get_token().await.unwrap().token, "tok-1");
    }
}
