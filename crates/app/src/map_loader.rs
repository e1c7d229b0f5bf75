//! Cached loading of the external map script.
//!
//! The map collaborator needs a script fetched over the network before it
//! can render. The first successful fetch is cached for the rest of the
//! session; failures are retried on a bounded backoff schedule and then
//! reported as a degraded resource rather than an error.

use async_trait::async_trait;

use gridwatch_core::{DomainError, DomainResult};

use crate::retry::RetryPolicy;

/// Network fetch of the map script. Implemented by the embedding shell.
#[async_trait]
pub trait MapScriptSource: Send + Sync {
    /// Fetch the script, returning an opaque handle/URL for the renderer.
    async fn fetch(&self) -> DomainResult<String>;
}

/// Caching front for a [`MapScriptSource`].
pub struct CachedMapLoader {
    source: Box<dyn MapScriptSource>,
    policy: RetryPolicy,
    cached: Option<String>,
}

impl CachedMapLoader {
    pub fn new(source: Box<dyn MapScriptSource>, policy: RetryPolicy) -> Self {
        Self {
            source,
            policy,
            cached: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.is_some()
    }

    /// The cached script handle, or a retried fetch.
    ///
    /// Exhausting the retry budget surfaces the storage-style error once;
    /// the caller flips the map resource to degraded and the next call may
    /// try again.
    pub async fn load(&mut self) -> DomainResult<&str> {
        if self.cached.is_none() {
            let script = self.policy.run(|| self.source.fetch()).await?;
            self.cached = Some(script);
        }
        self.cached
            .as_deref()
            .ok_or_else(|| DomainError::storage("map script cache empty after load"))
    }
}
