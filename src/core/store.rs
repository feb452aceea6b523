//! Collaborator traits the scheduler depends on.

use std::future::Future;

use async_trait::async_trait;

use crate::core::StoreError;

/// Authoritative tag store plus the banner applier.
///
/// The store decides whether an identifier is still valid. `apply` fetches,
/// encodes and publishes the resource behind the identifier.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use banner_rotation::core::{StoreError, TagStore};
///
/// struct SqliteTags { /* ... */ }
///
/// #[async_trait]
/// impl TagStore for SqliteTags {
///     async fn exists(&self, tag: &str) -> Result<bool, StoreError> {
///         self.count(tag).await.map(|n| n > 0)
///     }
///
///     async fn apply(&self, tag: &str) -> Result<(), StoreError> {
///         let url = self.url_of(tag).await?;
///         self.guild.set_banner(&url).await
///     }
/// }
/// ```
#[async_trait]
pub trait TagStore: Send + Sync + 'static {
    /// Whether `tag` currently exists.
    async fn exists(&self, tag: &str) -> Result<bool, StoreError>;

    /// Display the resource behind `tag`.
    async fn apply(&self, tag: &str) -> Result<(), StoreError>;
}

/// Source of named, ordered tag lists.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Tags of `playlist` in insertion order; empty if the playlist is unknown.
    async fn playlist_tags(&self, playlist: &str) -> Result<Vec<String>, StoreError>;
}

/// Abstraction for spawning the event loop on a runtime.
pub trait Spawn {
    /// Spawn a detached future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
