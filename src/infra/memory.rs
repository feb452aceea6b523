//! In-memory tag and playlist store for development and testing.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{PlaylistStore, StoreError, TagStore};

/// A named banner image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique tag name.
    pub name: String,
    /// Identifier of the user who created the tag.
    pub author_id: String,
    /// Image URL.
    pub url: String,
}

/// Image subtype of a banner URL by extension: `jpg` or `png`, else `None`.
#[must_use]
pub fn image_type(url: &str) -> Option<&'static str> {
    let url = url.to_ascii_lowercase();
    if url.ends_with("jpg") || url.ends_with("jpeg") {
        Some("jpg")
    } else if url.ends_with("png") {
        Some("png")
    } else {
        None
    }
}

#[derive(Default)]
struct StoreState {
    tags: BTreeMap<String, Tag>,
    playlists: BTreeMap<String, Vec<String>>,
    applied: Vec<String>,
    fail_exists: HashSet<String>,
    fail_apply: HashSet<String>,
    exists_calls: usize,
}

/// Tags and playlists held in memory.
///
/// Deleting a tag cascades out of every playlist. `apply` records the tag
/// instead of publishing anything; see [`InMemoryTagStore::applied`].
#[derive(Default)]
pub struct InMemoryTagStore {
    state: Mutex<StoreState>,
}

impl InMemoryTagStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tag.
    pub fn insert_tag(
        &self,
        name: impl Into<String>,
        author_id: impl Into<String>,
        url: impl Into<String>,
    ) {
        let tag = Tag {
            name: name.into(),
            author_id: author_id.into(),
            url: url.into(),
        };
        self.state.lock().tags.insert(tag.name.clone(), tag);
    }

    /// Delete a tag and drop it from all playlists. Returns whether it existed.
    pub fn remove_tag(&self, name: &str) -> bool {
        let mut state = self.state.lock();
        let existed = state.tags.remove(name).is_some();
        if existed {
            for tags in state.playlists.values_mut() {
                tags.retain(|t| t != name);
            }
            state.playlists.retain(|_, tags| !tags.is_empty());
        }
        existed
    }

    /// Look up a tag by name.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<Tag> {
        self.state.lock().tags.get(name).cloned()
    }

    /// All tags ordered by name.
    #[must_use]
    pub fn all_tags(&self) -> Vec<Tag> {
        self.state.lock().tags.values().cloned().collect()
    }

    /// Delete every tag, emptying all playlists with them.
    pub fn clear_tags(&self) {
        let mut state = self.state.lock();
        state.tags.clear();
        state.playlists.clear();
    }

    /// Replace a playlist's contents.
    ///
    /// # Errors
    ///
    /// `StoreError::UnknownTag` if any tag does not exist; the playlist is
    /// left untouched.
    pub fn edit_playlist(&self, playlist: &str, tags: &[String]) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        check_known(&state, tags)?;
        state.playlists.remove(playlist);
        push_unique(&mut state, playlist, tags);
        Ok(())
    }

    /// Append tags to a playlist, creating it if needed. Tags already in the
    /// playlist keep their position.
    ///
    /// # Errors
    ///
    /// `StoreError::UnknownTag` if any tag does not exist; nothing is added.
    pub fn append_playlist(&self, playlist: &str, tags: &[String]) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        check_known(&state, tags)?;
        push_unique(&mut state, playlist, tags);
        Ok(())
    }

    /// Remove tags from a playlist. A playlist left empty ceases to exist.
    pub fn reduce_playlist(&self, playlist: &str, tags: &[String]) {
        let mut state = self.state.lock();
        if let Some(entries) = state.playlists.get_mut(playlist) {
            entries.retain(|t| !tags.contains(t));
            if entries.is_empty() {
                state.playlists.remove(playlist);
            }
        }
    }

    /// Delete a playlist.
    pub fn clear_playlist(&self, playlist: &str) {
        self.state.lock().playlists.remove(playlist);
    }

    /// Names of all playlists.
    #[must_use]
    pub fn all_playlists(&self) -> Vec<String> {
        self.state.lock().playlists.keys().cloned().collect()
    }

    /// Whether a playlist has any tags.
    #[must_use]
    pub fn playlist_exists(&self, playlist: &str) -> bool {
        self.state.lock().playlists.contains_key(playlist)
    }

    /// Tags applied so far, oldest first.
    #[must_use]
    pub fn applied(&self) -> Vec<String> {
        self.state.lock().applied.clone()
    }

    /// Number of `exists` lookups served.
    #[must_use]
    pub fn exists_calls(&self) -> usize {
        self.state.lock().exists_calls
    }

    /// Make `exists` fail for `tag` with a backend error.
    pub fn fail_exists_for(&self, tag: impl Into<String>) {
        self.state.lock().fail_exists.insert(tag.into());
    }

    /// Make `apply` fail for `tag` with a backend error.
    pub fn fail_apply_for(&self, tag: impl Into<String>) {
        self.state.lock().fail_apply.insert(tag.into());
    }

    /// Clear all injected failures.
    pub fn heal(&self) {
        let mut state = self.state.lock();
        state.fail_exists.clear();
        state.fail_apply.clear();
    }
}

fn check_known(state: &StoreState, tags: &[String]) -> Result<(), StoreError> {
    match tags.iter().find(|t| !state.tags.contains_key(*t)) {
        Some(missing) => Err(StoreError::UnknownTag(missing.clone())),
        None => Ok(()),
    }
}

fn push_unique(state: &mut StoreState, playlist: &str, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    let entries = state.playlists.entry(playlist.to_string()).or_default();
    for tag in tags {
        if !entries.contains(tag) {
            entries.push(tag.clone());
        }
    }
}

#[async_trait]
impl TagStore for InMemoryTagStore {
    async fn exists(&self, tag: &str) -> Result<bool, StoreError> {
        let mut state = self.state.lock();
        state.exists_calls += 1;
        if state.fail_exists.contains(tag) {
            return Err(StoreError::Backend(format!("lookup of {tag} failed")));
        }
        Ok(state.tags.contains_key(tag))
    }

    async fn apply(&self, tag: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        let Some(entry) = state.tags.get(tag) else {
            return Err(StoreError::UnknownTag(tag.to_string()));
        };
        let Some(kind) = image_type(&entry.url) else {
            return Err(StoreError::UnsupportedImage(tag.to_string()));
        };
        if state.fail_apply.contains(tag) {
            return Err(StoreError::Backend(format!("publishing {tag} failed")));
        }
        debug!(tag = %tag, image_type = kind, "banner set");
        state.applied.push(tag.to_string());
        Ok(())
    }
}

#[async_trait]
impl PlaylistStore for InMemoryTagStore {
    async fn playlist_tags(&self, playlist: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .state
            .lock()
            .playlists
            .get(playlist)
            .cloned()
            .unwrap_or_default())
    }
}
