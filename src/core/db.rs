use crate::config::{SEED_POSTS, SEED_USERS};
use crate::core::kv::KvSlot;
use crate::models::models::{AppState, Post, User};
use crate::posts::new_post;

/// Loads and saves the whole [`AppState`] document under one key of a slot.
pub struct StateStore<S: KvSlot> {
    slot: S,
    key: String,
}

impl<S: KvSlot> StateStore<S> {
    pub fn new(slot: S, key: impl Into<String>) -> Self {
        Self { slot, key: key.into() }
    }

    /// Never fails: a missing, unreadable or corrupt document yields an empty state.
    pub fn load(&self) -> AppState {
        let raw = match self.slot.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return AppState::default(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read state");
                return AppState::default();
            }
        };

        match serde_json::from_slice::<AppState>(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not parse state");
                AppState::default()
            }
        }
    }

    /// Overwrites the stored document. Last writer wins.
    pub fn save(&self, state: &AppState) -> anyhow::Result<()> {
        let raw = serde_json::to_vec(state)?;
        self.slot.set(&self.key, &raw)?;
        tracing::debug!(
            key = %self.key,
            users = state.users.len(),
            posts = state.posts.len(),
            "state saved"
        );
        Ok(())
    }

    /// Loads the document, seeding and persisting the demo data on first run.
    pub fn load_or_seed(&self, now: i64) -> anyhow::Result<AppState> {
        let mut state = self.load();
        if seed_defaults(&mut state, now) {
            tracing::info!(key = %self.key, "seeded demo data");
            self.save(&state)?;
        }
        Ok(state)
    }

    /// Clears the stored document and replaces `state` with fresh seed data.
    pub fn reset(&self, state: &mut AppState, now: i64) -> anyhow::Result<()> {
        self.slot.delete(&self.key)?;
        *state = AppState::default();
        seed_defaults(state, now);
        self.save(state)?;
        tracing::info!(key = %self.key, "demo data reset");
        Ok(())
    }
}

/// Installs the sample users and posts when both lists are empty.
/// Returns whether anything was seeded.
pub fn seed_defaults(state: &mut AppState, now: i64) -> bool {
    if !state.is_empty() {
        return false;
    }

    state.users = SEED_USERS
        .iter()
        .map(|(id, name)| User {
            id: id.to_string(),
            name: name.to_string(),
            following: false,
        })
        .collect();
    state.posts = SEED_POSTS
        .iter()
        .map(|(author, content)| new_post(author, content, now))
        .collect::<Vec<Post>>();

    true
}
