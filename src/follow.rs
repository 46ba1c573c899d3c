use spin_sdk::http::Response;

use crate::core::db::StateStore;
use crate::core::helpers::{now_ms, redirect_home};
use crate::core::kv::KvSlot;
use crate::models::models::AppState;

/// Flips one user's flag. Returns the new value, or `None` for an unknown id.
pub fn toggle_follow(state: &mut AppState, user_id: &str) -> Option<bool> {
    let user = state.users.iter_mut().find(|u| u.id == user_id)?;
    user.following = !user.following;
    Some(user.following)
}

/// Unfollows everyone if anyone is followed, otherwise follows everyone.
/// Returns the flag now shared by all users.
pub fn toggle_follow_all(state: &mut AppState) -> bool {
    let any_following = state.users.iter().any(|u| u.following);
    for user in state.users.iter_mut() {
        user.following = !any_following;
    }
    !any_following
}

// === HTTP Handlers ===

pub fn handle_toggle_follow<S: KvSlot>(store: &StateStore<S>, user_id: &str) -> anyhow::Result<Response> {
    let mut state = store.load_or_seed(now_ms())?;

    match toggle_follow(&mut state, user_id) {
        Some(following) => {
            store.save(&state)?;
            tracing::info!(user_id, following, "follow toggled");
        }
        None => tracing::debug!(user_id, "follow on unknown user ignored"),
    }

    Ok(redirect_home())
}

pub fn handle_toggle_follow_all<S: KvSlot>(store: &StateStore<S>) -> anyhow::Result<Response> {
    let mut state = store.load_or_seed(now_ms())?;
    let following = toggle_follow_all(&mut state);
    store.save(&state)?;
    tracing::info!(following, users = state.users.len(), "follow toggled for all users");
    Ok(redirect_home())
}
