use spin_sdk::http::{Request, Response};

use crate::config::{Config, EMPTY_CONTENT_MESSAGE};
use crate::core::db::StateStore;
use crate::core::form::{get_string, parse_form};
use crate::core::helpers::{html_response, new_post_id, now_ms, redirect_home};
use crate::core::kv::KvSlot;
use crate::models::models::{AppState, Post};
use crate::templates::{render_page, Notice};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PostError {
    #[error("{}", EMPTY_CONTENT_MESSAGE)]
    EmptyContent,
}

pub fn new_post(author: &str, content: &str, now: i64) -> Post {
    Post {
        id: new_post_id(now),
        author: author.to_string(),
        content: content.to_string(),
        likes: 0,
        liked_by: Vec::new(),
        ts: now,
    }
}

/// Validates the composer input and prepends the new post.
///
/// Both fields are trimmed. Blank content is rejected without touching
/// `state`; a blank name falls back to `default_author`.
pub fn create_post(
    state: &mut AppState,
    content: &str,
    name: &str,
    default_author: &str,
    now: i64,
) -> Result<Post, PostError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(PostError::EmptyContent);
    }

    let name = name.trim();
    let author = if name.is_empty() { default_author } else { name };

    let post = new_post(author, content, now);
    state.posts.insert(0, post.clone());
    Ok(post)
}

/// Adds or removes `viewer` from the post's likers. Unknown ids are ignored.
///
/// The counter moves with membership but is never reconciled against
/// `liked_by`, and never drops below zero.
pub fn toggle_like(state: &mut AppState, post_id: &str, viewer: &str) -> Option<bool> {
    let post = state.posts.iter_mut().find(|p| p.id == post_id)?;

    if post.liked_by.iter().any(|v| v == viewer) {
        post.liked_by.retain(|v| v != viewer);
        post.likes = post.likes.saturating_sub(1);
        Some(false)
    } else {
        post.liked_by.push(viewer.to_string());
        post.likes = post.likes.saturating_add(1);
        Some(true)
    }
}

// === HTTP Handlers ===

pub fn handle_create_post<S: KvSlot>(
    store: &StateStore<S>,
    config: &Config,
    req: &Request,
) -> anyhow::Result<Response> {
    let form = parse_form(req.body());
    let content = get_string(&form, "content");
    let name = get_string(&form, "name");

    let now = now_ms();
    let mut state = store.load_or_seed(now)?;

    match create_post(&mut state, &content, &name, &config.default_author, now) {
        Ok(post) => {
            store.save(&state)?;
            tracing::info!(post_id = %post.id, author = %post.author, "post created");
            Ok(redirect_home())
        }
        Err(err) => {
            tracing::debug!(error = %err, "post rejected");
            // Keep what was typed so the user can fix it.
            let notice = Notice::Alert(err.to_string());
            let html = render_page(&state, &config.viewer_id, now, Some(&notice), &name)?;
            Ok(html_response(400, html))
        }
    }
}

pub fn handle_toggle_like<S: KvSlot>(
    store: &StateStore<S>,
    config: &Config,
    post_id: &str,
) -> anyhow::Result<Response> {
    let mut state = store.load_or_seed(now_ms())?;

    match toggle_like(&mut state, post_id, &config.viewer_id) {
        Some(liked) => {
            store.save(&state)?;
            tracing::info!(post_id, viewer = %config.viewer_id, liked, "like toggled");
        }
        None => tracing::debug!(post_id, "like on unknown post ignored"),
    }

    Ok(redirect_home())
}
