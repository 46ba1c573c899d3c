use spin_sdk::http::{Request, Response};

use crate::config::Config;
use crate::core::db::StateStore;
use crate::core::errors::ApiError;
use crate::core::form::{get_string, parse_form};
use crate::core::helpers::{html_response, json_response, now_ms, redirect_home};
use crate::core::kv::KvSlot;
use crate::core::static_server::serve_static;
use crate::follow::{handle_toggle_follow, handle_toggle_follow_all};
use crate::posts::{handle_create_post, handle_toggle_like};
use crate::templates::render_page;

/// The application: one state document in one slot, plus its settings.
pub struct Feed<S: KvSlot> {
    store: StateStore<S>,
    config: Config,
}

impl<S: KvSlot> Feed<S> {
    pub fn new(slot: S, config: Config) -> Self {
        let store = StateStore::new(slot, config.storage_key.clone());
        Self { store, config }
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    /// Routes `req`, turning internal failures into a JSON 500.
    pub fn handle(&self, req: Request) -> Response {
        match self.route(&req) {
            Ok(resp) => resp,
            Err(err) => ApiError::from(err).into(),
        }
    }

    pub fn route(&self, req: &Request) -> anyhow::Result<Response> {
        let method = req.method().to_string();
        let path = req.path();
        tracing::debug!(%method, path, "request");

        match (method.as_str(), path) {
            ("GET", "/") | ("GET", "/index.html") => self.show_page(),
            ("GET", "/api/state") => json_response(200, &self.store.load()),
            ("POST", "/posts") => handle_create_post(&self.store, &self.config, req),
            ("POST", "/follow/toggle-all") => handle_toggle_follow_all(&self.store),
            ("POST", "/reset") => self.reset(req),
            ("POST", p) if p.starts_with("/posts/") => match path_param(p, "/posts/", "/like") {
                Some(post_id) => handle_toggle_like(&self.store, &self.config, &post_id),
                None => Ok(ApiError::NotFound("No route found".to_string()).into()),
            },
            ("POST", p) if p.starts_with("/users/") => match path_param(p, "/users/", "/follow") {
                Some(user_id) => handle_toggle_follow(&self.store, &user_id),
                None => Ok(ApiError::NotFound("No route found".to_string()).into()),
            },
            ("GET", p) => serve_static(p),
            _ => Ok(ApiError::NotFound("No route found".to_string()).into()),
        }
    }

    fn show_page(&self) -> anyhow::Result<Response> {
        let now = now_ms();
        let state = self.store.load_or_seed(now)?;
        let html = render_page(&state, &self.config.viewer_id, now, None, "")?;
        Ok(html_response(200, html))
    }

    /// Only runs when the form carries `confirm=yes`, which the page sets
    /// after the browser confirmation dialog.
    fn reset(&self, req: &Request) -> anyhow::Result<Response> {
        let form = parse_form(req.body());
        if get_string(&form, "confirm") != "yes" {
            tracing::info!("reset not confirmed; nothing changed");
            return Ok(redirect_home());
        }

        let now = now_ms();
        let mut state = self.store.load_or_seed(now)?;
        self.store.reset(&mut state, now)?;
        Ok(redirect_home())
    }
}

/// Extracts and decodes the single segment between `prefix` and `suffix`.
fn path_param(path: &str, prefix: &str, suffix: &str) -> Option<String> {
    let raw = path.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if raw.is_empty() || raw.contains('/') {
        return None;
    }
    urlencoding::decode(raw).ok().map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_param_decodes_single_segment() {
        assert_eq!(path_param("/posts/p_1_abc/like", "/posts/", "/like"), Some("p_1_abc".to_string()));
        assert_eq!(path_param("/users/u%221/follow", "/users/", "/follow"), Some("u\"1".to_string()));
    }

    #[test]
    fn path_param_rejects_malformed_paths() {
        assert_eq!(path_param("/posts//like", "/posts/", "/like"), None);
        assert_eq!(path_param("/posts/a/b/like", "/posts/", "/like"), None);
        assert_eq!(path_param("/posts/a", "/posts/", "/like"), None);
    }
}
