use http::header::{CONTENT_TYPE, LOCATION};
use rand::Rng;
use spin_sdk::http::Response;
use std::sync::Once;

use crate::config::DEFAULT_LOG_FILTER;

const ID_SUFFIX_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// `p_<millis>_<six base36 chars>`.
pub fn new_post_id(now: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("p_{}_{}", now, suffix)
}

/// Escapes `& < > " '` so the result is safe in text and quoted attributes.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
            )
            .try_init();
    });
}

pub fn html_response(status: u16, html: String) -> Response {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE.as_str(), "text/html; charset=utf-8")
        .body(html.into_bytes())
        .build()
}

pub fn json_response<T: serde::Serialize>(status: u16, value: &T) -> anyhow::Result<Response> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE.as_str(), "application/json")
        .body(serde_json::to_vec(value)?)
        .build())
}

/// 303 so the browser re-fetches the page with GET after a form post.
pub fn redirect_home() -> Response {
    Response::builder()
        .status(303)
        .header(LOCATION.as_str(), "/")
        .body(Vec::new())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_id_has_timestamp_and_base36_suffix() {
        let id = new_post_id(1700000000000);
        let suffix = id.strip_prefix("p_1700000000000_").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn escape_html_covers_five_characters() {
        let escaped = escape_html(r#"<b class="x">Tom & Jerry's</b>"#);
        assert!(escaped.starts_with("&lt;b class=&quot;x&quot;&gt;Tom &amp; Jerry"));
        assert!(escaped.ends_with("&lt;/b&gt;"));
        for c in ['<', '>', '"', '\''] {
            assert!(!escaped.contains(c), "{} left unescaped in {}", c, escaped);
        }
    }

    #[test]
    fn redirect_points_home() {
        let resp = redirect_home();
        assert_eq!(*resp.status(), 303);
        assert_eq!(resp.header("location").and_then(|h| h.as_str()), Some("/"));
    }
}
