use rust_embed::RustEmbed;
use std::collections::HashMap;

use crate::config::RESET_CONFIRM_MESSAGE;
use crate::core::helpers::escape_html;
use crate::models::models::{AppState, Post, User};

#[derive(RustEmbed)]
#[folder = "static"]
pub struct Assets;

/// Banner shown above the composer.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Alert(String),
}

/// Renders the whole page from `state`. Nothing is kept between calls.
pub fn render_page(
    state: &AppState,
    viewer: &str,
    now: i64,
    notice: Option<&Notice>,
    draft_name: &str,
) -> anyhow::Result<String> {
    let template = Assets::get("index.html")
        .ok_or_else(|| anyhow::anyhow!("Page template not found"))?
        .data
        .to_vec();
    let template = String::from_utf8(template)?;

    let suggested: String = state.users.iter().map(render_user_row).collect();
    let feed: String = state.posts.iter().map(|p| render_post_card(p, viewer, now)).collect();
    let notice = notice.map(render_notice).unwrap_or_default();
    let reset_confirm = escape_html(&serde_json::to_string(RESET_CONFIRM_MESSAGE)?);

    let values = HashMap::from([
        ("RESET_CONFIRM", reset_confirm),
        ("FOLLOWING_COUNT", format!("Following {}", state.following_count())),
        ("SUGGESTED_LIST", suggested),
        ("NOTICE", notice),
        ("DRAFT_NAME", escape_html(draft_name)),
        ("FEED_LIST", feed),
    ]);

    Ok(fill_template(&template, &values))
}

/// Replaces `{{NAME}}` markers in one pass over `template`.
/// Inserted values are never scanned again; unknown markers are left as is.
pub fn fill_template(template: &str, values: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                let name = &after_open[..end];
                match values.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Alert(msg) => format!(
            r#"      <div class="alert" role="alert">{}</div>
"#,
            escape_html(msg)
        ),
    }
}

fn render_user_row(user: &User) -> String {
    let (class, label) = if user.following {
        ("secondary", "Following")
    } else {
        ("", "Follow")
    };

    format!(
        r#"          <li class="suggested-list-item">
            <span>{name}</span>
            <form method="post" action="/users/{id}/follow">
              <button type="submit" class="{class}">{label}</button>
            </form>
          </li>
"#,
        name = escape_html(&user.name),
        id = escape_html(&urlencoding::encode(&user.id)),
        class = class,
        label = label,
    )
}

fn render_post_card(post: &Post, viewer: &str, now: i64) -> String {
    let liked = post.liked_by.iter().any(|v| v == viewer);
    let mut like_class = String::from("like-btn");
    if liked {
        like_class.push_str(" liked");
    }

    format!(
        r#"        <article class="post">
          <div class="post-header">
            <div class="avatar">{initials}</div>
            <div>
              <div><strong>{author}</strong></div>
              <div class="meta">{ago}</div>
            </div>
          </div>
          <div class="content">{content}</div>
          <div class="actions">
            <form method="post" action="/posts/{id}/like">
              <button type="submit" class="{like_class}">❤ {likes}</button>
            </form>
          </div>
        </article>
"#,
        initials = escape_html(&avatar_initials(&post.author)),
        author = escape_html(&post.author),
        ago = time_ago(post.ts, now),
        content = escape_html(&post.content),
        id = escape_html(&urlencoding::encode(&post.id)),
        like_class = like_class,
        likes = post.likes,
    )
}

/// First two characters of the author, uppercased. `U` for an empty author.
pub fn avatar_initials(author: &str) -> String {
    if author.is_empty() {
        return "U".to_string();
    }
    author.chars().take(2).collect::<String>().to_uppercase()
}

/// Largest whole unit among seconds, minutes, hours and days since `ts`.
/// Both arguments are milliseconds; future timestamps read as `0s`.
pub fn time_ago(ts: i64, now: i64) -> String {
    let diff = now.saturating_sub(ts).max(0) / 1000;
    match diff {
        d if d < 60 => format!("{}s", d),
        d if d < 3_600 => format!("{}m", d / 60),
        d if d < 86_400 => format!("{}h", d / 3_600),
        d => format!("{}d", d / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::seed_defaults;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn time_ago_picks_largest_unit() {
        assert_eq!(time_ago(NOW - 30_000, NOW), "30s");
        assert_eq!(time_ago(NOW - 3_661_000, NOW), "1h");
        assert_eq!(time_ago(NOW - 90_000_000, NOW), "1d");
        assert_eq!(time_ago(NOW - 59_999, NOW), "59s");
        assert_eq!(time_ago(NOW - 60_000, NOW), "1m");
        assert_eq!(time_ago(NOW - 3_599_000, NOW), "59m");
    }

    #[test]
    fn time_ago_clamps_future() {
        assert_eq!(time_ago(NOW + 10_000, NOW), "0s");
    }

    #[test]
    fn time_ago_survives_extreme_timestamps() {
        assert_eq!(time_ago(i64::MIN, NOW), format!("{}d", i64::MAX / 1000 / 86_400));
        assert_eq!(time_ago(i64::MAX, i64::MIN), "0s");
    }

    #[test]
    fn initials() {
        assert_eq!(avatar_initials("alex"), "AL");
        assert_eq!(avatar_initials("é"), "É");
        assert_eq!(avatar_initials(""), "U");
    }

    #[test]
    fn fill_template_is_single_pass() {
        let values = HashMap::from([
            ("A", "{{B}}".to_string()),
            ("B", "bee".to_string()),
        ]);
        assert_eq!(fill_template("[{{A}}|{{B}}|{{C}}|{{", &values), "[{{B}}|bee|{{C}}|{{");
    }

    #[test]
    fn page_lists_users_and_posts() {
        let mut state = AppState::default();
        seed_defaults(&mut state, NOW - 120_000);
        state.users[0].following = true;
        state.posts[0].liked_by.push("me".to_string());
        state.posts[0].likes = 1;

        let html = render_page(&state, "me", NOW, None, "").unwrap();

        assert!(html.contains("Following 1"));
        assert!(html.contains(">Following</button>"));
        assert_eq!(html.matches(">Follow</button>").count(), 2);
        assert_eq!(html.matches(r#"<article class="post">"#).count(), 3);
        assert_eq!(html.matches("like-btn liked").count(), 1);
        assert!(html.contains("❤ 1"));
        assert!(html.contains(">2m<"));
        assert!(html.contains("Hello! This is a sample post."));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn liked_class_follows_viewer() {
        let mut state = AppState::default();
        seed_defaults(&mut state, NOW);
        state.posts[0].liked_by.push("me".to_string());

        let html = render_page(&state, "someone-else", NOW, None, "").unwrap();
        assert!(!html.contains("like-btn liked"));
    }

    #[test]
    fn user_text_is_escaped_everywhere() {
        let mut state = AppState::default();
        state.users.push(User {
            id: "u\"1".to_string(),
            name: "<i>Eve</i>".to_string(),
            following: false,
        });
        state.posts.push(Post {
            id: "p_1_x".to_string(),
            author: "<script>".to_string(),
            content: "<img src=x onerror='alert(1)'> {{FEED_LIST}}".to_string(),
            likes: 0,
            liked_by: Vec::new(),
            ts: NOW,
        });

        let html = render_page(&state, "me", NOW, Some(&Notice::Alert("<b>".into())), "\"x").unwrap();

        assert!(!html.contains("<i>Eve"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;i&gt;Eve&lt;/i&gt;"));
        assert!(html.contains(r#"<div class="avatar">&lt;S</div>"#));
        assert!(html.contains("{{FEED_LIST}}"));
        assert!(html.contains(r#"value="&quot;x""#));
        assert!(html.contains("/users/u%221/follow"));
    }

    #[test]
    fn alert_notice_is_rendered() {
        let state = AppState::default();
        let notice = Notice::Alert("Please enter a message.".to_string());
        let html = render_page(&state, "me", NOW, Some(&notice), "").unwrap();
        assert!(html.contains(r#"role="alert">Please enter a message.</div>"#));
        assert!(html.contains("Following 0"));
    }
}
