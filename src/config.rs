use std::path::PathBuf;

pub const DEFAULT_STORAGE_KEY: &str = "dateapp-demo-v1";
pub const DEFAULT_VIEWER_ID: &str = "me";
pub const DEFAULT_AUTHOR: &str = "You";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "dateapp=info";

pub const EMPTY_CONTENT_MESSAGE: &str = "Please enter a message.";
pub const RESET_CONFIRM_MESSAGE: &str =
    "Reset demo data? This will clear posts and follows in your browser.";

/// `(id, name)` of the sample users installed on first run and after reset.
pub const SEED_USERS: [(&str, &str); 3] = [("u1", "Alex"), ("u2", "Jordan"), ("u3", "Sam")];

/// `(author, content)` of the sample posts, in feed order.
pub const SEED_POSTS: [(&str, &str); 3] = [
    ("Alex", "Hello! This is a sample post."),
    ("Jordan", "Welcome to the Date App demo."),
    ("Sam", "Try creating a post using the box above."),
];

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_key: String,
    pub viewer_id: String,
    pub default_author: String,
    pub data_dir: PathBuf,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            viewer_id: DEFAULT_VIEWER_ID.to_string(),
            default_author: DEFAULT_AUTHOR.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            storage_key: env_or("DATEAPP_STORAGE_KEY", DEFAULT_STORAGE_KEY),
            viewer_id: env_or("DATEAPP_VIEWER_ID", DEFAULT_VIEWER_ID),
            default_author: env_or("DATEAPP_DEFAULT_AUTHOR", DEFAULT_AUTHOR),
            data_dir: PathBuf::from(env_or("DATEAPP_DATA_DIR", DEFAULT_DATA_DIR)),
            bind_addr: env_or("DATEAPP_BIND", DEFAULT_BIND_ADDR),
        }
    }
}

// Blank values count as unset.
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
