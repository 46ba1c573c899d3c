use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub following: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Post {
    pub id: String,
    pub author: String,
    pub content: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub likes: u64,
    /// Viewer identifiers that liked this post. Kept independent of `likes`.
    #[serde(rename = "likedBy", default, deserialize_with = "null_as_empty")]
    pub liked_by: Vec<String>,
    /// Creation time, milliseconds since the Unix epoch.
    pub ts: i64,
}

// A stored counter may have been edited by hand: negatives, fractions and
// null all read as a count floored at zero.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(match value {
        Some(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| if f > 0.0 { f as u64 } else { 0 }))
            .unwrap_or(0),
        None => 0,
    })
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The persisted document: one per storage key.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AppState {
    #[serde(default)]
    pub users: Vec<User>,
    /// Newest first.
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl AppState {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.posts.is_empty()
    }

    pub fn following_count(&self) -> usize {
        self.users.iter().filter(|u| u.following).count()
    }
}
