pub mod config;
pub mod core;
pub mod follow;
pub mod handlers;
pub mod models;
pub mod posts;
pub mod templates;

#[cfg(target_arch = "wasm32")]
mod component {
    use spin_sdk::{
        http::{IntoResponse, Request},
        http_component,
        key_value::Store,
    };

    use crate::config::Config;
    use crate::core::helpers::init_logging;
    use crate::handlers::Feed;

    // === Component entrypoint ===
    #[http_component]
    fn handle(req: Request) -> anyhow::Result<impl IntoResponse> {
        init_logging();
        let store = Store::open_default()?;
        let feed = Feed::new(store, Config::from_env());
        Ok(feed.handle(req))
    }
}
