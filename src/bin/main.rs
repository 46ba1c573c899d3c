#[cfg(not(target_arch = "wasm32"))]
mod native {
    extern crate dateapp;

    use std::sync::Mutex;

    use actix_web::{web, App, HttpServer, HttpRequest, HttpResponse};
    use dateapp::config::Config;
    use dateapp::core::kv::FileSlot;
    use dateapp::handlers::Feed;

    mod adapter {
        use actix_web::HttpRequest;
        use spin_sdk::http::{Request, Response, Method};

        pub fn actix_to_spin_request(
            req: &HttpRequest,
            body: actix_web::web::Bytes,
        ) -> anyhow::Result<Request> {
            let method = match req.method().as_str() {
                "GET" => Method::Get,
                "POST" => Method::Post,
                "PUT" => Method::Put,
                "DELETE" => Method::Delete,
                "HEAD" => Method::Head,
                "OPTIONS" => Method::Options,
                "PATCH" => Method::Patch,
                other => anyhow::bail!("unsupported method {}", other),
            };

            let uri = req.uri().to_string();

            let mut req_builder = Request::builder();
            req_builder.method(method).uri(&uri);
            for (name, value) in req.headers() {
                if let Ok(val_str) = value.to_str() {
                    req_builder.header(name.as_str(), val_str);
                }
            }

            Ok(req_builder.body(body.to_vec()).build())
        }

        pub fn spin_to_actix_response(spin_resp: Response) -> actix_web::HttpResponse {
            let status = *spin_resp.status();

            let mut response = actix_web::HttpResponse::build(
                actix_web::http::StatusCode::from_u16(status)
                    .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR),
            );
            for (name, value) in spin_resp.headers() {
                if let Some(val_str) = value.as_str() {
                    response.insert_header((name, val_str));
                }
            }

            response.body(spin_resp.body().to_vec())
        }
    }

    type SharedFeed = web::Data<Mutex<Feed<FileSlot>>>;

    pub async fn run() -> anyhow::Result<()> {
        dateapp::core::helpers::init_logging();

        let config = Config::from_env();
        let bind_addr = config.bind_addr.clone();
        let slot = FileSlot::open(&config.data_dir)?;
        // One writer per slot: requests are handled one at a time.
        let feed: SharedFeed = web::Data::new(Mutex::new(Feed::new(slot, config)));

        tracing::info!("Server listening on http://{}", bind_addr);

        HttpServer::new(move || {
            App::new()
                .app_data(feed.clone())
                .default_service(web::route().to(handle_all))
        })
        .bind(&bind_addr)?
        .run()
        .await?;

        Ok(())
    }

    async fn handle_all(feed: SharedFeed, req: HttpRequest, body: web::Bytes) -> HttpResponse {
        let spin_req = match adapter::actix_to_spin_request(&req, body) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting request");
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({"error": "Invalid request"}))
            }
        };

        let spin_resp = match feed.lock() {
            Ok(feed) => feed.handle(spin_req),
            Err(_) => {
                tracing::error!("feed lock poisoned");
                return HttpResponse::InternalServerError()
                    .json(serde_json::json!({"error": "Internal server error"}))
            }
        };

        adapter::spin_to_actix_response(spin_resp)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
