use http::header::CONTENT_TYPE;
use mime_guess::from_path;
use spin_sdk::http::Response;

use crate::core::errors::ApiError;
use crate::templates::Assets;

// Templates live next to the assets but are only served rendered.
const TEMPLATES: &[&str] = &["index.html"];

pub fn serve_static(path: &str) -> anyhow::Result<Response> {
    let file_path = path.trim_start_matches('/');

    if TEMPLATES.contains(&file_path) {
        return Ok(ApiError::NotFound("No route found".to_string()).into());
    }

    let file = match Assets::get(file_path) {
        Some(file) => file,
        None => return Ok(ApiError::NotFound("No route found".to_string()).into()),
    };

    let mime = from_path(file_path).first_or_octet_stream();

    Ok(Response::builder()
        .status(200)
        .header(CONTENT_TYPE.as_str(), mime.as_ref())
        .body(file.data.to_vec())
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_stylesheet_with_css_mime() {
        let resp = serve_static("/style.css").unwrap();
        assert_eq!(*resp.status(), 200);
        assert_eq!(resp.header("content-type").and_then(|h| h.as_str()), Some("text/css"));
    }

    #[test]
    fn raw_template_and_unknown_files_are_not_found() {
        assert_eq!(*serve_static("/index.html").unwrap().status(), 404);
        assert_eq!(*serve_static("/nope.js").unwrap().status(), 404);
    }
}
