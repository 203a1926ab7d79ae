//! HTTP route handlers for the demo server.

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use smudge::Captcha;

use crate::config::DemoConfig;

/// Create the demo application router
pub fn create_router(config: Arc<DemoConfig>) -> Router {
    Router::new()
        .route("/", get(index).fallback(empty_body))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}

/// Serve the captcha page on the index route
async fn index(State(config): State<Arc<DemoConfig>>) -> Response {
    render_page(&config)
}

/// Any GET path mentioning `index` serves the page too; everything else
/// gets an empty body.
async fn fallback(State(config): State<Arc<DemoConfig>>, req: Request) -> Response {
    if req.method() == Method::GET && req.uri().path().contains("index") {
        return render_page(&config);
    }
    Response::new(Body::empty())
}

async fn empty_body() -> Response {
    Response::new(Body::empty())
}

fn render_page(config: &DemoConfig) -> Response {
    match Captcha::new(config.captcha.clone()) {
        Ok(captcha) => {
            tracing::debug!(
                width = captcha.width(),
                height = captcha.height(),
                "rendered demo captcha"
            );
            Html(format!(
                r#"<!doctype html>
<html>
    <head>
        <title>Test Captcha</title>
    </head>
    <body>
    <label>Test image</label>
    <div><img src="{}" /></div>
    </body>
</html>
"#,
                captcha.image()
            ))
            .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "captcha construction failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
