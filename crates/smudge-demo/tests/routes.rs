use axum::body::Body;
use axum::http::{Request, StatusCode};
use smudge_demo::config::DemoConfig;
use smudge_demo::routes::create_router;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::Router {
    create_router(Arc::new(DemoConfig::default()))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn index_page_embeds_a_captcha_image() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Test Captcha"));
    assert!(body.contains("<img src=\"data:image/jpeg;base64,"));
}

#[tokio::test]
async fn paths_mentioning_index_are_served_too() {
    let response = app()
        .oneshot(Request::get("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("<img src=\"data:image/jpeg;base64,"));
}

#[tokio::test]
async fn other_routes_return_an_empty_body() {
    let response = app()
        .oneshot(Request::get("/anything-else").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.is_empty());
}

#[tokio::test]
async fn non_get_requests_get_an_empty_body() {
    let response = app()
        .oneshot(Request::post("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.is_empty());
}
