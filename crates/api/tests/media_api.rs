//! HTTP-level integration tests for galleries, default images, and banners.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, expect_json, get, post_auth, post_json_auth, user_with_token};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn post_created(app: &axum::Router, uri: &str, body: Value, token: &str) -> Value {
    let response = post_json_auth(app.clone(), uri, body, token).await;
    expect_json(response, StatusCode::CREATED).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Galleries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gallery_lists_marked_images_in_order(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "editor").await;
    let app = build_test_app(pool).await;
    let gallery = post_created(
        &app.router,
        "/api/v1/content",
        json!({ "kind": "gallery", "title": "Launch Party" }),
        &token,
    )
    .await;
    let gallery_id = gallery["id"].as_i64().unwrap();
    let images_uri = format!("/api/v1/galleries/{gallery_id}/images");

    let mut ids = Vec::new();
    for (path, order) in [("b.jpg", 2), ("a.jpg", 1), ("c.jpg", 3)] {
        let image = post_created(
            &app.router,
            &images_uri,
            json!({ "image_path": path, "order": order }),
            &token,
        )
        .await;
        ids.push(image["id"].as_i64().unwrap());
    }
    post_created(
        &app.router,
        &images_uri,
        json!({ "image_path": "hidden.jpg", "state": "unpublished" }),
        &token,
    )
    .await;

    let response = get(app.router.clone(), "/api/v1/galleries/slug/launch-party").await;
    let detail = expect_json(response, StatusCode::OK).await["data"].clone();
    let images = detail["images"].as_array().unwrap();
    let paths: Vec<&str> = images
        .iter()
        .map(|i| i["image_path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["a.jpg", "b.jpg", "c.jpg"]);
    let markers: Vec<&str> = images.iter().map(|i| i["marker"].as_str().unwrap()).collect();
    assert_eq!(markers, vec!["A", "B", "C"]);

    // Display order is a, b, c; b was created first.
    let response = get(
        app.router,
        &format!("/api/v1/galleries/{gallery_id}/images/{}/surrounding", ids[0]),
    )
    .await;
    let around = expect_json(response, StatusCode::OK).await["data"].clone();
    assert_eq!(around["previous_image_id"], ids[1]);
    assert_eq!(around["next_image_id"], ids[2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_image_for_missing_gallery_is_404(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "editor").await;
    let app = build_test_app(pool).await;

    let response = post_json_auth(
        app.router,
        "/api/v1/galleries/424242/images",
        json!({ "image_path": "a.jpg" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_default_image_fills_missing_image(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "editor").await;
    let app = build_test_app(pool).await;
    post_created(
        &app.router,
        "/api/v1/default-images",
        json!({ "category": "content", "image_path": "defaults/placeholder.png" }),
        &token,
    )
    .await;

    let item = post_created(
        &app.router,
        "/api/v1/content",
        json!({ "kind": "content", "title": "No Picture" }),
        &token,
    )
    .await;
    assert_eq!(item["image_path"], "defaults/placeholder.png");
    assert!(!item["image_name"].is_null());

    let item = post_created(
        &app.router,
        "/api/v1/content",
        json!({ "kind": "content", "title": "Own Picture", "image_path": "mine.png" }),
        &token,
    )
    .await;
    assert_eq!(item["image_path"], "mine.png");
}

// ---------------------------------------------------------------------------
// Banners
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_banner_set_holds_banners_of_its_kind(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "editor").await;
    let app = build_test_app(pool).await;

    let set = post_created(
        &app.router,
        "/api/v1/banner-sets",
        json!({ "kind": "image", "slug": "Home Hero" }),
        &token,
    )
    .await;
    assert_eq!(set["slug"], "home-hero");
    let set_id = set["id"].as_i64().unwrap();

    let image = post_created(
        &app.router,
        "/api/v1/banners",
        json!({ "kind": "image", "title": "Spring", "image_path": "spring.jpg" }),
        &token,
    )
    .await;
    let html = post_created(
        &app.router,
        "/api/v1/banners",
        json!({ "kind": "html", "title": "Notice", "rich_content": "<b>hi</b>" }),
        &token,
    )
    .await;

    let response = post_auth(
        app.router.clone(),
        &format!("/api/v1/banner-sets/{set_id}/banners/{}", image["id"]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_auth(
        app.router.clone(),
        &format!("/api/v1/banner-sets/{set_id}/banners/{}", html["id"]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(app.router, "/api/v1/banner-sets/slug/home-hero").await;
    let detail = expect_json(response, StatusCode::OK).await["data"].clone();
    let banners = detail["banners"].as_array().unwrap();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0]["title"], "Spring");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_banner_set_slug_must_not_be_blank(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "editor").await;
    let app = build_test_app(pool).await;

    let response = post_json_auth(
        app.router,
        "/api/v1/banner-sets",
        json!({ "kind": "html", "slug": "!!!" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
