//! HTTP-level integration tests for sign-in, sign-up, refresh, sign-out and me.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, post_json, post_json_auth, sign_in, TEST_PASSWORD};
use sqlx::PgPool;
use techhub_api::bootstrap::ensure_admin;
use techhub_api::config::AdminBootstrap;
use techhub_db::repositories::UserRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_in_returns_tokens_and_profile(pool: PgPool) {
    let user = create_user(&pool, "reader@techhub.test", false).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "Reader@TechHub.test", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["is_admin"], false);
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_in_wrong_password(pool: PgPool) {
    create_user(&pool, "reader@techhub.test", false).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "reader@techhub.test", "password": "wrong-password" });
    let response = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_in_validates_fields_first(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "not-an-email", "password": "123" });
    let response = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<_> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["email", "password"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_up_creates_non_admin_without_tokens(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "email": "new@techhub.test",
        "password": "secret1",
        "full_name": "New Person",
    });
    let response = post_json(app.clone(), "/api/v1/auth/sign-up", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "new@techhub.test");
    assert_eq!(json["data"]["full_name"], "New Person");
    assert_eq!(json["data"]["is_admin"], false);
    assert!(json.get("access_token").is_none());

    // Same email again conflicts.
    let response = post_json(app, "/api/v1/auth/sign-up", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let stored = UserRepo::find_by_email(&pool, "new@techhub.test")
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_admin);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    create_user(&pool, "rotator@techhub.test", false).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "rotator@techhub.test", "password": TEST_PASSWORD });
    let login = body_json(post_json(app.clone(), "/api/v1/auth/sign-in", body).await).await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app.clone(), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], login["refresh_token"]);

    // The old token was revoked by the rotation.
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_out_revokes_refresh_tokens(pool: PgPool) {
    create_user(&pool, "leaver@techhub.test", false).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "leaver@techhub.test", "password": TEST_PASSWORD });
    let login = body_json(post_json(app.clone(), "/api/v1/auth/sign-in", body).await).await;
    let access = login["access_token"].as_str().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/v1/auth/sign-out",
        access,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": login["refresh_token"] });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    create_user(&pool, "me@techhub.test", true).await;
    let app = common::build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = sign_in(app.clone(), "me@techhub.test").await;
    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "me@techhub.test");
    assert_eq!(json["data"]["is_admin"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_admin_can_sign_in(pool: PgPool) {
    let admin = AdminBootstrap {
        email: "owner@techhub.test".to_string(),
        password: TEST_PASSWORD.to_string(),
    };
    let user = ensure_admin(&pool, &admin).await.unwrap();
    assert!(user.is_admin);
    // Idempotent.
    let again = ensure_admin(&pool, &admin).await.unwrap();
    assert_eq!(again.id, user.id);

    let app = common::build_test_app(pool);
    let token = sign_in(app.clone(), "owner@techhub.test").await;
    let json = body_json(get_auth(app, "/api/v1/auth/me", &token).await).await;
    assert_eq!(json["data"]["is_admin"], true);
}
