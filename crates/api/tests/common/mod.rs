//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router (same middleware stack as production) via
//! `tower::ServiceExt::oneshot`. Each test gets an isolated database from
//! `#[sqlx::test]`; fixtures are seeded through the repositories.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use shloka_api::auth::jwt::{generate_access_token, JwtConfig};
use shloka_api::auth::password::hash_password;
use shloka_api::config::ServerConfig;
use shloka_api::export_store::ExportStore;
use shloka_api::router::build_app_router;
use shloka_api::state::AppState;
use shloka_core::roles::Role;
use shloka_core::transliteration::TransliterationEngine;
use shloka_core::types::DbId;
use shloka_db::models::user::CreateUser;
use shloka_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        export_dir: std::env::temp_dir()
            .join(format!("shloka-test-exports-{}", std::process::id()))
            .to_string_lossy()
            .into_owned(),
        jwt: JwtConfig {
            secret: "test-secret-do-not-use-in-production".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        transliterator: Arc::new(TransliterationEngine::with_defaults()),
        export_store: Arc::new(ExportStore::new(config.export_dir.clone())),
    };

    build_app_router(state, &config)
}

/// A seeded user plus a valid access token for it.
pub struct TestUser {
    pub id: DbId,
    pub token: String,
}

/// Insert a user with the given role and mint a token for them.
pub async fn seed_user(pool: &PgPool, username: &str, role: Role) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash_password("a-test-password").expect("hashing should succeed"),
            role: role.as_str().to_string(),
        },
    )
    .await
    .expect("seeding a user should succeed");

    let token = generate_access_token(user.id, role.as_str(), &test_config().jwt)
        .expect("token generation should succeed");

    TestUser {
        id: user.id,
        token,
    }
}

/// Insert a pending verse with sensible defaults.
pub async fn seed_verse(
    pool: &PgPool,
    created_by: DbId,
    verse_key: &str,
) -> shloka_db::models::verse::Verse {
    use std::collections::BTreeMap;

    use shloka_db::models::verse::CreateVerse;
    use shloka_db::repositories::VerseRepo;

    VerseRepo::create(
        pool,
        &CreateVerse {
            verse_key: verse_key.to_string(),
            sanskrit_text: "धर्मक्षेत्रे कुरुक्षेत्रे समवेता युयुत्सवः".to_string(),
            unicode_text: None,
            transliteration: None,
            translations: BTreeMap::from([
                ("hindi".to_string(), "धर्मभूमि में".to_string()),
                ("english".to_string(), "On the field of dharma".to_string()),
            ]),
            source_text_name: "Bhagavad Gita".to_string(),
            source_section: "Adhyaya".to_string(),
            source_chapter: 1,
            source_verse: 1,
            keywords: None,
            category: None,
            commentaries: None,
            created_by,
        },
    )
    .await
    .expect("seeding a verse should succeed")
}

/// Insert a pending annotation against a verse.
pub async fn seed_annotation(
    pool: &PgPool,
    verse_id: DbId,
    created_by: DbId,
    question: &str,
    context: Option<&str>,
) -> shloka_db::models::annotation::Annotation {
    use shloka_db::models::annotation::CreateAnnotation;
    use shloka_db::repositories::AnnotationRepo;

    AnnotationRepo::create(
        pool,
        &CreateAnnotation {
            verse_id,
            question: question.to_string(),
            answer: "An answer.".to_string(),
            context: context.map(str::to_string),
            keywords: None,
            created_by,
        },
    )
    .await
    .expect("seeding an annotation should succeed")
}

/// Send a GET request with a bearer token.
pub async fn get(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send an unauthenticated GET request.
pub async fn get_unauthed(app: Router, path: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with an empty body and a bearer token.
pub async fn post_empty(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a PUT request with a JSON body and a bearer token.
pub async fn put_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn delete(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a status and return the parsed body.
pub async fn expect_status(
    response: Response<Body>,
    status: StatusCode,
) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
