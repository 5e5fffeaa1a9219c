//! HTTP-level integration tests for the `/verses` resource: creation with
//! derivation, validation, role gates, ownership rules, and cascade delete.

mod common;

use axum::http::StatusCode;
use common::{
    build_test_app, delete, expect_status, get, post_json, put_json, seed_annotation, seed_user,
    seed_verse,
};
use serde_json::json;
use sqlx::PgPool;

use shloka_core::roles::Role;
use shloka_core::transliteration::TransliterationEngine;
use shloka_core::unicode::to_unicode_escape;
use shloka_db::repositories::{AnnotationRepo, VerseRepo};

fn create_body(key: &str) -> serde_json::Value {
    json!({
        "verse_key": key,
        "sanskrit_text": "योगस्थः कुरु कर्माणि",
        "translations": {
            "hindi": "योग में स्थित होकर कर्म कर",
            "english": "Established in yoga, perform action"
        },
        "source_text_name": "Bhagavad Gita",
        "source_section": "Adhyaya",
        "source_chapter": 2,
        "source_verse": 48,
        "keywords": "yoga, karma",
        "category": "karma-yoga"
    })
}

// ---------------------------------------------------------------------------
// Test: creating a verse derives unicode and transliteration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_derives_script_forms(pool: PgPool) {
    let creator = seed_user(&pool, "creator", Role::FixedEntry).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/verses",
        &creator.token,
        create_body("BG_2.48"),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;

    assert_eq!(json["data"]["verse_key"], "BG_2.48");
    assert_eq!(json["data"]["approved"], false);
    assert!(json["data"]["approved_by"].is_null());
    assert_eq!(json["data"]["created_by"], creator.id);

    // Derived forms were filled in from the original text.
    assert_eq!(
        json["data"]["unicode_text"],
        to_unicode_escape("योगस्थः कुरु कर्माणि")
    );
    assert_eq!(
        json["data"]["transliteration"],
        TransliterationEngine::with_defaults().devanagari_to_iast("योगस्थः कुरु कर्माणि")
    );

    // Comma-separated keywords were normalized into a list.
    assert_eq!(json["data"]["keywords"], json!(["yoga", "karma"]));
}

// ---------------------------------------------------------------------------
// Test: creation is gated on verse-entry capability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_fixed_entry_capability(pool: PgPool) {
    let variable = seed_user(&pool, "variable", Role::VariableEntry).await;
    let approver = seed_user(&pool, "approver", Role::Approver).await;

    for user in [&variable, &approver] {
        let response = post_json(
            build_test_app(pool.clone()),
            "/api/v1/verses",
            &user.token,
            create_body("BG_2.49"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

// ---------------------------------------------------------------------------
// Test: missing required translation fails validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_hindi_and_english_translations(pool: PgPool) {
    let creator = seed_user(&pool, "creator", Role::FixedEntry).await;

    let mut body = create_body("BG_2.50");
    body["translations"] = json!({"english": "only english"});

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/verses",
        &creator.token,
        body,
    )
    .await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("translations.hindi"));

    // No partial write happened.
    assert!(VerseRepo::find_by_key(&pool, "BG_2.50")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: non-positive citation numbers fail validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_non_positive_citation(pool: PgPool) {
    let creator = seed_user(&pool, "creator", Role::FixedEntry).await;

    let mut body = create_body("BG_0.0");
    body["source_chapter"] = json!(0);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/verses",
        &creator.token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: duplicate verse_key maps to 409
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_verse_key_conflicts(pool: PgPool) {
    let creator = seed_user(&pool, "creator", Role::FixedEntry).await;

    let first = post_json(
        build_test_app(pool.clone()),
        "/api/v1/verses",
        &creator.token,
        create_body("BG_DUP"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        build_test_app(pool),
        "/api/v1/verses",
        &creator.token,
        create_body("BG_DUP"),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: only the creator or an admin may edit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_requires_ownership_or_admin(pool: PgPool) {
    let owner = seed_user(&pool, "owner", Role::FixedEntry).await;
    let other = seed_user(&pool, "other", Role::FixedEntry).await;
    let admin = seed_user(&pool, "admin", Role::Admin).await;

    let verse = seed_verse(&pool, owner.id, "BG_3.9").await;
    let path = format!("/api/v1/verses/{}", verse.id);

    let response = put_json(
        build_test_app(pool.clone()),
        &path,
        &other.token,
        json!({"category": "yajna"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json(
        build_test_app(pool.clone()),
        &path,
        &admin.token,
        json!({"category": "yajna"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(
        build_test_app(pool),
        &path,
        &owner.token,
        json!({"category": "sacrifice"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: deleting a verse cascades to its annotations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_annotations(pool: PgPool) {
    let owner = seed_user(&pool, "owner", Role::FixedEntry).await;

    let verse = seed_verse(&pool, owner.id, "BG_4.7").await;
    let annotation = seed_annotation(&pool, verse.id, owner.id, "Why descend?", None).await;

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/verses/{}", verse.id),
        &owner.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(VerseRepo::find_by_id(&pool, verse.id).await.unwrap().is_none());
    assert!(AnnotationRepo::find_by_id(&pool, annotation.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: listing filters by status and ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters(pool: PgPool) {
    let a = seed_user(&pool, "entry_a", Role::FixedEntry).await;
    let b = seed_user(&pool, "entry_b", Role::FixedEntry).await;
    let approver = seed_user(&pool, "approver", Role::Approver).await;

    let v1 = seed_verse(&pool, a.id, "BG_5.1").await;
    seed_verse(&pool, b.id, "BG_5.2").await;
    VerseRepo::approve(&pool, v1.id, approver.id).await.unwrap();

    let response = get(
        build_test_app(pool.clone()),
        "/api/v1/verses?status=approved",
        &a.token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["verse_key"], "BG_5.1");

    let response = get(
        build_test_app(pool.clone()),
        "/api/v1/verses?mine=true",
        &b.token,
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["verse_key"], "BG_5.2");

    let response = get(
        build_test_app(pool),
        "/api/v1/verses?status=published",
        &a.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: unknown verse id is a 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_missing_verse_is_404(pool: PgPool) {
    let user = seed_user(&pool, "reader", Role::FixedEntry).await;

    let response = get(
        build_test_app(pool),
        "/api/v1/verses/999999",
        &user.token,
    )
    .await;
    let json = expect_status(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
