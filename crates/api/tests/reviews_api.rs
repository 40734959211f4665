//! HTTP-level integration tests for `/reviews`: the one-review-per-user rule,
//! rating aggregation, input validation and author-only mutation.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_media, delete_auth, get, post_json_auth, put_json_auth, register_and_login,
    submit_review,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// One review per (user, media)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_review_updates_aggregate_and_second_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (ana_id, ana_token) = register_and_login(&app, "Ana", "a@x.com").await;
    let media_id = create_media(&app, &ana_token, "Inception").await;

    let response = submit_review(&app, &ana_token, media_id, 4.5, "Great").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["rating"], 4.5);
    assert_eq!(json["comment"], "Great");
    assert_eq!(json["userId"], ana_id);
    assert_eq!(json["mediaId"], media_id);
    assert_eq!(json["user"]["name"], "Ana");
    assert_eq!(json["media"]["title"], "Inception");

    let json = body_json(get(app.clone(), &format!("/media/pesquisar/{media_id}")).await).await;
    assert_eq!(json["averageRating"], 4.5);
    assert_eq!(json["totalReviews"], 1);

    let response = submit_review(&app, &ana_token, media_id, 2.0, "Changed my mind").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_REVIEW");
    assert!(json["errors"][0].is_string());

    // The rejected submission left the aggregate unchanged.
    let json = body_json(get(app, &format!("/media/pesquisar/{media_id}")).await).await;
    assert_eq!(json["averageRating"], 4.5);
    assert_eq!(json["totalReviews"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_duplicate_submissions_yield_one_review(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "Ana", "a@x.com").await;
    let media_id = create_media(&app, &token, "Inception").await;

    let (first, second) = tokio::join!(
        submit_review(&app, &token, media_id, 4.0, "First"),
        submit_review(&app, &token, media_id, 3.0, "Second"),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);

    let json = body_json(get(app, &format!("/reviews/media/{media_id}")).await).await;
    assert_eq!(json["totalReviews"], 1);
    assert_eq!(json["reviews"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_different_users_may_review_same_media(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, ana_token) = register_and_login(&app, "Ana", "a@x.com").await;
    let (_, bia_token) = register_and_login(&app, "Bia", "b@x.com").await;
    let media_id = create_media(&app, &ana_token, "Inception").await;

    let response = submit_review(&app, &ana_token, media_id, 4.0, "Good").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = submit_review(&app, &bia_token, media_id, 2.0, "Meh").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(app, &format!("/media/pesquisar/{media_id}")).await).await;
    assert_eq!(json["averageRating"], 3.0);
    assert_eq!(json["totalReviews"], 2);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_out_of_range_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "Ana", "a@x.com").await;
    let media_id = create_media(&app, &token, "Inception").await;

    for rating in [-0.5, 5.5, 10.0] {
        let response = submit_review(&app, &token, media_id, rating, "Fine").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "rating {rating}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    // Bounds are inclusive.
    let response = submit_review(&app, &token, media_id, 0.0, "Awful").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_length_bounds(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "Ana", "a@x.com").await;
    let media_id = create_media(&app, &token, "Inception").await;

    let too_long = "a".repeat(1001);
    for comment in ["", "   ", too_long.as_str()] {
        let response = submit_review(&app, &token, media_id, 3.0, comment).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["errors"][0].as_str().unwrap().contains("Comment"));
    }

    let max = "a".repeat(1000);
    let response = submit_review(&app, &token, media_id, 3.0, &max).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrongly_typed_fields_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "Ana", "a@x.com").await;
    let media_id = create_media(&app, &token, "Inception").await;

    let cases = [
        serde_json::json!({ "rating": "4.5", "comment": "Great", "mediaId": media_id }),
        serde_json::json!({ "rating": 4.5, "comment": null, "mediaId": media_id }),
        serde_json::json!({ "rating": 4.5, "comment": "Great" }),
    ];
    for body in cases {
        let response = post_json_auth(app.clone(), "/reviews/criar", &token, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json["errors"][0].is_string());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_of_missing_media_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "Ana", "a@x.com").await;

    let response = submit_review(&app, &token, 999_999, 3.0, "Ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_on_behalf_of_other_user_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (ana_id, _) = register_and_login(&app, "Ana", "a@x.com").await;
    let (_, bia_token) = register_and_login(&app, "Bia", "b@x.com").await;
    let media_id = create_media(&app, &bia_token, "Inception").await;

    let body = serde_json::json!({
        "rating": 1.0,
        "comment": "Posing as Ana",
        "userId": ana_id,
        "mediaId": media_id,
    });
    let response = post_json_auth(app, "/reviews/criar", &bia_token, body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Author-only mutation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_author_can_update_and_delete_review(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "Ana", "a@x.com").await;
    let media_id = create_media(&app, &token, "Inception").await;
    let created = body_json(submit_review(&app, &token, media_id, 2.0, "Meh").await).await;
    let review_id = created["id"].as_i64().unwrap();

    // Rating only: the comment is kept.
    let uri = format!("/reviews/atualizar/{review_id}");
    let body = serde_json::json!({ "rating": 5.0 });
    let response = put_json_auth(app.clone(), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["rating"], 5.0);
    assert_eq!(json["comment"], "Meh");

    let json = body_json(get(app.clone(), &format!("/media/pesquisar/{media_id}")).await).await;
    assert_eq!(json["averageRating"], 5.0);

    let uri = format!("/reviews/remover/{review_id}");
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/reviews/pesquisar/{review_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Once deleted, the user may review the media again.
    let response = submit_review(&app, &token, media_id, 4.0, "Second look").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_of_review_without_comment_requires_one(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = register_and_login(&app, "Ana", "a@x.com").await;
    let media_id = create_media(&app, &token, "Inception").await;
    let created = body_json(submit_review(&app, &token, media_id, 3.0, "Old").await).await;
    let review_id = created["id"].as_i64().unwrap();

    // Reproduce a row whose NULL comment was backfilled to '' on upgrade.
    sqlx::query("ALTER TABLE reviews DROP CONSTRAINT ck_reviews_comment_length")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE reviews SET comment = '' WHERE id = $1")
        .bind(review_id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "ALTER TABLE reviews ADD CONSTRAINT ck_reviews_comment_length
         CHECK (char_length(comment) BETWEEN 1 AND 1000) NOT VALID",
    )
    .execute(&pool)
    .await
    .unwrap();

    let uri = format!("/reviews/atualizar/{review_id}");
    let body = serde_json::json!({ "rating": 4.0 });
    let response = put_json_auth(app.clone(), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"][0].as_str().unwrap().contains("comment"));

    let body = serde_json::json!({ "rating": 4.0, "comment": "Better on rewatch" });
    let response = put_json_auth(app, &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["comment"], "Better on rewatch");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_author_cannot_modify_review(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, ana_token) = register_and_login(&app, "Ana", "a@x.com").await;
    let (_, bia_token) = register_and_login(&app, "Bia", "b@x.com").await;
    let media_id = create_media(&app, &ana_token, "Inception").await;
    let created = body_json(submit_review(&app, &ana_token, media_id, 4.0, "Good").await).await;
    let review_id = created["id"].as_i64().unwrap();

    let uri = format!("/reviews/atualizar/{review_id}");
    let body = serde_json::json!({ "rating": 0.0, "comment": "Vandalised" });
    let response = put_json_auth(app.clone(), &uri, &bia_token, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");

    let uri = format!("/reviews/remover/{review_id}");
    let response = delete_auth(app.clone(), &uri, &bia_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get(app, &format!("/reviews/pesquisar/{review_id}")).await).await;
    assert_eq!(json["rating"], 4.0);
    assert_eq!(json["comment"], "Good");
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reviews_for_media_include_aggregate(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, owner_token) = register_and_login(&app, "Owner", "o@x.com").await;
    let media_id = create_media(&app, &owner_token, "Inception").await;

    for (i, rating) in [5.0, 3.0, 4.0].into_iter().enumerate() {
        let (_, token) = register_and_login(&app, "Critic", &format!("c{i}@x.com")).await;
        let response = submit_review(&app, &token, media_id, rating, "Noted").await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app, &format!("/reviews/media/{media_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["mediaId"], media_id);
    assert_eq!(json["averageRating"], 4.0);
    assert_eq!(json["totalReviews"], 3);
    assert_eq!(json["reviews"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reviews_for_unreviewed_media_omit_average(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_and_login(&app, "Ana", "a@x.com").await;
    let media_id = create_media(&app, &token, "Inception").await;

    let json = body_json(get(app.clone(), &format!("/reviews/media/{media_id}")).await).await;
    assert!(json.get("averageRating").is_none());
    assert_eq!(json["totalReviews"], 0);

    let response = get(app, "/reviews/media/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reviews_for_user_include_media_title(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (ana_id, ana_token) = register_and_login(&app, "Ana", "a@x.com").await;
    let inception = create_media(&app, &ana_token, "Inception").await;
    let memento = create_media(&app, &ana_token, "Memento").await;

    submit_review(&app, &ana_token, inception, 4.5, "Great").await;
    submit_review(&app, &ana_token, memento, 4.0, "Clever").await;

    let response = get(app.clone(), &format!("/reviews/usuario/{ana_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let reviews = json.as_array().unwrap();
    assert_eq!(reviews.len(), 2);

    let mut titles: Vec<&str> = reviews
        .iter()
        .map(|r| r["media"]["title"].as_str().unwrap())
        .collect();
    titles.sort();
    assert_eq!(titles, ["Inception", "Memento"]);

    let all = body_json(get(app, "/reviews/listar").await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}
