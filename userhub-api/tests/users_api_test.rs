/// Integration tests for the user resource
///
/// Every request goes through the full router (tracing, CORS, security
/// headers) backed by an in-memory store.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{user_data, FailingRepository, TestContext};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_get_all_users() {
    let ctx = TestContext::new();
    ctx.create_user("Abubakkar", "Arshad", "abubakkar.arshad@example.com").await;
    ctx.create_user("Faisal", "Rajpoot", "faisal.rajpoot@example.com").await;

    let (status, body) = ctx.send("GET", "/api/users/", None).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().expect("array body");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["first_name"], "Abubakkar");
    assert_eq!(users[1]["first_name"], "Faisal");
}

#[tokio::test]
async fn test_get_all_users_empty() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("GET", "/api/users/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_collection_without_trailing_slash() {
    let ctx = TestContext::new();
    ctx.create_user("Abubakkar", "Arshad", "abubakkar.arshad@example.com").await;

    let (status, body) = ctx.send("GET", "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("GET", "/api/users/999/", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Requested User does not exist");
}

#[tokio::test]
async fn test_get_user() {
    let ctx = TestContext::new();
    let user = ctx
        .create_user("Abubakkar", "Arshad", "abubakkar.arshad@example.com")
        .await;

    let (status, body) = ctx
        .send("GET", &format!("/api/users/{}/", user.id), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user.id);
    assert_eq!(body["first_name"], "Abubakkar");
    assert_eq!(body["last_name"], "Arshad");
    assert_eq!(body["email"], "abubakkar.arshad@example.com");
}

#[tokio::test]
async fn test_get_user_malformed_id_is_not_found() {
    let ctx = TestContext::new();
    ctx.create_user("Abubakkar", "Arshad", "abubakkar.arshad@example.com").await;

    for uri in [
        "/api/users/abc/",
        "/api/users/0/",
        "/api/users/-1/",
        "/api/users/+1/",
        "/api/users/1.0",
    ] {
        let (status, body) = ctx.send("GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["message"], "Requested User does not exist");
    }
}

#[tokio::test]
async fn test_create_user_invalid_data() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send("POST", "/api/users/", Some(json!({ "first_name": "John" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid Data");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["last_name", "email"]);
    assert_eq!(ctx.count().await, 0);
}

#[tokio::test]
async fn test_create_user_rejects_blank_and_mistyped_fields() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .send(
            "POST",
            "/api/users/",
            Some(json!({ "first_name": "   ", "last_name": "Arshad", "email": "a@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .send(
            "POST",
            "/api/users/",
            Some(json!({ "first_name": "John", "last_name": 42, "email": null })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(ctx.count().await, 0);
}

#[tokio::test]
async fn test_create_user_malformed_json() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("POST")
        .uri("/api/users/")
        .header("content-type", "application/json")
        .body(Body::from("{\"first_name\": "))
        .unwrap();
    let (status, body) = ctx.send_request(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "non_field_errors");
    assert_eq!(ctx.count().await, 0);
}

#[tokio::test]
async fn test_create_user() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("POST", "/api/users/", Some(user_data())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User Successfully created!");

    let users = ctx.users.list().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].first_name, "Abubakkar");
    assert_eq!(body["id"], users[0].id);
}

#[tokio::test]
async fn test_create_user_trims_whitespace() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/users",
            Some(json!({ "first_name": " Faisal ", "last_name": "Rajpoot", "email": " faisal@example.com " })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    let user = ctx.users.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(user.first_name, "Faisal");
    assert_eq!(user.email, "faisal@example.com");
}

#[tokio::test]
async fn test_update_user_not_found() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("PUT", "/api/users/999/", Some(user_data())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User does not exist");
    assert_eq!(ctx.count().await, 0);
}

#[tokio::test]
async fn test_update_user() {
    let ctx = TestContext::new();
    let user = ctx
        .create_user("Arshad", "Abubakkar", "arshad.abubakkar@example.com")
        .await;

    let (status, body) = ctx
        .send("PUT", &format!("/api/users/{}/", user.id), Some(user_data()))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, user_data());

    let stored = ctx.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Abubakkar");
    assert_eq!(stored.last_name, "Arshad");
    assert_eq!(stored.email, "abubakkar.arshad@example.com");
}

#[tokio::test]
async fn test_update_user_invalid_data() {
    let ctx = TestContext::new();
    let user = ctx
        .create_user("Arshad", "Abubakkar", "arshad.abubakkar@example.com")
        .await;

    let (status, body) = ctx
        .send(
            "PUT",
            &format!("/api/users/{}/", user.id),
            Some(json!({ "first_name": "Abubakkar" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Either id is wrongly put or invalid data is provided"
    );

    let stored = ctx.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored, user);
}

#[tokio::test]
async fn test_update_invalid_data_checked_before_id() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .send("PUT", "/api/users/999/", Some(json!({ "first_name": "Abubakkar" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_malformed_id_is_not_found() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("PUT", "/api/users/abc/", Some(user_data())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User does not exist");
}

#[tokio::test]
async fn test_signed_id_does_not_address_user() {
    let ctx = TestContext::new();
    let user = ctx
        .create_user("Abubakkar", "Arshad", "abubakkar.arshad@example.com")
        .await;
    let uri = format!("/api/users/+{}/", user.id);

    let (status, _) = ctx.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.send("PUT", &uri, Some(user_data())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(ctx.users.find_by_id(user.id).await.unwrap(), Some(user));
}

#[tokio::test]
async fn test_update_without_id() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("PUT", "/api/users/", Some(user_data())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Either id is wrongly put or invalid data is provided"
    );
    assert_eq!(ctx.count().await, 0);
}

#[tokio::test]
async fn test_delete_user() {
    let ctx = TestContext::new();
    let user = ctx
        .create_user("Abubakkar", "Arshad", "abubakkar.arshad@example.com")
        .await;

    let (status, body) = ctx
        .send("DELETE", &format!("/api/users/{}/", user.id), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User Successfully deleted");
    assert_eq!(ctx.count().await, 0);
}

#[tokio::test]
async fn test_delete_user_not_found() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("DELETE", "/api/users/999/", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User does not exist");
}

#[tokio::test]
async fn test_delete_without_id() {
    let ctx = TestContext::new();
    ctx.create_user("Abubakkar", "Arshad", "abubakkar.arshad@example.com").await;

    let (status, _) = ctx.send("DELETE", "/api/users/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.send("DELETE", "/api/users/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(ctx.count().await, 1);
}

#[tokio::test]
async fn test_post_on_item_not_allowed() {
    let ctx = TestContext::new();

    let (status, _) = ctx.send("POST", "/api/users/1/", Some(user_data())).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(ctx.count().await, 0);
}

#[tokio::test]
async fn test_store_failure_collapses_to_not_found() {
    let ctx = TestContext::with_repository(Arc::new(FailingRepository));

    let (status, body) = ctx.send("GET", "/api/users/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Requested User does not exist");

    let (status, _) = ctx.send("GET", "/api/users/1/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = ctx.send("PUT", "/api/users/1/", Some(user_data())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User does not exist");

    let (status, _) = ctx.send("DELETE", "/api/users/1/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_on_create_is_internal_error() {
    let ctx = TestContext::with_repository(Arc::new(FailingRepository));

    let (status, body) = ctx.send("POST", "/api/users/", Some(user_data())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "An internal error occurred");
}

#[tokio::test]
async fn test_full_lifecycle() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("POST", "/api/users/", Some(user_data())).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/users/{}/", body["id"]);

    let replacement = json!({
        "first_name": "Faisal",
        "last_name": "Rajpoot",
        "email": "faisal.rajpoot@example.com",
    });
    let (status, _) = ctx.send("PUT", &uri, Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = ctx.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Faisal");

    let (status, _) = ctx.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
