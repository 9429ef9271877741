//! End-to-end tests driving the full router over in-memory state.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use skillswap::{app::build_app, state::AppState};
use tower::ServiceExt;

fn test_app() -> (Router, AppState) {
    let state = AppState::fake();
    (build_app(state.clone()), state)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Register a user and return (token, user id).
async fn register(app: &Router, email: &str, name: &str) -> (String, String) {
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/register",
            None,
            Some(&json!({
                "email": email,
                "password": "long-enough-password",
                "name": name,
                "location": "Berlin"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

async fn login(app: &Router, email: &str) -> (StatusCode, Value) {
    send(
        app,
        request(
            Method::POST,
            "/api/login",
            None,
            Some(&json!({ "email": email, "password": "long-enough-password" })),
        ),
    )
    .await
}

#[tokio::test]
async fn duplicate_registration_conflicts_with_error_body() {
    let (app, _) = test_app();
    register(&app, "alice@example.com", "Alice").await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/register",
            None,
            Some(&json!({
                "email": "alice@example.com",
                "password": "another-long-password",
                "name": "Alice II"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "User already exists" }));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (app, _) = test_app();
    register(&app, "alice@example.com", "Alice").await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/login",
            None,
            Some(&json!({ "email": "alice@example.com", "password": "wrong-password" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let (app, _) = test_app();
    let (status, body) = send(&app, request(Method::GET, "/api/profile", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/profile", Some("not-a-token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_update_roundtrip() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "alice@example.com", "Alice").await;

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            "/api/profile",
            Some(&token),
            Some(&json!({
                "skillsOffered": ["Guitar", "Cooking"],
                "isPublic": false
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["skillsOffered"], json!(["Guitar", "Cooking"]));
    assert_eq!(body["isPublic"], json!(false));
    assert_eq!(body["name"], "Alice");
    assert!(body.get("password").is_none());

    let (status, body) = send(&app, request(Method::GET, "/api/profile", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["skillsOffered"], json!(["Guitar", "Cooking"]));
}

#[tokio::test]
async fn search_filters_public_users_by_offered_skill() {
    let (app, _) = test_app();
    let (me, _) = register(&app, "me@example.com", "Me").await;
    let (anna, _) = register(&app, "anna@example.com", "Anna").await;
    let (ben, _) = register(&app, "ben@example.com", "Ben").await;
    let (cara, _) = register(&app, "cara@example.com", "Cara").await;

    for (token, offered, public) in [
        (&anna, json!(["Guitar Lessons"]), true),
        (&ben, json!(["Cooking"]), true),
        (&cara, json!(["Guitar"]), false),
    ] {
        let (status, _) = send(
            &app,
            request(
                Method::PUT,
                "/api/profile",
                Some(token),
                Some(&json!({ "skillsOffered": offered, "isPublic": public })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/search?skill=guitar&type=offered",
            Some(&me),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Anna"]);
}

#[tokio::test]
async fn swap_request_to_unknown_target_is_not_found() {
    let (app, _) = test_app();
    let (token, _) = register(&app, "alice@example.com", "Alice").await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/swap-request",
            Some(&token),
            Some(&json!({
                "targetUserId": "00000000-0000-0000-0000-000000000000",
                "offeredSkill": "Guitar",
                "requestedSkill": "Chess"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Target user not found");
}

#[tokio::test]
async fn non_owner_cannot_delete_a_swap_request() {
    let (app, _) = test_app();
    let (alice, _) = register(&app, "alice@example.com", "Alice").await;
    let (bob, bob_id) = register(&app, "bob@example.com", "Bob").await;

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/swap-request",
            Some(&alice),
            Some(&json!({
                "targetUserId": bob_id,
                "offeredSkill": "Guitar",
                "requestedSkill": "Chess"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let request_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/swap-request/{request_id}"),
            Some(&bob),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/swap-request/{request_id}"),
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        request(Method::GET, "/api/swap-requests", Some(&alice), None),
    )
    .await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn full_swap_and_rating_flow_shows_up_in_the_admin_report() {
    let (app, state) = test_app();
    let (alice, alice_id) = register(&app, "alice@example.com", "Alice").await;
    let (_, bob_id) = register(&app, "bob@example.com", "Bob").await;

    // Alice proposes a swap to Bob.
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/swap-request",
            Some(&alice),
            Some(&json!({
                "targetUserId": bob_id,
                "offeredSkill": "Guitar",
                "requestedSkill": "Chess",
                "message": "Weekends?"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    let request_id = body["id"].as_str().unwrap().to_string();

    // Bob sees it and accepts.
    let (status, body) = login(&app, "bob@example.com").await;
    assert_eq!(status, StatusCode::OK);
    let bob = body["token"].as_str().unwrap().to_string();
    let (status, body) = send(
        &app,
        request(Method::GET, "/api/swap-requests", Some(&bob), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = &body.as_array().unwrap()[0];
    assert_eq!(listed["id"], json!(request_id));
    assert_eq!(listed["fromUser"]["name"], "Alice");
    assert_eq!(listed["toUser"]["name"], "Bob");

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/swap-request/{request_id}"),
            Some(&bob),
            Some(&json!({ "status": "accepted" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "accepted");

    // Bob rates Alice for the completed swap.
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/rating",
            Some(&bob),
            Some(&json!({
                "targetUserId": alice_id,
                "rating": 5,
                "feedback": "Great mentor",
                "swapRequestId": request_id
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/ratings/{alice_id}"),
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["rating"], 5);
    assert_eq!(body[0]["fromUser"]["name"], "Bob");

    // Alice's derived reputation reflects the rating.
    let (_, body) = send(&app, request(Method::GET, "/api/profile", Some(&alice), None)).await;
    assert_eq!(body["rating"], 5.0);
    assert_eq!(body["totalRatings"], 1);

    // Promote an admin; the flag only lands in claims at next login.
    register(&app, "root@example.com", "Root").await;
    state
        .store
        .update(|db| {
            db.users
                .iter_mut()
                .find(|u| u.email == "root@example.com")
                .unwrap()
                .is_admin = true;
            Ok(())
        })
        .await
        .unwrap();
    let (status, body) = login(&app, "root@example.com").await;
    assert_eq!(status, StatusCode::OK);
    let admin = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/admin/reports", Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalUsers"], 3);
    assert_eq!(body["totalSwapRequests"], 1);
    assert_eq!(body["acceptedRequests"], 1);
    assert_eq!(body["pendingRequests"], 0);
    assert_eq!(body["totalRatings"], 1);
    assert_eq!(body["averageRating"], 5.0);
}

#[tokio::test]
async fn admin_routes_reject_non_admins_but_broadcasts_are_public() {
    let (app, state) = test_app();
    let (user, user_id) = register(&app, "user@example.com", "User").await;

    for uri in [
        "/api/admin/users",
        "/api/admin/swap-requests",
        "/api/admin/reports",
    ] {
        let (status, body) = send(&app, request(Method::GET, uri, Some(&user), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["error"], "Admin access required");
    }

    // promote and re-login to pick up the admin claim
    register(&app, "root@example.com", "Root").await;
    state
        .store
        .update(|db| {
            db.users
                .iter_mut()
                .find(|u| u.email == "root@example.com")
                .unwrap()
                .is_admin = true;
            Ok(())
        })
        .await
        .unwrap();
    let admin = login(&app, "root@example.com").await.1["token"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/admin/message",
            Some(&admin),
            Some(&json!({ "title": "Maintenance", "message": "Down at noon" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // a ban flips the flag and blocks the next login
    let (status, _) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/admin/users/{user_id}/ban"),
            Some(&admin),
            Some(&json!({ "banned": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = login(&app, "user@example.com").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Account is banned");

    // the broadcast feed is readable with any valid token
    let (status, body) = send(
        &app,
        request(Method::GET, "/api/admin-messages", Some(&user), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Maintenance");
}
