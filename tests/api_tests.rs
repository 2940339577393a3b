use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use marquee::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("marquee-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = marquee::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    marquee::api::router(state).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    api_key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-Api-Key", key);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Registers `username` and returns its API key.
async fn register_and_login(app: &Router, username: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "full_name": "Test User",
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["api_key"].as_str().unwrap().to_string()
}

async fn create_movie(app: &Router, api_key: &str, title: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/movies",
        Some(api_key),
        Some(json!({
            "title": title,
            "cast": "Lead",
            "director": "Someone",
            "year_released": 1995,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["average_rating"], Value::Null);
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_auth_endpoints() {
    let app = spawn_app().await;

    let (status, body) = send(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::GET, "/api/auth/me", Some("wrong-key"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let api_key = register_and_login(&app, "ripley").await;
    assert_eq!(api_key.len(), 64);

    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&api_key), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "ripley");
    assert!(body["data"].get("api_key").is_none());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {api_key}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "ripley", "password": "not-the-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_login() {
    let app = spawn_app().await;
    register_and_login(&app, "dallas").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "username": "dallas", "password": "password123" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("login should set a session cookie")
        .to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_registration_validation() {
    let app = spawn_app().await;
    register_and_login(&app, "kane").await;

    for payload in [
        json!({ "username": "kane", "email": "new@example.com", "full_name": "K", "password": "password123" }),
        json!({ "username": "kane2", "email": "kane@example.com", "full_name": "K", "password": "password123" }),
        json!({ "username": "bad name", "email": "b@example.com", "full_name": "K", "password": "password123" }),
        json!({ "username": "noemail", "email": "nowhere", "full_name": "K", "password": "password123" }),
        json!({ "username": "short", "email": "s@example.com", "full_name": "K", "password": "123" }),
    ] {
        let (status, body) = send(&app, Method::POST, "/api/auth/register", None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }
}

#[tokio::test]
async fn test_movie_endpoints() {
    let app = spawn_app().await;
    let owner = register_and_login(&app, "owner").await;
    let other = register_and_login(&app, "other").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/movies",
        None,
        Some(json!({ "title": "Anon", "cast": "x", "year_released": 2000 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/movies",
        Some(&owner),
        Some(json!({ "title": "", "cast": "x", "year_released": 2000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = create_movie(&app, &owner, "Alien").await;
    create_movie(&app, &other, "Aliens").await;

    let (status, body) = send(&app, Method::GET, "/api/movies", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, Method::GET, "/api/movies?skip=1&limit=1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Aliens");

    for uri in ["/api/movies?limit=0", "/api/movies?limit=101"] {
        let (status, _) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }

    let (status, body) = send(&app, Method::GET, "/api/movies/search?search=Alien", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, Method::GET, "/api/movies/mine", Some(&other), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Aliens");

    let (status, body) = send(&app, Method::GET, &format!("/api/movies/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Alien");

    let (status, _) = send(&app, Method::GET, "/api/movies/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let update = json!({ "title": "Alien (Director's Cut)", "cast": "Weaver", "year_released": 2003 });
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/movies/{id}"),
        Some(&other),
        Some(update.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/movies/{id}"),
        Some(&owner),
        Some(update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["year_released"], 2003);

    let (status, _) = send(&app, Method::DELETE, "/api/movies/999", Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/movies/{id}"), Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/movies/{id}"), Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &format!("/api/movies/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rating_endpoints() {
    let app = spawn_app().await;
    let owner = register_and_login(&app, "owner").await;
    let alice = register_and_login(&app, "alice").await;
    let bob = register_and_login(&app, "bob").await;
    let id = create_movie(&app, &owner, "Rated").await;
    let ratings_uri = format!("/api/movies/{id}/ratings");

    let (status, body) = send(&app, Method::POST, &ratings_uri, Some(&alice), Some(json!({ "rating": 4.0 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["rating"], 4.0);
    assert_eq!(body["data"]["movie_id"], id);
    assert!(body["data"].get("average_rating").is_none());
    let alice_rating = body["data"]["id"].as_i64().unwrap();

    let (_, body) = send(&app, Method::GET, &format!("/api/movies/{id}"), None, None).await;
    assert_eq!(body["data"]["average_rating"], 4.0);

    let (status, _) = send(&app, Method::POST, &ratings_uri, Some(&alice), Some(json!({ "rating": 2.0 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::POST, &ratings_uri, Some(&bob), Some(json!({ "rating": 5.01 }))).await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);

    let (status, body) = send(&app, Method::POST, &ratings_uri, Some(&bob), Some(json!({ "rating": 5.0 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["rating"], 5.0);

    let (_, body) = send(&app, Method::GET, &format!("/api/movies/{id}"), None, None).await;
    assert_eq!(body["data"]["average_rating"], 4.5);

    let (status, _) = send(&app, Method::POST, "/api/movies/999/ratings", Some(&bob), Some(json!({ "rating": 3.0 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, &ratings_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/movies/{id}"), Some(&owner), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let rating_uri = format!("/api/ratings/{alice_rating}");
    let (status, _) = send(&app, Method::DELETE, &rating_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::DELETE, &rating_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], format!("Rating {alice_rating} deleted"));

    let (status, _) = send(&app, Method::DELETE, &rating_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, &format!("/api/movies/{id}"), None, None).await;
    assert_eq!(body["data"]["average_rating"], 5.0);
}

#[tokio::test]
async fn test_comment_endpoints() {
    let app = spawn_app().await;
    let u1 = register_and_login(&app, "u1").await;
    let u2 = register_and_login(&app, "u2").await;
    let id = create_movie(&app, &u1, "Discussed").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/movies/{id}/comments"),
        Some(&u1),
        Some(json!({ "comment": "great film" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["username"], "u1");
    assert_eq!(body["data"]["movie"]["title"], "Discussed");
    let comment_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/comments/{comment_id}/replies"),
        Some(&u2),
        Some(json!({ "reply": "agreed" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"].as_i64(), Some(comment_id));
    assert_eq!(body["data"]["replies"][0]["reply"], "agreed");
    assert_eq!(body["data"]["replies"][0]["original_comment"], "great film");
    let reply_id = body["data"]["replies"][0]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/comments/999/replies",
        Some(&u2),
        Some(json!({ "reply": "hello?" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, &format!("/api/movies/{id}/comments"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["replies"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/api/movies/999/comments", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/replies/{reply_id}"), Some(&u1), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/comments/{comment_id}"), Some(&u2), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/movies/{id}"), Some(&u1), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/comments/{comment_id}"), Some(&u1), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/replies/{reply_id}"), Some(&u2), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, &format!("/api/movies/{id}/comments"), None, None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
