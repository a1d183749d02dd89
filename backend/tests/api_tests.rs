use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use coop_backend::{build_app_state, config::Config, create_router, storage::DbConnection};

const SECRET: &str = "integration-secret-0123456789abcdef";

async fn setup_app() -> Router {
    let db = DbConnection::init_test().await.expect("Failed to create test database");
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        listen: "127.0.0.1:0".parse().unwrap(),
        jwt_secret: SECRET.to_string(),
        token_ttl_hours: 24,
        frontend_url: "http://localhost:5173".to_string(),
        request_timeout_secs: 30,
        secure_cookies: false,
    };
    let state = build_app_state(db, &config).expect("Failed to build app state");
    create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, set_cookie, json)
}

/// Register an admin and return the `jwt=...` cookie pair
async fn login(app: &Router) -> String {
    let (status, set_cookie, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/register-admin",
        None,
        Some(json!({"username": "0105555000001", "password": "hunter2", "fullname": "Somchai Jaidee"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["username"], "0105555000001");

    let set_cookie = set_cookie.expect("register should set a session cookie");
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    set_cookie.split(';').next().unwrap().to_string()
}

fn member_body(member_id: &str, id_card: &str, full_name: &str, shares_value: f64) -> Value {
    json!({
        "cooperativeId": "0105555000001",
        "idCard": id_card,
        "accountYear": "2568",
        "memberId": member_id,
        "fullName": full_name,
        "nationality": "ไทย",
        "sharesNum": shares_value / 10.0,
        "sharesValue": shares_value,
        "joiningDate": "2025-01-15",
        "memberType": 1,
        "leavingDate": "",
        "address": "1",
        "moo": 2,
        "subdistrict": "Suthep",
        "district": "Mueang Chiang Mai",
        "province": "Chiang Mai"
    })
}

#[tokio::test]
async fn test_health() {
    let app = setup_app().await;
    let (status, _, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OK");
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = setup_app().await;

    let (status, _, _) = send(&app, Method::GET, "/api/v1/protected/dashboard/overview", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(&app, Method::GET, "/api/v1/protected/members", Some("jwt=garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_me_and_logout() {
    let app = setup_app().await;
    let cookie = login(&app).await;

    let (status, set_cookie, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login-admin",
        None,
        Some(json!({"username": "0105555000001", "password": "hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(set_cookie.unwrap().starts_with("jwt="));

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login-admin",
        None,
        Some(json!({"username": "0105555000001", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = send(&app, Method::GET, "/api/v1/protected/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fullName"], "Somchai Jaidee");

    // The same token is accepted as a Bearer header
    let token = cookie.trim_start_matches("jwt=");
    let request = Request::builder()
        .uri("/api/v1/protected/me")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, set_cookie, _) = send(&app, Method::POST, "/api/v1/protected/logout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(set_cookie.unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_member_crud_and_listing() {
    let app = setup_app().await;
    let cookie = login(&app).await;

    for (member_id, id_card, name) in [("10", "1000000000010", "Malee Sookjai"), ("9", "1000000000009", "Somsak Deejai")] {
        let (status, _, body) = send(
            &app,
            Method::POST,
            "/api/v1/protected/members",
            Some(&cookie),
            Some(member_body(member_id, id_card, name, 15000.0)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["accountYear"], "2025");
    }

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/v1/protected/members",
        Some(&cookie),
        Some(member_body("11", "1000000000010", "Someone Else", 1.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _, body) = send(
        &app,
        Method::GET,
        "/api/v1/protected/members?page=1&limit=abc&subdistrict=all",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["pagination"]["limit"], 20);
    assert_eq!(body["pagination"]["totalPages"], 1);
    assert_eq!(body["data"][0]["memberId"], "9");
    assert_eq!(body["data"][1]["memberId"], "10");

    let id = body["data"][0]["id"].as_str().unwrap().to_string();
    let (status, _, _) = send(&app, Method::DELETE, &format!("/api/v1/protected/members/{}", id), Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = send(&app, Method::GET, &format!("/api/v1/protected/members/{}", id), Some(&cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, Method::GET, "/api/v1/protected/members/not-a-uuid", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Name search folds non-ASCII case
    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/v1/protected/members",
        Some(&cookie),
        Some(member_body("12", "1000000000012", "ÉMILE Zola", 500.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _, body) = send(
        &app,
        Method::GET,
        "/api/v1/protected/members?fullName=%C3%A9mile",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["fullName"], "ÉMILE Zola");
}

#[tokio::test]
async fn test_dashboard_overview() {
    let app = setup_app().await;
    let cookie = login(&app).await;

    let members = [
        ("1", "1000000000001", "Member One", 5000.0),
        ("2", "1000000000002", "Member Two", 15000.0),
        ("3", "1000000000003", "Member Three", 150000.0),
    ];
    for (member_id, id_card, name, value) in members {
        let (status, _, _) = send(
            &app,
            Method::POST,
            "/api/v1/protected/members",
            Some(&cookie),
            Some(member_body(member_id, id_card, name, value)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _, body) = send(
        &app,
        Method::GET,
        "/api/v1/protected/dashboard/overview?accountYear=2568&subdistrict=all",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kpi"]["totalMembers"], 3);
    assert_eq!(body["kpi"]["totalShares"], 170000.0);
    assert_eq!(body["kpi"]["averageSharesPerPerson"], 56666.67);

    let buckets = body["charts"]["sharesDistribution"].as_array().unwrap();
    assert_eq!(buckets.len(), 4);
    assert_eq!(buckets[0]["bucket"], "< 1หมื่น");
    assert_eq!(buckets[0]["memberCount"], 1);
    assert_eq!(buckets[0]["percentage"], 33.0);
    assert_eq!(buckets[2]["memberCount"], 0);

    assert_eq!(body["charts"]["membershipGrowth"][0]["year"], 2568);
    assert_eq!(body["charts"]["memberCountBySubdistrict"][0]["percent"], 100.0);

    let (status, _, body) = send(
        &app,
        Method::GET,
        "/api/v1/protected/dashboard/overview?accountYear=abcd",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    // Only a missing parameter or the exact "all" lifts the year constraint
    for uri in [
        "/api/v1/protected/dashboard/overview?accountYear=",
        "/api/v1/protected/dashboard/overview?accountYear=%20all%20",
        "/api/v1/protected/dashboard/overview?accountYear=%202568",
    ] {
        let (status, _, _) = send(&app, Method::GET, uri, Some(&cookie), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }

    let (status, _, body) = send(&app, Method::GET, "/api/v1/protected/dashboard/overview", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kpi"]["totalMembers"], 3);
}

#[tokio::test]
async fn test_career_and_dropdown_routes() {
    let app = setup_app().await;
    let cookie = login(&app).await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/api/v1/protected/career/categories",
        Some(&cookie),
        Some(json!({"categoryName": "Farming"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/api/v1/protected/career/subcategories",
        Some(&cookie),
        Some(json!({"categoryId": category_id, "subCategoryName": "Rice", "subNetProfit": 12000.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/protected/career/categories/{}/subcategories?page=1&limit=5", category_id),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["subCategoryName"], "Rice");

    let (status, _, body) = send(&app, Method::GET, "/api/v1/protected/career/categories", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["subCategory"][0]["subNetProfit"], 12000.0);

    let (status, _, body) = send(&app, Method::GET, "/api/v1/protected/dropdown/full", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["subDistricts"].as_array().unwrap().is_empty());
}
