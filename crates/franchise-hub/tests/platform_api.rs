//! Integration specifications for the platform's HTTP surface.
//!
//! Scenarios run against the real SQLite store (in memory) through the
//! composed routers, so registration, login, the calculator, applications,
//! and favorites are exercised exactly as the service binary wires them.

mod common {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::Router;
    use serde_json::Value;

    use franchise_hub::accounts::{account_router, AccountService};
    use franchise_hub::applications::{application_router, ApplicationService};
    use franchise_hub::catalog::{catalog_router, FranchiseRepository, NewFranchise};
    use franchise_hub::favorites::favorite_router;
    use franchise_hub::projections::{projection_router, ProjectionService};
    use franchise_hub::store::SqliteStore;

    pub(super) fn build_platform() -> Router {
        let store = SqliteStore::open_in_memory().expect("store opens");

        seed_catalog(&store);

        let accounts = Arc::new(AccountService::new(Arc::new(store.users())));
        let franchises = Arc::new(store.franchises());
        let projections = Arc::new(ProjectionService::with_delay(
            Arc::new(store.calculations()),
            franchises.clone(),
            Duration::ZERO,
        ));
        let applications = Arc::new(ApplicationService::new(Arc::new(store.applications())));
        let favorites = Arc::new(store.favorites());

        account_router(accounts)
            .merge(catalog_router(franchises))
            .merge(projection_router(projections))
            .merge(application_router(applications))
            .merge(favorite_router(favorites))
    }

    fn seed_catalog(store: &SqliteStore) {
        store
            .franchises()
            .insert(NewFranchise {
                name: "Coffee Point".to_string(),
                description: "Compact espresso bar".to_string(),
                investment_amount: 1_200_000,
                format: "island".to_string(),
                conditions: "5% royalty".to_string(),
                contact_info: "sales@coffeepoint.example".to_string(),
                template_path: None,
                created_by: None,
            })
            .expect("catalog seeded");
    }

    pub(super) fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
            .expect("request")
    }

    pub(super) fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}

mod accounts {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn register_login_and_duplicate_rejection() {
        let platform = build_platform();
        let credentials = json!({ "email": "a@x.com", "password": "p", "name": "A" });

        let registered = platform
            .clone()
            .oneshot(json_request("POST", "/api/register", &credentials))
            .await
            .expect("register dispatch");
        assert_eq!(registered.status(), StatusCode::OK);
        let payload = read_json_body(registered).await;
        assert_eq!(
            payload.pointer("/user/email"),
            Some(&json!("a@x.com")),
        );
        assert_eq!(payload.pointer("/user/role"), Some(&json!("user")));

        let duplicate = platform
            .clone()
            .oneshot(json_request("POST", "/api/register", &credentials))
            .await
            .expect("duplicate dispatch");
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

        let login = platform
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/login",
                &json!({ "email": "a@x.com", "password": "p" }),
            ))
            .await
            .expect("login dispatch");
        assert_eq!(login.status(), StatusCode::OK);

        let wrong = platform
            .oneshot(json_request(
                "POST",
                "/api/login",
                &json!({ "email": "a@x.com", "password": "q" }),
            ))
            .await
            .expect("login dispatch");
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_fields_are_a_bad_request() {
        let platform = build_platform();

        let response = platform
            .oneshot(json_request(
                "POST",
                "/api/register",
                &serde_json::json!({ "email": "a@x.com" }),
            ))
            .await
            .expect("register dispatch");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod catalog {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn the_catalog_lists_seeded_franchises() {
        let platform = build_platform();

        let response = platform
            .oneshot(get_request("/api/franchises"))
            .await
            .expect("listing dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let rows = payload.as_array().expect("array body");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&json!("Coffee Point")));
        assert_eq!(rows[0].get("investment_amount"), Some(&json!(1_200_000)));
    }
}

mod projections {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn calculate_persists_into_the_user_history() {
        let platform = build_platform();

        let calculated = platform
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/calculate",
                &json!({
                    "userId": 1,
                    "franchiseId": 1,
                    "inputData": { "workers": 5, "shiftTime": 8, "shifts": 2, "salary": 200 },
                }),
            ))
            .await
            .expect("calculate dispatch");
        assert_eq!(calculated.status(), StatusCode::OK);
        let payload = read_json_body(calculated).await;
        assert_eq!(payload.get("success"), Some(&json!(true)));
        assert_eq!(payload.get("franchise"), Some(&json!("Coffee Point")));
        assert_eq!(
            payload.pointer("/result/net_profit"),
            Some(&json!(-1_800_000)),
        );
        assert_eq!(payload.pointer("/result/roi"), Some(&json!(-360.0)));

        let history = platform
            .oneshot(get_request("/api/users/1/calculations"))
            .await
            .expect("history dispatch");
        assert_eq!(history.status(), StatusCode::OK);
        let rows = read_json_body(history).await;
        assert_eq!(rows.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn calculating_against_a_missing_franchise_is_not_found() {
        let platform = build_platform();

        let response = platform
            .oneshot(json_request(
                "POST",
                "/api/calculate",
                &json!({ "userId": 1, "franchiseId": 999 }),
            ))
            .await
            .expect("calculate dispatch");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod applications {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn the_full_application_lifecycle() {
        let platform = build_platform();

        let submitted = platform
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/applications",
                &json!({ "userId": 1, "franchiseId": 1, "message": "call me" }),
            ))
            .await
            .expect("submit dispatch");
        assert_eq!(submitted.status(), StatusCode::OK);
        let payload = read_json_body(submitted).await;
        let application_id = payload
            .get("applicationId")
            .and_then(serde_json::Value::as_i64)
            .expect("application id");

        let mine = platform
            .clone()
            .oneshot(get_request("/api/users/1/applications"))
            .await
            .expect("listing dispatch");
        assert_eq!(mine.status(), StatusCode::OK);
        let rows = read_json_body(mine).await;
        assert_eq!(
            rows.as_array().expect("array")[0].get("franchise_name"),
            Some(&json!("Coffee Point")),
        );
        assert_eq!(
            rows.as_array().expect("array")[0].get("status"),
            Some(&json!("pending")),
        );

        let uri = format!("/api/applications/{application_id}");
        let approved = platform
            .clone()
            .oneshot(json_request("PATCH", &uri, &json!({ "status": "approved" })))
            .await
            .expect("moderation dispatch");
        assert_eq!(approved.status(), StatusCode::OK);

        let repeated = platform
            .clone()
            .oneshot(json_request("PATCH", &uri, &json!({ "status": "rejected" })))
            .await
            .expect("moderation dispatch");
        assert_eq!(repeated.status(), StatusCode::CONFLICT);

        let invalid = platform
            .clone()
            .oneshot(json_request("PATCH", &uri, &json!({ "status": "cancelled" })))
            .await
            .expect("moderation dispatch");
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let missing = platform
            .oneshot(json_request(
                "PATCH",
                "/api/applications/999",
                &json!({ "status": "approved" }),
            ))
            .await
            .expect("moderation dispatch");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}

mod favorites {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn bookmarks_are_unique_per_user_and_franchise() {
        let platform = build_platform();
        let pair = json!({ "userId": 1, "franchiseId": 1 });

        let added = platform
            .clone()
            .oneshot(json_request("POST", "/api/favorites", &pair))
            .await
            .expect("favorite dispatch");
        assert_eq!(added.status(), StatusCode::OK);

        let duplicate = platform
            .clone()
            .oneshot(json_request("POST", "/api/favorites", &pair))
            .await
            .expect("favorite dispatch");
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let mine = platform
            .clone()
            .oneshot(get_request("/api/users/1/favorites"))
            .await
            .expect("listing dispatch");
        let rows = read_json_body(mine).await;
        assert_eq!(rows.as_array().map(Vec::len), Some(1));

        let removed = platform
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .method("DELETE")
                    .uri("/api/users/1/favorites/1")
                    .body(axum::body::Body::empty())
                    .expect("request"),
            )
            .await
            .expect("removal dispatch");
        assert_eq!(removed.status(), StatusCode::OK);

        let missing = platform
            .oneshot(
                axum::http::Request::builder()
                    .method("DELETE")
                    .uri("/api/users/1/favorites/1")
                    .body(axum::body::Body::empty())
                    .expect("request"),
            )
            .await
            .expect("removal dispatch");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
