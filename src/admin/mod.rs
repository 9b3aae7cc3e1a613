mod login;
mod logout;
mod participants;
mod regenerate;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login::login))
        .route("/logout", post(logout::logout))
        .route("/check-session", get(logout::check_session))
        .route("/participants", get(participants::participants))
        .route("/regenerate", post(regenerate::regenerate))
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::{
        body::Body,
        extract::ConnectInfo,
        http::{header, Method, Request, StatusCode},
        response::Response,
        Router,
    };
    use serde_json::json;

    use crate::testing::{admin_cookie, json_body, send, send_request, session_cookie, test_app, test_app_with};

    /// A login attempt as it arrives from `peer`, optionally through a proxy.
    async fn login_from(app: &Router, peer: &str, forwarded_for: Option<&str>, password: &str) -> Response {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri("/api/admin/login")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(forwarded_for) = forwarded_for {
            request = request.header("x-forwarded-for", forwarded_for);
        }
        let mut request = request
            .body(Body::from(json!({ "password": password }).to_string()))
            .unwrap();
        let peer: SocketAddr = peer.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));
        send_request(app, request).await
    }

    #[tokio::test]
    async fn login_with_the_right_password() {
        let (app, _) = test_app();
        let res = send(&app, Method::POST, "/api/admin/login", None, Some(json!({ "password": "hunter2" }))).await;

        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res).unwrap();
        assert_eq!(json_body(res).await, json!({ "success": true }));

        let res = send(&app, Method::GET, "/api/admin/check-session", Some(&cookie), None).await;
        assert_eq!(json_body(res).await, json!({ "authenticated": true }));
    }

    #[tokio::test]
    async fn login_with_the_wrong_password() {
        let (app, _) = test_app();
        let res = send(&app, Method::POST, "/api/admin/login", None, Some(json!({ "password": "hunter3" }))).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(session_cookie(&res).is_none());
        assert_eq!(json_body(res).await, json!({ "success": false, "message": "Invalid password" }));
    }

    #[tokio::test]
    async fn malformed_passwords_are_rejected() {
        let (app, _) = test_app();
        for body in [json!({}), json!({ "password": "" }), json!({ "password": "x".repeat(101) })] {
            let res = send(&app, Method::POST, "/api/admin/login", None, Some(body)).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(res).await, json!({ "error": "Invalid password format" }));
        }
    }

    #[tokio::test]
    async fn login_is_rate_limited() {
        let (app, _) = test_app();
        for _ in 0..5 {
            let res = send(&app, Method::POST, "/api/admin/login", None, Some(json!({ "password": "guess" }))).await;
            assert_eq!(res.status(), StatusCode::OK);
        }
        let res = send(&app, Method::POST, "/api/admin/login", None, Some(json!({ "password": "hunter2" }))).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn forwarded_for_does_not_dodge_the_limit_without_a_proxy() {
        let (app, _) = test_app();
        for i in 0..5 {
            let spoofed = format!("198.51.100.{i}");
            let res = login_from(&app, "192.0.2.7:40000", Some(&spoofed), "guess").await;
            assert_eq!(res.status(), StatusCode::OK);
        }
        let res = login_from(&app, "192.0.2.7:40001", Some("198.51.100.99"), "hunter2").await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

        let res = login_from(&app, "192.0.2.8:40000", None, "hunter2").await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn behind_a_proxy_only_the_last_hop_counts() {
        let (app, _) = test_app_with(|config| config.trust_proxy = true);
        for i in 0..5 {
            let chain = format!("198.51.100.{i}, 203.0.113.5");
            let res = login_from(&app, "10.0.0.1:8000", Some(&chain), "guess").await;
            assert_eq!(res.status(), StatusCode::OK);
        }
        let res = login_from(&app, "10.0.0.1:8000", Some("198.51.100.99, 203.0.113.5"), "hunter2").await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

        let res = login_from(&app, "10.0.0.1:8000", Some("203.0.113.6"), "hunter2").await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unreadable_login_bodies_are_json_400s() {
        let (app, _) = test_app();

        let res = send(&app, Method::POST, "/api/admin/login", None, Some(json!({ "password": 12345 }))).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await, json!({ "error": "Invalid password format" }));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/admin/login")
            .body(Body::from(r#"{"password":"hunter2"}"#))
            .unwrap();
        let res = send_request(&app, request).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await, json!({ "error": "Invalid password format" }));
    }

    #[tokio::test]
    async fn unreadable_login_bodies_still_count_as_attempts() {
        let (app, _) = test_app();
        for _ in 0..5 {
            let request = Request::builder()
                .method(Method::POST)
                .uri("/api/admin/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap();
            assert_eq!(send_request(&app, request).await.status(), StatusCode::BAD_REQUEST);
        }
        let res = send(&app, Method::POST, "/api/admin/login", None, Some(json!({ "password": "hunter2" }))).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn admin_routes_need_a_session() {
        let (app, _) = test_app();

        let res = send(&app, Method::GET, "/api/admin/participants", None, None).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(res).await, json!({ "error": "Unauthorized" }));

        let res = send(&app, Method::POST, "/api/admin/regenerate", None, None).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = send(&app, Method::GET, "/api/admin/check-session", None, None).await;
        assert_eq!(json_body(res).await, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn regenerate_then_list() {
        let (app, _) = test_app();
        let cookie = admin_cookie(&app).await;

        let res = send(&app, Method::POST, "/api/admin/regenerate", Some(&cookie), None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["success"], true);
        let drawn = body["participants"].as_array().unwrap();
        assert_eq!(drawn.len(), 6);
        let names: Vec<&str> = drawn.iter().map(|p| p["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["Andreas", "Britten", "Dima", "Henrik", "Manivald", "Sasha"]);
        for p in drawn {
            assert_eq!(p["code"].as_str().unwrap().len(), 6);
            assert_ne!(p["gives_to_name"], p["name"]);
        }

        let res = send(&app, Method::GET, "/api/admin/participants", Some(&cookie), None).await;
        assert_eq!(res.status(), StatusCode::OK);
        let rows = json_body(res).await;
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 6);
        for (row, drawn) in rows.iter().zip(drawn) {
            assert_eq!(row["name"], drawn["name"]);
            assert_eq!(row["code"], drawn["code"]);
            assert_eq!(row["gives_to_name"], drawn["gives_to_name"]);
            assert!(row["id"].is_string());
            assert!(row["hint1"].is_null());
        }
    }

    #[tokio::test]
    async fn logout_ends_the_admin_session() {
        let (app, _) = test_app();
        let cookie = admin_cookie(&app).await;

        let res = send(&app, Method::POST, "/api/admin/logout", Some(&cookie), None).await;
        assert_eq!(json_body(res).await, json!({ "success": true }));

        let res = send(&app, Method::GET, "/api/admin/participants", Some(&cookie), None).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
