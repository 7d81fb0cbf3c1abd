pub mod api;
pub mod auth;
pub mod web;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{auth::require_auth, state::AppState};

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let protected_routes = Router::new()
        .route("/dashboard", get(web::dashboard_page))
        .route("/map/{disaster}", get(web::map_page))
        .layer(from_fn_with_state(state.clone(), require_auth));

    let public_routes = Router::new()
        .route("/", get(web::index))
        .route("/signup", get(web::signup_page).post(auth::signup))
        .route("/login", get(web::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/api/disaster/{disaster}", get(api::disaster_data));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use axum::{
        body::Body,
        http::{
            header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
            Request, Response,
        },
    };
    use tower::ServiceExt;

    use crate::{
        config::Config,
        database::{create_memory_pool, users, DbPool},
        disaster::DisasterPoint,
    };

    async fn test_app() -> (Router, DbPool) {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let mut config = Config::new("test-secret", ":memory:");
        config.template_dir = root.join("templates");
        config.static_dir = root.join("static");

        let pool = create_memory_pool().await.unwrap();
        (router(AppState::new(config, pool.clone())), pool)
    }

    fn get_req(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn form_req(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_string(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn session_set_cookie(response: &Response<Body>) -> Option<String> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("session="))
            .map(str::to_owned)
    }

    /// `name=value` part of the session Set-Cookie, ready for a Cookie header.
    fn session_pair(response: &Response<Body>) -> String {
        let header = session_set_cookie(response).expect("session cookie");
        header.split(';').next().unwrap().to_owned()
    }

    fn assert_redirect(response: &Response<Body>, to: &str) {
        assert!(response.status().is_redirection(), "status {}", response.status());
        assert_eq!(response.headers()[LOCATION], to);
    }

    async fn signup_and_login(app: &Router, username: &str, password: &str) -> String {
        let body = format!("username={username}&password={password}");
        let response = app.clone().oneshot(form_req("/signup", &body)).await.unwrap();
        assert_redirect(&response, "/login");

        let response = app.clone().oneshot(form_req("/login", &body)).await.unwrap();
        assert_redirect(&response, "/dashboard");
        session_pair(&response)
    }

    #[tokio::test]
    async fn test_root_redirects_to_login() {
        let (app, _) = test_app().await;
        let response = app.oneshot(get_req("/", None)).await.unwrap();
        assert_redirect(&response, "/login");
    }

    #[tokio::test]
    async fn test_forms_render() {
        let (app, _) = test_app().await;

        for (uri, action) in [("/signup", "/signup"), ("/login", "/login")] {
            let response = app.clone().oneshot(get_req(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = body_string(response).await;
            assert!(body.contains(&format!("action=\"{action}\"")), "{body}");
        }
    }

    #[tokio::test]
    async fn test_full_session_flow() {
        let (app, _) = test_app().await;
        let cookie = signup_and_login(&app, "alice", "pw123").await;

        let response = app.clone().oneshot(get_req("/dashboard", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("alice"));

        let response = app.clone().oneshot(get_req("/map/Fire", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("initDisasterMap(\"Fire\")"));

        let response = app.clone().oneshot(get_req("/logout", Some(&cookie))).await.unwrap();
        assert_redirect(&response, "/login");
        let removal = session_set_cookie(&response).expect("removal cookie");
        assert!(removal.contains("Max-Age=0"), "{removal}");
    }

    #[tokio::test]
    async fn test_logout_only_drops_the_client_cookie() {
        let (app, _) = test_app().await;
        let cookie = signup_and_login(&app, "alice", "pw123").await;

        let response = app.clone().oneshot(get_req("/logout", Some(&cookie))).await.unwrap();
        assert_redirect(&response, "/login");

        // no server-side session store: a copy kept from before logout still verifies
        let response = app.clone().oneshot(get_req("/dashboard", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // a browser that honoured the removal cookie is anonymous again
        let response = app.oneshot(get_req("/dashboard", None)).await.unwrap();
        assert_redirect(&response, "/login");
    }

    #[tokio::test]
    async fn test_logout_without_session_still_redirects() {
        let (app, _) = test_app().await;
        let response = app.oneshot(get_req("/logout", None)).await.unwrap();
        assert_redirect(&response, "/login");
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_plain_text_warning() {
        let (app, pool) = test_app().await;
        signup_and_login(&app, "alice", "pw123").await;

        let response = app
            .clone()
            .oneshot(form_req("/signup", "username=alice&password=other"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Username already exists!"));
        assert_eq!(users::count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_wrong_password_sets_no_session() {
        let (app, _) = test_app().await;
        signup_and_login(&app, "alice", "pw123").await;

        for body in ["username=alice&password=nope", "username=ghost&password=pw123"] {
            let response = app.clone().oneshot(form_req("/login", body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(session_set_cookie(&response).is_none());
            assert!(body_string(response).await.contains("Invalid credentials!"));
        }
    }

    #[tokio::test]
    async fn test_protected_routes_redirect_anonymous() {
        let (app, _) = test_app().await;

        for uri in ["/dashboard", "/map/fire", "/map/atlantis"] {
            let response = app.clone().oneshot(get_req(uri, None)).await.unwrap();
            assert_redirect(&response, "/login");
        }
    }

    #[tokio::test]
    async fn test_tampered_cookie_is_anonymous() {
        let (app, _) = test_app().await;
        let cookie = signup_and_login(&app, "alice", "pw123").await;

        // swap the signed payload for another user's name, keep the signature
        let (prefix, _) = cookie.split_at(cookie.len() - "alice".len() * 2);
        let forged = format!("{prefix}{}", "mallory".bytes().map(|b| format!("{:02x}", b)).collect::<String>());

        let response = app.clone().oneshot(get_req("/dashboard", Some(&forged))).await.unwrap();
        assert_redirect(&response, "/login");

        let response = app.oneshot(get_req("/dashboard", Some("session=alice"))).await.unwrap();
        assert_redirect(&response, "/login");
    }

    #[tokio::test]
    async fn test_cookie_from_another_secret_is_rejected() {
        let (app, _) = test_app().await;
        let cookie = signup_and_login(&app, "alice", "pw123").await;

        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let mut config = Config::new("another-secret", ":memory:");
        config.template_dir = root.join("templates");
        let other = router(AppState::new(config, create_memory_pool().await.unwrap()));

        let response = other.oneshot(get_req("/dashboard", Some(&cookie))).await.unwrap();
        assert_redirect(&response, "/login");
    }

    #[tokio::test]
    async fn test_disaster_api_needs_no_session() {
        let (app, _) = test_app().await;

        for (category, expected) in [("fire", 250), ("EARTHQUAKE", 375), ("atlantis", 25)] {
            let uri = format!("/api/disaster/{category}");
            let response = app.clone().oneshot(get_req(&uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

            let body = body_string(response).await;
            let points: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
            assert_eq!(points.len(), expected, "{category}");
            for p in &points {
                assert!(p["lat"].is_f64() && p["lon"].is_f64() && p["chance"].is_f64());
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_category_points_near_default_center() {
        let (app, _) = test_app().await;
        let response = app.oneshot(get_req("/api/disaster/atlantis", None)).await.unwrap();
        let body = body_string(response).await;

        let points: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(&body).unwrap();
        for p in points {
            let point = DisasterPoint {
                lat: p["lat"].as_f64().unwrap(),
                lon: p["lon"].as_f64().unwrap(),
                chance: p["chance"].as_f64().unwrap(),
            };
            assert!((point.lat - 20.0).abs() <= 5.0);
            assert!(point.lon.abs() <= 5.0);
            assert!((40.0..100.0).contains(&point.chance));
        }
    }

    #[tokio::test]
    async fn test_static_script_and_unknown_paths() {
        let (app, _) = test_app().await;

        let response = app.clone().oneshot(get_req("/static/script.js", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("initDisasterMap"));

        for uri in ["/nowhere", "/favicon.ico"] {
            let response = app.clone().oneshot(get_req(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }
}
