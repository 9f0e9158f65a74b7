#![allow(dead_code)]

use axum::{Router, body::Body};
use http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use sms::app::create_app;
use sms::config::{AppSettings, SESSION_COOKIE};
use sms::db::{get_database_connection, run_migrations};
use sms::repositories::UserRepository;
use sms::state::AppState;

pub const USERNAME: &str = "secretary";
pub const PASSWORD: &str = "correct horse";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

fn test_settings() -> AppSettings {
    AppSettings {
        jwt_secret: "integration-test-secret".to_string(),
        session_ttl_seconds: 3600,
        cookie_secure: false,
        bcrypt_cost: 4,
        openapi_enabled: true,
        cors_allowed_origins: "*".to_string(),
        app_env: "test".to_string(),
    }
}

/// Fresh in-memory database with the schema applied and one login account.
pub async fn spawn_app() -> TestApp {
    let db = get_database_connection("sqlite::memory:").await.unwrap();
    run_migrations(&db).await.unwrap();

    let password_hash = bcrypt::hash(PASSWORD, 4).unwrap();
    UserRepository::new(&db)
        .create(USERNAME.to_string(), password_hash)
        .await
        .unwrap();

    let router = create_app(AppState::new(db.clone(), test_settings())).unwrap();
    TestApp { router, db }
}

pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// `name=value` of the session cookie set by `response`, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE}=")))
        .filter(|pair| pair.len() > SESSION_COOKIE.len() + 1)
        .map(str::to_string)
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

impl TestApp {
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::from(encode_form(fields))).unwrap())
            .await
            .unwrap()
    }

    pub async fn login_as(&self, username: &str, password: &str) -> Response<Body> {
        self.post_form("/", &[("uname", username), ("psw", password)], None)
            .await
    }

    /// Logs in the seeded account and returns its session cookie.
    pub async fn login(&self) -> String {
        let response = self.login_as(USERNAME, PASSWORD).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        session_cookie(&response).expect("login sets the session cookie")
    }

    /// Creates an object through its form and asserts the redirect.
    pub async fn create(&self, uri: &str, fields: &[(&str, &str)], cookie: &str) {
        let response = self.post_form(uri, fields, Some(cookie)).await;
        let status = response.status();
        if status != StatusCode::FOUND {
            panic!("POST {uri} failed with {status}: {}", text_body(response).await);
        }
    }
}
