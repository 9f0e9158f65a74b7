use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Map, Value};
use std::time::Instant;

use crate::state::AppState;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_FIELDS: [&str; 9] = [
    "psw",
    "password",
    "password1",
    "password2",
    "old_password",
    "new_password1",
    "new_password2",
    "token",
    "secret",
];

const SENSITIVE_HEADERS: [header::HeaderName; 3] =
    [header::AUTHORIZATION, header::COOKIE, header::SET_COOKIE];

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/")
}

fn filter_sensitive_data(mut value: Value) -> Value {
    if let Value::Object(ref mut map) = value {
        for field in SENSITIVE_FIELDS {
            if map.contains_key(field) {
                map.insert(field.to_string(), Value::String(REDACTED.to_string()));
            }
        }
    }
    value
}

fn filter_sensitive_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered_headers = headers.clone();
    for name in SENSITIVE_HEADERS {
        if filtered_headers.contains_key(&name) {
            filtered_headers.insert(name, HeaderValue::from_static(REDACTED));
        }
    }
    filtered_headers
}

/// Turns `a=1&b=2&b=3` into `{"a": "1", "b": ["2", "3"]}`.
fn form_to_json(body: &[u8]) -> Value {
    let mut map = Map::new();
    for (key, value) in form_urlencoded::parse(body) {
        let value = Value::String(value.into_owned());

        match map.get_mut(key.as_ref()) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(key.into_owned(), value);
            }
        }
    }
    Value::Object(map)
}

fn body_to_json(content_type: Option<&str>, bytes: &Bytes) -> Value {
    let parsed = match content_type {
        Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => form_to_json(bytes),
        _ => serde_json::from_slice::<Value>(bytes).unwrap_or_else(|_| Value::Object(Map::new())),
    };
    filter_sensitive_data(parsed)
}

pub async fn http_logger(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    let start_time = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path();
    let version = req.version();
    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if should_ignore_path(path) || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let content_type = req_headers
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok());

    let (parts, body) = req.into_parts();
    let bytes = buffer_body("request", body).await?;
    let req_body = body_to_json(content_type, &bytes);

    let req = Request::from_parts(parts, Body::from(bytes));

    let mut response = next.run(req).await;

    let latency = start_time.elapsed();

    let status = response.status();
    let res_headers = response.headers().clone();

    let should_log_body = matches!(method, Method::POST) && !status.is_redirection();
    let res_body = if should_log_body {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let json_body = body_to_json(None, &bytes);
        response = Response::from_parts(parts, Body::from(bytes));
        json_body
    } else {
        Value::Object(Map::new())
    };

    let filtered_req_headers = filter_sensitive_headers(&req_headers);
    let filtered_res_headers = filter_sensitive_headers(&res_headers);

    tracing::info!(
        method = ?method,
        uri = ?uri,
        path = %path,
        x_request_id = %x_request_id,
        version = ?version,
        req_headers = ?filtered_req_headers,
        req_body = %req_body,
        status = ?status,
        latency_ms = latency.as_millis(),
        latency_micros = latency.as_micros(),
        res_headers = ?filtered_res_headers,
        res_body = %res_body,
        app_env = %state.settings.app_env,
        "HTTP request completed"
    );

    Ok(response)
}

pub async fn buffer_body<B>(
    direction: &str,
    body: B,
) -> std::result::Result<Bytes, (StatusCode, String)>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("failed to read {direction} body: {err}"),
            ));
        }
    };

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_password_is_redacted() {
        let body = Bytes::from_static(b"uname=jan+kowalski&psw=s%C5%82o%C5%84ce");
        let value = body_to_json(Some("application/x-www-form-urlencoded"), &body);
        assert_eq!(value["uname"], "jan kowalski");
        assert_eq!(value["psw"], REDACTED);
    }

    #[test]
    fn repeated_keys_become_arrays() {
        let value = form_to_json(b"subjects=1&subjects=2&name=3B");
        assert_eq!(value["subjects"], serde_json::json!(["1", "2"]));
        assert_eq!(value["name"], "3B");
    }

    #[test]
    fn form_values_decode_like_the_form_extractor() {
        let value = form_to_json(b"note=a%2Bb+c&flag&last%5Fname=Nowak");
        assert_eq!(value["note"], "a+b c");
        assert_eq!(value["flag"], "");
        assert_eq!(value["last_name"], "Nowak");
    }

    #[test]
    fn cookies_are_redacted_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sms_session=abc"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        let filtered = filter_sensitive_headers(&headers);
        assert_eq!(filtered.get(header::COOKIE).unwrap(), REDACTED);
        assert_eq!(filtered.get(header::ACCEPT).unwrap(), "*/*");
    }
}
