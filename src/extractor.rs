use axum::{
    extract::FromRequestParts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use http::request::Parts;

use crate::config::SESSION_COOKIE;
use crate::error::AppError;
use crate::forms::redirect_to;
use crate::repositories::{SessionRepository, UserRepository};
use crate::state::AppState;
use crate::utils::jwt::{JwtManager, SessionClaims};

/// The logged-in user behind a gated request.
///
/// Requests without a valid session are sent back to the login page, which
/// receives the original path in `index`.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: i32,
    pub username: String,
    pub claims: SessionClaims,
}

impl SessionUser {
    /// Resolves the session cookie in `jar`, if any, to an active user.
    ///
    /// Missing, forged, expired and revoked tokens all yield `Ok(None)`.
    pub async fn from_jar(jar: &CookieJar, state: &AppState) -> Result<Option<Self>, AppError> {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(None);
        };

        let jwt_manager = JwtManager::new(&state.settings.jwt_secret);
        let claims = match jwt_manager.decode_jwt(cookie.value()) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Rejected session cookie: {:#}", e);
                return Ok(None);
            }
        };

        if SessionRepository::new(&state.db)
            .is_revoked(&claims.jti)
            .await?
        {
            return Ok(None);
        }

        let Ok(user_id) = claims.user_id() else {
            return Ok(None);
        };

        let user = UserRepository::new(&state.db).find_by_id(user_id).await?;

        Ok(user
            .filter(|user| user.is_active)
            .map(|user| SessionUser {
                user_id: user.user_id,
                username: user.username,
                claims,
            }))
    }
}

pub fn login_redirect(path: &str) -> Response {
    redirect_to(&format!("/?index={}", urlencoding::encode(path)))
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        match SessionUser::from_jar(&jar, state).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(login_redirect(parts.uri.path())),
            Err(e) => Err(e.into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{StatusCode, header};

    #[test]
    fn login_redirect_keeps_the_requested_path() {
        let response = login_redirect("/student/list");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/?index=%2Fstudent%2Flist"
        );
    }
}
