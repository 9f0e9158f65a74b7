use anyhow::Context;
use axum::{
    Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::{
    CookieJar, Form,
    cookie::{Cookie, SameSite},
};

use super::dto::{ChangePasswordForm, LoginForm, LoginQuery, NewUserForm};
use crate::config::SESSION_COOKIE;
use crate::error::{AppError, is_unique_violation};
use crate::extractor::SessionUser;
use crate::forms::{FormErrors, FormPage, redirect_to};
use crate::repositories::{SessionRepository, UserRepository};
use crate::state::AppState;
use crate::utils::jwt::JwtManager;

const INVALID_CREDENTIALS: &str = "Invalid username or password";
const USERNAME_TAKEN: &str = "A user with that username already exists.";

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page).post(login))
        .route("/logout/", get(logout))
        .route("/new_user/", get(new_user_page).post(create_user))
        .route(
            "/change_password/",
            get(change_password_page).post(change_password),
        )
}

/// Login form
#[utoipa::path(
    get,
    path = "/",
    params(LoginQuery),
    responses(
        (status = 200, description = "Empty login form", body = LoginForm)
    ),
    tag = "Authentication"
)]
pub async fn login_page(Query(query): Query<LoginQuery>) -> FormPage<LoginForm> {
    FormPage::new(LoginForm {
        index: query.index.unwrap_or_default(),
        ..Default::default()
    })
}

/// Log in with username and password, setting the session cookie
#[utoipa::path(
    post,
    path = "/",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in, redirect to the dashboard"),
        (status = 401, description = "Invalid username or password"),
        (status = 422, description = "Missing fields", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(FormPage::new(form).with_errors(errors).invalid()),
    };

    let user_repo = UserRepository::new(&state.db);
    let Some(user) = user_repo.find_by_username(&credentials.username).await? else {
        tracing::warn!("Login failed for unknown user {}", credentials.username);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let password_valid = bcrypt::verify(&credentials.password, &user.password)
        .context("Password verification error")?;

    if !password_valid || !user.is_active {
        tracing::warn!("Login failed for user {}", user.username);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let user = user_repo.record_login(user).await?;

    let jwt_manager = JwtManager::new(&state.settings.jwt_secret);
    let (token, _claims) = jwt_manager.create_jwt(
        user.user_id,
        &user.username,
        state.settings.session_ttl_seconds,
    )?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.settings.cookie_secure);

    tracing::info!("User {} logged in", user.username);

    Ok((jar.add(cookie), redirect_to("/index/")).into_response())
}

/// Log out: revoke the session token and clear the cookie
#[utoipa::path(
    get,
    path = "/logout/",
    responses(
        (status = 302, description = "Logged out, redirect to the login form"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    if let Some(user) = SessionUser::from_jar(&jar, &state).await? {
        SessionRepository::new(&state.db)
            .revoke(user.user_id, &user.claims)
            .await?;
        tracing::info!("User {} logged out", user.username);
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, redirect_to("/")).into_response())
}

/// Form for creating a login account
#[utoipa::path(
    get,
    path = "/new_user/",
    responses(
        (status = 200, description = "Empty user form", body = NewUserForm),
        (status = 302, description = "Not logged in")
    ),
    security(("session_cookie" = [])),
    tag = "Authentication"
)]
pub async fn new_user_page(_user: SessionUser) -> FormPage<NewUserForm> {
    FormPage::new(NewUserForm::default())
}

/// Create a login account
#[utoipa::path(
    post,
    path = "/new_user/",
    request_body(content = NewUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "User created, redirect to the dashboard"),
        (status = 422, description = "Validation errors", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Authentication"
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: SessionUser,
    Form(form): Form<NewUserForm>,
) -> Result<Response, AppError> {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(FormPage::new(form).with_errors(errors).invalid()),
    };

    let user_repo = UserRepository::new(&state.db);
    if user_repo.exists_by_username(&credentials.username).await? {
        let mut errors = FormErrors::new();
        errors.add("username", USERNAME_TAKEN);
        return Ok(FormPage::new(form).with_errors(errors).invalid());
    }

    let password_hash = bcrypt::hash(&credentials.password, state.settings.bcrypt_cost)
        .context("Failed to hash password")?;

    match user_repo.create(credentials.username, password_hash).await {
        Ok(user) => {
            tracing::info!("User {} created by {}", user.username, session.username);
            Ok(redirect_to("/index/"))
        }
        Err(e) if is_unique_violation(&e) => {
            let mut errors = FormErrors::new();
            errors.add("username", USERNAME_TAKEN);
            Ok(FormPage::new(form).with_errors(errors).invalid())
        }
        Err(e) => Err(e.into()),
    }
}

/// Form for changing the logged-in user's password
#[utoipa::path(
    get,
    path = "/change_password/",
    responses(
        (status = 200, description = "Empty password form", body = ChangePasswordForm),
        (status = 302, description = "Not logged in")
    ),
    security(("session_cookie" = [])),
    tag = "Authentication"
)]
pub async fn change_password_page(_user: SessionUser) -> FormPage<ChangePasswordForm> {
    FormPage::new(ChangePasswordForm::default())
}

/// Change the logged-in user's password
#[utoipa::path(
    post,
    path = "/change_password/",
    request_body(content = ChangePasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Password changed, redirect to the dashboard"),
        (status = 422, description = "Validation errors", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Authentication"
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: SessionUser,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Response, AppError> {
    let change = match form.validate() {
        Ok(change) => change,
        Err(errors) => return Ok(FormPage::new(form).with_errors(errors).invalid()),
    };

    let user_repo = UserRepository::new(&state.db);
    let user = user_repo
        .find_by_id(session.user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let old_password_valid = bcrypt::verify(&change.old_password, &user.password)
        .context("Password verification error")?;
    if !old_password_valid {
        let mut errors = FormErrors::new();
        errors.add(
            "old_password",
            "Your old password was entered incorrectly. Please enter it again.",
        );
        return Ok(FormPage::new(form).with_errors(errors).invalid());
    }

    let password_hash = bcrypt::hash(&change.new_password, state.settings.bcrypt_cost)
        .context("Failed to hash password")?;
    user_repo.update_password(user, password_hash).await?;

    tracing::info!("User {} changed their password", session.username);
    Ok(redirect_to("/index/"))
}
