use axum::{
    Json, Router,
    extract::{Path, State},
    response::Response,
    routing::get,
};
use axum_extra::extract::Form;

use super::dto::{
    SchoolClassDetailResponse, SchoolClassForm, SchoolClassListResponse, SchoolClassResponse,
};
use crate::error::{AppError, is_unique_violation};
use crate::extractor::SessionUser;
use crate::forms::{FormErrors, FormPage, NON_FIELD_ERRORS, redirect_to};
use crate::repositories::SchoolClassRepository;
use crate::state::AppState;
use crate::utils::validation::current_year;

const CLASS_EXISTS: &str = "School class with this Name and Year already exists.";

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/class/list", get(get_all_classes))
        .route("/class/add", get(class_form).post(create_class))
        .route(
            "/class/edit/{class_id}",
            get(edit_class_form).post(update_class),
        )
        .route("/class/details/{class_id}", get(get_class_details))
}

fn duplicate(form: SchoolClassForm) -> Response {
    let mut errors = FormErrors::new();
    errors.add(NON_FIELD_ERRORS, CLASS_EXISTS);
    FormPage::new(form).with_errors(errors).invalid()
}

/// List classes ordered by name, then year
#[utoipa::path(
    get,
    path = "/class/list",
    responses(
        (status = 200, description = "Classes retrieved", body = SchoolClassListResponse),
        (status = 302, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Classes"
)]
pub async fn get_all_classes(
    State(state): State<AppState>,
    _session: SessionUser,
) -> Result<Json<SchoolClassListResponse>, AppError> {
    let classes = SchoolClassRepository::new(&state.db).find_all().await?;

    Ok(Json(SchoolClassListResponse {
        total: classes.len(),
        classes: classes.into_iter().map(Into::into).collect(),
    }))
}

/// Empty class form
#[utoipa::path(
    get,
    path = "/class/add",
    responses(
        (status = 200, description = "Empty class form", body = SchoolClassForm),
        (status = 302, description = "Not logged in")
    ),
    security(("session_cookie" = [])),
    tag = "Classes"
)]
pub async fn class_form(_session: SessionUser) -> FormPage<SchoolClassForm> {
    FormPage::new(SchoolClassForm::default())
}

/// Create a class
#[utoipa::path(
    post,
    path = "/class/add",
    request_body(content = SchoolClassForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Class created, redirect to the class list"),
        (status = 422, description = "Validation errors or duplicate name and year", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Classes"
)]
pub async fn create_class(
    State(state): State<AppState>,
    _session: SessionUser,
    Form(form): Form<SchoolClassForm>,
) -> Result<Response, AppError> {
    let valid = match form.validate(current_year()) {
        Ok(valid) => valid,
        Err(errors) => return Ok(FormPage::new(form).with_errors(errors).invalid()),
    };

    let class_repo = SchoolClassRepository::new(&state.db);
    if class_repo
        .exists_by_name_and_year(&valid.name, valid.year, None)
        .await?
    {
        return Ok(duplicate(form));
    }

    match class_repo.create(valid.name, valid.year).await {
        Ok(school_class) => {
            tracing::info!(
                "Class {} ({}) created with id {}",
                school_class.name,
                school_class.year,
                school_class.school_class_id
            );
            Ok(redirect_to("/class/list"))
        }
        Err(e) if is_unique_violation(&e) => Ok(duplicate(form)),
        Err(e) => Err(e.into()),
    }
}

/// Class form pre-filled with the current name and year
#[utoipa::path(
    get,
    path = "/class/edit/{class_id}",
    params(
        ("class_id" = i32, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Pre-filled class form", body = SchoolClassForm),
        (status = 404, description = "Class not found")
    ),
    security(("session_cookie" = [])),
    tag = "Classes"
)]
pub async fn edit_class_form(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(class_id): Path<i32>,
) -> Result<FormPage<SchoolClassForm>, AppError> {
    let school_class = SchoolClassRepository::new(&state.db)
        .find_by_id(class_id)
        .await?
        .ok_or(AppError::NotFound("School class"))?;

    Ok(FormPage::new(SchoolClassForm::from(&school_class)))
}

/// Rename a class or change its year
#[utoipa::path(
    post,
    path = "/class/edit/{class_id}",
    params(
        ("class_id" = i32, Path, description = "Class ID")
    ),
    request_body(content = SchoolClassForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Class updated, redirect to the class list"),
        (status = 404, description = "Class not found"),
        (status = 422, description = "Validation errors or duplicate name and year", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Classes"
)]
pub async fn update_class(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(class_id): Path<i32>,
    Form(form): Form<SchoolClassForm>,
) -> Result<Response, AppError> {
    let class_repo = SchoolClassRepository::new(&state.db);
    let school_class = class_repo
        .find_by_id(class_id)
        .await?
        .ok_or(AppError::NotFound("School class"))?;

    let valid = match form.validate(current_year()) {
        Ok(valid) => valid,
        Err(errors) => return Ok(FormPage::new(form).with_errors(errors).invalid()),
    };

    if class_repo
        .exists_by_name_and_year(&valid.name, valid.year, Some(class_id))
        .await?
    {
        return Ok(duplicate(form));
    }

    match class_repo.update(school_class, valid.name, valid.year).await {
        Ok(school_class) => {
            tracing::info!(
                "Class {} updated to {} ({})",
                school_class.school_class_id,
                school_class.name,
                school_class.year
            );
            Ok(redirect_to("/class/list"))
        }
        Err(e) if is_unique_violation(&e) => Ok(duplicate(form)),
        Err(e) => Err(e.into()),
    }
}

/// Class with its students
#[utoipa::path(
    get,
    path = "/class/details/{class_id}",
    params(
        ("class_id" = i32, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Class retrieved", body = SchoolClassDetailResponse),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Classes"
)]
pub async fn get_class_details(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(class_id): Path<i32>,
) -> Result<Json<SchoolClassDetailResponse>, AppError> {
    let class_repo = SchoolClassRepository::new(&state.db);
    let school_class = class_repo
        .find_by_id(class_id)
        .await?
        .ok_or(AppError::NotFound("School class"))?;
    let students = class_repo.find_students(class_id).await?;

    Ok(Json(SchoolClassDetailResponse {
        school_class: SchoolClassResponse::from(school_class),
        students: students.into_iter().map(Into::into).collect(),
    }))
}
