use axum::{
    Json, Router,
    extract::{Path, State},
    response::Response,
    routing::get,
};
use axum_extra::extract::Form;

use super::dto::{TeacherForm, TeacherListResponse, TeacherResponse};
use crate::error::AppError;
use crate::extractor::SessionUser;
use crate::forms::{FormErrors, FormPage, gender_choices, redirect_to, subject_choices};
use crate::repositories::{SubjectRepository, TeacherRepository};
use crate::state::AppState;
use crate::utils::validation::not_a_choice;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/teacher/list", get(get_all_teachers))
        .route("/teacher/add", get(teacher_form).post(create_teacher))
        .route(
            "/teacher/delete/{teacher_id}",
            get(confirm_delete_teacher).post(delete_teacher),
        )
}

/// List teachers with the subjects they teach
#[utoipa::path(
    get,
    path = "/teacher/list",
    responses(
        (status = 200, description = "Teachers retrieved", body = TeacherListResponse),
        (status = 302, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Teachers"
)]
pub async fn get_all_teachers(
    State(state): State<AppState>,
    _session: SessionUser,
) -> Result<Json<TeacherListResponse>, AppError> {
    let teachers = TeacherRepository::new(&state.db)
        .find_all_with_subjects()
        .await?;

    Ok(Json(TeacherListResponse {
        total: teachers.len(),
        teachers: teachers
            .into_iter()
            .map(|(teacher, subjects)| TeacherResponse::new(teacher, &subjects))
            .collect(),
    }))
}

async fn render_teacher_form(
    state: &AppState,
    form: TeacherForm,
) -> Result<FormPage<TeacherForm>, AppError> {
    let subjects = SubjectRepository::new(&state.db).find_all().await?;

    Ok(FormPage::new(form)
        .with_choices("gender", gender_choices())
        .with_choices("subjects", subject_choices(&subjects)))
}

/// Teacher form with subject choices
#[utoipa::path(
    get,
    path = "/teacher/add",
    responses(
        (status = 200, description = "Empty teacher form", body = TeacherForm),
        (status = 302, description = "Not logged in")
    ),
    security(("session_cookie" = [])),
    tag = "Teachers"
)]
pub async fn teacher_form(
    State(state): State<AppState>,
    _session: SessionUser,
) -> Result<FormPage<TeacherForm>, AppError> {
    render_teacher_form(&state, TeacherForm::default()).await
}

/// Create a teacher
#[utoipa::path(
    post,
    path = "/teacher/add",
    request_body(content = TeacherForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Teacher created, redirect to the teacher list"),
        (status = 422, description = "Validation errors", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Teachers"
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    _session: SessionUser,
    Form(form): Form<TeacherForm>,
) -> Result<Response, AppError> {
    let new_teacher = match form.validate() {
        Ok(new_teacher) => new_teacher,
        Err(errors) => {
            return Ok(render_teacher_form(&state, form)
                .await?
                .with_errors(errors)
                .invalid());
        }
    };

    let subjects = SubjectRepository::new(&state.db)
        .find_by_ids(&new_teacher.subject_ids)
        .await?;
    if let Some(missing) = new_teacher
        .subject_ids
        .iter()
        .find(|id| !subjects.iter().any(|subject| subject.subject_id == **id))
    {
        let mut errors = FormErrors::new();
        errors.add("subjects", not_a_choice(&missing.to_string()));
        return Ok(render_teacher_form(&state, form)
            .await?
            .with_errors(errors)
            .invalid());
    }

    let teacher = TeacherRepository::new(&state.db).create(new_teacher).await?;
    tracing::info!(
        "Teacher {} {} created with id {}",
        teacher.first_name,
        teacher.last_name,
        teacher.teacher_id
    );

    Ok(redirect_to("/teacher/list"))
}

/// Teacher shown for delete confirmation
#[utoipa::path(
    get,
    path = "/teacher/delete/{teacher_id}",
    params(
        ("teacher_id" = i32, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher to delete", body = TeacherResponse),
        (status = 404, description = "Teacher not found")
    ),
    security(("session_cookie" = [])),
    tag = "Teachers"
)]
pub async fn confirm_delete_teacher(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(teacher_id): Path<i32>,
) -> Result<Json<TeacherResponse>, AppError> {
    let teacher_repo = TeacherRepository::new(&state.db);
    let teacher = teacher_repo
        .find_by_id(teacher_id)
        .await?
        .ok_or(AppError::NotFound("Teacher"))?;
    let subjects = teacher_repo.find_subjects(&teacher).await?;

    Ok(Json(TeacherResponse::new(teacher, &subjects)))
}

/// Delete a teacher
#[utoipa::path(
    post,
    path = "/teacher/delete/{teacher_id}",
    params(
        ("teacher_id" = i32, Path, description = "Teacher ID")
    ),
    responses(
        (status = 302, description = "Teacher deleted, redirect to the teacher list"),
        (status = 404, description = "Teacher not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Teachers"
)]
pub async fn delete_teacher(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(teacher_id): Path<i32>,
) -> Result<Response, AppError> {
    let teacher_repo = TeacherRepository::new(&state.db);
    let teacher = teacher_repo
        .find_by_id(teacher_id)
        .await?
        .ok_or(AppError::NotFound("Teacher"))?;

    teacher_repo.delete(teacher).await?;
    tracing::info!("Teacher {} deleted", teacher_id);

    Ok(redirect_to("/teacher/list"))
}
