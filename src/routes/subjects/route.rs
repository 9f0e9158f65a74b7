use axum::{
    Json, Router,
    extract::State,
    response::Response,
    routing::get,
};
use axum_extra::extract::Form;

use super::dto::{SubjectForm, SubjectListResponse, SubjectResponse, SubjectSummary};
use crate::error::{AppError, is_unique_violation};
use crate::extractor::SessionUser;
use crate::forms::{FormErrors, FormPage, redirect_to, subject_name_choices};
use crate::repositories::SubjectRepository;
use crate::state::AppState;

const SUBJECT_EXISTS: &str = "Subject with this Name already exists.";

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/subject/list", get(get_all_subjects))
        .route("/subject/add", get(subject_form).post(create_subject))
}

/// List subjects with their topics
#[utoipa::path(
    get,
    path = "/subject/list",
    responses(
        (status = 200, description = "Subjects retrieved", body = SubjectListResponse),
        (status = 302, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Subjects"
)]
pub async fn get_all_subjects(
    State(state): State<AppState>,
    _session: SessionUser,
) -> Result<Json<SubjectListResponse>, AppError> {
    let subjects = SubjectRepository::new(&state.db)
        .find_all_with_topics()
        .await?;

    let response = SubjectListResponse {
        total: subjects.len(),
        subjects: subjects
            .into_iter()
            .map(|(subject, topics)| SubjectResponse {
                subject: SubjectSummary::from(&subject),
                topics: topics.into_iter().map(Into::into).collect(),
            })
            .collect(),
    };

    Ok(Json(response))
}

async fn render_subject_form(
    state: &AppState,
    form: SubjectForm,
) -> Result<FormPage<SubjectForm>, AppError> {
    let existing = SubjectRepository::new(&state.db).find_all().await?;
    Ok(FormPage::new(form).with_choices("name", subject_name_choices(&existing)))
}

/// Subject form with the catalogue codes still available
#[utoipa::path(
    get,
    path = "/subject/add",
    responses(
        (status = 200, description = "Empty subject form", body = SubjectForm),
        (status = 302, description = "Not logged in")
    ),
    security(("session_cookie" = [])),
    tag = "Subjects"
)]
pub async fn subject_form(
    State(state): State<AppState>,
    _session: SessionUser,
) -> Result<FormPage<SubjectForm>, AppError> {
    render_subject_form(&state, SubjectForm::default()).await
}

/// Create a subject
#[utoipa::path(
    post,
    path = "/subject/add",
    request_body(content = SubjectForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Subject created, redirect to the subject list"),
        (status = 422, description = "Validation errors", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Subjects"
)]
pub async fn create_subject(
    State(state): State<AppState>,
    _session: SessionUser,
    Form(form): Form<SubjectForm>,
) -> Result<Response, AppError> {
    let name = match form.validate() {
        Ok(name) => name,
        Err(errors) => {
            return Ok(render_subject_form(&state, form)
                .await?
                .with_errors(errors)
                .invalid());
        }
    };

    let subject_repo = SubjectRepository::new(&state.db);
    let mut errors = FormErrors::new();
    if subject_repo.exists_by_name(&name).await? {
        errors.add("name", SUBJECT_EXISTS);
        return Ok(render_subject_form(&state, form)
            .await?
            .with_errors(errors)
            .invalid());
    }

    match subject_repo.create(name).await {
        Ok(subject) => {
            tracing::info!("Subject {} created", subject.name);
            Ok(redirect_to("/subject/list"))
        }
        Err(e) if is_unique_violation(&e) => {
            errors.add("name", SUBJECT_EXISTS);
            Ok(render_subject_form(&state, form)
                .await?
                .with_errors(errors)
                .invalid())
        }
        Err(e) => Err(e.into()),
    }
}
