use axum::{Router, extract::State, response::Response, routing::get};
use axum_extra::extract::Form;

use super::dto::TopicForm;
use crate::error::{AppError, is_unique_violation};
use crate::extractor::SessionUser;
use crate::forms::{FormErrors, FormPage, NON_FIELD_ERRORS, redirect_to, subject_choices};
use crate::repositories::{SubjectRepository, TopicRepository};
use crate::state::AppState;
use crate::utils::validation::not_a_choice;

const TOPIC_EXISTS: &str = "School subject topic with this Name and Subject already exists.";

pub fn create_route() -> Router<AppState> {
    Router::new().route("/topic/add", get(topic_form).post(create_topic))
}

async fn render_topic_form(
    state: &AppState,
    form: TopicForm,
) -> Result<FormPage<TopicForm>, AppError> {
    let subjects = SubjectRepository::new(&state.db).find_all().await?;
    Ok(FormPage::new(form).with_choices("subject", subject_choices(&subjects)))
}

/// Topic form with the subject choices
#[utoipa::path(
    get,
    path = "/topic/add",
    responses(
        (status = 200, description = "Empty topic form", body = TopicForm),
        (status = 302, description = "Not logged in")
    ),
    security(("session_cookie" = [])),
    tag = "Topics"
)]
pub async fn topic_form(
    State(state): State<AppState>,
    _session: SessionUser,
) -> Result<FormPage<TopicForm>, AppError> {
    render_topic_form(&state, TopicForm::default()).await
}

/// Add a topic to a subject
#[utoipa::path(
    post,
    path = "/topic/add",
    request_body(content = TopicForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Topic created, redirect to the grade list"),
        (status = 422, description = "Validation errors", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Topics"
)]
pub async fn create_topic(
    State(state): State<AppState>,
    _session: SessionUser,
    Form(form): Form<TopicForm>,
) -> Result<Response, AppError> {
    let errors = match form.validate() {
        Ok(topic) => {
            let mut errors = FormErrors::new();
            let subject = SubjectRepository::new(&state.db)
                .find_by_id(topic.subject_id)
                .await?;
            let topic_repo = TopicRepository::new(&state.db);

            if subject.is_none() {
                errors.add("subject", not_a_choice(form.subject.trim()));
            } else if topic_repo
                .exists_in_subject(topic.subject_id, &topic.name)
                .await?
            {
                errors.add(NON_FIELD_ERRORS, TOPIC_EXISTS);
            } else {
                match topic_repo.create(topic.subject_id, topic.name).await {
                    Ok(created) => {
                        tracing::info!(
                            "Topic {} added to subject {}",
                            created.name,
                            created.subject_id
                        );
                        return Ok(redirect_to("/grades/subject/list"));
                    }
                    Err(e) if is_unique_violation(&e) => errors.add(NON_FIELD_ERRORS, TOPIC_EXISTS),
                    Err(e) => return Err(e.into()),
                }
            }
            errors
        }
        Err(errors) => errors,
    };

    let page = render_topic_form(&state, form).await?.with_errors(errors);
    Ok(page.invalid())
}
