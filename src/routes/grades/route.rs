use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use axum_extra::extract::Form;

use super::dto::{GradeForm, GradeListQuery, GradeListResponse, GradeResponse, SubjectGradesResponse};
use crate::error::AppError;
use crate::extractor::SessionUser;
use crate::forms::{
    FormErrors, FormPage, grade_choices, redirect_to, student_choices, subject_choices,
    topic_choices,
};
use crate::repositories::{
    GradeRepository, StudentRepository, SubjectRepository, TopicRepository,
};
use crate::routes::subjects::dto::SubjectSummary;
use crate::state::AppState;
use crate::utils::validation::not_a_choice;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/grades/add", get(grade_form).post(create_grade))
        .route("/grades/subject/list", get(get_grades_by_subject))
}

async fn render_grade_form(
    state: &AppState,
    form: GradeForm,
) -> Result<FormPage<GradeForm>, AppError> {
    let subjects = SubjectRepository::new(&state.db).find_all().await?;
    let topics = TopicRepository::new(&state.db).find_all().await?;
    let students = StudentRepository::new(&state.db).find_all().await?;

    Ok(FormPage::new(form)
        .with_choices("grade", grade_choices())
        .with_choices("subject", subject_choices(&subjects))
        .with_choices("topics", topic_choices(&topics, &subjects))
        .with_choices("students", student_choices(&students)))
}

/// Grade form with scale, subject, topic and student choices
#[utoipa::path(
    get,
    path = "/grades/add",
    responses(
        (status = 200, description = "Empty grade form", body = GradeForm),
        (status = 302, description = "Not logged in")
    ),
    security(("session_cookie" = [])),
    tag = "Grades"
)]
pub async fn grade_form(
    State(state): State<AppState>,
    _session: SessionUser,
) -> Result<FormPage<GradeForm>, AppError> {
    render_grade_form(&state, GradeForm::default()).await
}

/// Give a grade to one or more students
#[utoipa::path(
    post,
    path = "/grades/add",
    request_body(content = GradeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Grade created, redirect to the grade list"),
        (status = 422, description = "Validation errors", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Grades"
)]
pub async fn create_grade(
    State(state): State<AppState>,
    _session: SessionUser,
    Form(form): Form<GradeForm>,
) -> Result<Response, AppError> {
    let new_grade = match form.validate() {
        Ok(new_grade) => new_grade,
        Err(errors) => {
            return Ok(render_grade_form(&state, form)
                .await?
                .with_errors(errors)
                .invalid());
        }
    };

    let mut errors = FormErrors::new();

    let subject = SubjectRepository::new(&state.db)
        .find_by_id(new_grade.subject_id)
        .await?;
    if subject.is_none() {
        errors.add("subject", not_a_choice(form.subject.trim()));
    }

    let topics = TopicRepository::new(&state.db)
        .find_by_ids(&new_grade.topic_ids)
        .await?;
    for topic_id in &new_grade.topic_ids {
        match topics.iter().find(|topic| topic.topic_id == *topic_id) {
            None => errors.add("topics", not_a_choice(&topic_id.to_string())),
            Some(topic) if topic.subject_id != new_grade.subject_id => errors.add(
                "topics",
                format!("Topic {} does not belong to the selected subject.", topic.name),
            ),
            Some(_) => {}
        }
    }

    let students = StudentRepository::new(&state.db)
        .find_by_ids(&new_grade.student_ids)
        .await?;
    if let Some(missing) = new_grade
        .student_ids
        .iter()
        .find(|id| !students.iter().any(|student| student.student_id == **id))
    {
        errors.add("students", not_a_choice(&missing.to_string()));
    }

    if !errors.is_empty() {
        return Ok(render_grade_form(&state, form)
            .await?
            .with_errors(errors)
            .invalid());
    }

    let student_count = new_grade.student_ids.len();
    let grade = GradeRepository::new(&state.db).create(new_grade).await?;
    tracing::info!(
        "Grade {} in subject {} given to {} student(s)",
        grade.value,
        grade.subject_id,
        student_count
    );

    Ok(redirect_to("/grades/subject/list"))
}

/// Grades grouped by subject with their topics and students
#[utoipa::path(
    get,
    path = "/grades/subject/list",
    params(GradeListQuery),
    responses(
        (status = 200, description = "Grades retrieved", body = GradeListResponse),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Grades"
)]
pub async fn get_grades_by_subject(
    State(state): State<AppState>,
    _session: SessionUser,
    Query(query): Query<GradeListQuery>,
) -> Result<Json<GradeListResponse>, AppError> {
    let subject_repo = SubjectRepository::new(&state.db);
    let subjects = match query.subject {
        Some(subject_id) => {
            let subject = subject_repo
                .find_by_id(subject_id)
                .await?
                .ok_or(AppError::NotFound("Subject"))?;
            let topics = TopicRepository::new(&state.db)
                .find_by_subject(subject_id)
                .await?;
            vec![(subject, topics)]
        }
        None => subject_repo.find_all_with_topics().await?,
    };

    let grades = GradeRepository::new(&state.db)
        .find_all_with_links(query.subject)
        .await?;
    let total = grades.len();

    let mut by_subject: HashMap<i32, Vec<GradeResponse>> = HashMap::new();
    for linked in grades {
        by_subject
            .entry(linked.grade.subject_id)
            .or_default()
            .push(linked.into());
    }

    let subjects = subjects
        .into_iter()
        .map(|(subject, topics)| SubjectGradesResponse {
            grades: by_subject.remove(&subject.subject_id).unwrap_or_default(),
            subject: SubjectSummary::from(&subject),
            topics: topics.into_iter().map(Into::into).collect(),
        })
        .collect();

    Ok(Json(GradeListResponse { total, subjects }))
}
