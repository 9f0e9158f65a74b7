use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::Response,
    routing::get,
};
use axum_extra::extract::Form;

use super::dto::{
    PresenceForm, StudentDetailResponse, StudentForm, StudentListQuery, StudentListResponse,
    StudentResponse, grade_responses, subject_averages,
};
use crate::error::AppError;
use crate::extractor::SessionUser;
use crate::forms::{
    FormErrors, FormPage, gender_choices, redirect_to, school_class_choices, subject_choices,
};
use crate::repositories::{
    PresenceRepository, SchoolClassRepository, StudentRepository, SubjectRepository,
};
use crate::routes::classes::dto::SchoolClassResponse;
use crate::routes::subjects::dto::SubjectSummary;
use crate::state::AppState;
use crate::utils::validation::not_a_choice;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/student/list", get(get_all_students))
        .route("/student/add", get(student_form).post(create_student))
        .route(
            "/student/delete/{student_id}",
            get(confirm_delete_student).post(delete_student),
        )
        .route(
            "/student/{student_id}",
            get(get_student_details).post(record_presence),
        )
}

/// List students, optionally filtered by exact field values
#[utoipa::path(
    get,
    path = "/student/list",
    params(StudentListQuery),
    responses(
        (status = 200, description = "Students retrieved", body = StudentListResponse),
        (status = 302, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Students"
)]
pub async fn get_all_students(
    State(state): State<AppState>,
    _session: SessionUser,
    Query(query): Query<StudentListQuery>,
) -> Result<Json<StudentListResponse>, AppError> {
    let students = StudentRepository::new(&state.db)
        .find_filtered(query.into())
        .await?;

    Ok(Json(StudentListResponse {
        total: students.len(),
        students: students.into_iter().map(Into::into).collect(),
    }))
}

async fn render_student_form(
    state: &AppState,
    form: StudentForm,
) -> Result<FormPage<StudentForm>, AppError> {
    let classes = SchoolClassRepository::new(&state.db).find_all().await?;
    let subjects = SubjectRepository::new(&state.db).find_all().await?;

    Ok(FormPage::new(form)
        .with_choices("gender", gender_choices())
        .with_choices("school_class", school_class_choices(&classes))
        .with_choices("subjects", subject_choices(&subjects)))
}

/// Student form with class and subject choices
#[utoipa::path(
    get,
    path = "/student/add",
    responses(
        (status = 200, description = "Empty student form", body = StudentForm),
        (status = 302, description = "Not logged in")
    ),
    security(("session_cookie" = [])),
    tag = "Students"
)]
pub async fn student_form(
    State(state): State<AppState>,
    _session: SessionUser,
) -> Result<FormPage<StudentForm>, AppError> {
    render_student_form(&state, StudentForm::default()).await
}

/// Create a student
#[utoipa::path(
    post,
    path = "/student/add",
    request_body(content = StudentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Student created, redirect to the student list"),
        (status = 422, description = "Validation errors", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    _session: SessionUser,
    Form(form): Form<StudentForm>,
) -> Result<Response, AppError> {
    let new_student = match form.validate() {
        Ok(new_student) => new_student,
        Err(errors) => {
            return Ok(render_student_form(&state, form)
                .await?
                .with_errors(errors)
                .invalid());
        }
    };

    let mut errors = FormErrors::new();
    if let Some(school_class_id) = new_student.school_class_id {
        let school_class = SchoolClassRepository::new(&state.db)
            .find_by_id(school_class_id)
            .await?;
        if school_class.is_none() {
            errors.add("school_class", not_a_choice(form.school_class.trim()));
        }
    }

    let subjects = SubjectRepository::new(&state.db)
        .find_by_ids(&new_student.subject_ids)
        .await?;
    if let Some(missing) = new_student
        .subject_ids
        .iter()
        .find(|id| !subjects.iter().any(|subject| subject.subject_id == **id))
    {
        errors.add("subjects", not_a_choice(&missing.to_string()));
    }

    if !errors.is_empty() {
        return Ok(render_student_form(&state, form)
            .await?
            .with_errors(errors)
            .invalid());
    }

    let student = StudentRepository::new(&state.db).create(new_student).await?;
    tracing::info!(
        "Student {} {} created with id {}",
        student.first_name,
        student.last_name,
        student.student_id
    );

    Ok(redirect_to("/student/list"))
}

/// Student shown for delete confirmation
#[utoipa::path(
    get,
    path = "/student/delete/{student_id}",
    params(
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student to delete", body = StudentResponse),
        (status = 404, description = "Student not found")
    ),
    security(("session_cookie" = [])),
    tag = "Students"
)]
pub async fn confirm_delete_student(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(student_id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = StudentRepository::new(&state.db)
        .find_by_id(student_id)
        .await?
        .ok_or(AppError::NotFound("Student"))?;

    Ok(Json(student.into()))
}

/// Delete a student with its attendance and grade links
#[utoipa::path(
    post,
    path = "/student/delete/{student_id}",
    params(
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 302, description = "Student deleted, redirect to the student list"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Students"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(student_id): Path<i32>,
) -> Result<Response, AppError> {
    let student_repo = StudentRepository::new(&state.db);
    let student = student_repo
        .find_by_id(student_id)
        .await?
        .ok_or(AppError::NotFound("Student"))?;

    student_repo.delete(student).await?;
    tracing::info!("Student {} deleted", student_id);

    Ok(redirect_to("/student/list"))
}

/// Student with class, subjects, grades, averages and attendance
#[utoipa::path(
    get,
    path = "/student/{student_id}",
    params(
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student retrieved", body = StudentDetailResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Students"
)]
pub async fn get_student_details(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(student_id): Path<i32>,
) -> Result<Json<StudentDetailResponse>, AppError> {
    let student_repo = StudentRepository::new(&state.db);
    let student = student_repo
        .find_by_id(student_id)
        .await?
        .ok_or(AppError::NotFound("Student"))?;

    let school_class = match student.school_class_id {
        Some(school_class_id) => SchoolClassRepository::new(&state.db)
            .find_by_id(school_class_id)
            .await?
            .map(SchoolClassResponse::from),
        None => None,
    };
    let subjects = student_repo.find_subjects(&student).await?;
    let grades = student_repo.find_grades(&student).await?;
    let presence = PresenceRepository::new(&state.db)
        .find_by_student(student_id)
        .await?;

    Ok(Json(StudentDetailResponse {
        school_class,
        subjects: subjects.iter().map(SubjectSummary::from).collect(),
        averages: subject_averages(&grades),
        grades: grade_responses(&grades),
        presence: presence.into_iter().map(Into::into).collect(),
        student: student.into(),
    }))
}

/// Record attendance for a student on a given day
#[utoipa::path(
    post,
    path = "/student/{student_id}",
    params(
        ("student_id" = i32, Path, description = "Student ID")
    ),
    request_body(content = PresenceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Attendance recorded, redirect to the student details"),
        (status = 404, description = "Student not found"),
        (status = 422, description = "Validation errors", body = FormErrors),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Students"
)]
pub async fn record_presence(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(student_id): Path<i32>,
    Form(form): Form<PresenceForm>,
) -> Result<Response, AppError> {
    let student = StudentRepository::new(&state.db)
        .find_by_id(student_id)
        .await?
        .ok_or(AppError::NotFound("Student"))?;

    let presence = match form.validate() {
        Ok(presence) => presence,
        Err(errors) => return Ok(FormPage::new(form).with_errors(errors).invalid()),
    };

    let recorded = PresenceRepository::new(&state.db)
        .create(student.student_id, presence.day, presence.present)
        .await?;
    tracing::info!(
        "Attendance {:?} recorded for student {} on {}",
        recorded.present,
        student.student_id,
        recorded.day
    );

    Ok(redirect_to(&format!("/student/{}", student.student_id)))
}
