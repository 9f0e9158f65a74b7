use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::config::SESSION_COOKIE;
use crate::entities::sea_orm_active_enums::Gender;
use crate::forms::{Choice, FormErrors};
use crate::routes::{
    auth, classes, dashboard, grades, health, students, subjects, teachers, topics,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::route::login_page,
        auth::route::login,
        auth::route::logout,
        auth::route::new_user_page,
        auth::route::create_user,
        auth::route::change_password_page,
        auth::route::change_password,
        dashboard::route::dashboard,
        health::route::health,
        teachers::route::get_all_teachers,
        teachers::route::teacher_form,
        teachers::route::create_teacher,
        teachers::route::confirm_delete_teacher,
        teachers::route::delete_teacher,
        students::route::get_all_students,
        students::route::student_form,
        students::route::create_student,
        students::route::confirm_delete_student,
        students::route::delete_student,
        students::route::get_student_details,
        students::route::record_presence,
        classes::route::get_all_classes,
        classes::route::class_form,
        classes::route::create_class,
        classes::route::edit_class_form,
        classes::route::update_class,
        classes::route::get_class_details,
        subjects::route::get_all_subjects,
        subjects::route::subject_form,
        subjects::route::create_subject,
        topics::route::topic_form,
        topics::route::create_topic,
        grades::route::grade_form,
        grades::route::create_grade,
        grades::route::get_grades_by_subject,
    ),
    components(schemas(
        Gender,
        Choice,
        FormErrors,
        auth::dto::LoginForm,
        auth::dto::NewUserForm,
        auth::dto::ChangePasswordForm,
        dashboard::dto::DashboardResponse,
        dashboard::dto::EntityCounts,
        teachers::dto::TeacherForm,
        teachers::dto::TeacherResponse,
        teachers::dto::TeacherListResponse,
        students::dto::StudentForm,
        students::dto::StudentResponse,
        students::dto::StudentListResponse,
        students::dto::StudentDetailResponse,
        students::dto::StudentGradeResponse,
        students::dto::SubjectAverage,
        students::dto::PresenceForm,
        students::dto::PresenceResponse,
        classes::dto::SchoolClassForm,
        classes::dto::SchoolClassResponse,
        classes::dto::SchoolClassListResponse,
        classes::dto::SchoolClassDetailResponse,
        subjects::dto::SubjectForm,
        subjects::dto::SubjectSummary,
        subjects::dto::SubjectResponse,
        subjects::dto::SubjectListResponse,
        subjects::dto::TopicResponse,
        topics::dto::TopicForm,
        grades::dto::GradeForm,
        grades::dto::GradeResponse,
        grades::dto::GradeListResponse,
        grades::dto::SubjectGradesResponse,
        grades::dto::StudentSummary,
    )),
    modifiers(&SessionCookieAddon),
    tags(
        (name = "Authentication", description = "Login, logout and account management"),
        (name = "Dashboard", description = "Landing page"),
        (name = "Health", description = "Liveness"),
        (name = "Teachers", description = "Teacher records"),
        (name = "Students", description = "Student records and attendance"),
        (name = "Classes", description = "School classes"),
        (name = "Subjects", description = "Subjects taught at the school"),
        (name = "Topics", description = "Subject topics"),
        (name = "Grades", description = "Grades per subject")
    ),
    info(
        title = "School Management API",
        description = "Students, teachers, classes, subjects, grades and attendance"
    )
)]
pub struct ApiDoc;

struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_gated_and_public_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/student/{student_id}", "/grades/subject/list", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("session_cookie"));
    }
}
