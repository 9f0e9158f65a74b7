use axum::{Json, Router, extract::State, routing::get};

use super::dto::{DashboardResponse, EntityCounts};
use crate::error::AppError;
use crate::extractor::SessionUser;
use crate::repositories::{
    GradeRepository, SchoolClassRepository, StudentRepository, SubjectRepository,
    TeacherRepository,
};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/index/", get(dashboard))
}

/// Landing page after login
#[utoipa::path(
    get,
    path = "/index/",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 302, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    ),
    security(("session_cookie" = [])),
    tag = "Dashboard"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let counts = EntityCounts {
        students: StudentRepository::new(&state.db).count().await?,
        teachers: TeacherRepository::new(&state.db).count().await?,
        school_classes: SchoolClassRepository::new(&state.db).count().await?,
        subjects: SubjectRepository::new(&state.db).count().await?,
        grades: GradeRepository::new(&state.db).count().await?,
    };

    Ok(Json(DashboardResponse {
        username: session.username,
        counts,
    }))
}
