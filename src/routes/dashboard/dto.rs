use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct EntityCounts {
    pub students: u64,
    pub teachers: u64,
    pub school_classes: u64,
    pub subjects: u64,
    pub grades: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub username: String,
    pub counts: EntityCounts,
}
