use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppSettings;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub settings: Arc<AppSettings>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, settings: AppSettings) -> Self {
        Self {
            db,
            settings: Arc::new(settings),
        }
    }
}
