use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::entities::app_user;

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<app_user::Model>> {
        let user = app_user::Entity::find_by_id(user_id).one(self.db).await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<app_user::Model>> {
        let user = app_user::Entity::find()
            .filter(app_user::Column::Username.eq(username))
            .one(self.db)
            .await?;
        Ok(user)
    }

    pub async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let count = app_user::Entity::find()
            .filter(app_user::Column::Username.eq(username))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    /// `password_hash` must already be a bcrypt hash.
    pub async fn create(&self, username: String, password_hash: String) -> Result<app_user::Model> {
        let now = Utc::now().naive_utc();
        let user_model = app_user::ActiveModel {
            username: Set(username),
            password: Set(password_hash),
            is_active: Set(true),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = user_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn update_password(
        &self,
        user: app_user::Model,
        password_hash: String,
    ) -> Result<app_user::Model> {
        let mut active_model: app_user::ActiveModel = user.into();
        active_model.password = Set(password_hash);
        active_model.updated_at = Set(Utc::now().naive_utc());

        let result = active_model.update(self.db).await?;
        Ok(result)
    }

    pub async fn record_login(&self, user: app_user::Model) -> Result<app_user::Model> {
        let mut active_model: app_user::ActiveModel = user.into();
        active_model.last_login = Set(Some(Utc::now().naive_utc()));

        let result = active_model.update(self.db).await?;
        Ok(result)
    }
}
