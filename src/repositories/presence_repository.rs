use anyhow::Result;
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::presence_list;

pub struct PresenceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PresenceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Most recent day first.
    pub async fn find_by_student(&self, student_id: i32) -> Result<Vec<presence_list::Model>> {
        let presence = presence_list::Entity::find()
            .filter(presence_list::Column::StudentId.eq(student_id))
            .order_by_desc(presence_list::Column::Day)
            .order_by_desc(presence_list::Column::PresenceId)
            .all(self.db)
            .await?;
        Ok(presence)
    }

    pub async fn create(
        &self,
        student_id: i32,
        day: NaiveDateTime,
        present: Option<bool>,
    ) -> Result<presence_list::Model> {
        let presence_model = presence_list::ActiveModel {
            student_id: Set(student_id),
            day: Set(day),
            present: Set(present),
            ..Default::default()
        };

        let result = presence_model.insert(self.db).await?;
        Ok(result)
    }
}
