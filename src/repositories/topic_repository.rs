use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::school_subject_topic;

pub struct TopicRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TopicRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<school_subject_topic::Model>> {
        let topics = school_subject_topic::Entity::find()
            .order_by_asc(school_subject_topic::Column::SubjectId)
            .order_by_asc(school_subject_topic::Column::Name)
            .all(self.db)
            .await?;
        Ok(topics)
    }

    pub async fn find_by_subject(
        &self,
        subject_id: i32,
    ) -> Result<Vec<school_subject_topic::Model>> {
        let topics = school_subject_topic::Entity::find()
            .filter(school_subject_topic::Column::SubjectId.eq(subject_id))
            .order_by_asc(school_subject_topic::Column::Name)
            .all(self.db)
            .await?;
        Ok(topics)
    }

    pub async fn find_by_ids(&self, topic_ids: &[i32]) -> Result<Vec<school_subject_topic::Model>> {
        if topic_ids.is_empty() {
            return Ok(Vec::new());
        }
        let topics = school_subject_topic::Entity::find()
            .filter(school_subject_topic::Column::TopicId.is_in(topic_ids.iter().copied()))
            .order_by_asc(school_subject_topic::Column::Name)
            .all(self.db)
            .await?;
        Ok(topics)
    }

    pub async fn exists_in_subject(&self, subject_id: i32, name: &str) -> Result<bool> {
        let count = school_subject_topic::Entity::find()
            .filter(school_subject_topic::Column::SubjectId.eq(subject_id))
            .filter(school_subject_topic::Column::Name.eq(name))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(
        &self,
        subject_id: i32,
        name: String,
    ) -> Result<school_subject_topic::Model> {
        let topic_model = school_subject_topic::ActiveModel {
            name: Set(name),
            subject_id: Set(subject_id),
            ..Default::default()
        };

        let result = topic_model.insert(self.db).await?;
        Ok(result)
    }
}
