use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{school_subject_topic, subject};

pub struct SubjectRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubjectRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<subject::Model>> {
        let subjects = subject::Entity::find()
            .order_by_asc(subject::Column::Name)
            .all(self.db)
            .await?;
        Ok(subjects)
    }

    pub async fn find_all_with_topics(
        &self,
    ) -> Result<Vec<(subject::Model, Vec<school_subject_topic::Model>)>> {
        let subjects = self.find_all().await?;
        let topics = subjects
            .load_many(school_subject_topic::Entity, self.db)
            .await?;
        Ok(subjects.into_iter().zip(topics).collect())
    }

    pub async fn find_by_id(&self, subject_id: i32) -> Result<Option<subject::Model>> {
        let subject = subject::Entity::find_by_id(subject_id).one(self.db).await?;
        Ok(subject)
    }

    pub async fn find_by_ids(&self, subject_ids: &[i32]) -> Result<Vec<subject::Model>> {
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }
        let subjects = subject::Entity::find()
            .filter(subject::Column::SubjectId.is_in(subject_ids.iter().copied()))
            .order_by_asc(subject::Column::Name)
            .all(self.db)
            .await?;
        Ok(subjects)
    }

    pub async fn exists_by_name(&self, name: &str) -> Result<bool> {
        let count = subject::Entity::find()
            .filter(subject::Column::Name.eq(name))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(&self, name: String) -> Result<subject::Model> {
        let subject_model = subject::ActiveModel {
            name: Set(name),
            ..Default::default()
        };

        let result = subject_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn count(&self) -> Result<u64> {
        let total = subject::Entity::find().count(self.db).await?;
        Ok(total)
    }
}
