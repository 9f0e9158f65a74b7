use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{school_class, student};

pub struct SchoolClassRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SchoolClassRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<school_class::Model>> {
        let classes = school_class::Entity::find()
            .order_by_asc(school_class::Column::Name)
            .order_by_asc(school_class::Column::Year)
            .all(self.db)
            .await?;
        Ok(classes)
    }

    pub async fn find_by_id(&self, school_class_id: i32) -> Result<Option<school_class::Model>> {
        let school_class = school_class::Entity::find_by_id(school_class_id)
            .one(self.db)
            .await?;
        Ok(school_class)
    }

    /// Whether another class already uses this (name, year) pair.
    pub async fn exists_by_name_and_year(
        &self,
        name: &str,
        year: i32,
        exclude_id: Option<i32>,
    ) -> Result<bool> {
        let mut query = school_class::Entity::find()
            .filter(school_class::Column::Name.eq(name))
            .filter(school_class::Column::Year.eq(year));

        if let Some(school_class_id) = exclude_id {
            query = query.filter(school_class::Column::SchoolClassId.ne(school_class_id));
        }

        let count = query.count(self.db).await?;
        Ok(count > 0)
    }

    pub async fn create(&self, name: String, year: i32) -> Result<school_class::Model> {
        let class_model = school_class::ActiveModel {
            name: Set(name),
            year: Set(year),
            ..Default::default()
        };

        let result = class_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn update(
        &self,
        school_class: school_class::Model,
        name: String,
        year: i32,
    ) -> Result<school_class::Model> {
        let mut active_model: school_class::ActiveModel = school_class.into();
        active_model.name = Set(name);
        active_model.year = Set(year);

        let result = active_model.update(self.db).await?;
        Ok(result)
    }

    pub async fn find_students(&self, school_class_id: i32) -> Result<Vec<student::Model>> {
        let students = student::Entity::find()
            .filter(student::Column::SchoolClassId.eq(school_class_id))
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .all(self.db)
            .await?;
        Ok(students)
    }

    pub async fn count(&self) -> Result<u64> {
        let total = school_class::Entity::find().count(self.db).await?;
        Ok(total)
    }
}
