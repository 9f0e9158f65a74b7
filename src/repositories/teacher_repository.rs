use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DeleteResult, EntityTrait, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryOrder, Set, TransactionTrait,
};

use crate::entities::sea_orm_active_enums::Gender;
use crate::entities::{subject, teacher, teacher_subject};

pub struct TeacherRepository<'a> {
    db: &'a DatabaseConnection,
}

pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub subject_ids: Vec<i32>,
}

impl<'a> TeacherRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all_with_subjects(
        &self,
    ) -> Result<Vec<(teacher::Model, Vec<subject::Model>)>> {
        let teachers = teacher::Entity::find()
            .order_by_asc(teacher::Column::LastName)
            .order_by_asc(teacher::Column::FirstName)
            .all(self.db)
            .await?;
        let subjects = teachers
            .load_many_to_many(subject::Entity, teacher_subject::Entity, self.db)
            .await?;
        Ok(teachers.into_iter().zip(subjects).collect())
    }

    pub async fn find_by_id(&self, teacher_id: i32) -> Result<Option<teacher::Model>> {
        let teacher = teacher::Entity::find_by_id(teacher_id).one(self.db).await?;
        Ok(teacher)
    }

    pub async fn find_subjects(&self, teacher: &teacher::Model) -> Result<Vec<subject::Model>> {
        let subjects = teacher
            .find_related(subject::Entity)
            .order_by_asc(subject::Column::Name)
            .all(self.db)
            .await?;
        Ok(subjects)
    }

    /// Inserts the teacher and its subject links in one transaction.
    pub async fn create(&self, new_teacher: NewTeacher) -> Result<teacher::Model> {
        let txn = self.db.begin().await?;

        let teacher_model = teacher::ActiveModel {
            first_name: Set(new_teacher.first_name),
            last_name: Set(new_teacher.last_name),
            gender: Set(new_teacher.gender),
            ..Default::default()
        };
        let teacher = teacher_model.insert(&txn).await?;

        if !new_teacher.subject_ids.is_empty() {
            let links = new_teacher
                .subject_ids
                .iter()
                .map(|subject_id| teacher_subject::ActiveModel {
                    teacher_id: Set(teacher.teacher_id),
                    subject_id: Set(*subject_id),
                });
            teacher_subject::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(teacher)
    }

    pub async fn delete(&self, teacher: teacher::Model) -> Result<DeleteResult> {
        let active_model: teacher::ActiveModel = teacher.into();
        let result = active_model.delete(self.db).await?;
        Ok(result)
    }

    pub async fn count(&self) -> Result<u64> {
        let total = teacher::Entity::find().count(self.db).await?;
        Ok(total)
    }
}
