use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::sea_orm_active_enums::Gender;
use crate::entities::{grade, student, student_subject, subject};

pub struct StudentRepository<'a> {
    db: &'a DatabaseConnection,
}

pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub age: i32,
    pub school_class_id: Option<i32>,
    pub subject_ids: Vec<i32>,
}

/// Exact-match filters for the student list; unset fields match everything.
#[derive(Debug, Default, Clone)]
pub struct StudentFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub school_class_id: Option<i32>,
}

impl<'a> StudentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<student::Model>> {
        self.find_filtered(StudentFilter::default()).await
    }

    pub async fn find_filtered(&self, filter: StudentFilter) -> Result<Vec<student::Model>> {
        let mut query = student::Entity::find();

        if let Some(first_name) = filter.first_name {
            query = query.filter(student::Column::FirstName.eq(first_name));
        }
        if let Some(last_name) = filter.last_name {
            query = query.filter(student::Column::LastName.eq(last_name));
        }
        if let Some(age) = filter.age {
            query = query.filter(student::Column::Age.eq(age));
        }
        if let Some(school_class_id) = filter.school_class_id {
            query = query.filter(student::Column::SchoolClassId.eq(school_class_id));
        }

        let students = query
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .order_by_asc(student::Column::StudentId)
            .all(self.db)
            .await?;
        Ok(students)
    }

    pub async fn find_by_id(&self, student_id: i32) -> Result<Option<student::Model>> {
        let student = student::Entity::find_by_id(student_id).one(self.db).await?;
        Ok(student)
    }

    pub async fn find_by_ids(&self, student_ids: &[i32]) -> Result<Vec<student::Model>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let students = student::Entity::find()
            .filter(student::Column::StudentId.is_in(student_ids.iter().copied()))
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .all(self.db)
            .await?;
        Ok(students)
    }

    pub async fn find_subjects(&self, student: &student::Model) -> Result<Vec<subject::Model>> {
        let subjects = student
            .find_related(subject::Entity)
            .order_by_asc(subject::Column::Name)
            .all(self.db)
            .await?;
        Ok(subjects)
    }

    /// Grades of one student, oldest first, each with its subject.
    pub async fn find_grades(
        &self,
        student: &student::Model,
    ) -> Result<Vec<(grade::Model, Option<subject::Model>)>> {
        let grades = student
            .find_related(grade::Entity)
            .find_also_related(subject::Entity)
            .order_by_asc(grade::Column::CreatedAt)
            .order_by_asc(grade::Column::GradeId)
            .all(self.db)
            .await?;
        Ok(grades)
    }

    /// Inserts the student and its subject links in one transaction.
    pub async fn create(&self, new_student: NewStudent) -> Result<student::Model> {
        let txn = self.db.begin().await?;

        let student_model = student::ActiveModel {
            first_name: Set(new_student.first_name),
            last_name: Set(new_student.last_name),
            gender: Set(new_student.gender),
            age: Set(new_student.age),
            school_class_id: Set(new_student.school_class_id),
            ..Default::default()
        };
        let student = student_model.insert(&txn).await?;

        if !new_student.subject_ids.is_empty() {
            let links = new_student
                .subject_ids
                .iter()
                .map(|subject_id| student_subject::ActiveModel {
                    student_id: Set(student.student_id),
                    subject_id: Set(*subject_id),
                });
            student_subject::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(student)
    }

    pub async fn delete(&self, student: student::Model) -> Result<DeleteResult> {
        let active_model: student::ActiveModel = student.into();
        let result = active_model.delete(self.db).await?;
        Ok(result)
    }

    pub async fn count(&self) -> Result<u64> {
        let total = student::Entity::find().count(self.db).await?;
        Ok(total)
    }
}
