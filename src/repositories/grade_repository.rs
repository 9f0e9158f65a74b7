use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::{grade, grade_student, grade_topic, school_subject_topic, student};

pub struct GradeRepository<'a> {
    db: &'a DatabaseConnection,
}

pub struct NewGrade {
    pub value: f64,
    pub subject_id: i32,
    pub topic_ids: Vec<i32>,
    pub student_ids: Vec<i32>,
}

/// A grade with the topics it covers and the students who received it.
pub struct GradeWithLinks {
    pub grade: grade::Model,
    pub topics: Vec<school_subject_topic::Model>,
    pub students: Vec<student::Model>,
}

impl<'a> GradeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Grades ordered by subject then creation time, optionally for one subject only.
    pub async fn find_all_with_links(&self, subject_id: Option<i32>) -> Result<Vec<GradeWithLinks>> {
        let mut query = grade::Entity::find();
        if let Some(subject_id) = subject_id {
            query = query.filter(grade::Column::SubjectId.eq(subject_id));
        }

        let grades = query
            .order_by_asc(grade::Column::SubjectId)
            .order_by_asc(grade::Column::CreatedAt)
            .order_by_asc(grade::Column::GradeId)
            .all(self.db)
            .await?;
        let topics = grades
            .load_many_to_many(school_subject_topic::Entity, grade_topic::Entity, self.db)
            .await?;
        let students = grades
            .load_many_to_many(student::Entity, grade_student::Entity, self.db)
            .await?;

        let result = grades
            .into_iter()
            .zip(topics)
            .zip(students)
            .map(|((grade, topics), students)| GradeWithLinks {
                grade,
                topics,
                students,
            })
            .collect();
        Ok(result)
    }

    /// Inserts the grade with its topic and student links in one transaction.
    pub async fn create(&self, new_grade: NewGrade) -> Result<grade::Model> {
        let txn = self.db.begin().await?;

        let grade_model = grade::ActiveModel {
            value: Set(new_grade.value),
            subject_id: Set(new_grade.subject_id),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        let grade = grade_model.insert(&txn).await?;

        if !new_grade.topic_ids.is_empty() {
            let links = new_grade
                .topic_ids
                .iter()
                .map(|topic_id| grade_topic::ActiveModel {
                    grade_id: Set(grade.grade_id),
                    topic_id: Set(*topic_id),
                });
            grade_topic::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        if !new_grade.student_ids.is_empty() {
            let links = new_grade
                .student_ids
                .iter()
                .map(|student_id| grade_student::ActiveModel {
                    grade_id: Set(grade.grade_id),
                    student_id: Set(*student_id),
                });
            grade_student::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(grade)
    }

    pub async fn count(&self) -> Result<u64> {
        let total = grade::Entity::find().count(self.db).await?;
        Ok(total)
    }
}
