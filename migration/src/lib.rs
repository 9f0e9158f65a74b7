pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_table_app_user;
mod m20260301_000002_create_table_subject_teacher;
mod m20260302_000003_create_table_school_class_student;
mod m20260303_000004_create_table_topic_grade;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_table_app_user::Migration),
            Box::new(m20260301_000002_create_table_subject_teacher::Migration),
            Box::new(m20260302_000003_create_table_school_class_student::Migration),
            Box::new(m20260303_000004_create_table_topic_grade::Migration),
        ]
    }
}
