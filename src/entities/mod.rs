//! `SeaORM` entities for the school schema

pub mod app_user;
pub mod grade;
pub mod grade_student;
pub mod grade_topic;
pub mod presence_list;
pub mod revoked_session;
pub mod school_class;
pub mod school_subject_topic;
pub mod sea_orm_active_enums;
pub mod student;
pub mod student_subject;
pub mod subject;
pub mod teacher;
pub mod teacher_subject;
