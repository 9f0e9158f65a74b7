//! `SeaORM` Entity for subject table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "subject"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub subject_id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    SubjectId,
    Name,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    SubjectId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    TeacherSubject,
    StudentSubject,
    SchoolSubjectTopic,
    Grade,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::SubjectId => ColumnType::Integer.def(),
            Self::Name => ColumnType::String(StringLen::N(32)).def().unique(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::TeacherSubject => Entity::has_many(super::teacher_subject::Entity).into(),
            Self::StudentSubject => Entity::has_many(super::student_subject::Entity).into(),
            Self::SchoolSubjectTopic => {
                Entity::has_many(super::school_subject_topic::Entity).into()
            }
            Self::Grade => Entity::has_many(super::grade::Entity).into(),
        }
    }
}

impl Related<super::school_subject_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolSubjectTopic.def()
    }
}

impl Related<super::grade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grade.def()
    }
}

impl Related<super::teacher_subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubject.def()
    }
}

impl Related<super::student_subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentSubject.def()
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        super::teacher_subject::Relation::Teacher.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::teacher_subject::Relation::Subject.def().rev())
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        super::student_subject::Relation::Student.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::student_subject::Relation::Subject.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
