//! `SeaORM` Entity for grade table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "grade"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub grade_id: i32,
    pub value: f64,
    pub subject_id: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    GradeId,
    Value,
    SubjectId,
    CreatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    GradeId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Subject,
    GradeStudent,
    GradeTopic,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::GradeId => ColumnType::Integer.def(),
            Self::Value => ColumnType::Double.def(),
            Self::SubjectId => ColumnType::Integer.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Subject => Entity::belongs_to(super::subject::Entity)
                .from(Column::SubjectId)
                .to(super::subject::Column::SubjectId)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Self::GradeStudent => Entity::has_many(super::grade_student::Entity).into(),
            Self::GradeTopic => Entity::has_many(super::grade_topic::Entity).into(),
        }
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::grade_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeStudent.def()
    }
}

impl Related<super::grade_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeTopic.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        super::grade_student::Relation::Student.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::grade_student::Relation::Grade.def().rev())
    }
}

impl Related<super::school_subject_topic::Entity> for Entity {
    fn to() -> RelationDef {
        super::grade_topic::Relation::SchoolSubjectTopic.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::grade_topic::Relation::Grade.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
