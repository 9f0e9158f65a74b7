//! `SeaORM` Entity for grade_topic join table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "grade_topic"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    pub grade_id: i32,
    pub topic_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    GradeId,
    TopicId,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    GradeId,
    TopicId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = (i32, i32);
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Grade,
    SchoolSubjectTopic,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::GradeId => ColumnType::Integer.def(),
            Self::TopicId => ColumnType::Integer.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Grade => Entity::belongs_to(super::grade::Entity)
                .from(Column::GradeId)
                .to(super::grade::Column::GradeId)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Self::SchoolSubjectTopic => Entity::belongs_to(super::school_subject_topic::Entity)
                .from(Column::TopicId)
                .to(super::school_subject_topic::Column::TopicId)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<super::grade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grade.def()
    }
}

impl Related<super::school_subject_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolSubjectTopic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
