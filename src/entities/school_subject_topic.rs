//! `SeaORM` Entity for school_subject_topic table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "school_subject_topic"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub topic_id: i32,
    pub name: String,
    pub subject_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    TopicId,
    Name,
    SubjectId,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    TopicId,
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
    GradeTopic,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::TopicId => ColumnType::Integer.def(),
            Self::Name => ColumnType::String(StringLen::N(64)).def(),
            Self::SubjectId => ColumnType::Integer.def(),
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
            Self::GradeTopic => Entity::has_many(super::grade_topic::Entity).into(),
        }
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::grade_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeTopic.def()
    }
}

impl Related<super::grade::Entity> for Entity {
    fn to() -> RelationDef {
        super::grade_topic::Relation::Grade.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::grade_topic::Relation::SchoolSubjectTopic.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
