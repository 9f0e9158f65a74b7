//! `SeaORM` Entity for teacher table

use super::sea_orm_active_enums::Gender;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "teacher"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub teacher_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    TeacherId,
    FirstName,
    LastName,
    Gender,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    TeacherId,
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
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::TeacherId => ColumnType::Integer.def(),
            Self::FirstName => ColumnType::String(StringLen::N(32)).def(),
            Self::LastName => ColumnType::String(StringLen::N(32)).def(),
            Self::Gender => Gender::db_type(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::TeacherSubject => Entity::has_many(super::teacher_subject::Entity).into(),
        }
    }
}

impl Related<super::teacher_subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubject.def()
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        super::teacher_subject::Relation::Subject.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::teacher_subject::Relation::Teacher.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
