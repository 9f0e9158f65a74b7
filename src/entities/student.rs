//! `SeaORM` Entity for student table

use super::sea_orm_active_enums::Gender;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub age: i32,
    pub school_class_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    StudentId,
    FirstName,
    LastName,
    Gender,
    Age,
    SchoolClassId,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    StudentId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    SchoolClass,
    PresenceList,
    StudentSubject,
    GradeStudent,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::StudentId => ColumnType::Integer.def(),
            Self::FirstName => ColumnType::String(StringLen::N(32)).def(),
            Self::LastName => ColumnType::String(StringLen::N(32)).def(),
            Self::Gender => Gender::db_type().null(),
            Self::Age => ColumnType::Integer.def(),
            Self::SchoolClassId => ColumnType::Integer.def().null(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::SchoolClass => Entity::belongs_to(super::school_class::Entity)
                .from(Column::SchoolClassId)
                .to(super::school_class::Column::SchoolClassId)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
            Self::PresenceList => Entity::has_many(super::presence_list::Entity).into(),
            Self::StudentSubject => Entity::has_many(super::student_subject::Entity).into(),
            Self::GradeStudent => Entity::has_many(super::grade_student::Entity).into(),
        }
    }
}

impl Related<super::school_class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolClass.def()
    }
}

impl Related<super::presence_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PresenceList.def()
    }
}

impl Related<super::student_subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentSubject.def()
    }
}

impl Related<super::grade_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeStudent.def()
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        super::student_subject::Relation::Subject.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::student_subject::Relation::Student.def().rev())
    }
}

impl Related<super::grade::Entity> for Entity {
    fn to() -> RelationDef {
        super::grade_student::Relation::Grade.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::grade_student::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
