//! `SeaORM` Entity for app_user table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "app_user"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub user_id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: bool,
    pub last_login: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    UserId,
    Username,
    Password,
    IsActive,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    UserId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    RevokedSession,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::UserId => ColumnType::Integer.def(),
            Self::Username => ColumnType::String(StringLen::N(150)).def().unique(),
            Self::Password => ColumnType::String(StringLen::None).def(),
            Self::IsActive => ColumnType::Boolean.def(),
            Self::LastLogin => ColumnType::DateTime.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::RevokedSession => Entity::has_many(super::revoked_session::Entity).into(),
        }
    }
}

impl Related<super::revoked_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RevokedSession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
