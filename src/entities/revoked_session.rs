//! `SeaORM` Entity for revoked_session table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "revoked_session"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub revoked_session_id: i32,
    pub jti: String,
    pub user_id: i32,
    pub expires_at: DateTime,
    pub revoked_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    RevokedSessionId,
    Jti,
    UserId,
    ExpiresAt,
    RevokedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    RevokedSessionId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    AppUser,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::RevokedSessionId => ColumnType::Integer.def(),
            Self::Jti => ColumnType::String(StringLen::N(64)).def().unique(),
            Self::UserId => ColumnType::Integer.def(),
            Self::ExpiresAt => ColumnType::DateTime.def(),
            Self::RevokedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::AppUser => Entity::belongs_to(super::app_user::Entity)
                .from(Column::UserId)
                .to(super::app_user::Column::UserId)
                .into(),
        }
    }
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
