//! Users model

use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub nickname: String,
    pub role: String,
    pub created_at: chrono::NaiveDateTime,
    pub modified_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Users whose nickname equals `nickname` exactly
    pub fn find_by_nickname(nickname: &str) -> Select<Entity> {
        Self::find()
            .filter(Column::Nickname.eq(nickname))
            .order_by_asc(Column::Id)
    }
}
