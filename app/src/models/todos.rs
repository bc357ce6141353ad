//! Todos model

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, SelectTwo};
use serde::Serialize;

use super::users;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub contents: String,
    pub weather: String,
    /// Owner; fixed at creation
    pub user_id: i64,
    pub created_at: chrono::NaiveDateTime,
    pub modified_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::managers::Entity")]
    Managers,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::managers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Managers.def()
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// All todos with their owner, most recently modified first
    pub fn recent_with_owner() -> SelectTwo<Entity, users::Entity> {
        Self::find()
            .find_also_related(users::Entity)
            .order_by_desc(Column::ModifiedAt)
            .order_by_desc(Column::Id)
    }
}

impl Model {
    /// Load one todo together with its owner
    pub async fn find_with_owner<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<(Model, Option<users::Model>)>, DbErr> {
        Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(db)
            .await
    }
}
