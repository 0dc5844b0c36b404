//! Messageboard entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "messageboards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub topics_count: i64,
    pub posts_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::topic::Entity")]
    Topics,
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Messageboard.
impl From<Model> for agora_core::domain::Messageboard {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            topics_count: model.topics_count,
            posts_count: model.posts_count,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Messageboard to SeaORM ActiveModel.
impl From<agora_core::domain::Messageboard> for ActiveModel {
    fn from(board: agora_core::domain::Messageboard) -> Self {
        Self {
            id: Set(board.id),
            name: Set(board.name),
            slug: Set(board.slug),
            description: Set(board.description),
            topics_count: Set(board.topics_count),
            posts_count: Set(board.posts_count),
            created_at: Set(board.created_at.into()),
            updated_at: Set(board.updated_at.into()),
        }
    }
}
