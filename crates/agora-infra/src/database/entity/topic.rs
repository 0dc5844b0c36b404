//! Topic entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub messageboard_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub slug: String,
    pub posts_count: i64,
    pub last_post_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::messageboard::Entity",
        from = "Column::MessageboardId",
        to = "super::messageboard::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Messageboard,
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::messageboard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messageboard.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Topic.
impl From<Model> for agora_core::domain::Topic {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            messageboard_id: model.messageboard_id,
            user_id: model.user_id,
            title: model.title,
            slug: model.slug,
            posts_count: model.posts_count,
            last_post_at: model.last_post_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Topic to SeaORM ActiveModel.
impl From<agora_core::domain::Topic> for ActiveModel {
    fn from(topic: agora_core::domain::Topic) -> Self {
        Self {
            id: Set(topic.id),
            messageboard_id: Set(topic.messageboard_id),
            user_id: Set(topic.user_id),
            title: Set(topic.title),
            slug: Set(topic.slug),
            posts_count: Set(topic.posts_count),
            last_post_at: Set(topic.last_post_at.map(Into::into)),
            created_at: Set(topic.created_at.into()),
            updated_at: Set(topic.updated_at.into()),
        }
    }
}
