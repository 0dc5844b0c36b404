//! Topic read-state entity for SeaORM.
//!
//! Composite primary key `(user_id, topic_id)`; `read_at` is the caller's
//! read watermark for the topic.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "topic_read_states")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub topic_id: Uuid,
    pub read_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::topic::Entity",
        from = "Column::TopicId",
        to = "super::topic::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Topic,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain TopicReadState.
impl From<Model> for agora_core::domain::TopicReadState {
    fn from(model: Model) -> Self {
        Self {
            user_id: model.user_id,
            topic_id: model.topic_id,
            read_at: model.read_at.into(),
        }
    }
}

/// Conversion from Domain TopicReadState to SeaORM ActiveModel.
impl From<agora_core::domain::TopicReadState> for ActiveModel {
    fn from(state: agora_core::domain::TopicReadState) -> Self {
        Self {
            user_id: Set(state.user_id),
            topic_id: Set(state.topic_id),
            read_at: Set(state.read_at.into()),
        }
    }
}
