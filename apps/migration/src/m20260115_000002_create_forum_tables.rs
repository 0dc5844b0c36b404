use sea_orm_migration::prelude::*;

use super::m20260115_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Messageboards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messageboards::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messageboards::Name).string().not_null())
                    .col(
                        ColumnDef::new(Messageboards::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Messageboards::Description).text())
                    .col(
                        ColumnDef::new(Messageboards::TopicsCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Messageboards::PostsCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Messageboards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Messageboards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Topics::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Topics::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Topics::MessageboardId).uuid().not_null())
                    .col(ColumnDef::new(Topics::UserId).uuid().not_null())
                    .col(ColumnDef::new(Topics::Title).string().not_null())
                    .col(ColumnDef::new(Topics::Slug).string().not_null())
                    .col(
                        ColumnDef::new(Topics::PostsCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Topics::LastPostAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Topics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Topics::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-topics-messageboard_id")
                            .from(Topics::Table, Topics::MessageboardId)
                            .to(Messageboards::Table, Messageboards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-topics-user_id")
                            .from(Topics::Table, Topics::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One slug per board
        manager
            .create_index(
                Index::create()
                    .name("idx-topics-board-slug")
                    .table(Topics::Table)
                    .col(Topics::MessageboardId)
                    .col(Topics::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::TopicId).uuid().not_null())
                    .col(ColumnDef::new(Posts::UserId).uuid().not_null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(
                        ColumnDef::new(Posts::LikesCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-posts-topic_id")
                            .from(Posts::Table, Posts::TopicId)
                            .to(Topics::Table, Topics::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-posts-user_id")
                            .from(Posts::Table, Posts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing order within a topic
        manager
            .create_index(
                Index::create()
                    .name("idx-posts-topic-created_at")
                    .table(Posts::Table)
                    .col(Posts::TopicId)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Topics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messageboards::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Messageboards {
    Table,
    Id,
    Name,
    Slug,
    Description,
    TopicsCount,
    PostsCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Topics {
    Table,
    Id,
    MessageboardId,
    UserId,
    Title,
    Slug,
    PostsCount,
    LastPostAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Posts {
    Table,
    Id,
    TopicId,
    UserId,
    Content,
    LikesCount,
    CreatedAt,
    UpdatedAt,
}
