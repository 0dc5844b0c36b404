//! Database connection management and repositories.

mod connections;
mod postgres_base;
pub mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnection};
pub use sea_orm::DbErr;
pub use postgres_repo::{
    PostgresLikeRepository, PostgresMessageboardRepository, PostgresPostRepository,
    PostgresReadStateRepository, PostgresTopicRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
