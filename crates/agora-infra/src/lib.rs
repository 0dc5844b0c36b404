//! # Agora Infrastructure
//!
//! Concrete implementations of the ports defined in `agora-core`:
//! PostgreSQL repositories via SeaORM, JWT + Argon2 authentication, an
//! in-memory TTL cache, and a GCRA rate limiter.

pub mod auth;
pub mod cache;
pub mod database;
pub mod rate_limit;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use cache::InMemoryCache;
pub use database::{DatabaseConfig, DatabaseConnection};
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
