//! Environment-driven configuration.
//!
//! Each submodule loads one aspect of configuration from environment
//! variables with sensible defaults:
//!
//! - [`cors`]: allowed cross-origin hosts (`CORS_ORIGINS`, comma separated)
//! - [`database`]: Postgres pool from `DATABASE_URL`
//! - [`jwt`]: token secret, algorithm and lifetime (`JWT_SECRET`,
//!   `JWT_ALGORITHM`, `JWT_ACCESS_EXPIRY`)

pub mod cors;
pub mod database;
pub mod jwt;
