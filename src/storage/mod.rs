mod dao;
mod database;

pub use dao::*;
pub use database::*;

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");
