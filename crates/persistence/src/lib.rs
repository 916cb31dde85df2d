//! Persistence layer for the campus events backend.
//!
//! This crate contains:
//! - Database connection management and SQL migrations
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the domain store traits
//! - Query timing metrics

pub mod db;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod repositories;
