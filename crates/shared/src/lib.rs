//! Shared utilities for the campus events backend.
//!
//! This crate provides functionality used across all other crates:
//! - Secret hashing with Argon2id and secure secret generation
//! - External ID normalization
//! - Common validation logic

pub mod identifiers;
pub mod secret;
pub mod validation;
