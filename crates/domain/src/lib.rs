//! Domain layer for the campus events backend.
//!
//! This crate contains:
//! - Domain models and request/response payloads
//! - Store traits the persistence layer implements, plus in-memory stores
//! - The identity, OTP, login and registration-eligibility flows

pub mod models;
pub mod services;
pub mod stores;
