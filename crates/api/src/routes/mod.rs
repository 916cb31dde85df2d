//! HTTP route handlers.

pub mod allow_list;
pub mod attendance;
pub mod auth;
pub mod event_results;
pub mod events;
pub mod health;
pub mod notifications;
pub mod programs;
pub mod ratings;
pub mod registrations;
pub mod reports;
pub mod users;
