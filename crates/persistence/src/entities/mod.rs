//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod allow_list;
pub mod attendance;
pub mod event;
pub mod event_result;
pub mod notification;
pub mod program;
pub mod rating;
pub mod registration;
pub mod report;
pub mod user;

pub use allow_list::AllowListEntryEntity;
pub use attendance::AttendanceEntity;
pub use event::EventEntity;
pub use event_result::EventResultEntity;
pub use notification::NotificationEntity;
pub use program::ProgramEntity;
pub use rating::RatingEntity;
pub use registration::RegistrationEntity;
pub use report::ReportEntity;
pub use user::UserEntity;
