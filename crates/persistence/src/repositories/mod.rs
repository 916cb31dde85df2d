//! Repository implementations for database operations.

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

pub use allow_list::AllowListRepository;
pub use attendance::AttendanceRepository;
pub use event::EventRepository;
pub use event_result::EventResultRepository;
pub use notification::NotificationRepository;
pub use program::ProgramRepository;
pub use rating::RatingRepository;
pub use registration::RegistrationRepository;
pub use report::ReportRepository;
pub use user::UserRepository;
