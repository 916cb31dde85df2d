//! Domain models for the campus events backend.

pub mod allow_list;
pub mod attendance;
pub mod event;
pub mod event_result;
pub mod identity;
pub mod notification;
pub mod otp;
pub mod program;
pub mod rating;
pub mod registration;
pub mod report;
pub mod user;

pub use allow_list::AllowListEntry;
pub use attendance::{Attendance, AttendanceStatus};
pub use event::{Event, ParticipationMode};
pub use event_result::EventResult;
pub use identity::{IdentityResolution, IdentityStatus, Role, RolePrefix, RoleTable};
pub use notification::{Audience, Notification};
pub use otp::{IssuedOtp, OtpCheck, OtpEntry};
pub use program::Program;
pub use rating::Rating;
pub use registration::{
    NewRegistration, ParticipationType, Registration, RegistrationStatus, TeamData, TeamMember,
};
pub use report::Report;
pub use user::{NewUser, User, UserProfile};
