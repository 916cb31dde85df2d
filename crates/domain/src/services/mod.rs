//! Domain services for the campus events backend.
//!
//! Services hold the flows with real decision logic. They depend only on the
//! store traits in [`crate::stores`].

pub mod error;
pub mod identity;
pub mod login;
pub mod otp;
pub mod registration;
pub mod signup;

pub use error::{AuthError, RegistrationError};
pub use identity::IdentityService;
pub use login::LoginService;
pub use otp::{OtpService, DEFAULT_OTP_TTL_SECS};
pub use registration::RegistrationService;
pub use signup::SignupService;
