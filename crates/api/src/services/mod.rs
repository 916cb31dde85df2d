//! Application services that sit outside the request path.

pub mod provisioning;

pub use provisioning::{provision_admin, ProvisionError, ProvisionedAdmin};
