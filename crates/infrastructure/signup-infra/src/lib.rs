pub mod net;
pub mod pwned;

// Re-exports for convenience
pub use net::{availability_url, default_http_client, AvailabilityChecker, HttpAvailabilityClient};
pub use pwned::{PasswordPwnedCheck, UnwiredPwnedCheck};
