// Core data structures for registration payloads
pub mod constants;
pub mod registration;

pub use constants::*;
pub use registration::{Field, Registration, RegistrationError};
