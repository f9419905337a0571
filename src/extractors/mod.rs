//! Request extractors.

mod claims;

pub use claims::{AuthClaims, SESSION_COOKIE};
