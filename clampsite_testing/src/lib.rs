//! Fake implementations of the external services clampsite talks to, for
//! integration tests and local development.

pub mod resend;
