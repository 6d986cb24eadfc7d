//! Token value types.

pub mod access;
pub mod secret;
