//! Access-token models and the caching, singleflight token manager.

pub mod manager;
pub mod token;

pub use manager::*;
pub use token::{access::*, secret::*};
