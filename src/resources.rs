//! Thin resource namespaces over [`Client`].
//!
//! Each namespace borrows the client and forwards to `get`, `post`, or `delete` with a fixed
//! path. Parameters and bodies are passed through untouched; namespaces only reject empty
//! path identifiers.

pub mod booking;
pub mod reference_data;
pub mod shopping;

pub use booking::*;
pub use reference_data::*;
pub use shopping::*;

// self
use crate::{_prelude::*, client::Client};

impl Client {
	/// Shopping APIs (flight offers, destinations).
	pub fn shopping(&self) -> Shopping<'_> {
		Shopping { client: self }
	}

	/// Booking APIs (flight orders).
	pub fn booking(&self) -> Booking<'_> {
		Booking { client: self }
	}

	/// Reference data APIs (locations, airlines).
	pub fn reference_data(&self) -> ReferenceData<'_> {
		ReferenceData { client: self }
	}
}

fn require_id(name: &'static str, id: &str) -> Result<()> {
	if id.trim().is_empty() { Err(Error::MissingParameter { name }) } else { Ok(()) }
}
