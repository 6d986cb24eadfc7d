//! Observability helpers shared by the token manager, dispatcher, and pagination helper.
//!
//! # Signals
//!
//! - Every call runs inside a `tracing` span named `amadeus_client.call` carrying the `kind`
//!   and `stage` fields, plus `method` and `path` for resource calls.
//! - Enable the `metrics` feature to increment the `amadeus_client_call_total` counter for
//!   every attempt/success/failure, labeled by `kind` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Call kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Client-credentials exchange against the token endpoint.
	TokenExchange,
	/// Authenticated resource call made through the dispatcher.
	Request,
	/// Pagination replay of a previous request.
	Page,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::TokenExchange => "token_exchange",
			CallKind::Request => "request",
			CallKind::Page => "page",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the terminal outcome of `result` for `kind`.
pub fn record_result<T, E>(kind: CallKind, result: &Result<T, E>) {
	match result {
		Ok(_) => record_call_outcome(kind, CallOutcome::Success),
		Err(_) => record_call_outcome(kind, CallOutcome::Failure),
	}
}

/// Summarizes a payload for logs without exposing its values.
///
/// Only top-level key names are kept; travel payloads routinely carry traveler names and
/// payment references.
pub fn payload_keys(payload: &Value) -> String {
	match payload {
		Value::Object(map) => map.keys().map(String::as_str).collect::<Vec<_>>().join(","),
		Value::Null => String::new(),
		Value::Array(items) => format!("[{} items]", items.len()),
		_ => "<scalar>".into(),
	}
}
