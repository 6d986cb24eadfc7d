//! Authorization and trace headers attached to every resource call.

// crates.io
use time::{UtcOffset, format_description::FormatItem, macros::format_description};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Header carrying the bearer token.
pub const AUTHORIZATION: &str = "Authorization";
/// Header carrying the per-call trace reference.
pub const CLIENT_REF: &str = "Ama-Client-Ref";

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
	"[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
);

/// Builds the header map for one call.
#[derive(Clone, Debug)]
pub struct HeaderBuilder {
	application_name: String,
}
impl HeaderBuilder {
	/// Creates a builder for `application_name`.
	pub fn new(application_name: impl Into<String>) -> Self {
		Self { application_name: application_name.into() }
	}

	/// Builds the headers using the current instant.
	pub fn build(&self, token: &TokenSecret) -> Result<BTreeMap<&'static str, String>> {
		self.build_at(token, OffsetDateTime::now_utc())
	}

	/// Builds the headers for a call placed at `now`.
	///
	/// The trace reference is `{application_name}-PDT-{timestamp}` with the timestamp rendered
	/// in UTC at second precision, for example `triply-PDT-2025-03-01T12:30:05+00:00`.
	pub fn build_at(
		&self,
		token: &TokenSecret,
		now: OffsetDateTime,
	) -> Result<BTreeMap<&'static str, String>> {
		let mut headers = BTreeMap::new();

		headers.insert(AUTHORIZATION, format!("Bearer {}", token.expose()));
		headers.insert(CLIENT_REF, format!("{}-PDT-{}", self.application_name, timestamp(now)?));

		Ok(headers)
	}
}

fn timestamp(now: OffsetDateTime) -> Result<String> {
	now.to_offset(UtcOffset::UTC).format(TIMESTAMP_FORMAT).map_err(Error::Timestamp)
}
