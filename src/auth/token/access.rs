//! Cached access token with its client-side expiry instant.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// Margin subtracted from the server-declared lifetime so a token is never used in the last
/// minute before its real expiry.
pub const EXPIRY_SAFETY_MARGIN: Duration = Duration::seconds(60);

/// Access token issued by a client-credentials exchange.
#[derive(Clone)]
pub struct AccessToken {
	/// Bearer token value; callers must avoid logging it.
	pub value: TokenSecret,
	/// Instant the exchange completed.
	pub issued_at: OffsetDateTime,
	/// Instant from which the token must be treated as invalid.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Builds a token from an exchange that completed at `issued_at` and declared a lifetime of
	/// `expires_in`, applying [`EXPIRY_SAFETY_MARGIN`].
	pub fn issued(
		value: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Self {
		Self {
			value: TokenSecret::new(value),
			issued_at,
			expires_at: issued_at + (expires_in - EXPIRY_SAFETY_MARGIN),
		}
	}

	/// Returns `true` while `instant` is strictly before the expiry instant.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		!self.value.is_empty() && instant < self.expires_at
	}

	/// Convenience helper that checks validity against the current UTC instant.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("value", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn expiry_applies_safety_margin() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::issued("access", issued, Duration::seconds(3600));

		assert_eq!(token.expires_at, macros::datetime!(2025-01-01 00:59 UTC));
		assert_eq!(token.expires_at, issued + Duration::seconds(3540));
		assert!(token.is_valid_at(issued + Duration::seconds(3539)));
		assert!(!token.is_valid_at(issued + Duration::seconds(3540)));
		assert!(!token.is_valid_at(issued + Duration::seconds(3599)));
	}

	#[test]
	fn short_lifetimes_are_never_valid() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);

		assert!(!AccessToken::issued("access", issued, Duration::seconds(60)).is_valid_at(issued));
		assert!(!AccessToken::issued("access", issued, Duration::seconds(30)).is_valid_at(issued));
	}

	#[test]
	fn empty_values_are_never_valid() {
		let issued = macros::datetime!(2025-01-01 00:00 UTC);

		assert!(!AccessToken::issued("", issued, Duration::hours(1)).is_valid_at(issued));
	}

	#[test]
	fn debug_redacts_value() {
		let token = AccessToken::issued("access", OffsetDateTime::now_utc(), Duration::hours(1));

		assert!(format!("{token:?}").contains("<redacted>"));
		assert!(token.is_valid());
	}
}
