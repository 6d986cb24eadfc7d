//! Client configuration: immutable credentials plus the trace-header application name.
//!
//! Values are validated once at construction; a [`ClientConfig`] that exists is always
//! usable. [`ClientConfig::from_env`] reads the same variables the hosted service uses.

// std
use std::time::Duration as StdDuration;
// crates.io
use reqwest::header::HeaderValue;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Environment variable holding the API base address.
pub const ENV_BASE_URL: &str = "AMADEUS_API_URL";
/// Environment variable holding the OAuth client identifier.
pub const ENV_CLIENT_ID: &str = "AMADEUS_API_KEY";
/// Environment variable holding the OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "AMADEUS_API_SECRET";
/// Environment variable holding the application name used in the trace header.
pub const ENV_APP_NAME: &str = "AMADEUS_APP_NAME";

/// Per-call timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(60);

/// Client identifier, secret, and API base address.
#[derive(Clone)]
pub struct Credentials {
	base_url: String,
	client_id: String,
	client_secret: TokenSecret,
}
impl Credentials {
	/// Validates and stores the credential triple.
	pub fn new(
		base_url: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let base_url = required("base_url", base_url.into())?;
		let client_id = required("client_id", client_id.into())?;
		let client_secret = required("client_secret", client_secret.into())?;

		Url::parse(&base_url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Ok(Self {
			base_url: base_url.trim_end_matches('/').to_owned(),
			client_id,
			client_secret: TokenSecret::new(client_secret),
		})
	}

	/// API base address without a trailing slash.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// OAuth client secret.
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}

	/// Joins the base address and an API path.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}{path}", self.base_url)
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("base_url", &self.base_url)
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.finish()
	}
}

/// Everything a [`Client`](crate::Client) needs before its first call.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Credential triple used for token exchanges and URL construction.
	pub credentials: Credentials,
	/// Application name embedded in the `Ama-Client-Ref` trace header.
	pub application_name: String,
	/// Timeout applied to every transport call.
	pub timeout: StdDuration,
}
impl ClientConfig {
	/// Returns a builder with the default timeout.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Loads the configuration from `AMADEUS_API_URL`, `AMADEUS_API_KEY`,
	/// `AMADEUS_API_SECRET`, and `AMADEUS_APP_NAME`.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Loads the configuration through an arbitrary key lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&'static str) -> Option<String>,
	{
		let fetch = |name: &'static str| {
			lookup(name)
				.filter(|value| !value.trim().is_empty())
				.ok_or(ConfigError::MissingEnv { name })
		};

		Self::builder()
			.base_url(fetch(ENV_BASE_URL)?)
			.client_id(fetch(ENV_CLIENT_ID)?)
			.client_secret(fetch(ENV_CLIENT_SECRET)?)
			.application_name(fetch(ENV_APP_NAME)?)
			.build()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	base_url: Option<String>,
	client_id: Option<String>,
	client_secret: Option<String>,
	application_name: Option<String>,
	timeout: StdDuration,
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			base_url: None,
			client_id: None,
			client_secret: None,
			application_name: None,
			timeout: DEFAULT_TIMEOUT,
		}
	}
}
impl ClientConfigBuilder {
	/// Sets the API base address.
	pub fn base_url(mut self, value: impl Into<String>) -> Self {
		self.base_url = Some(value.into());

		self
	}

	/// Sets the OAuth client identifier.
	pub fn client_id(mut self, value: impl Into<String>) -> Self {
		self.client_id = Some(value.into());

		self
	}

	/// Sets the OAuth client secret.
	pub fn client_secret(mut self, value: impl Into<String>) -> Self {
		self.client_secret = Some(value.into());

		self
	}

	/// Sets the application name used in the trace header.
	pub fn application_name(mut self, value: impl Into<String>) -> Self {
		self.application_name = Some(value.into());

		self
	}

	/// Overrides the per-call timeout (defaults to 60 seconds).
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let credentials = Credentials::new(
			self.base_url.unwrap_or_default(),
			self.client_id.unwrap_or_default(),
			self.client_secret.unwrap_or_default(),
		)?;
		let application_name =
			required("application_name", self.application_name.unwrap_or_default())?;

		if HeaderValue::from_str(&application_name).is_err() {
			return Err(ConfigError::InvalidApplicationName { name: application_name });
		}

		Ok(ClientConfig { credentials, application_name, timeout: self.timeout })
	}
}

fn required(field: &'static str, value: String) -> Result<String, ConfigError> {
	if value.trim().is_empty() { Err(ConfigError::MissingField { field }) } else { Ok(value) }
}
