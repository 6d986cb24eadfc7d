//! Client-level error types shared by the token manager, dispatcher, and pagination helper.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Generic message surfaced when the upstream did not supply an error body.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while making the request";

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; no client can be used.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token exchange with the authorization server failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Resource call failed upstream or on the wire.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Verb outside GET, POST, and DELETE.
	#[error("Unsupported HTTP method: {method}.")]
	UnsupportedMethod {
		/// Rejected method name.
		method: String,
	},
	/// Payload has a shape the verb cannot carry.
	#[error("Request payload is invalid: {reason}.")]
	InvalidPayload {
		/// Why the payload was rejected.
		reason: &'static str,
	},
	/// Payload could not be converted into JSON.
	#[error("Request payload could not be serialized.")]
	Serialization(#[source] serde_json::Error),
	/// Successful response body did not match the requested type.
	#[error("Response body returned with HTTP {status} could not be decoded.")]
	Decode {
		/// HTTP status of the decoded response.
		status: u16,
		/// Structured decoding failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Trace reference timestamp could not be rendered.
	#[error("Request timestamp could not be formatted.")]
	Timestamp(#[source] time::error::Format),
	/// Resource namespace was given an empty path identifier.
	#[error("Missing required parameter `{name}`.")]
	MissingParameter {
		/// Parameter name.
		name: &'static str,
	},
}
impl Error {
	/// Returns the [`TransportError`] when the failure came from a resource call.
	pub fn as_transport(&self) -> Option<&TransportError> {
		match self {
			Self::Transport(e) => Some(e),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised while constructing a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Required setting is missing or blank.
	#[error("Missing required setting `{field}`.")]
	MissingField {
		/// Setting name.
		field: &'static str,
	},
	/// Required environment variable is not set.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// Base address is not an absolute URL.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Token endpoint derived from the base address was rejected.
	#[error("Token endpoint URL is invalid.")]
	InvalidTokenEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// Application name cannot be placed in the trace header.
	#[error("Application name `{name}` is not a valid header value.")]
	InvalidApplicationName {
		/// Offending application name.
		name: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token exchange failures.
///
/// Values are cloneable so every caller coalesced onto one in-flight exchange receives the
/// identical failure.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum AuthError {
	/// Authorization server answered with an OAuth error (bad credentials, disabled client).
	#[error("Authorization server rejected the client credentials: {reason}.")]
	Rejected {
		/// HTTP status, when available.
		status: Option<u16>,
		/// OAuth `error_description`, or the `error` code when no description was sent.
		reason: String,
	},
	/// Authorization server could not be reached or the call timed out.
	#[error("Authorization server could not be reached: {message}.")]
	Unreachable {
		/// Transport failure summary.
		message: String,
	},
	/// Authorization server answered with something other than a usable token response.
	#[error("Token endpoint returned a malformed response: {message}.")]
	MalformedResponse {
		/// HTTP status, when available.
		status: Option<u16>,
		/// What was wrong with the response.
		message: String,
	},
}
impl AuthError {
	/// HTTP status reported by the authorization server, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status, .. } | Self::MalformedResponse { status, .. } => *status,
			Self::Unreachable { .. } => None,
		}
	}
}

/// Resource call failures (non-2xx responses, network, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Upstream answered with a non-2xx status.
	#[error("Upstream API responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Upstream error body: parsed JSON, raw text as a JSON string, or a generic message.
		body: Value,
	},
	/// Connection, TLS, or timeout failure before a status was received.
	#[error("Network error occurred while calling the upstream API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Builds a status failure, normalizing the upstream body.
	pub fn from_response(status: u16, body: &[u8]) -> Self {
		Self::Status { status, body: normalize_body(body) }
	}

	/// HTTP status, when the upstream answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			Self::Network { .. } => None,
		}
	}

	/// Upstream body, or the generic failure message when none is available.
	pub fn body(&self) -> Value {
		match self {
			Self::Status { body, .. } => body.clone(),
			Self::Network { .. } => Value::String(GENERIC_FAILURE_MESSAGE.into()),
		}
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

fn normalize_body(body: &[u8]) -> Value {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Value::String(GENERIC_FAILURE_MESSAGE.into());
	}

	serde_json::from_slice(body)
		.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
