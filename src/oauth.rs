//! Client-credentials exchange built on the `oauth2` crate.
//!
//! [`BasicFacade`] posts `grant_type=client_credentials` with the client identifier and
//! secret in the form body to `{base}/v1/security/oauth2/token` and maps every failure into
//! an [`AuthError`].

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ExchangeFuture, TokenSource},
	config::Credentials,
	error::{AuthError, ConfigError},
	http::{ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
};

/// API path of the client-credentials token endpoint.
pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// [`TokenSource`] that exchanges the configured client credentials for an access token.
pub struct BasicFacade {
	oauth_client: ConfiguredBasicClient,
	http_client: ReqwestHttpClient,
}
impl BasicFacade {
	/// Prepares an exchange against the token endpoint derived from `credentials`.
	pub fn from_credentials(
		credentials: &Credentials,
		http_client: ReqwestHttpClient,
	) -> Result<Self, ConfigError> {
		let token_url = TokenUrl::new(credentials.endpoint(TOKEN_PATH))
			.map_err(|source| ConfigError::InvalidTokenEndpoint { source })?;
		let oauth_client = BasicClient::new(ClientId::new(credentials.client_id().to_owned()))
			.set_client_secret(ClientSecret::new(credentials.client_secret().expose().to_owned()))
			.set_auth_type(AuthType::RequestBody)
			.set_token_uri(token_url);

		Ok(Self { oauth_client, http_client })
	}

	/// Token endpoint the facade posts to.
	pub fn token_url(&self) -> &str {
		self.oauth_client.token_uri().url().as_str()
	}
}
impl TokenSource for BasicFacade {
	fn exchange(&self) -> ExchangeFuture<'_> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let instrumented = self.http_client.instrumented(meta.clone());
			let response = self
				.oauth_client
				.exchange_client_credentials()
				.request_async(&instrumented)
				.await
				.map_err(|err| map_request_error(meta.take(), err))?;

			map_token_response(response)
		})
	}
}
impl Debug for BasicFacade {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BasicFacade").field("token_url", &self.token_url()).finish()
	}
}

fn map_token_response(response: BasicTokenResponse) -> Result<AccessToken, AuthError> {
	let malformed = |message: &str| AuthError::MalformedResponse {
		status: Some(200),
		message: message.to_owned(),
	};
	let expires_in =
		response.expires_in().ok_or_else(|| malformed("missing `expires_in`"))?.as_secs();
	let expires_in = i64::try_from(expires_in).map_err(|_| malformed("`expires_in` overflows"))?;

	if expires_in <= 0 {
		return Err(malformed("`expires_in` must be positive"));
	}

	let value = response.access_token().secret();

	if value.is_empty() {
		return Err(malformed("empty `access_token`"));
	}

	Ok(AccessToken::issued(
		value.to_owned(),
		OffsetDateTime::now_utc(),
		Duration::seconds(expires_in),
	))
}

fn map_request_error(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<ReqwestError>>,
) -> AuthError {
	let status = meta.and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(status, response),
		RequestTokenError::Request(error) => map_transport_error(error),
		RequestTokenError::Parse(error, body) =>
			if status.is_some_and(|code| !(200..300).contains(&code)) {
				AuthError::Rejected { status, reason: rejection_reason(&body) }
			} else {
				AuthError::MalformedResponse { status, message: error.to_string() }
			},
		RequestTokenError::Other(message) => AuthError::MalformedResponse { status, message },
	}
}

fn map_server_response_error(status: Option<u16>, response: BasicErrorResponse) -> AuthError {
	let reason = response
		.error_description()
		.cloned()
		.unwrap_or_else(|| response.error().as_ref().to_owned());

	AuthError::Rejected { status, reason }
}

fn map_transport_error(err: HttpClientError<ReqwestError>) -> AuthError {
	let message = match err {
		HttpClientError::Reqwest(inner) if inner.is_timeout() =>
			"request to the token endpoint timed out".to_owned(),
		HttpClientError::Reqwest(inner) => inner.to_string(),
		HttpClientError::Http(inner) => inner.to_string(),
		HttpClientError::Io(inner) => inner.to_string(),
		HttpClientError::Other(message) => message,
		_ => "unknown HTTP client failure".to_owned(),
	};

	AuthError::Unreachable { message }
}

fn rejection_reason(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);
	let text = text.trim();

	if text.is_empty() { "empty error response".to_owned() } else { text.to_owned() }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn credentials(base_url: &str) -> Credentials {
		Credentials::new(base_url, "client", "secret").expect("Credentials should be valid.")
	}

	#[test]
	fn token_url_is_derived_from_base_url() {
		let facade = BasicFacade::from_credentials(
			&credentials("https://test.api.amadeus.com/"),
			ReqwestHttpClient::default(),
		)
		.expect("Facade should build.");

		assert_eq!(facade.token_url(), "https://test.api.amadeus.com/v1/security/oauth2/token");
		assert!(!format!("{facade:?}").contains("secret"));
	}

	#[test]
	fn rejection_reason_trims_raw_bodies() {
		let reason = rejection_reason(b"  Unauthorized  ");

		assert_eq!(reason, "Unauthorized");
		assert_eq!(rejection_reason(b""), "empty error response");
	}
}
