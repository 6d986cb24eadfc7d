//! Shared API client: one token cache, one connection pool, many callers.
//!
//! [`Client`] is cheap to clone; every clone shares the same [`TokenManager`] so concurrent
//! calls reuse a single access token. Dispatch lives in `client::request` and the pagination
//! replay in `client::page`.

mod page;
mod request;

// self
use crate::{
	_prelude::*,
	auth::TokenManager,
	config::ClientConfig,
	error::ConfigError,
	headers::HeaderBuilder,
	http::ReqwestHttpClient,
	oauth::BasicFacade,
};

/// Successful call result handed back to resource namespaces.
#[derive(Clone, Debug)]
pub struct Response<T> {
	/// Decoded response body.
	pub data: T,
	/// HTTP status returned by the upstream API.
	pub status_code: u16,
	/// Request that produced this response, kept for pagination replays.
	pub request: RequestDescriptor,
}
impl<T> Response<T> {
	/// Consumes the response, returning the decoded body.
	pub fn into_data(self) -> T {
		self.data
	}
}

/// Method, path, and parameters of a completed call.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
	/// HTTP method used for the call.
	pub method: Method,
	/// API path relative to the base address.
	pub path: String,
	/// Query parameters (GET, DELETE) or JSON body (POST) as sent.
	pub params: Value,
}

struct ClientInner {
	config: ClientConfig,
	tokens: TokenManager,
	headers: HeaderBuilder,
	http: ReqwestHttpClient,
}

/// Authenticated client for the Amadeus REST APIs.
#[derive(Clone)]
pub struct Client {
	inner: Arc<ClientInner>,
}
impl Client {
	/// Builds a client with a reqwest pool honoring `config.timeout`.
	pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
		let http = ReqwestHttpClient::build(config.timeout)?;

		Self::with_http(config, http)
	}

	/// Builds a client reusing a caller-provided reqwest client.
	///
	/// `config.timeout` still applies to every call; the caller's client keeps its own
	/// redirect and TLS settings.
	pub fn with_http_client(
		config: ClientConfig,
		client: ReqwestClient,
	) -> Result<Self, ConfigError> {
		let timeout = config.timeout;

		Self::with_http(config, ReqwestHttpClient::with_client(client, timeout))
	}

	fn with_http(config: ClientConfig, http: ReqwestHttpClient) -> Result<Self, ConfigError> {
		let source = BasicFacade::from_credentials(&config.credentials, http.clone())?;
		let tokens = TokenManager::new(Arc::new(source));
		let headers = HeaderBuilder::new(config.application_name.clone());

		Ok(Self { inner: Arc::new(ClientInner { config, tokens, headers, http }) })
	}

	/// Configuration the client was built from.
	pub fn config(&self) -> &ClientConfig {
		&self.inner.config
	}

	/// Token cache shared by every clone of this client.
	pub fn tokens(&self) -> &TokenManager {
		&self.inner.tokens
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.inner.config.credentials.base_url())
			.field("application_name", &self.inner.config.application_name)
			.field("tokens", &self.inner.tokens)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config() -> ClientConfig {
		ClientConfig::builder()
			.base_url("https://test.api.amadeus.com")
			.client_id("client")
			.client_secret("secret")
			.application_name("triply")
			.build()
			.expect("Test configuration should build.")
	}

	#[test]
	fn clones_share_one_token_cache() {
		let client = Client::new(config()).expect("Client should build.");
		let clone = client.clone();

		assert!(std::ptr::eq(client.tokens(), clone.tokens()));
		assert_eq!(clone.config().application_name, "triply");
		assert!(!format!("{client:?}").contains("secret"));
	}

	#[test]
	fn response_exposes_decoded_body() {
		let response = Response {
			data: 7_u8,
			status_code: 200,
			request: RequestDescriptor {
				method: Method::GET,
				path: "/v1/reference-data/airlines".into(),
				params: Value::Null,
			},
		};

		assert_eq!(response.request.method, Method::GET);
		assert_eq!(response.into_data(), 7);
	}
}
