//! Transport primitives shared by the token exchange and the request dispatcher.
//!
//! [`ReqwestHttpClient`] owns the connection pool and per-call timeout. The token exchange
//! runs through [`InstrumentedHandle`], an `oauth2` [`AsyncHttpClient`] adapter that stores
//! the response status in a [`ResponseMetadataSlot`] so auth failures can report it.

pub mod query;

pub use query::encode_query;

// std
use std::time::Duration as StdDuration;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
use reqwest::{IntoUrl, Request, RequestBuilder, redirect::Policy};
// self
use crate::{_prelude::*, config::DEFAULT_TIMEOUT, error::ConfigError};

/// Verbs the dispatcher knows how to place parameters for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpVerb {
	/// Parameters travel in the query string.
	Get,
	/// Parameters travel as a JSON body.
	Post,
	/// Parameters travel in the query string.
	Delete,
}
impl HttpVerb {
	/// Returns the matching [`Method`].
	pub fn method(self) -> Method {
		match self {
			HttpVerb::Get => Method::GET,
			HttpVerb::Post => Method::POST,
			HttpVerb::Delete => Method::DELETE,
		}
	}

	/// Returns the upper-case method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpVerb::Get => "GET",
			HttpVerb::Post => "POST",
			HttpVerb::Delete => "DELETE",
		}
	}

	/// Returns `true` when parameters are encoded into the query string.
	pub const fn uses_query(self) -> bool {
		matches!(self, HttpVerb::Get | HttpVerb::Delete)
	}
}
impl TryFrom<&Method> for HttpVerb {
	type Error = Error;

	fn try_from(method: &Method) -> Result<Self> {
		match *method {
			Method::GET => Ok(HttpVerb::Get),
			Method::POST => Ok(HttpVerb::Post),
			Method::DELETE => Ok(HttpVerb::Delete),
			_ => Err(Error::UnsupportedMethod { method: method.to_string() }),
		}
	}
}
impl FromStr for HttpVerb {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_uppercase().as_str() {
			"GET" => Ok(HttpVerb::Get),
			"POST" => Ok(HttpVerb::Post),
			"DELETE" => Ok(HttpVerb::Delete),
			_ => Err(Error::UnsupportedMethod { method: s.to_owned() }),
		}
	}
}
impl Display for HttpVerb {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Captures metadata from the most recent HTTP response for downstream error mapping.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the endpoint, if available.
	pub status: Option<u16>,
}

/// Thread-safe slot for sharing [`ResponseMetadata`] between transport and error layers.
///
/// A fresh slot is created for each token exchange and read immediately after `oauth2`
/// resolves.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The per-call timeout is applied to every request sent through the wrapper, including
/// caller-supplied clients. Clients built by [`ReqwestHttpClient::build`] never follow
/// redirects: the token endpoint must answer directly, and resource endpoints answer with
/// their final status.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
	client: ReqwestClient,
	timeout: StdDuration,
}
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`], applying `timeout` to every call.
	pub fn with_client(client: ReqwestClient, timeout: StdDuration) -> Self {
		Self { client, timeout }
	}

	/// Builds a client applying `timeout` to every call.
	pub fn build(timeout: StdDuration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().timeout(timeout).redirect(Policy::none()).build()?;

		Ok(Self { client, timeout })
	}

	/// Timeout applied to every call.
	pub fn timeout(&self) -> StdDuration {
		self.timeout
	}

	/// Starts a request with the per-call timeout already applied.
	pub fn request(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
		self.client.request(method, url).timeout(self.timeout)
	}

	/// Builds an instrumented handle that captures response metadata.
	pub fn instrumented(&self, slot: ResponseMetadataSlot) -> InstrumentedHandle {
		InstrumentedHandle::new(self.client.clone(), self.timeout, slot)
	}
}
impl Default for ReqwestHttpClient {
	fn default() -> Self {
		Self::with_client(ReqwestClient::default(), DEFAULT_TIMEOUT)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.client
	}
}

struct InstrumentedHttpClient {
	client: ReqwestClient,
	timeout: StdDuration,
	slot: ResponseMetadataSlot,
}

/// `oauth2` transport handle returned by [`ReqwestHttpClient::instrumented`].
#[derive(Clone)]
pub struct InstrumentedHandle(Arc<InstrumentedHttpClient>);
impl InstrumentedHandle {
	fn new(client: ReqwestClient, timeout: StdDuration, slot: ResponseMetadataSlot) -> Self {
		Self(Arc::new(InstrumentedHttpClient { client, timeout, slot }))
	}
}
impl<'c> AsyncHttpClient<'c> for InstrumentedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = Arc::clone(&self.0);

		Box::pin(async move {
			client.slot.take();

			let mut request: Request = request.try_into().map_err(Box::new)?;

			*request.timeout_mut() = Some(client.timeout);

			let response = client.client.execute(request).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();

			client.slot.store(ResponseMetadata { status: Some(status.as_u16()) });

			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn verbs_parse_case_insensitively_and_reject_others() {
		assert_eq!("get".parse::<HttpVerb>().expect("GET is supported."), HttpVerb::Get);
		assert_eq!("Delete".parse::<HttpVerb>().expect("DELETE is supported."), HttpVerb::Delete);

		let err = "PATCH".parse::<HttpVerb>().expect_err("PATCH is not supported.");

		assert!(matches!(err, Error::UnsupportedMethod { ref method } if method == "PATCH"));
	}

	#[test]
	fn verbs_convert_from_methods() {
		assert_eq!(HttpVerb::try_from(&Method::POST).expect("POST is supported."), HttpVerb::Post);
		assert!(HttpVerb::try_from(&Method::PUT).is_err());
		assert!(HttpVerb::Get.uses_query());
		assert!(!HttpVerb::Post.uses_query());
		assert_eq!(HttpVerb::Delete.method(), Method::DELETE);
	}

	#[test]
	fn metadata_slot_is_consumed_on_take() {
		let slot = ResponseMetadataSlot::default();

		slot.store(ResponseMetadata { status: Some(401) });

		assert_eq!(slot.take().and_then(|meta| meta.status), Some(401));
		assert!(slot.take().is_none());
	}

	#[test]
	fn build_applies_timeout() {
		let client =
			ReqwestHttpClient::build(StdDuration::from_secs(60)).expect("Client should build.");

		assert_eq!(client.timeout(), StdDuration::from_secs(60));
	}

	#[test]
	fn requests_carry_the_configured_timeout() {
		let client =
			ReqwestHttpClient::with_client(ReqwestClient::new(), StdDuration::from_millis(300));
		let request = client
			.request(Method::GET, "https://test.api.amadeus.com/v1/reference-data/airlines")
			.build()
			.expect("Request should build.");

		assert_eq!(request.timeout(), Some(&StdDuration::from_millis(300)));
		assert_eq!(ReqwestHttpClient::default().timeout(), DEFAULT_TIMEOUT);
	}
}
