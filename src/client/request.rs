//! Authenticated request dispatch with verb-aware parameter placement.
//!
//! Every call follows the same order: validate the verb, acquire a token, build headers,
//! then place exactly one transport call. Non-2xx answers become
//! [`TransportError::Status`]; nothing is retried.

// std
use std::time::Instant;
// self
use crate::{
	_prelude::*,
	client::{Client, RequestDescriptor, Response},
	error::TransportError,
	http::{self, HttpVerb},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl Client {
	/// Sends a GET with `params` flattened into the query string.
	pub async fn get<T, P>(&self, path: &str, params: &P) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		P: ?Sized + Serialize,
	{
		self.request(Method::GET, path, to_value(params)?).await
	}

	/// Sends a POST with `body` as the JSON request body.
	pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.request(Method::POST, path, to_value(body)?).await
	}

	/// Sends a DELETE with `params` flattened into the query string.
	pub async fn delete<T, P>(&self, path: &str, params: &P) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		P: ?Sized + Serialize,
	{
		self.request(Method::DELETE, path, to_value(params)?).await
	}

	/// Sends `data` to `path` with `method`, which must be GET, POST, or DELETE.
	pub async fn request<T>(&self, method: Method, path: &str, data: Value) -> Result<Response<T>>
	where
		T: DeserializeOwned,
	{
		self.dispatch(CallKind::Request, method, path, data).await
	}

	pub(crate) async fn dispatch<T>(
		&self,
		kind: CallKind,
		method: Method,
		path: &str,
		data: Value,
	) -> Result<Response<T>>
	where
		T: DeserializeOwned,
	{
		let span = CallSpan::new(kind, "dispatch").with_target(&method, path);

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span.instrument(self.send(method, path, data)).await;

		obs::record_result(kind, &result);

		result
	}

	async fn send<T>(&self, method: Method, path: &str, data: Value) -> Result<Response<T>>
	where
		T: DeserializeOwned,
	{
		let verb = HttpVerb::try_from(&method)?;
		let query = if verb.uses_query() { http::encode_query(&data)? } else { Vec::new() };
		let token = self.inner.tokens.access_token().await?;
		let url = self.inner.config.credentials.endpoint(path);
		let mut builder = self.inner.http.request(verb.method(), url);

		for (name, value) in self.inner.headers.build(&token)? {
			builder = builder.header(name, value);
		}

		builder = if verb.uses_query() { builder.query(&query) } else { builder.json(&data) };

		tracing::debug!(payload_keys = %obs::payload_keys(&data), "Dispatching request.");

		let started = Instant::now();
		let outcome = async {
			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?;

			Ok::<_, TransportError>((status, body))
		}
		.await;
		let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
		let (status, body) = match outcome {
			Ok(parts) => parts,
			Err(e) => {
				tracing::error!(%method, path, elapsed_ms, error = %e, "Request failed.");

				return Err(e.into());
			},
		};

		if !(200..300).contains(&status) {
			tracing::error!(%method, path, elapsed_ms, status, "Upstream API returned an error.");

			return Err(TransportError::from_response(status, &body).into());
		}

		tracing::info!(%method, path, elapsed_ms, status, "Request completed.");

		Ok(Response {
			data: decode(status, &body)?,
			status_code: status,
			request: RequestDescriptor { method, path: path.to_owned(), params: data },
		})
	}
}

fn to_value<P>(params: &P) -> Result<Value>
where
	P: ?Sized + Serialize,
{
	serde_json::to_value(params).map_err(Error::Serialization)
}

fn decode<T>(status: u16, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let body = if body.iter().all(u8::is_ascii_whitespace) { b"null".as_slice() } else { body };
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| Error::Decode { status, source })
}
