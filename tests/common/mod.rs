//! Shared fixtures for integration tests backed by `httpmock`.

#![allow(dead_code)]

// std
use std::time::Duration;
// crates.io
use httpmock::{Mock, prelude::*};
// self
use amadeus_client::{Client, ClientConfig, oauth::TOKEN_PATH};

pub const CLIENT_ID: &str = "amadeus-client-id";
pub const CLIENT_SECRET: &str = "amadeus-client-secret";
pub const APP_NAME: &str = "triply";

pub fn config(server: &MockServer) -> ClientConfig {
	config_with_timeout(server, Duration::from_secs(5))
}

pub fn config_with_timeout(server: &MockServer, timeout: Duration) -> ClientConfig {
	ClientConfig::builder()
		.base_url(server.base_url())
		.client_id(CLIENT_ID)
		.client_secret(CLIENT_SECRET)
		.application_name(APP_NAME)
		.timeout(timeout)
		.build()
		.expect("Mock server configuration should build.")
}

/// Reqwest client that trusts the self-signed certificate served by `httpmock`.
pub fn insecure_http_client() -> amadeus_client::reqwest::Client {
	amadeus_client::reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.")
}

pub fn client(server: &MockServer) -> Client {
	client_with_config(config(server))
}

pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> Client {
	client_with_config(config_with_timeout(server, timeout))
}

pub fn client_with_config(config: ClientConfig) -> Client {
	Client::with_http_client(config, insecure_http_client())
		.expect("Client should build against the mock server.")
}

/// Token endpoint answering `access_token` with the given lifetime.
pub async fn mock_token<'a>(
	server: &'a MockServer,
	access_token: &str,
	expires_in: u64,
) -> Mock<'a> {
	let body = format!(
		"{{\"type\":\"amadeusOAuth2Token\",\"access_token\":\"{access_token}\",\"token_type\":\"Bearer\",\"expires_in\":{expires_in},\"state\":\"approved\"}}"
	);

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("content-type", "application/x-www-form-urlencoded")
				.form_urlencoded_tuple("grant_type", "client_credentials")
				.form_urlencoded_tuple("client_id", CLIENT_ID)
				.form_urlencoded_tuple("client_secret", CLIENT_SECRET);
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

/// Token endpoint answering with a slow response so concurrent callers overlap.
pub async fn mock_slow_token<'a>(server: &'a MockServer, status: u16, body: &str) -> Mock<'a> {
	let body = body.to_owned();

	server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(status)
				.header("content-type", "application/json")
				.delay(Duration::from_millis(250))
				.body(body);
		})
		.await
}
