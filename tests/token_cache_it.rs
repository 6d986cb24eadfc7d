mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use amadeus_client::{Error, Response, error::AuthError};

const AIRLINES: &str = "/v1/reference-data/airlines";

async fn mock_airlines<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
	let authorization = format!("Bearer {token}");

	server
		.mock_async(|when, then| {
			when.method(GET).path(AIRLINES).header("authorization", authorization);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":[{\"iataCode\":\"BA\",\"businessName\":\"BRITISH AIRWAYS\"}]}");
		})
		.await
}

#[tokio::test]
async fn cached_token_is_reused_within_validity_window() {
	let server = MockServer::start_async().await;
	let token_mock = common::mock_token(&server, "access-1", 1799).await;
	let airlines_mock = mock_airlines(&server, "access-1").await;
	let client = common::client(&server);

	for _ in 0..3 {
		let response: Response<Value> = client
			.get(AIRLINES, &json!({ "airlineCodes": "BA" }))
			.await
			.expect("Airline lookup should succeed.");

		assert_eq!(response.status_code, 200);
	}

	token_mock.assert_calls_async(1).await;
	airlines_mock.assert_calls_async(3).await;

	assert_eq!(client.tokens().metrics().exchanges(), 1);
	assert!(client.tokens().cached().is_some_and(|token| token.is_valid()));
}

#[tokio::test]
async fn expired_token_is_refreshed_once_per_call() {
	let server = MockServer::start_async().await;
	// A 60-second lifetime is consumed entirely by the expiry safety margin.
	let token_mock = common::mock_token(&server, "short-lived", 60).await;
	let airlines_mock = mock_airlines(&server, "short-lived").await;
	let client = common::client(&server);

	client.get::<Value, _>(AIRLINES, &Value::Null).await.expect("First call should succeed.");
	client.get::<Value, _>(AIRLINES, &Value::Null).await.expect("Second call should succeed.");

	token_mock.assert_calls_async(2).await;
	airlines_mock.assert_calls_async(2).await;
	token_mock.delete_async().await;

	let fresh_mock = common::mock_token(&server, "long-lived", 3600).await;
	let long_lived_mock = mock_airlines(&server, "long-lived").await;

	client.get::<Value, _>(AIRLINES, &Value::Null).await.expect("Third call should succeed.");
	client.get::<Value, _>(AIRLINES, &Value::Null).await.expect("Fourth call should succeed.");

	fresh_mock.assert_calls_async(1).await;
	long_lived_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn concurrent_cache_misses_share_one_exchange() {
	let server = MockServer::start_async().await;
	let token_mock = common::mock_slow_token(
		&server,
		200,
		"{\"access_token\":\"shared\",\"token_type\":\"Bearer\",\"expires_in\":1799}",
	)
	.await;
	let airlines_mock = mock_airlines(&server, "shared").await;
	let client = common::client(&server);
	let (a, b, c) = tokio::join!(
		client.get::<Value, _>(AIRLINES, &Value::Null),
		client.get::<Value, _>(AIRLINES, &Value::Null),
		client.get::<Value, _>(AIRLINES, &Value::Null),
	);

	for result in [a, b, c] {
		assert_eq!(result.expect("Coalesced call should succeed.").status_code, 200);
	}

	token_mock.assert_calls_async(1).await;
	airlines_mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn concurrent_failures_share_one_error_and_do_not_poison_the_cache() {
	let server = MockServer::start_async().await;
	let token_mock = common::mock_slow_token(
		&server,
		401,
		"{\"error\":\"invalid_client\",\"error_description\":\"Client credentials are invalid\",\"code\":38187,\"title\":\"Invalid parameters\"}",
	)
	.await;
	let airlines_mock = mock_airlines(&server, "never-issued").await;
	let client = common::client(&server);
	let (a, b) = tokio::join!(
		client.get::<Value, _>(AIRLINES, &Value::Null),
		client.get::<Value, _>(AIRLINES, &Value::Null),
	);
	let (Err(Error::Auth(a)), Err(Error::Auth(b))) = (a, b) else {
		panic!("Both callers should receive an authorization failure.");
	};

	assert_eq!(a, b);
	assert_eq!(
		a,
		AuthError::Rejected { status: Some(401), reason: "Client credentials are invalid".into() }
	);

	token_mock.assert_calls_async(1).await;
	airlines_mock.assert_calls_async(0).await;

	let retry = client.get::<Value, _>(AIRLINES, &Value::Null).await;

	assert!(matches!(retry, Err(Error::Auth(AuthError::Rejected { status: Some(401), .. }))));

	token_mock.assert_calls_async(2).await;

	assert!(client.tokens().cached().is_none());
	assert_eq!(client.tokens().metrics().failures(), 2);
}

#[tokio::test]
async fn token_response_without_expiry_is_malformed() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(amadeus_client::oauth::TOKEN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"no-expiry\",\"token_type\":\"Bearer\"}");
		})
		.await;
	let client = common::client(&server);
	let err = client
		.get::<Value, _>(AIRLINES, &Value::Null)
		.await
		.expect_err("Token without expires_in must be rejected.");

	token_mock.assert_async().await;

	assert!(matches!(err, Error::Auth(AuthError::MalformedResponse { .. })));
	assert!(client.tokens().cached().is_none());
}

#[tokio::test]
async fn invalidate_forces_a_new_exchange() {
	let server = MockServer::start_async().await;
	let token_mock = common::mock_token(&server, "access-1", 1799).await;
	let airlines_mock = mock_airlines(&server, "access-1").await;
	let client = common::client(&server);

	client.get::<Value, _>(AIRLINES, &Value::Null).await.expect("First call should succeed.");
	client.tokens().invalidate();
	client.get::<Value, _>(AIRLINES, &Value::Null).await.expect("Second call should succeed.");

	token_mock.assert_calls_async(2).await;
	airlines_mock.assert_calls_async(2).await;
}
