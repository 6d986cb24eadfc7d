//! Searches flight offers against a mocked Amadeus API and walks every result page, showing
//! that the access token is exchanged once and reused for every call.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use amadeus_client::{Client, ClientConfig, Page, PageRelation, Response, oauth::TOKEN_PATH};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":1799}",
			);
		})
		.await;
	let next = server.url("/v2/shopping/flight-offers?originLocationCode=SYD&page%5Boffset%5D=1");
	let first_body = json!({
		"meta": { "count": 2, "links": { "next": next } },
		"data": [{ "type": "flight-offer", "id": "1", "price": { "total": "546.70" } }],
	});
	let first_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/shopping/flight-offers");
			then.status(200).header("content-type", "application/json").body(first_body.to_string());
		})
		.await;
	let config = ClientConfig::builder()
		.base_url(server.base_url())
		.client_id("demo-client")
		.client_secret("demo-secret")
		.application_name("flight-search-demo")
		.build()?;
	// The mock server presents a self-signed certificate.
	let http = amadeus_client::reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()?;
	let client = Client::with_http_client(config, http)?;
	let mut page: Response<Page<Vec<Value>>> = client
		.shopping()
		.flight_offers_search()
		.get(&json!({
			"originLocationCode": "SYD",
			"destinationLocationCode": "BKK",
			"departureDate": "2025-11-01",
			"adults": 1,
		}))
		.await?;


	first_mock.assert_async().await;
	first_mock.delete_async().await;

	let second_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/shopping/flight-offers").query_param("page[offset]", "1");
			then.status(200).header("content-type", "application/json").body(
				"{\"meta\":{\"count\":2},\"data\":[{\"type\":\"flight-offer\",\"id\":\"2\",\"price\":{\"total\":\"612.10\"}}]}",
			);
		})
		.await;

	loop {
		for offer in &page.data.data {
			println!("Offer {} costs {}.", offer["id"], offer["price"]["total"]);
		}

		match client.page(PageRelation::Next, &page).await? {
			Some(next) => page = next,
			None => break,
		}
	}

	token_mock.assert_calls_async(1).await;
	second_mock.assert_async().await;

	Ok(())
}
