//! `/v1/shopping` and `/v2/shopping` endpoints.

// self
use crate::{
	_prelude::*,
	client::{Client, Response},
};

/// Shopping namespace returned by [`Client::shopping`].
#[derive(Clone, Copy, Debug)]
pub struct Shopping<'a> {
	pub(crate) client: &'a Client,
}
impl<'a> Shopping<'a> {
	/// `/v2/shopping/flight-offers`.
	pub fn flight_offers_search(&self) -> FlightOffersSearch<'a> {
		FlightOffersSearch { client: self.client }
	}

	/// `/v1/shopping/flight-destinations`.
	pub fn flight_destinations(&self) -> FlightDestinations<'a> {
		FlightDestinations { client: self.client }
	}

	/// `/v1/shopping/flight-dates`.
	pub fn flight_dates(&self) -> FlightDates<'a> {
		FlightDates { client: self.client }
	}
}

/// Flight offers search.
#[derive(Clone, Copy, Debug)]
pub struct FlightOffersSearch<'a> {
	client: &'a Client,
}
impl FlightOffersSearch<'_> {
	/// API path.
	pub const PATH: &'static str = "/v2/shopping/flight-offers";

	/// Searches with query parameters such as `originLocationCode` and `departureDate`.
	pub async fn get<T, P>(&self, params: &P) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		P: ?Sized + Serialize,
	{
		self.client.get(Self::PATH, params).await
	}

	/// Searches with a full JSON search body.
	pub async fn post<T, B>(&self, body: &B) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.client.post(Self::PATH, body).await
	}
}

/// Cheapest destinations from an origin.
#[derive(Clone, Copy, Debug)]
pub struct FlightDestinations<'a> {
	client: &'a Client,
}
impl FlightDestinations<'_> {
	/// API path.
	pub const PATH: &'static str = "/v1/shopping/flight-destinations";

	/// Finds destinations for query parameters such as `origin`.
	pub async fn get<T, P>(&self, params: &P) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		P: ?Sized + Serialize,
	{
		self.client.get(Self::PATH, params).await
	}
}

/// Cheapest travel dates for a route.
#[derive(Clone, Copy, Debug)]
pub struct FlightDates<'a> {
	client: &'a Client,
}
impl FlightDates<'_> {
	/// API path.
	pub const PATH: &'static str = "/v1/shopping/flight-dates";

	/// Finds dates for query parameters such as `origin` and `destination`.
	pub async fn get<T, P>(&self, params: &P) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		P: ?Sized + Serialize,
	{
		self.client.get(Self::PATH, params).await
	}
}
