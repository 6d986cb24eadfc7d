//! `/v1/reference-data` endpoints.

// self
use crate::{
	_prelude::*,
	client::{Client, Response},
	resources,
};

/// Reference data namespace returned by [`Client::reference_data`].
#[derive(Clone, Copy, Debug)]
pub struct ReferenceData<'a> {
	pub(crate) client: &'a Client,
}
impl<'a> ReferenceData<'a> {
	/// `/v1/reference-data/airlines`.
	pub fn airlines(&self) -> Airlines<'a> {
		Airlines { client: self.client }
	}

	/// `/v1/reference-data/locations`.
	pub fn locations(&self) -> Locations<'a> {
		Locations { client: self.client }
	}

	/// `/v1/reference-data/locations/{location_id}`.
	pub fn location(&self, location_id: impl Into<String>) -> Location<'a> {
		Location { client: self.client, location_id: location_id.into() }
	}
}

/// Airline names by code.
#[derive(Clone, Copy, Debug)]
pub struct Airlines<'a> {
	client: &'a Client,
}
impl Airlines<'_> {
	/// API path.
	pub const PATH: &'static str = "/v1/reference-data/airlines";

	/// Looks up airlines for query parameters such as `airlineCodes`.
	pub async fn get<T, P>(&self, params: &P) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		P: ?Sized + Serialize,
	{
		self.client.get(Self::PATH, params).await
	}
}

/// Airport and city search.
#[derive(Clone, Copy, Debug)]
pub struct Locations<'a> {
	client: &'a Client,
}
impl Locations<'_> {
	/// API path.
	pub const PATH: &'static str = "/v1/reference-data/locations";

	/// Searches by `keyword` and `subType`; results are paged.
	pub async fn get<T, P>(&self, params: &P) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		P: ?Sized + Serialize,
	{
		self.client.get(Self::PATH, params).await
	}

	/// `/v1/reference-data/locations/airports`.
	pub async fn airports<T, P>(&self, params: &P) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		P: ?Sized + Serialize,
	{
		self.client.get(&format!("{}/airports", Self::PATH), params).await
	}
}

/// Single location.
#[derive(Clone, Debug)]
pub struct Location<'a> {
	client: &'a Client,
	location_id: String,
}
impl Location<'_> {
	/// Retrieves the location.
	pub async fn get<T>(&self) -> Result<Response<T>>
	where
		T: DeserializeOwned,
	{
		resources::require_id("location_id", &self.location_id)?;

		self.client.get(&format!("{}/{}", Locations::PATH, self.location_id), &Value::Null).await
	}
}
