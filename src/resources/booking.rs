//! `/v1/booking` endpoints.

// self
use crate::{
	_prelude::*,
	client::{Client, Response},
	resources,
};

/// Booking namespace returned by [`Client::booking`].
#[derive(Clone, Copy, Debug)]
pub struct Booking<'a> {
	pub(crate) client: &'a Client,
}
impl<'a> Booking<'a> {
	/// `/v1/booking/flight-orders`.
	pub fn flight_orders(&self) -> FlightOrders<'a> {
		FlightOrders { client: self.client }
	}

	/// `/v1/booking/flight-orders/{order_id}`.
	pub fn flight_order(&self, order_id: impl Into<String>) -> FlightOrder<'a> {
		FlightOrder { client: self.client, order_id: order_id.into() }
	}
}

/// Flight order creation.
#[derive(Clone, Copy, Debug)]
pub struct FlightOrders<'a> {
	client: &'a Client,
}
impl FlightOrders<'_> {
	/// API path.
	pub const PATH: &'static str = "/v1/booking/flight-orders";

	/// Books priced flight offers for the given travelers.
	pub async fn post<T, B>(&self, body: &B) -> Result<Response<T>>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.client.post(Self::PATH, body).await
	}
}

/// Single flight order.
#[derive(Clone, Debug)]
pub struct FlightOrder<'a> {
	client: &'a Client,
	order_id: String,
}
impl FlightOrder<'_> {
	/// Retrieves the order.
	pub async fn get<T>(&self) -> Result<Response<T>>
	where
		T: DeserializeOwned,
	{
		let path = self.path()?;

		self.client.get(&path, &Value::Null).await
	}

	/// Cancels the order.
	pub async fn delete<T>(&self) -> Result<Response<T>>
	where
		T: DeserializeOwned,
	{
		let path = self.path()?;

		self.client.delete(&path, &Value::Null).await
	}

	fn path(&self) -> Result<String> {
		resources::require_id("order_id", &self.order_id)?;

		Ok(format!("{}/{}", FlightOrders::PATH, self.order_id))
	}
}
