//! Access-token cache with lazy expiry and singleflight refresh.
//!
//! [`TokenManager::access_token`] returns the cached token while the current instant is
//! strictly before its expiry. On a miss the first caller registers a shared in-flight
//! handle under the state lock and runs the exchange; every caller that misses while the
//! handle is registered awaits the same handle and observes its single result. The handle
//! is cleared as soon as the exchange resolves, so a failed exchange never blocks a later
//! independent attempt.

mod metrics;

pub use metrics::TokenMetrics;

// self
use crate::{
	_prelude::*,
	auth::token::{access::AccessToken, secret::TokenSecret},
	error::AuthError,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Boxed future returned by [`TokenSource::exchange`].
pub type ExchangeFuture<'a> =
	Pin<Box<dyn Future<Output = Result<AccessToken, AuthError>> + 'a + Send>>;

/// Anything able to mint a fresh access token.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Performs one token exchange. Implementations must not retry.
	fn exchange(&self) -> ExchangeFuture<'_>;
}

type InFlight = Arc<AsyncOnceCell<Result<AccessToken, AuthError>>>;

#[derive(Default)]
struct TokenState {
	cached: Option<AccessToken>,
	in_flight: Option<InFlight>,
}

/// Owns the single cached access token shared by every caller of a client.
pub struct TokenManager {
	source: Arc<dyn TokenSource>,
	state: RwLock<TokenState>,
	metrics: TokenMetrics,
}
impl TokenManager {
	/// Creates an empty manager backed by `source`.
	pub fn new(source: Arc<dyn TokenSource>) -> Self {
		Self { source, state: Default::default(), metrics: Default::default() }
	}

	/// Returns a valid access token, exchanging credentials only when none is cached or the
	/// cached one has expired.
	///
	/// Concurrent misses share one exchange, which runs inside the future of the first caller.
	/// If that future is dropped before the exchange resolves, the exchange is cancelled and
	/// one of the waiting callers starts a new one, so the token endpoint sees a second request.
	pub async fn access_token(&self) -> Result<TokenSecret, AuthError> {
		let now = OffsetDateTime::now_utc();

		if let Some(value) = self.cached_value_at(now) {
			self.metrics.record_cache_hit();
			tracing::debug!("Using cached access token.");

			return Ok(value);
		}

		let handle = {
			let mut state = self.state.write();

			if let Some(token) = state.cached.as_ref().filter(|token| token.is_valid_at(now)) {
				self.metrics.record_cache_hit();

				return Ok(token.value.clone());
			}

			state.in_flight.get_or_insert_with(|| Arc::new(AsyncOnceCell::new())).clone()
		};
		let outcome = handle.get_or_init(|| self.run_exchange(&handle)).await;

		outcome.as_ref().map(|token| token.value.clone()).map_err(Clone::clone)
	}

	/// Snapshot of the cached token, valid or not.
	pub fn cached(&self) -> Option<AccessToken> {
		self.state.read().cached.clone()
	}

	/// Drops the cached token so the next call performs a fresh exchange.
	pub fn invalidate(&self) {
		self.state.write().cached = None;
	}

	/// Counters describing cache reuse and exchanges.
	pub fn metrics(&self) -> &TokenMetrics {
		&self.metrics
	}

	fn cached_value_at(&self, now: OffsetDateTime) -> Option<TokenSecret> {
		let state = self.state.read();

		state
			.cached
			.as_ref()
			.filter(|token| token.is_valid_at(now))
			.map(|token| token.value.clone())
	}

	async fn run_exchange(&self, handle: &InFlight) -> Result<AccessToken, AuthError> {
		const KIND: CallKind = CallKind::TokenExchange;

		let span = CallSpan::new(KIND, "access_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.metrics.record_exchange();

		let result = span
			.instrument(async {
				tracing::debug!("Fetching new access token.");

				self.source.exchange().await
			})
			.await;
		let mut state = self.state.write();

		if state.in_flight.as_ref().is_some_and(|current| Arc::ptr_eq(current, handle)) {
			state.in_flight = None;
		}

		match &result {
			Ok(token) => {
				state.cached = Some(token.clone());

				tracing::debug!(expires_at = %token.expires_at, "Access token retrieved.");
			},
			Err(e) => {
				self.metrics.record_failure();

				tracing::error!(error = %e, "Failed to obtain access token.");
			},
		}

		obs::record_result(KIND, &result);

		result
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = self.state.read();

		f.debug_struct("TokenManager")
			.field("cached", &state.cached)
			.field("refreshing", &state.in_flight.is_some())
			.field("metrics", &self.metrics)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;

	struct CountingSource {
		calls: AtomicUsize,
		expires_in: Duration,
		fail: bool,
	}
	impl CountingSource {
		fn ok(expires_in: Duration) -> Arc<Self> {
			Arc::new(Self { calls: AtomicUsize::new(0), expires_in, fail: false })
		}

		fn failing() -> Arc<Self> {
			Arc::new(Self { calls: AtomicUsize::new(0), expires_in: Duration::ZERO, fail: true })
		}

		fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}
	impl TokenSource for CountingSource {
		fn exchange(&self) -> ExchangeFuture<'_> {
			Box::pin(async move {
				let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

				tokio::time::sleep(std::time::Duration::from_millis(20)).await;

				if self.fail {
					return Err(AuthError::Rejected {
						status: Some(401),
						reason: format!("invalid_client #{call}"),
					});
				}

				Ok(AccessToken::issued(
					format!("token-{call}"),
					OffsetDateTime::now_utc(),
					self.expires_in,
				))
			})
		}
	}

	#[tokio::test]
	async fn reuses_cached_token_within_validity_window() {
		let source = CountingSource::ok(Duration::hours(1));
		let manager = TokenManager::new(source.clone());

		for _ in 0..5 {
			let token = manager.access_token().await.expect("Exchange should succeed.");

			assert_eq!(token.expose(), "token-1");
		}

		assert_eq!(source.calls(), 1);
		assert_eq!(manager.metrics().exchanges(), 1);
		assert_eq!(manager.metrics().cache_hits(), 4);
	}

	#[tokio::test]
	async fn expired_token_triggers_exactly_one_refresh() {
		let source = CountingSource::ok(Duration::seconds(60));
		let manager = TokenManager::new(source.clone());

		assert_eq!(manager.access_token().await.expect("First exchange.").expose(), "token-1");
		assert_eq!(manager.access_token().await.expect("Second exchange.").expose(), "token-2");
		assert_eq!(source.calls(), 2);
	}

	#[tokio::test]
	async fn cancelled_driver_hands_the_exchange_to_a_waiter() {
		let source = CountingSource::ok(Duration::hours(1));
		let manager = TokenManager::new(source.clone());
		let (driver, waiter) = tokio::join!(
			tokio::time::timeout(std::time::Duration::from_millis(5), manager.access_token()),
			manager.access_token()
		);

		assert!(driver.is_err());
		assert_eq!(waiter.expect("Waiter should finish the exchange.").expose(), "token-2");
		assert_eq!(source.calls(), 2);
		assert_eq!(
			manager.access_token().await.expect("Cached token should be reused.").expose(),
			"token-2"
		);
		assert_eq!(source.calls(), 2);
	}

	#[tokio::test]
	async fn concurrent_misses_share_one_exchange() {
		let source = CountingSource::ok(Duration::hours(1));
		let manager = TokenManager::new(source.clone());
		let (a, b, c) =
			tokio::join!(manager.access_token(), manager.access_token(), manager.access_token());

		for token in [a, b, c] {
			assert_eq!(token.expect("Coalesced call should succeed.").expose(), "token-1");
		}

		assert_eq!(source.calls(), 1);
	}

	#[tokio::test]
	async fn concurrent_failures_share_one_error_without_poisoning() {
		let source = CountingSource::failing();
		let manager = TokenManager::new(source.clone());
		let (a, b) = tokio::join!(manager.access_token(), manager.access_token());
		let a = a.expect_err("Exchange should fail.");
		let b = b.expect_err("Coalesced caller should fail.");

		assert_eq!(a, b);
		assert_eq!(source.calls(), 1);
		assert!(manager.cached().is_none());

		let retry = manager.access_token().await.expect_err("Fresh attempt should run again.");

		assert_eq!(
			retry.to_string(),
			"Authorization server rejected the client credentials: invalid_client #2."
		);
		assert_eq!(source.calls(), 2);
		assert_eq!(manager.metrics().failures(), 2);
	}

	#[tokio::test]
	async fn invalidate_forces_new_exchange() {
		let source = CountingSource::ok(Duration::hours(1));
		let manager = TokenManager::new(source.clone());

		manager.access_token().await.expect("First exchange.");
		manager.invalidate();

		assert_eq!(manager.access_token().await.expect("Second exchange.").expose(), "token-2");
		assert_eq!(source.calls(), 2);
	}
}
