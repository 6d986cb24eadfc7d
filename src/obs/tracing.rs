// crates.io
use tracing::{Span, field};
// self
use crate::{_prelude::*, obs::CallKind};

/// Span wrapper used by client calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	span: Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		let span = tracing::info_span!(
			"amadeus_client.call",
			kind = kind.as_str(),
			stage,
			method = field::Empty,
			path = field::Empty,
		);

		Self { span }
	}

	/// Records the HTTP method and API path on the span.
	pub fn with_target(self, method: &Method, path: &str) -> Self {
		self.span.record("method", method.as_str());
		self.span.record("path", path);

		self
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> tracing::instrument::Instrumented<Fut>
	where
		Fut: Future,
	{
		use tracing::Instrument;

		fut.instrument(self.span.clone())
	}
}
