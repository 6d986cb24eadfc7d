//! Pagination replay of a previous request at the offset named by a page link.

// self
use crate::{
	_prelude::*,
	client::{Client, Response},
	http::HttpVerb,
	obs::CallKind,
	pagination::{self, PageRelation, Paginated},
};

impl Client {
	/// Fetches the page named by `relation` from the links carried by `previous`.
	///
	/// Returns `Ok(None)` without any network call when the link is absent or carries no
	/// usable `page[offset]`. Otherwise the original method and path are replayed with
	/// `page.offset` set in the original parameters.
	pub async fn page<T>(
		&self,
		relation: PageRelation,
		previous: &Response<T>,
	) -> Result<Option<Response<T>>>
	where
		T: Paginated + DeserializeOwned,
	{
		let Some(link) = previous.data.page_link(relation) else {
			tracing::debug!(%relation, "Response has no link for the requested page.");

			return Ok(None);
		};
		let Some(offset) = pagination::offset_from_link(link) else {
			tracing::debug!(%relation, "Page link carries no usable offset.");

			return Ok(None);
		};
		let request = &previous.request;

		HttpVerb::try_from(&request.method)?;

		let params = pagination::with_offset(&request.params, &offset);

		self.dispatch(CallKind::Page, request.method.clone(), &request.path, params).await.map(Some)
	}
}
