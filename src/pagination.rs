//! Link-based pagination model.
//!
//! Paged responses carry absolute links under `meta.links`, keyed by relation. The offset to
//! replay is read from the decoded `page[offset]` query key of the chosen link; a missing
//! link, an unparseable URL, or a link without that key means there is no such page.

// crates.io
use serde_json::Map;
// self
use crate::_prelude::*;

/// Decoded query key carrying the page offset.
pub const OFFSET_KEY: &str = "page[offset]";

// Relative links only contribute their query string.
const LINK_BASE: &str = "http://localhost/";

/// Relation names found under `meta.links`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageRelation {
	/// Following page.
	Next,
	/// Preceding page.
	Previous,
	/// First page.
	First,
	/// Last page.
	Last,
}
impl PageRelation {
	/// Returns the key used in `meta.links`.
	pub const fn as_str(self) -> &'static str {
		match self {
			PageRelation::Next => "next",
			PageRelation::Previous => "previous",
			PageRelation::First => "first",
			PageRelation::Last => "last",
		}
	}
}
impl FromStr for PageRelation {
	type Err = UnknownPageRelation;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"next" => Ok(PageRelation::Next),
			"previous" => Ok(PageRelation::Previous),
			"first" => Ok(PageRelation::First),
			"last" => Ok(PageRelation::Last),
			other => Err(UnknownPageRelation(other.to_owned())),
		}
	}
}
impl Display for PageRelation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Relation name outside `next`, `previous`, `first`, and `last`.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown page relation `{0}`.")]
pub struct UnknownPageRelation(pub String);

/// Links keyed by relation name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageLinks(pub BTreeMap<String, String>);
impl PageLinks {
	/// Returns the link for `relation`, if present.
	pub fn get(&self, relation: PageRelation) -> Option<&str> {
		self.0.get(relation.as_str()).map(String::as_str)
	}
}

/// Collection metadata attached to paged responses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
	/// Total number of results, when reported.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub count: Option<u64>,
	/// Navigation links.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<PageLinks>,
}

/// Typed envelope for paged bodies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<D> {
	/// Page items.
	pub data: D,
	/// Collection metadata.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<PageMeta>,
	/// Lookup tables shared by the items (carriers, aircraft, locations).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dictionaries: Option<Value>,
}

/// Response bodies that may carry pagination links.
pub trait Paginated {
	/// Returns the link for `relation`, if the body has one.
	fn page_link(&self, relation: PageRelation) -> Option<&str>;
}
impl Paginated for Value {
	fn page_link(&self, relation: PageRelation) -> Option<&str> {
		self.get("meta")?.get("links")?.get(relation.as_str())?.as_str()
	}
}
impl<D> Paginated for Page<D> {
	fn page_link(&self, relation: PageRelation) -> Option<&str> {
		self.meta.as_ref()?.links.as_ref()?.get(relation)
	}
}

/// Reads the `page[offset]` value from an absolute or relative link.
pub fn offset_from_link(link: &str) -> Option<String> {
	let base = Url::parse(LINK_BASE).ok()?;
	let url = Url::options().base_url(Some(&base)).parse(link).ok()?;

	url.query_pairs()
		.find(|(key, _)| key == OFFSET_KEY)
		.map(|(_, value)| value.into_owned())
		.filter(|value| !value.is_empty())
}

/// Returns a copy of `params` with `page.offset` set to `offset`.
///
/// Null or non-object params start from an empty object; a non-object `page` is replaced.
pub fn with_offset(params: &Value, offset: &str) -> Value {
	let mut params = match params {
		Value::Object(map) => map.clone(),
		_ => Map::new(),
	};
	let page = params.entry("page").or_insert_with(|| Value::Object(Map::new()));

	if !page.is_object() {
		*page = Value::Object(Map::new());
	}
	if let Value::Object(page) = page {
		page.insert("offset".into(), Value::String(offset.to_owned()));
	}

	Value::Object(params)
}
