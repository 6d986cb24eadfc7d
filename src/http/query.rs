//! Query-string flattening for GET and DELETE parameters.
//!
//! Nested objects use bracket notation (`page[offset]=25`), arrays repeat the key with a
//! trailing `[]`, and nulls are skipped. The resulting pairs are handed to reqwest, which
//! performs the percent-encoding.

// self
use crate::_prelude::*;

/// Flattens `params` into ordered query pairs.
///
/// `params` must be a JSON object or null; any other shape yields
/// [`Error::InvalidPayload`].
pub fn encode_query(params: &Value) -> Result<Vec<(String, String)>> {
	let mut pairs = Vec::new();

	match params {
		Value::Null => {},
		Value::Object(map) =>
			for (key, value) in map {
				flatten(key.clone(), value, &mut pairs);
			},
		_ =>
			return Err(Error::InvalidPayload {
				reason: "query parameters must be a JSON object",
			}),
	}

	Ok(pairs)
}

fn flatten(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
	match value {
		Value::Null => {},
		Value::Bool(b) => pairs.push((key, b.to_string())),
		Value::Number(n) => pairs.push((key, n.to_string())),
		Value::String(s) => pairs.push((key, s.clone())),
		Value::Array(items) => {
			let key = format!("{key}[]");

			for item in items {
				flatten(key.clone(), item, pairs);
			}
		},
		Value::Object(map) =>
			for (sub, value) in map {
				flatten(format!("{key}[{sub}]"), value, pairs);
			},
	}
}
