use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A movie document as returned by the full-text index: the index id plus
/// the raw source body. Field accessors tolerate missing or mistyped
/// fields by returning `None`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieDoc {
	pub id: String,
	pub source: Value,
}
impl MovieDoc {
	pub fn new(id: impl Into<String>, source: Value) -> Self {
		Self { id: id.into(), source }
	}

	pub fn title(&self) -> Option<&str> {
		self.source.get("title").and_then(Value::as_str)
	}

	pub fn overview(&self) -> Option<&str> {
		self.source.get("overview").and_then(Value::as_str)
	}

	pub fn collection_id(&self) -> Option<i64> {
		self.source.get("belongs_to_collection").and_then(|coll| coll.get("id"))?.as_i64()
	}

	pub fn vote_average(&self) -> Option<f64> {
		self.source.get("vote_average").and_then(Value::as_f64)
	}

	pub fn vote_count(&self) -> Option<u64> {
		self.source.get("vote_count").and_then(Value::as_u64)
	}

	/// Documents inside a collection with usable text produce the
	/// strongest training signal; everything else is skipped by the
	/// aggregator.
	pub fn reflectable(&self) -> bool {
		self.title().is_some() && self.overview().is_some() && self.collection_id().is_some()
	}
}
