use std::time::Duration;

use serde_json::{Value, json};

use reflekt_domain::MovieDoc;

use crate::{Error, PhraseStats, Result, SearchIndex};

/// How many top matches a phrase-stats query pulls back to derive the
/// popularity range.
const PHRASE_STATS_SIZE: u32 = 5_000;
const COLLECTION_SIZE: u32 = 50;
const EXACT_TITLE_SIZE: u32 = 10;
const TITLE_SEARCH_SIZE: u32 = 1;

/// Blocking Elasticsearch-style client. One `_search` POST per call; the
/// query bodies mirror the index's document layout (`text_all.en` body
/// field, `title_sent` sentinel title field, `belongs_to_collection.id`).
pub struct EsIndex {
	client: reqwest::blocking::Client,
	url: String,
	index: String,
}
impl EsIndex {
	pub fn new(cfg: &reflekt_config::Index) -> Result<Self> {
		let client = reqwest::blocking::Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()?;

		Ok(Self { client, url: cfg.url.clone(), index: cfg.index.clone() })
	}

	fn search(&self, body: Value) -> Result<Value> {
		let url = format!("{}/{}/_search", self.url, self.index);
		let res = self.client.post(&url).json(&body).send()?;
		let json = res.error_for_status()?.json::<Value>()?;

		Ok(json)
	}
}
impl SearchIndex for EsIndex {
	fn phrase_stats(&self, phrase: &str) -> Result<PhraseStats> {
		let body = json!({
			"size": PHRASE_STATS_SIZE,
			"sort": [
				{ "vote_average": "desc" }
			],
			"query": {
				"match_phrase": {
					"text_all.en": phrase
				}
			}
		});
		let res = self.search(body)?;
		let frequency = hits_total(&res)?;
		let docs = hits_docs(&res)?;
		let (min_popularity, max_popularity) = reflekt_domain::popularity_range(&docs);

		Ok(PhraseStats { frequency, min_popularity, max_popularity })
	}

	fn collection_members(&self, collection_id: i64) -> Result<Vec<MovieDoc>> {
		let body = json!({
			"size": COLLECTION_SIZE,
			"sort": [
				{ "vote_average": "desc" }
			],
			"query": {
				"bool": {
					"must": [
						{ "match": { "belongs_to_collection.id": collection_id } }
					]
				}
			}
		});
		let res = self.search(body)?;

		hits_docs(&res)
	}

	fn exact_title_matches(&self, title: &str, exclude_id: &str) -> Result<Vec<MovieDoc>> {
		let body = json!({
			"size": EXACT_TITLE_SIZE,
			"query": {
				"bool": {
					"must": [
						{
							"match_phrase": {
								"title_sent": {
									"query": format!("SENTINEL_BEGIN {title} SENTINEL_END"),
									"boost": 10_000.0
								}
							}
						}
					],
					"must_not": [
						{ "match": { "_id": exclude_id } }
					]
				}
			}
		});
		let res = self.search(body)?;

		hits_docs(&res)
	}

	fn title_phrase_search(&self, title: &str) -> Result<Vec<MovieDoc>> {
		let body = json!({
			"size": TITLE_SEARCH_SIZE,
			"query": {
				"match_phrase": { "title": title }
			}
		});
		let res = self.search(body)?;

		hits_docs(&res)
	}

	fn corpus_sample(&self, limit: u32) -> Result<Vec<MovieDoc>> {
		let body = json!({
			"size": limit,
			"query": {
				"match_all": {}
			}
		});
		let res = self.search(body)?;

		hits_docs(&res)
	}
}

/// Total hit count; tolerates both the bare-integer and the
/// `{ "value": n }` response shapes.
fn hits_total(res: &Value) -> Result<u64> {
	let total = res.get("hits").and_then(|hits| hits.get("total")).ok_or_else(|| {
		Error::InvalidResponse { message: "Search response is missing hits.total.".to_string() }
	})?;

	if let Some(n) = total.as_u64() {
		return Ok(n);
	}
	if let Some(n) = total.get("value").and_then(Value::as_u64) {
		return Ok(n);
	}

	Err(Error::InvalidResponse {
		message: "Search response hits.total is not a count.".to_string(),
	})
}

fn hits_docs(res: &Value) -> Result<Vec<MovieDoc>> {
	let hits = res
		.get("hits")
		.and_then(|hits| hits.get("hits"))
		.and_then(Value::as_array)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Search response is missing hits.hits.".to_string(),
		})?;
	let mut docs = Vec::with_capacity(hits.len());

	for hit in hits {
		let id = match hit.get("_id") {
			Some(Value::String(id)) => id.clone(),
			Some(Value::Number(id)) => id.to_string(),
			_ =>
				return Err(Error::InvalidResponse {
					message: "Search hit is missing _id.".to_string(),
				}),
		};
		let source = hit.get("_source").cloned().unwrap_or(Value::Null);

		docs.push(MovieDoc::new(id, source));
	}

	Ok(docs)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn parses_bare_integer_totals() {
		let res = json!({ "hits": { "total": 42, "hits": [] } });

		assert_eq!(hits_total(&res).expect("parse failed"), 42);
	}

	#[test]
	fn parses_object_totals() {
		let res = json!({ "hits": { "total": { "value": 7, "relation": "eq" }, "hits": [] } });

		assert_eq!(hits_total(&res).expect("parse failed"), 7);
	}

	#[test]
	fn collects_hit_documents() {
		let res = json!({
			"hits": {
				"total": 1,
				"hits": [
					{ "_id": 603, "_source": { "title": "The Matrix" } }
				]
			}
		});
		let docs = hits_docs(&res).expect("parse failed");

		assert_eq!(docs.len(), 1);
		assert_eq!(docs[0].id, "603");
		assert_eq!(docs[0].title(), Some("The Matrix"));
	}
}
