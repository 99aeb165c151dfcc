use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::{Error, PosToken, Result, TextAnnotator};

#[derive(Debug, Deserialize)]
struct NounPhraseResponse {
	noun_phrases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PosTagResponse {
	tokens: Vec<PosToken>,
}

/// Blocking client for a JSON annotation service (a thin HTTP front over a
/// spaCy-style pipeline): one endpoint for noun-phrase chunking, one for
/// part-of-speech tagging.
pub struct HttpAnnotator {
	client: reqwest::blocking::Client,
	noun_phrase_url: String,
	pos_tag_url: String,
}
impl HttpAnnotator {
	pub fn new(cfg: &reflekt_config::Annotator) -> Result<Self> {
		let client = reqwest::blocking::Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()?;

		Ok(Self {
			client,
			noun_phrase_url: format!("{}{}", cfg.api_base, cfg.noun_phrase_path),
			pos_tag_url: format!("{}{}", cfg.api_base, cfg.pos_tag_path),
		})
	}

	fn post(&self, url: &str, text: &str) -> Result<Value> {
		let res = self.client.post(url).json(&json!({ "text": text })).send()?;
		let json = res.error_for_status()?.json::<Value>()?;

		Ok(json)
	}
}
impl TextAnnotator for HttpAnnotator {
	fn noun_phrases(&self, text: &str) -> Result<Vec<String>> {
		let json = self.post(&self.noun_phrase_url, text)?;

		parse_noun_phrases(json)
	}

	fn pos_tags(&self, phrase: &str) -> Result<Vec<PosToken>> {
		let json = self.post(&self.pos_tag_url, phrase)?;

		parse_pos_tags(json)
	}
}

fn parse_noun_phrases(json: Value) -> Result<Vec<String>> {
	let parsed: NounPhraseResponse = serde_json::from_value(json).map_err(|_| {
		Error::InvalidResponse {
			message: "Annotator response is missing noun_phrases.".to_string(),
		}
	})?;

	Ok(parsed.noun_phrases)
}

fn parse_pos_tags(json: Value) -> Result<Vec<PosToken>> {
	let parsed: PosTagResponse = serde_json::from_value(json).map_err(|_| {
		Error::InvalidResponse { message: "Annotator response is missing tokens.".to_string() }
	})?;

	Ok(parsed.tokens)
}
