mod error;

pub mod extract;
pub mod http;

pub use error::{Error, Result};
pub use extract::{ExtractedPhrases, contiguous_tokens_by_tag, extract};
pub use http::HttpAnnotator;

use serde::{Deserialize, Serialize};

/// Part-of-speech tag, reduced to the distinctions this system cares
/// about. Unknown tags from the annotation service collapse to `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PosTag {
	#[serde(rename = "PROPN")]
	ProperNoun,
	#[serde(rename = "NOUN")]
	Noun,
	#[serde(other, rename = "X")]
	Other,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PosToken {
	pub text: String,
	pub tag: PosTag,
}

/// The NLP boundary: noun-phrase chunking and per-token part-of-speech
/// tagging. Calls block on the single control thread.
pub trait TextAnnotator {
	fn noun_phrases(&self, text: &str) -> Result<Vec<String>>;

	fn pos_tags(&self, phrase: &str) -> Result<Vec<PosToken>>;
}
