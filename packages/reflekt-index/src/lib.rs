mod error;

pub mod cache;
pub mod es;

pub use cache::FrequencyCache;
pub use error::{Error, Result};
pub use es::EsIndex;

use serde::{Deserialize, Serialize};

use reflekt_domain::MovieDoc;

/// Corpus-wide statistics for one phrase: how many documents match it and
/// the popularity range of the best matches.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PhraseStats {
	pub frequency: u64,
	pub min_popularity: f64,
	pub max_popularity: f64,
}

/// The full-text index boundary. Every call blocks on the single control
/// thread; repeated lookups are expected to be absorbed by
/// [`FrequencyCache`] rather than retried or parallelized here.
pub trait SearchIndex {
	/// Phrase-frequency query over the body text field.
	fn phrase_stats(&self, phrase: &str) -> Result<PhraseStats>;

	/// All documents belonging to a collection, best-voted first.
	fn collection_members(&self, collection_id: i64) -> Result<Vec<MovieDoc>>;

	/// Documents whose whole title equals `title` (sentinel-wrapped phrase
	/// match, not substring containment), excluding `exclude_id`.
	fn exact_title_matches(&self, title: &str, exclude_id: &str) -> Result<Vec<MovieDoc>>;

	/// Phrase match on the title field.
	fn title_phrase_search(&self, title: &str) -> Result<Vec<MovieDoc>>;

	/// A bounded match-all sample of the corpus.
	fn corpus_sample(&self, limit: u32) -> Result<Vec<MovieDoc>>;
}
