use std::{collections::HashMap, fs, path::Path};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use reflekt_domain::{MovieDoc, normalize_phrase};

use crate::{Error, PhraseStats, Result, SearchIndex};

const PHRASE_STATS_FILE: &str = "phrase_stats.json";
const COLLECTIONS_FILE: &str = "collections.json";

/// Phrases that would match most of the corpus; they get a sentinel
/// frequency without an index round trip and are always dropped by the
/// frequency band filter downstream.
const STOPWORD_PHRASES: [&str; 2] = ["it", "they"];

/// Process-wide memo for phrase statistics and collection lookups, keyed
/// by normalized phrase and by collection id. Entries never expire within
/// a run; staleness across runs is accepted. Loaded at startup, written
/// wholesale at shutdown, no schema versioning.
#[derive(Debug)]
pub struct FrequencyCache {
	phrases: HashMap<String, PhraseStats>,
	collections: HashMap<String, Vec<MovieDoc>>,
	stopword_doc_freq: u64,
}
impl FrequencyCache {
	pub fn new(stopword_doc_freq: u64) -> Self {
		Self { phrases: HashMap::new(), collections: HashMap::new(), stopword_doc_freq }
	}

	/// Loads both maps from `dir`. A missing or unreadable file yields an
	/// empty map, never an error: the cache is an optimization, not a
	/// source of truth.
	pub fn load(dir: &Path, stopword_doc_freq: u64) -> Self {
		Self {
			phrases: load_map(&dir.join(PHRASE_STATS_FILE)),
			collections: load_map(&dir.join(COLLECTIONS_FILE)),
			stopword_doc_freq,
		}
	}

	pub fn save(&self, dir: &Path) -> Result<()> {
		fs::create_dir_all(dir)
			.map_err(|err| Error::CacheWrite { path: dir.to_path_buf(), source: err })?;

		save_map(&dir.join(PHRASE_STATS_FILE), &self.phrases)?;
		save_map(&dir.join(COLLECTIONS_FILE), &self.collections)?;

		Ok(())
	}

	/// Resolves phrase statistics, consulting the index only on a miss.
	/// Stopword-like phrases short-circuit to the sentinel frequency and
	/// never reach the index.
	pub fn phrase_stats(
		&mut self,
		index: &dyn SearchIndex,
		phrase: &str,
	) -> Result<PhraseStats> {
		let key = normalize_phrase(phrase);

		if STOPWORD_PHRASES.contains(&key.as_str()) {
			return Ok(PhraseStats {
				frequency: self.stopword_doc_freq,
				min_popularity: 0.0,
				max_popularity: 0.001,
			});
		}
		if let Some(stats) = self.phrases.get(&key) {
			return Ok(*stats);
		}

		let stats = index.phrase_stats(phrase)?;

		tracing::debug!(phrase = %key, frequency = stats.frequency, "Phrase stats fetched.");
		self.phrases.insert(key, stats);

		Ok(stats)
	}

	/// Resolves a collection's member list, consulting the index only on a
	/// miss. The raw member list is what gets cached; the exclusion is
	/// applied per call since `exclude_doc_id` varies by caller.
	pub fn collection_members(
		&mut self,
		index: &dyn SearchIndex,
		collection_id: i64,
		exclude_doc_id: &str,
	) -> Result<Vec<MovieDoc>> {
		let key = collection_id.to_string();

		if !self.collections.contains_key(&key) {
			let members = index.collection_members(collection_id)?;

			tracing::debug!(
				collection_id,
				members = members.len(),
				"Collection members fetched."
			);
			self.collections.insert(key.clone(), members);
		}

		let members = self.collections.get(&key).map(Vec::as_slice).unwrap_or_default();

		Ok(members.iter().filter(|doc| doc.id != exclude_doc_id).cloned().collect())
	}

	pub fn phrase_entries(&self) -> usize {
		self.phrases.len()
	}

	pub fn collection_entries(&self) -> usize {
		self.collections.len()
	}
}

fn load_map<T>(path: &Path) -> HashMap<String, T>
where
	T: DeserializeOwned,
{
	let Ok(raw) = fs::read_to_string(path) else {
		tracing::debug!(?path, "No cache file found; starting empty.");

		return HashMap::new();
	};

	match serde_json::from_str(&raw) {
		Ok(map) => map,
		Err(err) => {
			tracing::warn!(?path, %err, "Cache file is corrupt; starting empty.");

			HashMap::new()
		},
	}
}

fn save_map<T>(path: &Path, map: &HashMap<String, T>) -> Result<()>
where
	T: Serialize,
{
	let raw = serde_json::to_string(map)?;

	fs::write(path, raw).map_err(|err| Error::CacheWrite { path: path.to_path_buf(), source: err })
}
