mod error;

pub use error::{Error, Result};

use std::{
	cell::RefCell,
	collections::{HashMap, HashSet},
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use reflekt_domain::{MovieDoc, normalize_phrase};
use reflekt_index::{PhraseStats, SearchIndex};
use reflekt_nlp::{PosTag, PosToken, TextAnnotator};

/// In-memory stand-in for the full-text index. Phrase statistics come from
/// an explicit table (with a configurable default for unknown phrases) and
/// every trait call is counted, so tests can assert which lookups actually
/// reached the "index".
pub struct FakeIndex {
	docs: Vec<MovieDoc>,
	phrase_stats: HashMap<String, PhraseStats>,
	default_stats: PhraseStats,
	calls: RefCell<HashMap<&'static str, usize>>,
}
impl FakeIndex {
	pub fn new() -> Self {
		Self {
			docs: Vec::new(),
			phrase_stats: HashMap::new(),
			default_stats: PhraseStats {
				frequency: 10,
				min_popularity: 1.0,
				max_popularity: 9.0,
			},
			calls: RefCell::new(HashMap::new()),
		}
	}

	pub fn with_docs(docs: Vec<MovieDoc>) -> Self {
		let mut index = Self::new();

		index.docs = docs;

		index
	}

	pub fn add_doc(&mut self, doc: MovieDoc) {
		self.docs.push(doc);
	}

	pub fn set_phrase_stats(
		&mut self,
		phrase: &str,
		frequency: u64,
		min_popularity: f64,
		max_popularity: f64,
	) {
		self.phrase_stats.insert(
			normalize_phrase(phrase),
			PhraseStats { frequency, min_popularity, max_popularity },
		);
	}

	pub fn set_default_stats(&mut self, frequency: u64, min_popularity: f64, max_popularity: f64) {
		self.default_stats = PhraseStats { frequency, min_popularity, max_popularity };
	}

	/// How many times the named trait method has been invoked.
	pub fn calls(&self, method: &str) -> usize {
		self.calls.borrow().get(method).copied().unwrap_or(0)
	}

	fn record(&self, method: &'static str) {
		*self.calls.borrow_mut().entry(method).or_insert(0) += 1;
	}
}
impl Default for FakeIndex {
	fn default() -> Self {
		Self::new()
	}
}
impl SearchIndex for FakeIndex {
	fn phrase_stats(&self, phrase: &str) -> reflekt_index::Result<PhraseStats> {
		self.record("phrase_stats");

		let key = normalize_phrase(phrase);

		Ok(self.phrase_stats.get(&key).copied().unwrap_or(self.default_stats))
	}

	fn collection_members(&self, collection_id: i64) -> reflekt_index::Result<Vec<MovieDoc>> {
		self.record("collection_members");

		Ok(self
			.docs
			.iter()
			.filter(|doc| doc.collection_id() == Some(collection_id))
			.cloned()
			.collect())
	}

	fn exact_title_matches(
		&self,
		title: &str,
		exclude_id: &str,
	) -> reflekt_index::Result<Vec<MovieDoc>> {
		self.record("exact_title_matches");

		Ok(self
			.docs
			.iter()
			.filter(|doc| doc.title() == Some(title) && doc.id != exclude_id)
			.cloned()
			.collect())
	}

	fn title_phrase_search(&self, title: &str) -> reflekt_index::Result<Vec<MovieDoc>> {
		self.record("title_phrase_search");

		let needle = title.to_lowercase();

		Ok(self
			.docs
			.iter()
			.filter(|doc| {
				doc.title().map(|t| t.to_lowercase().contains(&needle)).unwrap_or(false)
			})
			.cloned()
			.collect())
	}

	fn corpus_sample(&self, limit: u32) -> reflekt_index::Result<Vec<MovieDoc>> {
		self.record("corpus_sample");

		Ok(self.docs.iter().take(limit as usize).cloned().collect())
	}
}

/// Deterministic stand-in for the annotation service. Sentences become
/// noun chunks; capitalized tokens tag as proper nouns, registered nouns
/// as nouns, everything else as other. Both layers accept explicit
/// overrides for tests that need exact control.
pub struct FakeAnnotator {
	noun_phrases: HashMap<String, Vec<String>>,
	tag_overrides: HashMap<String, PosTag>,
	known_nouns: HashSet<String>,
}
impl FakeAnnotator {
	pub fn new() -> Self {
		Self {
			noun_phrases: HashMap::new(),
			tag_overrides: HashMap::new(),
			known_nouns: HashSet::new(),
		}
	}

	pub fn set_noun_phrases(&mut self, text: &str, phrases: Vec<&str>) {
		self.noun_phrases
			.insert(text.to_string(), phrases.into_iter().map(str::to_string).collect());
	}

	pub fn tag_token(&mut self, token: &str, tag: PosTag) {
		self.tag_overrides.insert(token.to_lowercase(), tag);
	}

	pub fn add_noun(&mut self, token: &str) {
		self.known_nouns.insert(token.to_lowercase());
	}

	fn tag_for(&self, token: &str) -> PosTag {
		if let Some(tag) = self.tag_overrides.get(&token.to_lowercase()) {
			return *tag;
		}
		if token.chars().next().map(char::is_uppercase).unwrap_or(false) {
			return PosTag::ProperNoun;
		}
		if self.known_nouns.contains(&token.to_lowercase()) {
			return PosTag::Noun;
		}

		PosTag::Other
	}
}
impl Default for FakeAnnotator {
	fn default() -> Self {
		Self::new()
	}
}
impl TextAnnotator for FakeAnnotator {
	fn noun_phrases(&self, text: &str) -> reflekt_nlp::Result<Vec<String>> {
		if let Some(phrases) = self.noun_phrases.get(text) {
			return Ok(phrases.clone());
		}

		Ok(text
			.split(['.', '!', '?'])
			.map(str::trim)
			.filter(|sentence| !sentence.is_empty())
			.map(str::to_string)
			.collect())
	}

	fn pos_tags(&self, phrase: &str) -> reflekt_nlp::Result<Vec<PosToken>> {
		Ok(phrase
			.split_whitespace()
			.map(|raw| raw.trim_matches(|ch: char| !ch.is_alphanumeric()))
			.filter(|token| !token.is_empty())
			.map(|token| PosToken { text: token.to_string(), tag: self.tag_for(token) })
			.collect())
	}
}

/// Unique path under the system temp directory; the caller owns cleanup.
pub fn temp_path(prefix: &str, extension: &str) -> PathBuf {
	let mut path = env::temp_dir();

	path.push(format!("{prefix}_{}.{extension}", unique_suffix()));

	path
}

/// Creates and returns a unique temp directory.
pub fn temp_dir(prefix: &str) -> Result<PathBuf> {
	let mut path = env::temp_dir();

	path.push(format!("{prefix}_{}", unique_suffix()));

	fs::create_dir_all(&path)
		.map_err(|err| Error::Message(format!("Failed to create temp dir: {err}.")))?;

	Ok(path)
}

fn unique_suffix() -> String {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos =
		SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or_default();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();

	format!("{nanos}_{pid}_{ordinal}")
}
