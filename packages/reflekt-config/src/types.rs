use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub index: Index,
	pub annotator: Annotator,
	pub cache: Cache,
	#[serde(default)]
	pub reflection: Reflection,
	#[serde(default)]
	pub grades: Grades,
	#[serde(default)]
	pub aggregation: Aggregation,
	pub output: Output,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Index {
	pub url: String,
	pub index: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Annotator {
	pub api_base: String,
	pub noun_phrase_path: String,
	pub pos_tag_path: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Cache {
	pub dir: std::path::PathBuf,
}

/// Tunable reflection heuristics. The defaults reproduce the constants of
/// the iteration this implementation was validated against; none of them
/// are authoritative.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Reflection {
	pub step_budget: u32,
	/// Scale applied to a linked document's term frequency when it
	/// amplifies an existing local proper-noun candidate.
	pub attenuation: f64,
	/// Scale applied to the term frequency of a phrase imported from a
	/// linked document that has no local counterpart.
	pub import_discount: f64,
	pub min_doc_freq: u64,
	pub max_doc_freq: u64,
	pub exact_title_score: f64,
	pub collection_title_score: f64,
	pub proper_noun_base_score: f64,
	pub recurrence_bonus: f64,
	/// Sentinel document frequency assigned to stopword-like phrases
	/// without consulting the index. Must sit above max_doc_freq so the
	/// band filter always drops them.
	pub stopword_doc_freq: u64,
}
impl Default for Reflection {
	fn default() -> Self {
		Self {
			step_budget: 1,
			attenuation: 0.5,
			import_discount: 0.5,
			min_doc_freq: 2,
			max_doc_freq: 100,
			exact_title_score: 20.0,
			collection_title_score: 17.0,
			proper_noun_base_score: 10.0,
			recurrence_bonus: 6.0,
			stopword_doc_freq: 1_000_000,
		}
	}
}

/// Relevance grade (0-4) assigned per query class.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Grades {
	pub exact_title: i64,
	pub partial_title: i64,
	pub collection_title: i64,
	/// Grade for a proper noun that recurs across the document and its
	/// linked documents (term frequency of at least two).
	pub boosted_proper_noun: i64,
	pub body_proper_noun: i64,
	pub body_noun: i64,
	pub linked_body_term: i64,
	pub unrelated: i64,
}
impl Default for Grades {
	fn default() -> Self {
		Self {
			exact_title: 4,
			partial_title: 3,
			collection_title: 3,
			boosted_proper_noun: 3,
			body_proper_noun: 2,
			body_noun: 1,
			linked_body_term: 1,
			unrelated: 0,
		}
	}
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Aggregation {
	pub max_docs: u32,
	pub min_group_size: u32,
	pub min_top_grade: i64,
	pub negative_sample_rate: f64,
	pub negative_sample_seed: u64,
	/// Judgment weight for candidates observed naturally in the document's
	/// own text (imported candidates weigh 1).
	pub natural_weight: u64,
}
impl Default for Aggregation {
	fn default() -> Self {
		Self {
			max_docs: 5_000,
			min_group_size: 3,
			min_top_grade: 3,
			negative_sample_rate: 1.0,
			negative_sample_seed: 42,
			natural_weight: 2,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Output {
	pub judgments_path: std::path::PathBuf,
}
