use std::cmp::Ordering;

use reflekt_config::Grades;

use crate::phrase::normalize_phrase;

/// How a candidate phrase was discovered. Classes are ordered by evidence
/// strength: a lower rank means a stronger kind of match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryClass {
	ExactTitle,
	PartialTitle,
	CollectionTitle,
	BodyProperNoun,
	BodyNoun,
	LinkedBodyTerm,
	Unrelated,
}
impl QueryClass {
	/// Numeric rank used for ordering. Kept as an explicit table so
	/// ordering never depends on declaration order or display labels.
	pub const fn rank(self) -> u32 {
		match self {
			Self::ExactTitle => 1,
			Self::PartialTitle => 2,
			Self::CollectionTitle => 5,
			Self::BodyProperNoun => 10,
			Self::BodyNoun => 20,
			Self::LinkedBodyTerm => 50,
			Self::Unrelated => 1000,
		}
	}

	pub const fn label(self) -> &'static str {
		match self {
			Self::ExactTitle => "EXACT_TITLE",
			Self::PartialTitle => "PARTIAL_TITLE",
			Self::CollectionTitle => "COLLECTION_TITLE",
			Self::BodyProperNoun => "BODY_PROPER_NOUN",
			Self::BodyNoun => "BODY_NOUN",
			Self::LinkedBodyTerm => "LINKED_BODY_TERM",
			Self::Unrelated => "UNRELATED",
		}
	}
}
impl Ord for QueryClass {
	fn cmp(&self, other: &Self) -> Ordering {
		self.rank().cmp(&other.rank())
	}
}
impl PartialOrd for QueryClass {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// A hypothesis that `phrase` is a good query for the document identified
/// by `doc_id`.
#[derive(Clone, Debug)]
pub struct QueryCandidate {
	/// Normalized phrase text; the identity key within a store.
	pub phrase: String,
	pub doc_id: String,
	pub doc_title: String,
	pub class: QueryClass,
	/// Class-specific priority score, comparable only within one class.
	pub raw_score: f64,
	/// Accumulated occurrence weight across the document and its linked
	/// documents. Linked contributions add fractional weight.
	pub term_frequency: f64,
	/// Corpus-wide phrase frequency, resolved lazily through the cache.
	pub document_frequency: Option<u64>,
	/// True when the phrase was observed in the document's own text
	/// rather than imported from a linked document.
	pub natural: bool,
}
impl QueryCandidate {
	pub fn new(
		phrase: &str,
		doc_id: impl Into<String>,
		doc_title: impl Into<String>,
		class: QueryClass,
		raw_score: f64,
	) -> Self {
		Self {
			phrase: normalize_phrase(phrase),
			doc_id: doc_id.into(),
			doc_title: doc_title.into(),
			class,
			raw_score,
			term_frequency: 0.0,
			document_frequency: None,
			natural: false,
		}
	}

	pub fn natural(mut self) -> Self {
		self.natural = true;

		self
	}

	pub fn with_term_frequency(mut self, term_frequency: f64) -> Self {
		self.term_frequency = term_frequency;

		self
	}

	pub fn add_occurrence(&mut self, times: f64) {
		self.term_frequency += times;
	}

	/// Discrete 0-4 relevance grade. Proper nouns that recur across the
	/// document and its linked documents grade at the boosted level.
	pub fn grade(&self, grades: &Grades) -> i64 {
		match self.class {
			QueryClass::ExactTitle => grades.exact_title,
			QueryClass::PartialTitle => grades.partial_title,
			QueryClass::CollectionTitle => grades.collection_title,
			QueryClass::BodyProperNoun =>
				if self.term_frequency >= 2.0 {
					grades.boosted_proper_noun
				} else {
					grades.body_proper_noun
				},
			QueryClass::BodyNoun => grades.body_noun,
			QueryClass::LinkedBodyTerm => grades.linked_body_term,
			QueryClass::Unrelated => grades.unrelated,
		}
	}
}
