use std::collections::BTreeMap;

use crate::candidate::{QueryCandidate, QueryClass};

/// The candidate set produced by reflecting one document: an ordered map
/// from normalized phrase to candidate. Owned by a single reflection
/// invocation; the aggregator receives it by value and never mutates
/// individual candidates afterwards.
#[derive(Clone, Debug, Default)]
pub struct CandidateStore {
	candidates: BTreeMap<String, QueryCandidate>,
}
impl CandidateStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a candidate, merging with any existing candidate for the
	/// same normalized phrase by accumulating term frequency. The existing
	/// record keeps its class and score; a natural sighting on either side
	/// marks the merged record natural.
	pub fn add(&mut self, candidate: QueryCandidate) {
		match self.candidates.get_mut(&candidate.phrase) {
			Some(existing) => {
				existing.add_occurrence(candidate.term_frequency);
				existing.natural |= candidate.natural;
			},
			None => {
				self.candidates.insert(candidate.phrase.clone(), candidate);
			},
		}
	}

	/// Inserts only when the phrase is not yet present; existing
	/// candidates are left untouched.
	pub fn add_if_absent(&mut self, candidate: QueryCandidate) {
		self.candidates.entry(candidate.phrase.clone()).or_insert(candidate);
	}

	pub fn contains(&self, phrase: &str) -> bool {
		self.candidates.contains_key(phrase)
	}

	pub fn get(&self, phrase: &str) -> Option<&QueryCandidate> {
		self.candidates.get(phrase)
	}

	pub fn get_mut(&mut self, phrase: &str) -> Option<&mut QueryCandidate> {
		self.candidates.get_mut(phrase)
	}

	pub fn remove(&mut self, phrase: &str) -> Option<QueryCandidate> {
		self.candidates.remove(phrase)
	}

	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	pub fn phrases(&self) -> impl Iterator<Item = &str> {
		self.candidates.keys().map(String::as_str)
	}

	pub fn values(&self) -> impl Iterator<Item = &QueryCandidate> {
		self.candidates.values()
	}

	pub fn values_mut(&mut self) -> impl Iterator<Item = &mut QueryCandidate> {
		self.candidates.values_mut()
	}

	/// Folds a linked document's proper-noun candidates into this store.
	/// A phrase already held locally as a proper noun is amplified by the
	/// attenuated incoming term frequency; a phrase held under any other
	/// class is left alone; an unseen phrase is imported as a discounted
	/// linked term re-homed to this store's document.
	pub fn absorb_linked(
		&mut self,
		other: &CandidateStore,
		attenuation: f64,
		import_discount: f64,
		doc_id: &str,
		doc_title: &str,
	) {
		for incoming in other.values() {
			if incoming.class != QueryClass::BodyProperNoun {
				continue;
			}

			match self.candidates.get(&incoming.phrase) {
				Some(existing) if existing.class == QueryClass::BodyProperNoun => {
					let merged = merge_discounted(existing, incoming, attenuation);

					self.candidates.insert(merged.phrase.clone(), merged);
				},
				// Accumulating at the import discount keeps term frequency
				// independent of the order sibling stores arrive in.
				Some(existing) if existing.class == QueryClass::LinkedBodyTerm => {
					let merged = merge_discounted(existing, incoming, import_discount);

					self.candidates.insert(merged.phrase.clone(), merged);
				},
				Some(_) => {},
				None => {
					let imported = import_linked(incoming, import_discount, doc_id, doc_title);

					self.candidates.insert(imported.phrase.clone(), imported);
				},
			}
		}
	}
}
impl IntoIterator for CandidateStore {
	type IntoIter = std::collections::btree_map::IntoValues<String, QueryCandidate>;
	type Item = QueryCandidate;

	fn into_iter(self) -> Self::IntoIter {
		self.candidates.into_values()
	}
}

/// Pure merge: returns a new record with the incoming term frequency
/// folded in at the given attenuation. Neither input is mutated, so two
/// stores can never end up aliasing one candidate.
pub fn merge_discounted(
	existing: &QueryCandidate,
	incoming: &QueryCandidate,
	attenuation: f64,
) -> QueryCandidate {
	let mut merged = existing.clone();

	merged.add_occurrence(attenuation * incoming.term_frequency);

	merged
}

/// Pure import of a linked document's candidate: re-homed to the local
/// document, demoted to a linked body term, and discounted, since indirect
/// evidence is weaker than a direct sighting.
pub fn import_linked(
	incoming: &QueryCandidate,
	import_discount: f64,
	doc_id: &str,
	doc_title: &str,
) -> QueryCandidate {
	let mut imported = incoming.clone();

	imported.doc_id = doc_id.to_string();
	imported.doc_title = doc_title.to_string();
	imported.class = QueryClass::LinkedBodyTerm;
	imported.raw_score = 0.0;
	imported.term_frequency *= import_discount;
	imported.natural = false;

	imported
}
