use std::collections::HashSet;

use reflekt_config::Reflection;
use reflekt_domain::{
	CandidateStore, MovieDoc, QueryCandidate, QueryClass, popularity, popularity_range,
};
use reflekt_index::{FrequencyCache, SearchIndex};
use reflekt_nlp::{TextAnnotator, extract};

use crate::Result;

/// Derives query candidates for one document, optionally amplified by its
/// collection siblings and exact-title duplicates up to `step_budget`
/// traversal steps. Owns the [`FrequencyCache`] for the lifetime of a run;
/// the caller takes it back via [`into_cache`](Self::into_cache) to persist
/// it at shutdown.
pub struct ReflectionEngine<'a> {
	index: &'a dyn SearchIndex,
	annotator: &'a dyn TextAnnotator,
	cache: FrequencyCache,
	tuning: Reflection,
}
impl<'a> ReflectionEngine<'a> {
	pub fn new(
		index: &'a dyn SearchIndex,
		annotator: &'a dyn TextAnnotator,
		cache: FrequencyCache,
		tuning: Reflection,
	) -> Self {
		Self { index, annotator, cache, tuning }
	}

	pub fn into_cache(self) -> FrequencyCache {
		self.cache
	}

	/// Reflects one document into a candidate store. `visited` holds the
	/// document ids already traversed in this reflection tree; callers seed
	/// it with the starting document's own id so duplicates of the root are
	/// not traversed back into it.
	pub fn reflect(
		&mut self,
		doc: &MovieDoc,
		step_budget: u32,
		visited: &mut HashSet<String>,
	) -> Result<CandidateStore> {
		let doc_title = doc.title().unwrap_or_default().to_string();
		let mut store = CandidateStore::new();

		if !doc_title.is_empty() {
			store.add(
				QueryCandidate::new(
					&doc_title,
					&doc.id,
					&doc_title,
					QueryClass::ExactTitle,
					self.tuning.exact_title_score,
				)
				.natural()
				.with_term_frequency(1.0),
			);
		}

		match doc.overview() {
			Some(text) => {
				for noun in extract(self.annotator, text)?.proper_nouns {
					store.add(
						QueryCandidate::new(
							&noun,
							&doc.id,
							&doc_title,
							QueryClass::BodyProperNoun,
							self.tuning.proper_noun_base_score,
						)
						.natural()
						.with_term_frequency(1.0),
					);
				}
			},
			None => {
				tracing::debug!(doc_id = %doc.id, "Document has no overview; title-only store.");
			},
		}

		if step_budget > 0 {
			if let Some(collection_id) = doc.collection_id() {
				let siblings =
					self.cache.collection_members(self.index, collection_id, &doc.id)?;
				let (min_pop, max_pop) = popularity_range(&siblings);

				for sibling in &siblings {
					if let Some(title) = sibling.title() {
						let spread = (popularity(sibling) - min_pop) / (max_pop - min_pop);
						let mut score = self.tuning.collection_title_score;

						if (0.0..=1.0).contains(&spread) {
							score += (2.0 * spread).floor();
						}

						store.add_if_absent(
							QueryCandidate::new(
								title,
								&doc.id,
								&doc_title,
								QueryClass::CollectionTitle,
								score,
							)
							.with_term_frequency(1.0),
						);
					}

					self.reflect_linked(
						sibling,
						step_budget,
						visited,
						&mut store,
						&doc.id,
						&doc_title,
					)?;
				}
			}
			if !doc_title.is_empty() {
				for duplicate in self.index.exact_title_matches(&doc_title, &doc.id)? {
					self.reflect_linked(
						&duplicate,
						step_budget,
						visited,
						&mut store,
						&doc.id,
						&doc_title,
					)?;
				}
			}
		}

		self.filter_by_frequency(&mut store, popularity(doc))?;

		Ok(store)
	}

	/// Reflects a related document one step deeper and folds its
	/// proper-noun candidates into `store`. A document already traversed in
	/// this tree is skipped, so a sibling reachable via both the collection
	/// and exact-title paths contributes exactly once.
	fn reflect_linked(
		&mut self,
		linked: &MovieDoc,
		step_budget: u32,
		visited: &mut HashSet<String>,
		store: &mut CandidateStore,
		doc_id: &str,
		doc_title: &str,
	) -> Result<()> {
		if !visited.insert(linked.id.clone()) {
			return Ok(());
		}

		let linked_store = self.reflect(linked, step_budget - 1, visited)?;

		store.absorb_linked(
			&linked_store,
			self.tuning.attenuation,
			self.tuning.import_discount,
			doc_id,
			doc_title,
		);

		Ok(())
	}

	/// Resolves corpus frequency for every proper-noun candidate and applies
	/// the frequency band: too-rare and too-common phrases are dropped, the
	/// rest get their final score. Deletions are collected during the scan
	/// and applied afterwards.
	fn filter_by_frequency(&mut self, store: &mut CandidateStore, doc_pop: f64) -> Result<()> {
		let phrases = store
			.values()
			.filter(|candidate| candidate.class == QueryClass::BodyProperNoun)
			.map(|candidate| candidate.phrase.clone())
			.collect::<Vec<_>>();
		let mut doomed = Vec::new();

		for phrase in phrases {
			let stats = self.cache.phrase_stats(self.index, &phrase)?;
			let Some(candidate) = store.get_mut(&phrase) else { continue };

			candidate.document_frequency = Some(stats.frequency);

			if stats.frequency < self.tuning.min_doc_freq
				|| stats.frequency > self.tuning.max_doc_freq
			{
				candidate.raw_score = 0.0;
				doomed.push(phrase);

				continue;
			}

			let mut score = self.tuning.proper_noun_base_score;

			if candidate.term_frequency >= 2.0 {
				let spread = popularity_spread(doc_pop, stats.min_popularity, stats.max_popularity);

				if (0.0..=1.0).contains(&spread) {
					score += (self.tuning.recurrence_bonus * spread).floor();
				}
			}

			candidate.raw_score = score;
		}

		for phrase in doomed {
			tracing::debug!(phrase = %phrase, "Phrase outside the frequency band; dropped.");
			store.remove(&phrase);
		}

		Ok(())
	}
}

/// How far the document's popularity sits within the phrase's popularity
/// range, scaled by the document's own popularity and capped at 1. A
/// degenerate range contributes nothing rather than dividing by zero.
fn popularity_spread(doc_pop: f64, min_pop: f64, max_pop: f64) -> f64 {
	let range = max_pop - min_pop;

	if range <= 0.0 {
		return 0.0;
	}

	((doc_pop / 7.5) * ((doc_pop - min_pop) / range)).min(1.0)
}

/// Candidates ordered best first: ascending class rank, then ascending raw
/// score within a class, since lower numbers encode stronger evidence.
pub fn ranked(store: &CandidateStore) -> Vec<&QueryCandidate> {
	let mut candidates = store.values().collect::<Vec<_>>();

	candidates.sort_by(|lhs, rhs| {
		lhs.class
			.rank()
			.cmp(&rhs.class.rank())
			.then_with(|| lhs.raw_score.total_cmp(&rhs.raw_score))
	});

	candidates
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn spread_guards_against_degenerate_range() {
		assert_eq!(popularity_spread(5.0, 3.0, 3.0), 0.0);
	}

	#[test]
	fn spread_is_capped_at_one() {
		assert_eq!(popularity_spread(10.0, 0.0, 1.0), 1.0);
	}
}
