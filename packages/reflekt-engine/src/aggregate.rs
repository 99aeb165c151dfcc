use std::{
	collections::{BTreeSet, HashSet},
	hash::{DefaultHasher, Hash, Hasher},
};

use ahash::AHashMap;

use reflekt_config::Grades;
use reflekt_domain::{CandidateStore, MovieDoc, QueryCandidate, QueryClass};
use reflekt_judgments::Judgment;

use crate::{ReflectionEngine, Result};

/// The outcome of one aggregation run: the full judgment list plus the
/// number of query ids assigned.
#[derive(Debug)]
pub struct Aggregation {
	pub judgments: Vec<Judgment>,
	pub query_count: u64,
}

/// One inverted-index row: a candidate's contribution to its phrase group.
struct GroupRow {
	grade: i64,
	doc_id: String,
	natural: bool,
}

/// Drives the reflection engine over a corpus sample and turns the
/// per-document candidate stores into a phrase-grouped judgment list.
pub struct Aggregator<'a> {
	engine: ReflectionEngine<'a>,
	grades: Grades,
	settings: reflekt_config::Aggregation,
}
impl<'a> Aggregator<'a> {
	pub fn new(
		engine: ReflectionEngine<'a>,
		grades: Grades,
		settings: reflekt_config::Aggregation,
	) -> Self {
		Self { engine, grades, settings }
	}

	pub fn into_cache(self) -> reflekt_index::FrequencyCache {
		self.engine.into_cache()
	}

	/// Reflects every reflectable document in `sample`, synthesizes negative
	/// judgments, groups candidates by phrase, and assigns sequential query
	/// ids to the groups that clear the size and top-grade thresholds.
	pub fn aggregate(&mut self, sample: &[MovieDoc], step_budget: u32) -> Result<Aggregation> {
		let mut reflections = Vec::new();

		for doc in sample {
			if !doc.reflectable() {
				tracing::debug!(doc_id = %doc.id, "Document is not reflectable; skipped.");

				continue;
			}

			let mut visited = HashSet::from([doc.id.clone()]);
			let store = self.engine.reflect(doc, step_budget, &mut visited)?;

			tracing::debug!(
				doc_id = %doc.id,
				candidates = store.len(),
				"Document reflected."
			);
			reflections.push((doc.clone(), store));
		}

		self.synthesize_negatives(&mut reflections);

		let groups = invert(reflections, &self.grades);
		let mut phrases = groups.keys().cloned().collect::<Vec<_>>();

		phrases.sort();

		let mut judgments = Vec::new();
		let mut query_count = 0;

		for phrase in &phrases {
			let rows = &groups[phrase];

			if rows.len() < self.settings.min_group_size as usize
				|| rows[0].grade < self.settings.min_top_grade
			{
				continue;
			}

			query_count += 1;

			// Weight is a per-query property: a phrase observed naturally in
			// any document's own text amplifies the whole group's signal.
			let weight = if rows.iter().any(|row| row.natural) {
				self.settings.natural_weight
			} else {
				1
			};

			for row in rows {
				judgments.push(Judgment::new(
					row.grade,
					query_count,
					phrase.as_str(),
					row.doc_id.as_str(),
					weight,
				));
			}
		}

		tracing::info!(
			judgments = judgments.len(),
			queries = query_count,
			"Aggregation complete."
		);

		Ok(Aggregation { judgments, query_count })
	}

	/// For every phrase seen anywhere in the sample, every store lacking it
	/// gains an unrelated zero-score candidate, subject to the deterministic
	/// sampling decision. Existing candidates are never touched.
	fn synthesize_negatives(&self, reflections: &mut [(MovieDoc, CandidateStore)]) {
		let all_phrases = reflections
			.iter()
			.flat_map(|(_, store)| store.phrases().map(str::to_string))
			.collect::<BTreeSet<_>>();

		for (doc, store) in reflections {
			let doc_title = doc.title().unwrap_or_default().to_string();

			for phrase in &all_phrases {
				if store.contains(phrase) || !self.admit_negative(phrase, &doc.id) {
					continue;
				}

				store.add_if_absent(QueryCandidate::new(
					phrase,
					&doc.id,
					&doc_title,
					QueryClass::Unrelated,
					0.0,
				));
			}
		}
	}

	/// Deterministic sampling decision for one (phrase, document) negative:
	/// the seeded hash maps to [0, 1) and is compared against the configured
	/// rate, so repeated runs with one seed materialize the same negatives.
	fn admit_negative(&self, phrase: &str, doc_id: &str) -> bool {
		if self.settings.negative_sample_rate >= 1.0 {
			return true;
		}

		let mut hasher = DefaultHasher::new();

		self.settings.negative_sample_seed.hash(&mut hasher);
		phrase.hash(&mut hasher);
		doc_id.hash(&mut hasher);

		let draw = (hasher.finish() % 10_000) as f64 / 10_000.0;

		draw < self.settings.negative_sample_rate
	}
}

/// Inverts per-document stores into phrase groups. Rows within a group are
/// ordered grade descending, ties broken by document id so the output is
/// stable across runs.
fn invert(
	reflections: Vec<(MovieDoc, CandidateStore)>,
	grades: &Grades,
) -> AHashMap<String, Vec<GroupRow>> {
	let mut groups: AHashMap<String, Vec<GroupRow>> = AHashMap::new();

	for (_, store) in reflections {
		for candidate in store {
			groups.entry(candidate.phrase.clone()).or_default().push(GroupRow {
				grade: candidate.grade(grades),
				doc_id: candidate.doc_id,
				natural: candidate.natural,
			});
		}
	}

	for rows in groups.values_mut() {
		rows.sort_by(|lhs, rhs| {
			rhs.grade.cmp(&lhs.grade).then_with(|| lhs.doc_id.cmp(&rhs.doc_id))
		});
	}

	groups
}
