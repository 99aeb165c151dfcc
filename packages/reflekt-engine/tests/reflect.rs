use std::collections::HashSet;

use serde_json::json;

use reflekt_config::Reflection;
use reflekt_domain::{MovieDoc, QueryClass};
use reflekt_engine::{ReflectionEngine, ranked};
use reflekt_index::FrequencyCache;
use reflekt_testkit::{FakeAnnotator, FakeIndex};

fn movie(id: &str, title: &str, overview: &str, collection: Option<i64>) -> MovieDoc {
	let mut source = json!({
		"title": title,
		"overview": overview,
		"vote_count": 500,
		"vote_average": 7.0,
	});

	if let Some(collection) = collection {
		source["belongs_to_collection"] = json!({ "id": collection });
	}

	MovieDoc::new(id, source)
}

fn engine<'a>(index: &'a FakeIndex, annotator: &'a FakeAnnotator) -> ReflectionEngine<'a> {
	let tuning = Reflection::default();
	let cache = FrequencyCache::new(tuning.stopword_doc_freq);

	ReflectionEngine::new(index, annotator, cache, tuning)
}

#[test]
fn zero_budget_yields_title_and_body_candidates_only() {
	let index = FakeIndex::new();
	let annotator = FakeAnnotator::new();
	let doc = movie("d1", "Alpha", "Alpha fights Beta in the city of Gamma.", None);
	let mut engine = engine(&index, &annotator);
	let mut visited = HashSet::from(["d1".to_string()]);
	let store = engine.reflect(&doc, 0, &mut visited).unwrap();

	assert_eq!(store.len(), 3);
	assert_eq!(store.get("alpha").unwrap().class, QueryClass::ExactTitle);
	assert_eq!(store.get("beta").unwrap().class, QueryClass::BodyProperNoun);
	assert_eq!(store.get("gamma").unwrap().class, QueryClass::BodyProperNoun);
	assert!(!store.contains("city"));
	assert_eq!(index.calls("collection_members"), 0);
	assert_eq!(index.calls("exact_title_matches"), 0);
}

#[test]
fn visited_guard_reflects_each_document_at_most_once() {
	// "d2" is reachable from "d1" both as a collection sibling and as an
	// exact-title duplicate; its contribution must land exactly once.
	let mut index = FakeIndex::new();
	let annotator = FakeAnnotator::new();
	let doc = movie("d1", "Alpha", "the hero wanders.", Some(7));
	let twin = movie("d2", "Alpha", "Zorg strikes.", Some(7));

	index.add_doc(doc.clone());
	index.add_doc(twin);

	let mut engine = engine(&index, &annotator);
	let mut visited = HashSet::from(["d1".to_string()]);
	let store = engine.reflect(&doc, 1, &mut visited).unwrap();
	let zorg = store.get("zorg").unwrap();

	assert_eq!(zorg.class, QueryClass::LinkedBodyTerm);
	assert_eq!(zorg.term_frequency, 0.5);
	assert!(!zorg.natural);
	assert_eq!(index.calls("collection_members"), 1);
	assert_eq!(index.calls("exact_title_matches"), 1);
}

#[test]
fn frequency_band_boundaries_are_inclusive() {
	let mut index = FakeIndex::new();
	let annotator = FakeAnnotator::new();
	let doc = movie("d1", "Alpha", "Rare fights Edge near Common beyond Over.", None);

	index.set_phrase_stats("rare", 1, 1.0, 9.0);
	index.set_phrase_stats("edge", 2, 1.0, 9.0);
	index.set_phrase_stats("common", 100, 1.0, 9.0);
	index.set_phrase_stats("over", 101, 1.0, 9.0);

	let mut engine = engine(&index, &annotator);
	let mut visited = HashSet::from(["d1".to_string()]);
	let store = engine.reflect(&doc, 0, &mut visited).unwrap();

	assert!(!store.contains("rare"));
	assert!(store.contains("edge"));
	assert!(store.contains("common"));
	assert!(!store.contains("over"));
	assert_eq!(store.get("edge").unwrap().document_frequency, Some(2));
}

#[test]
fn stopword_phrases_are_dropped_without_an_index_call() {
	let index = FakeIndex::new();
	let annotator = FakeAnnotator::new();
	let doc = movie("d1", "Alpha", "It waits.", None);
	let mut engine = engine(&index, &annotator);
	let mut visited = HashSet::from(["d1".to_string()]);
	let store = engine.reflect(&doc, 0, &mut visited).unwrap();

	assert!(!store.contains("it"));
	assert_eq!(index.calls("phrase_stats"), 0);
}

#[test]
fn collection_sibling_amplifies_shared_proper_noun() {
	let mut index = FakeIndex::new();
	let annotator = FakeAnnotator::new();
	let doc = movie("d1", "Alpha", "Zorg rises.", Some(7));
	let sibling = movie("d2", "Beta", "Zorg returns.", Some(7));

	index.add_doc(doc.clone());
	index.add_doc(sibling);

	let mut engine = engine(&index, &annotator);
	let mut visited = HashSet::from(["d1".to_string()]);
	let store = engine.reflect(&doc, 1, &mut visited).unwrap();
	let zorg = store.get("zorg").unwrap();

	assert_eq!(zorg.class, QueryClass::BodyProperNoun);
	assert!(zorg.natural);
	assert!(zorg.term_frequency > 1.0);
	assert_eq!(zorg.term_frequency, 1.5);

	let beta = store.get("beta").unwrap();

	assert_eq!(beta.class, QueryClass::CollectionTitle);
	assert_eq!(beta.raw_score, 17.0);
}

#[test]
fn recurring_proper_noun_earns_the_popularity_bonus() {
	let mut index = FakeIndex::new();
	let annotator = FakeAnnotator::new();
	let doc = movie("d1", "Alpha", "Zorg rises. Zorg falls.", None);

	// doc popularity 7.0; spread = (7 / 7.5) * (6 / 7) = 0.8, bonus
	// floor(6 * 0.8) = 4.
	index.set_phrase_stats("zorg", 50, 1.0, 8.0);

	let mut engine = engine(&index, &annotator);
	let mut visited = HashSet::from(["d1".to_string()]);
	let store = engine.reflect(&doc, 0, &mut visited).unwrap();
	let zorg = store.get("zorg").unwrap();

	assert_eq!(zorg.term_frequency, 2.0);
	assert_eq!(zorg.raw_score, 14.0);
}

#[test]
fn missing_overview_yields_title_only_store() {
	let index = FakeIndex::new();
	let annotator = FakeAnnotator::new();
	let doc = MovieDoc::new("d1", json!({ "title": "Alpha" }));
	let mut engine = engine(&index, &annotator);
	let mut visited = HashSet::from(["d1".to_string()]);
	let store = engine.reflect(&doc, 0, &mut visited).unwrap();

	assert_eq!(store.len(), 1);
	assert_eq!(store.get("alpha").unwrap().class, QueryClass::ExactTitle);
}

#[test]
fn ranked_orders_by_class_then_score() {
	let mut index = FakeIndex::new();
	let annotator = FakeAnnotator::new();
	let doc = movie("d1", "Alpha", "Zorg rises.", Some(7));
	let sibling = movie("d2", "Beta", "Zorg returns.", Some(7));

	index.add_doc(doc.clone());
	index.add_doc(sibling);

	let mut engine = engine(&index, &annotator);
	let mut visited = HashSet::from(["d1".to_string()]);
	let store = engine.reflect(&doc, 1, &mut visited).unwrap();
	let order = ranked(&store).iter().map(|c| c.phrase.clone()).collect::<Vec<_>>();

	assert_eq!(order, ["alpha", "beta", "zorg"]);
}
