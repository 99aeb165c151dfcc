use std::fs;

use serde_json::json;

use reflekt_domain::MovieDoc;
use reflekt_index::FrequencyCache;
use reflekt_testkit::{FakeIndex, temp_dir};

const STOPWORD_FREQ: u64 = 1_000_000;

fn collection_doc(id: &str, title: &str, collection_id: i64) -> MovieDoc {
	MovieDoc::new(
		id,
		json!({
			"title": title,
			"overview": format!("{title} overview."),
			"belongs_to_collection": { "id": collection_id, "name": "Series" },
			"vote_average": 7.0,
			"vote_count": 500,
		}),
	)
}

#[test]
fn phrase_stats_hit_skips_the_index() {
	let mut index = FakeIndex::new();

	index.set_phrase_stats("zorg", 5, 2.0, 8.0);

	let mut cache = FrequencyCache::new(STOPWORD_FREQ);

	let first = cache.phrase_stats(&index, "Zorg").expect("lookup failed");
	let second = cache.phrase_stats(&index, "zorg").expect("lookup failed");

	assert_eq!(first.frequency, 5);
	assert_eq!(second.frequency, 5);
	assert_eq!(index.calls("phrase_stats"), 1);
}

#[test]
fn stopword_phrases_never_reach_the_index() {
	let index = FakeIndex::new();
	let mut cache = FrequencyCache::new(STOPWORD_FREQ);

	for phrase in ["it", "they", "It", "THEY"] {
		let stats = cache.phrase_stats(&index, phrase).expect("lookup failed");

		assert_eq!(stats.frequency, STOPWORD_FREQ);
	}

	assert_eq!(index.calls("phrase_stats"), 0);
}

#[test]
fn collection_exclusion_is_applied_per_call() {
	let index = FakeIndex::with_docs(vec![
		collection_doc("a", "Alpha", 7),
		collection_doc("b", "Beta", 7),
		collection_doc("c", "Gamma", 7),
	]);
	let mut cache = FrequencyCache::new(STOPWORD_FREQ);

	let without_a = cache.collection_members(&index, 7, "a").expect("lookup failed");
	let without_b = cache.collection_members(&index, 7, "b").expect("lookup failed");

	assert_eq!(without_a.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec!["b", "c"]);
	assert_eq!(without_b.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
	// The raw member list is cached once; only the view changes per call.
	assert_eq!(index.calls("collection_members"), 1);
}

#[test]
fn excluding_the_first_member_works() {
	let index = FakeIndex::with_docs(vec![
		collection_doc("first", "Alpha", 9),
		collection_doc("second", "Beta", 9),
	]);
	let mut cache = FrequencyCache::new(STOPWORD_FREQ);

	let members = cache.collection_members(&index, 9, "first").expect("lookup failed");

	assert_eq!(members.len(), 1);
	assert_eq!(members[0].id, "second");
}

#[test]
fn save_and_load_round_trip() {
	let dir = temp_dir("reflekt_cache_test").expect("temp dir failed");
	let index = FakeIndex::with_docs(vec![collection_doc("a", "Alpha", 7)]);

	{
		let mut cache = FrequencyCache::new(STOPWORD_FREQ);

		cache.phrase_stats(&index, "zorg").expect("lookup failed");
		cache.collection_members(&index, 7, "zzz").expect("lookup failed");
		cache.save(&dir).expect("save failed");
	}

	let mut reloaded = FrequencyCache::load(&dir, STOPWORD_FREQ);
	let fresh_index = FakeIndex::new();

	assert_eq!(reloaded.phrase_entries(), 1);
	assert_eq!(reloaded.collection_entries(), 1);

	// Both lookups must be served from the reloaded maps.
	reloaded.phrase_stats(&fresh_index, "zorg").expect("lookup failed");
	reloaded.collection_members(&fresh_index, 7, "zzz").expect("lookup failed");

	assert_eq!(fresh_index.calls("phrase_stats"), 0);
	assert_eq!(fresh_index.calls("collection_members"), 0);

	fs::remove_dir_all(&dir).expect("cleanup failed");
}

#[test]
fn missing_cache_dir_loads_empty() {
	let dir = temp_dir("reflekt_cache_missing").expect("temp dir failed");
	let missing = dir.join("nope");
	let cache = FrequencyCache::load(&missing, STOPWORD_FREQ);

	assert_eq!(cache.phrase_entries(), 0);
	assert_eq!(cache.collection_entries(), 0);

	fs::remove_dir_all(&dir).expect("cleanup failed");
}

#[test]
fn corrupt_cache_file_loads_empty() {
	let dir = temp_dir("reflekt_cache_corrupt").expect("temp dir failed");

	fs::write(dir.join("phrase_stats.json"), "not json at all {").expect("write failed");

	let cache = FrequencyCache::load(&dir, STOPWORD_FREQ);

	assert_eq!(cache.phrase_entries(), 0);

	fs::remove_dir_all(&dir).expect("cleanup failed");
}
