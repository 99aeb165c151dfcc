use reflekt_nlp::{PosTag, contiguous_tokens_by_tag, extract};
use reflekt_testkit::FakeAnnotator;

#[test]
fn adjacent_proper_nouns_form_a_single_run() {
	let annotator = FakeAnnotator::new();
	let extracted = extract(&annotator, "They fled to the city of Gamma Prime.").unwrap();

	assert_eq!(extracted.proper_nouns, vec!["They", "Gamma Prime"]);
}

#[test]
fn repeated_phrases_are_preserved_per_occurrence() {
	let annotator = FakeAnnotator::new();
	let extracted = extract(&annotator, "Zorg rises. Zorg falls.").unwrap();

	assert_eq!(extracted.proper_nouns, vec!["Zorg", "Zorg"]);
}

#[test]
fn noun_runs_exclude_other_tags() {
	let mut annotator = FakeAnnotator::new();

	annotator.add_noun("city");

	let runs =
		contiguous_tokens_by_tag(&annotator, "the city of Gamma", PosTag::Noun).unwrap();

	assert_eq!(runs, vec!["city"]);
}

#[test]
fn tag_overrides_beat_the_capitalization_heuristic() {
	let mut annotator = FakeAnnotator::new();

	annotator.tag_token("They", PosTag::Other);

	let extracted = extract(&annotator, "They fled to Gamma.").unwrap();

	assert_eq!(extracted.proper_nouns, vec!["Gamma"]);
}
