use crate::{PosTag, Result, TextAnnotator};

/// Phrases derived from one document's body text. `proper_nouns` keeps one
/// entry per run occurrence (not a deduplicated set), so a phrase that
/// appears in several noun chunks contributes that many occurrences to its
/// candidate's term frequency.
#[derive(Clone, Debug, Default)]
pub struct ExtractedPhrases {
	pub noun_phrases: Vec<String>,
	pub proper_nouns: Vec<String>,
}

pub fn extract(annotator: &dyn TextAnnotator, text: &str) -> Result<ExtractedPhrases> {
	let noun_phrases = annotator.noun_phrases(text)?;
	let mut proper_nouns = Vec::new();

	for phrase in &noun_phrases {
		proper_nouns.extend(contiguous_tokens_by_tag(annotator, phrase, PosTag::ProperNoun)?);
	}

	Ok(ExtractedPhrases { noun_phrases, proper_nouns })
}

/// Splits a noun phrase into maximal runs of adjacent tokens carrying the
/// requested tag, each run joined with single spaces. "the city of Gamma
/// Prime" with PROPN tags on "Gamma" and "Prime" yields ["Gamma Prime"];
/// "city" alone never shows up in a PROPN run.
pub fn contiguous_tokens_by_tag(
	annotator: &dyn TextAnnotator,
	phrase: &str,
	tag: PosTag,
) -> Result<Vec<String>> {
	let tokens = annotator.pos_tags(phrase)?;
	let mut runs = Vec::new();
	let mut run: Vec<&str> = Vec::new();

	for token in &tokens {
		if token.tag == tag {
			run.push(token.text.as_str());
		} else if !run.is_empty() {
			runs.push(run.join(" "));
			run.clear();
		}
	}

	if !run.is_empty() {
		runs.push(run.join(" "));
	}

	runs.retain(|joined| !joined.trim().is_empty());

	Ok(runs)
}
