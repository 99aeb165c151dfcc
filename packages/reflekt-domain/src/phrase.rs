use unicode_normalization::UnicodeNormalization;

/// Canonical phrase identity: NFKC-normalized, case-folded, and
/// whitespace-collapsed. Two candidates whose phrases normalize to the
/// same string are the same candidate.
pub fn normalize_phrase(raw: &str) -> String {
	let folded = raw.nfkc().collect::<String>().to_lowercase();

	folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
