pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read judgment file at {path:?}.")]
	Read { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to write judgment file at {path:?}.")]
	Write { path: std::path::PathBuf, source: std::io::Error },
	#[error(
		"Query id {qid} maps to conflicting keywords: {existing:?} vs {incoming:?}. \
		 All judgments sharing a query id must share identical keywords."
	)]
	ConflictingKeywords { qid: u64, existing: String, incoming: String },
	#[error("Judgment row references query id {qid} that is missing from the header.")]
	MissingHeaderEntry { qid: u64 },
	#[error("Malformed judgment header line: {line:?}.")]
	MalformedHeader { line: String },
}
