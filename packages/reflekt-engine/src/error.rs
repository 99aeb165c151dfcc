pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Index(#[from] reflekt_index::Error),
	#[error(transparent)]
	Nlp(#[from] reflekt_nlp::Error),
}
