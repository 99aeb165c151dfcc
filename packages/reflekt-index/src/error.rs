pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Failed to persist cache at {path:?}.")]
	CacheWrite { path: std::path::PathBuf, source: std::io::Error },
	#[error("{message}")]
	InvalidResponse { message: String },
	#[error("{message}")]
	Index { message: String },
}
