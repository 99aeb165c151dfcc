mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Aggregation, Annotator, Cache, Config, Grades, Index, Output, Reflection, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.index.url.trim().is_empty() {
		return Err(Error::Validation { message: "index.url must be non-empty.".to_string() });
	}
	if cfg.index.index.trim().is_empty() {
		return Err(Error::Validation { message: "index.index must be non-empty.".to_string() });
	}
	if cfg.index.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "index.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.annotator.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "annotator.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.annotator.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "annotator.timeout_ms must be greater than zero.".to_string(),
		});
	}

	if !(cfg.reflection.attenuation > 0.0 && cfg.reflection.attenuation < 1.0) {
		return Err(Error::Validation {
			message: "reflection.attenuation must be between zero and one, exclusive.".to_string(),
		});
	}
	if !(cfg.reflection.import_discount > 0.0 && cfg.reflection.import_discount <= 1.0) {
		return Err(Error::Validation {
			message: "reflection.import_discount must be greater than zero and at most one."
				.to_string(),
		});
	}
	if cfg.reflection.min_doc_freq > cfg.reflection.max_doc_freq {
		return Err(Error::Validation {
			message: "reflection.min_doc_freq must not exceed reflection.max_doc_freq."
				.to_string(),
		});
	}
	if cfg.reflection.stopword_doc_freq <= cfg.reflection.max_doc_freq {
		return Err(Error::Validation {
			message: "reflection.stopword_doc_freq must exceed reflection.max_doc_freq."
				.to_string(),
		});
	}

	for (label, grade) in [
		("grades.exact_title", cfg.grades.exact_title),
		("grades.partial_title", cfg.grades.partial_title),
		("grades.collection_title", cfg.grades.collection_title),
		("grades.boosted_proper_noun", cfg.grades.boosted_proper_noun),
		("grades.body_proper_noun", cfg.grades.body_proper_noun),
		("grades.body_noun", cfg.grades.body_noun),
		("grades.linked_body_term", cfg.grades.linked_body_term),
		("grades.unrelated", cfg.grades.unrelated),
	] {
		if !(0..=4).contains(&grade) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0-4."),
			});
		}
	}
	if cfg.grades.exact_title < cfg.grades.collection_title {
		return Err(Error::Validation {
			message: "grades.exact_title must be at least grades.collection_title.".to_string(),
		});
	}
	if cfg.grades.body_proper_noun < cfg.grades.unrelated {
		return Err(Error::Validation {
			message: "grades.body_proper_noun must be at least grades.unrelated.".to_string(),
		});
	}

	if cfg.aggregation.max_docs == 0 {
		return Err(Error::Validation {
			message: "aggregation.max_docs must be greater than zero.".to_string(),
		});
	}
	if cfg.aggregation.min_group_size == 0 {
		return Err(Error::Validation {
			message: "aggregation.min_group_size must be greater than zero.".to_string(),
		});
	}
	if !(0..=4).contains(&cfg.aggregation.min_top_grade) {
		return Err(Error::Validation {
			message: "aggregation.min_top_grade must be in the range 0-4.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.aggregation.negative_sample_rate) {
		return Err(Error::Validation {
			message: "aggregation.negative_sample_rate must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.aggregation.natural_weight == 0 {
		return Err(Error::Validation {
			message: "aggregation.natural_weight must be greater than zero.".to_string(),
		});
	}

	if cfg.output.judgments_path.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "output.judgments_path must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let base = cfg.annotator.api_base.trim_end_matches('/').to_string();

	cfg.annotator.api_base = base;
	cfg.index.url = cfg.index.url.trim_end_matches('/').to_string();
}
