mod error;
mod file;
mod model;

pub use error::{Error, Result};
pub use file::{read_judgments, write_judgments};
pub use model::Judgment;

use std::collections::BTreeMap;

pub fn judgments_by_qid(judgments: &[Judgment]) -> BTreeMap<u64, Vec<&Judgment>> {
	let mut grouped: BTreeMap<u64, Vec<&Judgment>> = BTreeMap::new();

	for judgment in judgments {
		grouped.entry(judgment.qid).or_default().push(judgment);
	}

	grouped
}
