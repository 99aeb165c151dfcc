/// One labeled training row: a relevance grade for (query, document),
/// ready for RankLib-style serialization. Feature slots stay empty at this
/// stage; a downstream feature-extraction pass fills them.
#[derive(Clone, Debug, PartialEq)]
pub struct Judgment {
	pub grade: i64,
	pub qid: u64,
	pub keywords: String,
	pub doc_id: String,
	pub weight: u64,
	pub features: Vec<f64>,
}
impl Judgment {
	pub fn new(
		grade: i64,
		qid: u64,
		keywords: impl Into<String>,
		doc_id: impl Into<String>,
		weight: u64,
	) -> Self {
		Self {
			grade,
			qid,
			keywords: keywords.into(),
			doc_id: doc_id.into(),
			weight,
			features: Vec::new(),
		}
	}

	pub fn same_query_and_doc(&self, other: &Judgment) -> bool {
		self.qid == other.qid && self.doc_id == other.doc_id
	}

	/// `<grade>\tqid:<qid>\t<features> # <doc_id>\t<keywords>`; feature
	/// slots are 1-based `index:value` pairs.
	pub fn to_ranklib_line(&self) -> String {
		let features = self
			.features
			.iter()
			.enumerate()
			.map(|(idx, feature)| format!("{}:{feature}", idx + 1))
			.collect::<Vec<_>>()
			.join("\t");

		format!(
			"{}\tqid:{}\t{features} # {}\t{}",
			self.grade, self.qid, self.doc_id, self.keywords
		)
	}
}
