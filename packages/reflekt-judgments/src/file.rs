use std::{
	collections::BTreeMap,
	fmt::Write as _,
	fs,
	path::Path,
	sync::LazyLock,
};

use regex::Regex;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, Judgment, Result};

static HEADER_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"#\sqid:(\d+?):\s+?(.*)").expect("Header regex must compile."));
static BODY_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(\d+)\s+qid:(\d+)\s+.*#\s+(\S+)").expect("Body regex must compile."));

/// Writes the judgment list: a comment header mapping each query id to its
/// keywords and weight, a blank separator, then one RankLib-style row per
/// judgment sorted by query id.
pub fn write_judgments(path: &Path, judgments: &[Judgment]) -> Result<()> {
	let header = build_header(judgments)?;
	let mut out = String::new();

	if let Ok(stamp) = OffsetDateTime::now_utc().format(&Rfc3339) {
		let _ = writeln!(out, "# Synthesized judgments, generated at {stamp}.");
	}

	out.push_str(&header);
	out.push('\n');

	let mut rows: Vec<&Judgment> = judgments.iter().collect();

	rows.sort_by_key(|judgment| judgment.qid);

	for judgment in rows {
		out.push_str(&judgment.to_ranklib_line());
		out.push('\n');
	}

	fs::write(path, out).map_err(|err| Error::Write { path: path.to_path_buf(), source: err })
}

/// Parses a judgment file back into rows. Keywords and weights come from
/// the header; rows referencing a query id absent from the header are an
/// error, as are feature slots left unparsed (they are simply ignored —
/// only grade, qid, and doc id are read from the body).
pub fn read_judgments(path: &Path) -> Result<Vec<Judgment>> {
	let raw =
		fs::read_to_string(path).map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;
	let keywords_by_qid = parse_header(&raw)?;
	let mut judgments = Vec::new();

	for line in raw.lines() {
		let Some(caps) = BODY_RE.captures(line) else { continue };
		// The regexes anchor on digits; captures always parse.
		let grade: i64 = caps[1].parse().unwrap_or_default();
		let qid: u64 = caps[2].parse().unwrap_or_default();
		let doc_id = caps[3].to_string();
		let (keywords, weight) = keywords_by_qid
			.get(&qid)
			.cloned()
			.ok_or(Error::MissingHeaderEntry { qid })?;

		judgments.push(Judgment::new(grade, qid, keywords, doc_id, weight));
	}

	Ok(judgments)
}

/// Builds the `# qid:<qid>: <keywords>*<weight>` header block, failing
/// loudly when two judgments disagree about a query id's keywords.
fn build_header(judgments: &[Judgment]) -> Result<String> {
	let mut entries: BTreeMap<u64, (String, u64)> = BTreeMap::new();

	for judgment in judgments {
		match entries.get(&judgment.qid) {
			Some((existing, _)) if *existing != judgment.keywords =>
				return Err(Error::ConflictingKeywords {
					qid: judgment.qid,
					existing: existing.clone(),
					incoming: judgment.keywords.clone(),
				}),
			Some(_) => {},
			None => {
				entries.insert(judgment.qid, (judgment.keywords.clone(), judgment.weight));
			},
		}
	}

	let mut header = String::new();

	for (qid, (keywords, weight)) in &entries {
		let _ = writeln!(header, "# qid:{qid}: {keywords}*{weight}");
	}

	Ok(header)
}

fn parse_header(raw: &str) -> Result<BTreeMap<u64, (String, u64)>> {
	let mut entries = BTreeMap::new();

	for line in raw.lines() {
		if !line.starts_with('#') {
			break;
		}

		let Some(caps) = HEADER_RE.captures(line) else { continue };
		let qid: u64 = caps[1]
			.parse()
			.map_err(|_| Error::MalformedHeader { line: line.to_string() })?;
		let (keywords, weight) = match caps[2].rsplit_once('*') {
			Some((keywords, weight)) => (
				keywords.to_string(),
				weight.parse().map_err(|_| Error::MalformedHeader { line: line.to_string() })?,
			),
			None => (caps[2].to_string(), 1),
		};

		entries.insert(qid, (keywords, weight));
	}

	Ok(entries)
}
