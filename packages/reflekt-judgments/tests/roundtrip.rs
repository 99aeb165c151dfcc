use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use reflekt_judgments::{Error, Judgment, judgments_by_qid, read_judgments, write_judgments};

fn temp_judgment_path() -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("reflekt_judgments_test_{nanos}_{pid}_{ordinal}.txt"));

	path
}

fn sample_judgments() -> Vec<Judgment> {
	vec![
		Judgment::new(4, 1, "star wars", "11", 2),
		Judgment::new(3, 1, "star wars", "1891", 2),
		Judgment::new(0, 1, "star wars", "603", 2),
		Judgment::new(4, 2, "rambo", "7555", 1),
		Judgment::new(1, 2, "rambo", "1370", 1),
	]
}

#[test]
fn round_trip_preserves_rows() {
	let path = temp_judgment_path();
	let written = sample_judgments();

	write_judgments(&path, &written).expect("write failed");

	let read = read_judgments(&path).expect("read failed");

	fs::remove_file(&path).expect("cleanup failed");

	assert_eq!(read.len(), written.len());

	for (lhs, rhs) in read.iter().zip(&written) {
		assert_eq!(lhs.grade, rhs.grade);
		assert_eq!(lhs.qid, rhs.qid);
		assert_eq!(lhs.keywords, rhs.keywords);
		assert_eq!(lhs.doc_id, rhs.doc_id);
		assert_eq!(lhs.weight, rhs.weight);
	}
}

#[test]
fn header_maps_each_qid_to_its_keywords() {
	let path = temp_judgment_path();

	write_judgments(&path, &sample_judgments()).expect("write failed");

	let raw = fs::read_to_string(&path).expect("read failed");

	fs::remove_file(&path).expect("cleanup failed");

	assert!(raw.contains("# qid:1: star wars*2"));
	assert!(raw.contains("# qid:2: rambo*1"));
}

#[test]
fn conflicting_header_keywords_fail_loudly() {
	let path = temp_judgment_path();
	let judgments = vec![
		Judgment::new(4, 1, "star wars", "11", 1),
		Judgment::new(2, 1, "star trek", "13475", 1),
	];
	let result = write_judgments(&path, &judgments);

	let _ = fs::remove_file(&path);

	assert!(matches!(result, Err(Error::ConflictingKeywords { qid: 1, .. })));
}

#[test]
fn header_without_weight_defaults_to_one() {
	let path = temp_judgment_path();
	let raw = "# qid:3: the matrix\n\n4\tqid:3\t # 603\tthe matrix\n";

	fs::write(&path, raw).expect("write failed");

	let read = read_judgments(&path).expect("read failed");

	fs::remove_file(&path).expect("cleanup failed");

	assert_eq!(read.len(), 1);
	assert_eq!(read[0].keywords, "the matrix");
	assert_eq!(read[0].weight, 1);
}

#[test]
fn body_row_without_header_entry_is_an_error() {
	let path = temp_judgment_path();
	let raw = "# qid:1: star wars*1\n\n4\tqid:9\t # 11\tstar wars\n";

	fs::write(&path, raw).expect("write failed");

	let result = read_judgments(&path);

	fs::remove_file(&path).expect("cleanup failed");

	assert!(matches!(result, Err(Error::MissingHeaderEntry { qid: 9 })));
}

#[test]
fn grouping_by_qid_keeps_all_rows() {
	let judgments = sample_judgments();
	let grouped = judgments_by_qid(&judgments);

	assert_eq!(grouped.len(), 2);
	assert_eq!(grouped[&1].len(), 3);
	assert_eq!(grouped[&2].len(), 2);
}
