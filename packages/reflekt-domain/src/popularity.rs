use crate::MovieDoc;

/// Popularity proxy in [0, 10]: the vote average scaled by a ceiling that
/// grows with vote count, so sparsely voted documents cannot dominate.
/// Documents without vote statistics fall back to a neutral 1.0.
pub fn popularity(doc: &MovieDoc) -> f64 {
	let Some(vote_count) = doc.vote_count() else { return 1.0 };
	let Some(vote_average) = doc.vote_average() else { return 1.0 };
	let ceiling = if vote_count < 20 {
		3.0
	} else if vote_count < 90 {
		5.0
	} else if vote_count < 200 {
		7.0
	} else {
		10.0
	};

	ceiling * (vote_average / 10.0)
}

/// Popularity spread over a result list. The maximum is nudged upward when
/// the spread would otherwise be zero, so spread denominators stay
/// positive.
pub fn popularity_range<'a, I>(docs: I) -> (f64, f64)
where
	I: IntoIterator<Item = &'a MovieDoc>,
{
	let mut min_pop = 11.0_f64;
	let mut max_pop = 0.0_f64;

	for doc in docs {
		let pop = popularity(doc);

		if pop < min_pop {
			min_pop = pop;
		}
		if pop > max_pop {
			max_pop = pop;
		}
	}

	if max_pop <= min_pop {
		max_pop = min_pop + 0.001;
	}

	(min_pop, max_pop)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn doc(votes: u64, average: f64) -> MovieDoc {
		MovieDoc::new("d1", json!({ "vote_count": votes, "vote_average": average }))
	}

	#[test]
	fn ceiling_grows_with_vote_count() {
		assert_eq!(popularity(&doc(5, 10.0)), 3.0);
		assert_eq!(popularity(&doc(50, 10.0)), 5.0);
		assert_eq!(popularity(&doc(150, 10.0)), 7.0);
		assert_eq!(popularity(&doc(5000, 10.0)), 10.0);
	}

	#[test]
	fn missing_votes_fall_back_to_neutral() {
		let bare = MovieDoc::new("d2", json!({ "title": "Alpha" }));

		assert_eq!(popularity(&bare), 1.0);
	}

	#[test]
	fn range_spread_is_never_zero() {
		let a = doc(5000, 8.0);
		let b = doc(5000, 8.0);
		let (min_pop, max_pop) = popularity_range([&a, &b]);

		assert!(max_pop > min_pop);
	}
}
