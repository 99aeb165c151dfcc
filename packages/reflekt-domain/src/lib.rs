mod candidate;
mod doc;
mod phrase;
mod popularity;
mod store;

pub use candidate::{QueryCandidate, QueryClass};
pub use doc::MovieDoc;
pub use phrase::normalize_phrase;
pub use popularity::{popularity, popularity_range};
pub use store::{CandidateStore, import_linked, merge_discounted};
