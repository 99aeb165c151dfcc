mod error;

pub mod aggregate;
pub mod reflect;

pub use aggregate::{Aggregation, Aggregator};
pub use error::{Error, Result};
pub use reflect::{ReflectionEngine, ranked};
