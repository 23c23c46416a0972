//! Navigation records: reader, records and store
mod parsing;
mod record;
mod store;

pub use parsing::RecordReader;
pub use record::EphemerisRecord;
pub use store::{DuplicatePolicy, EphemerisStore};
