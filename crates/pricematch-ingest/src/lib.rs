pub mod error;
pub mod normalize;
pub mod reader;

pub use error::IngestError;
pub use normalize::normalize_record;
pub use reader::{parse_listings, read_listings, IngestBatch};
