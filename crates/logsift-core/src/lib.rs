pub mod error;
pub mod record;

pub use error::SiftError;
pub use record::{EventLevel, MetricSample, RequestRecord};
