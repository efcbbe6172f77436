pub mod extract;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod sanitize;
pub mod types;
pub mod version;

pub use pipeline::flatten;
pub use report::{readable_size, DuplicationStat, Report};
pub use types::{ExtractionSummary, ForcedCause, Resolution, SelectionReason, StagedEntry};
