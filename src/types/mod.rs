pub mod errors;
pub mod provenance;

pub use errors::{FlattenError, FlattenResult, TaskContext};
pub use provenance::Provenance;
