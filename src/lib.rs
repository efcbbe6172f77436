pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::config::{FlattenPaths, FlattenSettings};
pub use services::flatten::{flatten, Report};
pub use types::errors::{FlattenError, FlattenResult};
