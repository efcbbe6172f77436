pub mod descriptor;

pub use descriptor::{read_identifier, read_version};
