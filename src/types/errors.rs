use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read archive {name}: {source}")]
    Archive {
        name: String,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("Non directory entry in staging folder: {}", .0.display())]
    UnexpectedStagingEntry(PathBuf),
    #[error("Mod {0} has no entries")]
    EmptyVariantSet(String),
    #[error("Invalid settings: {0}")]
    Config(String),
    #[error("{task}")]
    Task {
        task: String,
        #[source]
        source: Box<FlattenError>,
    },
}

impl FlattenError {
    /// Builds a `map_err` adapter that pins an I/O failure to `path`.
    pub fn io(path: &Path) -> impl FnOnce(std::io::Error) -> FlattenError + '_ {
        move |source| FlattenError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Builds a `map_err` adapter for archive failures of the package `name`.
    pub fn archive(name: &str) -> impl FnOnce(zip::result::ZipError) -> FlattenError + '_ {
        move |source| FlattenError::Archive {
            name: name.to_string(),
            source,
        }
    }

    /// The innermost error under any task wrappers.
    pub fn root(&self) -> &FlattenError {
        match self {
            FlattenError::Task { source, .. } => source.root(),
            other => other,
        }
    }
}

impl Serialize for FlattenError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type FlattenResult<T> = Result<T, FlattenError>;

/// Attaches a task description to a failing step.
pub trait TaskContext<T> {
    fn with_task<F>(self, task: F) -> FlattenResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> TaskContext<T> for FlattenResult<T> {
    fn with_task<F>(self, task: F) -> FlattenResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| FlattenError::Task {
            task: task(),
            source: Box::new(source),
        })
    }
}

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
