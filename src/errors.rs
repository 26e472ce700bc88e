use crate::core::warnings::WarningPath;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FloorUValueError {
    #[error("Request was considered invalid due to error: {0}")]
    InvalidRequest(#[from] anyhow::Error),
    #[error("Floor could not be validated: {0}")]
    MissingRequiredValue(#[from] RequiredValueMissingError),
}

/// A value needed before any calculation can be attempted was not supplied.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq, Serialize)]
#[serde(tag = "type", rename = "required value missing")]
#[error("Required value missing at '{path}'")]
pub struct RequiredValueMissingError {
    pub path: WarningPath,
}

impl RequiredValueMissingError {
    pub fn new(path: WarningPath) -> Self {
        Self { path }
    }

    pub fn with_path_prefix(self, prefix: &WarningPath) -> Self {
        Self {
            path: prefix
                .segments()
                .iter()
                .chain(self.path.segments())
                .cloned()
                .collect(),
        }
    }
}
