//! Common types and utilities for the ARM Resource Projector
//!
//! This crate contains the error taxonomy, the raw resource record model and
//! the client seam shared by the parser, projector, and CLI components.

mod client;
mod resource;

pub use client::{list_all_resources, resource_exists, ClientError, ResourceClient};
pub use resource::{GenericResource, ResourcePage, Tags};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while parsing identifiers or projecting resources
#[derive(Error, Debug)]
pub enum ProjectorError {
    #[error("Malformed resource identifier '{identifier}': {reason}")]
    MalformedIdentifier { identifier: String, reason: String },

    #[error("Unsupported projection format: {0}")]
    UnsupportedProjectionFormat(String),

    #[error("Invalid resource record: {0}")]
    InvalidResource(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectorError {
    /// Build a `MalformedIdentifier` error for `identifier`
    pub fn malformed(identifier: &str, reason: impl Into<String>) -> Self {
        ProjectorError::MalformedIdentifier {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for projector operations
pub type Result<T> = std::result::Result<T, ProjectorError>;

/// Output convention used when projecting opaque JSON payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionFormat {
    /// Nested payloads become untyped mappings, sequences, and scalars
    Legacy,
    /// Nested payloads become typed, recursively navigable objects
    Structured,
}

impl ProjectionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionFormat::Legacy => "legacy",
            ProjectionFormat::Structured => "structured",
        }
    }
}

impl fmt::Display for ProjectionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionFormat {
    type Err = ProjectorError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("legacy") {
            Ok(ProjectionFormat::Legacy)
        } else if s.eq_ignore_ascii_case("structured") {
            Ok(ProjectionFormat::Structured)
        } else {
            Err(ProjectorError::UnsupportedProjectionFormat(s.to_string()))
        }
    }
}
