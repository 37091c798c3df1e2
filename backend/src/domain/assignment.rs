//! Assignment entity, attached to a project held in the project service.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::ProjectId;
use super::entity_id::define_entity_id;
use super::validation::{FieldValidationError, require_text};

define_entity_id! {
    /// Store-assigned assignment identifier.
    AssignmentId
}

/// Work status of an assignment.
///
/// Transitions are unconstrained: any status may replace any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum AssignmentStatus {
    /// Not started.
    #[default]
    ToDo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl AssignmentStatus {
    /// Stable textual form used on the wire and in storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "ToDo",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when stored or submitted text is not a known status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown assignment status: {0}")]
pub struct UnknownStatusError(String);

impl FromStr for AssignmentStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ToDo" => Ok(Self::ToDo),
            "InProgress" => Ok(Self::InProgress),
            "Done" => Ok(Self::Done),
            other => Err(UnknownStatusError(other.to_owned())),
        }
    }
}

/// Persisted assignment.
///
/// ## Invariants
/// - `project_id` was confirmed to exist upstream when the assignment was
///   created.
/// - `updated_at` is `None` until the first status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Identifier assigned by the assignment store.
    #[serde(rename = "assignmentId")]
    #[schema(value_type = i32, example = 1)]
    pub id: AssignmentId,
    /// Short title.
    #[schema(example = "First task")]
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Current status.
    pub status: AssignmentStatus,
    /// Parent project, validated against the project service at creation.
    #[schema(value_type = i32, example = 1)]
    pub project_id: ProjectId,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Timestamp of the latest status update.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated input for creating an assignment. New assignments always
/// start in [`AssignmentStatus::ToDo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    title: String,
    description: Option<String>,
    project_id: ProjectId,
}

impl NewAssignment {
    /// Validate the required fields.
    pub fn try_new(
        title: impl Into<String>,
        description: Option<String>,
        project_id: ProjectId,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            title: require_text("title", title)?,
            description,
            project_id,
        })
    }

    /// Short title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-form description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Referenced project.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Materialise the record a store persists under `id`.
    pub fn into_assignment(self, id: AssignmentId, created_at: DateTime<Utc>) -> Assignment {
        Assignment {
            id,
            title: self.title,
            description: self.description,
            status: AssignmentStatus::default(),
            project_id: self.project_id,
            created_at,
            updated_at: None,
        }
    }
}
