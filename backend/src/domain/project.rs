//! Project entity, owned by a user held in the user service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;
use super::entity_id::define_entity_id;
use super::validation::{FieldValidationError, require_text};

define_entity_id! {
    /// Store-assigned project identifier.
    ProjectId
}

/// Persisted project.
///
/// ## Invariants
/// - `owner_user_id` was confirmed to exist upstream when the project was
///   created. Nothing re-checks it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identifier assigned by the project store.
    #[serde(rename = "projectId")]
    #[schema(value_type = i32, example = 1)]
    pub id: ProjectId,
    /// Project name.
    #[schema(example = "TaskBoard")]
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Owning user, validated against the user service at creation.
    #[schema(value_type = i32, example = 1)]
    pub owner_user_id: UserId,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: String,
    description: Option<String>,
    owner_user_id: UserId,
}

impl NewProject {
    /// Validate the required fields. The owner reference is checked later by
    /// the creation workflow, not here.
    pub fn try_new(
        name: impl Into<String>,
        description: Option<String>,
        owner_user_id: UserId,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            name: require_text("name", name)?,
            description,
            owner_user_id,
        })
    }

    /// Project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Referenced owner.
    pub fn owner_user_id(&self) -> UserId {
        self.owner_user_id
    }

    /// Materialise the record a store persists under `id`.
    pub fn into_project(self, id: ProjectId, created_at: DateTime<Utc>) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            owner_user_id: self.owner_user_id,
            created_at,
        }
    }
}
