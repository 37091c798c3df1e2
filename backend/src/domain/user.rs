//! User entity: the root of the ownership chain.
//!
//! Users have no parent reference, so their creation is never gated on an
//! upstream existence check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::entity_id::define_entity_id;
use super::validation::{FieldValidationError, require_text};

define_entity_id! {
    /// Store-assigned user identifier.
    UserId
}

/// Persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier assigned by the user store.
    #[serde(rename = "userId")]
    #[schema(value_type = i32, example = 1)]
    pub id: UserId,
    /// Login name.
    #[schema(example = "ada")]
    pub username: String,
    /// Contact address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    email: String,
}

impl NewUser {
    /// Validate the required fields.
    ///
    /// # Examples
    /// ```
    /// use taskboard::domain::NewUser;
    ///
    /// let user = NewUser::try_new("ada", "ada@example.com").expect("valid user");
    /// assert_eq!(user.username(), "ada");
    /// assert!(NewUser::try_new(" ", "ada@example.com").is_err());
    /// ```
    pub fn try_new(
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            username: require_text("username", username)?,
            email: require_text("email", email)?,
        })
    }

    /// Login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Materialise the record a store persists under `id`.
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            created_at,
        }
    }
}
