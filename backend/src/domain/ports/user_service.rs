//! Driving port for the user service.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Persist a validated user.
    async fn create(&self, user: NewUser) -> Result<User, Error>;

    /// Fetch a user, failing with `not_found` when absent.
    async fn get(&self, id: UserId) -> Result<User, Error>;
}
