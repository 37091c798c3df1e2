//! User service: plain create and lookup, no upstream.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::map_store_error;
use crate::domain::ports::{UserRepository, UserService};
use crate::domain::{Error, NewUser, User, UserId};

/// User service backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UserServiceImpl<R: ?Sized> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> UserServiceImpl<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> UserService for UserServiceImpl<R>
where
    R: UserRepository + ?Sized,
{
    async fn create(&self, user: NewUser) -> Result<User, Error> {
        let created = self
            .repo
            .create(&user, self.clock.utc())
            .await
            .map_err(map_store_error)?;
        info!(user_id = %created.id, "created user");
        Ok(created)
    }

    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}
