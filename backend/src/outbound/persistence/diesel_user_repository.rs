//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecordStoreError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed user store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::new(row.id),
        username: row.username,
        email: row.email,
        created_at: row.created_at,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(
        &self,
        user: &NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<User, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            username: user.username(),
            email: user.email(),
            created_at,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_user)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_user))
            .map_err(map_diesel_error)
    }
}
