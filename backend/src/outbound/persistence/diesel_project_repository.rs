//! PostgreSQL-backed `ProjectRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProjectRepository, RecordStoreError};
use crate::domain::{NewProject, Project, ProjectId, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewProjectRow, ProjectRow};
use super::pool::DbPool;
use super::schema::projects;

/// Diesel-backed project store.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_project(row: ProjectRow) -> Project {
    Project {
        id: ProjectId::new(row.id),
        name: row.name,
        description: row.description,
        owner_user_id: UserId::new(row.owner_user_id),
        created_at: row.created_at,
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn create(
        &self,
        project: &NewProject,
        created_at: DateTime<Utc>,
    ) -> Result<Project, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProjectRow {
            name: project.name(),
            description: project.description(),
            owner_user_id: project.owner_user_id().get(),
            created_at,
        };

        diesel::insert_into(projects::table)
            .values(&row)
            .returning(ProjectRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_project)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        projects::table
            .find(id.get())
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_project))
            .map_err(map_diesel_error)
    }
}
