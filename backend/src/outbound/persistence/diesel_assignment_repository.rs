//! PostgreSQL-backed `AssignmentRepository`.
//!
//! Statuses are stored as their variant names and parsed back through
//! `AssignmentStatus::from_str`; an unknown value in the table is reported
//! as a query error rather than silently defaulted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AssignmentRepository, RecordStoreError};
use crate::domain::{Assignment, AssignmentId, AssignmentStatus, NewAssignment, ProjectId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AssignmentRow, AssignmentStatusUpdate, NewAssignmentRow};
use super::pool::DbPool;
use super::schema::assignments;

/// Diesel-backed assignment store.
#[derive(Clone)]
pub struct DieselAssignmentRepository {
    pool: DbPool,
}

impl DieselAssignmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_assignment(row: AssignmentRow) -> Result<Assignment, RecordStoreError> {
    let AssignmentRow {
        id,
        title,
        description,
        status,
        project_id,
        created_at,
        updated_at,
    } = row;
    let status = status
        .parse::<AssignmentStatus>()
        .map_err(|err| RecordStoreError::query(format!("assignment {id}: {err}")))?;

    Ok(Assignment {
        id: AssignmentId::new(id),
        title,
        description,
        status,
        project_id: ProjectId::new(project_id),
        created_at,
        updated_at,
    })
}

#[async_trait]
impl AssignmentRepository for DieselAssignmentRepository {
    async fn create(
        &self,
        assignment: &NewAssignment,
        created_at: DateTime<Utc>,
    ) -> Result<Assignment, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAssignmentRow {
            title: assignment.title(),
            description: assignment.description(),
            status: AssignmentStatus::ToDo.as_str(),
            project_id: assignment.project_id().get(),
            created_at,
        };

        let inserted = diesel::insert_into(assignments::table)
            .values(&row)
            .returning(AssignmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_assignment(inserted)
    }

    async fn find_by_id(
        &self,
        id: AssignmentId,
    ) -> Result<Option<Assignment>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = assignments::table
            .find(id.get())
            .select(AssignmentRow::as_select())
            .first::<AssignmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_assignment).transpose()
    }

    async fn update_status(
        &self,
        id: AssignmentId,
        status: AssignmentStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Assignment>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = AssignmentStatusUpdate {
            status: status.as_str(),
            updated_at: Some(updated_at),
        };

        let row = diesel::update(assignments::table.find(id.get()))
            .set(&changes)
            .returning(AssignmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_assignment).transpose()
    }
}
