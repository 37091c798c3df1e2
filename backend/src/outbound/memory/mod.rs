//! In-memory record stores.
//!
//! Used when no database is configured and by tests. Each store hands out
//! identifiers from 1 upwards under the same lock that guards its rows, so
//! concurrent inserts never share an id.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AssignmentRepository, ProjectRepository, RecordStoreError, UserRepository,
};
use crate::domain::{
    Assignment, AssignmentId, AssignmentStatus, NewAssignment, NewProject, NewUser, Project,
    ProjectId, User, UserId,
};

struct TableState<T> {
    last_id: i32,
    rows: BTreeMap<i32, T>,
}

/// Rows keyed by a store-assigned integer id.
struct MemoryTable<T> {
    state: Mutex<TableState<T>>,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(TableState {
                last_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<T: Clone> MemoryTable<T> {
    fn lock(&self) -> Result<MutexGuard<'_, TableState<T>>, RecordStoreError> {
        self.state
            .lock()
            .map_err(|_| RecordStoreError::query("in-memory store lock poisoned"))
    }

    fn insert(&self, build: impl FnOnce(i32) -> T) -> Result<T, RecordStoreError> {
        let mut state = self.lock()?;
        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| RecordStoreError::query("identifier space exhausted"))?;
        let row = build(id);
        state.rows.insert(id, row.clone());
        state.last_id = id;
        Ok(row)
    }

    fn get(&self, id: i32) -> Result<Option<T>, RecordStoreError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    fn update(&self, id: i32, apply: impl FnOnce(&mut T)) -> Result<Option<T>, RecordStoreError> {
        let mut state = self.lock()?;
        Ok(state.rows.get_mut(&id).map(|row| {
            apply(row);
            row.clone()
        }))
    }

    #[cfg(test)]
    fn row_count(&self) -> Result<usize, RecordStoreError> {
        Ok(self.lock()?.rows.len())
    }
}

/// Row counts for assertions in tests.
macro_rules! memory_store_len {
    ($name:ident) => {
        #[cfg(test)]
        impl $name {
            /// Number of stored records.
            pub fn len(&self) -> usize {
                self.table.row_count().expect("store lock is healthy")
            }

            /// Whether the store holds no records.
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }
        }
    };
}

/// In-memory user store.
#[derive(Default)]
pub struct MemoryUserRepository {
    table: MemoryTable<User>,
}

memory_store_len!(MemoryUserRepository);

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(
        &self,
        user: &NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<User, RecordStoreError> {
        self.table
            .insert(|id| user.clone().into_user(UserId::new(id), created_at))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RecordStoreError> {
        self.table.get(id.get())
    }
}

/// In-memory project store.
#[derive(Default)]
pub struct MemoryProjectRepository {
    table: MemoryTable<Project>,
}

memory_store_len!(MemoryProjectRepository);

#[async_trait]
impl ProjectRepository for MemoryProjectRepository {
    async fn create(
        &self,
        project: &NewProject,
        created_at: DateTime<Utc>,
    ) -> Result<Project, RecordStoreError> {
        self.table
            .insert(|id| project.clone().into_project(ProjectId::new(id), created_at))
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, RecordStoreError> {
        self.table.get(id.get())
    }
}

/// In-memory assignment store.
#[derive(Default)]
pub struct MemoryAssignmentRepository {
    table: MemoryTable<Assignment>,
}

memory_store_len!(MemoryAssignmentRepository);

#[async_trait]
impl AssignmentRepository for MemoryAssignmentRepository {
    async fn create(
        &self,
        assignment: &NewAssignment,
        created_at: DateTime<Utc>,
    ) -> Result<Assignment, RecordStoreError> {
        self.table.insert(|id| {
            assignment
                .clone()
                .into_assignment(AssignmentId::new(id), created_at)
        })
    }

    async fn find_by_id(
        &self,
        id: AssignmentId,
    ) -> Result<Option<Assignment>, RecordStoreError> {
        self.table.get(id.get())
    }

    async fn update_status(
        &self,
        id: AssignmentId,
        status: AssignmentStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Assignment>, RecordStoreError> {
        self.table.update(id.get(), |assignment| {
            assignment.status = status;
            assignment.updated_at = Some(updated_at);
        })
    }
}
