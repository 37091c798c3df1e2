//! Diesel table definitions.
//!
//! Each service owns one table and migrates only that table, so there are
//! no foreign keys between them: parent references are integers validated
//! against the upstream service at creation time.

diesel::table! {
    /// Users, owned by the user service.
    users (id) {
        id -> Int4,
        username -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects, owned by the project service.
    projects (id) {
        id -> Int4,
        name -> Varchar,
        description -> Nullable<Text>,
        /// User id confirmed upstream at creation; not a foreign key.
        owner_user_id -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Assignments, owned by the assignment service.
    assignments (id) {
        id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        /// One of `ToDo`, `InProgress`, `Done`.
        status -> Varchar,
        /// Project id confirmed upstream at creation; not a foreign key.
        project_id -> Int4,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
    }
}
