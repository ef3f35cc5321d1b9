//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Trimmed title.
        #[max_length = 255]
        title -> Varchar,
        /// Trimmed description, empty when absent.
        description -> Text,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp assigned by the database.
        created_at -> Timestamptz,
    }
}
