//! Diesel table definitions.
//!
//! Keep in step with `backend/migrations`; `diesel print-schema` against a
//! migrated database regenerates this file.

diesel::table! {
    /// Demo and registered users with their password digests.
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        email -> Varchar,
        avatar_url -> Nullable<Text>,
        /// PBKDF2-HMAC-SHA256 digest as a PHC string.
        password_digest -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reporting weeks. `position` preserves store order.
    timesheet_weeks (id) {
        id -> Varchar,
        position -> Int8,
        week_number -> Int2,
        start_date -> Date,
        end_date -> Date,
        status -> Varchar,
    }
}

diesel::table! {
    /// Logged entries. `position` preserves insertion order.
    timesheet_entries (id) {
        id -> Uuid,
        position -> Int8,
        week_id -> Varchar,
        entry_date -> Date,
        project_name -> Varchar,
        work_type -> Nullable<Varchar>,
        description -> Nullable<Varchar>,
        /// Hours in hundredths, `0..=2400`.
        hours_centis -> Int4,
    }
}

diesel::joinable!(timesheet_entries -> timesheet_weeks (week_id));
diesel::allow_tables_to_appear_in_same_query!(timesheet_entries, timesheet_weeks, users);
