//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    accounts (id) {
        /// Surrogate key.
        id -> Int8,
        /// Login identifier, unique.
        username -> Varchar,
        /// Argon2id PHC digest.
        password -> Varchar,
    }
}

diesel::table! {
    /// Notes, each owned by one account.
    notes (id) {
        /// Surrogate key.
        id -> Int8,
        /// Owning account; cascades on account deletion.
        account_id -> Int8,
        /// Short heading.
        title -> Text,
        /// Body text.
        content -> Text,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(notes -> accounts (account_id));
diesel::allow_tables_to_appear_in_same_query!(accounts, notes);
