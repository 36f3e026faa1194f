//! Diesel table definitions.
//!
//! Must match `backend/migrations`. Regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// UUID v4 assigned at signup.
        id -> Uuid,
        /// Unique, case-sensitive login name (max 150 characters).
        username -> Varchar,
        /// bcrypt hash string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Priced items shared by every signed-in user.
    items (id) {
        /// Store-assigned identifier (`BIGSERIAL`).
        id -> Int8,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Price as a signed count of hundredths.
        price_cents -> Int8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, items);
