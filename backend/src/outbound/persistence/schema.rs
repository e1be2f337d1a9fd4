//! Diesel table definitions matching `migrations/`.

diesel::table! {
    /// Registered users. `email` carries a unique index.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Trimmed display name, 2 to 50 characters.
        #[max_length = 50]
        name -> Varchar,
        /// Trimmed, lowercased email address.
        email -> Text,
        /// Contact number as submitted, trimmed.
        #[max_length = 15]
        contact_no -> Varchar,
        /// Postal address, 10 to 200 characters.
        #[max_length = 200]
        address -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
