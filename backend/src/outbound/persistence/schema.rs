//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Series grouping related media.
    series (series_id) {
        series_id -> Int4,
        series_title -> Varchar,
    }
}

diesel::table! {
    /// Genre names referenced by media rows.
    genres (genre_name) {
        genre_name -> Varchar,
    }
}

diesel::table! {
    /// Media types such as books or films.
    media_types (media_type_id) {
        media_type_id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Writers credited as media authors.
    writers (writer_id) {
        writer_id -> Int4,
        name_first -> Varchar,
        /// Optional middle initial, rendered as `X.` in full names.
        name_initial -> Nullable<Varchar>,
        name_last -> Varchar,
    }
}

diesel::table! {
    /// Reviewable media items. Read-only for the application.
    media (media_id) {
        media_id -> Int4,
        media_title -> Varchar,
        genre_name -> Nullable<Varchar>,
        media_type_id -> Nullable<Int4>,
        release_date -> Nullable<Date>,
        /// Writer identifier.
        author -> Nullable<Int4>,
        series_id -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Reviewers. Rows are only ever created by review submissions.
    ///
    /// `user_id` carries no sequence; new rows take the current maximum plus
    /// one.
    users (user_id) {
        user_id -> Int4,
        name -> Varchar,
        /// Opaque password string, stored as received.
        password -> Varchar,
        email -> Varchar,
        profile_image -> Nullable<Varchar>,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Reviews linking a user to a media item.
    user_reviews (user_review_id) {
        user_review_id -> Int4,
        media_id -> Int4,
        user_id -> Int4,
        review -> Text,
        score -> Nullable<Int4>,
    }
}

diesel::joinable!(media -> genres (genre_name));
diesel::joinable!(media -> media_types (media_type_id));
diesel::joinable!(media -> writers (author));
diesel::joinable!(media -> series (series_id));
diesel::joinable!(user_reviews -> media (media_id));
diesel::joinable!(user_reviews -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    series,
    genres,
    media_types,
    writers,
    media,
    users,
    user_reviews,
);
