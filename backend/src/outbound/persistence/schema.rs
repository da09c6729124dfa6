//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Household members, listed in `created_at` order.
    members (id) {
        id -> Text,
        name -> Text,
        /// `manager` or `member`.
        role -> Text,
        created_by -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Daily meal counts per member.
    meal_entries (id) {
        id -> Text,
        /// Not a foreign key; rows may outlive their member.
        member_id -> Text,
        date -> Date,
        count -> Float8,
        created_by -> Text,
        updated_by -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shared grocery purchases.
    shopping_list (id) {
        id -> Text,
        name -> Text,
        cost -> Float8,
        date -> Date,
        created_by -> Text,
        updated_by -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Monthly rent totals. `month` is `YYYY-MM` or `YYYY-MM-01`.
    rent_costs (id) {
        id -> Text,
        month -> Text,
        amount -> Float8,
        created_by -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-member rent payment flags keyed by the month's first day.
    rent_payments (id) {
        id -> Text,
        member_id -> Text,
        month -> Text,
        paid -> Bool,
        created_by -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Login accounts.
    users (id) {
        id -> Uuid,
        username -> Text,
        password_hash -> Text,
        /// `admin`, `manager` or `member`.
        role -> Text,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    members,
    meal_entries,
    shopping_list,
    rent_costs,
    rent_payments,
    users,
);
