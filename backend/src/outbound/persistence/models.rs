//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain records validate
//! every field again, so a hand-edited row cannot smuggle in a negative cost.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::UserAccount;
use crate::domain::{
    Amount, ItemName, LedgerDate, MealCount, MealEntry, Member, MemberId, MemberName, RecordId,
    RentCost, RentPayment, ShoppingItem, User, UserId, Username,
};

use super::schema::{members, meal_entries, rent_costs, rent_payments, shopping_list, users};

/// A stored row that no longer satisfies domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {table} row {id}: {reason}")]
pub(crate) struct InvalidRow {
    pub table: &'static str,
    pub id: String,
    pub reason: String,
}

impl InvalidRow {
    fn new(table: &'static str, id: &str, reason: impl ToString) -> Self {
        Self {
            table,
            id: id.to_owned(),
            reason: reason.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub created_by: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = InvalidRow;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let invalid = |reason: &dyn std::fmt::Display| InvalidRow::new("members", &row.id, reason);
        Ok(Self {
            id: MemberId::new(row.id.clone()).map_err(|err| invalid(&err))?,
            name: MemberName::new(&row.name).map_err(|err| invalid(&err))?,
            role: row.role.parse().map_err(|err| invalid(&err))?,
            created_by: row.created_by,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = members)]
pub(crate) struct NewMemberRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub created_by: &'a str,
}

impl<'a> From<&'a Member> for NewMemberRow<'a> {
    fn from(member: &'a Member) -> Self {
        Self {
            id: member.id.as_str(),
            name: member.name.as_ref(),
            role: member.role.as_str(),
            created_by: &member.created_by,
        }
    }
}

// ---------------------------------------------------------------------------
// Meal entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = meal_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MealEntryRow {
    pub id: String,
    pub member_id: String,
    pub date: NaiveDate,
    pub count: f64,
    pub created_by: String,
    pub updated_by: String,
}

impl TryFrom<MealEntryRow> for MealEntry {
    type Error = InvalidRow;

    fn try_from(row: MealEntryRow) -> Result<Self, Self::Error> {
        let invalid =
            |reason: &dyn std::fmt::Display| InvalidRow::new("meal_entries", &row.id, reason);
        Ok(Self {
            id: RecordId::new(row.id.clone()).map_err(|err| invalid(&err))?,
            member_id: MemberId::new(row.member_id.clone()).map_err(|err| invalid(&err))?,
            date: LedgerDate::from_naive(row.date),
            count: MealCount::new(row.count).map_err(|err| invalid(&err))?,
            created_by: row.created_by,
            updated_by: row.updated_by,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = meal_entries)]
pub(crate) struct NewMealEntryRow<'a> {
    pub id: &'a str,
    pub member_id: &'a str,
    pub date: NaiveDate,
    pub count: f64,
    pub created_by: &'a str,
    pub updated_by: &'a str,
}

// ---------------------------------------------------------------------------
// Shopping list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shopping_list)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShoppingItemRow {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub date: NaiveDate,
    pub created_by: String,
    pub updated_by: String,
}

impl TryFrom<ShoppingItemRow> for ShoppingItem {
    type Error = InvalidRow;

    fn try_from(row: ShoppingItemRow) -> Result<Self, Self::Error> {
        let invalid =
            |reason: &dyn std::fmt::Display| InvalidRow::new("shopping_list", &row.id, reason);
        Ok(Self {
            id: RecordId::new(row.id.clone()).map_err(|err| invalid(&err))?,
            name: ItemName::new(&row.name).map_err(|err| invalid(&err))?,
            cost: Amount::new(row.cost).map_err(|err| invalid(&err))?,
            date: LedgerDate::from_naive(row.date),
            created_by: row.created_by,
            updated_by: row.updated_by,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = shopping_list)]
pub(crate) struct NewShoppingItemRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub cost: f64,
    pub date: NaiveDate,
    pub created_by: &'a str,
    pub updated_by: &'a str,
}

// ---------------------------------------------------------------------------
// Rent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rent_costs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RentCostRow {
    pub id: String,
    pub month: String,
    pub amount: f64,
    pub created_by: String,
}

impl TryFrom<RentCostRow> for RentCost {
    type Error = InvalidRow;

    fn try_from(row: RentCostRow) -> Result<Self, Self::Error> {
        let invalid =
            |reason: &dyn std::fmt::Display| InvalidRow::new("rent_costs", &row.id, reason);
        Ok(Self {
            id: RecordId::new(row.id.clone()).map_err(|err| invalid(&err))?,
            month: row.month,
            amount: Amount::new(row.amount).map_err(|err| invalid(&err))?,
            created_by: row.created_by,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = rent_costs)]
pub(crate) struct NewRentCostRow<'a> {
    pub id: &'a str,
    pub month: &'a str,
    pub amount: f64,
    pub created_by: &'a str,
}

impl<'a> From<&'a RentCost> for NewRentCostRow<'a> {
    fn from(rent: &'a RentCost) -> Self {
        Self {
            id: rent.id.as_str(),
            month: &rent.month,
            amount: rent.amount.value(),
            created_by: &rent.created_by,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rent_payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RentPaymentRow {
    pub id: String,
    pub member_id: String,
    pub month: String,
    pub paid: bool,
    pub created_by: String,
}

impl TryFrom<RentPaymentRow> for RentPayment {
    type Error = InvalidRow;

    fn try_from(row: RentPaymentRow) -> Result<Self, Self::Error> {
        let invalid =
            |reason: &dyn std::fmt::Display| InvalidRow::new("rent_payments", &row.id, reason);
        Ok(Self {
            id: RecordId::new(row.id.clone()).map_err(|err| invalid(&err))?,
            member_id: MemberId::new(row.member_id.clone()).map_err(|err| invalid(&err))?,
            month: row.month,
            paid: row.paid,
            created_by: row.created_by,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = rent_payments)]
pub(crate) struct NewRentPaymentRow<'a> {
    pub id: &'a str,
    pub member_id: &'a str,
    pub month: &'a str,
    pub paid: bool,
    pub created_by: &'a str,
}

impl<'a> From<&'a RentPayment> for NewRentPaymentRow<'a> {
    fn from(payment: &'a RentPayment) -> Self {
        Self {
            id: payment.id.as_str(),
            member_id: payment.member_id.as_str(),
            month: &payment.month,
            paid: payment.paid,
            created_by: &payment.created_by,
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = InvalidRow;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row.id.to_string();
        let invalid = |reason: &dyn std::fmt::Display| InvalidRow::new("users", &id, reason);
        let username = Username::new(&row.username).map_err(|err| invalid(&err))?;
        let role = row.role.parse().map_err(|err| invalid(&err))?;
        Ok(Self {
            user: User::new(UserId::from_uuid(row.id), username, role),
            password_hash: row.password_hash,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        Self {
            id: *account.user.id().as_uuid(),
            username: account.user.username().as_ref(),
            password_hash: &account.password_hash,
            role: account.user.role().as_str(),
        }
    }
}
