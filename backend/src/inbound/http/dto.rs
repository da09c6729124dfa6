//! Response bodies for ledger records.
//!
//! Domain records keep their storage field names; HTTP clients get camelCase
//! objects with plain strings and numbers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LedgerSnapshot, MealEntry, Member, RentCost, RentPayment, ShoppingItem};

/// A household member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "member")]
    pub role: String,
    pub created_by: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.into(),
            name: member.name.into(),
            role: member.role.as_str().to_owned(),
            created_by: member.created_by,
        }
    }
}

/// Meals eaten by one member on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealEntryResponse {
    pub id: String,
    pub member_id: String,
    #[schema(example = "2024-05-01")]
    pub date: String,
    #[schema(example = 2.0)]
    pub count: f64,
    pub created_by: String,
    pub updated_by: String,
}

impl From<MealEntry> for MealEntryResponse {
    fn from(entry: MealEntry) -> Self {
        Self {
            id: entry.id.into(),
            member_id: entry.member_id.into(),
            date: entry.date.into(),
            count: entry.count.value(),
            created_by: entry.created_by,
            updated_by: entry.updated_by,
        }
    }
}

/// A shared grocery purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemResponse {
    pub id: String,
    #[schema(example = "Rice")]
    pub name: String,
    #[schema(example = 12.5)]
    pub cost: f64,
    #[schema(example = "2024-05-02")]
    pub date: String,
    pub created_by: String,
    pub updated_by: String,
}

impl From<ShoppingItem> for ShoppingItemResponse {
    fn from(item: ShoppingItem) -> Self {
        Self {
            id: item.id.into(),
            name: item.name.into(),
            cost: item.cost.value(),
            date: item.date.into(),
            created_by: item.created_by,
            updated_by: item.updated_by,
        }
    }
}

/// Total rent recorded for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentCostResponse {
    pub id: String,
    #[schema(example = "2024-05")]
    pub month: String,
    #[schema(example = 900.0)]
    pub amount: f64,
    pub created_by: String,
}

impl From<RentCost> for RentCostResponse {
    fn from(rent: RentCost) -> Self {
        Self {
            id: rent.id.into(),
            month: rent.month,
            amount: rent.amount.value(),
            created_by: rent.created_by,
        }
    }
}

/// Whether a member paid a month's rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentPaymentResponse {
    pub id: String,
    pub member_id: String,
    #[schema(example = "2024-05-01")]
    pub month: String,
    pub paid: bool,
    pub created_by: String,
}

impl From<RentPayment> for RentPaymentResponse {
    fn from(payment: RentPayment) -> Self {
        Self {
            id: payment.id.into(),
            member_id: payment.member_id.into(),
            month: payment.month,
            paid: payment.paid,
            created_by: payment.created_by,
        }
    }
}

/// Every ledger collection in storage order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    pub members: Vec<MemberResponse>,
    pub meal_entries: Vec<MealEntryResponse>,
    pub shopping_list: Vec<ShoppingItemResponse>,
    pub rent_costs: Vec<RentCostResponse>,
    pub rent_payments: Vec<RentPaymentResponse>,
}

fn convert<T, U: From<T>>(rows: Vec<T>) -> Vec<U> {
    rows.into_iter().map(U::from).collect()
}

impl From<LedgerSnapshot> for LedgerResponse {
    fn from(ledger: LedgerSnapshot) -> Self {
        Self {
            members: convert(ledger.members),
            meal_entries: convert(ledger.meal_entries),
            shopping_list: convert(ledger.shopping_items),
            rent_costs: convert(ledger.rent_costs),
            rent_payments: convert(ledger.rent_payments),
        }
    }
}
