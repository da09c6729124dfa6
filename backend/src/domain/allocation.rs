//! Monthly cost allocation.
//!
//! Splits a month's shopping spend across members by meals eaten and adds
//! an even share of the month's rent for every member who has not yet paid
//! it. The calculation is pure: it reads a [`LedgerSnapshot`] and never
//! fails. Missing data produces zeroes.
//!
//! Meal entries whose `member_id` names no member still count towards the
//! household meal total, so the per-member meal costs may not add up to the
//! shopping total. [`find_orphaned_records`] reports those rows.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BillingMonth, LedgerSnapshot, MemberId, MemberName, RecordId};

/// One member's share of a month's costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberCost {
    /// Member identifier.
    #[schema(value_type = String, example = "1")]
    pub member_id: MemberId,
    /// Member display name.
    #[schema(value_type = String, example = "Alice")]
    pub name: MemberName,
    /// Meals eaten in the month.
    pub meal_count: f64,
    /// `meal_count` multiplied by the per-meal rate.
    pub meal_cost: f64,
    /// Even share of the month's rent.
    pub rent_share: f64,
    /// Whether the member has paid their rent share.
    pub rent_paid: bool,
    /// Meal cost plus the rent share when unpaid.
    pub total_cost: f64,
}

/// Aggregate costs for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCosts {
    /// Month the figures cover.
    #[schema(value_type = String, example = "2024-05")]
    pub month: BillingMonth,
    /// Shopping spend in the month.
    pub total_cost: f64,
    /// Shopping spend divided by meals eaten, or zero without meals.
    pub per_meal_cost: f64,
    /// Rent recorded for the month, or zero.
    pub rent_cost: f64,
    /// Rent divided evenly between members, or zero without members.
    pub per_person_rent: f64,
    /// One entry per member, in member order.
    pub member_costs: Vec<MemberCost>,
}

/// In-month rows referencing members that do not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanedRecords {
    /// Meal entries whose member is missing.
    pub meal_entry_ids: Vec<RecordId>,
    /// Rent payments for the month whose member is missing.
    pub rent_payment_ids: Vec<RecordId>,
}

impl OrphanedRecords {
    /// Whether no orphans were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meal_entry_ids.is_empty() && self.rent_payment_ids.is_empty()
    }
}

/// Allocate `month`'s costs across the household.
///
/// # Examples
/// ```
/// use messbook::domain::{allocate_monthly_costs, BillingMonth, LedgerSnapshot};
///
/// let month = BillingMonth::parse("2024-05").expect("valid month");
/// let costs = allocate_monthly_costs(&LedgerSnapshot::default(), &month);
/// assert_eq!(costs.total_cost, 0.0);
/// assert!(costs.member_costs.is_empty());
/// ```
#[must_use]
pub fn allocate_monthly_costs(ledger: &LedgerSnapshot, month: &BillingMonth) -> MonthlyCosts {
    let meals_in_month: Vec<_> = ledger
        .meal_entries
        .iter()
        .filter(|entry| month.contains(&entry.date))
        .collect();

    let total_cost = sum(
        ledger
            .shopping_items
            .iter()
            .filter(|item| month.contains(&item.date))
            .map(|item| item.cost.value()),
    );
    let total_meals = sum(meals_in_month.iter().map(|entry| entry.count.value()));

    let rent_cost = ledger
        .rent_costs
        .iter()
        .find(|rent| month.labels(&rent.month))
        .map_or(0.0, |rent| rent.amount.value());

    let per_meal_cost = if total_meals > 0.0 {
        total_cost / total_meals
    } else {
        0.0
    };
    let per_person_rent = if ledger.members.is_empty() {
        0.0
    } else {
        rent_cost / ledger.members.len() as f64
    };

    let payment_key = month.first_day_key();
    let member_costs = ledger
        .members
        .iter()
        .map(|member| {
            let meal_count = sum(
                meals_in_month
                    .iter()
                    .filter(|entry| entry.member_id == member.id)
                    .map(|entry| entry.count.value()),
            );
            let meal_cost = meal_count * per_meal_cost;
            let rent_paid = ledger.rent_payments.iter().any(|payment| {
                payment.member_id == member.id && payment.month == payment_key && payment.paid
            });
            let unpaid_rent = if rent_paid { 0.0 } else { per_person_rent };
            MemberCost {
                member_id: member.id.clone(),
                name: member.name.clone(),
                meal_count,
                meal_cost,
                rent_share: per_person_rent,
                rent_paid,
                total_cost: meal_cost + unpaid_rent,
            }
        })
        .collect();

    MonthlyCosts {
        month: month.clone(),
        total_cost,
        per_meal_cost,
        rent_cost,
        per_person_rent,
        member_costs,
    }
}

/// Add up from `+0.0`; `Iterator::sum` starts at `-0.0` for floats.
fn sum(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, value| acc + value)
}

/// Find in-month meal entries and rent payments whose member is missing.
#[must_use]
pub fn find_orphaned_records(ledger: &LedgerSnapshot, month: &BillingMonth) -> OrphanedRecords {
    let known = |member_id: &MemberId| ledger.members.iter().any(|member| &member.id == member_id);
    let payment_key = month.first_day_key();

    OrphanedRecords {
        meal_entry_ids: ledger
            .meal_entries
            .iter()
            .filter(|entry| month.contains(&entry.date) && !known(&entry.member_id))
            .map(|entry| entry.id.clone())
            .collect(),
        rent_payment_ids: ledger
            .rent_payments
            .iter()
            .filter(|payment| payment.month == payment_key && !known(&payment.member_id))
            .map(|payment| payment.id.clone())
            .collect(),
    }
}

#[cfg(test)]
#[path = "allocation_tests.rs"]
mod tests;
