//! Tests for monthly cost allocation.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    Amount, ItemName, LedgerDate, MealCount, MealEntry, Member, MemberRole, RentCost,
    RentPayment, ShoppingItem,
};

fn member(id: &str, name: &str) -> Member {
    Member {
        id: MemberId::new(id).expect("member id"),
        name: MemberName::new(name).expect("member name"),
        role: MemberRole::Member,
        created_by: "admin".to_owned(),
    }
}

fn meal(id: &str, member_id: &str, date: &str, count: f64) -> MealEntry {
    MealEntry {
        id: RecordId::new(id).expect("record id"),
        member_id: MemberId::new(member_id).expect("member id"),
        date: LedgerDate::parse(date).expect("date"),
        count: MealCount::new(count).expect("count"),
        created_by: "admin".to_owned(),
        updated_by: "admin".to_owned(),
    }
}

fn shopping(id: &str, cost: f64, date: &str) -> ShoppingItem {
    ShoppingItem {
        id: RecordId::new(id).expect("record id"),
        name: ItemName::new("Groceries").expect("item name"),
        cost: Amount::new(cost).expect("cost"),
        date: LedgerDate::parse(date).expect("date"),
        created_by: "admin".to_owned(),
        updated_by: "admin".to_owned(),
    }
}

fn rent(id: &str, month: &str, amount: f64) -> RentCost {
    RentCost {
        id: RecordId::new(id).expect("record id"),
        month: month.to_owned(),
        amount: Amount::new(amount).expect("amount"),
        created_by: "admin".to_owned(),
    }
}

fn payment(member_id: &str, month: &str, paid: bool) -> RentPayment {
    RentPayment {
        id: RecordId::new(format!("p-{member_id}-{month}")).expect("record id"),
        member_id: MemberId::new(member_id).expect("member id"),
        month: month.to_owned(),
        paid,
        created_by: "admin".to_owned(),
    }
}

#[fixture]
fn may() -> BillingMonth {
    BillingMonth::parse("2024-05").expect("valid month")
}

#[fixture]
fn household() -> LedgerSnapshot {
    LedgerSnapshot {
        members: vec![member("1", "Alice"), member("2", "Bob")],
        meal_entries: vec![
            meal("m1", "1", "2024-05-01", 2.0),
            meal("m2", "2", "2024-05-01", 1.0),
        ],
        shopping_items: vec![shopping("s1", 30.0, "2024-05-02")],
        rent_costs: vec![rent("r1", "2024-05", 100.0)],
        rent_payments: Vec::new(),
    }
}

fn cost_for<'a>(costs: &'a MonthlyCosts, id: &str) -> &'a MemberCost {
    costs
        .member_costs
        .iter()
        .find(|cost| cost.member_id.as_str() == id)
        .expect("member present")
}

#[rstest]
fn splits_meals_and_rent(household: LedgerSnapshot, may: BillingMonth) {
    let costs = allocate_monthly_costs(&household, &may);

    assert_eq!(costs.total_cost, 30.0);
    assert_eq!(costs.per_meal_cost, 10.0);
    assert_eq!(costs.rent_cost, 100.0);
    assert_eq!(costs.per_person_rent, 50.0);

    let alice = cost_for(&costs, "1");
    assert_eq!(alice.meal_count, 2.0);
    assert_eq!(alice.meal_cost, 20.0);
    assert!(!alice.rent_paid);
    assert_eq!(alice.total_cost, 70.0);

    let bob = cost_for(&costs, "2");
    assert_eq!(bob.meal_cost, 10.0);
    assert_eq!(bob.total_cost, 60.0);
}

#[rstest]
fn paid_rent_is_excluded_from_the_total(mut household: LedgerSnapshot, may: BillingMonth) {
    household
        .rent_payments
        .push(payment("1", "2024-05-01", true));

    let costs = allocate_monthly_costs(&household, &may);

    let alice = cost_for(&costs, "1");
    assert!(alice.rent_paid);
    assert_eq!(alice.rent_share, 50.0);
    assert_eq!(alice.total_cost, 20.0);
    assert_eq!(cost_for(&costs, "2").total_cost, 60.0);
}

#[rstest]
#[case(payment("1", "2024-05-01", false))]
#[case(payment("1", "2024-05", true))]
#[case(payment("1", "2024-04-01", true))]
fn only_paid_first_day_payments_count(
    mut household: LedgerSnapshot,
    may: BillingMonth,
    #[case] record: RentPayment,
) {
    household.rent_payments.push(record);
    let costs = allocate_monthly_costs(&household, &may);
    assert!(!cost_for(&costs, "1").rent_paid);
}

#[rstest]
fn empty_month_yields_zeroes(household: LedgerSnapshot) {
    let june = BillingMonth::parse("2024-06").expect("valid month");
    let costs = allocate_monthly_costs(&household, &june);

    assert_eq!(costs.total_cost, 0.0);
    assert_eq!(costs.per_meal_cost, 0.0);
    assert_eq!(costs.rent_cost, 0.0);
    assert_eq!(costs.per_person_rent, 0.0);
    assert_eq!(costs.member_costs.len(), 2);
    for cost in &costs.member_costs {
        assert_eq!(cost.meal_count, 0.0);
        assert_eq!(cost.meal_cost, 0.0);
        assert_eq!(cost.rent_share, 0.0);
        assert_eq!(cost.total_cost, 0.0);
    }
}

#[rstest]
fn empty_month_zeroes_are_positive(household: LedgerSnapshot) {
    let june = BillingMonth::parse("2024-06").expect("valid month");
    let costs = allocate_monthly_costs(&household, &june);

    assert!(costs.total_cost.is_sign_positive());
    assert!(costs.per_meal_cost.is_sign_positive());
    for cost in &costs.member_costs {
        assert!(cost.meal_count.is_sign_positive());
        assert!(cost.meal_cost.is_sign_positive());
        assert!(cost.total_cost.is_sign_positive());
    }
    let json = serde_json::to_value(&costs).expect("serialise");
    assert_eq!(json["totalCost"].to_string(), "0.0");
    assert_eq!(json["memberCosts"][0]["mealCount"].to_string(), "0.0");
}

#[rstest]
fn member_order_is_preserved(may: BillingMonth) {
    let ledger = LedgerSnapshot {
        members: vec![member("9", "Zed"), member("1", "Alice"), member("5", "Max")],
        ..LedgerSnapshot::default()
    };
    let ids: Vec<_> = allocate_monthly_costs(&ledger, &may)
        .member_costs
        .into_iter()
        .map(|cost| cost.member_id.to_string())
        .collect();
    assert_eq!(ids, ["9", "1", "5"]);
}

#[rstest]
fn no_members_means_no_rent_split(may: BillingMonth) {
    let ledger = LedgerSnapshot {
        rent_costs: vec![rent("r1", "2024-05", 900.0)],
        ..LedgerSnapshot::default()
    };
    let costs = allocate_monthly_costs(&ledger, &may);
    assert_eq!(costs.rent_cost, 900.0);
    assert_eq!(costs.per_person_rent, 0.0);
    assert!(costs.member_costs.is_empty());
}

#[rstest]
fn spending_without_meals_has_no_rate(mut household: LedgerSnapshot, may: BillingMonth) {
    household.meal_entries.clear();
    let costs = allocate_monthly_costs(&household, &may);
    assert_eq!(costs.total_cost, 30.0);
    assert_eq!(costs.per_meal_cost, 0.0);
}

#[rstest]
fn meal_costs_sum_to_total_when_no_orphans(mut household: LedgerSnapshot, may: BillingMonth) {
    household
        .meal_entries
        .push(meal("m3", "1", "2024-05-17", 1.5));
    household
        .shopping_items
        .push(shopping("s2", 12.35, "2024-05-31"));
    let costs = allocate_monthly_costs(&household, &may);
    let allocated: f64 = costs.member_costs.iter().map(|cost| cost.meal_cost).sum();
    assert!((allocated - costs.total_cost).abs() < 1e-9);
}

#[rstest]
fn boundary_dates_are_inclusive(may: BillingMonth) {
    let ledger = LedgerSnapshot {
        shopping_items: vec![
            shopping("a", 1.0, "2024-04-30"),
            shopping("b", 2.0, "2024-05-01"),
            shopping("c", 4.0, "2024-05-31"),
            shopping("d", 8.0, "2024-06-01"),
        ],
        ..LedgerSnapshot::default()
    };
    assert_eq!(allocate_monthly_costs(&ledger, &may).total_cost, 6.0);
}

#[rstest]
#[case(vec![rent("r1", "2024-05-01", 120.0)], 120.0)]
#[case(vec![rent("r1", "2024-05", 80.0), rent("r2", "2024-05-01", 200.0)], 80.0)]
#[case(vec![rent("r1", "2024-04", 80.0)], 0.0)]
fn rent_lookup_uses_first_matching_label(
    may: BillingMonth,
    #[case] rent_costs: Vec<RentCost>,
    #[case] expected: f64,
) {
    let ledger = LedgerSnapshot {
        rent_costs,
        ..LedgerSnapshot::default()
    };
    assert_eq!(allocate_monthly_costs(&ledger, &may).rent_cost, expected);
}

#[rstest]
fn orphaned_meals_dilute_the_rate(mut household: LedgerSnapshot, may: BillingMonth) {
    household
        .meal_entries
        .push(meal("ghost", "404", "2024-05-03", 3.0));

    let costs = allocate_monthly_costs(&household, &may);

    assert_eq!(costs.per_meal_cost, 5.0);
    assert_eq!(costs.member_costs.len(), 2);
    let allocated: f64 = costs.member_costs.iter().map(|cost| cost.meal_cost).sum();
    assert_eq!(allocated, 15.0);

    let orphans = find_orphaned_records(&household, &may);
    assert_eq!(
        orphans.meal_entry_ids,
        vec![RecordId::new("ghost").expect("record id")]
    );
    assert!(orphans.rent_payment_ids.is_empty());
}

#[rstest]
fn orphaned_payments_are_reported(mut household: LedgerSnapshot, may: BillingMonth) {
    household
        .rent_payments
        .push(payment("404", "2024-05-01", true));
    household
        .rent_payments
        .push(payment("404", "2024-06-01", true));

    let orphans = find_orphaned_records(&household, &may);
    assert_eq!(orphans.rent_payment_ids.len(), 1);
    assert!(!orphans.is_empty());
    assert!(find_orphaned_records(&LedgerSnapshot::default(), &may).is_empty());
}

#[rstest]
fn allocation_is_idempotent(household: LedgerSnapshot, may: BillingMonth) {
    let first = allocate_monthly_costs(&household, &may);
    let second = allocate_monthly_costs(&household, &may);
    assert_eq!(first, second);
}

#[rstest]
fn serialises_with_camel_case_keys(household: LedgerSnapshot, may: BillingMonth) {
    let value = serde_json::to_value(allocate_monthly_costs(&household, &may)).expect("serialise");
    assert_eq!(value["month"], "2024-05");
    assert_eq!(value["perMealCost"], 10.0);
    assert_eq!(value["perPersonRent"], 50.0);
    assert_eq!(value["memberCosts"][0]["memberId"], "1");
    assert_eq!(value["memberCosts"][0]["rentPaid"], false);
    assert_eq!(value["memberCosts"][1]["totalCost"], 60.0);
}
