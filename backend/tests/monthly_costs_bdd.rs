//! Behaviour tests for the monthly cost allocator.
//!
//! Each scenario builds a ledger in memory, allocates one month and checks
//! the per-meal rate, rent shares and member totals.

// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use messbook::domain::{
    Amount, BillingMonth, ItemName, LedgerDate, LedgerSnapshot, MealCount, MealEntry, Member,
    MemberCost, MemberId, MemberName, MemberRole, MonthlyCosts, OrphanedRecords, RecordId,
    RentCost, RentPayment, ShoppingItem, allocate_monthly_costs, find_orphaned_records,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

const AUTHOR: &str = "bdd";

#[derive(Default, ScenarioState)]
struct LedgerWorld {
    ledger: Slot<LedgerSnapshot>,
    costs: Slot<MonthlyCosts>,
    orphans: Slot<OrphanedRecords>,
}

impl LedgerWorld {
    fn edit(&self, change: impl FnOnce(&mut LedgerSnapshot)) {
        let mut ledger = self.ledger.get().unwrap_or_default();
        change(&mut ledger);
        self.ledger.set(ledger);
    }

    fn next_record_id(&self) -> RecordId {
        let ledger = self.ledger.get().unwrap_or_default();
        let taken = ledger.meal_entries.len()
            + ledger.shopping_items.len()
            + ledger.rent_costs.len()
            + ledger.rent_payments.len();
        RecordId::new((taken + 1).to_string()).expect("record id")
    }

    fn costs(&self) -> MonthlyCosts {
        self.costs.get().expect("costs should be allocated")
    }

    fn member_cost(&self, name: &str) -> MemberCost {
        self.costs()
            .member_costs
            .into_iter()
            .find(|cost| cost.name.as_ref() == name)
            .unwrap_or_else(|| panic!("no cost line for {name}"))
    }
}

fn member_id(name: &str) -> MemberId {
    MemberId::new(name.to_lowercase()).expect("member id")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[fixture]
fn world() -> LedgerWorld {
    LedgerWorld::default()
}

#[given("a household with members {first} and {second}")]
fn a_household_with_members(world: &LedgerWorld, first: String, second: String) {
    world.edit(|ledger| {
        for name in [first, second] {
            ledger.members.push(Member {
                id: member_id(&name),
                name: MemberName::new(&name).expect("member name"),
                role: MemberRole::Member,
                created_by: AUTHOR.to_owned(),
            });
        }
    });
}

#[given("{name} ate {count:f64} meals on {date}")]
fn member_ate_meals(world: &LedgerWorld, name: String, count: f64, date: String) {
    let id = world.next_record_id();
    world.edit(|ledger| {
        ledger.meal_entries.push(MealEntry {
            id,
            member_id: member_id(&name),
            date: LedgerDate::parse(date).expect("date"),
            count: MealCount::new(count).expect("meal count"),
            created_by: AUTHOR.to_owned(),
            updated_by: AUTHOR.to_owned(),
        });
    });
}

#[given("groceries costing {cost:f64} were bought on {date}")]
fn groceries_were_bought(world: &LedgerWorld, cost: f64, date: String) {
    let id = world.next_record_id();
    world.edit(|ledger| {
        ledger.shopping_items.push(ShoppingItem {
            id,
            name: ItemName::new("Groceries").expect("item name"),
            cost: Amount::new(cost).expect("cost"),
            date: LedgerDate::parse(date).expect("date"),
            created_by: AUTHOR.to_owned(),
            updated_by: AUTHOR.to_owned(),
        });
    });
}

#[given("the rent for {month} is {amount:f64}")]
fn the_rent_is(world: &LedgerWorld, month: String, amount: f64) {
    let id = world.next_record_id();
    world.edit(|ledger| {
        ledger.rent_costs.push(RentCost {
            id,
            month,
            amount: Amount::new(amount).expect("rent"),
            created_by: AUTHOR.to_owned(),
        });
    });
}

#[given("{name} has paid rent for {month}")]
fn member_has_paid_rent(world: &LedgerWorld, name: String, month: String) {
    let id = world.next_record_id();
    let month = BillingMonth::parse(month).expect("month");
    world.edit(|ledger| {
        ledger.rent_payments.push(RentPayment {
            id,
            member_id: member_id(&name),
            month: month.first_day_key(),
            paid: true,
            created_by: AUTHOR.to_owned(),
        });
    });
}

#[when("the costs for {month} are allocated")]
fn the_costs_are_allocated(world: &LedgerWorld, month: String) {
    let month = BillingMonth::parse(month).expect("month");
    let ledger = world.ledger.get().unwrap_or_default();
    world.costs.set(allocate_monthly_costs(&ledger, &month));
    world.orphans.set(find_orphaned_records(&ledger, &month));
}

#[then("the cost per meal is {expected:f64}")]
fn the_cost_per_meal_is(world: &LedgerWorld, expected: f64) {
    assert_close(world.costs().per_meal_cost, expected);
}

#[then("the total shopping spend is {expected:f64}")]
fn the_total_shopping_spend_is(world: &LedgerWorld, expected: f64) {
    assert_close(world.costs().total_cost, expected);
}

#[then("{name} owes {expected:f64} for meals")]
fn member_owes_for_meals(world: &LedgerWorld, name: String, expected: f64) {
    assert_close(world.member_cost(&name).meal_cost, expected);
}

#[then("{name} owes {expected:f64} in total")]
fn member_owes_in_total(world: &LedgerWorld, name: String, expected: f64) {
    assert_close(world.member_cost(&name).total_cost, expected);
}

#[then("each member's rent share is {expected:f64}")]
fn each_members_rent_share_is(world: &LedgerWorld, expected: f64) {
    let costs = world.costs();
    assert_close(costs.per_person_rent, expected);
    for cost in &costs.member_costs {
        assert_close(cost.rent_share, expected);
    }
}

#[then("{count:usize} orphaned meal entry is reported")]
fn orphaned_meal_entries_are_reported(world: &LedgerWorld, count: usize) {
    let orphans = world.orphans.get().expect("orphans should be computed");
    assert_eq!(orphans.meal_entry_ids.len(), count);
    assert!(orphans.rent_payment_ids.is_empty());
}

#[scenario(path = "tests/features/monthly_costs.feature")]
fn monthly_costs_scenarios(world: LedgerWorld) {
    drop(world);
}
