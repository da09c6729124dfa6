//! Tests for the household service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockHouseholdRepository, SequentialRecordIdGenerator};
use crate::domain::{ErrorCode, ItemName, LedgerDate, UserId, UserRole, Username};

fn user(role: UserRole) -> User {
    User::new(
        UserId::random(),
        Username::new(format!("{role}-user")).expect("valid username"),
        role,
    )
}

#[fixture]
fn admin() -> User {
    user(UserRole::Admin)
}

#[fixture]
fn manager() -> User {
    user(UserRole::Manager)
}

#[fixture]
fn member_user() -> User {
    user(UserRole::Member)
}

fn alice() -> Member {
    Member {
        id: MemberId::new("1").expect("member id"),
        name: MemberName::new("Alice").expect("member name"),
        role: MemberRole::Member,
        created_by: "admin".to_owned(),
    }
}

fn date(raw: &str) -> LedgerDate {
    LedgerDate::parse(raw).expect("valid date")
}

fn month(raw: &str) -> BillingMonth {
    BillingMonth::parse(raw).expect("valid month")
}

fn meal(id: &str, raw_date: &str, count: f64) -> MealEntry {
    MealEntry {
        id: RecordId::new(id).expect("record id"),
        member_id: alice().id,
        date: date(raw_date),
        count: MealCount::new(count).expect("count"),
        created_by: "admin".to_owned(),
        updated_by: "admin".to_owned(),
    }
}

fn service(repo: MockHouseholdRepository) -> HouseholdService<MockHouseholdRepository> {
    HouseholdService::new(
        Arc::new(repo),
        Arc::new(SequentialRecordIdGenerator::default()),
    )
}

#[rstest]
#[tokio::test]
async fn add_member_stamps_actor_and_default_role(admin: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_save_member()
        .withf(|member| member.name.as_ref() == "Carol" && member.created_by == "admin-user")
        .times(1)
        .return_once(|_| Ok(()));

    let member = service(repo)
        .add_member(&admin, MemberName::new("Carol").expect("name"))
        .await
        .expect("admin may add members");

    assert_eq!(member.role, MemberRole::Member);
    assert_eq!(member.id.as_str(), "00000000-0000-0000-0000-000000000001");
}

#[rstest]
#[tokio::test]
async fn managers_may_not_add_members(manager: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_save_member().times(0);

    let error = service(repo)
        .add_member(&manager, MemberName::new("Carol").expect("name"))
        .await
        .expect_err("managers cannot add members");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn update_member_role_saves_new_role(admin: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_member()
        .times(1)
        .return_once(|_| Ok(Some(alice())));
    repo.expect_save_member()
        .withf(|member| member.role == MemberRole::Manager)
        .times(1)
        .return_once(|_| Ok(()));

    let member = service(repo)
        .update_member_role(&admin, &alice().id, MemberRole::Manager)
        .await
        .expect("role updated");
    assert_eq!(member.role, MemberRole::Manager);
}

#[rstest]
#[tokio::test]
async fn update_member_role_reports_missing_member(admin: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_member().times(1).return_once(|_| Ok(None));
    repo.expect_save_member().times(0);

    let error = service(repo)
        .update_member_role(&admin, &alice().id, MemberRole::Manager)
        .await
        .expect_err("missing member");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn record_meals_updates_existing_entry_for_the_day(manager: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_member()
        .times(1)
        .return_once(|_| Ok(Some(alice())));
    repo.expect_find_meal_entry_for_day()
        .times(1)
        .return_once(|_, _| Ok(Some(meal("m1", "2024-05-01", 1.0))));
    repo.expect_save_meal_entry()
        .withf(|entry| {
            entry.id.as_str() == "m1"
                && entry.count.value() == 3.0
                && entry.created_by == "admin"
                && entry.updated_by == "manager-user"
        })
        .times(1)
        .return_once(|_| Ok(()));

    let entry = service(repo)
        .record_meals(
            &manager,
            RecordMealsRequest {
                member_id: alice().id,
                date: date("2024-05-01"),
                count: MealCount::new(3.0).expect("count"),
            },
        )
        .await
        .expect("meals recorded");
    assert_eq!(entry.count.value(), 3.0);
}

#[rstest]
#[tokio::test]
async fn record_meals_inserts_when_no_entry_exists(manager: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_member()
        .times(1)
        .return_once(|_| Ok(Some(alice())));
    repo.expect_find_meal_entry_for_day()
        .times(1)
        .return_once(|_, _| Ok(None));
    repo.expect_save_meal_entry()
        .withf(|entry| entry.created_by == "manager-user" && entry.date.as_str() == "2024-05-02")
        .times(1)
        .return_once(|_| Ok(()));

    service(repo)
        .record_meals(
            &manager,
            RecordMealsRequest {
                member_id: alice().id,
                date: date("2024-05-02"),
                count: MealCount::new(2.0).expect("count"),
            },
        )
        .await
        .expect("meals recorded");
}

#[rstest]
#[tokio::test]
async fn record_meals_requires_known_member(manager: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_member().times(1).return_once(|_| Ok(None));
    repo.expect_save_meal_entry().times(0);

    let error = service(repo)
        .record_meals(
            &manager,
            RecordMealsRequest {
                member_id: MemberId::new("404").expect("id"),
                date: date("2024-05-02"),
                count: MealCount::new(1.0).expect("count"),
            },
        )
        .await
        .expect_err("unknown member");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn members_are_read_only(member_user: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_member().times(0);
    repo.expect_delete_meal_entry().times(0);
    repo.expect_find_rent_cost().times(0);
    let service = service(repo);

    let record_id = RecordId::new("m1").expect("id");
    let denied = [
        service
            .delete_meal_entry(&member_user, &record_id)
            .await
            .expect_err("denied"),
        service
            .set_rent(&member_user, &month("2024-05"), Amount::ZERO)
            .await
            .expect_err("denied"),
        service
            .toggle_rent_payment(&member_user, &alice().id, &month("2024-05"))
            .await
            .expect_err("denied"),
    ];
    for error in denied {
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }
}

#[rstest]
#[tokio::test]
async fn delete_meal_entry_reports_missing_rows(manager: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_delete_meal_entry()
        .times(1)
        .return_once(|_| Ok(false));

    let error = service(repo)
        .delete_meal_entry(&manager, &RecordId::new("gone").expect("id"))
        .await
        .expect_err("missing entry");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_shopping_item_replaces_fields(manager: User) {
    let original = ShoppingItem {
        id: RecordId::new("s1").expect("id"),
        name: ItemName::new("Rice").expect("name"),
        cost: Amount::new(10.0).expect("cost"),
        date: date("2024-05-01"),
        created_by: "admin".to_owned(),
        updated_by: "admin".to_owned(),
    };
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_shopping_item()
        .times(1)
        .return_once(move |_| Ok(Some(original)));
    repo.expect_save_shopping_item()
        .withf(|item| {
            item.name.as_ref() == "Lentils"
                && item.cost.value() == 4.5
                && item.created_by == "admin"
                && item.updated_by == "manager-user"
        })
        .times(1)
        .return_once(|_| Ok(()));

    service(repo)
        .update_shopping_item(
            &manager,
            &RecordId::new("s1").expect("id"),
            ShoppingItemDraft {
                name: ItemName::new("Lentils").expect("name"),
                cost: Amount::new(4.5).expect("cost"),
                date: date("2024-05-03"),
            },
        )
        .await
        .expect("item updated");
}

#[rstest]
#[tokio::test]
async fn set_rent_updates_first_matching_row(manager: User) {
    let existing = RentCost {
        id: RecordId::new("r1").expect("id"),
        month: "2024-05-01".to_owned(),
        amount: Amount::new(900.0).expect("amount"),
        created_by: "admin".to_owned(),
    };
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_rent_cost()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_save_rent_cost()
        .withf(|rent| {
            rent.id.as_str() == "r1" && rent.month == "2024-05-01" && rent.amount.value() == 950.0
        })
        .times(1)
        .return_once(|_| Ok(()));

    service(repo)
        .set_rent(
            &manager,
            &month("2024-05"),
            Amount::new(950.0).expect("amount"),
        )
        .await
        .expect("rent set");
}

#[rstest]
#[tokio::test]
async fn set_rent_inserts_month_label(manager: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_rent_cost().times(1).return_once(|_| Ok(None));
    repo.expect_save_rent_cost()
        .withf(|rent| rent.month == "2024-05" && rent.created_by == "manager-user")
        .times(1)
        .return_once(|_| Ok(()));

    service(repo)
        .set_rent(
            &manager,
            &month("2024-05"),
            Amount::new(900.0).expect("amount"),
        )
        .await
        .expect("rent set");
}

#[rstest]
#[case(None, true)]
#[case(Some(true), false)]
#[case(Some(false), true)]
#[tokio::test]
async fn toggle_rent_payment_flips_state(
    manager: User,
    #[case] stored: Option<bool>,
    #[case] expected: bool,
) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_member()
        .times(1)
        .return_once(|_| Ok(Some(alice())));
    repo.expect_find_rent_payment()
        .withf(|_, key| key == "2024-05-01")
        .times(1)
        .return_once(move |_, _| {
            Ok(stored.map(|paid| RentPayment {
                id: RecordId::new("p1").expect("id"),
                member_id: alice().id,
                month: "2024-05-01".to_owned(),
                paid,
                created_by: "admin".to_owned(),
            }))
        });
    repo.expect_save_rent_payment()
        .withf(move |payment| payment.paid == expected && payment.month == "2024-05-01")
        .times(1)
        .return_once(|_| Ok(()));

    let payment = service(repo)
        .toggle_rent_payment(&manager, &alice().id, &month("2024-05"))
        .await
        .expect("payment toggled");
    assert_eq!(payment.paid, expected);
}

#[rstest]
#[tokio::test]
async fn connection_errors_map_to_service_unavailable(manager: User) {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_find_rent_cost()
        .times(1)
        .return_once(|_| Err(HouseholdRepositoryError::connection("pool exhausted")));

    let error = service(repo)
        .set_rent(&manager, &month("2024-05"), Amount::ZERO)
        .await
        .expect_err("repository down");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn serialization_errors_map_to_internal() {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_load_ledger()
        .times(1)
        .return_once(|| Err(HouseholdRepositoryError::serialization("bad json")));

    let error = service(repo).ledger().await.expect_err("corrupt store");
    assert_eq!(error.code(), ErrorCode::InternalError);
}

fn ledger_with_meals() -> LedgerSnapshot {
    LedgerSnapshot {
        members: vec![alice()],
        meal_entries: vec![
            meal("m2", "2024-05-09", 1.0),
            meal("m1", "2024-05-01", 2.0),
            meal("m0", "2024-04-30", 5.0),
        ],
        rent_payments: vec![RentPayment {
            id: RecordId::new("p1").expect("id"),
            member_id: alice().id,
            month: "2024-05-01".to_owned(),
            paid: true,
            created_by: "admin".to_owned(),
        }],
        ..LedgerSnapshot::default()
    }
}

#[rstest]
#[tokio::test]
async fn member_meals_filters_and_sorts_by_date() {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_load_ledger()
        .times(1)
        .return_once(|| Ok(ledger_with_meals()));

    let entries = service(repo)
        .member_meals(&alice().id, &month("2024-05"))
        .await
        .expect("meals listed");
    let ids: Vec<_> = entries.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, ["m1", "m2"]);
}

#[rstest]
#[tokio::test]
async fn rent_status_lists_every_member() {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_load_ledger()
        .times(2)
        .returning(|| Ok(ledger_with_meals()));
    let service = service(repo);

    let may = service
        .rent_status(&month("2024-05"))
        .await
        .expect("status listed");
    assert_eq!(may.len(), 1);
    assert!(may[0].paid);

    let june = service
        .rent_status(&month("2024-06"))
        .await
        .expect("status listed");
    assert!(!june[0].paid);
}

#[rstest]
#[tokio::test]
async fn monthly_costs_allocates_from_a_fresh_snapshot() {
    let mut repo = MockHouseholdRepository::new();
    repo.expect_load_ledger()
        .times(1)
        .return_once(|| Ok(ledger_with_meals()));

    let costs = service(repo)
        .monthly_costs(&month("2024-05"))
        .await
        .expect("costs computed");
    assert_eq!(costs.member_costs.len(), 1);
    assert_eq!(costs.member_costs[0].meal_count, 3.0);
    assert!(costs.member_costs[0].rent_paid);
}
