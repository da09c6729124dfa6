//! PostgreSQL-backed `HouseholdRepository` using Diesel.
//!
//! Every collection is read in `created_at, id` order so members and rent
//! rows come back in the order they were recorded. Saves are upserts on the
//! text primary key.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HouseholdRepository, HouseholdRepositoryError};
use crate::domain::{
    BillingMonth, LedgerDate, LedgerSnapshot, MealEntry, Member, MemberId, RecordId, RentCost,
    RentPayment, ShoppingItem,
};

use super::diesel_error_mapping::{map_diesel_error, map_invalid_row, map_pool_error};
use super::models::{
    InvalidRow, MealEntryRow, MemberRow, NewMealEntryRow, NewMemberRow, NewRentCostRow,
    NewRentPaymentRow, NewShoppingItemRow, RentCostRow, RentPaymentRow, ShoppingItemRow,
};
use super::pool::DbPool;
use super::schema::{meal_entries, members, rent_costs, rent_payments, shopping_list};

type Result<T> = std::result::Result<T, HouseholdRepositoryError>;

/// Diesel implementation of the household ledger port.
#[derive(Clone)]
pub struct DieselHouseholdRepository {
    pool: DbPool,
}

impl DieselHouseholdRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_domain<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = InvalidRow>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(map_invalid_row)
}

fn first_into_domain<R, T>(row: Option<R>) -> Result<Option<T>>
where
    T: TryFrom<R, Error = InvalidRow>,
{
    row.map(T::try_from).transpose().map_err(map_invalid_row)
}

fn new_meal_entry_row(entry: &MealEntry) -> NewMealEntryRow<'_> {
    NewMealEntryRow {
        id: entry.id.as_str(),
        member_id: entry.member_id.as_str(),
        date: entry.date.to_naive(),
        count: entry.count.value(),
        created_by: &entry.created_by,
        updated_by: &entry.updated_by,
    }
}

fn new_shopping_item_row(item: &ShoppingItem) -> NewShoppingItemRow<'_> {
    NewShoppingItemRow {
        id: item.id.as_str(),
        name: item.name.as_ref(),
        cost: item.cost.value(),
        date: item.date.to_naive(),
        created_by: &item.created_by,
        updated_by: &item.updated_by,
    }
}

#[async_trait]
impl HouseholdRepository for DieselHouseholdRepository {
    async fn load_ledger(&self) -> Result<LedgerSnapshot> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let member_rows: Vec<MemberRow> = members::table
            .order((members::created_at.asc(), members::id.asc()))
            .select(MemberRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let meal_rows: Vec<MealEntryRow> = meal_entries::table
            .order((meal_entries::created_at.asc(), meal_entries::id.asc()))
            .select(MealEntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let shopping_rows: Vec<ShoppingItemRow> = shopping_list::table
            .order((shopping_list::created_at.asc(), shopping_list::id.asc()))
            .select(ShoppingItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rent_rows: Vec<RentCostRow> = rent_costs::table
            .order((rent_costs::created_at.asc(), rent_costs::id.asc()))
            .select(RentCostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let payment_rows: Vec<RentPaymentRow> = rent_payments::table
            .order((rent_payments::created_at.asc(), rent_payments::id.asc()))
            .select(RentPaymentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(LedgerSnapshot {
            members: into_domain(member_rows)?,
            meal_entries: into_domain(meal_rows)?,
            shopping_items: into_domain(shopping_rows)?,
            rent_costs: into_domain(rent_rows)?,
            rent_payments: into_domain(payment_rows)?,
        })
    }

    async fn find_member(&self, member_id: &MemberId) -> Result<Option<Member>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MemberRow> = members::table
            .filter(members::id.eq(member_id.as_str()))
            .select(MemberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        first_into_domain(row)
    }

    async fn save_member(&self, member: &Member) -> Result<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewMemberRow::from(member);
        diesel::insert_into(members::table)
            .values(&row)
            .on_conflict(members::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_meal_entry(&self, entry_id: &RecordId) -> Result<Option<MealEntry>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MealEntryRow> = meal_entries::table
            .filter(meal_entries::id.eq(entry_id.as_str()))
            .select(MealEntryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        first_into_domain(row)
    }

    async fn find_meal_entry_for_day(
        &self,
        member_id: &MemberId,
        date: &LedgerDate,
    ) -> Result<Option<MealEntry>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MealEntryRow> = meal_entries::table
            .filter(meal_entries::member_id.eq(member_id.as_str()))
            .filter(meal_entries::date.eq(date.to_naive()))
            .order((meal_entries::created_at.asc(), meal_entries::id.asc()))
            .select(MealEntryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        first_into_domain(row)
    }

    async fn save_meal_entry(&self, entry: &MealEntry) -> Result<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = new_meal_entry_row(entry);
        diesel::insert_into(meal_entries::table)
            .values(&row)
            .on_conflict(meal_entries::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_meal_entry(&self, entry_id: &RecordId) -> Result<bool> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted =
            diesel::delete(meal_entries::table.filter(meal_entries::id.eq(entry_id.as_str())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find_shopping_item(&self, item_id: &RecordId) -> Result<Option<ShoppingItem>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ShoppingItemRow> = shopping_list::table
            .filter(shopping_list::id.eq(item_id.as_str()))
            .select(ShoppingItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        first_into_domain(row)
    }

    async fn save_shopping_item(&self, item: &ShoppingItem) -> Result<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = new_shopping_item_row(item);
        diesel::insert_into(shopping_list::table)
            .values(&row)
            .on_conflict(shopping_list::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_shopping_item(&self, item_id: &RecordId) -> Result<bool> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted =
            diesel::delete(shopping_list::table.filter(shopping_list::id.eq(item_id.as_str())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find_rent_cost(&self, month: &BillingMonth) -> Result<Option<RentCost>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RentCostRow> = rent_costs::table
            .filter(rent_costs::month.like(format!("{}%", month.as_str())))
            .order((rent_costs::created_at.asc(), rent_costs::id.asc()))
            .select(RentCostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        first_into_domain(row)
    }

    async fn save_rent_cost(&self, rent: &RentCost) -> Result<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewRentCostRow::from(rent);
        diesel::insert_into(rent_costs::table)
            .values(&row)
            .on_conflict(rent_costs::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_rent_payment(
        &self,
        member_id: &MemberId,
        month_key: &str,
    ) -> Result<Option<RentPayment>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RentPaymentRow> = rent_payments::table
            .filter(rent_payments::member_id.eq(member_id.as_str()))
            .filter(rent_payments::month.eq(month_key))
            .order((rent_payments::created_at.asc(), rent_payments::id.asc()))
            .select(RentPaymentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        first_into_domain(row)
    }

    async fn save_rent_payment(&self, payment: &RentPayment) -> Result<()> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewRentPaymentRow::from(payment);
        diesel::insert_into(rent_payments::table)
            .values(&row)
            .on_conflict(rent_payments::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
