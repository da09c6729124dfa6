//! Port for ledger persistence.
//!
//! Adapters keep every collection in storage order: members in the order
//! they were added, rent rows in the order they were recorded. Saves are
//! upserts keyed by record id.

use async_trait::async_trait;

use crate::domain::{
    BillingMonth, LedgerDate, LedgerSnapshot, MealEntry, Member, MemberId, RecordId, RentCost,
    RentPayment, ShoppingItem,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by household repository adapters.
    pub enum HouseholdRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "household repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "household repository query failed: {message}",
        /// Stored data could not be encoded or decoded.
        Serialization { message: String } =>
            "household repository serialization failed: {message}",
    }
}

/// Port for reading and writing ledger records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseholdRepository: Send + Sync {
    /// Load every collection at once.
    async fn load_ledger(&self) -> Result<LedgerSnapshot, HouseholdRepositoryError>;

    /// Find a member by id.
    async fn find_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<Member>, HouseholdRepositoryError>;

    /// Insert or replace a member.
    async fn save_member(&self, member: &Member) -> Result<(), HouseholdRepositoryError>;

    /// Find a meal entry by id.
    async fn find_meal_entry(
        &self,
        entry_id: &RecordId,
    ) -> Result<Option<MealEntry>, HouseholdRepositoryError>;

    /// Find the first meal entry for a member on a day.
    async fn find_meal_entry_for_day(
        &self,
        member_id: &MemberId,
        date: &LedgerDate,
    ) -> Result<Option<MealEntry>, HouseholdRepositoryError>;

    /// Insert or replace a meal entry.
    async fn save_meal_entry(&self, entry: &MealEntry) -> Result<(), HouseholdRepositoryError>;

    /// Delete a meal entry, returning whether it existed.
    async fn delete_meal_entry(&self, entry_id: &RecordId)
    -> Result<bool, HouseholdRepositoryError>;

    /// Find a shopping item by id.
    async fn find_shopping_item(
        &self,
        item_id: &RecordId,
    ) -> Result<Option<ShoppingItem>, HouseholdRepositoryError>;

    /// Insert or replace a shopping item.
    async fn save_shopping_item(&self, item: &ShoppingItem)
    -> Result<(), HouseholdRepositoryError>;

    /// Delete a shopping item, returning whether it existed.
    async fn delete_shopping_item(
        &self,
        item_id: &RecordId,
    ) -> Result<bool, HouseholdRepositoryError>;

    /// Find the first rent row whose label names `month`.
    async fn find_rent_cost(
        &self,
        month: &BillingMonth,
    ) -> Result<Option<RentCost>, HouseholdRepositoryError>;

    /// Insert or replace a rent row.
    async fn save_rent_cost(&self, rent: &RentCost) -> Result<(), HouseholdRepositoryError>;

    /// Find the payment record for a member and first-day month key.
    async fn find_rent_payment(
        &self,
        member_id: &MemberId,
        month_key: &str,
    ) -> Result<Option<RentPayment>, HouseholdRepositoryError>;

    /// Insert or replace a payment record.
    async fn save_rent_payment(
        &self,
        payment: &RentPayment,
    ) -> Result<(), HouseholdRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(HouseholdRepositoryError::connection("refused"), "household repository connection failed: refused")]
    #[case(HouseholdRepositoryError::query("syntax"), "household repository query failed: syntax")]
    #[case(HouseholdRepositoryError::serialization("eof"), "household repository serialization failed: eof")]
    fn errors_render_context(#[case] error: HouseholdRepositoryError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
