//! Driving port for ledger edits.
//!
//! Every operation takes the acting [`User`]. Implementations check the
//! role policy before touching storage and stamp `created_by`/`updated_by`
//! with the actor's username.

use async_trait::async_trait;

use crate::domain::{
    Amount, BillingMonth, Error, ItemName, LedgerDate, MealCount, MealEntry, Member, MemberId,
    MemberName, MemberRole, RecordId, RentCost, RentPayment, ShoppingItem, User,
};

/// Meals eaten by a member on a day.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMealsRequest {
    pub member_id: MemberId,
    pub date: LedgerDate,
    pub count: MealCount,
}

/// Fields of a shopping purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingItemDraft {
    pub name: ItemName,
    pub cost: Amount,
    pub date: LedgerDate,
}

/// Driving port for ledger write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseholdCommand: Send + Sync {
    /// Add a member with the default role.
    async fn add_member(&self, actor: &User, name: MemberName) -> Result<Member, Error>;

    /// Change a member's household role.
    async fn update_member_role(
        &self,
        actor: &User,
        member_id: &MemberId,
        role: MemberRole,
    ) -> Result<Member, Error>;

    /// Set the meal count for a member and day, creating the entry if needed.
    async fn record_meals(
        &self,
        actor: &User,
        request: RecordMealsRequest,
    ) -> Result<MealEntry, Error>;

    /// Change the count on an existing meal entry.
    async fn update_meal_count(
        &self,
        actor: &User,
        entry_id: &RecordId,
        count: MealCount,
    ) -> Result<MealEntry, Error>;

    /// Remove a meal entry.
    async fn delete_meal_entry(&self, actor: &User, entry_id: &RecordId) -> Result<(), Error>;

    /// Record a purchase.
    async fn add_shopping_item(
        &self,
        actor: &User,
        draft: ShoppingItemDraft,
    ) -> Result<ShoppingItem, Error>;

    /// Replace the fields of a purchase.
    async fn update_shopping_item(
        &self,
        actor: &User,
        item_id: &RecordId,
        draft: ShoppingItemDraft,
    ) -> Result<ShoppingItem, Error>;

    /// Remove a purchase.
    async fn delete_shopping_item(&self, actor: &User, item_id: &RecordId) -> Result<(), Error>;

    /// Set the rent for a month.
    async fn set_rent(
        &self,
        actor: &User,
        month: &BillingMonth,
        amount: Amount,
    ) -> Result<RentCost, Error>;

    /// Flip whether a member has paid a month's rent.
    async fn toggle_rent_payment(
        &self,
        actor: &User,
        member_id: &MemberId,
        month: &BillingMonth,
    ) -> Result<RentPayment, Error>;
}
