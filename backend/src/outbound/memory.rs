//! Process-local adapters for development and tests.
//!
//! State lives behind a `tokio` `RwLock`; concurrent writers resolve as last
//! writer wins. Nothing survives a restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    HouseholdRepository, HouseholdRepositoryError, UserAccount, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    BillingMonth, LedgerDate, LedgerSnapshot, MealEntry, Member, MemberId, RecordId, RentCost,
    RentPayment, ShoppingItem, UserId, Username,
};

use super::ledger_document::LedgerDocument;

/// In-memory store implementing both the household and user repositories.
///
/// Clones share the same state.
///
/// # Examples
/// ```
/// use messbook::domain::LedgerSnapshot;
/// use messbook::domain::ports::HouseholdRepository;
/// use messbook::outbound::memory::InMemoryLedgerStore;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let store = InMemoryLedgerStore::default();
/// assert_eq!(store.load_ledger().await.expect("load"), LedgerSnapshot::default());
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    state: Arc<RwLock<LedgerDocument>>,
}

impl InMemoryLedgerStore {
    /// Create a store pre-populated with `ledger`.
    pub fn with_ledger(ledger: LedgerSnapshot) -> Self {
        let document = LedgerDocument {
            members: ledger.members,
            meal_entries: ledger.meal_entries,
            shopping_items: ledger.shopping_items,
            rent_costs: ledger.rent_costs,
            rent_payments: ledger.rent_payments,
            users: Vec::new(),
        };
        Self {
            state: Arc::new(RwLock::new(document)),
        }
    }
}

#[async_trait]
impl HouseholdRepository for InMemoryLedgerStore {
    async fn load_ledger(&self) -> Result<LedgerSnapshot, HouseholdRepositoryError> {
        Ok(self.state.read().await.snapshot())
    }

    async fn find_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<Member>, HouseholdRepositoryError> {
        Ok(self.state.read().await.find_member(member_id))
    }

    async fn save_member(&self, member: &Member) -> Result<(), HouseholdRepositoryError> {
        self.state.write().await.save_member(member);
        Ok(())
    }

    async fn find_meal_entry(
        &self,
        entry_id: &RecordId,
    ) -> Result<Option<MealEntry>, HouseholdRepositoryError> {
        Ok(self.state.read().await.find_meal_entry(entry_id))
    }

    async fn find_meal_entry_for_day(
        &self,
        member_id: &MemberId,
        date: &LedgerDate,
    ) -> Result<Option<MealEntry>, HouseholdRepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .find_meal_entry_for_day(member_id, date))
    }

    async fn save_meal_entry(&self, entry: &MealEntry) -> Result<(), HouseholdRepositoryError> {
        self.state.write().await.save_meal_entry(entry);
        Ok(())
    }

    async fn delete_meal_entry(
        &self,
        entry_id: &RecordId,
    ) -> Result<bool, HouseholdRepositoryError> {
        Ok(self.state.write().await.delete_meal_entry(entry_id))
    }

    async fn find_shopping_item(
        &self,
        item_id: &RecordId,
    ) -> Result<Option<ShoppingItem>, HouseholdRepositoryError> {
        Ok(self.state.read().await.find_shopping_item(item_id))
    }

    async fn save_shopping_item(
        &self,
        item: &ShoppingItem,
    ) -> Result<(), HouseholdRepositoryError> {
        self.state.write().await.save_shopping_item(item);
        Ok(())
    }

    async fn delete_shopping_item(
        &self,
        item_id: &RecordId,
    ) -> Result<bool, HouseholdRepositoryError> {
        Ok(self.state.write().await.delete_shopping_item(item_id))
    }

    async fn find_rent_cost(
        &self,
        month: &BillingMonth,
    ) -> Result<Option<RentCost>, HouseholdRepositoryError> {
        Ok(self.state.read().await.find_rent_cost(month))
    }

    async fn save_rent_cost(&self, rent: &RentCost) -> Result<(), HouseholdRepositoryError> {
        self.state.write().await.save_rent_cost(rent);
        Ok(())
    }

    async fn find_rent_payment(
        &self,
        member_id: &MemberId,
        month_key: &str,
    ) -> Result<Option<RentPayment>, HouseholdRepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .find_rent_payment(member_id, month_key))
    }

    async fn save_rent_payment(
        &self,
        payment: &RentPayment,
    ) -> Result<(), HouseholdRepositoryError> {
        self.state.write().await.save_rent_payment(payment);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryLedgerStore {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        if self.state.write().await.insert_user(account) {
            Ok(())
        } else {
            Err(UserPersistenceError::duplicate_username(
                account.user.username().as_ref(),
            ))
        }
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.state.read().await.find_user_by_username(username))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.state.read().await.find_user_by_id(id))
    }
}
