//! Whole-ledger document shared by the in-memory and JSON file adapters.
//!
//! Field names follow the browser local-storage keys of earlier household
//! books (`mealEntries`, `shoppingList`, ...), so a saved document can be
//! imported as-is. Missing keys load as empty collections.

use serde::{Deserialize, Serialize};

use crate::domain::ports::UserAccount;
use crate::domain::{
    BillingMonth, LedgerDate, LedgerSnapshot, MealEntry, Member, MemberId, RecordId, RentCost,
    RentPayment, ShoppingItem, User, UserId, UserRole, Username,
};

/// Account row as stored in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoredUser {
    pub id: UserId,
    pub username: Username,
    pub role: UserRole,
    pub password_hash: String,
}

impl From<&UserAccount> for StoredUser {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.user.id().clone(),
            username: account.user.username().clone(),
            role: account.user.role(),
            password_hash: account.password_hash.clone(),
        }
    }
}

impl From<StoredUser> for UserAccount {
    fn from(row: StoredUser) -> Self {
        Self {
            user: User::new(row.id, row.username, row.role),
            password_hash: row.password_hash,
        }
    }
}

/// Every collection of a household, in storage order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct LedgerDocument {
    pub members: Vec<Member>,
    pub meal_entries: Vec<MealEntry>,
    #[serde(rename = "shoppingList")]
    pub shopping_items: Vec<ShoppingItem>,
    pub rent_costs: Vec<RentCost>,
    pub rent_payments: Vec<RentPayment>,
    pub users: Vec<StoredUser>,
}

/// Replace the row with the same id, or append it.
fn upsert<T: Clone>(rows: &mut Vec<T>, row: &T, same: impl Fn(&T) -> bool) {
    match rows.iter_mut().find(|existing| same(existing)) {
        Some(existing) => *existing = row.clone(),
        None => rows.push(row.clone()),
    }
}

fn remove<T>(rows: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|row| !matches(row));
    rows.len() != before
}

impl LedgerDocument {
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            members: self.members.clone(),
            meal_entries: self.meal_entries.clone(),
            shopping_items: self.shopping_items.clone(),
            rent_costs: self.rent_costs.clone(),
            rent_payments: self.rent_payments.clone(),
        }
    }

    pub fn find_member(&self, member_id: &MemberId) -> Option<Member> {
        self.members.iter().find(|m| &m.id == member_id).cloned()
    }

    pub fn save_member(&mut self, member: &Member) {
        upsert(&mut self.members, member, |m| m.id == member.id);
    }

    pub fn find_meal_entry(&self, entry_id: &RecordId) -> Option<MealEntry> {
        self.meal_entries.iter().find(|e| &e.id == entry_id).cloned()
    }

    pub fn find_meal_entry_for_day(
        &self,
        member_id: &MemberId,
        date: &LedgerDate,
    ) -> Option<MealEntry> {
        self.meal_entries
            .iter()
            .find(|e| &e.member_id == member_id && &e.date == date)
            .cloned()
    }

    pub fn save_meal_entry(&mut self, entry: &MealEntry) {
        upsert(&mut self.meal_entries, entry, |e| e.id == entry.id);
    }

    pub fn delete_meal_entry(&mut self, entry_id: &RecordId) -> bool {
        remove(&mut self.meal_entries, |e| &e.id == entry_id)
    }

    pub fn find_shopping_item(&self, item_id: &RecordId) -> Option<ShoppingItem> {
        self.shopping_items
            .iter()
            .find(|i| &i.id == item_id)
            .cloned()
    }

    pub fn save_shopping_item(&mut self, item: &ShoppingItem) {
        upsert(&mut self.shopping_items, item, |i| i.id == item.id);
    }

    pub fn delete_shopping_item(&mut self, item_id: &RecordId) -> bool {
        remove(&mut self.shopping_items, |i| &i.id == item_id)
    }

    pub fn find_rent_cost(&self, month: &BillingMonth) -> Option<RentCost> {
        self.rent_costs
            .iter()
            .find(|r| month.labels(&r.month))
            .cloned()
    }

    pub fn save_rent_cost(&mut self, rent: &RentCost) {
        upsert(&mut self.rent_costs, rent, |r| r.id == rent.id);
    }

    pub fn find_rent_payment(&self, member_id: &MemberId, month_key: &str) -> Option<RentPayment> {
        self.rent_payments
            .iter()
            .find(|p| &p.member_id == member_id && p.month == month_key)
            .cloned()
    }

    pub fn save_rent_payment(&mut self, payment: &RentPayment) {
        upsert(&mut self.rent_payments, payment, |p| p.id == payment.id);
    }

    /// Append an account; `false` when the username is taken.
    pub fn insert_user(&mut self, account: &UserAccount) -> bool {
        if self.find_user_by_username(account.user.username()).is_some() {
            return false;
        }
        self.users.push(StoredUser::from(account));
        true
    }

    pub fn find_user_by_username(&self, username: &Username) -> Option<UserAccount> {
        self.users
            .iter()
            .find(|u| &u.username == username)
            .cloned()
            .map(UserAccount::from)
    }

    pub fn find_user_by_id(&self, id: &UserId) -> Option<UserAccount> {
        self.users
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .map(UserAccount::from)
    }
}
