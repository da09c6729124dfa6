//! Ledger records: meals, shopping purchases, rent and rent payments.
//!
//! Records serialise with their stored field names (`member_id`,
//! `created_by`, ...) so JSON documents written by earlier versions of the
//! household book load unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::member::{NameError, normalise_name};
use super::{Amount, LedgerDate, MealCount, Member, MemberId, RecordId};

/// Meals a member ate on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    /// Unique identifier.
    pub id: RecordId,
    /// Member who ate the meals. May reference a member that no longer exists.
    pub member_id: MemberId,
    /// Day of the meals.
    pub date: LedgerDate,
    /// Number of meals.
    pub count: MealCount,
    /// Username that created the entry.
    #[serde(default)]
    pub created_by: String,
    /// Username that last changed the entry.
    #[serde(default)]
    pub updated_by: String,
}

/// Name of a purchased item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Trim and validate an item name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, NameError> {
        normalise_name(raw.as_ref()).map(Self)
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

/// A shared grocery purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Unique identifier.
    pub id: RecordId,
    /// What was bought.
    pub name: ItemName,
    /// Price paid.
    pub cost: Amount,
    /// Day of purchase.
    pub date: LedgerDate,
    /// Username that created the item.
    #[serde(default)]
    pub created_by: String,
    /// Username that last changed the item.
    #[serde(default)]
    pub updated_by: String,
}

/// Total rent for a month.
///
/// `month` is kept as stored: `YYYY-MM` for rows entered through the
/// household book, `YYYY-MM-01` for some imported rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentCost {
    /// Unique identifier.
    pub id: RecordId,
    /// Month label.
    pub month: String,
    /// Rent owed by the whole household.
    pub amount: Amount,
    /// Username that created the row.
    #[serde(default)]
    pub created_by: String,
}

/// Whether a member has settled their rent share for a month.
///
/// `month` is the first-day key `YYYY-MM-01`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentPayment {
    /// Unique identifier.
    pub id: RecordId,
    /// Paying member.
    pub member_id: MemberId,
    /// First-day key of the month.
    pub month: String,
    /// Whether the share has been paid.
    pub paid: bool,
    /// Username that created the row.
    #[serde(default)]
    pub created_by: String,
}

/// Every ledger collection, each in storage order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Household members.
    pub members: Vec<Member>,
    /// Daily meal counts.
    pub meal_entries: Vec<MealEntry>,
    /// Grocery purchases.
    pub shopping_items: Vec<ShoppingItem>,
    /// Monthly rent totals.
    pub rent_costs: Vec<RentCost>,
    /// Per-member rent payment flags.
    pub rent_payments: Vec<RentPayment>,
}
