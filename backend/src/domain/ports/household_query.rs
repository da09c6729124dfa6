//! Driving port for ledger reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    BillingMonth, Error, LedgerSnapshot, MealEntry, MemberId, MemberName, MonthlyCosts,
};

/// Whether one member has paid a month's rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentStatus {
    #[schema(value_type = String, example = "1")]
    pub member_id: MemberId,
    #[schema(value_type = String, example = "Alice")]
    pub name: MemberName,
    pub paid: bool,
}

/// Driving port for ledger read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseholdQuery: Send + Sync {
    /// Every collection, in storage order.
    async fn ledger(&self) -> Result<LedgerSnapshot, Error>;

    /// A member's meal entries within `month`, sorted by date.
    async fn member_meals(
        &self,
        member_id: &MemberId,
        month: &BillingMonth,
    ) -> Result<Vec<MealEntry>, Error>;

    /// Payment state for every member, in member order.
    async fn rent_status(&self, month: &BillingMonth) -> Result<Vec<RentStatus>, Error>;

    /// Cost allocation for `month`.
    async fn monthly_costs(&self, month: &BillingMonth) -> Result<MonthlyCosts, Error>;
}
