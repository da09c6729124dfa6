//! Generated household seed types.
//!
//! These types are independent of backend domain types to avoid circular
//! dependencies. Money is held in whole cents and days as day-of-month so the
//! backend decides which month the household lands in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a generated member.
///
/// Mirrors the backend's `MemberRole` enum without creating a dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRoleSeed {
    /// Helps run the household books.
    Manager,
    /// Regular member.
    #[default]
    Member,
}

/// A generated household member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleMemberSeed {
    /// Unique identifier for the member.
    pub id: Uuid,
    /// Display name, distinct within the household.
    pub name: String,
    /// Member role.
    pub role: MemberRoleSeed,
}

/// Meals one member ate on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleMealSeed {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// Member who ate.
    pub member_id: Uuid,
    /// Day of month, `1..=28`.
    pub day: u8,
    /// Meals eaten.
    pub count: u32,
}

/// A shared grocery purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePurchaseSeed {
    /// Unique identifier for the purchase.
    pub id: Uuid,
    /// Grocery name taken from the registry.
    pub name: String,
    /// Price in whole cents.
    pub cost_cents: u32,
    /// Day of month, `1..=28`.
    pub day: u8,
}

/// One month of a generated household.
///
/// # Example
///
/// ```
/// use example_data::{ExampleHouseholdSeed, ExampleMemberSeed, MemberRoleSeed};
/// use uuid::Uuid;
///
/// let household = ExampleHouseholdSeed {
///     members: vec![ExampleMemberSeed {
///         id: Uuid::nil(),
///         name: "Ada".to_owned(),
///         role: MemberRoleSeed::Manager,
///     }],
///     meals: vec![],
///     purchases: vec![],
///     rent_cents: 90_000,
/// };
///
/// assert_eq!(household.members.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleHouseholdSeed {
    /// Members in creation order; the first is a manager.
    pub members: Vec<ExampleMemberSeed>,
    /// Daily meal counts.
    pub meals: Vec<ExampleMealSeed>,
    /// Grocery purchases.
    pub purchases: Vec<ExamplePurchaseSeed>,
    /// Rent for the month in whole cents.
    pub rent_cents: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_role_seed_defaults_to_member() {
        assert_eq!(MemberRoleSeed::default(), MemberRoleSeed::Member);
    }

    #[test]
    fn member_role_seed_serializes_lowercase() {
        let manager = serde_json::to_string(&MemberRoleSeed::Manager).expect("serialize");
        assert_eq!(manager, "\"manager\"");
    }

    #[test]
    fn household_seed_serializes_to_camel_case() {
        let household = ExampleHouseholdSeed {
            members: vec![],
            meals: vec![ExampleMealSeed {
                id: Uuid::nil(),
                member_id: Uuid::nil(),
                day: 1,
                count: 2,
            }],
            purchases: vec![ExamplePurchaseSeed {
                id: Uuid::nil(),
                name: "Rice".to_owned(),
                cost_cents: 450,
                day: 3,
            }],
            rent_cents: 90_000,
        };
        let json = serde_json::to_string(&household).expect("serialize");
        assert!(json.contains("rentCents"));
        assert!(json.contains("memberId"));
        assert!(json.contains("costCents"));
    }
}
