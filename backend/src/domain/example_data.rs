//! Example data seeding orchestration.
//!
//! Converts a generated example household into ledger records for one
//! billing month and saves them through the household repository. Seeding
//! only touches an empty ledger.

use std::sync::Arc;

use example_data::{
    ExampleHouseholdSeed, GenerationError, MemberRoleSeed, RegistryError, SeedDefinition,
    SeedRegistry, generate_example_household,
};
use thiserror::Error;

use crate::domain::ports::{HouseholdRepository, HouseholdRepositoryError};
use crate::domain::{
    Amount, BillingMonth, ItemName, LedgerDate, MealCount, MealEntry, Member, MemberId,
    MemberName, MemberRole, RecordId, RentCost, RentPayment, ShoppingItem,
};

/// Username recorded as the author of seeded rows.
pub const SEED_AUTHOR: &str = "example-data";

/// Whether the seed was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// Records were saved.
    Applied,
    /// The ledger already had members; nothing was written.
    AlreadySeeded,
}

/// Result of attempting to apply example data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDataSeedOutcome {
    /// Seed name from the registry.
    pub seed_key: String,
    /// Number of members generated.
    pub member_count: usize,
    /// Month the records were dated in.
    pub month: BillingMonth,
    /// Persistence outcome.
    pub result: SeedingResult,
}

/// Errors raised while preparing or applying example data.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    /// Seed registry lookups failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Household generation failed.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A generated value failed ledger validation.
    #[error("generated record failed validation: {message}")]
    InvalidRecord { message: String },
    /// Persistence adapter failed while seeding.
    #[error("example data persistence error: {0}")]
    Persistence(#[from] HouseholdRepositoryError),
}

impl ExampleDataSeedingError {
    fn invalid(err: impl std::fmt::Display) -> Self {
        Self::InvalidRecord {
            message: err.to_string(),
        }
    }
}

/// Ledger rows built from one generated household.
struct SeedRecords {
    members: Vec<Member>,
    meals: Vec<MealEntry>,
    items: Vec<ShoppingItem>,
    rent: RentCost,
    payment: Option<RentPayment>,
}

/// Service that writes a generated household into the ledger.
#[derive(Clone)]
pub struct HouseholdSeeder<R> {
    repository: Arc<R>,
}

impl<R> HouseholdSeeder<R> {
    /// Create a seeder writing through `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> HouseholdSeeder<R>
where
    R: HouseholdRepository + ?Sized,
{
    /// Generate the named seed and save it dated within `month`.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataSeedingError`] if registry lookup, generation,
    /// validation, or persistence fails.
    pub async fn seed_from_registry(
        &self,
        registry: &SeedRegistry,
        seed_name: &str,
        member_count_override: Option<usize>,
        month: &BillingMonth,
    ) -> Result<ExampleDataSeedOutcome, ExampleDataSeedingError> {
        let seed_def = registry.find_seed(seed_name)?;
        let member_count = member_count_override.unwrap_or(seed_def.member_count());
        let seed_def = SeedDefinition::new(seed_def.name(), seed_def.seed(), member_count);
        let mut outcome = ExampleDataSeedOutcome {
            seed_key: seed_def.name().to_owned(),
            member_count,
            month: month.clone(),
            result: SeedingResult::AlreadySeeded,
        };

        let existing = self.repository.load_ledger().await?;
        if !existing.members.is_empty() {
            return Ok(outcome);
        }

        let household = generate_example_household(registry, &seed_def)?;
        let records = convert_household(household, month)?;
        for member in &records.members {
            self.repository.save_member(member).await?;
        }
        for entry in &records.meals {
            self.repository.save_meal_entry(entry).await?;
        }
        for item in &records.items {
            self.repository.save_shopping_item(item).await?;
        }
        self.repository.save_rent_cost(&records.rent).await?;
        if let Some(payment) = &records.payment {
            self.repository.save_rent_payment(payment).await?;
        }

        outcome.result = SeedingResult::Applied;
        Ok(outcome)
    }
}

fn day_in(month: &BillingMonth, day: u8) -> Result<LedgerDate, ExampleDataSeedingError> {
    LedgerDate::parse(format!("{month}-{day:02}")).map_err(ExampleDataSeedingError::invalid)
}

fn convert_household(
    household: ExampleHouseholdSeed,
    month: &BillingMonth,
) -> Result<SeedRecords, ExampleDataSeedingError> {
    let members = household
        .members
        .into_iter()
        .map(|seed| {
            Ok(Member {
                id: MemberId::from(seed.id),
                name: MemberName::new(seed.name).map_err(ExampleDataSeedingError::invalid)?,
                role: match seed.role {
                    MemberRoleSeed::Manager => MemberRole::Manager,
                    MemberRoleSeed::Member => MemberRole::Member,
                },
                created_by: SEED_AUTHOR.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, ExampleDataSeedingError>>()?;

    let meals = household
        .meals
        .into_iter()
        .map(|seed| {
            Ok(MealEntry {
                id: RecordId::from(seed.id),
                member_id: MemberId::from(seed.member_id),
                date: day_in(month, seed.day)?,
                count: MealCount::new(f64::from(seed.count))
                    .map_err(ExampleDataSeedingError::invalid)?,
                created_by: SEED_AUTHOR.to_owned(),
                updated_by: SEED_AUTHOR.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, ExampleDataSeedingError>>()?;

    let items = household
        .purchases
        .into_iter()
        .map(|seed| {
            Ok(ShoppingItem {
                id: RecordId::from(seed.id),
                name: ItemName::new(seed.name).map_err(ExampleDataSeedingError::invalid)?,
                cost: Amount::from_cents(seed.cost_cents),
                date: day_in(month, seed.day)?,
                created_by: SEED_AUTHOR.to_owned(),
                updated_by: SEED_AUTHOR.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, ExampleDataSeedingError>>()?;

    let rent = RentCost {
        id: RecordId::from(uuid::Uuid::new_v4()),
        month: month.as_str().to_owned(),
        amount: Amount::from_cents(household.rent_cents),
        created_by: SEED_AUTHOR.to_owned(),
    };
    let payment = members.iter().find(|m| m.role == MemberRole::Manager).map(|manager| RentPayment {
        id: RecordId::from(uuid::Uuid::new_v4()),
        member_id: manager.id.clone(),
        month: month.first_day_key(),
        paid: true,
        created_by: SEED_AUTHOR.to_owned(),
    });

    Ok(SeedRecords {
        members,
        meals,
        items,
        rent,
        payment,
    })
}
