//! Deterministic household generation from seed definitions.
//!
//! The same seed definition always produces an identical household.

use fake::Fake;
use fake::faker::name::raw::FirstName;
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::{
    ExampleHouseholdSeed, ExampleMealSeed, ExampleMemberSeed, ExamplePurchaseSeed, MemberRoleSeed,
};
use crate::validation::is_valid_name;

/// Maximum number of attempts to find a distinct member name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Last day used for generated records, valid in every month.
const LAST_DAY: u8 = 28;

/// Chance a member eats on a given day (4 in 5).
const EATS_NUMERATOR: u32 = 4;
const EATS_DENOMINATOR: u32 = 5;

const MAX_MEALS_PER_DAY: u32 = 3;
const PURCHASES_MIN: usize = 6;
const PURCHASES_MAX: usize = 12;
const PURCHASE_CENTS_MIN: u32 = 150;
const PURCHASE_CENTS_MAX: u32 = 4_500;

/// Rent is a whole multiple of this many cents.
const RENT_STEP_CENTS: u32 = 500;
const RENT_STEPS_MIN: u32 = 120;
const RENT_STEPS_MAX: u32 = 360;

/// Generates one month of a household from a seed definition.
///
/// The household has:
///
/// - `member_count` members with distinct first names, the first a manager
/// - meal entries for most member-days in days `1..=28`
/// - a handful of purchases drawn from the registry's groceries
/// - a rent total in whole multiples of five currency units
///
/// # Errors
///
/// Returns [`GenerationError`] if the registry has no groceries or distinct
/// member names run out.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_household};
///
/// let json = r#"{
///     "version": 1,
///     "groceries": ["Rice"],
///     "seeds": [{"name": "test", "seed": 42, "memberCount": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let household = generate_example_household(&registry, seed_def).expect("generated");
///
/// assert_eq!(household.members.len(), 3);
/// let again = generate_example_household(&registry, seed_def).expect("generated");
/// assert_eq!(household, again);
/// ```
pub fn generate_example_household(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<ExampleHouseholdSeed, GenerationError> {
    if registry.groceries().is_empty() {
        return Err(GenerationError::NoGroceries);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let members = generate_members(&mut rng, seed_def.member_count())?;
    let meals = generate_meals(&mut rng, &members);
    let purchases = generate_purchases(&mut rng, registry.groceries());
    let rent_cents = rng.random_range(RENT_STEPS_MIN..=RENT_STEPS_MAX) * RENT_STEP_CENTS;

    Ok(ExampleHouseholdSeed {
        members,
        meals,
        purchases,
        rent_cents,
    })
}

fn generate_members(
    rng: &mut ChaCha8Rng,
    count: usize,
) -> Result<Vec<ExampleMemberSeed>, GenerationError> {
    let mut members: Vec<ExampleMemberSeed> = Vec::with_capacity(count);
    for index in 0..count {
        let name = distinct_name(rng, &members)?;
        let role = if index == 0 {
            MemberRoleSeed::Manager
        } else {
            MemberRoleSeed::Member
        };
        members.push(ExampleMemberSeed {
            id: Uuid::from_u128(rng.random()),
            name,
            role,
        });
    }
    Ok(members)
}

fn distinct_name(
    rng: &mut ChaCha8Rng,
    taken: &[ExampleMemberSeed],
) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let candidate: String = FirstName(EN).fake_with_rng(rng);
        if is_valid_name(&candidate) && taken.iter().all(|m| m.name != candidate) {
            return Ok(candidate);
        }
    }
    Err(GenerationError::MemberNameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn generate_meals(rng: &mut ChaCha8Rng, members: &[ExampleMemberSeed]) -> Vec<ExampleMealSeed> {
    let mut meals = Vec::new();
    for day in 1..=LAST_DAY {
        for member in members {
            if !rng.random_ratio(EATS_NUMERATOR, EATS_DENOMINATOR) {
                continue;
            }
            meals.push(ExampleMealSeed {
                id: Uuid::from_u128(rng.random()),
                member_id: member.id,
                day,
                count: rng.random_range(1..=MAX_MEALS_PER_DAY),
            });
        }
    }
    meals
}

fn generate_purchases(rng: &mut ChaCha8Rng, groceries: &[String]) -> Vec<ExamplePurchaseSeed> {
    let count = rng.random_range(PURCHASES_MIN..=PURCHASES_MAX);
    let mut purchases: Vec<ExamplePurchaseSeed> = (0..count)
        .filter_map(|_| {
            let name = groceries.choose(rng)?.clone();
            Some(ExamplePurchaseSeed {
                id: Uuid::from_u128(rng.random()),
                name,
                cost_cents: rng.random_range(PURCHASE_CENTS_MIN..=PURCHASE_CENTS_MAX),
                day: rng.random_range(1..=LAST_DAY),
            })
        })
        .collect();
    purchases.sort_by_key(|purchase| purchase.day);
    purchases
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::*;

    const TEST_REGISTRY_JSON: &str = r#"{
        "version": 1,
        "groceries": ["Rice", "Lentils", "Onions", "Cooking oil"],
        "seeds": [
            {"name": "test-seed", "seed": 42, "memberCount": 5},
            {"name": "small-seed", "seed": 123, "memberCount": 2},
            {"name": "empty-seed", "seed": 7, "memberCount": 0}
        ]
    }"#;

    #[fixture]
    fn test_registry() -> SeedRegistry {
        SeedRegistry::from_json(TEST_REGISTRY_JSON).expect("valid test registry")
    }

    fn household(registry: &SeedRegistry, name: &str) -> ExampleHouseholdSeed {
        let seed_def = registry.find_seed(name).expect("seed found");
        generate_example_household(registry, seed_def).expect("generated")
    }

    #[rstest]
    fn generates_requested_member_count(test_registry: SeedRegistry) {
        assert_eq!(household(&test_registry, "test-seed").members.len(), 5);
        assert_eq!(household(&test_registry, "small-seed").members.len(), 2);
    }

    #[rstest]
    fn generation_is_deterministic(test_registry: SeedRegistry) {
        assert_eq!(
            household(&test_registry, "test-seed"),
            household(&test_registry, "test-seed")
        );
    }

    #[rstest]
    fn different_seeds_produce_different_households(test_registry: SeedRegistry) {
        let first = household(&test_registry, "test-seed");
        let second = household(&test_registry, "small-seed");
        assert_ne!(
            first.members.first().map(|m| m.id),
            second.members.first().map(|m| m.id)
        );
    }

    #[rstest]
    fn member_names_are_valid_and_distinct(test_registry: SeedRegistry) {
        let members = household(&test_registry, "test-seed").members;
        let names: HashSet<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names.len(), members.len());
        assert!(members.iter().all(|m| is_valid_name(&m.name)));
    }

    #[rstest]
    fn only_the_first_member_manages(test_registry: SeedRegistry) {
        let roles: Vec<_> = household(&test_registry, "test-seed")
            .members
            .iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(roles.first(), Some(&MemberRoleSeed::Manager));
        assert!(roles.iter().skip(1).all(|r| *r == MemberRoleSeed::Member));
    }

    #[rstest]
    fn meals_reference_members_and_valid_days(test_registry: SeedRegistry) {
        let generated = household(&test_registry, "test-seed");
        let ids: HashSet<_> = generated.members.iter().map(|m| m.id).collect();
        assert!(!generated.meals.is_empty());
        for meal in &generated.meals {
            assert!(ids.contains(&meal.member_id));
            assert!((1..=LAST_DAY).contains(&meal.day));
            assert!((1..=MAX_MEALS_PER_DAY).contains(&meal.count));
        }
    }

    #[rstest]
    fn purchases_use_registry_groceries(test_registry: SeedRegistry) {
        let generated = household(&test_registry, "test-seed");
        assert!((PURCHASES_MIN..=PURCHASES_MAX).contains(&generated.purchases.len()));
        for purchase in &generated.purchases {
            assert!(test_registry.groceries().contains(&purchase.name));
            assert!((PURCHASE_CENTS_MIN..=PURCHASE_CENTS_MAX).contains(&purchase.cost_cents));
        }
    }

    #[rstest]
    fn rent_is_a_whole_step(test_registry: SeedRegistry) {
        let rent = household(&test_registry, "test-seed").rent_cents;
        assert_eq!(rent % RENT_STEP_CENTS, 0);
        assert!(rent >= RENT_STEPS_MIN * RENT_STEP_CENTS);
    }

    #[rstest]
    fn empty_household_has_no_meals(test_registry: SeedRegistry) {
        let generated = household(&test_registry, "empty-seed");
        assert!(generated.members.is_empty());
        assert!(generated.meals.is_empty());
    }
}
