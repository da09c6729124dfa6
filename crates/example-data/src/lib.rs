//! Deterministic example household data for demonstrations.
//!
//! This crate generates believable, reproducible households (members, daily
//! meal counts, grocery purchases and rent) from a JSON seed registry. It is
//! independent of backend domain types to avoid circular dependencies.
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_household};
//!
//! let json = r#"{
//!     "version": 1,
//!     "groceries": ["Rice", "Lentils"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "memberCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let household = generate_example_household(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(household.members.len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_household;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{
    ExampleHouseholdSeed, ExampleMealSeed, ExampleMemberSeed, ExamplePurchaseSeed, MemberRoleSeed,
};
pub use validation::{NAME_MAX, is_valid_name};
