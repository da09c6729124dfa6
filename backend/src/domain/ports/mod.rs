//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod household_command;
mod household_query;
mod household_repository;
mod login_service;
mod record_id_generator;
mod user_repository;

#[cfg(test)]
pub use household_command::MockHouseholdCommand;
pub use household_command::{HouseholdCommand, RecordMealsRequest, ShoppingItemDraft};
#[cfg(test)]
pub use household_query::MockHouseholdQuery;
pub use household_query::{HouseholdQuery, RentStatus};
#[cfg(test)]
pub use household_repository::MockHouseholdRepository;
pub use household_repository::{HouseholdRepository, HouseholdRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use record_id_generator::MockRecordIdGenerator;
pub use record_id_generator::{
    RecordIdGenerator, SequentialRecordIdGenerator, UuidRecordIdGenerator,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserAccount, UserPersistenceError, UserRepository};
