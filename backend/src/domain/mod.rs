//! Domain primitives, the cost allocator, and the services behind the ports.
//!
//! Purpose: define strongly typed ledger entities used by the API and the
//! storage adapters. Keep types immutable once validated and document
//! serialisation contracts (serde) on each type.
//!
//! Public surface:
//! - Ledger records (`Member`, `MealEntry`, `ShoppingItem`, `RentCost`,
//!   `RentPayment`) and the `LedgerSnapshot` bundling them.
//! - `allocate_monthly_costs`, the pure monthly split.
//! - `authorize`, the single role policy for edits.
//! - `HouseholdService` and `AccountService`, implementing the driving
//!   ports in [`ports`].
//! - `Error`/`ErrorCode`, the transport-agnostic error payload.

pub mod account_service;
pub mod allocation;
pub mod amount;
pub mod auth;
pub mod authorization;
pub mod calendar;
pub mod error;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod household_service;
pub mod identifiers;
pub mod ledger;
pub mod member;
pub mod ports;
pub mod report;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::allocation::{
    MemberCost, MonthlyCosts, OrphanedRecords, allocate_monthly_costs, find_orphaned_records,
};
pub use self::amount::{Amount, MealCount, QuantityError};
pub use self::auth::{CredentialsValidationError, LoginCredentials, PASSWORD_MIN, Registration};
pub use self::authorization::{
    Permission, authorize, can_change_member_roles, can_create_members, can_edit,
};
pub use self::calendar::{BillingMonth, CalendarError, LedgerDate};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
#[cfg(feature = "example-data")]
pub use self::example_data::{
    ExampleDataSeedOutcome, ExampleDataSeedingError, HouseholdSeeder, SeedingResult,
};
pub use self::household_service::HouseholdService;
pub use self::identifiers::{IdentifierError, MemberId, RecordId};
pub use self::ledger::{ItemName, LedgerSnapshot, MealEntry, RentCost, RentPayment, ShoppingItem};
pub use self::member::{Member, MemberName, MemberRole, NameError, UnknownRoleError};
pub use self::report::{MonthlyReport, format_amount};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserRole, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use messbook::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
