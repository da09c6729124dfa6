//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! tests can swap every dependency for a double.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::BillingMonth;
use crate::domain::ports::{HouseholdCommand, HouseholdQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub household: Arc<dyn HouseholdCommand>,
    pub household_query: Arc<dyn HouseholdQuery>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Bundle the ports.
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use messbook::domain::ports::UuidRecordIdGenerator;
    /// use messbook::domain::{AccountService, HouseholdService};
    /// use messbook::inbound::http::state::HttpState;
    /// use messbook::outbound::memory::InMemoryLedgerStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryLedgerStore::default());
    /// let household = Arc::new(HouseholdService::new(
    ///     store.clone(),
    ///     Arc::new(UuidRecordIdGenerator),
    /// ));
    /// let state = HttpState::new(
    ///     Arc::new(AccountService::new(store, 4)),
    ///     household.clone(),
    ///     household,
    ///     Arc::new(DefaultClock),
    /// );
    /// let _month = state.current_month();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        household: Arc<dyn HouseholdCommand>,
        household_query: Arc<dyn HouseholdQuery>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            login,
            household,
            household_query,
            clock,
        }
    }

    /// The UTC month on the injected clock.
    pub fn current_month(&self) -> BillingMonth {
        BillingMonth::from_naive(self.clock.utc().date_naive())
    }
}
