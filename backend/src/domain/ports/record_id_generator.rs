//! Port for minting identifiers of new ledger records.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh record identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait RecordIdGenerator: Send + Sync {
    /// Return an identifier not used before.
    fn next_id(&self) -> Uuid;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidRecordIdGenerator;

impl RecordIdGenerator for UuidRecordIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic identifiers counting up from one.
///
/// # Examples
/// ```
/// use messbook::domain::ports::{RecordIdGenerator, SequentialRecordIdGenerator};
///
/// let ids = SequentialRecordIdGenerator::default();
/// assert_eq!(ids.next_id().to_string(), "00000000-0000-0000-0000-000000000001");
/// assert_eq!(ids.next_id().to_string(), "00000000-0000-0000-0000-000000000002");
/// ```
#[derive(Debug, Default)]
pub struct SequentialRecordIdGenerator {
    last: AtomicU64,
}

impl RecordIdGenerator for SequentialRecordIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.last.fetch_add(1, Ordering::Relaxed)) + 1)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn uuid_generator_never_repeats() {
        let ids = UuidRecordIdGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[rstest]
    fn sequential_generator_counts_up() {
        let ids = SequentialRecordIdGenerator::default();
        assert_eq!(ids.next_id(), Uuid::from_u128(1));
        assert_eq!(ids.next_id(), Uuid::from_u128(2));
    }
}
