//! Skip policy for suites that depend on the embedded PostgreSQL cluster.
//!
//! A cluster that cannot start fails the suite unless `SKIP_TEST_CLUSTER` is
//! truthy, in which case the test prints a `SKIP-TEST-CLUSTER` marker and
//! returns early.

/// Whether `SKIP_TEST_CLUSTER` is "1", "true" or "yes" (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a cluster setup failure.
///
/// Returns `None` after printing the skip marker when skipping is allowed and
/// panics otherwise so CI breakage stays visible.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("1"), true)]
    #[case(Some("YES"), true)]
    #[case(Some("0"), false)]
    #[case(None, false)]
    fn skip_flag_accepts_truthy_values(#[case] value: Option<&str>, #[case] expected: bool) {
        let _guard = env_lock::lock_env([("SKIP_TEST_CLUSTER", value)]);
        assert_eq!(should_skip_test_cluster(), expected);
    }

    #[rstest]
    fn skipping_yields_no_context() {
        let _guard = env_lock::lock_env([("SKIP_TEST_CLUSTER", Some("true"))]);
        assert!(handle_cluster_setup_failure::<()>("no postgres binaries").is_none());
    }
}
