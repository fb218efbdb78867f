//! Seeding the process-wide flags from the environment.
//!
//! Kept in its own test binary: the registry is seeded on first use, so the
//! variable must be set before anything touches it.

use controlmonkey::featureflag::{self, ENV_VAR, MERGE_CREDENTIALS_CHAIN};

#[test]
fn test_registry_seeded_from_env() {
    // SAFETY: the only test in this binary; no other thread reads the environment.
    unsafe { std::env::set_var(ENV_VAR, "MergeCredentialsChain=true") };

    assert!(MERGE_CREDENTIALS_CHAIN.enabled());
    assert_eq!(featureflag::all().to_string(), "MergeCredentialsChain=true");

    // Later changes to the variable are not picked up.
    unsafe { std::env::set_var(ENV_VAR, "MergeCredentialsChain=false") };
    assert!(MERGE_CREDENTIALS_CHAIN.enabled());
}
