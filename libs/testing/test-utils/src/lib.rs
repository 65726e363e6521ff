//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: deterministic fixture values derived from a seed
//! - `assertions`: small assertion helpers
//!
//! Container-backed tests need Docker and are marked `#[ignore]`; run them
//! with `cargo test -- --ignored`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!
//!     let store = mongo.store();
//!     let email = builder.email("admin");
//! }
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Fixture values that stay stable across runs of the same test.
///
/// Values differ between seeds, so unique fields (slug, email, username)
/// never clash between tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_category");
    /// assert_eq!(builder, TestDataBuilder::from_test_name("test_create_category"));
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Deterministic record id
    pub fn id(&self) -> Uuid {
        Uuid::from_u64_pair(self.seed, self.seed.rotate_left(32))
    }

    /// `test-{kind}-{seed}-{suffix}`, e.g. `test-category-42-root`
    pub fn name(&self, kind: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", kind, self.seed, suffix)
    }

    /// Valid address under `example.com`
    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.com", local, self.seed)
    }

    pub fn username(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.seed)
    }
}

pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Unwrap `value`, failing with `context` when it is `None`.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_values() {
        let a = TestDataBuilder::new(42);
        let b = TestDataBuilder::new(42);

        assert_eq!(a.id(), b.id());
        assert_eq!(a.name("category", "root"), "test-category-42-root");
        assert_eq!(a.email("admin"), "admin.42@example.com");
        assert_eq!(a.username("admin"), "admin_42");
    }

    #[test]
    fn test_different_names_differ() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");

        assert_ne!(a.id(), b.id());
        assert_ne!(a.email("admin"), b.email("admin"));
    }
}
