//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let title = builder.title("main");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data derived from a seed
///
/// The same seed always produces the same values, so failures are reproducible.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_task");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A task title unique to this builder, always within 3..=100 characters
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let title = TestDataBuilder::new(7).title("main");
    /// assert_eq!(title, "test-task-7-main");
    /// ```
    pub fn title(&self, suffix: &str) -> String {
        let mut title = format!("test-task-{}-{}", self.seed, suffix);
        title.truncate(100);
        title
    }

    /// A description unique to this builder
    pub fn description(&self, suffix: &str) -> String {
        format!("Generated for seed {} ({})", self.seed, suffix)
    }
}
