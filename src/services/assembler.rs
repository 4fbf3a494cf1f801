// src/services/assembler.rs

use chrono::Utc;
use rand::{Rng, seq::SliceRandom};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::test::{Test, TestConfig},
    services::{
        catalog::{Catalog, QuestionFilter},
        test_store::TestStore,
    },
};

/// Samples practice tests out of the catalog and registers them for evaluation.
pub struct TestAssembler<'a> {
    catalog: &'a Catalog,
    store: &'a TestStore,
}

impl<'a> TestAssembler<'a> {
    pub fn new(catalog: &'a Catalog, store: &'a TestStore) -> Self {
        Self { catalog, store }
    }

    /// Builds a test for `config`.
    ///
    /// * Filters the catalog by subjects, topics, difficulty and question types.
    /// * Shuffles the pool uniformly (Fisher-Yates) with `rng`.
    /// * Keeps the first `min(num_questions, pool size)` questions.
    /// * Stores the test under a fresh UUID.
    ///
    /// Fails with [`AppError::NoMatch`] when the pool is empty.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        config: TestConfig,
        rng: &mut R,
    ) -> Result<Test, AppError> {
        config.validate()?;

        let mut pool = self.catalog.filter(&QuestionFilter::from(&config));
        if pool.is_empty() {
            tracing::info!(subjects = ?config.subjects, "no questions match test config");
            return Err(AppError::NoMatch);
        }

        let pool_size = pool.len();
        pool.shuffle(rng);
        pool.truncate(config.num_questions as usize);

        let test = Test {
            test_id: Uuid::new_v4().to_string(),
            config,
            questions: pool,
            created_at: Utc::now(),
        };

        tracing::info!(
            test_id = %test.test_id,
            pool = pool_size,
            picked = test.questions.len(),
            "Test generated"
        );

        self.store.insert(test.clone());
        Ok(test)
    }
}
