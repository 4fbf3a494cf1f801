// src/state.rs

use std::{sync::Arc, time::Duration};

use axum::extract::FromRef;
use parking_lot::Mutex;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::Config,
    services::{
        catalog::Catalog,
        coach::{self, TextGenerator},
        test_store::TestStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub tests: Arc<TestStore>,
    /// Source of randomness for question shuffling.
    pub rng: Arc<Mutex<StdRng>>,
    pub coach: Arc<dyn TextGenerator>,
    pub config: Config,
}

impl AppState {
    pub fn new(catalog: Catalog, config: Config) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            catalog: Arc::new(catalog),
            tests: Arc::new(TestStore::new(
                config.test_cache_capacity,
                Duration::from_secs(config.test_ttl_secs),
            )),
            rng: Arc::new(Mutex::new(rng)),
            coach: coach::from_config(&config),
            config,
        }
    }

    /// Replaces the text generator, e.g. with a canned one in tests.
    pub fn with_coach(mut self, coach: Arc<dyn TextGenerator>) -> Self {
        self.coach = coach;
        self
    }
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for Arc<TestStore> {
    fn from_ref(state: &AppState) -> Self {
        state.tests.clone()
    }
}
