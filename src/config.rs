// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use dotenvy::dotenv;
use thiserror::Error;

/// Upper bound for `num_questions` in a test configuration.
pub const MAX_QUESTIONS: u32 = 100;

/// Topic accuracy (percent) at or above which a topic counts as strong.
pub const STRONG_TOPIC_THRESHOLD: f64 = 70.0;

/// Topic accuracy (percent) below which a topic counts as weak.
/// Topics in between are left unclassified.
pub const WEAK_TOPIC_THRESHOLD: f64 = 50.0;

/// Long-answer keywords must be longer than this many characters.
pub const KEYWORD_MIN_LEN: usize = 3;

const DEFAULT_TEST_CACHE_CAPACITY: usize = 1000;
const DEFAULT_TEST_TTL_SECS: u64 = 6 * 60 * 60;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub rust_log: String,
    /// Maximum number of generated tests kept for evaluation.
    pub test_cache_capacity: usize,
    /// Seconds a generated test stays evaluable.
    pub test_ttl_secs: u64,
    /// Fixed seed for question shuffling; OS entropy when unset.
    pub shuffle_seed: Option<u64>,
    /// Text generation endpoint used for study report messages.
    pub coach_url: Option<String>,
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            data_dir: PathBuf::from("data"),
            static_dir: None,
            log_dir: PathBuf::from("logs"),
            rust_log: "info".to_string(),
            test_cache_capacity: DEFAULT_TEST_CACHE_CAPACITY,
            test_ttl_secs: DEFAULT_TEST_TTL_SECS,
            shuffle_seed: None,
            coach_url: None,
            allowed_origins: split_list(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let bind_addr =
            parse_var("BIND_ADDR")?.unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let static_dir = env::var("STATIC_DIR").ok().map(PathBuf::from);

        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let test_cache_capacity =
            parse_var("TEST_CACHE_CAPACITY")?.unwrap_or(DEFAULT_TEST_CACHE_CAPACITY);
        if test_cache_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "TEST_CACHE_CAPACITY",
                value: "0".to_string(),
            });
        }

        let test_ttl_secs = parse_var("TEST_TTL_SECS")?.unwrap_or(DEFAULT_TEST_TTL_SECS);
        let shuffle_seed = parse_var("SHUFFLE_SEED")?;

        let coach_url = env::var("COACH_URL").ok().filter(|url| !url.trim().is_empty());

        let allowed_origins = split_list(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );

        Ok(Self {
            bind_addr,
            data_dir,
            static_dir,
            log_dir,
            rust_log,
            test_cache_capacity,
            test_ttl_secs,
            shuffle_seed,
            coach_url,
            allowed_origins,
        })
    }
}

/// Reads and parses an optional environment variable.
fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(None),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
