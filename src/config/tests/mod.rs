//! Configuration loading tests.

use crate::config::{AppConfig, ConfigError, StorageBackend};
use rstest::rstest;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[rstest]
fn defaults_apply_when_nothing_is_set() {
    let config = AppConfig::from_lookup(lookup_from(&[])).expect("defaults should load");
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.bind_address(), "0.0.0.0:8080");
}

#[rstest]
fn postgres_backend_reads_url_and_pool_size() {
    let config = AppConfig::from_lookup(lookup_from(&[
        ("STORAGE_BACKEND", "postgres"),
        ("DATABASE_URL", "postgres://localhost/tasks"),
        ("DB_POOL_SIZE", "4"),
        ("SEED_SAMPLE_TASKS", "true"),
    ]))
    .expect("postgres config should load");

    assert_eq!(
        config.storage,
        StorageBackend::Postgres {
            database_url: "postgres://localhost/tasks".to_owned(),
            pool_size: 4,
        }
    );
    assert!(config.seed_sample_tasks);
}

#[rstest]
fn postgres_backend_requires_database_url() {
    let result = AppConfig::from_lookup(lookup_from(&[("STORAGE_BACKEND", "postgres")]));
    assert_eq!(
        result,
        Err(ConfigError::MissingEnvVar("DATABASE_URL".to_owned()))
    );
}

#[rstest]
#[case("APP_PORT", "eighty")]
#[case("APP_PORT", "70000")]
#[case("STORAGE_BACKEND", "sqlite")]
#[case("SEED_SAMPLE_TASKS", "maybe")]
fn rejects_invalid_values(#[case] key: &str, #[case] value: &str) {
    let result = AppConfig::from_lookup(lookup_from(&[(key, value)]));
    assert!(
        matches!(result, Err(ConfigError::InvalidValue { key: ref found, .. }) if found == key),
        "expected InvalidValue for {key}, got {result:?}"
    );
}

#[rstest]
fn rejects_zero_pool_size() {
    let result = AppConfig::from_lookup(lookup_from(&[
        ("STORAGE_BACKEND", "postgres"),
        ("DATABASE_URL", "postgres://localhost/tasks"),
        ("DB_POOL_SIZE", "0"),
    ]));
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}
