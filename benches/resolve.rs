//! Benchmarks for source resolution and table storage loading.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::collections::HashMap;
use std::sync::Arc;
use tablestore_config::resolve::{ResolvedConfigurationSource, StorageOptions};
use tablestore_config::sources::{ConfigSource, InMemoryTableStore, TableStorageSource};

fn keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key_{i}")).collect()
}

/// Benchmark resolution through each precedence step
fn benchmark_resolve(c: &mut Criterion) {
    let mut env = HashMap::new();
    env.insert("APPSETTING_EnvironmentName".to_string(), "QA".to_string());
    env.insert(
        "APPSETTING_ConfigurationStorageConnectionString".to_string(),
        "AccountName=qa".to_string(),
    );
    let empty: HashMap<String, String> = HashMap::new();

    let defaults = StorageOptions::new().with_configuration_keys(keys(8));
    let pinned = defaults
        .clone()
        .with_environment_name("PROD")
        .with_storage_connection_string("AccountName=prod");

    let mut group = c.benchmark_group("resolve");
    group.bench_function("direct_values", |b| {
        b.iter(|| black_box(ResolvedConfigurationSource::resolve(&pinned, &env)))
    });
    group.bench_function("environment_variables", |b| {
        b.iter(|| black_box(ResolvedConfigurationSource::resolve(&defaults, &env)))
    });
    group.bench_function("local_fallback", |b| {
        b.iter(|| black_box(ResolvedConfigurationSource::resolve(&defaults, &empty)))
    });
    group.finish();
}

/// Benchmark loading whitelisted keys from an in-memory store
fn benchmark_load(c: &mut Criterion) {
    let store = InMemoryTableStore::new();
    for key in keys(64) {
        store.insert("UseDevelopmentStorage=true", format!("LOCAL:{key}"), "value");
    }
    let store = Arc::new(store);

    let mut group = c.benchmark_group("load");
    for count in [1, 16, 64] {
        let options = StorageOptions::new().with_configuration_keys(keys(count));
        let empty: HashMap<String, String> = HashMap::new();
        let resolved = ResolvedConfigurationSource::resolve(&options, &empty)
            .expect("local resolution never fails");
        let source = TableStorageSource::new(resolved, store.clone());

        group.bench_function(format!("{count}_keys"), |b| b.iter(|| black_box(source.load())));
    }
    group.finish();
}

criterion_group!(benches, benchmark_resolve, benchmark_load);
criterion_main!(benches);
