use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lloydkmeans_rs::{kmeans_with_config, predict_labels, EngineKind, KMeansConfig, Parallel, Sequential};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use std::time::Duration;

const ENGINES: [EngineKind; 2] = [EngineKind::Sequential, EngineKind::Parallel];

fn bench_config(k: usize, engine: EngineKind) -> KMeansConfig {
    KMeansConfig::new(k)
        .with_max_iters(5)
        .with_tol(-1.0)
        .with_seed(42)
        .with_engine(engine)
}

fn benchmark_engines_varying_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_samples");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_features = 32;
    let k = 20;
    let sample_sizes = [1_000, 10_000, 50_000];

    for n_samples in sample_sizes.iter() {
        let data = Array2::random((*n_samples, n_features), Uniform::new(-1.0f32, 1.0));
        group.throughput(Throughput::Elements(*n_samples as u64));

        for engine in ENGINES {
            let config = bench_config(k, engine);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", engine), n_samples),
                n_samples,
                |b, _| b.iter(|| kmeans_with_config(black_box(&data.view()), &config).unwrap()),
            );
        }
    }
    group.finish();
}

fn benchmark_engines_varying_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_clusters");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_samples = 10_000;
    let n_features = 16;
    let cluster_counts = [3, 30, 100];
    let data = Array2::random((n_samples, n_features), Uniform::new(-1.0f32, 1.0));

    for k in cluster_counts.iter() {
        group.throughput(Throughput::Elements(*k as u64));

        for engine in ENGINES {
            let config = bench_config(*k, engine);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", engine), k),
                k,
                |b, _| b.iter(|| kmeans_with_config(black_box(&data.view()), &config).unwrap()),
            );
        }
    }
    group.finish();
}

fn benchmark_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_predict");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_features = 64;
    let k = 50;
    let n_predict = 20_000;

    let train_data = Array2::random((5_000, n_features), Uniform::new(-1.0f32, 1.0));
    let result = kmeans_with_config(&train_data.view(), &bench_config(k, EngineKind::Sequential)).unwrap();
    let test_data = Array2::random((n_predict, n_features), Uniform::new(-1.0f32, 1.0));
    let parallel = Parallel::default();

    group.throughput(Throughput::Elements(n_predict as u64));
    group.bench_function("sequential", |b| {
        b.iter(|| predict_labels(black_box(&test_data.view()), &result.centroids.view(), &Sequential).unwrap())
    });
    group.bench_function("parallel", |b| {
        b.iter(|| predict_labels(black_box(&test_data.view()), &result.centroids.view(), &parallel).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_engines_varying_samples,
    benchmark_engines_varying_clusters,
    benchmark_predict,
);

criterion_main!(benches);
