use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lamina::testing::MemStore;
use lamina::{DataType, DiskLayer, Layer, Selection};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Matrix with roughly 10% positive entries, the rest zero
fn sparse_matrix(rows: usize, cols: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    Array2::from_shape_fn((rows, cols), |_| {
        if rng.gen_bool(0.1) {
            rng.gen_range(1.0..100.0)
        } else {
            0.0
        }
    })
}

fn bench_materialize(c: &mut Criterion) {
    let (rows, cols) = (256, 1024);
    let matrix = sparse_matrix(rows, cols);

    let mut group = c.benchmark_group("materialize");
    for width in [16, 64, 256] {
        let store = MemStore::new(matrix.clone(), (rows, cols))
            .expect("store")
            .with_batch_width(width)
            .into_handle();
        let layer = DiskLayer::open(store, "", DataType::F64).expect("layer");

        group.bench_with_input(BenchmarkId::new("batch_width", width), &width, |b, _| {
            b.iter(|| {
                layer
                    .to_sparse(&Selection::All, &Selection::All)
                    .expect("scan")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_materialize);
criterion_main!(benches);
