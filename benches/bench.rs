// Criterion benchmarks for Ember Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ember_match::core::{shuffle_page_with, CanonicalPair};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_canonical_pair(c: &mut Criterion) {
    let a = "0b9e6614-55b3-4e6a-9e62-0f0a51b34f10";
    let b = "f3b0c442-98fc-4e1f-9f5a-6c4b3a2e1d00";

    c.bench_function("canonical_pair", |bench| {
        bench.iter(|| CanonicalPair::new(black_box(a), black_box(b)));
    });
}

fn bench_page_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_shuffle");

    for page_size in [20, 50, 100].iter() {
        let page: Vec<String> = (0..*page_size)
            .map(|i| format!("candidate-{}", i))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("shuffle_page", page_size),
            page_size,
            |bench, _| {
                let mut rng = StdRng::seed_from_u64(42);
                bench.iter(|| {
                    let mut working = page.clone();
                    shuffle_page_with(black_box(&mut working), &mut rng);
                    working
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_canonical_pair, bench_page_shuffle);
criterion_main!(benches);
