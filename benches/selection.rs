use criterion::{criterion_group, criterion_main, Criterion};
use sizes_css::errors::NullSink;
use sizes_css::media::Viewport;
use sizes_css::{select, tokenize};
use std::hint::black_box;

const FIXTURES: [&str; 6] = [
    "",
    "100vw",
    "(max-width: 600px) 480px, 800px",
    "(min-width: 1200px) calc(33vw - 2rem), (min-width: 768px) and (orientation: landscape) 50vw, 100vw",
    "/* hero */ (max-width: 40em) 100vw, /* wide */ (max-width: 80em) calc((100vw - 4em) / 2), 40em",
    "(min-width: 36em) 33.3vw, (min-width: 24em) 50vw, (min-width: 12em) 75vw, (min-width: 6em) 90vw, 100vw",
];

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sizes");
    group.significance_level(0.1).sample_size(500);

    group.bench_function("tokenize", |b| {
        b.iter(|| {
            for input in FIXTURES {
                black_box(tokenize(black_box(input)));
            }
        })
    });

    let viewport = Viewport::new(1024.0, 768.0);
    let groups = FIXTURES.iter().map(|input| tokenize(input)).collect::<Vec<_>>();

    group.bench_function("select", |b| {
        b.iter(|| {
            for candidates in &groups {
                black_box(select(black_box(candidates), &viewport, &NullSink));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
