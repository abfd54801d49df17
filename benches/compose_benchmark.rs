//! Benchmarks for arxiu composing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks compose synthetic markdown bodies of growing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a markdown body with the given number of sections.
fn create_test_body(sections: usize) -> String {
    let mut body = String::new();
    for i in 0..sections {
        body.push_str(&format!("## Section {}\n\n", i + 1));
        body.push_str(
            "Some **bold** words, some *italic* ones, and a plain tail long enough \
             to wrap across more than one line of the page.\n",
        );
        body.push_str("- first item\n- second item\n1. numbered\n\n---\n");
    }
    body
}

/// Benchmark markdown parsing.
fn bench_parsing(c: &mut Criterion) {
    let body = create_test_body(20);

    c.bench_function("parse_markdown", |b| {
        b.iter(|| arxiu::parse(black_box(&body)));
    });
}

/// Benchmark full composition at various sizes.
fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    for sections in [1, 10, 100].iter() {
        let body = create_test_body(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| arxiu::compose_pdf(black_box("Benchmark"), black_box(&body)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the compression cost.
fn bench_compressed(c: &mut Criterion) {
    let body = create_test_body(100);
    let options = arxiu::ComposeOptions::new().with_compression(true);

    c.bench_function("compose_compressed", |b| {
        b.iter(|| {
            arxiu::compose_pdf_with_options(black_box("Benchmark"), black_box(&body), &options)
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_parsing, bench_compose, bench_compressed);
criterion_main!(benches);
