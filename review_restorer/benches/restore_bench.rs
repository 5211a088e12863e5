use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use review_restorer::mapping::{TrainingPair, WordMapping};
use review_restorer::restorer::restore_text;

fn training_pairs(count: usize) -> Vec<TrainingPair> {
    (0..count)
        .map(|i| {
            TrainingPair::new(
                format!("숙쏘{i} 깨끗햇어요 졍말 추쳔{i}"),
                format!("숙소{i} 깨끗했어요 정말 추천{i}"),
            )
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let pairs = training_pairs(10_000);
    c.bench_function("build_mapping_10k_pairs", |b| {
        b.iter(|| WordMapping::build(black_box(&pairs)))
    });
}

fn bench_restore(c: &mut Criterion) {
    let mapping = WordMapping::build(&training_pairs(10_000));
    let text = (0..200)
        .map(|i| format!("숙쏘{i} 깨끗햇어요 모르는말 추쳔{i}"))
        .collect::<Vec<_>>()
        .join(" ");
    c.bench_function("restore_800_tokens", |b| {
        b.iter(|| restore_text(black_box(&text), black_box(&mapping)))
    });
}

criterion_group!(benches, bench_build, bench_restore);
criterion_main!(benches);
