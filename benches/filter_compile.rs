//! Benchmarks for the request-to-query pipeline: validation, predicate
//! compilation and SQL rendering, and pagination envelopes.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use marquee::prelude::*;

fn character_query() -> Value {
    serde_json::json!({
        "name": ["mulan"],
        "age": { "gte": "10", "lt": "40" },
        "weight": "250",
        "movies": ["1", "2", "3"],
        "page": "2",
        "limit": "25",
    })
    .into()
}

fn bench_validate(c: &mut Criterion) {
    let raw = character_query();

    c.bench_function("validate_character_query", |b| {
        b.iter(|| CharacterFilter::from_query(black_box(&raw)).unwrap())
    });

    let body: Value = serde_json::json!({
        "email": "First.Last+tag@GMail.com",
        "password": "abcDEF123!",
        "passwordConfirmation": "abcDEF123!",
    })
    .into();
    c.bench_function("validate_register_body", |b| {
        b.iter(|| Register::from_body(black_box(&body)).unwrap())
    });
}

fn bench_compile(c: &mut Criterion) {
    let filter = CharacterFilter::from_query(&character_query()).unwrap();

    c.bench_function("compile_character_filter", |b| {
        b.iter(|| black_box(&filter).compile())
    });

    let predicates = filter.compile();
    c.bench_function("render_character_sql", |b| {
        b.iter(|| Predicate::and_sql(black_box(&predicates), 0))
    });
}

fn bench_paginate(c: &mut Criterion) {
    let filter = CharacterFilter::from_query(&character_query()).unwrap();
    let rows: Vec<u64> = (0..25).collect();

    c.bench_function("paginate_envelope", |b| {
        b.iter(|| filter.paginator().paginate(black_box(rows.clone()), 1000))
    });
}

criterion_group!(benches, bench_validate, bench_compile, bench_paginate);
criterion_main!(benches);
