//! Benchmarks for schema evaluation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use suit::prelude::*;

fn fit_benchmark(c: &mut Criterion) {
    let schema = Schema::object()
        .field("username", [string(), required()])
        .field("age", [integer(), min(0.0)])
        .field("email", email())
        .field(
            "profile",
            Schema::object().field("country", string()).field("city", string()),
        )
        .field("tags", collection(Schema::object().field("name", [string(), required()])))
        .build();

    let valid = json!({
        "username": "molly",
        "age": "31",
        "email": "molly@example.com",
        "extra": "dropped",
        "profile": {"country": "US"},
        "tags": [{"name": "a"}, {"name": "b"}, {"name": "c"}]
    });
    let invalid = json!({"age": "x", "email": "nope", "tags": [{}, {}]});

    c.bench_function("fit_valid", |b| b.iter(|| fit(black_box(&valid), &schema)));
    c.bench_function("fit_invalid", |b| b.iter(|| fit(black_box(&invalid), &schema)));
    c.bench_function("prune", |b| b.iter(|| prune(black_box(&valid), &schema)));
}

criterion_group!(benches, fit_benchmark);
criterion_main!(benches);
