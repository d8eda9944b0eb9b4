//! Benchmarks for field normalizers and CSV import.
//!
//! Normalizers run once per field of every imported row, so they dominate
//! import time for large exports.

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;
use std::time::Duration;

use contact_import::io::{Format, ImportService, normalize_phone, normalize_phone_type, parse_date};

// ============================================================================
// Phone Normalization Benchmarks
// ============================================================================

fn bench_normalize_phone(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_phone");
    group.measurement_time(Duration::from_secs(5));

    let inputs = [
        ("ten_digits", "5551234567"),
        ("formatted", "(555) 123-4567"),
        ("international", "+44 20 7946 0958"),
        ("with_extension", "+1 (555) 123-4567 ext. 89"),
        ("empty", ""),
    ];

    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::new("phone", name), &input, |b, input| {
            b.iter(|| normalize_phone(black_box(input)));
        });
    }

    group.bench_function("phone_type", |b| {
        b.iter(|| normalize_phone_type(black_box("Business Phone")));
    });

    group.finish();
}

// ============================================================================
// Date Parsing Benchmarks
// ============================================================================

fn bench_parse_date(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_date");

    // Later layouts pay for every failed attempt before them.
    let inputs = [
        ("iso", "2024-03-15"),
        ("us", "03/15/2024"),
        ("month_name", "March 15, 2024"),
        ("datetime", "2024-03-15 10:30:00"),
        ("garbage", "not a date"),
    ];

    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::new("layout", name), &input, |b, input| {
            b.iter(|| parse_date(black_box(input)));
        });
    }

    group.finish();
}

// ============================================================================
// CSV Import Scaling
// ============================================================================

fn bench_generic_csv_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("generic_csv_import");
    let service = ImportService::new();

    for rows in [10u64, 100, 1000] {
        let mut content = String::from("Name,Phone,Email\n");
        for i in 0..rows {
            let _ = writeln!(content, "Contact {i},(555) 123-{:04},c{i}@example.com", i % 10_000);
        }

        group.throughput(Throughput::Elements(rows));
        group.bench_with_input(BenchmarkId::new("rows", rows), &content, |b, content| {
            b.iter(|| service.import_from_str(black_box(content.clone()), Format::GenericCsv));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize_phone,
    bench_parse_date,
    bench_generic_csv_import
);
criterion_main!(benches);
