//! Benchmarks for report rendering and XLSX export.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xlreport::{Column, MemoryWorkbook, Report};

struct Line {
    sku: String,
    qty: u32,
    price: f64,
    vendor: Option<Vendor>,
}

struct Vendor {
    name: String,
    country: String,
}

fn lines(count: usize) -> Vec<Line> {
    (0..count)
        .map(|i| Line {
            sku: format!("SKU-{i:05}"),
            qty: (i % 17) as u32,
            price: i as f64 * 0.25,
            vendor: (i % 3 != 0).then(|| Vendor {
                name: format!("Vendor {}", i % 11),
                country: "NZ".to_string(),
            }),
        })
        .collect()
}

fn line_report() -> Report<Line> {
    Report::new(vec![
        Column::leaf("SKU", |l: &Line| l.sku.clone()),
        Column::nest(
            "Amounts",
            vec![
                Column::leaf("Qty", |l: &Line| l.qty),
                Column::leaf("Price", |l: &Line| l.price),
                Column::leaf("Total", |l: &Line| f64::from(l.qty) * l.price),
            ],
        ),
        Column::group_ref(
            "Vendor",
            |l: &Line| l.vendor.as_ref(),
            vec![
                Column::leaf("Name", |v: &Vendor| v.name.clone()),
                Column::leaf("Country", |v: &Vendor| v.country.clone()),
            ],
        ),
    ])
    .with_header_style(|s| s.bold = Some(true))
}

/// Render into a fresh in-memory workbook at several record counts
fn bench_render(c: &mut Criterion) {
    let report = line_report();
    let mut group = c.benchmark_group("render");

    for count in [100, 1_000, 10_000] {
        let records = lines(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("memory", count), &records, |b, records| {
            b.iter(|| {
                let mut wb = MemoryWorkbook::new();
                report
                    .render(&mut wb, "Lines", black_box(records))
                    .expect("Failed to render");
                wb
            })
        });
    }

    group.finish();
}

/// Serialize an already rendered workbook
fn bench_export(c: &mut Criterion) {
    let mut wb = MemoryWorkbook::new();
    line_report()
        .render(&mut wb, "Lines", &lines(5_000))
        .expect("Failed to render");

    c.bench_function("export_5000_rows", |b| {
        b.iter(|| black_box(&wb).to_xlsx().expect("Failed to export"))
    });
}

criterion_group!(benches, bench_render, bench_export);
criterion_main!(benches);
