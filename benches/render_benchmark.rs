//! Benchmarks for unvsdx rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks render synthetic document records, so they measure the
//! report and diagram builders without any package I/O.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use unvsdx::model::{Connection, DocumentRecord, PageRecord, ShapeRecord};
use unvsdx::render::{to_json, to_markdown, to_mermaid, JsonFormat, RenderOptions};

/// Creates a document with `page_count` pages of chained process shapes.
fn create_test_document(page_count: usize, shapes_per_page: usize) -> DocumentRecord {
    let mut doc = DocumentRecord::new("benchmark.vsdx");

    for p in 0..page_count {
        let mut page = PageRecord::new(format!("Page-{}", p + 1));
        for s in 0..shapes_per_page {
            let id = (s + 1).to_string();
            let mut shape = ShapeRecord::new()
                .with_id(id.as_str())
                .with_text(format!("Step {} of page {}", s + 1, p + 1))
                .with_type("Process")
                .with_sub_shape(ShapeRecord::new().with_text("note"));
            if s + 1 < shapes_per_page {
                shape = shape.with_connection(Connection::new(id.as_str(), (s + 2).to_string()));
            }
            if s % 10 == 0 {
                shape = shape.with_image(true);
            }
            page.add_shape(shape);
        }
        doc.add_page(page);
    }

    doc
}

fn bench_markdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown");
    let options = RenderOptions::default();

    for pages in [1, 10, 50] {
        let doc = create_test_document(pages, 40);
        group.bench_with_input(BenchmarkId::from_parameter(pages), &doc, |b, doc| {
            b.iter(|| to_markdown(black_box(doc), &options))
        });
    }

    group.finish();
}

fn bench_mermaid(c: &mut Criterion) {
    let doc = create_test_document(1, 500);
    let options = RenderOptions::default();

    c.bench_function("mermaid_500_shapes", |b| {
        b.iter(|| to_mermaid(black_box(&doc.pages[0]), &options))
    });
}

fn bench_json(c: &mut Criterion) {
    let doc = create_test_document(10, 40);

    c.bench_function("json_pretty_10_pages", |b| {
        b.iter(|| to_json(black_box(&doc), JsonFormat::Pretty))
    });
}

criterion_group!(benches, bench_markdown, bench_mermaid, bench_json);
criterion_main!(benches);
