//! Benchmarks for vulnreport restyling performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic detail reports.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vulnreport::{Config, Document, DocumentKind, Paragraph, Restyler, Table};

/// Creates a detail report with the given number of findings.
///
/// Each finding is a label table followed by a component table.
fn create_detail_report(findings: usize) -> Document {
    let mut doc = Document::new();
    doc.styles.add_paragraph_style("Title", Some(18.0));
    doc.styles.add_paragraph_style("BodyText", Some(10.0));

    doc.add_paragraph(Paragraph::with_text("3 Vulnerability Details").styled("Title"));
    doc.add_table(Table::from_rows([["Scan Customer Company:", "Acme Corp"]]));

    for i in 0..findings {
        doc.add_paragraph(
            Paragraph::with_text(format!("IP Address – Host 10.0.{}.1", i)).styled("BodyText"),
        );
        doc.add_table(Table::from_rows([
            ["Severity", "Medium"],
            ["CVSSv2 Score", "5.0 (AV:N/AC:L/Au:N)"],
        ]));

        let mut rows = vec![[
            "IP Address".to_string(),
            "Instance".to_string(),
            "Host".to_string(),
            "Port".to_string(),
            "Evidence".to_string(),
            "Notes".to_string(),
        ]];
        for host in 0..10 {
            rows.push([
                format!("10.0.{}.{}", i, host),
                "web".to_string(),
                format!("srv{:02}", host),
                "443".to_string(),
                "Banner disclosed".to_string(),
                String::new(),
            ]);
        }
        doc.add_table(Table::from_rows(rows));
    }

    doc
}

/// Benchmark format detection.
fn bench_format_detection(c: &mut Criterion) {
    let docx_data = create_detail_report(1).to_bytes().unwrap();
    let non_docx_data = b"Not a docx file at all, just random text content";

    c.bench_function("detect_valid_docx", |b| {
        b.iter(|| vulnreport::detect_format_from_bytes(black_box(&docx_data)).unwrap());
    });

    c.bench_function("detect_non_docx", |b| {
        b.iter(|| vulnreport::detect_format_from_bytes(black_box(non_docx_data)).is_err());
    });
}

/// Benchmark package loading at various sizes.
fn bench_document_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_loading");

    for findings in [1, 10, 50].iter() {
        let data = create_detail_report(*findings).to_bytes().unwrap();

        group.bench_function(format!("{}_findings", findings), |b| {
            b.iter(|| Document::from_bytes(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the full pipeline for both report flavors.
fn bench_restyling(c: &mut Criterion) {
    let config = Config::default();
    let mut group = c.benchmark_group("restyling");

    for kind in [DocumentKind::VulnerabilityDetail, DocumentKind::ExecutiveSummary] {
        let restyler = Restyler::new(kind, &config);
        let source = create_detail_report(10);

        group.bench_function(format!("{:?}", kind), |b| {
            b.iter(|| {
                let mut doc = source.clone();
                restyler.process(black_box(&mut doc)).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_document_loading,
    bench_restyling,
);
criterion_main!(benches);
