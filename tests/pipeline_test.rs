//! End-to-end tests of the restyling pipeline on synthetic reports.

use std::fs;
use std::path::Path;

use vulnreport::model::{Block, Hyperlink, Run};
use vulnreport::{
    restyle_file, BorderSide, Config, Document, DocumentKind, Error, Paragraph, Restyler, Rgb,
    StyleConfig, Table, TableCell, TableRow,
};

fn styled_document() -> Document {
    let mut doc = Document::new();
    doc.styles.add_paragraph_style("Title", Some(18.0));
    doc.styles.add_paragraph_style("Heading2", Some(12.0));
    doc.styles.add_paragraph_style("BodyText", Some(10.0));
    doc.styles.add_paragraph_style("Normal", Some(11.0));
    doc.styles.set_default_paragraph("Normal");
    doc
}

fn label_table(severity: &str, cvss: &str, cves: &[&str]) -> Table {
    let mut table = Table::from_rows([["Severity", severity], ["CVSSv2 Score", cvss]]);
    let mut references = Paragraph::new();
    for id in cves {
        references.add_hyperlink(Hyperlink::to_anchor(*id).with_run(Run::new(*id)));
    }
    let mut cell = TableCell::with_text("References");
    cell.content.push(Block::Paragraph(references));
    table.add_row(TableRow::new(vec![cell, TableCell::with_text("")]));
    table
}

fn component_table() -> Table {
    Table::from_rows([
        ["IP Address", "Instance", "Host", "Port", "Evidence", "Notes"],
        ["10.0.0.5", "web", "srv01", "443", "TLS 1.0 enabled", "n1"],
        ["10.0.0.6", "db", "srv02", "5432", "Weak cipher", "n2"],
        ["10.0.0.7", "", "srv03", "22", "Old banner", "n3"],
    ])
}

fn detail_report() -> Document {
    let mut doc = styled_document();
    doc.add_paragraph(Paragraph::with_text("Table of Contents").styled("Title"));
    doc.add_paragraph(Paragraph::with_text("2 Executive Summary").styled("Title"));
    doc.add_paragraph(Paragraph::with_text("Part 2b. Findings").styled("Heading2"));
    doc.add_paragraph(Paragraph::with_text("3 Vulnerability Details").styled("Title"));
    doc.add_table(Table::from_rows([
        ["Scan Customer Company:", "Acme Corp"],
        ["ASV Company:", "Scanner Inc"],
    ]));
    doc.add_table(Table::from_rows([["1 Scan Information", "2024-03-05"]]));
    doc.add_table(label_table(
        "High",
        "7.5 (AV:N/AC:L/Au:N)",
        &["CVE-2021-1234", "CVE-2021-5678"],
    ));
    doc.add_paragraph(Paragraph::with_text("IP Address – Host 10.0.0.5").styled("BodyText"));
    doc.add_table(component_table());
    doc.add_table(Table::from_rows([["", "orphan"]]));
    doc
}

fn save(doc: &Document, dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

fn config() -> Config {
    let style = StyleConfig {
        font_name: "Calibri".to_string(),
        default_color: Some(Rgb(0x4F, 0x2D, 0x7F)),
        p_10_font_color: Some(Rgb(0x40, 0x40, 0x40)),
        p_18_font_size: 16.0,
        p_12_font_size: 13.0,
        p_10_font_size: 10.5,
        table_content_font_size: 8.0,
        page_width: 595.0,
        page_height: 842.0,
        ..StyleConfig::default()
    };
    Config {
        executive_summary: style.clone(),
        vulnerability: style,
    }
}

#[test]
fn test_detail_report_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let source = save(&detail_report(), dir.path(), "scan.docx");
    let out_dir = dir.path().join("out");
    fs::create_dir(&out_dir).unwrap();

    let output = restyle_file(&source, &out_dir, DocumentKind::VulnerabilityDetail, &config()).unwrap();

    let name = output.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("report_"));
    assert!(name.ends_with(".docx"));
    assert_eq!(output.parent(), Some(out_dir.as_path()));

    let doc = Document::open(&output).unwrap();
    let texts: Vec<String> = doc.paragraphs().map(Paragraph::text).collect();
    assert_eq!(
        texts,
        ["", "", "Part 2. Findings", "Vulnerability Details", "Component"]
    );

    let heading = doc.paragraphs().nth(3).unwrap();
    assert_eq!(heading.runs()[0].font_size(), Some(16.0));
    assert_eq!(heading.runs()[0].color(), Some(Rgb(0x4F, 0x2D, 0x7F)));
    let component = doc.paragraphs().nth(4).unwrap();
    assert_eq!(component.runs()[0].font_size(), Some(10.5));
    assert_eq!(component.runs()[0].color(), Some(Rgb(0x40, 0x40, 0x40)));

    // Boilerplate and empty tables are gone.
    assert_eq!(doc.table_count(), 3);
    assert!(doc
        .tables()
        .all(|t| t.first_cell_text().as_deref() != Some("")));

    let components = doc.table(2).unwrap();
    assert!(components.is_right_to_left());
    assert_eq!(components.column_count(), 8);
    assert_eq!(components.row_count(), 4);
    assert_eq!(
        components.header_texts(),
        [
            "Notes",
            "Detected Open Ports, Services/ Protocols",
            "CVSS Score",
            "CVE Number",
            "Severity Level",
            "Vulnerability",
            "Instance",
            "Component"
        ]
    );

    for row in 1..4 {
        assert_eq!(components.cell(row, 2).unwrap().text(), "7.5");
        assert_eq!(
            components.cell(row, 3).unwrap().text(),
            "CVE-2021-1234, CVE-2021-5678"
        );
        assert_eq!(components.cell(row, 4).unwrap().text(), "High");
    }
    assert_eq!(components.cell(1, 6).unwrap().text(), "web/srv01");
    assert_eq!(components.cell(2, 6).unwrap().text(), "db");
    assert_eq!(components.cell(3, 7).unwrap().text(), "10.0.0.7");

    for table in doc.tables() {
        for cell in table.cells() {
            assert_eq!(cell.shading(), Some(Rgb::WHITE));
            for paragraph in cell.paragraphs() {
                for run in paragraph.runs() {
                    assert_eq!(run.font_size(), Some(8.0));
                    assert_eq!(run.font_name(), Some("Calibri"));
                }
            }
        }
    }
}

#[test]
fn test_summary_report_relabels_and_borders() {
    let mut doc = styled_document();
    doc.add_paragraph(Paragraph::with_text("Part 2a. Scan Information").styled("Title"));
    doc.add_table(Table::from_rows([
        ["Scan Customer Company: ", "Acme Corp"],
        ["ASV Company: ", "Scanner Inc"],
    ]));
    doc.add_table(Table::from_rows([
        ["IP Address", "CVSSv2 Score", "Severity Level"],
        ["10.0.0.5", "7.5", "High"],
    ]));
    doc.add_table(Table::from_rows([["1 Scan Information"]]));

    Restyler::new(DocumentKind::ExecutiveSummary, &config())
        .process(&mut doc)
        .unwrap();

    assert_eq!(doc.paragraphs().next().unwrap().text(), "");
    assert_eq!(doc.table_count(), 3);

    let findings = doc.table(1).unwrap();
    assert_eq!(findings.header_texts(), ["Component", "CVSS Score", "Severity Level"]);
    assert!(!findings.is_right_to_left());
    assert_eq!(
        findings.cell(1, 0).unwrap().border(BorderSide::Bottom),
        Some(vulnreport::Border::Nil)
    );

    let customer = doc.table(0).unwrap();
    assert_eq!(
        customer.cell(1, 1).unwrap().border(BorderSide::Bottom),
        Some(vulnreport::Border::Single {
            size: 5,
            color: Rgb::WHITE
        })
    );
}

#[test]
fn test_failure_writes_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = styled_document();
    doc.add_table(Table::from_rows([["IP Address", "Port"], ["10.0.0.5", "443"]]));
    let source = save(&doc, dir.path(), "short.docx");
    let out_dir = dir.path().join("out");
    fs::create_dir(&out_dir).unwrap();

    let result = restyle_file(&source, &out_dir, DocumentKind::VulnerabilityDetail, &config());

    assert!(matches!(result, Err(Error::TableShape { table: 0, .. })));
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 0);
}

#[test]
fn test_not_a_docx() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("notes.docx");
    fs::write(&source, "plain text").unwrap();

    let result = restyle_file(&source, dir.path(), DocumentKind::ExecutiveSummary, &config());
    assert!(matches!(result, Err(Error::NotDocx)));
}

#[test]
fn test_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let result = restyle_file(
        dir.path().join("absent.docx"),
        dir.path(),
        DocumentKind::ExecutiveSummary,
        &config(),
    );
    assert!(matches!(result, Err(Error::Io(_))));
}
