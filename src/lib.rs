//! # vulnreport
//!
//! Restyling of vulnerability-scan report documents.
//!
//! The scanner emits two `.docx` report flavors, an executive summary and a
//! vulnerability detail report. This library loads such a report, rewrites
//! its headings, relabels and recolors its table headers, folds the
//! per-finding label tables into wide component tables, removes boilerplate
//! and writes a customer-facing copy.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vulnreport::{Config, DocumentKind, Restyler};
//!
//! fn main() -> vulnreport::Result<()> {
//!     let config = Config::load(None)?;
//!     let output = Restyler::new(DocumentKind::VulnerabilityDetail, &config)
//!         .process_file("scan.docx", "out")?;
//!     println!("Written to {}", output.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! Paragraph normalization, component table restructuring (detail reports),
//! header relabeling and borders, pruning, finding value propagation (detail
//! reports), uniform table styling and page setup. See [`transform::Stage`].
//!
//! Running the pipeline on its own output does not reproduce that output:
//! the label dictionaries key on the scanner's original header texts.

pub mod config;
pub mod detect;
pub mod error;
pub mod model;
pub mod package;
pub mod transform;
pub mod xml;

// Re-export commonly used types
pub use config::{Config, DocumentKind, StyleConfig};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocxFormat};
pub use error::{Error, Result};
pub use model::{
    Block, BlockSummary, Border, BorderSide, Document, Hyperlink, Outline, Paragraph, Rgb, Run,
    Styles, Table, TableCell, TableRow,
};
pub use package::Package;
pub use transform::{classify_table, Stage, TableRole};

use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Format of output file names (`report_05-Mar-2024-14-07.docx`).
pub const OUTPUT_NAME_FORMAT: &str = "report_%d-%b-%Y-%H-%M.docx";

/// Load a `.docx` report.
///
/// # Example
///
/// ```no_run
/// use vulnreport::open_document;
///
/// let doc = open_document("scan.docx").unwrap();
/// println!("Tables: {}", doc.table_count());
/// ```
pub fn open_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    log::info!("Loading {}", path.display());
    Document::open(path)
}

/// Restyle a report file into `destination_dir` with the configured
/// styling for `kind`. Returns the path of the written file.
pub fn restyle_file<P, Q>(source: P, destination_dir: Q, kind: DocumentKind, config: &Config) -> Result<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Restyler::new(kind, config).process_file(source, destination_dir)
}

/// Output file name for a save at the given local time, minute resolution.
///
/// Two runs within the same minute produce the same name.
pub fn output_file_name(at: NaiveDateTime) -> String {
    at.format(OUTPUT_NAME_FORMAT).to_string()
}

/// Runs the restyling pipeline for one report flavor.
///
/// # Example
///
/// ```no_run
/// use vulnreport::{open_document, Config, DocumentKind, Restyler};
///
/// let config = Config::load(None)?;
/// let mut doc = open_document("summary.docx")?;
/// Restyler::new(DocumentKind::ExecutiveSummary, &config).process(&mut doc)?;
/// doc.save("summary-restyled.docx")?;
/// # Ok::<(), vulnreport::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Restyler {
    kind: DocumentKind,
    style: StyleConfig,
}

impl Restyler {
    /// Create a restyler using the configuration section for `kind`.
    pub fn new(kind: DocumentKind, config: &Config) -> Self {
        Self {
            kind,
            style: config.section(kind).clone(),
        }
    }

    /// Replace the styling.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// The report flavor.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// The styling in use.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// The stages this restyler runs, in order.
    pub fn stages(&self) -> Vec<Stage> {
        Stage::pipeline(self.kind)
    }

    /// Run every stage over a document.
    pub fn process(&self, doc: &mut Document) -> Result<()> {
        self.process_with_progress(doc, |_| {})
    }

    /// Run every stage, calling `on_stage` before each one.
    pub fn process_with_progress<F>(&self, doc: &mut Document, mut on_stage: F) -> Result<()>
    where
        F: FnMut(Stage),
    {
        log::info!("Restyling {} report", self.kind);
        for stage in self.stages() {
            on_stage(stage);
            log::debug!("Stage: {}", stage);
            stage.run(doc, self.kind, &self.style)?;
        }
        Ok(())
    }

    /// Load, restyle and save a report. The output is written only after
    /// every stage succeeded.
    pub fn process_file<P, Q>(&self, source: P, destination_dir: Q) -> Result<PathBuf>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        self.process_file_with_progress(source, destination_dir, |_| {})
    }

    /// [`process_file`](Self::process_file) with a stage callback.
    pub fn process_file_with_progress<P, Q, F>(
        &self,
        source: P,
        destination_dir: Q,
        on_stage: F,
    ) -> Result<PathBuf>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        F: FnMut(Stage),
    {
        let mut doc = open_document(source)?;
        self.process_with_progress(&mut doc, on_stage)?;

        let output = destination_dir
            .as_ref()
            .join(output_file_name(Local::now().naive_local()));
        doc.save(&output)?;
        Ok(output)
    }
}
