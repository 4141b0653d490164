//! Styling configuration and document type selection.
//!
//! A `config.yaml` holds one [`StyleConfig`] per report flavor:
//!
//! ```yaml
//! executive_summary:
//!   font_name: Arial
//!   table_header_font_size: 10
//!   page_height: 842
//!   page_width: 595
//!   default_color: [79, 45, 127]
//!   p_18_font_size: 16
//!   p_12_font_size: 12
//!   p_10_font_size: 10
//!   p_10_font_color: "5A5A5A"
//!   table_header_color: "E7E2EE"
//!   table_content_font_size: 8
//! vulnerability:
//!   # same keys
//! ```

use crate::error::{Error, Result};
use crate::model::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "VULNREPORT_CONFIG";

/// The two report flavors the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Executive summary report (`sum`)
    ExecutiveSummary,
    /// Vulnerability detail report (`vul`)
    VulnerabilityDetail,
}

impl DocumentKind {
    /// Short selector used on the command line.
    pub fn selector(&self) -> &'static str {
        match self {
            DocumentKind::ExecutiveSummary => "sum",
            DocumentKind::VulnerabilityDetail => "vul",
        }
    }

    /// Whether this is the vulnerability detail flavor.
    pub fn is_detail(&self) -> bool {
        matches!(self, DocumentKind::VulnerabilityDetail)
    }
}

impl FromStr for DocumentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(DocumentKind::ExecutiveSummary),
            "vul" => Ok(DocumentKind::VulnerabilityDetail),
            _ => Err(Error::UnknownDocumentType(s.to_string())),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::ExecutiveSummary => write!(f, "executive summary"),
            DocumentKind::VulnerabilityDetail => write!(f, "vulnerability detail"),
        }
    }
}

/// Styling constants for one report flavor. Sizes are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Font applied to every table run in the final pass
    pub font_name: String,

    /// Header font size; the final pass sets every table run to
    /// `table_content_font_size`, so this is carried but not applied
    pub table_header_font_size: f32,

    /// Page height applied to every section
    pub page_height: f32,

    /// Page width applied to every section
    pub page_width: f32,

    /// Color for 18pt and 12pt paragraphs and relabeled header runs
    #[serde(default)]
    pub default_color: Option<Rgb>,

    /// Size for paragraphs whose style declares 18pt
    pub p_18_font_size: f32,

    /// Size for paragraphs whose style declares 12pt
    pub p_12_font_size: f32,

    /// Size for paragraphs whose style declares 10pt
    pub p_10_font_size: f32,

    /// Color for paragraphs whose style declares 10pt
    #[serde(default)]
    pub p_10_font_color: Option<Rgb>,

    /// Background of header row cells
    pub table_header_color: Rgb,

    /// Size of every table run after the final pass
    pub table_content_font_size: f32,

    /// Size for paragraphs whose style declares any other size
    #[serde(default = "default_fallback_font_size")]
    pub fallback_font_size: f32,

    /// Color of the thick borders on the first cells of a table
    #[serde(default = "default_border_accent_color")]
    pub border_accent_color: Rgb,

    /// Color of the thin borders on the remaining cells
    #[serde(default = "default_border_color")]
    pub border_color: Rgb,

    /// Background applied to every table cell in the final pass
    #[serde(default = "default_table_background_color")]
    pub table_background_color: Rgb,
}

fn default_fallback_font_size() -> f32 {
    9.0
}

fn default_border_accent_color() -> Rgb {
    Rgb(0x4F, 0x2D, 0x7F)
}

fn default_border_color() -> Rgb {
    Rgb(0xB5, 0xB5, 0xB5)
}

fn default_table_background_color() -> Rgb {
    Rgb::WHITE
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_name: "Arial".to_string(),
            table_header_font_size: 10.0,
            page_height: 842.0,
            page_width: 595.0,
            default_color: Some(default_border_accent_color()),
            p_18_font_size: 16.0,
            p_12_font_size: 12.0,
            p_10_font_size: 10.0,
            p_10_font_color: Some(Rgb(0x5A, 0x5A, 0x5A)),
            table_header_color: Rgb(0xE7, 0xE2, 0xEE),
            table_content_font_size: 8.0,
            fallback_font_size: default_fallback_font_size(),
            border_accent_color: default_border_accent_color(),
            border_color: default_border_color(),
            table_background_color: default_table_background_color(),
        }
    }
}

impl StyleConfig {
    /// Set the table font and return self.
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    /// Set the table content font size and return self.
    pub fn with_table_content_font_size(mut self, size: f32) -> Self {
        self.table_content_font_size = size;
        self
    }

    /// Set the page size in points and return self.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the default color and return self.
    pub fn with_default_color(mut self, color: Option<Rgb>) -> Self {
        self.default_color = color;
        self
    }
}

/// Both report flavors' styling, as loaded from `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Styling for `sum` reports
    pub executive_summary: StyleConfig,
    /// Styling for `vul` reports
    pub vulnerability: StyleConfig,
}

impl Config {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_yaml_str(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Find and load the configuration file. See [`locate`].
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::from_file(locate(explicit)?)
    }

    /// Styling for a report flavor.
    pub fn section(&self, kind: DocumentKind) -> &StyleConfig {
        match kind {
            DocumentKind::ExecutiveSummary => &self.executive_summary,
            DocumentKind::VulnerabilityDetail => &self.vulnerability,
        }
    }
}

/// Resolve the configuration file path.
///
/// An explicit path (flag or `VULNREPORT_CONFIG`) must exist. Otherwise
/// `config.yaml` beside the executable is tried, then `config.yaml` in the
/// working directory.
pub fn locate(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::Config(format!(
            "configuration file not found: {}",
            path.display()
        )));
    }

    let mut candidates = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(dir.join(CONFIG_FILE_NAME));
    }
    candidates.push(PathBuf::from(CONFIG_FILE_NAME));

    for candidate in &candidates {
        log::debug!("Looking for configuration at {}", candidate.display());
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }

    Err(Error::Config(format!(
        "{} not found beside the executable or in the working directory",
        CONFIG_FILE_NAME
    )))
}
