//! Top-level paragraph normalization.

use super::classify::{ParagraphClassifier, ParagraphRule, COMPONENT_LABEL, IP_ADDRESS_LABEL};
use crate::config::{DocumentKind, StyleConfig};
use crate::model::{Block, Document, Paragraph, Rgb};

const PART_2B: &str = "Part 2b";

/// Rewrite section headings and restyle every top-level paragraph.
///
/// Returns the number of paragraphs whose text changed.
pub fn normalize_paragraphs(doc: &mut Document, kind: DocumentKind, style: &StyleConfig) -> usize {
    let classifier = ParagraphClassifier::new(kind);
    let styles = &doc.styles;
    let mut rewritten = 0;

    for block in &mut doc.body {
        let Block::Paragraph(paragraph) = block else {
            continue;
        };

        let half_points = styles.font_size_half_points(paragraph.style_id());
        let original = paragraph.text();
        let text = rewrite_text(&classifier, &original, half_points);
        if text != original {
            log::debug!("Paragraph {:?} -> {:?}", original, text);
            paragraph.set_text(&text);
            rewritten += 1;
        }
        if text.is_empty() {
            continue;
        }

        let (color, size) = paragraph_style(half_points, style);
        apply_first_run(paragraph, color, size);
    }

    rewritten
}

/// New text for a paragraph whose style declares `half_points`, after the
/// heading rules.
pub fn rewrite_text(
    classifier: &ParagraphClassifier,
    text: &str,
    half_points: Option<u32>,
) -> String {
    let text = match classifier.classify(text, half_points) {
        ParagraphRule::Discard => return String::new(),
        ParagraphRule::PartHeading => rewrite_part_heading(text),
        ParagraphRule::NumberedHeading => strip_number_prefix(text).to_string(),
        ParagraphRule::Plain => text.to_string(),
    };
    rename_component_heading(&text)
}

/// "Part 2b. Findings" becomes "Part 2. Findings". Without a period the
/// text after "Part 2b" is kept as is.
pub fn rewrite_part_heading(text: &str) -> String {
    match text.find('.') {
        Some(index) => format!("Part 2{}", &text[index..]),
        None => format!("Part 2{}", text.strip_prefix(PART_2B).unwrap_or(text)),
    }
}

/// Drop a leading "<number> " token. Text without a space is unchanged.
pub fn strip_number_prefix(text: &str) -> &str {
    match text.find(' ') {
        Some(index) if text.starts_with(|c: char| c.is_ascii_digit()) => &text[index + 1..],
        _ => text,
    }
}

/// Replace everything from "IP Address" onward with "Component".
pub fn rename_component_heading(text: &str) -> String {
    match text.find(IP_ADDRESS_LABEL) {
        Some(index) => format!("{}{}", &text[..index], COMPONENT_LABEL),
        None => text.to_string(),
    }
}

/// Color and size for a paragraph whose style declares `half_points`.
pub fn paragraph_style(half_points: Option<u32>, style: &StyleConfig) -> (Option<Rgb>, f32) {
    match half_points {
        Some(36) => (style.default_color, style.p_18_font_size),
        Some(24) => (style.default_color, style.p_12_font_size),
        Some(20) => (style.p_10_font_color, style.p_10_font_size),
        _ => (None, style.fallback_font_size),
    }
}

// Only the first run is restyled; later runs keep their own formatting.
fn apply_first_run(paragraph: &mut Paragraph, color: Option<Rgb>, size: f32) {
    let Some(run) = paragraph.first_run_mut() else {
        log::warn!("Paragraph with text but no run, skipping styling");
        return;
    };
    if let Some(color) = color {
        run.set_color(color);
    }
    run.set_font_size(size);
    run.set_bold(None);
}
