//! Document-level types.

use super::{Paragraph, Table};
use crate::package::Package;
use crate::xml::{Element, XmlDocument};
use std::collections::BTreeMap;

/// A loaded Word document.
///
/// The body is an owned block sequence; passes mutate it in place. Tables
/// removed from the body are gone, so callers must not hold indices or
/// clones across a pruning pass and expect them to refer to live tables.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Top-level blocks in document order
    pub body: Vec<Block>,

    /// Paragraph styles declared by the document
    pub styles: Styles,

    /// `w:document` part with an empty `w:body`
    pub(crate) shell: Option<XmlDocument>,

    /// Package the document was loaded from
    pub(crate) package: Option<Package>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    pub fn add_block(&mut self, block: Block) {
        self.body.push(block);
    }

    /// Append a paragraph.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(paragraph));
    }

    /// Append a table.
    pub fn add_table(&mut self, table: Table) {
        self.body.push(Block::Table(table));
    }

    /// Top-level tables in document order.
    ///
    /// Tables nested inside cells are reachable only through their cell.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Top-level tables in document order, mutably.
    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.body.iter_mut().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Get a top-level table by index.
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables().nth(index)
    }

    /// Number of top-level tables.
    pub fn table_count(&self) -> usize {
        self.tables().count()
    }

    /// Top-level paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Top-level paragraphs in document order, mutably.
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.body.iter_mut().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Detach every top-level table matching `predicate`; returns how many
    /// were removed.
    pub fn remove_tables<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Table) -> bool,
    {
        let before = self.body.len();
        self.body
            .retain(|block| !matches!(block, Block::Table(t) if predicate(t)));
        before - self.body.len()
    }

    /// Section properties (`w:sectPr`) of every section: the body-level one
    /// and those carried by section-ending paragraphs.
    pub fn section_properties_mut(&mut self) -> Vec<&mut Element> {
        let mut sections = Vec::new();
        for block in &mut self.body {
            match block {
                Block::Other(element) if element.name == "w:sectPr" => sections.push(element),
                Block::Paragraph(p) => {
                    if let Some(section) = p
                        .properties
                        .as_mut()
                        .and_then(|props| props.child_mut("w:sectPr"))
                    {
                        sections.push(section);
                    }
                }
                _ => {}
            }
        }
        sections
    }

    /// Plain text of the top-level paragraphs.
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// A top-level or cell-level block.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Paragraph
    Paragraph(Paragraph),
    /// Table
    Table(Table),
    /// Markup the model does not interpret (section properties, content
    /// controls, bookmarks)
    Other(Element),
}

/// Paragraph styles of a document, reduced to what the passes need: each
/// style's own declared font size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styles {
    /// Declared font size per style id, in half points
    sizes: BTreeMap<String, Option<u32>>,

    /// Style applied to paragraphs without `w:pStyle`
    default_paragraph: Option<String>,
}

impl Styles {
    /// Create an empty style table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a paragraph style with an optional font size in points.
    pub fn add_paragraph_style(&mut self, id: impl Into<String>, font_size: Option<f32>) {
        let half_points = font_size.map(|pt| (pt * 2.0).round() as u32);
        self.sizes.insert(id.into(), half_points);
    }

    /// Register a paragraph style by half-point size as found in markup.
    pub(crate) fn insert_half_points(&mut self, id: String, half_points: Option<u32>) {
        self.sizes.insert(id, half_points);
    }

    /// Mark a style as the default paragraph style.
    pub fn set_default_paragraph(&mut self, id: impl Into<String>) {
        self.default_paragraph = Some(id.into());
    }

    /// The default paragraph style id.
    pub fn default_paragraph(&self) -> Option<&str> {
        self.default_paragraph.as_deref()
    }

    /// Declared font size of a style, in half points. `None` resolves to
    /// the default paragraph style. Sizes inherited through `w:basedOn` are
    /// not considered.
    pub fn font_size_half_points(&self, style_id: Option<&str>) -> Option<u32> {
        let id = style_id.or(self.default_paragraph.as_deref())?;
        self.sizes.get(id).copied().flatten()
    }

    /// Declared font size of a style, in points.
    pub fn font_size(&self, style_id: Option<&str>) -> Option<f32> {
        self.font_size_half_points(style_id)
            .map(|hp| hp as f32 / 2.0)
    }

    /// Styles in id order with their half-point sizes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<u32>)> {
        self.sizes.iter().map(|(id, size)| (id.as_str(), *size))
    }

    /// Check if no styles are registered.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.table_count(), 0);
    }

    #[test]
    fn test_tables_and_removal() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Intro"));
        doc.add_table(Table::from_rows([[""]]));
        doc.add_table(Table::from_rows([["Keep"]]));

        assert_eq!(doc.table_count(), 2);
        let removed = doc.remove_tables(|t| t.first_cell_text().as_deref() == Some(""));
        assert_eq!(removed, 1);
        assert_eq!(doc.table_count(), 1);
        assert_eq!(doc.table(0).unwrap().first_cell_text().as_deref(), Some("Keep"));
        assert_eq!(doc.plain_text(), "Intro");
    }

    #[test]
    fn test_styles_lookup() {
        let mut styles = Styles::new();
        styles.add_paragraph_style("Normal", Some(10.0));
        styles.add_paragraph_style("Title", Some(18.0));
        styles.add_paragraph_style("Plain", None);
        styles.set_default_paragraph("Normal");

        assert_eq!(styles.font_size(Some("Title")), Some(18.0));
        assert_eq!(styles.font_size_half_points(None), Some(20));
        assert_eq!(styles.font_size(Some("Plain")), None);
        assert_eq!(styles.font_size(Some("Missing")), None);
    }

    #[test]
    fn test_section_properties() {
        let mut doc = Document::new();
        doc.add_block(Block::Other(Element::new("w:sectPr")));
        assert_eq!(doc.section_properties_mut().len(), 1);
    }
}
