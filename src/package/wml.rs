//! Conversion between the `w:document` element tree and the typed model.

use crate::error::{Error, Result};
use crate::model::{
    Block, Hyperlink, Paragraph, ParagraphContent, Run, RunContent, Table, TableCell, TableRow,
    W_PPR, W_RPR, W_TBLPR, W_TCPR,
};
use crate::xml::{Element, Node, XmlDocument};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const W_DOCUMENT: &str = "w:document";
const W_BODY: &str = "w:body";
const W_P: &str = "w:p";
const W_R: &str = "w:r";
const W_T: &str = "w:t";
const W_TAB: &str = "w:tab";
const W_BR: &str = "w:br";
const W_HYPERLINK: &str = "w:hyperlink";
const W_TBL: &str = "w:tbl";
const W_TBLGRID: &str = "w:tblGrid";
const W_GRIDCOL: &str = "w:gridCol";
const W_TR: &str = "w:tr";
const W_TRPR: &str = "w:trPr";
const W_TBLPREX: &str = "w:tblPrEx";
const W_TC: &str = "w:tc";

/// An empty `w:document` part.
pub(crate) fn empty_document() -> XmlDocument {
    XmlDocument::new(
        Element::new(W_DOCUMENT)
            .with_attr("xmlns:w", NS_W)
            .with_attr("xmlns:r", NS_R)
            .with_child(Element::new(W_BODY)),
    )
}

/// Split a parsed `w:document` part into its shell (with an emptied body)
/// and the typed body blocks.
pub(crate) fn read_document(mut part: XmlDocument) -> Result<(XmlDocument, Vec<Block>)> {
    if part.root.name != W_DOCUMENT {
        return Err(Error::Xml(format!(
            "expected <{}> root, found <{}>",
            W_DOCUMENT, part.root.name
        )));
    }
    let body = part
        .root
        .child_mut(W_BODY)
        .ok_or_else(|| Error::Xml(format!("<{}> has no <{}>", W_DOCUMENT, W_BODY)))?;
    let children = std::mem::take(&mut body.children);
    Ok((part, read_blocks(children)))
}

/// Fill the shell's body with the serialized blocks.
pub(crate) fn write_document(mut shell: XmlDocument, blocks: &[Block]) -> XmlDocument {
    let nodes = blocks
        .iter()
        .map(|b| Node::Element(write_block(b)))
        .collect();
    match shell.root.child_mut(W_BODY) {
        Some(body) => body.children = nodes,
        None => shell.root.children.push(Node::Element(Element {
            name: W_BODY.to_string(),
            attributes: Vec::new(),
            children: nodes,
        })),
    }
    shell
}

fn elements(nodes: Vec<Node>) -> impl Iterator<Item = Element> {
    nodes.into_iter().filter_map(|node| match node {
        Node::Element(e) => Some(e),
        _ => None,
    })
}

fn read_blocks(nodes: Vec<Node>) -> Vec<Block> {
    elements(nodes).map(read_block).collect()
}

fn read_block(element: Element) -> Block {
    match element.name.as_str() {
        W_P => Block::Paragraph(read_paragraph(element)),
        W_TBL => Block::Table(read_table(element)),
        _ => Block::Other(element),
    }
}

fn read_paragraph(element: Element) -> Paragraph {
    let mut paragraph = Paragraph::new();
    for child in elements(element.children) {
        if child.name == W_PPR {
            paragraph.properties = Some(child);
        } else {
            paragraph.content.push(read_inline(child));
        }
    }
    paragraph
}

fn read_inline(element: Element) -> ParagraphContent {
    match element.name.as_str() {
        W_R => ParagraphContent::Run(read_run(element)),
        W_HYPERLINK => ParagraphContent::Hyperlink(Hyperlink {
            attributes: element.attributes,
            content: elements(element.children).map(read_inline).collect(),
        }),
        _ => ParagraphContent::Other(element),
    }
}

fn read_run(element: Element) -> Run {
    let mut run = Run::default();
    for child in elements(element.children) {
        match child.name.as_str() {
            W_RPR => run.properties = Some(child),
            W_T => run.content.push(RunContent::Text(child.text())),
            W_TAB => run.content.push(RunContent::Tab),
            W_BR if child.attributes.is_empty() => run.content.push(RunContent::Break),
            _ => run.content.push(RunContent::Other(child)),
        }
    }
    run
}

fn read_table(element: Element) -> Table {
    let mut table = Table::new();
    for child in elements(element.children) {
        match child.name.as_str() {
            W_TBLPR => table.properties = Some(child),
            W_TBLGRID => {
                table.grid = child
                    .elements()
                    .filter(|col| col.name == W_GRIDCOL)
                    .map(|col| col.attr("w:w").and_then(|w| w.parse().ok()))
                    .collect();
            }
            W_TR => table.rows.push(read_row(child)),
            _ => table.trailing.push(child),
        }
    }
    table
}

fn read_row(element: Element) -> TableRow {
    let mut row = TableRow::default();
    for child in elements(element.children) {
        match child.name.as_str() {
            W_TBLPREX => row.exceptions = Some(child),
            W_TRPR => row.properties = Some(child),
            W_TC => row.cells.push(read_cell(child)),
            _ => row.trailing.push(child),
        }
    }
    row
}

fn read_cell(element: Element) -> TableCell {
    let mut cell = TableCell::default();
    let mut blocks = Vec::new();
    for child in elements(element.children) {
        if child.name == W_TCPR {
            cell.properties = Some(child);
        } else {
            blocks.push(read_block(child));
        }
    }
    cell.content = blocks;
    cell
}

fn write_block(block: &Block) -> Element {
    match block {
        Block::Paragraph(p) => write_paragraph(p),
        Block::Table(t) => write_table(t),
        Block::Other(e) => e.clone(),
    }
}

fn write_paragraph(paragraph: &Paragraph) -> Element {
    let mut element = Element::new(W_P);
    if let Some(ref properties) = paragraph.properties {
        element = element.with_child(properties.clone());
    }
    for item in &paragraph.content {
        element = element.with_child(write_inline(item));
    }
    element
}

fn write_inline(item: &ParagraphContent) -> Element {
    match item {
        ParagraphContent::Run(run) => write_run(run),
        ParagraphContent::Hyperlink(link) => Element {
            name: W_HYPERLINK.to_string(),
            attributes: link.attributes.clone(),
            children: link
                .content
                .iter()
                .map(|c| Node::Element(write_inline(c)))
                .collect(),
        },
        ParagraphContent::Other(e) => e.clone(),
    }
}

fn write_run(run: &Run) -> Element {
    let mut element = Element::new(W_R);
    if let Some(ref properties) = run.properties {
        element = element.with_child(properties.clone());
    }
    for item in &run.content {
        let child = match item {
            RunContent::Text(text) => Element::new(W_T)
                .with_attr("xml:space", "preserve")
                .with_text(text.as_str()),
            RunContent::Tab => Element::new(W_TAB),
            RunContent::Break => Element::new(W_BR),
            RunContent::Other(e) => e.clone(),
        };
        element = element.with_child(child);
    }
    element
}

fn write_table(table: &Table) -> Element {
    let properties = table
        .properties
        .clone()
        .unwrap_or_else(Table::default_properties);
    let mut grid = Element::new(W_TBLGRID);
    for width in &table.grid {
        let mut col = Element::new(W_GRIDCOL);
        if let Some(w) = width {
            col.set_attr("w:w", w.to_string());
        }
        grid = grid.with_child(col);
    }

    let mut element = Element::new(W_TBL).with_child(properties).with_child(grid);
    for row in &table.rows {
        element = element.with_child(write_row(row));
    }
    for extra in &table.trailing {
        element = element.with_child(extra.clone());
    }
    element
}

fn write_row(row: &TableRow) -> Element {
    let mut element = Element::new(W_TR);
    if let Some(ref exceptions) = row.exceptions {
        element = element.with_child(exceptions.clone());
    }
    if let Some(ref properties) = row.properties {
        element = element.with_child(properties.clone());
    }
    for cell in &row.cells {
        element = element.with_child(write_cell(cell));
    }
    for extra in &row.trailing {
        element = element.with_child(extra.clone());
    }
    element
}

fn write_cell(cell: &TableCell) -> Element {
    let mut element = Element::new(W_TC);
    if let Some(ref properties) = cell.properties {
        element = element.with_child(properties.clone());
    }
    for block in &cell.content {
        element = element.with_child(write_block(block));
    }
    // A cell must end with a paragraph.
    if !matches!(cell.content.last(), Some(Block::Paragraph(_))) {
        element = element.with_child(Element::new(W_P));
    }
    element
}
