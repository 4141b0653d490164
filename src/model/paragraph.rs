//! Paragraph and run types.

use super::properties::{Rgb, PPR_ORDER, RPR_ORDER, W_PPR, W_RPR, W_VAL};
use crate::xml::Element;

/// A paragraph (`w:p`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    /// Paragraph properties (`w:pPr`), kept verbatim
    pub properties: Option<Element>,

    /// Runs, hyperlinks and other inline markup in document order
    pub content: Vec<ParagraphContent>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph holding a single unstyled run.
    pub fn with_text(text: impl AsRef<str>) -> Self {
        let mut p = Self::new();
        p.add_run(Run::new(text));
        p
    }

    /// Set the paragraph style id and return self.
    pub fn styled(mut self, style_id: impl Into<String>) -> Self {
        let properties = self.properties.get_or_insert_with(|| Element::new(W_PPR));
        properties.set_child_ordered(
            Element::new("w:pStyle").with_attr(W_VAL, style_id),
            PPR_ORDER,
        );
        self
    }

    /// Append a run.
    pub fn add_run(&mut self, run: Run) {
        self.content.push(ParagraphContent::Run(run));
    }

    /// Append a hyperlink.
    pub fn add_hyperlink(&mut self, hyperlink: Hyperlink) {
        self.content.push(ParagraphContent::Hyperlink(hyperlink));
    }

    /// The declared paragraph style id (`w:pStyle`).
    pub fn style_id(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.child("w:pStyle"))
            .and_then(|s| s.attr(W_VAL))
    }

    /// Text of every run, including runs inside hyperlinks.
    pub fn text(&self) -> String {
        self.runs().iter().map(|run| run.text()).collect()
    }

    /// Replace the paragraph content with a single unstyled run.
    ///
    /// Styling carried by the previous runs is discarded; paragraph
    /// properties are kept.
    pub fn set_text(&mut self, text: &str) {
        self.content.clear();
        self.add_run(Run::new(text));
    }

    /// Runs in reading order, descending into hyperlinks.
    pub fn runs(&self) -> Vec<&Run> {
        fn collect<'a>(content: &'a [ParagraphContent], out: &mut Vec<&'a Run>) {
            for item in content {
                match item {
                    ParagraphContent::Run(run) => out.push(run),
                    ParagraphContent::Hyperlink(link) => collect(&link.content, out),
                    ParagraphContent::Other(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.content, &mut out);
        out
    }

    /// Mutable runs in reading order, descending into hyperlinks.
    pub fn runs_mut(&mut self) -> Vec<&mut Run> {
        fn collect<'a>(content: &'a mut [ParagraphContent], out: &mut Vec<&'a mut Run>) {
            for item in content {
                match item {
                    ParagraphContent::Run(run) => out.push(run),
                    ParagraphContent::Hyperlink(link) => collect(&mut link.content, out),
                    ParagraphContent::Other(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&mut self.content, &mut out);
        out
    }

    /// The first run in reading order.
    pub fn first_run_mut(&mut self) -> Option<&mut Run> {
        self.runs_mut().into_iter().next()
    }

    /// Hyperlinks directly inside this paragraph.
    pub fn hyperlinks(&self) -> impl Iterator<Item = &Hyperlink> {
        self.content.iter().filter_map(|item| match item {
            ParagraphContent::Hyperlink(link) => Some(link),
            _ => None,
        })
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphContent {
    /// A text run
    Run(Run),
    /// A hyperlink wrapping further inline content
    Hyperlink(Hyperlink),
    /// Markup the model does not interpret (bookmarks, fields, proofing marks)
    Other(Element),
}

/// A hyperlink (`w:hyperlink`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hyperlink {
    /// Hyperlink attributes (`r:id`, `w:anchor`, ...)
    pub attributes: Vec<(String, String)>,

    /// Inline content of the link
    pub content: Vec<ParagraphContent>,
}

impl Hyperlink {
    /// Create a hyperlink to an in-document anchor.
    pub fn to_anchor(anchor: impl Into<String>) -> Self {
        Self {
            attributes: vec![("w:anchor".to_string(), anchor.into())],
            content: Vec::new(),
        }
    }

    /// Append a run and return self.
    pub fn with_run(mut self, run: Run) -> Self {
        self.content.push(ParagraphContent::Run(run));
        self
    }

    /// Runs directly inside the link.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|item| match item {
            ParagraphContent::Run(run) => Some(run),
            _ => None,
        })
    }

    /// Concatenated text of the link's runs.
    pub fn text(&self) -> String {
        self.runs().map(|run| run.text()).collect()
    }
}

/// A run of text with uniform formatting (`w:r`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    /// Run properties (`w:rPr`), kept in schema order
    pub properties: Option<Element>,

    /// Run content
    pub content: Vec<RunContent>,
}

/// Content items of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunContent {
    /// `w:t`
    Text(String),
    /// `w:tab`
    Tab,
    /// Plain line break (`w:br` without a type)
    Break,
    /// Anything else (drawings, field characters, page breaks)
    Other(Element),
}

impl Run {
    /// Create an unstyled run.
    pub fn new(text: impl AsRef<str>) -> Self {
        let mut run = Self::default();
        run.set_text(text.as_ref());
        run
    }

    /// Create a bold run.
    pub fn bold(text: impl AsRef<str>) -> Self {
        let mut run = Self::new(text);
        run.set_bold(Some(true));
        run
    }

    /// Plain text of the run; tabs and breaks map to `\t` and `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for item in &self.content {
            match item {
                RunContent::Text(text) => out.push_str(text),
                RunContent::Tab => out.push('\t'),
                RunContent::Break => out.push('\n'),
                RunContent::Other(_) => {}
            }
        }
        out
    }

    /// Replace the run content with `text`, keeping run properties.
    pub fn set_text(&mut self, text: &str) {
        self.content.clear();
        let mut pending = String::new();
        for ch in text.chars() {
            let marker = match ch {
                '\t' => RunContent::Tab,
                '\n' | '\r' => RunContent::Break,
                _ => {
                    pending.push(ch);
                    continue;
                }
            };
            if !pending.is_empty() {
                self.content
                    .push(RunContent::Text(std::mem::take(&mut pending)));
            }
            self.content.push(marker);
        }
        if !pending.is_empty() {
            self.content.push(RunContent::Text(pending));
        }
    }

    /// Explicit bold flag, `None` when inherited from the style.
    pub fn bold_flag(&self) -> Option<bool> {
        let b = self.property("w:b")?;
        Some(!matches!(b.attr(W_VAL), Some("0") | Some("false")))
    }

    /// Set or clear (inherit) the bold flag.
    pub fn set_bold(&mut self, bold: Option<bool>) {
        match bold {
            Some(true) => self.set_property(Element::new("w:b")),
            Some(false) => self.set_property(Element::new("w:b").with_attr(W_VAL, "0")),
            None => self.remove_property("w:b"),
        }
    }

    /// Explicit font size in points.
    pub fn font_size(&self) -> Option<f32> {
        self.property("w:sz")
            .and_then(|sz| sz.attr(W_VAL))
            .and_then(|v| v.parse::<u32>().ok())
            .map(|half_points| half_points as f32 / 2.0)
    }

    /// Set the font size in points (rounded to half points).
    pub fn set_font_size(&mut self, points: f32) {
        let half_points = (points * 2.0).round().max(1.0) as u32;
        self.set_property(Element::new("w:sz").with_attr(W_VAL, half_points.to_string()));
        self.set_property(Element::new("w:szCs").with_attr(W_VAL, half_points.to_string()));
    }

    /// Explicit font color.
    pub fn color(&self) -> Option<Rgb> {
        self.property("w:color")
            .and_then(|c| c.attr(W_VAL))
            .and_then(Rgb::from_hex)
    }

    /// Set the font color.
    pub fn set_color(&mut self, color: Rgb) {
        self.set_property(Element::new("w:color").with_attr(W_VAL, color.hex()));
    }

    /// Explicit Latin font name.
    pub fn font_name(&self) -> Option<&str> {
        self.property("w:rFonts").and_then(|f| f.attr("w:ascii"))
    }

    /// Set the Latin and complex-script font names.
    pub fn set_font_name(&mut self, name: &str) {
        self.set_property(
            Element::new("w:rFonts")
                .with_attr("w:ascii", name)
                .with_attr("w:hAnsi", name)
                .with_attr("w:cs", name),
        );
    }

    fn property(&self, name: &str) -> Option<&Element> {
        self.properties.as_ref().and_then(|p| p.child(name))
    }

    fn set_property(&mut self, element: Element) {
        self.properties
            .get_or_insert_with(|| Element::new(W_RPR))
            .set_child_ordered(element, RPR_ORDER);
    }

    fn remove_property(&mut self, name: &str) {
        if let Some(ref mut properties) = self.properties {
            properties.remove_child(name);
        }
    }
}
