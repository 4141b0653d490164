//! Reading and writing the paragraph styles part.

use crate::model::{Styles, W_RPR};
use crate::xml::{Element, XmlDocument};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Collect the paragraph styles of a `w:styles` root with their own
/// declared font sizes.
pub(crate) fn parse_styles(root: &Element) -> Styles {
    let mut styles = Styles::new();
    for style in root.elements().filter(|e| e.name == "w:style") {
        if style.attr("w:type") != Some("paragraph") {
            continue;
        }
        let Some(id) = style.attr("w:styleId") else {
            log::warn!("Skipping paragraph style without w:styleId");
            continue;
        };

        let size = style
            .child(W_RPR)
            .and_then(|rpr| rpr.child("w:sz"))
            .and_then(|sz| sz.attr("w:val"))
            .and_then(|v| v.parse::<u32>().ok());
        styles.insert_half_points(id.to_string(), size);

        if matches!(style.attr("w:default"), Some("1") | Some("true")) {
            styles.set_default_paragraph(id);
        }
    }

    log::debug!("Parsed {} paragraph styles", styles.iter().count());
    styles
}

/// Serialize a style table as a `w:styles` part.
pub(crate) fn write_styles(styles: &Styles) -> XmlDocument {
    let mut root = Element::new("w:styles").with_attr("xmlns:w", NS_W);
    for (id, size) in styles.iter() {
        let mut style = Element::new("w:style")
            .with_attr("w:type", "paragraph")
            .with_attr("w:styleId", id);
        if styles.default_paragraph() == Some(id) {
            style.set_attr("w:default", "1");
        }
        style = style.with_child(Element::new("w:name").with_attr("w:val", id));
        if let Some(half_points) = size {
            style = style.with_child(
                Element::new(W_RPR)
                    .with_child(Element::new("w:sz").with_attr("w:val", half_points.to_string())),
            );
        }
        root = root.with_child(style);
    }
    XmlDocument::new(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_styles() {
        let xml = r#"<w:styles xmlns:w="urn:w">
            <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:rPr><w:sz w:val="20"/></w:rPr></w:style>
            <w:style w:type="paragraph" w:styleId="Heading1"><w:rPr><w:b/><w:sz w:val="36"/></w:rPr></w:style>
            <w:style w:type="paragraph" w:styleId="Body"/>
            <w:style w:type="character" w:styleId="Strong"><w:rPr><w:sz w:val="24"/></w:rPr></w:style>
        </w:styles>"#;
        let styles = parse_styles(&XmlDocument::parse(xml).unwrap().root);

        assert_eq!(styles.default_paragraph(), Some("Normal"));
        assert_eq!(styles.font_size_half_points(Some("Heading1")), Some(36));
        assert_eq!(styles.font_size_half_points(None), Some(20));
        assert_eq!(styles.font_size_half_points(Some("Body")), None);
        assert_eq!(styles.font_size_half_points(Some("Strong")), None);
    }

    #[test]
    fn test_write_then_parse() {
        let mut styles = Styles::new();
        styles.add_paragraph_style("Normal", Some(10.0));
        styles.add_paragraph_style("Title", Some(18.0));
        styles.set_default_paragraph("Normal");

        let written = write_styles(&styles);
        assert_eq!(parse_styles(&written.root), styles);
    }
}
