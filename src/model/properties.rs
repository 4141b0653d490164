//! WordprocessingML property names, schema orders and colors.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub(crate) const W_RPR: &str = "w:rPr";
pub(crate) const W_PPR: &str = "w:pPr";
pub(crate) const W_TCPR: &str = "w:tcPr";
pub(crate) const W_TBLPR: &str = "w:tblPr";
pub(crate) const W_VAL: &str = "w:val";

/// Child order of `w:rPr` (ECMA-376 CT_RPr).
pub(crate) const RPR_ORDER: &[&str] = &[
    "w:rStyle",
    "w:rFonts",
    "w:b",
    "w:bCs",
    "w:i",
    "w:iCs",
    "w:caps",
    "w:smallCaps",
    "w:strike",
    "w:dstrike",
    "w:outline",
    "w:shadow",
    "w:emboss",
    "w:imprint",
    "w:noProof",
    "w:snapToGrid",
    "w:vanish",
    "w:webHidden",
    "w:color",
    "w:spacing",
    "w:w",
    "w:kern",
    "w:position",
    "w:sz",
    "w:szCs",
    "w:highlight",
    "w:u",
    "w:effect",
    "w:bdr",
    "w:shd",
    "w:fitText",
    "w:vertAlign",
    "w:rtl",
    "w:cs",
    "w:em",
    "w:lang",
    "w:eastAsianLayout",
    "w:specVanish",
    "w:oMath",
];

/// Child order of `w:pPr` up to the elements this crate writes.
pub(crate) const PPR_ORDER: &[&str] = &["w:pStyle", "w:keepNext", "w:keepLines"];

/// Child order of `w:tcPr`.
pub(crate) const TCPR_ORDER: &[&str] = &[
    "w:cnfStyle",
    "w:tcW",
    "w:gridSpan",
    "w:hMerge",
    "w:vMerge",
    "w:tcBorders",
    "w:shd",
    "w:noWrap",
    "w:tcMar",
    "w:textDirection",
    "w:tcFitText",
    "w:vAlign",
    "w:hideMark",
];

/// Child order of `w:tblPr`.
pub(crate) const TBLPR_ORDER: &[&str] = &[
    "w:tblStyle",
    "w:tblpPr",
    "w:tblOverlap",
    "w:bidiVisual",
    "w:tblStyleRowBandSize",
    "w:tblStyleColBandSize",
    "w:tblW",
    "w:jc",
    "w:tblCellSpacing",
    "w:tblInd",
    "w:tblBorders",
    "w:shd",
    "w:tblLayout",
    "w:tblCellMar",
    "w:tblLook",
];

/// Child order of `w:tcBorders`.
pub(crate) const TCBORDERS_ORDER: &[&str] = &[
    "w:top", "w:left", "w:start", "w:bottom", "w:right", "w:end", "w:insideH", "w:insideV",
    "w:tl2br", "w:tr2bl",
];

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);

    /// Pure black.
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

    /// Parse a hex color such as `4F2D7F` or `#4f2d7f`.
    ///
    /// Five-digit values are accepted and left-padded, since report
    /// templates often carry `00000` for black.
    pub fn from_hex(value: &str) -> Option<Rgb> {
        let value = value.trim().trim_start_matches('#');
        if value.is_empty() || value.len() > 6 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let padded = format!("{:0>6}", value);
        let r = u8::from_str_radix(&padded[0..2], 16).ok()?;
        let g = u8::from_str_radix(&padded[2..4], 16).ok()?;
        let b = u8::from_str_radix(&padded[4..6], 16).ok()?;
        Some(Rgb(r, g, b))
    }

    /// Uppercase hex representation used in markup (`RRGGBB`).
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RgbRepr {
    Triple([u8; 3]),
    Hex(String),
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RgbRepr::deserialize(deserializer)? {
            RgbRepr::Triple([r, g, b]) => Ok(Rgb(r, g, b)),
            RgbRepr::Hex(value) => Rgb::from_hex(&value)
                .ok_or_else(|| D::Error::custom(format!("invalid color '{}'", value))),
        }
    }
}

/// A side of a table cell border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    /// Top edge
    Top,
    /// Left edge
    Left,
    /// Bottom edge
    Bottom,
    /// Right edge
    Right,
}

impl BorderSide {
    /// All four sides in schema order.
    pub const ALL: [BorderSide; 4] = [
        BorderSide::Top,
        BorderSide::Left,
        BorderSide::Bottom,
        BorderSide::Right,
    ];

    pub(crate) fn element_name(self) -> &'static str {
        match self {
            BorderSide::Top => "w:top",
            BorderSide::Left => "w:left",
            BorderSide::Bottom => "w:bottom",
            BorderSide::Right => "w:right",
        }
    }
}

/// How one border side is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// No border (`w:val="nil"`)
    Nil,
    /// A single line; `size` is in eighths of a point
    Single {
        /// Line width in eighths of a point
        size: u32,
        /// Line color
        color: Rgb,
    },
}
