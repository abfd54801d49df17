//! Page-level types produced by the paginator.

use serde::{Deserialize, Serialize};

/// Physical page dimensions and margins, in points (1 point = 1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Margin applied on all four sides
    pub margin: f32,
}

impl PageGeometry {
    /// Create a geometry with explicit dimensions.
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// A4 (210 x 297 mm) with 60 pt margins.
    pub fn a4() -> Self {
        Self::new(595.0, 842.0, 60.0)
    }

    /// Width available for text between the side margins.
    pub fn usable_width(&self) -> f32 {
        (self.width - 2.0 * self.margin).max(0.0)
    }

    /// Height available for content between top and bottom margins.
    pub fn usable_height(&self) -> f32 {
        (self.height - 2.0 * self.margin).max(0.0)
    }

    /// Cursor position at the top of a fresh page.
    pub fn top(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// One of the three standard fonts every document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFace {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
    /// Helvetica-Oblique
    Italic,
}

impl FontFace {
    /// All faces, in resource order.
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// Resource name used in content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
        }
    }

    /// Standard Type1 base font name.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Italic => "Helvetica-Oblique",
        }
    }
}

/// A run of text drawn in a single font and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Font face
    pub face: FontFace,
    /// Font size in points
    pub size: f32,
    /// Text to draw
    pub text: String,
}

impl Segment {
    /// Create a new segment.
    pub fn new(face: FontFace, size: f32, text: impl Into<String>) -> Self {
        Self {
            face,
            size,
            text: text.into(),
        }
    }
}

/// A physical line ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutLine {
    /// Segments drawn left to right; one for single-font blocks
    pub segments: Vec<Segment>,
    /// Baseline position measured from the bottom of the page
    pub baseline: f32,
    /// Index of the owning page (0-based)
    pub page: usize,
}

impl LaidOutLine {
    /// Plain text of the line.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Largest font size on the line.
    pub fn font_size(&self) -> f32 {
        self.segments.iter().map(|s| s.size).fold(0.0, f32::max)
    }
}

/// Something placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageItem {
    /// A line of text
    Text(LaidOutLine),

    /// A horizontal rule stroked across the text column
    Rule {
        /// Vertical position of the stroke
        y: f32,
    },
}

/// A single laid-out page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Physical dimensions and margins
    pub geometry: PageGeometry,

    /// Items in drawing order
    pub items: Vec<PageItem>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32, geometry: PageGeometry) -> Self {
        Self {
            number,
            geometry,
            items: Vec::new(),
        }
    }

    /// Add an item to the page.
    pub fn push(&mut self, item: PageItem) {
        self.items.push(item);
    }

    /// Text lines on the page.
    pub fn lines(&self) -> impl Iterator<Item = &LaidOutLine> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Text(line) => Some(line),
            PageItem::Rule { .. } => None,
        })
    }

    /// Get plain text content of the page, one line per row.
    pub fn plain_text(&self) -> String {
        self.lines()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if nothing has been placed on the page.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of items on the page.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_geometry() {
        let g = PageGeometry::a4();
        assert_eq!(g.width, 595.0);
        assert_eq!(g.height, 842.0);
        assert_eq!(g.usable_width(), 475.0);
        assert_eq!(g.top(), 782.0);
    }

    #[test]
    fn test_font_resources() {
        assert_eq!(FontFace::Regular.resource_name(), "F1");
        assert_eq!(FontFace::Italic.base_font(), "Helvetica-Oblique");
        assert_eq!(FontFace::ALL.len(), 3);
    }

    #[test]
    fn test_page_plain_text() {
        let mut page = Page::new(1, PageGeometry::a4());
        assert!(page.is_empty());
        page.push(PageItem::Text(LaidOutLine {
            segments: vec![
                Segment::new(FontFace::Regular, 11.0, "Hello "),
                Segment::new(FontFace::Bold, 11.0, "world"),
            ],
            baseline: 700.0,
            page: 0,
        }));
        page.push(PageItem::Rule { y: 680.0 });
        assert_eq!(page.plain_text(), "Hello world");
        assert_eq!(page.item_count(), 2);
    }
}
