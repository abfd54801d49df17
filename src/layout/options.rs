//! Layout options and configuration.

use crate::model::PageGeometry;

/// Options controlling how blocks are laid out on pages.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Page dimensions and margins
    pub geometry: PageGeometry,

    /// Body text size in points
    pub body_size: f32,

    /// Heading sizes for levels 1, 2 and 3
    pub heading_sizes: [f32; 3],

    /// Title size in points
    pub title_size: f32,

    /// Space between the title and the body
    pub title_spacing: f32,

    /// Line height as a multiple of the font size
    pub line_spacing: f32,

    /// Vertical extent of a horizontal rule
    pub rule_height: f32,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the body text size.
    pub fn with_body_size(mut self, size: f32) -> Self {
        self.body_size = size;
        self
    }

    /// Set the heading sizes (levels 1-3).
    pub fn with_heading_sizes(mut self, sizes: [f32; 3]) -> Self {
        self.heading_sizes = sizes;
        self
    }

    /// Set the title size.
    pub fn with_title_size(mut self, size: f32) -> Self {
        self.title_size = size;
        self
    }

    /// Set the line spacing multiplier.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Font size for a heading level.
    pub fn heading_size(&self, level: u8) -> f32 {
        let idx = (level.clamp(1, 3) - 1) as usize;
        self.heading_sizes[idx]
    }

    /// Line height for a font size.
    pub fn line_height(&self, size: f32) -> f32 {
        size * self.line_spacing
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            body_size: 11.0,
            heading_sizes: [20.0, 16.0, 13.0],
            title_size: 28.0,
            title_spacing: 12.0,
            line_spacing: 1.4,
            rule_height: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_options_builder() {
        let options = LayoutOptions::new()
            .with_body_size(12.0)
            .with_line_spacing(1.5)
            .with_heading_sizes([24.0, 18.0, 14.0]);

        assert_eq!(options.body_size, 12.0);
        assert_eq!(options.line_height(10.0), 15.0);
        assert_eq!(options.heading_size(2), 18.0);
    }

    #[test]
    fn test_default_options() {
        let options = LayoutOptions::default();
        assert_eq!(options.title_size, 28.0);
        assert_eq!(options.title_spacing, 12.0);
        assert_eq!(options.rule_height, 16.0);
        assert_eq!(options.geometry, PageGeometry::a4());
        // Out-of-range levels clamp
        assert_eq!(options.heading_size(0), 20.0);
        assert_eq!(options.heading_size(9), 13.0);
    }
}
