//! Page content streams.

use crate::model::{FontFace, LaidOutLine, Page, PageItem};

use super::encoding::encode_text;

/// Stroke width for horizontal rules.
const RULE_WIDTH: f32 = 0.5;

/// Format a coordinate or size with at most two decimals.
///
/// Trailing zeros and a dangling decimal point are dropped, so `12.0`
/// becomes `12` and `15.40` becomes `15.4`.
pub fn fmt_num(value: f32) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Builds the content stream of one page.
struct ContentBuilder {
    out: Vec<u8>,
    margin: f32,
    right: f32,
    /// Baseline of the previous line while a text object is open
    text_baseline: Option<f32>,
    font: Option<(FontFace, String)>,
}

impl ContentBuilder {
    fn new(page: &Page) -> Self {
        let geometry = page.geometry;
        Self {
            out: Vec::new(),
            margin: geometry.margin,
            right: geometry.width - geometry.margin,
            text_baseline: None,
            font: None,
        }
    }

    /// Append one operator line.
    fn op(&mut self, operator: impl AsRef<str>) {
        self.out.extend_from_slice(operator.as_ref().as_bytes());
        self.out.push(b'\n');
    }

    fn line(&mut self, line: &LaidOutLine) {
        match self.text_baseline {
            Some(previous) => {
                let dy = previous - line.baseline;
                self.op(format!("0 {} Td", fmt_num(-dy)));
            }
            None => {
                self.op("BT");
                self.op(format!("{} {} Td", fmt_num(self.margin), fmt_num(line.baseline)));
            }
        }
        self.text_baseline = Some(line.baseline);

        for segment in &line.segments {
            if segment.text.is_empty() {
                continue;
            }
            let size = fmt_num(segment.size);
            let font = (segment.face, size);
            if self.font.as_ref() != Some(&font) {
                self.op(format!("/{} {} Tf", font.0.resource_name(), font.1));
                self.font = Some(font);
            }
            self.out.push(b'(');
            self.out.extend_from_slice(&encode_text(&segment.text));
            self.out.extend_from_slice(b") Tj\n");
        }
    }

    fn rule(&mut self, y: f32) {
        self.end_text();
        self.op(format!("{} w", fmt_num(RULE_WIDTH)));
        self.op(format!("{} {} m", fmt_num(self.margin), fmt_num(y)));
        self.op(format!("{} {} l", fmt_num(self.right), fmt_num(y)));
        self.op("S");
    }

    fn end_text(&mut self) {
        if self.text_baseline.take().is_some() {
            self.op("ET");
        }
        self.font = None;
    }

    fn finish(mut self) -> Vec<u8> {
        self.end_text();
        self.out
    }
}

/// Render the drawing operators for a page.
pub fn page_content(page: &Page) -> Vec<u8> {
    let mut builder = ContentBuilder::new(page);
    for item in &page.items {
        match item {
            PageItem::Text(line) => builder.line(line),
            PageItem::Rule { y } => builder.rule(*y),
        }
    }
    builder.finish()
}
