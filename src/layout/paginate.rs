//! Pagination: places wrapped lines top-down onto fixed-size pages.

use std::mem;

use crate::model::{
    Block, FontFace, LaidOutLine, Page, PageGeometry, PageItem, Segment, SpanStyle,
};

use super::wrap::{max_chars, wrap, wrap_rich, wrap_with_prefix};
use super::LayoutOptions;

/// Lays out blocks onto pages.
pub struct Paginator {
    options: LayoutOptions,
}

impl Paginator {
    /// Create a new paginator.
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Get the layout options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay out a titled document. Always returns at least one page.
    pub fn paginate(&self, title: &str, blocks: &[Block]) -> Vec<Page> {
        let mut cursor = PageCursor::new(self.options.geometry);

        let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
        if !title.is_empty() {
            let size = self.options.title_size;
            for line in wrap(&title, self.max_chars(size)) {
                cursor.place_line(
                    vec![Segment::new(FontFace::Bold, size, line)],
                    self.options.line_height(size),
                );
            }
            cursor.place_space(self.options.title_spacing);
        }

        for block in blocks {
            self.place_block(&mut cursor, block);
        }

        let pages = cursor.finish();
        log::debug!("Laid out {} blocks on {} pages", blocks.len(), pages.len());
        pages
    }

    fn place_block(&self, cursor: &mut PageCursor, block: &Block) {
        let body = self.options.body_size;
        let body_height = self.options.line_height(body);

        match block {
            Block::Heading { level, text } => {
                let size = self.options.heading_size(*level);
                for line in wrap(text, self.max_chars(size)) {
                    cursor.place_line(
                        vec![Segment::new(FontFace::Bold, size, line)],
                        self.options.line_height(size),
                    );
                }
            }
            Block::UnorderedListItem { text } => {
                for line in wrap_with_prefix(text, "  - ", self.max_chars(body)) {
                    cursor.place_line(vec![Segment::new(FontFace::Regular, body, line)], body_height);
                }
            }
            Block::OrderedListItem { index, text } => {
                let prefix = format!("  {}. ", index);
                for line in wrap_with_prefix(text, &prefix, self.max_chars(body)) {
                    cursor.place_line(vec![Segment::new(FontFace::Regular, body, line)], body_height);
                }
            }
            Block::HorizontalRule => cursor.place_rule(self.options.rule_height),
            Block::BlankSpace { height } => cursor.place_space(*height),
            Block::Paragraph { spans, .. } => {
                for line in wrap_rich(spans, self.max_chars(body)) {
                    let segments = line
                        .into_iter()
                        .map(|span| Segment::new(face_for(span.style), body, span.text))
                        .collect();
                    cursor.place_line(segments, body_height);
                }
            }
        }
    }

    fn max_chars(&self, size: f32) -> usize {
        max_chars(self.options.geometry.usable_width(), size)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

/// Font face used for an inline style.
pub fn face_for(style: SpanStyle) -> FontFace {
    match style {
        SpanStyle::Plain => FontFace::Regular,
        SpanStyle::Bold => FontFace::Bold,
        SpanStyle::Italic => FontFace::Italic,
    }
}

/// Lay out a titled document with default options.
pub fn paginate(title: &str, blocks: &[Block]) -> Vec<Page> {
    Paginator::default().paginate(title, blocks)
}

/// Vertical cursor over the page being filled.
struct PageCursor {
    geometry: PageGeometry,
    done: Vec<Page>,
    current: Page,
    y: f32,
}

impl PageCursor {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            done: Vec::new(),
            current: Page::new(1, geometry),
            y: geometry.top(),
        }
    }

    /// Check if the cursor is still at the top of the current page.
    ///
    /// Spacing moves the cursor without adding items, so an item-free page
    /// is not necessarily unused.
    fn at_top(&self) -> bool {
        self.y >= self.geometry.top()
    }

    /// Make room for an element of the given extent.
    ///
    /// An element taller than a whole page body is placed on the current
    /// page when the cursor has not moved there yet, so it overflows the
    /// bottom margin instead of producing endless empty pages.
    fn reserve(&mut self, extent: f32) {
        if self.y - extent >= self.geometry.margin {
            return;
        }
        if self.at_top() {
            log::warn!(
                "Element of height {:.1} does not fit on page {}, placing it anyway",
                extent,
                self.current.number
            );
            return;
        }
        self.new_page();
    }

    fn new_page(&mut self) {
        let next = Page::new(self.current.number + 1, self.geometry);
        let finished = mem::replace(&mut self.current, next);
        self.done.push(finished);
        self.y = self.geometry.top();
    }

    fn place_line(&mut self, segments: Vec<Segment>, line_height: f32) {
        self.reserve(line_height);
        self.y -= line_height;
        let line = LaidOutLine {
            segments,
            baseline: self.y,
            page: self.done.len(),
        };
        self.current.push(PageItem::Text(line));
    }

    fn place_rule(&mut self, height: f32) {
        self.reserve(height);
        let y = self.y - height / 2.0;
        self.y -= height;
        self.current.push(PageItem::Rule { y });
    }

    /// Spacing that does not fit is dropped rather than opening a page.
    fn place_space(&mut self, height: f32) {
        if self.y - height < self.geometry.margin {
            return;
        }
        self.y -= height;
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.current);
        self.done
    }
}
