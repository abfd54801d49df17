//! PDF 1.4 serializer.
//!
//! Object numbers are planned up front: catalog, page tree, the three
//! standard fonts, then a content stream and page object per page, and
//! finally the optional information dictionary. Every body is rendered
//! from that complete plan, so references never need patching.

use std::fmt;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::Result;
use crate::model::{FontFace, Page};

use super::content::{fmt_num, page_content};
use super::encoding::encode_text;
use super::PdfOptions;

/// File header.
const HEADER: &[u8] = b"%PDF-1.4\n";

/// Comment marking the file as binary, written when streams are compressed.
const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3\n";

/// An indirect object number (generation is always 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

/// Object numbers of one page.
#[derive(Debug, Clone, Copy)]
struct PageIds {
    content: ObjectId,
    page: ObjectId,
}

/// Object numbers for a whole document, allocated before any body exists.
#[derive(Debug, Clone)]
struct ObjectPlan {
    catalog: ObjectId,
    pages: ObjectId,
    fonts: [ObjectId; 3],
    page_ids: Vec<PageIds>,
    info: Option<ObjectId>,
    count: u32,
}

impl ObjectPlan {
    fn allocate(page_count: usize, with_info: bool) -> Self {
        let mut next = 0u32;
        let mut alloc = || {
            next += 1;
            ObjectId(next)
        };

        let catalog = alloc();
        let pages = alloc();
        let fonts = [alloc(), alloc(), alloc()];
        let page_ids = (0..page_count)
            .map(|_| {
                let content = alloc();
                let page = alloc();
                PageIds { content, page }
            })
            .collect();
        let info = if with_info { Some(alloc()) } else { None };

        Self {
            catalog,
            pages,
            fonts,
            page_ids,
            info,
            count: next,
        }
    }

    fn font_resources(&self) -> String {
        FontFace::ALL
            .iter()
            .zip(&self.fonts)
            .map(|(face, id)| format!("/{} {}", face.resource_name(), id))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A rendered indirect object.
#[derive(Debug, Clone)]
pub struct PdfObject {
    /// Object number
    pub id: ObjectId,
    /// Body between `obj` and `endobj`
    pub body: Vec<u8>,
}

impl PdfObject {
    fn new(id: ObjectId, body: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            body: body.into(),
        }
    }
}

/// Serializes laid-out pages into a PDF file.
pub struct PdfWriter {
    options: PdfOptions,
}

impl PdfWriter {
    /// Create a writer with the given options.
    pub fn new(options: PdfOptions) -> Self {
        Self { options }
    }

    /// Get the writer options.
    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    /// Serialize pages into a complete PDF document.
    pub fn serialize(&self, pages: &[Page], title: &str) -> Result<Vec<u8>> {
        let plan = ObjectPlan::allocate(pages.len(), self.options.include_info);
        let objects = self.render_objects(&plan, pages, title)?;
        let bytes = self.assemble(&plan, &objects);
        log::debug!(
            "Serialized {} pages into {} objects ({} bytes)",
            pages.len(),
            objects.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn render_objects(
        &self,
        plan: &ObjectPlan,
        pages: &[Page],
        title: &str,
    ) -> Result<Vec<PdfObject>> {
        let mut objects = Vec::with_capacity(plan.count as usize);

        objects.push(PdfObject::new(
            plan.catalog,
            format!("<< /Type /Catalog /Pages {} >>", plan.pages),
        ));

        let kids = plan
            .page_ids
            .iter()
            .map(|ids| ids.page.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        objects.push(PdfObject::new(
            plan.pages,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids,
                plan.page_ids.len()
            ),
        ));

        for (face, id) in FontFace::ALL.iter().zip(&plan.fonts) {
            objects.push(PdfObject::new(
                *id,
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    face.base_font()
                ),
            ));
        }

        let resources = plan.font_resources();
        for (page, ids) in pages.iter().zip(&plan.page_ids) {
            objects.push(PdfObject::new(ids.content, self.content_stream(page)?));
            objects.push(PdfObject::new(
                ids.page,
                format!(
                    "<< /Type /Page /Parent {} /MediaBox [0 0 {} {}] \
                     /Resources << /Font << {} >> >> /Contents {} >>",
                    plan.pages,
                    fmt_num(page.geometry.width),
                    fmt_num(page.geometry.height),
                    resources,
                    ids.content
                ),
            ));
        }

        if let Some(info) = plan.info {
            let mut body = b"<< /Title (".to_vec();
            body.extend_from_slice(&encode_text(title));
            body.extend_from_slice(b") /Producer (");
            body.extend_from_slice(&encode_text(&self.options.producer));
            body.extend_from_slice(b") >>");
            objects.push(PdfObject::new(info, body));
        }

        Ok(objects)
    }

    fn content_stream(&self, page: &Page) -> Result<Vec<u8>> {
        let content = page_content(page);

        let (data, filter) = if self.options.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&content)?;
            (encoder.finish()?, " /Filter /FlateDecode")
        } else {
            (content, "")
        };

        let mut body = format!("<< /Length {}{} >>\nstream\n", data.len(), filter).into_bytes();
        body.extend_from_slice(&data);
        body.extend_from_slice(b"\nendstream");
        Ok(body)
    }

    fn assemble(&self, plan: &ObjectPlan, objects: &[PdfObject]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(HEADER);
        if self.options.compress {
            out.extend_from_slice(BINARY_MARKER);
        }

        let mut offsets = Vec::with_capacity(objects.len());
        for object in objects {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", object.id.0).as_bytes());
            out.extend_from_slice(&object.body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        let size = offsets.len() + 1;
        out.extend_from_slice(format!("xref\n0 {}\n", size).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }

        let info = plan
            .info
            .map(|id| format!(" /Info {}", id))
            .unwrap_or_default();
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {}{} >>\nstartxref\n{}\n%%EOF\n",
                size, plan.catalog, info, xref_offset
            )
            .as_bytes(),
        );

        out
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new(PdfOptions::default())
    }
}

/// Serialize pages with default options.
pub fn serialize(pages: &[Page], title: &str) -> Result<Vec<u8>> {
    PdfWriter::default().serialize(pages, title)
}
