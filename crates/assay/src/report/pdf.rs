//! Paginated PDF output.

use std::path::Path;

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use super::layout::{Align, Block, ReportLayout};
use crate::error::{AssayError, Result};

/// Points per millimetre.
const MM: f32 = 72.0 / 25.4;

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Page size, margins and type metrics, all in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Distance from the page bottom at which a new page starts.
    pub break_margin: f32,
    pub line_height: f32,
    /// Width of the cell each line is placed in, starting at the left margin.
    pub cell_width: f32,
    pub font_size: f32,
    /// Inner padding between the margin and the start of text.
    pub padding: f32,
}

impl PageGeometry {
    /// A4 portrait, 10 mm margins and line pitch, 12 pt Helvetica.
    pub fn a4() -> Self {
        Self {
            width: 210.0 * MM,
            height: 297.0 * MM,
            margin: 10.0 * MM,
            break_margin: 20.0 * MM,
            line_height: 10.0 * MM,
            cell_width: 200.0 * MM,
            font_size: 12.0,
            padding: 1.0 * MM,
        }
    }

    /// Lines that fit on one page.
    pub fn lines_per_page(&self) -> usize {
        ((self.height - self.break_margin - self.margin) / self.line_height).floor() as usize
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Encode text for a WinAnsi-encoded standard font.
///
/// Latin-1 characters map to their own byte; anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ (0x20..=0x7e | 0xa0..=0xff) => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Rendered width of encoded text at a font size.
fn text_width(encoded: &[u8], font_size: f32) -> f32 {
    let units: u32 = encoded
        .iter()
        .map(|&b| match b {
            0x20..=0x7e => u32::from(HELVETICA_WIDTHS[usize::from(b - 0x20)]),
            _ => 556,
        })
        .sum();
    units as f32 * font_size / 1000.0
}

/// Writes a [`ReportLayout`] as a PDF document.
pub struct PdfWriter {
    geometry: PageGeometry,
    title: String,
}

impl PdfWriter {
    /// Create a writer with A4 geometry.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_geometry(title, PageGeometry::a4())
    }

    pub fn with_geometry(title: impl Into<String>, geometry: PageGeometry) -> Self {
        Self {
            geometry,
            title: title.into(),
        }
    }

    /// Split the layout into per-page text operations.
    ///
    /// A page ends when the next line would cross the break margin; gaps
    /// advance the cursor without starting a page on their own.
    pub fn paginate(&self, layout: &ReportLayout) -> Vec<Vec<Operation>> {
        let g = &self.geometry;
        let mut pages: Vec<Vec<Operation>> = vec![Vec::new()];
        let mut top = g.margin;

        for block in layout.blocks() {
            match block {
                Block::Gap => top += g.line_height,
                Block::Line { text, align } => {
                    if top + g.line_height > g.height - g.break_margin {
                        pages.push(Vec::new());
                        top = g.margin;
                    }

                    let encoded = encode_win_ansi(text);
                    let x = match align {
                        Align::Left => g.margin + g.padding,
                        Align::Center => {
                            g.margin + (g.cell_width - text_width(&encoded, g.font_size)) / 2.0
                        }
                    };
                    // Baseline sits a little below the middle of the line box
                    let baseline = top + g.line_height / 2.0 + 0.3 * g.font_size;

                    if let Some(page) = pages.last_mut() {
                        page.extend([
                            Operation::new("BT", vec![]),
                            Operation::new("Tf", vec!["F1".into(), g.font_size.into()]),
                            Operation::new("Td", vec![x.into(), (g.height - baseline).into()]),
                            Operation::new("Tj", vec![Object::string_literal(encoded)]),
                            Operation::new("ET", vec![]),
                        ]);
                    }
                    top += g.line_height;
                }
            }
        }

        pages
    }

    /// Write the layout to `path`, returning the number of pages.
    pub fn write(&self, layout: &ReportLayout, path: &Path) -> Result<usize> {
        let mut doc = self.build_document(layout)?;
        let page_count = doc.get_pages().len();

        doc.save(path).map_err(|e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(page_count)
    }

    fn build_document(&self, layout: &ReportLayout) -> Result<Document> {
        let g = &self.geometry;
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut page_ids: Vec<ObjectId> = Vec::new();
        for operations in self.paginate(layout) {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            page_ids.push(page_id);
        }

        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            g.width.into(),
            g.height.into(),
        ];
        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => page_ids.len() as i64,
            "Kids" => page_ids.into_iter().map(Object::Reference).collect::<Vec<Object>>(),
            "Resources" => resources_id,
            "MediaBox" => media_box,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(encode_win_ansi(&self.title)),
            "Producer" => Object::string_literal(concat!("assay ", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::StatisticsSummary;
    use crate::validation::ValidationReport;

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("abc"), b"abc".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("a→b"), b"a?b".to_vec());
    }

    #[test]
    fn test_text_width() {
        // "Hi" = H(722) + i(222)
        assert!((text_width(b"Hi", 10.0) - 9.44).abs() < 1e-4);
    }

    #[test]
    fn test_small_report_fits_one_page() {
        let layout = ReportLayout::build(
            "Data Validation Report",
            &ValidationReport::new(),
            &StatisticsSummary::new(),
        );
        let pages = PdfWriter::new("Data Validation Report").paginate(&layout);

        assert_eq!(pages.len(), 1);
        // Seven lines of five operations each
        assert_eq!(pages[0].len(), 7 * 5);
    }

    #[test]
    fn test_title_centered_in_line_cell() {
        let layout = ReportLayout::build("Hi", &ValidationReport::new(), &StatisticsSummary::new());
        let pages = PdfWriter::new("Hi").paginate(&layout);

        // "Hi" is 11.328pt wide at 12pt; the cell spans 200mm from the margin
        let expected = 10.0 * MM + (200.0 * MM - 11.328) / 2.0;
        match pages[0][2].operands.first() {
            Some(Object::Real(x)) => assert!((*x - expected).abs() < 1e-3),
            other => panic!("unexpected Td operand: {:?}", other),
        }
    }

    #[test]
    fn test_overflow_starts_new_page() {
        let mut report = ValidationReport::new();
        for i in 0..60 {
            report.missing_values.insert(format!("col_{}", i), 1);
        }
        let layout = ReportLayout::build("Report", &report, &StatisticsSummary::new());
        let writer = PdfWriter::new("Report");
        let per_page = PageGeometry::a4().lines_per_page();

        let pages = writer.paginate(&layout);
        let line_count = layout.lines().count();

        assert!(pages.len() >= line_count.div_ceil(per_page));
        assert!(pages.len() > 1);
    }
}
