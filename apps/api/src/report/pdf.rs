//! `printpdf` backed renderer: Helvetica on US letter with 1" margins.

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::report::font_metrics::HELVETICA;
use crate::report::layout::ReportDocument;
use crate::report::{DocumentRenderer, ReportError};

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 25.4;
const TITLE_SIZE_PT: f32 = 18.0;
const BODY_SIZE_PT: f32 = 12.0;
const LINE_SPACING: f32 = 1.2;
const PT_TO_MM: f32 = 25.4 / 72.0;
const LAYER_NAME: &str = "Layer 1";

pub struct PrintPdfRenderer;

impl DocumentRenderer for PrintPdfRenderer {
    fn render(&self, doc: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let (pdf, page, layer) = PdfDocument::new(
            doc.title.as_str(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            LAYER_NAME,
        );
        let font = pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;

        {
            let mut cursor = PageCursor {
                pdf: &pdf,
                layer: pdf.get_page(page).get_layer(layer),
                font: &font,
                y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
            };

            cursor.write_wrapped(&doc.title, TITLE_SIZE_PT);
            cursor.skip_lines(2, BODY_SIZE_PT);

            for paragraph in &doc.paragraphs {
                for line in &paragraph.lines {
                    cursor.write_wrapped(line, BODY_SIZE_PT);
                }
                cursor.skip_lines(2, BODY_SIZE_PT);
            }
        }

        pdf.save_to_bytes().map_err(|e| ReportError::Pdf(e.to_string()))
    }
}

/// Tracks the baseline position and starts a new page when the bottom margin is reached.
struct PageCursor<'a> {
    pdf: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    font: &'a IndirectFontRef,
    y_mm: f32,
}

impl PageCursor<'_> {
    fn write_wrapped(&mut self, text: &str, size_pt: f32) {
        let text = sanitize_for_builtin_font(text);
        let max_width_em = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / (size_pt * PT_TO_MM);
        for line in HELVETICA.wrap(&text, max_width_em) {
            let line_height = line_height_mm(size_pt);
            if self.y_mm - line_height < MARGIN_MM {
                self.new_page();
            }
            self.y_mm -= line_height;
            self.layer.use_text(line, size_pt, Mm(MARGIN_MM), Mm(self.y_mm), self.font);
        }
    }

    fn skip_lines(&mut self, n: u8, size_pt: f32) {
        self.y_mm -= f32::from(n) * line_height_mm(size_pt);
    }

    fn new_page(&mut self) {
        let (page, layer) = self.pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = self.pdf.get_page(page).get_layer(layer);
        self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }
}

fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * LINE_SPACING * PT_TO_MM
}

/// Maps text onto the printable ASCII range the base-14 fonts encode reliably.
fn sanitize_for_builtin_font(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c,
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '*',
            c if c.is_whitespace() => ' ',
            _ => '?',
        })
        .collect()
}
