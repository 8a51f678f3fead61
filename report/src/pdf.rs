//! printpdf backend: turns laid-out pages into PDF bytes.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

use crate::document::ReportDocument;
use crate::errors::RenderError;
use crate::layout::{PAGE_HEIGHT, PAGE_WIDTH, Page, Primitive, layout};

const LAYER_NAME: &str = "Layer 1";
const RULE_THICKNESS: f32 = 0.75;

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// Renders the document into an in-memory PDF.
pub fn render_pdf(document: &ReportDocument) -> Result<Vec<u8>, RenderError> {
    let pages = layout(document);

    let (doc, first_page, first_layer) = PdfDocument::new(
        document.title.as_str(),
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        LAYER_NAME,
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), LAYER_NAME);
            doc.get_page(p).get_layer(l)
        };
        draw_page(&layer, page, &regular, &bold);
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)?;
    writer
        .into_inner()
        .map_err(|e| RenderError::Io(e.into_error()))
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &Page,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    layer.set_outline_thickness(RULE_THICKNESS);

    for item in &page.items {
        match item {
            Primitive::Text {
                x,
                y,
                size,
                bold: is_bold,
                text,
            } => {
                let font = if *is_bold { bold } else { regular };
                layer.use_text(text.as_str(), *size, mm(*x), mm(*y), font);
            }
            Primitive::Rule { from, to } => {
                layer.add_line(Line {
                    points: vec![
                        (Point::new(mm(from.0), mm(from.1)), false),
                        (Point::new(mm(to.0), mm(to.1)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}
