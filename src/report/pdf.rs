use super::layout::{text_width, Align, DrawOp, Font, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use super::ReportError;
use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect};
use std::io::BufWriter;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
            Font::Italic => &self.italic,
        }
    }
}

fn fill(layer: &PdfLayerReference, color: Rgb) {
    layer.set_fill_color(Color::Rgb(printpdf::Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    )));
}

/// Renders the draw list onto a single A4 page and returns the PDF bytes.
pub fn render_pdf(title: &str, ops: &[DrawOp]) -> Result<Vec<u8>, ReportError> {
    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?,
    };

    for op in ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                if *width <= 0.0 || *height <= 0.0 {
                    continue;
                }
                fill(&layer, *color);
                let top = PAGE_HEIGHT - y;
                let rect = Rect::new(Mm(*x), Mm(top - height), Mm(x + width), Mm(top))
                    .with_mode(PaintMode::Fill);
                layer.add_rect(rect);
            }
            DrawOp::Text {
                text,
                x,
                y,
                size,
                font,
                color,
                align,
            } => {
                let left = match align {
                    Align::Left => *x,
                    Align::Center => x - text_width(text, *size) / 2.0,
                    Align::Right => x - text_width(text, *size),
                };
                fill(&layer, *color);
                layer.use_text(text.as_str(), *size, Mm(left), Mm(PAGE_HEIGHT - y), fonts.get(*font));
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Pdf(format!("buffer error: {e}")))
}
