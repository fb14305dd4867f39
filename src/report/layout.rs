//! Page layout for the assessment report.
//!
//! Coordinates are millimetres from the top-left corner of an A4 page and
//! text `y` is the baseline. The PDF backend flips them.

use super::source::ReportSource;
use crate::risk::{classify, RiskCategory};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 10.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const PT_TO_MM: f32 = 0.352_78;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

pub const HEADER_BLUE: Rgb = Rgb(41, 128, 185);
pub const HIGH_RED: Rgb = Rgb(220, 53, 69);
pub const MODERATE_YELLOW: Rgb = Rgb(255, 193, 7);
pub const LOW_GREEN: Rgb = Rgb(40, 167, 69);
pub const BAR_GREY: Rgb = Rgb(230, 230, 230);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);

pub const DISCLAIMER: [&str; 2] = [
    "Disclaimer: This assessment is for informational purposes only and is not a substitute for professional medical advice.",
    "Always consult with a qualified healthcare provider regarding any medical condition.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        color: Rgb,
        align: Align,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Saved to disk; adds the comparison bar and a timestamp.
    Download,
    /// Attached to an email.
    Email,
}

/// Per-document values that are not read from the view.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMeta {
    pub title: String,
    pub date: String,
    pub report_id: u32,
    pub generated_on: String,
}

pub fn category_color(category: RiskCategory) -> Rgb {
    match category {
        RiskCategory::High => HIGH_RED,
        RiskCategory::Moderate => MODERATE_YELLOW,
        RiskCategory::Low => LOW_GREEN,
    }
}

pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * AVG_GLYPH_WIDTH
}

pub fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * LINE_HEIGHT_FACTOR
}

/// Greedy word wrap. A single word wider than the line gets its own line.
pub fn wrap_text(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width(&candidate, size) > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

struct Canvas {
    ops: Vec<DrawOp>,
}

impl Canvas {
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, font: Font, color: Rgb, align: Align) {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            x,
            y,
            size,
            font,
            color,
            align,
        });
    }

    fn left(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, font: Font) {
        self.text(text, x, y, size, font, BLACK, Align::Left);
    }
}

pub fn layout(source: &ReportSource, meta: &ReportMeta, variant: Variant) -> Vec<DrawOp> {
    let mut c = Canvas { ops: Vec::new() };
    let center = PAGE_WIDTH / 2.0;

    c.rect(0.0, 0.0, PAGE_WIDTH, 15.0, HEADER_BLUE);
    c.text(&meta.title, center, 10.0, 14.0, Font::Bold, WHITE, Align::Center);

    c.left(
        format!("Date: {} | Report ID: HD-{}", meta.date, meta.report_id),
        MARGIN,
        22.0,
        9.0,
        Font::Regular,
    );

    c.left("Patient Information", MARGIN, 30.0, 11.0, Font::Bold);
    c.left(
        format!(
            "ID: {} | Age: {} | Gender: {}",
            source.patient_id, source.age, source.gender
        ),
        MARGIN,
        36.0,
        9.0,
        Font::Regular,
    );

    c.left("Assessment Result", MARGIN, 44.0, 11.0, Font::Bold);
    let banner = if source.is_high_risk() { HIGH_RED } else { LOW_GREEN };
    c.rect(MARGIN, 47.0, CONTENT_WIDTH, 12.0, banner);
    c.text(
        format!("{} | {}", source.message, source.probability_text),
        center,
        54.0,
        10.0,
        Font::Bold,
        WHITE,
        Align::Center,
    );

    let mut y = 65.0;
    for line in wrap_text(&source.interpretation, 10.0, CONTENT_WIDTH) {
        c.left(line, MARGIN, y, 10.0, Font::Regular);
        y += line_height(10.0);
    }

    let mut y = f32::max(85.0, y + 6.0);
    c.left("Key Contributing Factors", MARGIN, y, 11.0, Font::Bold);
    y += 6.0;
    let count = source.factors.len();
    for (index, factor) in source.factors.iter().enumerate() {
        c.left(
            format!("• {}: {}", factor.name, factor.description),
            MARGIN,
            y,
            9.0,
            Font::Regular,
        );
        y += 5.0;
        if (index + 1) % 3 == 0 || index + 1 == count {
            y += 2.0;
        }
    }

    y += 3.0;
    c.left("Recommendations", MARGIN, y, 11.0, Font::Bold);
    y += 6.0;
    for (heading, items) in [
        ("Lifestyle:", &source.lifestyle),
        ("Monitoring:", &source.monitoring),
        ("Medical:", &source.medical),
    ] {
        if items.is_empty() {
            continue;
        }
        c.left(heading, MARGIN, y, 9.0, Font::Bold);
        y += 5.0;
        for item in items {
            c.left(format!("• {}", item), MARGIN + 3.0, y, 9.0, Font::Regular);
            y += 5.0;
        }
    }

    if variant == Variant::Download {
        y += 5.0;
        c.left("Risk Comparison", MARGIN, y, 9.0, Font::Bold);
        y += 6.0;

        let bar_height = 8.0;
        c.rect(MARGIN, y, CONTENT_WIDTH, bar_height, BAR_GREY);
        let percent = source.risk_percentage().unwrap_or(0.0).clamp(0.0, 100.0);
        let fill = category_color(classify(percent as f64 / 100.0));
        c.rect(MARGIN, y, (percent as f32 / 100.0) * CONTENT_WIDTH, bar_height, fill);

        y += bar_height + 5.0;
        c.left("0%", MARGIN, y, 7.0, Font::Regular);
        c.text("50%", MARGIN + CONTENT_WIDTH / 2.0, y, 7.0, Font::Regular, BLACK, Align::Center);
        c.text("100%", MARGIN + CONTENT_WIDTH, y, 7.0, Font::Regular, BLACK, Align::Right);
    }

    let mut y = PAGE_HEIGHT - 15.0;
    for line in DISCLAIMER {
        c.text(line, center, y, 7.0, Font::Italic, BLACK, Align::Center);
        y += 4.0;
    }
    if variant == Variant::Download {
        c.text(
            format!("Generated on: {}", meta.generated_on),
            center,
            y,
            7.0,
            Font::Italic,
            BLACK,
            Align::Center,
        );
    }

    c.ops
}
