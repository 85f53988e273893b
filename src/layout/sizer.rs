use crate::text_metrics;

use super::{LayoutError, Size};
use crate::tags::Tag;

/// Text-measurement capability consumed by the sizer. Implementations
/// return None when they cannot size the given text/font combination.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_family: &str, font_size: f32) -> Option<Size>;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn measure(&self, text: &str, font_family: &str, font_size: f32) -> Option<Size> {
        (**self).measure(text, font_family, font_size)
    }
}

/// Calibrated per-character approximation. Needs no font access, never
/// fails, and is fully deterministic across machines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMeasure;

// Width classes calibrated against common sans-serif faces at 16px.
fn char_width_factor(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | '\'' | '!' | '.' | ',' | ':' | ';' | '|' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' => 0.36,
        ' ' => 0.31,
        'm' | 'w' | 'M' | 'W' | '@' => 0.88,
        'A'..='Z' | '0'..='9' => 0.66,
        _ => 0.55,
    }
}

const APPROX_LINE_HEIGHT: f32 = 1.2;

impl TextMeasure for ApproxMeasure {
    fn measure(&self, text: &str, _font_family: &str, font_size: f32) -> Option<Size> {
        if font_size <= 0.0 {
            return None;
        }
        let width: f32 = text.chars().map(char_width_factor).sum::<f32>() * font_size;
        Some(Size::new(width, font_size * APPROX_LINE_HEIGHT))
    }
}

/// System-font measurer backed by fontdb/ttf-parser. With `fallback` set,
/// a missing face degrades to the approximate measurer instead of failing,
/// so clouds still render on hosts without usable fonts.
#[derive(Debug, Clone, Copy)]
pub struct FontMeasure {
    pub fallback: bool,
}

impl Default for FontMeasure {
    fn default() -> Self {
        Self { fallback: true }
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&self, text: &str, font_family: &str, font_size: f32) -> Option<Size> {
        match text_metrics::measure_text(text, font_size, font_family) {
            Some((width, height)) => Some(Size::new(width, height)),
            None if self.fallback => ApproxMeasure.measure(text, font_family, font_size),
            None => None,
        }
    }
}

/// The font size a tag of the given weight renders at.
pub fn font_size_for_weight(weight: f32, min_font_size: f32, max_font_size: f32) -> f32 {
    min_font_size + weight * (max_font_size - min_font_size)
}

/// Maps tags to rectangle sizes: scales the font by weight, measures the
/// text through the injected capability, and pads the result so neighbors
/// are not rendered edge-to-edge.
pub struct TagSizer<M> {
    measure: M,
    font_family: String,
    min_font_size: f32,
    max_font_size: f32,
    margin: f32,
}

impl<M: TextMeasure> TagSizer<M> {
    pub fn new(
        measure: M,
        font_family: &str,
        min_font_size: f32,
        max_font_size: f32,
        margin: f32,
    ) -> Self {
        Self {
            measure,
            font_family: font_family.to_string(),
            min_font_size,
            max_font_size,
            margin,
        }
    }

    pub fn size_tag(&self, tag: &Tag) -> Result<Size, LayoutError> {
        let font_size = font_size_for_weight(tag.weight, self.min_font_size, self.max_font_size);
        let measured = self
            .measure
            .measure(&tag.text, &self.font_family, font_size)
            .ok_or_else(|| LayoutError::MeasurementUnavailable {
                text: tag.text.clone(),
                font_family: self.font_family.clone(),
            })?;
        Ok(Size::new(
            measured.width.max(1.0) + self.margin * 2.0,
            measured.height.max(1.0) + self.margin * 2.0,
        ))
    }
}
