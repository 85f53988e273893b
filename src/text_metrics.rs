use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Measure `text` rendered single-line at `font_size`, returning
/// `(width, height)` in the same units as the font size. Returns None when
/// no face matching `font_family` can be resolved from the system fonts.
pub fn measure_text(text: &str, font_size: f32, font_family: &str) -> Option<(f32, f32)> {
    if font_size <= 0.0 {
        return None;
    }
    if text.is_empty() {
        return Some((0.0, 0.0));
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<LoadedFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<(f32, f32)> {
        let key = family_key(font_family);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get(&key).and_then(|face| face.as_ref())?;
        Some(face.measure(text, font_size))
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let parts: Vec<String> = font_family
            .split(',')
            .map(|part| {
                part.trim()
                    .trim_matches('"')
                    .trim_matches('\'')
                    .to_string()
            })
            .filter(|part| !part.is_empty())
            .collect();
        let families: Vec<Family<'_>> = if parts.is_empty() {
            vec![Family::SansSerif]
        } else {
            parts
                .iter()
                .map(|part| match part.to_ascii_lowercase().as_str() {
                    "serif" => Family::Serif,
                    "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                        Family::SansSerif
                    }
                    "monospace" | "ui-monospace" => Family::Monospace,
                    "cursive" => Family::Cursive,
                    "fantasy" => Family::Fantasy,
                    _ => Family::Name(part.as_str()),
                })
                .collect()
        };

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let mut loaded: Option<LoadedFace> = None;
        self.db.with_face_data(id, |data, index| {
            loaded = LoadedFace::from_bytes(data.to_vec(), index);
        });
        loaded
    }
}

struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    // Advance units for the printable ASCII range, resolved once at load.
    ascii_advances: [u16; 128],
}

impl LoadedFace {
    fn from_bytes(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let ascender = face.ascender();
        let descender = face.descender();
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        drop(face);
        Some(Self {
            data,
            index,
            units_per_em,
            ascender,
            descender,
            ascii_advances,
        })
    }

    fn measure(&self, text: &str, font_size: f32) -> (f32, f32) {
        let scale = font_size / self.units_per_em as f32;
        let missing_glyph = font_size * 0.56;
        let height = (self.ascender as f32 - self.descender as f32) * scale;

        if text.is_ascii() {
            let mut width = 0.0_f32;
            for byte in text.as_bytes() {
                if *byte == b'\n' {
                    continue;
                }
                let advance = self.ascii_advances[*byte as usize];
                if advance == 0 {
                    width += missing_glyph;
                } else {
                    width += advance as f32 * scale;
                }
            }
            return (width.max(0.0), height);
        }

        // Non-ASCII input is rare for tag text; re-parsing the face here
        // keeps the cache free of self-referential borrows.
        let Ok(face) = Face::parse(&self.data, self.index) else {
            return (text.chars().count() as f32 * missing_glyph, height);
        };
        let mut width = 0.0_f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = face
                .glyph_index(ch)
                .and_then(|glyph| face.glyph_hor_advance(glyph));
            match advance {
                Some(units) => width += units as f32 * scale,
                None => width += missing_glyph,
            }
        }
        (width.max(0.0), height)
    }
}

fn family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
