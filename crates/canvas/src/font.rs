//! Embedded font faces and family resolution.
//!
//! The canvas ships its own faces so rendering is identical on every host:
//! DejaVu Serif (regular, bold, italic, bold italic), DejaVu Sans (regular,
//! bold) and DejaVu Sans Mono (regular, bold). Faces are parsed once per
//! process and shared by every canvas.

use once_cell::sync::Lazy;
use rusttype::{point, Font, Scale};

const SERIF: &[u8] = include_bytes!("../assets/DejaVuSerif.ttf");
const SERIF_BOLD: &[u8] = include_bytes!("../assets/DejaVuSerif-Bold.ttf");
const SERIF_ITALIC: &[u8] = include_bytes!("../assets/DejaVuSerif-Italic.ttf");
const SERIF_BOLD_ITALIC: &[u8] = include_bytes!("../assets/DejaVuSerif-BoldItalic.ttf");
const SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const SANS_BOLD: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");
const MONO: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");
const MONO_BOLD: &[u8] = include_bytes!("../assets/DejaVuSansMono-Bold.ttf");

/// Generic font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    Serif,
    #[default]
    SansSerif,
    Monospace,
}

impl FontFamily {
    /// Resolve a family name. Unknown names fall back to sans-serif.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "serif" => FontFamily::Serif,
            "monospace" | "mono" => FontFamily::Monospace,
            _ => FontFamily::SansSerif,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// A requested face: family, slant and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontFace {
    pub family: FontFamily,
    pub slant: FontSlant,
    pub weight: FontWeight,
}

impl FontFace {
    pub fn new(family: &str, slant: FontSlant, weight: FontWeight) -> Self {
        Self {
            family: FontFamily::from_name(family),
            slant,
            weight,
        }
    }

    fn is_italic(&self) -> bool {
        self.slant != FontSlant::Normal
    }
}

struct LoadedFace {
    family: FontFamily,
    weight: FontWeight,
    italic: bool,
    font: Font<'static>,
}

struct FontBook {
    faces: Vec<LoadedFace>,
}

static FONT_BOOK: Lazy<FontBook> = Lazy::new(FontBook::load);

impl FontBook {
    fn load() -> Self {
        let sources: [(FontFamily, FontWeight, bool, &'static [u8]); 8] = [
            (FontFamily::Serif, FontWeight::Normal, false, SERIF),
            (FontFamily::Serif, FontWeight::Bold, false, SERIF_BOLD),
            (FontFamily::Serif, FontWeight::Normal, true, SERIF_ITALIC),
            (FontFamily::Serif, FontWeight::Bold, true, SERIF_BOLD_ITALIC),
            (FontFamily::SansSerif, FontWeight::Normal, false, SANS),
            (FontFamily::SansSerif, FontWeight::Bold, false, SANS_BOLD),
            (FontFamily::Monospace, FontWeight::Normal, false, MONO),
            (FontFamily::Monospace, FontWeight::Bold, false, MONO_BOLD),
        ];

        let mut faces = Vec::with_capacity(sources.len());
        for (family, weight, italic, data) in sources {
            match Font::try_from_bytes(data) {
                Some(font) => faces.push(LoadedFace {
                    family,
                    weight,
                    italic,
                    font,
                }),
                None => {
                    tracing::warn!(?family, ?weight, italic, "Failed to parse embedded font face");
                }
            }
        }

        tracing::debug!(faces = faces.len(), "Font book loaded");
        Self { faces }
    }

    fn find(&self, family: FontFamily, weight: FontWeight, italic: bool) -> Option<&Font<'static>> {
        self.faces
            .iter()
            .find(|f| f.family == family && f.weight == weight && f.italic == italic)
            .map(|f| &f.font)
    }
}

/// Look up the font for a face.
///
/// Italic and oblique requests use the upright cut when the family has no
/// italic face. If the family itself is unavailable, sans-serif is used.
pub fn resolve(face: FontFace) -> Option<&'static Font<'static>> {
    let book: &'static FontBook = &FONT_BOOK;
    book.find(face.family, face.weight, face.is_italic())
        .or_else(|| book.find(face.family, face.weight, false))
        .or_else(|| book.find(FontFamily::SansSerif, face.weight, false))
        .or_else(|| book.find(FontFamily::SansSerif, FontWeight::Normal, false))
}

/// Glyph scale for an em size in pixels.
///
/// rusttype scales so that ascent-to-descent spans the requested height, so
/// the em size has to be converted first.
pub fn em_scale(font: &Font<'_>, size: f32) -> Scale {
    let units_per_em = f32::from(font.units_per_em().max(1));
    let v = font.v_metrics_unscaled();
    Scale::uniform((v.ascent - v.descent) / units_per_em * size)
}

/// Horizontal distance the current point moves after drawing `text`.
pub fn advance_width(font: &Font<'_>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}
