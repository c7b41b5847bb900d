use std::collections::{BTreeMap, HashMap};

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::core::stroke_path::{StrokePath, DEFAULT_FLATTEN_TOLERANCE};

/// The bundled glyph set: A–Z, a–z and 0–9 on a 400x400 canvas.
pub const BUILTIN_GLYPHS: &str = include_str!("glyphs.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("default glyph '{0}' is not in the catalog")]
    MissingDefault(char),
    #[error("catalog has no glyphs")]
    Empty,
}

/// One stroke of a glyph, traced in a single logical pass.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDef {
    pub path: StrokePath,
    /// Declared entry point (start guide dot).
    pub start: Vec2,
    /// Declared exit point (end guide dot).
    pub end: Vec2,
    /// Direction arrow shown on the start dot, e.g. "↙".
    pub direction: String,
}

/// A glyph and its strokes, in the order they must be traced.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDef {
    pub id: char,
    pub strokes: Vec<StrokeDef>,
    /// Optional cursive outline shown behind free writing.
    pub reference: Option<StrokePath>,
}

/// Coarse grouping used for prev/next navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphClass {
    Uppercase,
    Lowercase,
    Digit,
    Other,
}

impl GlyphClass {
    pub fn of(id: char) -> Self {
        if id.is_ascii_uppercase() {
            GlyphClass::Uppercase
        } else if id.is_ascii_lowercase() {
            GlyphClass::Lowercase
        } else if id.is_ascii_digit() {
            GlyphClass::Digit
        } else {
            GlyphClass::Other
        }
    }
}

// -- Raw JSON shape --

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default = "default_glyph_key")]
    default_glyph: char,
    #[serde(default)]
    canvas: Option<RawCanvas>,
    glyphs: HashMap<String, RawGlyph>,
}

#[derive(Debug, Deserialize)]
struct RawCanvas {
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
struct RawGlyph {
    strokes: Vec<RawStroke>,
    #[serde(default)]
    reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStroke {
    path: String,
    start: [f32; 2],
    end: [f32; 2],
    #[serde(default)]
    direction: String,
}

fn default_glyph_key() -> char {
    'A'
}

/// Read-only mapping from glyph id to its stroke definitions.
#[derive(Debug, Clone)]
pub struct GlyphCatalog {
    glyphs: BTreeMap<char, GlyphDef>,
    default_glyph: char,
    canvas: Vec2,
}

impl GlyphCatalog {
    /// Parse a catalog from JSON, flattening every stroke path.
    ///
    /// A stroke whose path data is malformed is kept with an empty path; a
    /// session reaching it treats the glyph as finished.
    pub fn from_json(json: &str, flatten_tolerance: f32) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;

        let mut glyphs = Vec::with_capacity(raw.glyphs.len());
        for (key, raw_glyph) in raw.glyphs {
            let mut chars = key.chars();
            let (Some(id), None) = (chars.next(), chars.next()) else {
                log::warn!("catalog: skipping glyph key {key:?} (not a single character)");
                continue;
            };

            let strokes = raw_glyph
                .strokes
                .into_iter()
                .enumerate()
                .map(|(i, s)| {
                    let path = StrokePath::parse(&s.path, flatten_tolerance).unwrap_or_else(|e| {
                        log::warn!("catalog: glyph '{id}' stroke {i}: {e}");
                        StrokePath::empty()
                    });
                    StrokeDef {
                        path,
                        start: Vec2::from(s.start),
                        end: Vec2::from(s.end),
                        direction: s.direction,
                    }
                })
                .collect();

            let reference = raw_glyph.reference.and_then(|d| {
                StrokePath::parse(&d, flatten_tolerance)
                    .map_err(|e| log::warn!("catalog: glyph '{id}' reference: {e}"))
                    .ok()
            });

            glyphs.push(GlyphDef { id, strokes, reference });
        }

        let mut catalog = Self::from_glyphs(glyphs, raw.default_glyph)?;
        if let Some(canvas) = raw.canvas {
            catalog.canvas = Vec2::new(canvas.width, canvas.height);
        }
        Ok(catalog)
    }

    /// The bundled glyph set.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_GLYPHS, DEFAULT_FLATTEN_TOLERANCE)
    }

    /// Build a catalog from already-constructed glyphs.
    pub fn from_glyphs(
        glyphs: impl IntoIterator<Item = GlyphDef>,
        default_glyph: char,
    ) -> Result<Self, CatalogError> {
        let glyphs: BTreeMap<char, GlyphDef> = glyphs.into_iter().map(|g| (g.id, g)).collect();
        if glyphs.is_empty() {
            return Err(CatalogError::Empty);
        }
        if !glyphs.contains_key(&default_glyph) {
            return Err(CatalogError::MissingDefault(default_glyph));
        }
        Ok(Self {
            glyphs,
            default_glyph,
            canvas: Vec2::splat(400.0),
        })
    }

    pub fn get_glyph(&self, id: char) -> Option<&GlyphDef> {
        self.glyphs.get(&id)
    }

    /// Look up `id`, falling back to the default glyph when it is unknown.
    pub fn get_or_default(&self, id: char) -> &GlyphDef {
        match self.glyphs.get(&id) {
            Some(glyph) => glyph,
            None => {
                log::warn!("catalog: unknown glyph {id:?}, using '{}'", self.default_glyph);
                self.default_glyph()
            }
        }
    }

    pub fn default_glyph(&self) -> &GlyphDef {
        // `from_glyphs` guarantees the default is present.
        &self.glyphs[&self.default_glyph]
    }

    /// Logical canvas size the glyph coordinates live in.
    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains(&self, id: char) -> bool {
        self.glyphs.contains_key(&id)
    }

    /// All glyph ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }

    /// Ids of the same class as `id`, in catalog order.
    pub fn group(&self, id: char) -> Vec<char> {
        let class = GlyphClass::of(id);
        self.ids().filter(|&c| GlyphClass::of(c) == class).collect()
    }

    pub fn next_in_group(&self, id: char) -> Option<char> {
        let group = self.group(id);
        let idx = group.iter().position(|&c| c == id)?;
        group.get(idx + 1).copied()
    }

    pub fn previous_in_group(&self, id: char) -> Option<char> {
        let group = self.group(id);
        let idx = group.iter().position(|&c| c == id)?;
        idx.checked_sub(1).map(|i| group[i])
    }

    /// "Letter 3 of 26" / "Number 4 of 0–9" style caption.
    pub fn position_label(id: char) -> String {
        match GlyphClass::of(id) {
            GlyphClass::Uppercase => format!("Letter {} of 26", id as u32 - 'A' as u32 + 1),
            GlyphClass::Lowercase => format!("Letter {} of 26", id as u32 - 'a' as u32 + 1),
            GlyphClass::Digit => format!("Number {id} of 0–9"),
            GlyphClass::Other => String::new(),
        }
    }
}
