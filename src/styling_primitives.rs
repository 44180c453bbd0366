/*
 * Platform-agnostic color and font descriptions consumed by the painter.
 * Backends translate these into native objects (COLORREF, HFONT) at draw time,
 * so nothing here owns a native resource.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl Default for Color {
    // Painters start out drawing in opaque black.
    fn default() -> Self {
        Color::BLACK
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// A font request. `size_pt` is in points; backends convert to pixels using the
/// painter's scale factor.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size_pt: f32,
    pub weight: FontWeight,
}

impl Font {
    pub fn new(family: impl Into<String>, size_pt: f32) -> Self {
        Self {
            family: family.into(),
            size_pt,
            weight: FontWeight::Normal,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    /// Pixel height of the font at 96 DPI multiplied by `scale_factor`.
    pub fn pixel_height(&self, scale_factor: f32) -> i32 {
        (self.size_pt * 96.0 / 72.0 * scale_factor).round() as i32
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new("Segoe UI", 9.0)
    }
}
