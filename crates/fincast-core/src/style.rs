//! Cell styling
//!
//! A [`Style`] bundles the formatting directives the builder emits: font,
//! solid fill, box border, wrap flag, and number format. Styles are
//! deduplicated per worksheet through a [`StylePool`].

use ahash::AHashMap;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a 0xRRGGBB literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Format as an ARGB hex string ("FFRRGGBB"), the form styles.xml wants
    pub fn to_argb_hex(&self) -> String {
        format!("FF{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Font settings
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontStyle {
    /// Bold text
    pub bold: bool,
    /// Size in whole points
    pub size: u16,
    /// Font color; `None` is the theme default
    pub color: Option<Color>,
    /// Font name
    pub name: String,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            bold: false,
            size: 11,
            color: None,
            name: "Calibri".to_string(),
        }
    }
}

/// Border line styles the builder emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderLineStyle {
    Thin,
    Medium,
}

impl BorderLineStyle {
    /// The style attribute value in styles.xml
    pub fn xlsx_name(&self) -> &'static str {
        match self {
            BorderLineStyle::Thin => "thin",
            BorderLineStyle::Medium => "medium",
        }
    }
}

/// Number format
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// General (no explicit format)
    #[default]
    General,
    /// A custom format code (e.g. "#,##0", "0.00%")
    Custom(String),
}

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Font settings
    pub font: FontStyle,
    /// Solid fill color, if any
    pub fill: Option<Color>,
    /// Box border drawn on all four edges, if any
    pub border: Option<BorderLineStyle>,
    /// Wrap long text instead of overflowing
    pub wrap_text: bool,
    /// Number format
    pub number_format: NumberFormat,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: u16) -> Self {
        self.font.size = size;
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = Some(color);
        self
    }

    /// Set a solid fill color
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Draw a box border on all edges
    pub fn border(mut self, line: BorderLineStyle) -> Self {
        self.border = Some(line);
        self
    }

    /// Wrap text
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    /// Set a custom number format code
    pub fn number_format<S: Into<String>>(mut self, code: S) -> Self {
        self.number_format = NumberFormat::Custom(code.into());
        self
    }
}

/// Deduplicating style table
///
/// Index 0 is always the default style. Cells store an index into the pool
/// instead of an owned [`Style`].
#[derive(Debug)]
pub struct StylePool {
    styles: Vec<Style>,
    index: AHashMap<Style, u32>,
}

impl StylePool {
    /// Create a pool holding only the default style
    pub fn new() -> Self {
        let default = Style::default();
        let mut index = AHashMap::new();
        index.insert(default.clone(), 0);
        Self {
            styles: vec![default],
            index,
        }
    }

    /// Get the index for a style, inserting it if new
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        if let Some(&idx) = self.index.get(&style) {
            return idx;
        }
        let idx = self.styles.len() as u32;
        self.styles.push(style.clone());
        self.index.insert(style, idx);
        idx
    }

    /// Look up a style by index
    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Number of distinct styles (including the default)
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the pool holds only the default style
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex() {
        let c = Color::from_hex(0xFFF2CC);
        assert_eq!((c.r, c.g, c.b), (0xFF, 0xF2, 0xCC));
        assert_eq!(c.to_argb_hex(), "FFFFF2CC");
    }

    #[test]
    fn pool_deduplicates() {
        let mut pool = StylePool::new();
        let bold = Style::new().bold(true);
        let a = pool.get_or_insert(bold.clone());
        let b = pool.get_or_insert(bold);
        assert_eq!(a, b);
        assert_eq!(a, 1);
        assert_eq!(pool.len(), 2);

        // The default style is always index 0
        assert_eq!(pool.get_or_insert(Style::default()), 0);
        assert_eq!(pool.get(0), Some(&Style::default()));
    }

    #[test]
    fn builder_composition() {
        let style = Style::new()
            .bold(true)
            .font_size(14)
            .fill(Color::from_hex(0xE2EFDA))
            .number_format("#,##0");
        assert!(style.font.bold);
        assert_eq!(style.font.size, 14);
        assert_eq!(style.fill, Some(Color::from_hex(0xE2EFDA)));
        assert_eq!(style.number_format, NumberFormat::Custom("#,##0".into()));
    }
}
