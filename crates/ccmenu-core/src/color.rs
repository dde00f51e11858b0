#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    /// Gray of the given brightness in `0.0..=1.0`.
    pub fn white(level: f32) -> Self {
        let v = (level.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color(v, v, v, 255)
    }
    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let (r, g, b, a) = match s.len() {
            6 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                255,
            ),
            8 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                u8::from_str_radix(&s[6..8], 16).unwrap_or(255),
            ),
            _ => (0, 0, 0, 255),
        };
        Color(r, g, b, a)
    }
    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }
    /// Scales the alpha channel by `opacity` (clamped to `0.0..=1.0`).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (self.3 as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Color(self.0, self.1, self.2, a)
    }
}

/// Light or dark appearance of the surrounding platform.
///
/// Only two schemes are modelled. Platform appearance names that are not
/// recognized resolve to `Dark`, which is also the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl ColorScheme {
    /// Maps a platform appearance name (e.g. `"NSAppearanceNameAqua"`,
    /// `"light"`, `"DarkAqua"`) to a scheme.
    pub fn from_appearance_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.contains("dark") {
            ColorScheme::Dark
        } else if lower.contains("light") || lower.contains("aqua") {
            ColorScheme::Light
        } else {
            log::debug!("unknown appearance {name:?}; using dark");
            ColorScheme::Dark
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}

/// Semantic colors the platform resolves differently per scheme.
pub mod system {
    use super::{Color, ColorScheme};

    pub fn text(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Light => Color(0, 0, 0, 217),
            ColorScheme::Dark => Color(255, 255, 255, 217),
        }
    }

    pub fn text_background(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Light => Color::WHITE,
            ColorScheme::Dark => Color::from_hex("#1E1E1E"),
        }
    }

    pub fn control(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Light => Color::WHITE,
            ColorScheme::Dark => Color(255, 255, 255, 64),
        }
    }

    pub fn selected_menu_item_text(_scheme: ColorScheme) -> Color {
        Color::WHITE
    }

    pub fn accent() -> Color {
        Color::from_hex("#007AFF")
    }
}
