// palette.rs - Theme-dependent colors
//
// Colors are looked up once when a scene is generated and baked into the
// entities. A theme change regenerates the scene; nothing here runs per frame
// except the few ink colors the glyph routines need.

use std::fmt;

use serde::Deserialize;

use crate::sim::Glyph;

/// Theme as chosen by the visitor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Theme after `System` has been resolved against the host preference
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" | "" => Some(Theme::System),
            _ => None,
        }
    }

    pub fn resolve(self, prefers_dark: bool) -> Shade {
        match self {
            Theme::Light => Shade::Light,
            Theme::Dark => Shade::Dark,
            Theme::System if prefers_dark => Shade::Dark,
            Theme::System => Shade::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

// CSS color string, as the 2d context wants it
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[inline]
const fn pick(shade: Shade, dark: Rgba, light: Rgba) -> Rgba {
    match shade {
        Shade::Dark => dark,
        Shade::Light => light,
    }
}

/// Base color of a glyph
pub fn glyph_color(glyph: Glyph, shade: Shade) -> Rgba {
    match glyph {
        Glyph::Dot => particle_color(shade),
        Glyph::Computer => pick(shade, Rgba::new(150, 180, 255, 0.8), Rgba::new(30, 80, 180, 0.6)),
        Glyph::React => pick(shade, Rgba::new(97, 218, 251, 0.7), Rgba::new(97, 218, 251, 0.5)),
        Glyph::MongoDb => pick(shade, Rgba::new(67, 153, 52, 0.7), Rgba::new(67, 153, 52, 0.5)),
        Glyph::Express => pick(shade, Rgba::new(150, 150, 150, 0.7), Rgba::new(100, 100, 100, 0.5)),
        Glyph::NodeJs => pick(shade, Rgba::new(104, 160, 99, 0.7), Rgba::new(104, 160, 99, 0.5)),
        Glyph::JavaScript => pick(shade, Rgba::new(247, 223, 30, 0.7), Rgba::new(247, 223, 30, 0.5)),
        Glyph::NextJs => pick(shade, Rgba::new(255, 255, 255, 0.7), Rgba::new(0, 0, 0, 0.5)),
        Glyph::Tailwind => pick(shade, Rgba::new(56, 189, 248, 0.7), Rgba::new(56, 189, 248, 0.5)),
        Glyph::Camera | Glyph::Photo => {
            pick(shade, Rgba::new(220, 64, 140, 0.7), Rgba::new(180, 30, 100, 0.5))
        }
        Glyph::Code => pick(shade, Rgba::new(64, 116, 220, 0.7), Rgba::new(30, 80, 180, 0.5)),
        Glyph::Node => pick(shade, Rgba::new(64, 220, 180, 0.7), Rgba::new(30, 180, 140, 0.5)),
    }
}

/// Single-tone particles around the hub
pub fn particle_color(shade: Shade) -> Rgba {
    pick(shade, Rgba::new(100, 150, 255, 0.5), Rgba::new(30, 80, 180, 0.3))
}

const MOTES_DARK: [Rgba; 3] = [
    Rgba::new(62, 84, 172, 0.3),
    Rgba::new(31, 64, 104, 0.3),
    Rgba::new(13, 71, 161, 0.3),
];

const MOTES_LIGHT: [Rgba; 3] = [
    Rgba::new(144, 202, 249, 0.3),
    Rgba::new(66, 165, 245, 0.3),
    Rgba::new(30, 136, 229, 0.3),
];

/// Three-tone ambient motes
pub fn mote_colors(shade: Shade) -> &'static [Rgba] {
    match shade {
        Shade::Dark => &MOTES_DARK,
        Shade::Light => &MOTES_LIGHT,
    }
}

/// Connection lines between linked glyphs
pub fn link_color(shade: Shade) -> Rgba {
    pick(shade, Rgba::new(150, 150, 220, 0.3), Rgba::new(100, 100, 180, 0.2))
}

/// Hub monitor screen fill
pub fn screen_color(shade: Shade) -> Rgba {
    pick(shade, Rgba::new(20, 70, 120, 0.5), Rgba::new(100, 150, 255, 0.3))
}

/// Text drawn on the hub screen
pub fn screen_text(shade: Shade) -> Rgba {
    pick(shade, Rgba::new(255, 255, 255, 0.9), Rgba::new(0, 0, 0, 0.9))
}

/// "Click to view" hint under the screen text
pub fn hint_text(shade: Shade) -> Rgba {
    pick(shade, Rgba::new(255, 255, 255, 0.7), Rgba::new(0, 0, 0, 0.7))
}

/// Letters punched into filled glyphs (hexagon, disc)
pub fn letter_ink(shade: Shade) -> Rgba {
    pick(shade, Rgba::new(0, 0, 0, 0.7), Rgba::new(255, 255, 255, 0.7))
}

/// Leaf highlight on the MongoDB glyph
pub fn highlight(shade: Shade) -> Rgba {
    pick(shade, Rgba::new(255, 255, 255, 0.2), Rgba::new(255, 255, 255, 0.4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_format() {
        assert_eq!(Rgba::new(97, 218, 251, 0.5).to_string(), "rgba(97, 218, 251, 0.5)");
        assert_eq!(Rgba::new(0, 0, 0, 1.0).to_string(), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn system_theme_follows_preference() {
        assert_eq!(Theme::System.resolve(true), Shade::Dark);
        assert_eq!(Theme::System.resolve(false), Shade::Light);
        assert_eq!(Theme::Light.resolve(true), Shade::Light);
        assert_eq!(Theme::parse(" Dark "), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
    }

    #[test]
    fn shades_differ_for_contrast_glyphs() {
        assert_ne!(glyph_color(Glyph::NextJs, Shade::Dark), glyph_color(Glyph::NextJs, Shade::Light));
        assert_eq!(glyph_color(Glyph::Photo, Shade::Dark), glyph_color(Glyph::Camera, Shade::Dark));
    }
}
