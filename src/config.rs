// config.rs - Scene configuration
//
// One parameterized core drives every background on the site. A preset picks
// the glyph set, density, hub, link style and scroll height; options JSON from
// the host overrides individual parameters.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EngineError, Result};
use crate::sim::{Glyph, MAX_ENTITIES};
use crate::world::{Theme, Viewport};

pub const DEFAULT_REVEAL_EVENT: &str = "backdrop:revealed";

/// Named background variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    /// Hub computer ringed by tech icons, gating the page behind an intro
    #[default]
    Reveal,
    /// Drifting, linked tech icons over a 3x-tall surface
    TechIcons,
    /// Code, photo and node glyphs over a 3x-tall surface
    Constellation,
    /// Soft pulsing motes joined by proximity lines
    Ambient,
}

/// What the bulk of the scene is made of
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlyphSet {
    Tech,
    Studio,
    Particles,
    Motes,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "basis", rename_all = "camelCase")]
pub enum Density {
    /// One entity per `spacing` px of viewport width, at most `cap`
    PerWidth { spacing: f32, cap: usize },
    /// One entity per `spacing` px of the shorter viewport side
    PerMinSide { spacing: f32 },
    Fixed { count: usize },
}

impl Density {
    /// Entity count for a viewport, never above `MAX_ENTITIES`
    pub fn count(&self, viewport: Viewport) -> usize {
        let n = match *self {
            Density::PerWidth { spacing, cap } if spacing > 0.0 => {
                ((viewport.width / spacing) as usize).min(cap)
            }
            Density::PerMinSide { spacing } if spacing > 0.0 => {
                (viewport.min_side() / spacing) as usize
            }
            Density::Fixed { count } => count,
            _ => 0,
        };
        n.min(MAX_ENTITIES)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "style", rename_all = "camelCase")]
pub enum LinkStyle {
    None,
    /// Each entity links to `min..=max` random others; lines fade out by `distance`
    Random { min: usize, max: usize, distance: f32 },
    /// Every pair closer than `distance`
    Proximity { distance: f32 },
    /// Free particles to hub/ring glyphs closer than `distance`
    ToGlyphs { distance: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Physics {
    pub max_speed: f32,
    pub friction: f32,
    pub repel_radius: f32,
    /// Impulse is `(repel_radius - d) / repel_divisor`
    pub repel_divisor: f32,
    pub idle_timeout_ms: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            friction: 0.99,
            repel_radius: 150.0,
            repel_divisor: 1000.0,
            idle_timeout_ms: 2000.0,
        }
    }
}

/// Value drawn uniformly from `[min, max)`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Point at fraction `t` of the way from `min` to `max`
    #[inline]
    pub fn at(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t
    }
}

/// Ranges new entities are drawn from
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Spawning {
    /// Velocity components start in `±initial_speed / 2`
    pub initial_speed: f32,
    pub size: Span,
    pub opacity: Span,
    /// Spin per frame in `±spin / 2`
    pub spin: f32,
    /// Fraction of entities whose opacity pulses
    pub pulse_share: f32,
    pub pulse_rate: Span,
    // Connection nodes in the studio set
    pub node_speed: f32,
    pub node_size: Span,
    pub node_opacity: Span,
}

impl Default for Spawning {
    fn default() -> Self {
        Self {
            initial_speed: 0.5,
            size: Span::new(15.0, 30.0),
            opacity: Span::new(0.3, 0.8),
            spin: 0.01,
            pulse_share: 0.0,
            pulse_rate: Span::new(0.01, 0.03),
            node_speed: 0.3,
            node_size: Span::new(3.0, 8.0),
            node_opacity: Span::new(0.5, 1.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Hub {
    pub size: f32,
    pub ring_radius: f32,
    pub ring_size: f32,
    /// Ring glyph spin per frame in `±ring_spin / 2`
    pub ring_spin: f32,
    pub ring: Vec<Glyph>,
}

impl Default for Hub {
    fn default() -> Self {
        Self {
            size: 60.0,
            ring_radius: 150.0,
            ring_size: 30.0,
            ring_spin: 0.02,
            ring: vec![
                Glyph::MongoDb,
                Glyph::Express,
                Glyph::React,
                Glyph::NodeJs,
                Glyph::JavaScript,
                Glyph::NextJs,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RevealParams {
    /// Hit radius is `hub.size * hit_scale`
    pub hit_scale: f32,
    pub hint_delay_ms: f64,
    pub dim_opacity: f32,
    pub dim_ms: f64,
    pub content_ms: f64,
    pub content_offset: f32,
}

impl Default for RevealParams {
    fn default() -> Self {
        Self {
            hit_scale: 1.5,
            hint_delay_ms: 2000.0,
            dim_opacity: 0.3,
            dim_ms: 1000.0,
            content_ms: 800.0,
            content_offset: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub preset: Preset,
    pub glyphs: GlyphSet,
    pub density: Density,
    pub hub: Option<Hub>,
    pub links: LinkStyle,
    pub scroll_multiplier: f32,
    pub spawn: Spawning,
    pub physics: Physics,
    pub reveal: RevealParams,
}

impl SceneConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Reveal => Self::reveal(),
            Preset::TechIcons => Self::tech_icons(),
            Preset::Constellation => Self::constellation(),
            Preset::Ambient => Self::ambient(),
        }
    }

    pub fn reveal() -> Self {
        Self {
            preset: Preset::Reveal,
            glyphs: GlyphSet::Particles,
            density: Density::Fixed { count: 50 },
            hub: Some(Hub::default()),
            links: LinkStyle::ToGlyphs { distance: 100.0 },
            scroll_multiplier: 1.0,
            spawn: Spawning {
                size: Span::new(1.0, 4.0),
                spin: 0.0,
                ..Spawning::default()
            },
            physics: Physics::default(),
            reveal: RevealParams::default(),
        }
    }

    pub fn tech_icons() -> Self {
        Self {
            preset: Preset::TechIcons,
            glyphs: GlyphSet::Tech,
            density: Density::PerWidth { spacing: 20.0, cap: 60 },
            hub: None,
            links: LinkStyle::Random { min: 1, max: 3, distance: 300.0 },
            scroll_multiplier: 3.0,
            spawn: Spawning::default(),
            physics: Physics::default(),
            reveal: RevealParams::default(),
        }
    }

    pub fn constellation() -> Self {
        Self {
            preset: Preset::Constellation,
            glyphs: GlyphSet::Studio,
            density: Density::PerWidth { spacing: 15.0, cap: 100 },
            spawn: Spawning {
                size: Span::new(10.0, 25.0),
                ..Spawning::default()
            },
            ..Self::tech_icons()
        }
    }

    pub fn ambient() -> Self {
        Self {
            preset: Preset::Ambient,
            glyphs: GlyphSet::Motes,
            density: Density::PerMinSide { spacing: 8.0 },
            hub: None,
            links: LinkStyle::Proximity { distance: 120.0 },
            scroll_multiplier: 1.0,
            spawn: Spawning {
                size: Span::new(1.0, 6.0),
                spin: 0.0,
                pulse_share: 0.3,
                ..Spawning::default()
            },
            // Softer, shorter-range push than the icon presets
            physics: Physics {
                repel_radius: 100.0,
                repel_divisor: 1500.0,
                ..Physics::default()
            },
            reveal: RevealParams::default(),
        }
    }

    /// Whether the surface takes pointer events (only to hit-test the hub)
    pub fn has_hub(&self) -> bool {
        self.hub.is_some()
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::reveal()
    }
}

/// Options JSON as written by the host. Parameter blocks stay raw so they can
/// be laid over the preset's values field by field.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct RawOptions {
    preset: Preset,
    seed: Option<u64>,
    theme: Theme,
    glyphs: Option<GlyphSet>,
    density: Option<Density>,
    links: Option<LinkStyle>,
    scroll_multiplier: Option<f32>,
    hub: Option<Map<String, Value>>,
    spawn: Option<Map<String, Value>>,
    physics: Option<Map<String, Value>>,
    reveal: Option<Map<String, Value>>,
    reveal_event: Option<String>,
}

/// Host-supplied options resolved against their preset
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub preset: Preset,
    pub seed: Option<u64>,
    pub theme: Theme,
    pub reveal_event: Option<String>,
    config: SceneConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            seed: None,
            theme: Theme::default(),
            reveal_event: None,
            config: SceneConfig::default(),
        }
    }
}

impl Options {
    /// Empty input means all defaults
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawOptions = serde_json::from_str(json)?;
        Self::resolve(raw)
    }

    fn resolve(raw: RawOptions) -> Result<Self> {
        let mut config = SceneConfig::preset(raw.preset);
        if let Some(glyphs) = raw.glyphs { config.glyphs = glyphs; }
        if let Some(density) = raw.density { config.density = density; }
        if let Some(links) = raw.links { config.links = links; }
        if let Some(m) = raw.scroll_multiplier { config.scroll_multiplier = m.max(1.0); }
        if raw.hub.is_some() {
            config.hub = Some(overlay(config.hub.take().unwrap_or_default(), raw.hub)?);
        }
        config.spawn = overlay(config.spawn, raw.spawn)?;
        config.physics = overlay(config.physics, raw.physics)?;
        config.reveal = overlay(config.reveal, raw.reveal)?;

        Ok(Self {
            preset: raw.preset,
            seed: raw.seed,
            theme: raw.theme,
            reveal_event: raw.reveal_event,
            config,
        })
    }

    pub fn scene_config(&self) -> SceneConfig {
        self.config.clone()
    }

    pub fn reveal_event(&self) -> &str {
        self.reveal_event.as_deref().unwrap_or(DEFAULT_REVEAL_EVENT)
    }
}

// Fields present in `patch` replace those of `base`; the rest keep base values
fn overlay<T: Serialize + DeserializeOwned>(base: T, patch: Option<Map<String, Value>>) -> Result<T> {
    let Some(patch) = patch else { return Ok(base) };
    let mut value = serde_json::to_value(&base)?;
    if let Value::Object(fields) = &mut value {
        fields.extend(patch);
    }
    serde_json::from_value(value).map_err(EngineError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn density_counts() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(Density::PerWidth { spacing: 20.0, cap: 60 }.count(v), 40);
        assert_eq!(Density::PerWidth { spacing: 20.0, cap: 60 }.count(Viewport::new(1920.0, 1080.0)), 60);
        assert_eq!(Density::PerMinSide { spacing: 8.0 }.count(v), 75);
        assert_eq!(Density::Fixed { count: 50 }.count(Viewport::new(0.0, 0.0)), 50);
        assert_eq!(Density::PerWidth { spacing: 0.0, cap: 60 }.count(v), 0);
    }

    #[test]
    fn empty_options_are_reveal_defaults() {
        let options = Options::from_json("  ").unwrap();
        assert_eq!(options.scene_config(), SceneConfig::reveal());
        assert_eq!(options.reveal_event(), DEFAULT_REVEAL_EVENT);
        assert_eq!(options.theme, Theme::System);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let json = r#"{
            "preset": "techIcons",
            "seed": 7,
            "theme": "dark",
            "physics": { "maxSpeed": 3.5 },
            "density": { "basis": "perWidth", "spacing": 10, "cap": 200 },
            "revealEvent": "intro:done"
        }"#;
        let options = Options::from_json(json).unwrap();
        let config = options.scene_config();

        assert_eq!(options.seed, Some(7));
        assert_eq!(options.theme, Theme::Dark);
        assert_eq!(config.preset, Preset::TechIcons);
        assert_eq!(config.physics.max_speed, 3.5);
        assert_eq!(config.physics.friction, 0.99);
        assert_eq!(config.density, Density::PerWidth { spacing: 10.0, cap: 200 });
        assert_eq!(config.scroll_multiplier, 3.0);
        assert_eq!(options.reveal_event(), "intro:done");
    }

    #[test]
    fn link_style_is_tagged() {
        let options = Options::from_json(r#"{"links": {"style": "proximity", "distance": 90}}"#).unwrap();
        assert_eq!(options.scene_config().links, LinkStyle::Proximity { distance: 90.0 });
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Options::from_json(r#"{"presett": "ambient"}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidOptions(_)));
        assert!(Options::from_json(r#"{"preset": "nebula"}"#).is_err());
    }

    #[test]
    fn presets_match_variants() {
        assert!(SceneConfig::reveal().has_hub());
        assert!(!SceneConfig::ambient().has_hub());
        assert_eq!(SceneConfig::constellation().scroll_multiplier, 3.0);
        assert_eq!(SceneConfig::constellation().density, Density::PerWidth { spacing: 15.0, cap: 100 });
        assert_eq!(SceneConfig::preset(Preset::Ambient).links, LinkStyle::Proximity { distance: 120.0 });
    }

    #[test]
    fn count_never_exceeds_capacity() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(Density::Fixed { count: usize::MAX }.count(v), MAX_ENTITIES);
        assert_eq!(Density::PerMinSide { spacing: 0.01 }.count(v), MAX_ENTITIES);
        assert_eq!(Density::PerWidth { spacing: 1.0, cap: usize::MAX }.count(v), MAX_ENTITIES);
    }

    #[test]
    fn partial_blocks_keep_preset_values() {
        let options = Options::from_json(r#"{"preset": "ambient", "physics": {"maxSpeed": 1.0}}"#).unwrap();
        let physics = options.scene_config().physics;
        assert_eq!(physics.max_speed, 1.0);
        assert_eq!(physics.repel_radius, 100.0);
        assert_eq!(physics.repel_divisor, 1500.0);
    }

    #[test]
    fn spawn_ranges_override() {
        let json = r#"{"preset": "techIcons", "spawn": {"initialSpeed": 1.5, "size": {"min": 4, "max": 8}}}"#;
        let spawn = Options::from_json(json).unwrap().scene_config().spawn;
        assert_eq!(spawn.initial_speed, 1.5);
        assert_eq!(spawn.size, Span::new(4.0, 8.0));
        assert_eq!(spawn.opacity, Spawning::default().opacity);
        assert!(Options::from_json(r#"{"spawn": {"speed": 1}}"#).is_err());
    }

    #[test]
    fn hub_block_adds_hub_to_decorative_preset() {
        let options = Options::from_json(r#"{"preset": "ambient", "hub": {"size": 40}}"#).unwrap();
        let hub = options.scene_config().hub.unwrap();
        assert_eq!(hub.size, 40.0);
        assert_eq!(hub.ring.len(), 6);
    }

    #[test]
    fn span_interpolates() {
        let s = Span::new(10.0, 25.0);
        assert_eq!(s.at(0.0), 10.0);
        assert_eq!(s.at(1.0), 25.0);
        assert_eq!(s.at(0.2), 13.0);
    }
}
