// scene.rs - Scene generation
//
// A scene is built in one go from (config, viewport, theme, rng) and swapped in
// whole, so the stepper never sees a half-built entity list. Colors are baked
// here; link indices are only valid for the generation that produced them.

use std::f32::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;

use super::physics::limit;
use super::{Entities, Glyph, Links, Spawn};
use crate::config::{GlyphSet, Hub, LinkStyle, SceneConfig, Spawning};
use crate::world::{self, Shade, Viewport};

const TECH: [Glyph; 7] = [
    Glyph::React,
    Glyph::MongoDb,
    Glyph::NodeJs,
    Glyph::NextJs,
    Glyph::JavaScript,
    Glyph::Tailwind,
    Glyph::Camera,
];

// Code and Photo glyphs each come in four drawings
const STYLES: u8 = 4;

pub struct Scene {
    pub entities: Entities,
    /// Undirected, deduplicated (lo, hi) pairs from `links`
    pub edges: Vec<(u32, u32)>,
    pub hub: Option<usize>,
    pub generation: u64,
}

impl Scene {
    pub fn empty() -> Self {
        Self {
            entities: Entities::default(),
            edges: Vec::new(),
            hub: None,
            generation: 0,
        }
    }

    pub fn generate(
        config: &SceneConfig,
        viewport: Viewport,
        shade: Shade,
        rng: &mut StdRng,
        generation: u64,
    ) -> Self {
        let surface = viewport.surface(config.scroll_multiplier);
        if surface.is_empty() {
            return Self { generation, ..Self::empty() };
        }

        let count = config.density.count(viewport);
        let ring = config.hub.as_ref().map_or(0, |h| h.ring.len() + 1);
        let mut entities = Entities::with_capacity(count.saturating_add(ring));

        let hub = config.hub.as_ref().and_then(|h| spawn_hub(&mut entities, h, viewport, surface, shade, rng));

        let spawn = &config.spawn;
        for k in 0..count {
            let mut s = match config.glyphs {
                GlyphSet::Tech => tech(spawn, surface, shade, rng),
                GlyphSet::Studio => studio(spawn, k, count, surface, shade, rng),
                GlyphSet::Particles => particle(spawn, surface, shade, rng),
                GlyphSet::Motes => mote(spawn, surface, shade, rng),
            };
            (s.vx, s.vy) = limit(s.vx, s.vy, config.physics.max_speed);
            if entities.push(s).is_none() { break; }
        }

        let edges = match config.links {
            LinkStyle::Random { min, max, .. } => {
                assign_links(&mut entities, min, max, rng);
                collect_edges(&entities.links)
            }
            _ => Vec::new(),
        };

        log::debug!(
            "scene {generation}: {} entities, {} edges on {}x{}",
            entities.len(),
            edges.len(),
            surface.width,
            surface.height,
        );

        Self { entities, edges, hub, generation }
    }

    /// Hub center and size
    pub fn hub(&self) -> Option<(f32, f32, f32)> {
        self.hub.map(|i| (self.entities.x[i], self.entities.y[i], self.entities.size[i]))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[inline]
fn signed(rng: &mut StdRng, range: f32) -> f32 {
    (rng.r#gen::<f32>() - 0.5) * range
}

#[inline]
fn unit(rng: &mut StdRng) -> f32 {
    rng.r#gen::<f32>()
}

/// Computer at the viewport center, tech icons orbiting it. Returns the hub index.
fn spawn_hub(
    e: &mut Entities,
    hub: &Hub,
    viewport: Viewport,
    surface: Viewport,
    shade: Shade,
    rng: &mut StdRng,
) -> Option<usize> {
    let (cx, cy) = viewport.center();
    let computer = Spawn {
        pinned: true,
        ..Spawn::at(cx, cy, hub.size, Glyph::Computer, world::glyph_color(Glyph::Computer, shade))
    };
    let index = e.push(computer)?;

    let n = hub.ring.len();
    for (i, &glyph) in hub.ring.iter().enumerate() {
        let angle = i as f32 / n as f32 * TAU;
        let x = (cx + angle.cos() * hub.ring_radius).clamp(0.0, surface.width);
        let y = (cy + angle.sin() * hub.ring_radius).clamp(0.0, surface.height);
        let s = Spawn {
            style: rng.gen_range(0..STYLES),
            rotation: unit(rng) * TAU,
            spin: signed(rng, hub.ring_spin),
            pinned: true,
            ..Spawn::at(x, y, hub.ring_size, glyph, world::glyph_color(glyph, shade))
        };
        if e.push(s).is_none() { break; }
    }

    Some(index)
}

fn tech(p: &Spawning, surface: Viewport, shade: Shade, rng: &mut StdRng) -> Spawn {
    let glyph = TECH[rng.gen_range(0..TECH.len())];
    Spawn {
        x: unit(rng) * surface.width,
        y: unit(rng) * surface.height,
        vx: signed(rng, p.initial_speed),
        vy: signed(rng, p.initial_speed),
        size: p.size.at(unit(rng)),
        glyph,
        style: 0,
        color: world::glyph_color(glyph, shade),
        opacity: p.opacity.at(unit(rng)),
        pulse: 0.0,
        rotation: unit(rng) * TAU,
        spin: signed(rng, p.spin),
        pinned: false,
    }
}

/// 40% code, 40% photo, 20% nodes, by index
fn studio(p: &Spawning, k: usize, count: usize, surface: Viewport, shade: Shade, rng: &mut StdRng) -> Spawn {
    let glyph = if k * 5 < count * 2 {
        Glyph::Code
    } else if k * 5 < count * 4 {
        Glyph::Photo
    } else {
        Glyph::Node
    };
    let color = world::glyph_color(glyph, shade);
    let x = unit(rng) * surface.width;
    let y = unit(rng) * surface.height;

    if glyph == Glyph::Node {
        return Spawn {
            size: p.node_size.at(unit(rng)),
            opacity: p.node_opacity.at(unit(rng)),
            vx: signed(rng, p.node_speed),
            vy: signed(rng, p.node_speed),
            ..Spawn::at(x, y, 0.0, glyph, color)
        };
    }

    Spawn {
        size: p.size.at(unit(rng)),
        style: rng.gen_range(0..STYLES),
        opacity: p.opacity.at(unit(rng)),
        rotation: unit(rng) * TAU,
        spin: signed(rng, p.spin),
        vx: signed(rng, p.initial_speed),
        vy: signed(rng, p.initial_speed),
        ..Spawn::at(x, y, 0.0, glyph, color)
    }
}

fn particle(p: &Spawning, surface: Viewport, shade: Shade, rng: &mut StdRng) -> Spawn {
    Spawn {
        size: p.size.at(unit(rng)),
        vx: signed(rng, p.initial_speed),
        vy: signed(rng, p.initial_speed),
        opacity: p.opacity.at(unit(rng)),
        ..Spawn::at(
            unit(rng) * surface.width,
            unit(rng) * surface.height,
            0.0,
            Glyph::Dot,
            world::particle_color(shade),
        )
    }
}

fn mote(p: &Spawning, surface: Viewport, shade: Shade, rng: &mut StdRng) -> Spawn {
    let tones = world::mote_colors(shade);
    let color = tones[rng.gen_range(0..tones.len())];
    let x = unit(rng) * surface.width;
    let y = unit(rng) * surface.height;
    let size = p.size.at(unit(rng));
    let vx = signed(rng, p.initial_speed);
    let vy = signed(rng, p.initial_speed);
    let opacity = p.opacity.at(unit(rng));
    let pulse = if unit(rng) < p.pulse_share { p.pulse_rate.at(unit(rng)) } else { 0.0 };

    Spawn { vx, vy, opacity, pulse, ..Spawn::at(x, y, size, Glyph::Dot, color) }
}

/// Give each entity `min..=max` attempts at a random distinct target.
/// Self-links and repeats are dropped, so some entities end up with fewer.
pub fn assign_links(e: &mut Entities, min: usize, max: usize, rng: &mut StdRng) {
    let n = e.len();
    if n < 2 { return; }
    let (lo, hi) = (min.min(max), max);

    for i in 0..n {
        let tries = rng.gen_range(lo..=hi);
        let mut links = Links::new();
        for _ in 0..tries {
            let target = rng.gen_range(0..n) as u32;
            if target as usize != i && !links.contains(&target) {
                links.push(target);
            }
        }
        e.links[i] = links;
    }
}

/// One (lo, hi) pair per linked couple, however many directions link them
pub fn collect_edges(links: &[Links]) -> Vec<(u32, u32)> {
    let mut edges: Vec<(u32, u32)> = links
        .iter()
        .enumerate()
        .flat_map(|(i, ls)| {
            let i = i as u32;
            ls.iter().map(move |&j| (i.min(j), i.max(j)))
        })
        .collect();
    edges.sort_unstable();
    edges.dedup();
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Density;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn reveal_scene_has_centered_pinned_hub() {
        let config = SceneConfig::reveal();
        let scene = Scene::generate(&config, Viewport::new(800.0, 600.0), Shade::Dark, &mut rng(), 1);

        assert_eq!(scene.hub(), Some((400.0, 300.0, 60.0)));
        let hub = scene.hub.unwrap();
        assert!(scene.entities.pinned[hub]);
        assert_eq!(scene.entities.glyph[hub], Glyph::Computer);
        assert_eq!(scene.len(), 1 + 6 + 50);
        assert_eq!(scene.entities.glyph.iter().filter(|&&g| g == Glyph::Computer).count(), 1);
        assert!(scene.edges.is_empty());
    }

    #[test]
    fn links_have_no_self_or_duplicate_targets() {
        let config = SceneConfig::constellation();
        let scene = Scene::generate(&config, Viewport::new(1200.0, 800.0), Shade::Light, &mut rng(), 1);
        let n = scene.len();

        assert_eq!(n, 80);
        for (i, links) in scene.entities.links.iter().enumerate() {
            assert!(links.len() <= 3);
            for (k, &t) in links.iter().enumerate() {
                assert_ne!(t as usize, i);
                assert!((t as usize) < n);
                assert!(!links[..k].contains(&t));
            }
        }
    }

    #[test]
    fn edges_are_undirected_and_unique() {
        let links = vec![
            Links::from_slice(&[1, 2]),
            Links::from_slice(&[0]),
            Links::from_slice(&[0, 1]),
        ];
        assert_eq!(collect_edges(&links), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn studio_proportions() {
        let config = SceneConfig::constellation();
        let scene = Scene::generate(&config, Viewport::new(1500.0, 900.0), Shade::Dark, &mut rng(), 1);
        let count = |g| scene.entities.glyph.iter().filter(|&&x| x == g).count();

        assert_eq!(scene.len(), 100);
        assert_eq!(count(Glyph::Code), 40);
        assert_eq!(count(Glyph::Photo), 40);
        assert_eq!(count(Glyph::Node), 20);
    }

    #[test]
    fn spawns_inside_surface_under_speed_cap() {
        let mut config = SceneConfig::tech_icons();
        config.physics.max_speed = 0.1;
        let viewport = Viewport::new(640.0, 480.0);
        let scene = Scene::generate(&config, viewport, Shade::Dark, &mut rng(), 1);
        let surface = viewport.surface(3.0);

        for i in 0..scene.len() {
            let (x, y) = scene.entities.pos(i);
            assert!(surface.contains(x, y));
            assert!(scene.entities.speed(i) <= 0.1 + 1e-6);
        }
    }

    #[test]
    fn ring_is_clamped_on_tiny_viewports() {
        let config = SceneConfig::reveal();
        let viewport = Viewport::new(200.0, 120.0);
        let scene = Scene::generate(&config, viewport, Shade::Light, &mut rng(), 1);
        for i in 0..scene.len() {
            let (x, y) = scene.entities.pos(i);
            assert!(viewport.contains(x, y));
        }
    }

    #[test]
    fn empty_viewport_gives_empty_scene() {
        let config = SceneConfig { density: Density::Fixed { count: 10 }, ..SceneConfig::reveal() };
        let scene = Scene::generate(&config, Viewport::new(0.0, 600.0), Shade::Dark, &mut rng(), 3);
        assert!(scene.is_empty());
        assert_eq!(scene.hub(), None);
        assert_eq!(scene.generation, 3);
    }

    #[test]
    fn oversized_fixed_count_is_capped() {
        let config = SceneConfig { density: Density::Fixed { count: usize::MAX }, ..SceneConfig::reveal() };
        let scene = Scene::generate(&config, Viewport::new(800.0, 600.0), Shade::Dark, &mut rng(), 1);
        assert_eq!(scene.len(), crate::sim::MAX_ENTITIES);
        assert_eq!(scene.hub(), Some((400.0, 300.0, 60.0)));
    }

    #[test]
    fn spawn_ranges_come_from_config() {
        let mut config = SceneConfig::tech_icons();
        config.spawn.initial_speed = 0.0;
        config.spawn.size = crate::config::Span::new(7.0, 7.0);
        let scene = Scene::generate(&config, Viewport::new(400.0, 300.0), Shade::Light, &mut rng(), 1);

        assert!(!scene.is_empty());
        for i in 0..scene.len() {
            assert_eq!(scene.entities.speed(i), 0.0);
            assert_eq!(scene.entities.size[i], 7.0);
        }
    }

    #[test]
    fn ambient_pulse_share() {
        let mut config = SceneConfig::ambient();
        config.density = Density::Fixed { count: 400 };
        let scene = Scene::generate(&config, Viewport::new(800.0, 600.0), Shade::Dark, &mut rng(), 1);
        let pulsing = scene.entities.pulse.iter().filter(|&&p| p > 0.0).count();
        assert!((60..=180).contains(&pulsing), "{pulsing}");

        config.spawn.pulse_share = 0.0;
        let scene = Scene::generate(&config, Viewport::new(800.0, 600.0), Shade::Dark, &mut rng(), 1);
        assert!(scene.entities.pulse.iter().all(|&p| p == 0.0));
    }
}
