// sim/ - Background simulation
//
// Entity storage is Structure-of-Arrays; each concern in its own module.
// The simulation owns the scene and its RNG and knows nothing about the host:
// time and pointer state are passed in, so a fixed seed and a fixed input
// sequence always give the same frames.

mod entity;
pub mod physics;
mod pointer;
mod scene;

pub use entity::{Entities, Glyph, Links, Spawn};
pub use pointer::Pointer;
pub use scene::{Scene, assign_links, collect_edges};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SceneConfig;
use crate::world::{Shade, Viewport};

// Capacity limit
pub const MAX_ENTITIES: usize = 512;

// Pulse phase advance per frame
const PHASE_STEP: f64 = 0.5;

pub struct Simulation {
    config: SceneConfig,

    // Window size and the (possibly taller) drawing surface
    viewport: Viewport,
    surface: Viewport,

    shade: Shade,
    scene: Scene,

    rng: StdRng,
    phase: f64,
    frame: u64,
}

impl Simulation {
    pub fn new(config: SceneConfig, viewport: Viewport, shade: Shade, seed: u64) -> Self {
        let surface = viewport.surface(config.scroll_multiplier);
        let mut sim = Self {
            config,
            viewport,
            surface,
            shade,
            scene: Scene::empty(),
            rng: StdRng::seed_from_u64(seed),
            phase: 0.0,
            frame: 0,
        };
        sim.regenerate();
        sim
    }

    /// Track a new window size. The old scene's bounds and links are stale,
    /// so a new one replaces it.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport { return; }
        self.viewport = viewport;
        self.surface = viewport.surface(self.config.scroll_multiplier);
        self.regenerate();
    }

    /// Colors are baked at generation, so a theme change regenerates
    pub fn set_shade(&mut self, shade: Shade) {
        if shade == self.shade { return; }
        self.shade = shade;
        self.regenerate();
    }

    pub fn regenerate(&mut self) {
        let next = Scene::generate(
            &self.config,
            self.viewport,
            self.shade,
            &mut self.rng,
            self.scene.generation + 1,
        );
        self.scene = next;
    }

    /// One frame of motion. `pointer` is the pointer position if it is active.
    pub fn tick(&mut self, pointer: Option<(f32, f32)>) {
        physics::step(&mut self.scene.entities, self.surface, pointer, &self.config.physics);
        physics::pulse(&mut self.scene.entities, self.phase);
        self.phase += PHASE_STEP;
        self.frame += 1;
    }

    // Accessors
    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn config(&self) -> &SceneConfig { &self.config }
    pub fn viewport(&self) -> Viewport { self.viewport }
    pub fn surface(&self) -> Viewport { self.surface }
    pub fn shade(&self) -> Shade { self.shade }
    pub fn frame(&self) -> u64 { self.frame }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_regenerates_with_fresh_links() {
        let mut config = SceneConfig::tech_icons();
        config.density = crate::config::Density::PerWidth { spacing: 20.0, cap: 200 };
        let mut sim = Simulation::new(config, Viewport::new(800.0, 600.0), Shade::Dark, 9);
        assert_eq!(sim.scene().len(), 40);
        assert_eq!(sim.scene().generation, 1);

        sim.resize(Viewport::new(1600.0, 600.0));
        let scene = sim.scene();
        assert_eq!(scene.len(), 80);
        assert_eq!(scene.generation, 2);
        assert_eq!(sim.surface(), Viewport::new(1600.0, 1800.0));
        for links in &scene.entities.links {
            assert!(links.iter().all(|&t| (t as usize) < scene.len()));
        }
        assert_eq!(scene.edges, collect_edges(&scene.entities.links));
    }

    #[test]
    fn same_size_resize_keeps_scene() {
        let mut sim = Simulation::new(SceneConfig::ambient(), Viewport::new(800.0, 600.0), Shade::Light, 1);
        sim.resize(Viewport::new(800.0, 600.0));
        assert_eq!(sim.scene().generation, 1);
    }

    #[test]
    fn theme_change_rebakes_colors() {
        let mut sim = Simulation::new(SceneConfig::reveal(), Viewport::new(800.0, 600.0), Shade::Light, 1);
        let hub = sim.scene().hub.unwrap();
        let before = sim.scene().entities.color[hub];

        sim.set_shade(Shade::Dark);
        let after = sim.scene().entities.color[sim.scene().hub.unwrap()];
        assert_ne!(before, after);
        assert_eq!(sim.scene().generation, 2);
    }

    #[test]
    fn tick_advances_frame_counter() {
        let mut sim = Simulation::new(SceneConfig::ambient(), Viewport::new(320.0, 240.0), Shade::Dark, 5);
        for _ in 0..3 { sim.tick(None); }
        assert_eq!(sim.frame(), 3);
    }
}
