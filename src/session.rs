// session.rs - One mounted background
//
// Owns the simulation, the pointer, and the reveal gate for a single surface.
// There is no global instance: mounting twice gives two independent sessions.
// The host drives it with `frame(now)` once per animation frame and feeds input
// through `InputAdapter`.

use crate::config::{Options, SceneConfig};
use crate::input::InputAdapter;
use crate::render::{Canvas, FrameInfo, draw_frame};
use crate::reveal::{ContentFrame, Cursor, RevealGate};
use crate::sim::{Pointer, Simulation};
use crate::world::{Theme, Viewport};

pub struct Session {
    sim: Simulation,
    pointer: Pointer,
    gate: RevealGate,

    theme: Theme,
    prefers_dark: bool,

    scroll: f32,
    cursor: Cursor,

    running: bool,
    mounted_at: Option<f64>,
}

impl Session {
    pub fn new(config: SceneConfig, viewport: Viewport, theme: Theme, prefers_dark: bool, seed: u64) -> Self {
        // Only a hub can be clicked, so decorative scenes start revealed
        let gate = if config.has_hub() {
            RevealGate::new(config.reveal)
        } else {
            RevealGate::ungated(config.reveal)
        };
        let sim = Simulation::new(config, viewport, theme.resolve(prefers_dark), seed);
        log::info!(
            "session {:?} {}x{}: {} entities",
            sim.config().preset,
            viewport.width,
            viewport.height,
            sim.scene().len()
        );
        Self {
            sim,
            pointer: Pointer::new(),
            gate,
            theme,
            prefers_dark,
            scroll: 0.0,
            cursor: Cursor::Default,
            running: false,
            mounted_at: None,
        }
    }

    /// Session from host options. `fallback_seed` is used when the options carry none.
    pub fn from_options(options: &Options, viewport: Viewport, prefers_dark: bool, fallback_seed: u64) -> Self {
        Self::new(
            options.scene_config(),
            viewport,
            options.theme,
            prefers_dark,
            options.seed.unwrap_or(fallback_seed),
        )
    }

    /// Begin animating. The first start marks the mount time for the hub hint.
    pub fn start(&mut self, now: f64) {
        if self.running { return; }
        self.running = true;
        self.mounted_at.get_or_insert(now);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance one frame. False when stopped.
    pub fn step(&mut self, now: f64) -> bool {
        if !self.running { return false; }
        let timeout = self.sim.config().physics.idle_timeout_ms;
        let pointer = self.pointer.active_at(now, timeout);
        self.sim.tick(pointer);
        true
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, now: f64) {
        let info = FrameInfo { now, hint: self.hint_visible(now) };
        draw_frame(canvas, &self.sim, info);
    }

    /// Step then draw. Nothing is drawn while stopped.
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C, now: f64) -> bool {
        if !self.step(now) { return false; }
        self.render(canvas, now);
        true
    }

    pub fn skip(&mut self, now: f64) -> bool {
        let revealed = self.gate.skip(now);
        if revealed { self.cursor = Cursor::Default; }
        revealed
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.sim.set_shade(theme.resolve(self.prefers_dark));
    }

    /// Host color-scheme preference changed
    pub fn set_prefers_dark(&mut self, prefers_dark: bool) {
        self.prefers_dark = prefers_dark;
        self.sim.set_shade(self.theme.resolve(prefers_dark));
    }

    pub fn hint_visible(&self, now: f64) -> bool {
        self.sim.config().has_hub()
            && self.mounted_at.is_some_and(|t| self.gate.hint_visible(t, now))
    }

    /// The surface only swallows pointer events while the hub can still be clicked
    pub fn pointer_events(&self) -> bool {
        self.sim.config().has_hub() && !self.gate.is_revealed()
    }

    /// Vertical css offset of the surface; scroll variants move up with the page
    pub fn surface_top(&self) -> f32 {
        if self.scrolls() { -self.scroll } else { 0.0 }
    }

    pub fn background_opacity(&self, now: f64) -> f32 {
        self.gate.background_opacity(now)
    }

    pub fn content(&self, now: f64) -> ContentFrame {
        self.gate.content(now)
    }

    // Accessors
    pub fn sim(&self) -> &Simulation { &self.sim }
    pub fn gate(&self) -> &RevealGate { &self.gate }
    pub fn pointer(&self) -> &Pointer { &self.pointer }
    pub fn theme(&self) -> Theme { self.theme }
    pub fn cursor(&self) -> Cursor { self.cursor }
    pub fn scroll(&self) -> f32 { self.scroll }
    pub fn is_running(&self) -> bool { self.running }
    pub fn is_revealed(&self) -> bool { self.gate.is_revealed() }
    pub fn skip_visible(&self) -> bool { self.gate.skip_visible() }
    pub fn mounted_at(&self) -> Option<f64> { self.mounted_at }

    fn scrolls(&self) -> bool {
        self.sim.config().scroll_multiplier > 1.0
    }

    // Window coordinates to surface coordinates
    fn to_surface(&self, x: f32, y: f32) -> (f32, f32) {
        if self.scrolls() { (x, y + self.scroll) } else { (x, y) }
    }
}

impl InputAdapter for Session {
    fn on_pointer_move(&mut self, x: f32, y: f32, now: f64) {
        let (x, y) = self.to_surface(x, y);
        self.pointer.moved(x, y, now);
        self.cursor = self.gate.cursor(self.sim.scene().hub(), x, y);
    }

    fn on_click(&mut self, x: f32, y: f32, now: f64) -> bool {
        let (x, y) = self.to_surface(x, y);
        let revealed = self.gate.click(self.sim.scene().hub(), x, y, now);
        if revealed { self.cursor = Cursor::Default; }
        revealed
    }

    fn on_resize(&mut self, width: f32, height: f32) {
        self.sim.resize(Viewport::new(width, height));
    }

    fn on_scroll(&mut self, offset: f32) {
        self.scroll = offset.max(0.0);
    }
}
