use wasm_bindgen::prelude::*;

// ============================================================================
// BACKDROP ENGINE - Animated canvas backgrounds with an intro reveal gate
// ============================================================================

pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod reveal;
pub mod session;
pub mod sim;
pub mod world;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{Options, Preset, SceneConfig};
pub use error::EngineError;
pub use input::InputAdapter;
pub use reveal::{RevealGate, RevealState};
pub use session::Session;
pub use world::{Theme, Viewport};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Seed for sessions whose options carry none
pub fn entropy_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * u64::MAX as f64) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        rand::random()
    }
}

/// Headless engine: the host owns the canvas and the clock, and reads state back
#[wasm_bindgen]
pub struct Engine {
    session: Session,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, options_json: &str) -> Result<Engine, JsValue> {
        let options = Options::from_json(options_json)?;
        let session = Session::from_options(&options, Viewport::new(width, height), false, entropy_seed());
        Ok(Self { session })
    }

    /// Advance one frame at host time `now` (ms). The first tick starts the clock.
    pub fn tick(&mut self, now: f64) {
        self.session.start(now);
        self.session.step(now);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, now: f64) {
        self.session.on_pointer_move(x, y, now);
    }

    /// True if the click landed on the hub and revealed the page
    pub fn click(&mut self, x: f32, y: f32, now: f64) -> bool {
        self.session.on_click(x, y, now)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.on_resize(width, height);
    }

    pub fn scroll(&mut self, offset: f32) {
        self.session.on_scroll(offset);
    }

    pub fn skip(&mut self, now: f64) -> bool {
        self.session.skip(now)
    }

    pub fn set_theme(&mut self, name: &str) -> Result<(), JsValue> {
        let theme = Theme::parse(name).ok_or_else(|| EngineError::UnknownTheme(name.to_owned()))?;
        self.session.set_theme(theme);
        Ok(())
    }

    pub fn set_prefers_dark(&mut self, dark: bool) {
        self.session.set_prefers_dark(dark);
    }

    pub fn is_revealed(&self) -> bool { self.session.is_revealed() }
    pub fn skip_visible(&self) -> bool { self.session.skip_visible() }
    pub fn entity_count(&self) -> usize { self.session.sim().scene().len() }
    pub fn frame(&self) -> u64 { self.session.sim().frame() }
    pub fn background_opacity(&self, now: f64) -> f32 { self.session.background_opacity(now) }
    pub fn content_opacity(&self, now: f64) -> f32 { self.session.content(now).opacity }
    pub fn content_offset(&self, now: f64) -> f32 { self.session.content(now).offset }
    pub fn cursor(&self) -> String { self.session.cursor().css().to_owned() }

    /// Entity positions, interleaved x, y
    pub fn positions(&self) -> Vec<f32> {
        let e = &self.session.sim().scene().entities;
        e.x.iter().zip(&e.y).flat_map(|(&x, &y)| [x, y]).collect()
    }
}

impl Engine {
    pub fn session(&self) -> &Session {
        &self.session
    }
}
