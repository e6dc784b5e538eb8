// web.rs - Browser shell
//
// Binds a Session to a <canvas>: a 2d context as the drawing surface, window
// listeners as input, requestAnimationFrame as the clock. Everything mount
// registers is owned by the returned handle and released by unmount.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, CustomEvent, CustomEventInit, Event, EventTarget, HtmlCanvasElement,
    MediaQueryList, MouseEvent, Window,
};

use crate::config::Options;
use crate::error::{self, EngineError};
use crate::input::InputAdapter;
use crate::render::{Baseline, Canvas};
use crate::session::Session;
use crate::world::{Rgba, Theme, Viewport};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// ============================================================================
// 2d context as a Canvas
// ============================================================================

struct Ctx2d<'a>(&'a CanvasRenderingContext2d);

// Drawing calls only fail on non-finite input; a bad frame is dropped, not fatal
impl Canvas for Ctx2d<'_> {
    fn clear(&mut self, width: f32, height: f32) {
        self.0.clear_rect(0.0, 0.0, width as f64, height as f64);
    }
    fn save(&mut self) { self.0.save(); }
    fn restore(&mut self) { self.0.restore(); }
    fn translate(&mut self, x: f32, y: f32) { let _ = self.0.translate(x as f64, y as f64); }
    fn rotate(&mut self, angle: f32) { let _ = self.0.rotate(angle as f64); }
    fn set_alpha(&mut self, alpha: f32) { self.0.set_global_alpha(alpha.clamp(0.0, 1.0) as f64); }
    fn set_fill(&mut self, color: Rgba) { self.0.set_fill_style_str(&color.to_string()); }
    fn set_stroke(&mut self, color: Rgba) { self.0.set_stroke_style_str(&color.to_string()); }
    fn set_line_width(&mut self, width: f32) { self.0.set_line_width(width as f64); }

    fn set_font(&mut self, px: f32, bold: bool) {
        let weight = if bold { "bold " } else { "" };
        self.0.set_font(&format!("{weight}{px}px sans-serif"));
    }

    fn begin_path(&mut self) { self.0.begin_path(); }
    fn close_path(&mut self) { self.0.close_path(); }
    fn move_to(&mut self, x: f32, y: f32) { self.0.move_to(x as f64, y as f64); }
    fn line_to(&mut self, x: f32, y: f32) { self.0.line_to(x as f64, y as f64); }

    fn arc(&mut self, x: f32, y: f32, r: f32, start: f32, end: f32) {
        let _ = self.0.arc(x as f64, y as f64, r.max(0.0) as f64, start as f64, end as f64);
    }

    fn ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, rotation: f32) {
        let _ = self.0.ellipse(
            x as f64,
            y as f64,
            rx.max(0.0) as f64,
            ry.max(0.0) as f64,
            rotation as f64,
            0.0,
            std::f64::consts::TAU,
        );
    }

    fn quadratic_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.0.quadratic_curve_to(cx as f64, cy as f64, x as f64, y as f64);
    }

    fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.0.bezier_curve_to(c1x as f64, c1y as f64, c2x as f64, c2y as f64, x as f64, y as f64);
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.0.rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill(&mut self) { self.0.fill(); }
    fn stroke(&mut self) { self.0.stroke(); }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, baseline: Baseline) {
        self.0.set_text_align("center");
        self.0.set_text_baseline(match baseline {
            Baseline::Alphabetic => "alphabetic",
            Baseline::Middle => "middle",
        });
        let _ = self.0.fill_text(text, x as f64, y as f64);
    }
}

// ============================================================================
// Listener bookkeeping
// ============================================================================

/// An event listener that unregisters itself on drop
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, kind: &'static str, f: impl FnMut(Event) + 'static) -> error::Result<Self> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), kind, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

// ============================================================================
// Mounted shell
// ============================================================================

struct Shell {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: RefCell<Session>,
    reveal_event: String,

    // Reveal already announced to the page
    announced: Cell<bool>,

    raf: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    frame_id: Cell<Option<i32>>,
    listeners: RefCell<Vec<Listener>>,
}

impl Shell {
    fn frame(&self, now: f64) {
        {
            let mut session = self.session.borrow_mut();
            if session.mounted_at().is_none() { session.start(now); }
            session.frame(&mut Ctx2d(&self.ctx), now);
        }
        self.apply_style(now);
        self.announce();
    }

    fn schedule(&self) {
        let raf = self.raf.borrow();
        let Some(cb) = raf.as_ref() else { return };
        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.frame_id.set(Some(id)),
            Err(err) => log::warn!("animation frame request failed: {}", EngineError::from(err)),
        }
    }

    fn apply_style(&self, now: f64) {
        let session = self.session.borrow();
        let style = self.canvas.style();
        let _ = style.set_property("opacity", &session.background_opacity(now).to_string());
        let _ = style.set_property("cursor", session.cursor().css());
        let events = if session.pointer_events() { "auto" } else { "none" };
        let _ = style.set_property("pointer-events", events);
        if session.sim().config().scroll_multiplier > 1.0 {
            let _ = style.set_property("top", &format!("{}px", session.surface_top()));
        }
    }

    // Dispatched outside any session borrow so page handlers may call back in
    fn announce(&self) {
        if self.announced.get() { return; }
        let cause = {
            let session = self.session.borrow();
            match session.gate().cause() {
                Some(cause) => format!("{cause:?}"),
                None => return,
            }
        };
        self.announced.set(true);

        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_str(&cause));
        let sent = CustomEvent::new_with_event_init_dict(&self.reveal_event, &init)
            .and_then(|event| self.window.dispatch_event(&event));
        if let Err(err) = sent {
            log::warn!("could not dispatch `{}`: {}", self.reveal_event, EngineError::from(err));
        }
    }

    /// Size the backing store to the session's surface
    fn fit(&self) {
        let (w, h) = self.session.borrow().sim().surface().pixels();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }

    fn teardown(&self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.listeners.borrow_mut().clear();
        self.raf.borrow_mut().take();
        self.session.borrow_mut().stop();
    }
}

fn viewport(window: &Window) -> Viewport {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(w as f32, h as f32)
}

fn dark_query(window: &Window) -> Option<MediaQueryList> {
    window.match_media(DARK_QUERY).ok().flatten()
}

fn open(canvas_id: &str, options_json: &str) -> error::Result<Rc<Shell>> {
    let options = Options::from_json(options_json)?;
    let window = web_sys::window().ok_or(EngineError::MissingWindow)?;
    let document = window.document().ok_or(EngineError::MissingDocument)?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| EngineError::CanvasNotFound(canvas_id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| EngineError::NotACanvas(canvas_id.to_owned()))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or(EngineError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| EngineError::ContextUnavailable)?;

    let query = dark_query(&window);
    let prefers_dark = query.as_ref().is_some_and(|q| q.matches());
    let session = Session::from_options(&options, viewport(&window), prefers_dark, crate::entropy_seed());

    let shell = Rc::new(Shell {
        window: window.clone(),
        canvas: canvas.clone(),
        ctx,
        session: RefCell::new(session),
        reveal_event: options.reveal_event().to_owned(),
        announced: Cell::new(false),
        raf: RefCell::new(None),
        frame_id: Cell::new(None),
        listeners: RefCell::new(Vec::new()),
    });
    shell.fit();

    let mut listeners = Vec::new();
    let win: &EventTarget = window.as_ref();

    let weak = Rc::downgrade(&shell);
    listeners.push(Listener::attach(win, "mousemove", move |event: Event| {
        let (Some(shell), Some(mouse)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else { return };
        let (x, y) = (mouse.client_x() as f32, mouse.client_y() as f32);
        shell.session.borrow_mut().on_pointer_move(x, y, event.time_stamp());
    })?);

    let weak = Rc::downgrade(&shell);
    listeners.push(Listener::attach(canvas.as_ref(), "click", move |event: Event| {
        let (Some(shell), Some(mouse)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else { return };
        let (x, y) = (mouse.client_x() as f32, mouse.client_y() as f32);
        shell.session.borrow_mut().on_click(x, y, event.time_stamp());
    })?);

    let weak = Rc::downgrade(&shell);
    listeners.push(Listener::attach(win, "resize", move |_| {
        let Some(shell) = weak.upgrade() else { return };
        let v = viewport(&shell.window);
        shell.session.borrow_mut().on_resize(v.width, v.height);
        shell.fit();
    })?);

    let weak = Rc::downgrade(&shell);
    listeners.push(Listener::attach(win, "scroll", move |_| {
        let Some(shell) = weak.upgrade() else { return };
        let offset = shell.window.scroll_y().unwrap_or(0.0) as f32;
        shell.session.borrow_mut().on_scroll(offset);
    })?);

    if let Some(query) = query {
        let weak = Rc::downgrade(&shell);
        let target: &EventTarget = query.as_ref();
        let q = query.clone();
        listeners.push(Listener::attach(target, "change", move |_| {
            let Some(shell) = weak.upgrade() else { return };
            shell.session.borrow_mut().set_prefers_dark(q.matches());
        })?);
    }

    *shell.listeners.borrow_mut() = listeners;
    start_loop(&shell);
    Ok(shell)
}

fn start_loop(shell: &Rc<Shell>) {
    let weak: Weak<Shell> = Rc::downgrade(shell);
    let tick = Closure::wrap(Box::new(move |now: f64| {
        let Some(shell) = weak.upgrade() else { return };
        shell.frame(now);
        shell.schedule();
    }) as Box<dyn FnMut(f64)>);
    *shell.raf.borrow_mut() = Some(tick);
    shell.schedule();
}

// ============================================================================
// JS surface
// ============================================================================

/// Handle to a mounted background. A handle whose mount failed is inert.
#[wasm_bindgen]
pub struct BackgroundHandle {
    shell: Option<Rc<Shell>>,
}

/// Attach a background to the canvas with id `canvas_id`
#[wasm_bindgen]
pub fn mount(canvas_id: &str, options_json: &str) -> BackgroundHandle {
    match open(canvas_id, options_json) {
        Ok(shell) => {
            log::info!("mounted on #{canvas_id}");
            BackgroundHandle { shell: Some(shell) }
        }
        Err(err) => {
            log::warn!("background disabled: {err}");
            BackgroundHandle { shell: None }
        }
    }
}

#[wasm_bindgen]
impl BackgroundHandle {
    pub fn is_mounted(&self) -> bool {
        self.shell.is_some()
    }

    /// Stop the loop and release every listener. Safe to call twice.
    pub fn unmount(&mut self) {
        if let Some(shell) = self.shell.take() {
            shell.teardown();
            log::info!("unmounted");
        }
    }

    pub fn skip(&self) -> bool {
        let Some(shell) = &self.shell else { return false };
        let now = clock(&shell.window);
        shell.session.borrow_mut().skip(now)
    }

    pub fn set_theme(&self, name: &str) -> Result<(), JsValue> {
        let theme = Theme::parse(name).ok_or_else(|| EngineError::UnknownTheme(name.to_owned()))?;
        if let Some(shell) = &self.shell {
            shell.session.borrow_mut().set_theme(theme);
        }
        Ok(())
    }

    pub fn is_revealed(&self) -> bool {
        self.shell.as_ref().is_some_and(|s| s.session.borrow().is_revealed())
    }

    pub fn skip_visible(&self) -> bool {
        self.shell.as_ref().is_some_and(|s| s.session.borrow().skip_visible())
    }

    pub fn content_opacity(&self, now: f64) -> f32 {
        match &self.shell {
            Some(shell) => shell.session.borrow().content(now).opacity,
            None => 1.0,
        }
    }

    pub fn content_offset(&self, now: f64) -> f32 {
        match &self.shell {
            Some(shell) => shell.session.borrow().content(now).offset,
            None => 0.0,
        }
    }
}

impl Drop for BackgroundHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

// Same clock as animation frame and event timestamps
fn clock(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}
