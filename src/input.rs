// input.rs - Host input seam
//
// Whatever owns the event listeners (the browser shell, the headless Engine,
// a test) feeds the session through these four calls. Coordinates are
// surface-relative css px; `now` is the host clock in ms.

pub trait InputAdapter {
    fn on_pointer_move(&mut self, x: f32, y: f32, now: f64);

    /// Returns true if the click revealed the page
    fn on_click(&mut self, x: f32, y: f32, now: f64) -> bool;

    fn on_resize(&mut self, width: f32, height: f32);

    /// Vertical page scroll, px
    fn on_scroll(&mut self, offset: f32);
}
