// viewport.rs - Surface dimensions
//
// The drawing surface tracks the window. Long-scroll variants stretch it to a
// multiple of the viewport height and slide it up as the page scrolls.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Negative or NaN sizes collapse to zero
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Drawing surface for this viewport, `multiplier` x the viewport height
    pub fn surface(self, multiplier: f32) -> Self {
        Self::new(self.width, self.height * multiplier.max(1.0))
    }

    pub fn center(self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }

    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn contains(self, x: f32, y: f32) -> bool {
        x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }

    /// Pixel size for the canvas element
    pub fn pixels(self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }
}

/// Bounce a coordinate off [0, max]: returns the clamped position and the
/// (possibly negated) velocity.
#[inline(always)]
pub fn reflect(pos: f32, vel: f32, max: f32) -> (f32, f32) {
    if pos < 0.0 || pos > max {
        (pos.clamp(0.0, max), -vel)
    } else {
        (pos, vel)
    }
}

#[inline(always)]
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}
