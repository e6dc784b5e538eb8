// reveal.rs - Intro gate
//
// Two states, one transition: Intro -> Revealed, triggered by clicking the hub
// or by the skip affordance. Nothing returns the gate to Intro. The visual
// crossfade (dim background, fade/slide content in) is a pure function of the
// time since the transition.

use crate::config::RevealParams;
use crate::world::distance;

// Content entrance ease, cubic-bezier(0.22, 1, 0.36, 1)
const CONTENT_EASE: [f64; 4] = [0.22, 1.0, 0.36, 1.0];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Intro,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    HubClick,
    Skip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        }
    }
}

/// Main content style at a point in the entrance transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentFrame {
    pub opacity: f32,
    /// Downward offset in px, slides to 0
    pub offset: f32,
}

#[derive(Clone, Debug)]
pub struct RevealGate {
    params: RevealParams,
    state: RevealState,
    revealed_at: Option<f64>,
    cause: Option<Trigger>,
}

impl RevealGate {
    pub fn new(params: RevealParams) -> Self {
        Self {
            params,
            state: RevealState::Intro,
            revealed_at: None,
            cause: None,
        }
    }

    /// Gate for backgrounds without a hub: already open, nothing to animate
    pub fn ungated(params: RevealParams) -> Self {
        Self { state: RevealState::Revealed, ..Self::new(params) }
    }

    /// Whether (x, y) lands on the hub (center x, center y, size)
    pub fn hits(&self, hub: (f32, f32, f32), x: f32, y: f32) -> bool {
        let (hx, hy, size) = hub;
        distance(hx, hy, x, y) < size * self.params.hit_scale
    }

    /// Handle a click. True if this click revealed the page.
    pub fn click(&mut self, hub: Option<(f32, f32, f32)>, x: f32, y: f32, now: f64) -> bool {
        match hub {
            Some(hub) if self.hits(hub, x, y) => self.reveal(Trigger::HubClick, now),
            _ => false,
        }
    }

    /// Skip the intro. True if this call revealed the page.
    pub fn skip(&mut self, now: f64) -> bool {
        self.reveal(Trigger::Skip, now)
    }

    fn reveal(&mut self, cause: Trigger, now: f64) -> bool {
        if self.state == RevealState::Revealed { return false; }
        self.state = RevealState::Revealed;
        self.revealed_at = Some(now);
        self.cause = Some(cause);
        log::info!("revealed by {cause:?} at {now:.0}ms");
        true
    }

    /// Cursor over the surface: a pointer hand while hovering the hub in Intro
    pub fn cursor(&self, hub: Option<(f32, f32, f32)>, x: f32, y: f32) -> Cursor {
        match hub {
            Some(hub) if self.state == RevealState::Intro && self.hits(hub, x, y) => Cursor::Pointer,
            _ => Cursor::Default,
        }
    }

    pub fn skip_visible(&self) -> bool {
        self.state == RevealState::Intro
    }

    /// Hub hint shows `hint_delay_ms` after mount, during the intro only
    pub fn hint_visible(&self, mounted_at: f64, now: f64) -> bool {
        self.state == RevealState::Intro && now - mounted_at >= self.params.hint_delay_ms
    }

    /// Background opacity: full during the intro, dims linearly once revealed
    pub fn background_opacity(&self, now: f64) -> f32 {
        match self.revealed_at {
            None => 1.0,
            Some(t) => {
                let k = progress(now - t, self.params.dim_ms) as f32;
                1.0 + (self.params.dim_opacity - 1.0) * k
            }
        }
    }

    pub fn content(&self, now: f64) -> ContentFrame {
        let k = match (self.state, self.revealed_at) {
            (RevealState::Intro, _) => 0.0,
            (RevealState::Revealed, None) => 1.0,
            (RevealState::Revealed, Some(t)) => {
                let [x1, y1, x2, y2] = CONTENT_EASE;
                cubic_bezier(x1, y1, x2, y2, progress(now - t, self.params.content_ms)) as f32
            }
        };
        ContentFrame {
            opacity: k,
            offset: self.params.content_offset * (1.0 - k),
        }
    }

    pub fn state(&self) -> RevealState { self.state }
    pub fn is_revealed(&self) -> bool { self.state == RevealState::Revealed }
    pub fn revealed_at(&self) -> Option<f64> { self.revealed_at }
    pub fn cause(&self) -> Option<Trigger> { self.cause }
}

#[inline]
fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 { return 1.0; }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// CSS cubic-bezier timing function: solve x(u) = t, return y(u)
pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 || t == 1.0 { return t; }

    let curve = |a: f64, b: f64, u: f64| {
        let v = 1.0 - u;
        3.0 * v * v * u * a + 3.0 * v * u * u * b + u * u * u
    };
    let slope = |a: f64, b: f64, u: f64| {
        let v = 1.0 - u;
        3.0 * v * v * a + 6.0 * v * u * (b - a) + 3.0 * u * u * (1.0 - b)
    };

    // Newton first, it usually lands in a few steps
    let mut u = t;
    for _ in 0..8 {
        let err = curve(x1, x2, u) - t;
        if err.abs() < 1e-7 { return curve(y1, y2, u); }
        let d = slope(x1, x2, u);
        if d.abs() < 1e-6 { break; }
        u = (u - err / d).clamp(0.0, 1.0);
    }

    // Bisection fallback
    let (mut lo, mut hi) = (0.0, 1.0);
    u = t;
    for _ in 0..50 {
        let x = curve(x1, x2, u);
        if (x - t).abs() < 1e-7 { break; }
        if x < t { lo = u } else { hi = u }
        u = (lo + hi) * 0.5;
    }
    curve(y1, y2, u)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HUB: (f32, f32, f32) = (400.0, 300.0, 60.0);

    fn gate() -> RevealGate {
        RevealGate::new(RevealParams::default())
    }

    #[test]
    fn hub_click_reveals() {
        let mut g = gate();
        assert!(g.skip_visible());
        assert!(g.click(Some(HUB), 420.0, 310.0, 5000.0));
        assert_eq!(g.state(), RevealState::Revealed);
        assert_eq!(g.cause(), Some(Trigger::HubClick));
        assert!(!g.skip_visible());
    }

    #[test]
    fn miss_stays_in_intro() {
        let mut g = gate();
        assert!(!g.click(Some(HUB), 600.0, 600.0, 0.0));
        assert!(!g.click(None, 400.0, 300.0, 0.0));
        assert_eq!(g.state(), RevealState::Intro);
    }

    #[test]
    fn hit_radius_is_exclusive() {
        let g = gate();
        assert!(g.hits(HUB, 489.9, 300.0));
        assert!(!g.hits(HUB, 490.0, 300.0));
    }

    #[test]
    fn reveal_happens_once() {
        let mut g = gate();
        assert!(g.skip(100.0));
        assert!(!g.skip(200.0));
        assert!(!g.click(Some(HUB), 400.0, 300.0, 300.0));
        assert_eq!(g.revealed_at(), Some(100.0));
        assert_eq!(g.cause(), Some(Trigger::Skip));
    }

    #[test]
    fn cursor_only_over_hub_during_intro() {
        let mut g = gate();
        assert_eq!(g.cursor(Some(HUB), 410.0, 290.0), Cursor::Pointer);
        assert_eq!(g.cursor(Some(HUB), 10.0, 10.0), Cursor::Default);
        g.skip(0.0);
        assert_eq!(g.cursor(Some(HUB), 410.0, 290.0), Cursor::Default);
    }

    #[test]
    fn hint_waits_for_delay() {
        let mut g = gate();
        assert!(!g.hint_visible(1000.0, 2999.0));
        assert!(g.hint_visible(1000.0, 3000.0));
        g.skip(3500.0);
        assert!(!g.hint_visible(1000.0, 4000.0));
    }

    #[test]
    fn background_dims_over_a_second() {
        let mut g = gate();
        assert_eq!(g.background_opacity(0.0), 1.0);
        g.skip(1000.0);
        assert_eq!(g.background_opacity(1000.0), 1.0);
        assert!((g.background_opacity(1500.0) - 0.65).abs() < 1e-6);
        assert!((g.background_opacity(9000.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn content_fades_and_slides_in() {
        let mut g = gate();
        assert_eq!(g.content(0.0), ContentFrame { opacity: 0.0, offset: 20.0 });
        g.skip(0.0);
        let mid = g.content(400.0);
        assert!(mid.opacity > 0.5 && mid.opacity < 1.0);
        assert!(mid.offset > 0.0 && mid.offset < 10.0);
        assert_eq!(g.content(800.0), ContentFrame { opacity: 1.0, offset: 0.0 });
    }

    #[test]
    fn ease_is_monotonic_with_fixed_ends() {
        let [x1, y1, x2, y2] = CONTENT_EASE;
        assert_eq!(cubic_bezier(x1, y1, x2, y2, 0.0), 0.0);
        assert_eq!(cubic_bezier(x1, y1, x2, y2, 1.0), 1.0);
        let mut last = 0.0;
        for i in 1..100 {
            let y = cubic_bezier(x1, y1, x2, y2, i as f64 / 100.0);
            assert!(y >= last);
            last = y;
        }
        // Linear curve is the identity
        assert!((cubic_bezier(0.25, 0.25, 0.75, 0.75, 0.3) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn ungated_shows_content_without_dimming() {
        let mut g = RevealGate::ungated(RevealParams::default());
        assert!(g.is_revealed());
        assert!(!g.skip_visible());
        assert!(!g.hint_visible(0.0, 1e6));
        assert_eq!(g.content(0.0), ContentFrame { opacity: 1.0, offset: 0.0 });
        assert_eq!(g.background_opacity(1e6), 1.0);

        assert!(!g.skip(10.0));
        assert!(!g.click(Some(HUB), 400.0, 300.0, 20.0));
        assert_eq!(g.cause(), None);
        assert_eq!(g.revealed_at(), None);
    }
}
