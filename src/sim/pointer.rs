// pointer.rs - Pointer position with idle expiry
//
// Activity is a timestamp compared against the frame clock, not a timer.
// Each move overwrites the previous one, so rapid moves never stack expiries.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    last_move: Option<f64>,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move at `now` (ms)
    pub fn moved(&mut self, x: f32, y: f32, now: f64) {
        self.x = x;
        self.y = y;
        self.last_move = Some(now);
    }

    /// Active until `timeout` ms have passed since the last move
    pub fn is_active(&self, now: f64, timeout: f64) -> bool {
        match self.last_move {
            Some(t) => now - t < timeout,
            None => false,
        }
    }

    /// Position if active, for the stepper
    pub fn active_at(&self, now: f64, timeout: f64) -> Option<(f32, f32)> {
        self.is_active(now, timeout).then_some((self.x, self.y))
    }

    pub fn last_move(&self) -> Option<f64> {
        self.last_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_until_first_move() {
        let p = Pointer::new();
        assert!(!p.is_active(0.0, 2000.0));
        assert_eq!(p.active_at(0.0, 2000.0), None);
    }

    #[test]
    fn expires_after_timeout() {
        let mut p = Pointer::new();
        p.moved(10.0, 20.0, 0.0);
        assert!(p.is_active(1999.9, 2000.0));
        assert!(!p.is_active(2000.0 + 1e-3, 2000.0));
    }

    #[test]
    fn later_move_supersedes_expiry() {
        let mut p = Pointer::new();
        p.moved(10.0, 20.0, 0.0);
        p.moved(30.0, 40.0, 1500.0);
        assert_eq!(p.active_at(2500.0, 2000.0), Some((30.0, 40.0)));
        assert!(!p.is_active(3500.0, 2000.0));
    }
}
