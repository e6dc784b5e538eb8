// physics.rs - Per-frame entity update
//
// Damped, impulse-driven motion: integrate, bounce off the surface edges,
// get pushed away from an active pointer, cap speed, bleed off energy.
// Pinned entities only spin.

use std::f32::consts::TAU;

use super::Entities;
use crate::config::Physics;
use crate::world::{Viewport, reflect};

// Pulsing opacity swing per frame
const PULSE_AMPLITUDE: f32 = 0.01;

/// Advance every entity by one frame
pub fn step(e: &mut Entities, bounds: Viewport, pointer: Option<(f32, f32)>, p: &Physics) {
    let friction = p.friction.clamp(0.0, 1.0);

    for i in 0..e.len() {
        if !e.pinned[i] {
            // Integrate, then reflect off the edges
            let (x, vx) = reflect(e.x[i] + e.vx[i], e.vx[i], bounds.width);
            let (y, vy) = reflect(e.y[i] + e.vy[i], e.vy[i], bounds.height);

            let (mut vx, mut vy) = (vx, vy);
            if let Some((px, py)) = pointer {
                let (ix, iy) = repel(x, y, px, py, p);
                vx += ix;
                vy += iy;
            }

            let (vx, vy) = limit(vx, vy, p.max_speed);
            e.x[i] = x;
            e.y[i] = y;
            e.vx[i] = vx * friction;
            e.vy[i] = vy * friction;
        }

        e.rotation[i] = wrap_angle(e.rotation[i] + e.spin[i]);
    }
}

/// Impulse pushing (x, y) away from the pointer, linear falloff to zero at
/// `repel_radius`
#[inline]
pub fn repel(x: f32, y: f32, px: f32, py: f32, p: &Physics) -> (f32, f32) {
    if p.repel_divisor <= 0.0 { return (0.0, 0.0); }

    let dx = x - px;
    let dy = y - py;
    let d = (dx * dx + dy * dy).sqrt();
    if d >= p.repel_radius { return (0.0, 0.0); }

    let force = (p.repel_radius - d) / p.repel_divisor;
    if d > f32::EPSILON {
        (dx / d * force, dy / d * force)
    } else {
        // Dead center: pick a direction rather than divide by zero
        (force, 0.0)
    }
}

/// Rescale (vx, vy) down to `max` if faster
#[inline]
pub fn limit(vx: f32, vy: f32, max: f32) -> (f32, f32) {
    let max = max.max(0.0);
    let speed = (vx * vx + vy * vy).sqrt();
    if speed > max {
        let k = max / speed;
        (vx * k, vy * k)
    } else {
        (vx, vy)
    }
}

#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let w = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negatives
    if w >= TAU { 0.0 } else { w }
}

/// Oscillate opacity of pulsing entities. `phase` is unbounded.
pub fn pulse(e: &mut Entities, phase: f64) {
    for i in 0..e.len() {
        let speed = e.pulse[i];
        if speed <= 0.0 { continue; }
        let wave = (phase * f64::from(speed)).sin() as f32;
        e.opacity[i] = (e.opacity[i] + wave * PULSE_AMPLITUDE).clamp(0.0, 1.0);
    }
}
