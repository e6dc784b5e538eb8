// entity.rs - Particles, glyphs and nodes
//
// Structure-of-Arrays layout, same as the rest of the engine: one column per
// field, the index is the entity's identity for one scene generation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::MAX_ENTITIES;
use crate::world::Rgba;

pub type Links = SmallVec<[u32; 3]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Glyph {
    Dot,
    Node,
    Computer,
    React,
    MongoDb,
    Express,
    NodeJs,
    JavaScript,
    NextJs,
    Tailwind,
    Camera,
    Code,
    Photo,
}

impl Glyph {
    /// Glyphs drawn as plain filled circles
    pub fn is_particle(self) -> bool {
        matches!(self, Glyph::Dot | Glyph::Node)
    }
}

/// Everything needed to place one entity
#[derive(Clone, Copy, Debug)]
pub struct Spawn {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub glyph: Glyph,
    pub style: u8,
    pub color: Rgba,
    pub opacity: f32,
    pub pulse: f32,
    pub rotation: f32,
    pub spin: f32,
    pub pinned: bool,
}

impl Spawn {
    pub fn at(x: f32, y: f32, size: f32, glyph: Glyph, color: Rgba) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            size,
            glyph,
            style: 0,
            color,
            opacity: 1.0,
            pulse: 0.0,
            rotation: 0.0,
            spin: 0.0,
            pinned: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Entities {
    // Position
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Velocity
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    // Appearance, fixed at creation except opacity and rotation
    pub size: Vec<f32>,
    pub glyph: Vec<Glyph>,
    pub style: Vec<u8>,
    pub color: Vec<Rgba>,
    pub opacity: Vec<f32>,
    pub pulse: Vec<f32>,   // 0 = steady
    pub rotation: Vec<f32>,
    pub spin: Vec<f32>,

    // Hub and ring never move
    pub pinned: Vec<bool>,

    // Outgoing connections (indices into this generation)
    pub links: Vec<Links>,
}

impl Entities {
    pub fn with_capacity(n: usize) -> Self {
        let n = n.min(MAX_ENTITIES);
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            vx: Vec::with_capacity(n),
            vy: Vec::with_capacity(n),
            size: Vec::with_capacity(n),
            glyph: Vec::with_capacity(n),
            style: Vec::with_capacity(n),
            color: Vec::with_capacity(n),
            opacity: Vec::with_capacity(n),
            pulse: Vec::with_capacity(n),
            rotation: Vec::with_capacity(n),
            spin: Vec::with_capacity(n),
            pinned: Vec::with_capacity(n),
            links: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Append an entity; returns its index, or None at capacity
    pub fn push(&mut self, s: Spawn) -> Option<usize> {
        if self.len() >= MAX_ENTITIES { return None; }

        let i = self.len();
        self.x.push(s.x);
        self.y.push(s.y);
        self.vx.push(s.vx);
        self.vy.push(s.vy);
        self.size.push(s.size);
        self.glyph.push(s.glyph);
        self.style.push(s.style);
        self.color.push(s.color);
        self.opacity.push(s.opacity.clamp(0.0, 1.0));
        self.pulse.push(s.pulse);
        self.rotation.push(s.rotation);
        self.spin.push(s.spin);
        self.pinned.push(s.pinned);
        self.links.push(Links::new());
        Some(i)
    }

    #[inline]
    pub fn pos(&self, i: usize) -> (f32, f32) {
        (self.x[i], self.y[i])
    }

    #[inline]
    pub fn speed(&self, i: usize) -> f32 {
        (self.vx[i] * self.vx[i] + self.vy[i] * self.vy[i]).sqrt()
    }
}
