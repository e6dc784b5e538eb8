// glyph.rs - Per-kind drawing routines
//
// Every routine draws around the origin after the painter has translated and
// rotated to the entity, except particles (no rotation) and the hub (upright,
// with text).

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI, TAU};

use super::canvas::{Baseline, Canvas};
use crate::sim::{Entities, Glyph};
use crate::world::{self, Rgba, Shade};

pub const HUB_TITLE: [&str; 2] = ["MERN", "Portfolio"];
pub const HUB_HINT: [&str; 2] = ["Click to view", "portfolio"];

// Fixed crosshair spots for the focus-frame photo glyph (fractions of size)
const FOCUS_POINTS: [(f32, f32); 5] = [(-0.25, -0.2), (0.2, -0.28), (0.0, 0.05), (-0.3, 0.25), (0.28, 0.22)];

const JS_INK: Rgba = Rgba::new(0, 0, 0, 0.7);

pub struct Painter<'a, C: Canvas + ?Sized> {
    pub c: &'a mut C,
    pub shade: Shade,
    /// Frame time in ms, drives electrons and link sway
    pub now: f64,
}

impl<'a, C: Canvas + ?Sized> Painter<'a, C> {
    pub fn new(c: &'a mut C, shade: Shade, now: f64) -> Self {
        Self { c, shade, now }
    }

    /// Draw entity `i`; `hint` adds the call-to-action under the hub screen
    pub fn entity(&mut self, e: &Entities, i: usize, hint: bool) {
        let (x, y) = e.pos(i);
        let size = e.size[i];
        let color = e.color[i];
        let glyph = e.glyph[i];

        if glyph == Glyph::Computer {
            self.computer(x, y, size, color, hint);
            return;
        }

        if glyph.is_particle() {
            self.c.begin_path();
            self.c.circle(x, y, size);
            self.c.set_fill(color);
            self.c.set_alpha(e.opacity[i]);
            self.c.fill();
            self.c.set_alpha(1.0);
            return;
        }

        self.c.save();
        self.c.translate(x, y);
        self.c.rotate(e.rotation[i]);
        self.c.set_alpha(e.opacity[i]);

        match glyph {
            Glyph::React => self.react(size, color),
            Glyph::MongoDb => self.mongodb(size, color),
            Glyph::Express => self.express(size, color),
            Glyph::NodeJs => self.nodejs(size, color),
            Glyph::JavaScript => self.javascript(size, color),
            Glyph::NextJs => self.nextjs(size, color),
            Glyph::Tailwind => self.tailwind(size, color),
            Glyph::Camera => self.camera(size, color),
            Glyph::Code => self.code(size, color, e.style[i]),
            Glyph::Photo => self.photo(size, color, e.style[i]),
            Glyph::Dot | Glyph::Node | Glyph::Computer => {}
        }

        self.c.restore();
    }

    // Monitor with stand; labelled screen
    fn computer(&mut self, x: f32, y: f32, s: f32, color: Rgba, hint: bool) {
        let c = &mut *self.c;
        c.set_fill(color);
        c.set_stroke(color);
        c.set_line_width(2.0);

        // Body
        c.begin_path();
        c.round_rect(x - s, y - s * 0.8, s * 2.0, s * 1.5, 5.0);
        c.fill();
        c.stroke();

        // Screen
        c.set_fill(world::screen_color(self.shade));
        c.begin_path();
        c.round_rect(x - s * 0.9, y - s * 0.7, s * 1.8, s * 1.2, 2.0);
        c.fill();
        c.stroke();

        // Stand
        c.set_fill(color);
        c.begin_path();
        c.round_rect(x - s * 0.2, y + s * 0.7, s * 0.4, s * 0.2, 5.0);
        c.fill();
        c.stroke();

        // Base
        c.begin_path();
        c.ellipse(x, y + s * 0.9, s * 0.5, s * 0.1, 0.0);
        c.fill();
        c.stroke();

        c.set_fill(world::screen_text(self.shade));
        c.set_font(s * 0.2, false);
        c.fill_text(HUB_TITLE[0], x, y - s * 0.3, Baseline::Alphabetic);
        c.fill_text(HUB_TITLE[1], x, y - s * 0.1, Baseline::Alphabetic);

        if hint {
            c.set_font(s * 0.12, false);
            c.set_fill(world::hint_text(self.shade));
            c.fill_text(HUB_HINT[0], x, y + s * 0.2, Baseline::Alphabetic);
            c.fill_text(HUB_HINT[1], x, y + s * 0.35, Baseline::Alphabetic);
        }
    }

    // Atom: nucleus, three orbits, an electron riding each
    fn react(&mut self, s: f32, color: Rgba) {
        let c = &mut *self.c;
        let orbit = s * 0.8;
        c.set_stroke(color);
        c.set_fill(color);
        c.set_line_width(2.0);

        c.begin_path();
        c.circle(0.0, 0.0, s * 0.2);
        c.fill();

        let t = (self.now * 0.001) as f32;
        for i in 0..3 {
            let tilt = i as f32 * FRAC_PI_3;
            c.begin_path();
            c.ellipse(0.0, 0.0, orbit, orbit * 0.4, tilt);
            c.stroke();

            let a = (t + i as f32 * PI / 1.5).rem_euclid(TAU);
            let ex = a.cos() * orbit;
            let ey = a.sin() * orbit * 0.4;
            let (sin, cos) = tilt.sin_cos();
            c.begin_path();
            c.circle(ex * cos - ey * sin, ex * sin + ey * cos, s * 0.1);
            c.fill();
        }
    }

    // Leaf with a soft highlight
    fn mongodb(&mut self, s: f32, color: Rgba) {
        let c = &mut *self.c;
        c.set_fill(color);
        c.begin_path();
        c.move_to(0.0, -s * 0.8);
        c.bezier_to(s * 0.5, -s * 0.8, s * 0.8, -s * 0.4, s * 0.8, s * 0.4);
        c.bezier_to(s * 0.8, s * 0.8, 0.0, s * 0.8, 0.0, s * 0.8);
        c.bezier_to(-s * 0.8, s * 0.8, -s * 0.8, s * 0.4, -s * 0.8, s * 0.4);
        c.bezier_to(-s * 0.8, -s * 0.4, -s * 0.5, -s * 0.8, 0.0, -s * 0.8);
        c.fill();

        c.set_fill(world::highlight(self.shade));
        c.begin_path();
        c.ellipse(-s * 0.3, -s * 0.3, s * 0.2, s * 0.4, FRAC_PI_4);
        c.fill();
    }

    // Stylized E
    fn express(&mut self, s: f32, color: Rgba) {
        let c = &mut *self.c;
        c.set_stroke(color);
        c.set_line_width(s * 0.1);
        for (y, right) in [(-0.4, 0.6), (0.0, 0.3), (0.4, 0.6)] {
            c.begin_path();
            c.move_to(-s * 0.6, s * y);
            c.line_to(s * right, s * y);
            c.stroke();
        }
    }

    fn nodejs(&mut self, s: f32, color: Rgba) {
        let c = &mut *self.c;
        c.set_fill(color);
        c.begin_path();
        for i in 0..6 {
            let a = i as f32 * FRAC_PI_3 - FRAC_PI_2;
            let (px, py) = (a.cos() * s * 0.8, a.sin() * s * 0.8);
            if i == 0 { c.move_to(px, py) } else { c.line_to(px, py) }
        }
        c.close_path();
        c.fill();

        c.set_fill(world::letter_ink(self.shade));
        c.set_font(s * 0.8, true);
        c.fill_text("N", 0.0, 0.0, Baseline::Middle);
    }

    fn javascript(&mut self, s: f32, color: Rgba) {
        let c = &mut *self.c;
        c.set_fill(color);
        c.begin_path();
        c.rect(-s * 0.7, -s * 0.7, s * 1.4, s * 1.4);
        c.fill();

        c.set_fill(JS_INK);
        c.set_font(s * 0.7, true);
        c.fill_text("JS", 0.0, 0.0, Baseline::Middle);
    }

    fn nextjs(&mut self, s: f32, color: Rgba) {
        let c = &mut *self.c;
        c.set_fill(color);
        c.begin_path();
        c.circle(0.0, 0.0, s * 0.8);
        c.fill();

        c.set_fill(world::letter_ink(self.shade));
        c.set_font(s, true);
        c.fill_text("N", 0.0, 0.0, Baseline::Middle);
    }

    // Three stacked double waves
    fn tailwind(&mut self, s: f32, color: Rgba) {
        let c = &mut *self.c;
        let wh = s * 0.2;
        let ww = s * 0.3;
        c.set_stroke(color);
        c.set_line_width(s * 0.15);

        for i in 0..3 {
            let y = (i as f32 - 1.0) * wh * 1.5;
            c.begin_path();
            c.move_to(-s, y);
            c.bezier_to(-s + ww, y - wh, -s + ww * 2.0, y + wh, -s + ww * 3.0, y);
            c.bezier_to(-s + ww * 4.0, y - wh, -s + ww * 5.0, y + wh, -s + ww * 6.0, y);
            c.stroke();
        }
    }

    fn camera(&mut self, s: f32, color: Rgba) {
        let c = &mut *self.c;
        c.set_stroke(color);
        c.set_fill(color);
        c.set_line_width(2.0);

        c.begin_path();
        c.round_rect(-s * 0.6, -s * 0.4, s * 1.2, s * 0.8, 5.0);
        c.stroke();

        c.begin_path();
        c.circle(0.0, 0.0, s * 0.3);
        c.stroke();

        c.begin_path();
        c.circle(0.0, 0.0, s * 0.15);
        c.fill();

        c.begin_path();
        c.rect(s * 0.3, -s * 0.4, s * 0.15, s * 0.15);
        c.fill();
    }

    // Braces, angle brackets, parentheses, or equals-with-dot
    fn code(&mut self, s: f32, color: Rgba, style: u8) {
        let c = &mut *self.c;
        let h = s / 2.0;
        let q = s / 4.0;
        c.set_stroke(color);
        c.set_fill(color);
        c.set_line_width(2.0);

        match style % 4 {
            0 => {
                for side in [-1.0, 1.0] {
                    c.begin_path();
                    c.move_to(side * h, -h);
                    c.line_to(side * q, -h);
                    c.line_to(side * q, h);
                    c.line_to(side * h, h);
                    c.stroke();
                }
            }
            1 => {
                for side in [-1.0, 1.0] {
                    c.begin_path();
                    c.move_to(-h, 0.0);
                    c.line_to(0.0, side * h);
                    c.line_to(h, 0.0);
                    c.stroke();
                }
            }
            2 => {
                c.begin_path();
                c.arc(-q, 0.0, h, -FRAC_PI_2, FRAC_PI_2);
                c.stroke();
                c.begin_path();
                c.arc(q, 0.0, h, FRAC_PI_2, -FRAC_PI_2);
                c.stroke();
            }
            _ => {
                for y in [-q, q] {
                    c.begin_path();
                    c.move_to(-h, y);
                    c.line_to(h, y);
                    c.stroke();
                }
                c.begin_path();
                c.circle(0.0, 0.0, s / 10.0);
                c.fill();
            }
        }
    }

    // Camera, aperture, focus frame, or film frame
    fn photo(&mut self, s: f32, color: Rgba, style: u8) {
        let c = &mut *self.c;
        let h = s / 2.0;
        c.set_stroke(color);
        c.set_fill(color);
        c.set_line_width(2.0);

        match style % 4 {
            0 => {
                c.begin_path();
                c.round_rect(-h, -s / 3.0, s, s / 1.5, 5.0);
                c.stroke();
                c.begin_path();
                c.circle(0.0, 0.0, s / 4.0);
                c.stroke();
                c.begin_path();
                c.rect(s / 4.0, -s / 3.0, s / 6.0, s / 6.0);
                c.stroke();
            }
            1 => {
                let blades = 6;
                let step = TAU / blades as f32;
                c.begin_path();
                for i in 0..blades {
                    let a = i as f32 * step;
                    let (x1, y1) = (a.cos() * s / 3.0, a.sin() * s / 3.0);
                    let (x2, y2) = ((a + step / 2.0).cos() * h, (a + step / 2.0).sin() * h);
                    if i == 0 { c.move_to(x1, y1) } else { c.line_to(x1, y1) }
                    c.line_to(x2, y2);
                }
                c.close_path();
                c.stroke();
                c.begin_path();
                c.circle(0.0, 0.0, s / 6.0);
                c.fill();
            }
            2 => {
                c.begin_path();
                c.rect(-h, -h, s, s);
                c.stroke();
                let arm = s / 10.0;
                for (fx, fy) in FOCUS_POINTS {
                    let (x, y) = (fx * s, fy * s);
                    c.begin_path();
                    c.move_to(x - arm, y);
                    c.line_to(x + arm, y);
                    c.move_to(x, y - arm);
                    c.line_to(x, y + arm);
                    c.stroke();
                }
            }
            _ => {
                c.begin_path();
                c.rect(-h, -s / 3.0, s, s / 1.5);
                c.stroke();
                // Sprocket holes, top and bottom
                for i in -2..=2 {
                    let x = i as f32 * s / 5.0;
                    c.begin_path();
                    c.rect(x, -s / 2.5, s / 15.0, s / 10.0);
                    c.stroke();
                    c.begin_path();
                    c.rect(x, s / 2.5 - s / 10.0, s / 15.0, s / 10.0);
                    c.stroke();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::{DisplayList, DrawCmd};
    use crate::sim::Spawn;

    fn single(glyph: Glyph, style: u8) -> Entities {
        let mut e = Entities::default();
        e.push(Spawn { style, opacity: 0.6, rotation: 1.0, ..Spawn::at(50.0, 60.0, 20.0, glyph, Rgba::new(9, 9, 9, 0.5)) });
        e
    }

    #[test]
    fn rotated_glyphs_are_balanced() {
        for glyph in [
            Glyph::React, Glyph::MongoDb, Glyph::Express, Glyph::NodeJs, Glyph::JavaScript,
            Glyph::NextJs, Glyph::Tailwind, Glyph::Camera, Glyph::Code, Glyph::Photo,
        ] {
            for style in 0..4 {
                let e = single(glyph, style);
                let mut list = DisplayList::new();
                Painter::new(&mut list, Shade::Dark, 0.0).entity(&e, 0, false);

                assert_eq!(list.cmds[0], DrawCmd::Save, "{glyph:?}");
                assert_eq!(list.cmds[1], DrawCmd::Translate(50.0, 60.0));
                assert_eq!(list.cmds[2], DrawCmd::Rotate(1.0));
                assert_eq!(list.cmds[3], DrawCmd::Alpha(0.6));
                assert_eq!(list.cmds.last(), Some(&DrawCmd::Restore));
            }
        }
    }

    #[test]
    fn particles_draw_a_single_disc() {
        let e = single(Glyph::Dot, 0);
        let mut list = DisplayList::new();
        Painter::new(&mut list, Shade::Light, 0.0).entity(&e, 0, false);

        assert_eq!(list.count(|c| matches!(c, DrawCmd::Arc { .. })), 1);
        assert_eq!(list.count(|c| *c == DrawCmd::FillPath), 1);
        assert_eq!(list.count(|c| *c == DrawCmd::Save), 0);
    }

    #[test]
    fn hub_hint_only_when_asked() {
        let e = single(Glyph::Computer, 0);

        let mut plain = DisplayList::new();
        Painter::new(&mut plain, Shade::Dark, 0.0).entity(&e, 0, false);
        assert_eq!(plain.texts(), HUB_TITLE.to_vec());

        let mut hinted = DisplayList::new();
        Painter::new(&mut hinted, Shade::Dark, 0.0).entity(&e, 0, true);
        assert_eq!(hinted.texts(), [HUB_TITLE, HUB_HINT].concat());
    }

    #[test]
    fn electrons_move_with_time() {
        let e = single(Glyph::React, 0);
        let mut a = DisplayList::new();
        let mut b = DisplayList::new();
        Painter::new(&mut a, Shade::Dark, 0.0).entity(&e, 0, false);
        Painter::new(&mut b, Shade::Dark, 500.0).entity(&e, 0, false);
        assert_ne!(a.cmds, b.cmds);
    }
}
