// link.rs - Connection lines
//
// Lines fade linearly with distance and vanish at the threshold. Random links
// are drawn from the scene's deduplicated edge list, so a pair linked in both
// directions still gets a single line.

use super::canvas::Canvas;
use super::glyph::Painter;
use crate::config::LinkStyle;
use crate::sim::{Glyph, Scene};
use crate::world::{self, distance};

// Peak sway of curved links, px
const SWAY: f32 = 20.0;

impl<C: Canvas + ?Sized> Painter<'_, C> {
    pub fn links(&mut self, scene: &Scene, style: LinkStyle) {
        match style {
            LinkStyle::None => {}
            LinkStyle::Random { distance: max, .. } => self.random_links(scene, max),
            LinkStyle::Proximity { distance: max } => self.proximity_links(scene, max),
            LinkStyle::ToGlyphs { distance: max } => self.glyph_links(scene, max),
        }
    }

    // Curved, swaying lines between linked entities
    fn random_links(&mut self, scene: &Scene, max: f32) {
        if max <= 0.0 { return; }
        let e = &scene.entities;
        let sway = (self.now * 0.001).sin() as f32;

        for &(a, b) in &scene.edges {
            let (a, b) = (a as usize, b as usize);
            if a >= e.len() || b >= e.len() { continue; }

            let (ax, ay) = e.pos(a);
            let (bx, by) = e.pos(b);
            let d = distance(ax, ay, bx, by);
            if d >= max { continue; }

            let fade = 1.0 - d / max;
            let color = if e.glyph[a] == Glyph::Node {
                e.color[a]
            } else if e.glyph[b] == Glyph::Node {
                e.color[b]
            } else {
                world::link_color(self.shade)
            };
            let offset = sway * SWAY * fade;
            let (mx, my) = ((ax + bx) * 0.5, (ay + by) * 0.5);

            let c = &mut *self.c;
            c.save();
            c.set_stroke(color);
            c.set_alpha(fade.max(0.0) * 0.5);
            c.set_line_width(1.0);
            c.begin_path();
            c.move_to(ax, ay);
            c.quadratic_to(mx + offset, my + offset, bx, by);
            c.stroke();
            c.restore();
        }
    }

    // Hairlines between every close pair
    fn proximity_links(&mut self, scene: &Scene, max: f32) {
        if max <= 0.0 { return; }
        let e = &scene.entities;
        let c = &mut *self.c;

        for i in 0..e.len() {
            for j in (i + 1)..e.len() {
                let d = distance(e.x[i], e.y[i], e.x[j], e.y[j]);
                if d >= max { continue; }

                c.save();
                c.set_stroke(e.color[i]);
                c.set_alpha((1.0 - d / max) * 0.5);
                c.set_line_width(0.3);
                c.begin_path();
                c.move_to(e.x[i], e.y[i]);
                c.line_to(e.x[j], e.y[j]);
                c.stroke();
                c.restore();
            }
        }
    }

    // Free particles reaching for nearby hub/ring glyphs
    fn glyph_links(&mut self, scene: &Scene, max: f32) {
        if max <= 0.0 { return; }
        let e = &scene.entities;
        let c = &mut *self.c;

        for i in 0..e.len() {
            if e.pinned[i] || !e.glyph[i].is_particle() { continue; }
            for j in 0..e.len() {
                if !e.pinned[j] { continue; }
                let d = distance(e.x[i], e.y[i], e.x[j], e.y[j]);
                if d >= max { continue; }

                c.save();
                c.set_stroke(e.color[i]);
                c.set_alpha(0.2 * (1.0 - d / max));
                c.set_line_width(1.0);
                c.begin_path();
                c.move_to(e.x[i], e.y[i]);
                c.line_to(e.x[j], e.y[j]);
                c.stroke();
                c.restore();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::{DisplayList, DrawCmd};
    use crate::sim::{Entities, Links, Spawn, collect_edges};
    use crate::world::{Rgba, Shade};

    fn scene(points: &[(f32, f32)], links: &[&[u32]]) -> Scene {
        let mut e = Entities::default();
        for &(x, y) in points {
            e.push(Spawn::at(x, y, 10.0, Glyph::React, Rgba::new(1, 1, 1, 1.0)));
        }
        for (i, ls) in links.iter().enumerate() {
            e.links[i] = Links::from_slice(ls);
        }
        let edges = collect_edges(&e.links);
        Scene { entities: e, edges, hub: None, generation: 1 }
    }

    fn strokes(list: &DisplayList) -> usize {
        list.count(|c| *c == DrawCmd::StrokePath)
    }

    #[test]
    fn mutual_links_draw_once() {
        // 0 <-> 1 both ways, 1 -> 2
        let s = scene(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)], &[&[1], &[0, 2], &[]]);
        let mut list = DisplayList::new();
        Painter::new(&mut list, Shade::Dark, 0.0)
            .links(&s, LinkStyle::Random { min: 1, max: 3, distance: 300.0 });
        assert_eq!(strokes(&list), 2);
    }

    #[test]
    fn links_past_threshold_are_skipped() {
        let s = scene(&[(0.0, 0.0), (300.0, 0.0), (0.0, 150.0)], &[&[1, 2], &[], &[]]);
        let mut list = DisplayList::new();
        Painter::new(&mut list, Shade::Dark, 0.0)
            .links(&s, LinkStyle::Random { min: 1, max: 3, distance: 300.0 });

        assert_eq!(strokes(&list), 1);
        assert!(list.cmds.contains(&DrawCmd::Alpha(0.25)));
    }

    #[test]
    fn curve_is_straight_at_time_zero() {
        let s = scene(&[(0.0, 0.0), (100.0, 0.0)], &[&[1], &[]]);
        let mut list = DisplayList::new();
        Painter::new(&mut list, Shade::Light, 0.0)
            .links(&s, LinkStyle::Random { min: 1, max: 1, distance: 300.0 });
        assert!(list.cmds.contains(&DrawCmd::QuadTo { cx: 50.0, cy: 0.0, x: 100.0, y: 0.0 }));
    }

    #[test]
    fn proximity_pairs_once() {
        let s = scene(&[(0.0, 0.0), (50.0, 0.0), (0.0, 50.0), (500.0, 500.0)], &[]);
        let mut list = DisplayList::new();
        Painter::new(&mut list, Shade::Dark, 0.0).links(&s, LinkStyle::Proximity { distance: 120.0 });
        assert_eq!(strokes(&list), 3);
    }

    #[test]
    fn glyph_links_only_from_free_particles() {
        let mut e = Entities::default();
        let c = Rgba::new(1, 1, 1, 1.0);
        e.push(Spawn { pinned: true, ..Spawn::at(0.0, 0.0, 60.0, Glyph::Computer, c) });
        e.push(Spawn { pinned: true, ..Spawn::at(40.0, 0.0, 30.0, Glyph::React, c) });
        e.push(Spawn::at(20.0, 10.0, 2.0, Glyph::Dot, c));
        e.push(Spawn::at(900.0, 900.0, 2.0, Glyph::Dot, c));
        let s = Scene { entities: e, edges: Vec::new(), hub: Some(0), generation: 1 };

        let mut list = DisplayList::new();
        Painter::new(&mut list, Shade::Dark, 0.0).links(&s, LinkStyle::ToGlyphs { distance: 100.0 });
        assert_eq!(strokes(&list), 2);
    }
}
