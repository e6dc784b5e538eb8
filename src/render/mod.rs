// render/ - Frame drawing
//
// Every frame is a full redraw: clear the surface, draw links underneath,
// then each entity with its glyph routine. Nothing carries over between
// frames except what lives in the scene.

mod canvas;
mod glyph;
mod link;

pub use canvas::{Baseline, Canvas, DisplayList, DrawCmd};
pub use glyph::{HUB_HINT, HUB_TITLE, Painter};

use crate::sim::Simulation;

/// Per-frame inputs that are not part of the scene
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInfo {
    /// Frame time, ms
    pub now: f64,
    /// Show the "click to view" hint on the hub
    pub hint: bool,
}

pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, sim: &Simulation, info: FrameInfo) {
    let surface = sim.surface();
    canvas.clear(surface.width, surface.height);

    let scene = sim.scene();
    let mut painter = Painter::new(canvas, sim.shade(), info.now);
    painter.links(scene, sim.config().links);

    let e = &scene.entities;
    for i in 0..e.len() {
        painter.entity(e, i, info.hint && scene.hub == Some(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::world::{Shade, Viewport};

    #[test]
    fn frame_starts_with_clear_of_whole_surface() {
        let sim = Simulation::new(SceneConfig::tech_icons(), Viewport::new(400.0, 300.0), Shade::Dark, 3);
        let mut list = DisplayList::new();
        draw_frame(&mut list, &sim, FrameInfo { now: 16.0, hint: false });

        assert_eq!(list.cmds[0], DrawCmd::Clear { width: 400.0, height: 900.0 });
        assert_eq!(list.count(|c| matches!(c, DrawCmd::Clear { .. })), 1);
    }

    #[test]
    fn same_state_draws_same_frame() {
        let sim = Simulation::new(SceneConfig::constellation(), Viewport::new(600.0, 400.0), Shade::Light, 11);
        let info = FrameInfo { now: 1234.0, hint: false };
        let mut a = DisplayList::new();
        let mut b = DisplayList::new();
        draw_frame(&mut a, &sim, info);
        draw_frame(&mut b, &sim, info);
        assert_eq!(a.cmds, b.cmds);
    }

    #[test]
    fn hint_goes_to_hub_only() {
        let sim = Simulation::new(SceneConfig::reveal(), Viewport::new(800.0, 600.0), Shade::Dark, 3);
        let mut list = DisplayList::new();
        draw_frame(&mut list, &sim, FrameInfo { now: 0.0, hint: true });
        let texts = list.texts();
        assert_eq!(texts.iter().filter(|t| **t == HUB_HINT[0]).count(), 1);
    }
}
