// canvas.rs - Drawing surface abstraction
//
// The subset of the 2d canvas API the glyph routines use. The browser shell
// implements it on top of CanvasRenderingContext2d; DisplayList records the
// calls so frames can be inspected without a browser.

use std::f32::consts::TAU;

use crate::world::Rgba;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
}

pub trait Canvas {
    fn clear(&mut self, width: f32, height: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);

    fn set_alpha(&mut self, alpha: f32);
    fn set_fill(&mut self, color: Rgba);
    fn set_stroke(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f32);
    fn set_font(&mut self, px: f32, bold: bool);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, r: f32, start: f32, end: f32);
    fn ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, rotation: f32);
    fn quadratic_to(&mut self, cx: f32, cy: f32, x: f32, y: f32);
    fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32);
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn fill(&mut self);
    fn stroke(&mut self);

    /// Centered text
    fn fill_text(&mut self, text: &str, x: f32, y: f32, baseline: Baseline);

    fn circle(&mut self, x: f32, y: f32, r: f32) {
        self.arc(x, y, r, 0.0, TAU);
    }

    /// Rounded rectangle path from lines and quadratic corners
    fn round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        let r = r.min(w * 0.5).min(h * 0.5).max(0.0);
        self.move_to(x + r, y);
        self.line_to(x + w - r, y);
        self.quadratic_to(x + w, y, x + w, y + r);
        self.line_to(x + w, y + h - r);
        self.quadratic_to(x + w, y + h, x + w - r, y + h);
        self.line_to(x + r, y + h);
        self.quadratic_to(x, y + h, x, y + h - r);
        self.line_to(x, y + r);
        self.quadratic_to(x, y, x + r, y);
        self.close_path();
    }
}

/// One recorded canvas call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear { width: f32, height: f32 },
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    Alpha(f32),
    Fill(Rgba),
    Stroke(Rgba),
    LineWidth(f32),
    Font { px: f32, bold: bool },
    BeginPath,
    ClosePath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Arc { x: f32, y: f32, r: f32, start: f32, end: f32 },
    Ellipse { x: f32, y: f32, rx: f32, ry: f32, rotation: f32 },
    QuadTo { cx: f32, cy: f32, x: f32, y: f32 },
    BezierTo([f32; 6]),
    Rect { x: f32, y: f32, w: f32, h: f32 },
    FillPath,
    StrokePath,
    Text { text: String, x: f32, y: f32, baseline: Baseline },
}

/// Canvas that records instead of drawing
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    pub cmds: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn count(&self, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        self.cmds.iter().filter(|c| pred(c)).count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for DisplayList {
    fn clear(&mut self, width: f32, height: f32) { self.cmds.push(DrawCmd::Clear { width, height }); }
    fn save(&mut self) { self.cmds.push(DrawCmd::Save); }
    fn restore(&mut self) { self.cmds.push(DrawCmd::Restore); }
    fn translate(&mut self, x: f32, y: f32) { self.cmds.push(DrawCmd::Translate(x, y)); }
    fn rotate(&mut self, angle: f32) { self.cmds.push(DrawCmd::Rotate(angle)); }
    fn set_alpha(&mut self, alpha: f32) { self.cmds.push(DrawCmd::Alpha(alpha)); }
    fn set_fill(&mut self, color: Rgba) { self.cmds.push(DrawCmd::Fill(color)); }
    fn set_stroke(&mut self, color: Rgba) { self.cmds.push(DrawCmd::Stroke(color)); }
    fn set_line_width(&mut self, width: f32) { self.cmds.push(DrawCmd::LineWidth(width)); }
    fn set_font(&mut self, px: f32, bold: bool) { self.cmds.push(DrawCmd::Font { px, bold }); }
    fn begin_path(&mut self) { self.cmds.push(DrawCmd::BeginPath); }
    fn close_path(&mut self) { self.cmds.push(DrawCmd::ClosePath); }
    fn move_to(&mut self, x: f32, y: f32) { self.cmds.push(DrawCmd::MoveTo(x, y)); }
    fn line_to(&mut self, x: f32, y: f32) { self.cmds.push(DrawCmd::LineTo(x, y)); }

    fn arc(&mut self, x: f32, y: f32, r: f32, start: f32, end: f32) {
        self.cmds.push(DrawCmd::Arc { x, y, r, start, end });
    }

    fn ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, rotation: f32) {
        self.cmds.push(DrawCmd::Ellipse { x, y, rx, ry, rotation });
    }

    fn quadratic_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.cmds.push(DrawCmd::QuadTo { cx, cy, x, y });
    }

    fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.cmds.push(DrawCmd::BezierTo([c1x, c1y, c2x, c2y, x, y]));
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.cmds.push(DrawCmd::Rect { x, y, w, h });
    }

    fn fill(&mut self) { self.cmds.push(DrawCmd::FillPath); }
    fn stroke(&mut self) { self.cmds.push(DrawCmd::StrokePath); }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, baseline: Baseline) {
        self.cmds.push(DrawCmd::Text { text: text.to_owned(), x, y, baseline });
    }
}
