// surface.rs - drawing primitives the chart emits
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Vec2};

/// Anything that can take chart primitives in canvas pixel coordinates.
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color32);
    fn line(&mut self, from: Pos2, to: Pos2, color: Color32);
    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, size: f32, color: Color32);
}

/// Draws onto an egui painter, shifting canvas coordinates by `origin`.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: Vec2,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: Pos2) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
        }
    }
}

impl DrawSurface for PainterSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(rect.translate(self.origin), 0.0, color);
    }

    fn line(&mut self, from: Pos2, to: Pos2, color: Color32) {
        self.painter
            .line_segment([from + self.origin, to + self.origin], (1.0, color));
    }

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            pos + self.origin,
            anchor,
            text,
            FontId::proportional(size),
            color,
        );
    }
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    FillRect { rect: Rect, color: Color32 },
    Line { from: Pos2, to: Pos2, color: Color32 },
    Text { pos: Pos2, anchor: Align2, text: String, color: Color32 },
}

/// Keeps every primitive in order instead of drawing it.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub primitives: Vec<Primitive>,
}

#[cfg(test)]
impl Recorder {
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn lines_colored(&self, color: Color32) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { color: c, .. } if *c == color))
            .count()
    }
}

#[cfg(test)]
impl DrawSurface for Recorder {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.primitives.push(Primitive::FillRect { rect, color });
    }

    fn line(&mut self, from: Pos2, to: Pos2, color: Color32) {
        self.primitives.push(Primitive::Line { from, to, color });
    }

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, _size: f32, color: Color32) {
        self.primitives.push(Primitive::Text {
            pos,
            anchor,
            text: text.to_string(),
            color,
        });
    }
}
