use std::f32::consts::TAU;

use anyhow::Result;
use egui::epaint::RectShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Shape, Stroke, Vec2};

use super::algebra_2d::AaBB;
use super::mechanics::{FIELD_HEIGHT, FIELD_WIDTH};
use super::pong_drawer::Canvas;

const ELLIPSE_SEGMENTS: usize = 24;
const SCORE_FONT_SIZE: f32 = 24.0;

/// [Canvas] on top of an egui [Painter]; shapes are collected and handed over on [Canvas::present]
pub struct AppGameDrawer<'p> {
    painter: &'p Painter,
    canvas_size: Vec2,
    paint_offset: Vec2,
    shapes: Vec<Shape>,
}

impl<'p> AppGameDrawer<'p> {
    pub fn new(painter: &'p Painter) -> Self {
        let clip_rect = painter.clip_rect();
        Self {
            painter,
            canvas_size: clip_rect.size(),
            paint_offset: clip_rect.min.to_vec2(),
            shapes: Vec::with_capacity(8),
        }
    }

    /// pos / MODEL_LEN = result / canvas_size
    /// => result = pos * canvas_size / MODEL_LEN
    fn scale(
        &self,
        pos: Pos2,
    ) -> Pos2 {
        Pos2::new(
            pos.x * self.canvas_size.x / FIELD_WIDTH as f32,
            pos.y * self.canvas_size.y / FIELD_HEIGHT as f32,
        ) + self.paint_offset
    }

    fn scale_rect(
        &self,
        rect: &AaBB,
    ) -> Rect {
        Rect::from_min_max(
            self.scale(Pos2::new(rect.left() as f32, rect.top() as f32)),
            self.scale(Pos2::new(rect.right() as f32, rect.bottom() as f32)),
        )
    }
}

impl Canvas for AppGameDrawer<'_> {
    fn fill(&mut self, color: Color32) {
        let full = self.scale_rect(&AaBB::new(0, 0, FIELD_WIDTH, FIELD_HEIGHT));
        self.shapes.push(RectShape::filled(full, Rounding::none(), color).into());
    }

    fn fill_rect(&mut self, rect: &AaBB, color: Color32) {
        self.shapes.push(RectShape::filled(self.scale_rect(rect), Rounding::none(), color).into());
    }

    // epaint has no ellipse primitive
    fn fill_ellipse(&mut self, bounds: &AaBB, color: Color32) {
        let rect = self.scale_rect(bounds);
        let center = rect.center();
        let radius = rect.size() / 2.0;
        let points = (0..ELLIPSE_SEGMENTS)
            .map(|i| {
                let angle = TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
                center + Vec2::new(radius.x * angle.cos(), radius.y * angle.sin())
            })
            .collect();
        self.shapes.push(Shape::convex_polygon(points, color, Stroke::NONE));
    }

    fn aa_line(&mut self, from: Pos2, to: Pos2, color: Color32) {
        self.shapes.push(Shape::line_segment([self.scale(from), self.scale(to)], Stroke::new(1.0, color)));
    }

    fn text(&mut self, text: &str, anchor: Pos2, color: Color32) {
        let font_size = SCORE_FONT_SIZE * self.canvas_size.y / FIELD_HEIGHT as f32;
        let pos = self.scale(anchor);
        let shape = self.painter.ctx().fonts(|fonts| {
            Shape::text(fonts, pos, Align2::CENTER_TOP, text, FontId::proportional(font_size), color)
        });
        self.shapes.push(shape);
    }

    fn present(&mut self) -> Result<()> {
        self.painter.extend(std::mem::take(&mut self.shapes));
        Ok(())
    }
}
