//! Shape generation for 2D primitives

use glam::Vec2;

use super::scene::DrawList;
use super::vertex::Vertex;
use crate::settings::{Palette, Rgba};
use crate::sim::Rect;

/// Screen pixel (top-left origin, y down) to normalized device coordinates
#[inline]
pub fn to_ndc(p: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(p.x / screen.x * 2.0 - 1.0, 1.0 - p.y / screen.y * 2.0)
}

/// Two triangles covering a rectangle
pub fn quad(rect: &Rect, screen: Vec2, color: Rgba) -> [Vertex; 6] {
    let tl = to_ndc(Vec2::new(rect.x as f32, rect.y as f32), screen);
    let br = to_ndc(Vec2::new(rect.right() as f32, rect.bottom() as f32), screen);

    let v_tl = Vertex::new(tl.x, tl.y, color);
    let v_tr = Vertex::new(br.x, tl.y, color);
    let v_bl = Vertex::new(tl.x, br.y, color);
    let v_br = Vertex::new(br.x, br.y, color);

    [v_tl, v_bl, v_tr, v_tr, v_bl, v_br]
}

/// Triangle list for every rectangle in a draw list, background first.
///
/// Text is left to the frontend's font rasterizer.
pub fn build_vertices(list: &DrawList, palette: &Palette) -> Vec<Vertex> {
    let screen = Vec2::new(list.width as f32, list.height as f32);
    let background = Rect::new(0, 0, list.width, list.height);

    let mut vertices = Vec::with_capacity((list.commands.len() + 1) * 6);
    vertices.extend_from_slice(&quad(&background, screen, palette.background));
    for (rect, role) in list.rects() {
        vertices.extend_from_slice(&quad(rect, screen, palette.resolve(role)));
    }
    vertices
}
