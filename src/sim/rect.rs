//! Axis-aligned rectangle geometry
//!
//! Integer coordinates, top-left origin, y increasing downward.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Horizontal center (integer division, as used by the bounce model)
    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }
}

/// Which axis a collision is resolved along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Closed-interval overlap test: touching edges count as overlapping
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.right() >= b.x && a.x <= b.right() && a.bottom() >= b.y && a.y <= b.bottom()
}

/// Minimum push-out distance on each axis for two overlapping rectangles
#[inline]
pub fn penetration(moving: &Rect, target: &Rect) -> (i32, i32) {
    let overlap_x = (moving.right() - target.x).min(target.right() - moving.x);
    let overlap_y = (moving.bottom() - target.y).min(target.bottom() - moving.y);
    (overlap_x, overlap_y)
}

/// Axis of least penetration. X only wins when strictly smaller.
#[inline]
pub fn primary_axis(overlap_x: i32, overlap_y: i32) -> Axis {
    if overlap_x < overlap_y { Axis::X } else { Axis::Y }
}
