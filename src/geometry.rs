/// Axis-aligned rectangle in integer arena pixels. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// Arena dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
}

impl Arena {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Largest top-left x that keeps an entity of width `w` inside.
    pub fn max_x(&self, w: i32) -> i32 {
        (self.width - w).max(0)
    }

    /// Largest top-left y that keeps an entity of height `h` inside.
    pub fn max_y(&self, h: i32) -> i32 {
        (self.height - h).max(0)
    }
}

/// AABB intersection test. Rectangles whose edges touch count as overlapping.
///
/// On each axis the gap between the two origins must not exceed the extent of
/// whichever rectangle starts first.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let x_hit = if a.x > b.x {
        a.x - b.x <= b.w
    } else {
        b.x - a.x <= a.w
    };
    let y_hit = if a.y > b.y {
        a.y - b.y <= b.h
    } else {
        b.y - a.y <= a.h
    };
    x_hit && y_hit
}
