use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Area of the overlap between two rectangles, 0 when disjoint
    pub fn intersect_area(&self, other: &Rect) -> i32 {
        let w = (self.right().min(other.right()) - self.x.max(other.x)).max(0);
        let h = (self.bottom().min(other.bottom()) - self.y.max(other.y)).max(0);
        w * h
    }
}

/// Size constraints a client asks for (ICCCM WM_NORMAL_HINTS).
/// Zero means "not set" for every integer field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeHints {
    pub base_width: i32,
    pub base_height: i32,
    pub inc_width: i32,
    pub inc_height: i32,
    pub max_width: i32,
    pub max_height: i32,
    pub min_width: i32,
    pub min_height: i32,
    /// Minimum aspect expressed as height / width
    pub min_aspect: f32,
    /// Maximum aspect expressed as width / height
    pub max_aspect: f32,
}

impl SizeHints {
    /// Base size falls back to the minimum size and vice versa.
    pub fn normalized(mut self) -> Self {
        if self.base_width == 0 && self.base_height == 0 {
            self.base_width = self.min_width;
            self.base_height = self.min_height;
        } else if self.min_width == 0 && self.min_height == 0 {
            self.min_width = self.base_width;
            self.min_height = self.base_height;
        }
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.max_width > 0
            && self.max_height > 0
            && self.max_width == self.min_width
            && self.max_height == self.min_height
    }
}
