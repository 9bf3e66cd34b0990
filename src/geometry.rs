use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Millimeter value stored as integer thousandths of a millimeter.
///
/// All placement arithmetic runs on this type so that repeated
/// additions over hundreds of placements stay exact and the engine
/// produces bit-identical output for identical input. Conversion to
/// and from `f64` happens only at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Mm(i64);

const UM_PER_MM: f64 = 1000.0;

impl Mm {
    pub const ZERO: Mm = Mm(0);

    /// Rounds to the nearest thousandth of a millimeter.
    pub fn from_mm(v: f64) -> Self {
        Mm((v * UM_PER_MM).round() as i64)
    }

    pub fn as_mm(self) -> f64 {
        self.0 as f64 / UM_PER_MM
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn max(self, other: Mm) -> Mm {
        Mm(self.0.max(other.0))
    }

    pub fn double(self) -> Mm {
        Mm(self.0 * 2)
    }

    /// Product of two lengths in square millimeters.
    pub fn area_mm2(w: Mm, h: Mm) -> f64 {
        (w.0 as i128 * h.0 as i128) as f64 / (UM_PER_MM * UM_PER_MM)
    }
}

impl Add for Mm {
    type Output = Mm;
    fn add(self, rhs: Mm) -> Mm {
        Mm(self.0 + rhs.0)
    }
}

impl AddAssign for Mm {
    fn add_assign(&mut self, rhs: Mm) {
        self.0 += rhs.0;
    }
}

impl Sub for Mm {
    type Output = Mm;
    fn sub(self, rhs: Mm) -> Mm {
        Mm(self.0 - rhs.0)
    }
}

impl fmt::Display for Mm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_mm())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: Mm,
    pub y: Mm,
}

impl Point {
    pub fn new(x: Mm, y: Mm) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, top-left anchored, y growing downward
/// (sheet coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: Mm,
    pub y: Mm,
    pub w: Mm,
    pub h: Mm,
}

impl Rect {
    pub fn new(x: Mm, y: Mm, w: Mm, h: Mm) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> Mm {
        self.x + self.w
    }

    pub fn bottom(&self) -> Mm {
        self.y + self.h
    }

    pub fn area_mm2(&self) -> f64 {
        Mm::area_mm2(self.w, self.h)
    }

    /// Open-boundary overlap test: rectangles that merely share an
    /// edge or a corner do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Closed-boundary containment: `other` may touch the edges of `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn expand(&self, margin: Mm) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + margin.double(),
            h: self.h + margin.double(),
        }
    }

    pub fn translate(&self, dx: Mm, dy: Mm) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
