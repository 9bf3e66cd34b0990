use crate::geometry::{Mm, Rect};
use crate::orientation::{Candidate, best_orientation};

/// Lowest free y per x-range across the packing region, as a run of
/// contiguous segments ordered by `x`. Together the segments always
/// cover the full region width.
#[derive(Debug, Clone)]
pub struct Skyline {
    region: Rect,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    x: Mm,
    width: Mm,
    top: Mm,
}

impl Segment {
    fn end(&self) -> Mm {
        self.x + self.width
    }
}

/// A feasible position for a rectangle of known size: its top-left
/// corner in region coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub x: Mm,
    pub y: Mm,
}

impl Skyline {
    pub fn new(region: Rect) -> Self {
        Self {
            region,
            segments: vec![Segment {
                x: region.x,
                width: region.w,
                top: region.y,
            }],
        }
    }

    /// Position where a `w`×`h` rectangle rests on the skyline and
    /// stays inside the region, keeping the resulting skyline as low
    /// as possible: minimal support y first, leftmost x on ties.
    /// Segments are ordered by `x`, so the scan can stop at the first
    /// x-range that no longer leaves room for `w`.
    pub fn find_slot(&self, w: Mm, h: Mm) -> Option<Slot> {
        if !w.is_positive() || !h.is_positive() {
            return None;
        }
        let mut best: Option<Slot> = None;
        for i in 0..self.segments.len() {
            let x = self.segments[i].x;
            if x + w > self.region.right() {
                break;
            }
            let y = self.support_y(i, w);
            if y + h <= self.region.bottom() && best.is_none_or(|b| y < b.y) {
                best = Some(Slot { x, y });
            }
        }
        best
    }

    /// Highest segment top under the span `[segments[start].x, +w)`.
    fn support_y(&self, start: usize, w: Mm) -> Mm {
        let span_end = self.segments[start].x + w;
        let mut y = self.segments[start].top;
        for seg in &self.segments[start + 1..] {
            if seg.x >= span_end {
                break;
            }
            y = y.max(seg.top);
        }
        y
    }

    /// Raises the skyline over `[slot.x, slot.x + w)` to the bottom
    /// edge of the committed rectangle and re-merges equal-height
    /// neighbors.
    pub fn place(&mut self, slot: Slot, w: Mm, h: Mm) {
        let sx = slot.x;
        let sex = sx + w;
        let raised = Segment {
            x: sx,
            width: w,
            top: slot.y + h,
        };

        let mut out: Vec<Segment> = Vec::with_capacity(self.segments.len() + 2);
        let mut inserted = false;
        for seg in &self.segments {
            if seg.end() <= sx {
                out.push(*seg);
                continue;
            }
            if seg.x >= sex {
                if !inserted {
                    out.push(raised);
                    inserted = true;
                }
                out.push(*seg);
                continue;
            }
            if seg.x < sx {
                out.push(Segment {
                    x: seg.x,
                    width: sx - seg.x,
                    top: seg.top,
                });
            }
            if !inserted {
                out.push(raised);
                inserted = true;
            }
            if seg.end() > sex {
                out.push(Segment {
                    x: sex,
                    width: seg.end() - sex,
                    top: seg.top,
                });
            }
        }
        if !inserted {
            out.push(raised);
        }

        let mut merged: Vec<Segment> = Vec::with_capacity(out.len());
        for seg in out {
            match merged.last_mut() {
                Some(last) if last.top == seg.top => last.width += seg.width,
                _ => merged.push(seg),
            }
        }
        self.segments = merged;
    }

    #[cfg(test)]
    fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

/// Footprint-space result of committing one unit to a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedRect {
    pub x: Mm,
    pub y: Mm,
    pub width: Mm,
    pub height: Mm,
    pub rotated: bool,
}

/// Packs one sheet. Units are offered in the solver's sorted order;
/// a unit that does not fit is skipped without blocking smaller units
/// behind it.
#[derive(Debug)]
pub struct SheetPacker {
    skyline: Skyline,
    spacing_x: Mm,
    spacing_y: Mm,
    bleed: Mm,
}

impl SheetPacker {
    /// `printable` is the sheet rectangle minus margins. Internally the
    /// packing region extends it by one spacing gutter to the right and
    /// bottom: every unit packs as its footprint grown by bleed on all
    /// sides plus a gutter on the right and bottom, which keeps
    /// neighboring bleed-expanded rectangles at least one spacing apart
    /// and is exact in fixed-point arithmetic.
    pub fn new(printable: Rect, spacing_x: Mm, spacing_y: Mm, bleed: Mm) -> Self {
        let region = Rect::new(
            printable.x,
            printable.y,
            printable.w + spacing_x,
            printable.h + spacing_y,
        );
        Self {
            skyline: Skyline::new(region),
            spacing_x,
            spacing_y,
            bleed,
        }
    }

    fn padded(&self, w: Mm, h: Mm) -> (Mm, Mm) {
        (
            w + self.bleed.double() + self.spacing_x,
            h + self.bleed.double() + self.spacing_y,
        )
    }

    /// Attempts to place a `width`×`height` footprint, trying the
    /// rotated orientation as well when allowed. Returns the committed
    /// footprint rectangle or `None` when the unit fits nowhere on
    /// this sheet.
    pub fn try_place(&mut self, width: Mm, height: Mm, allow_rotation: bool) -> Option<PlacedRect> {
        let upright = self.padded(width, height);
        let sideways = (allow_rotation && width != height).then(|| self.padded(height, width));

        let Candidate { slot, rotated } = best_orientation(&self.skyline, upright, sideways)?;
        let (w, h) = if rotated { (height, width) } else { (width, height) };
        let (pad_w, pad_h) = self.padded(w, h);
        self.skyline.place(slot, pad_w, pad_h);

        Some(PlacedRect {
            x: slot.x + self.bleed,
            y: slot.y + self.bleed,
            width: w,
            height: h,
            rotated,
        })
    }
}
