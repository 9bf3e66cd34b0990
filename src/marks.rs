use crate::geometry::{Mm, Point, Rect};
use crate::types::CuttingMark;

/// Emits the trim marks for one placement: two short segments per
/// corner of the trim boundary (the footprint grown by the bleed),
/// pointing away from the placement. `offset` is the gap between the
/// trim edge and the near end of each mark. Marks are allowed to run
/// into the sheet margins; the cutter needs them outside the artwork.
///
/// Returns nothing when `length` is zero; a zero-length mark has no
/// geometry to draw.
pub fn marks_for_placement(
    footprint: Rect,
    bleed: Mm,
    sheet_index: usize,
    length: Mm,
    offset: Mm,
) -> Vec<CuttingMark> {
    if !length.is_positive() {
        return Vec::new();
    }

    let trim = footprint.expand(bleed);
    let (l, r) = (trim.x, trim.right());
    let (t, b) = (trim.y, trim.bottom());
    let near = offset;
    let far = offset + length;

    let segment = |from: Point, to: Point| CuttingMark {
        sheet_index,
        x1_mm: from.x.as_mm(),
        y1_mm: from.y.as_mm(),
        x2_mm: to.x.as_mm(),
        y2_mm: to.y.as_mm(),
    };
    let p = Point::new;

    vec![
        // top-left: leftward and upward
        segment(p(l - far, t), p(l - near, t)),
        segment(p(l, t - far), p(l, t - near)),
        // top-right: rightward and upward
        segment(p(r + near, t), p(r + far, t)),
        segment(p(r, t - far), p(r, t - near)),
        // bottom-left: leftward and downward
        segment(p(l - far, b), p(l - near, b)),
        segment(p(l, b + near), p(l, b + far)),
        // bottom-right: rightward and downward
        segment(p(r + near, b), p(r + far, b)),
        segment(p(r, b + near), p(r, b + far)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mm(v: f64) -> Mm {
        Mm::from_mm(v)
    }

    #[test]
    fn test_eight_marks_per_placement() {
        let fp = Rect::new(mm(20.0), mm(20.0), mm(100.0), mm(50.0));
        let marks = marks_for_placement(fp, mm(3.0), 0, mm(5.0), mm(3.0));
        assert_eq!(marks.len(), 8);
        assert!(marks.iter().all(|m| m.sheet_index == 0));
    }

    #[test]
    fn test_marks_anchor_on_trim_boundary() {
        let fp = Rect::new(mm(20.0), mm(20.0), mm(100.0), mm(50.0));
        let marks = marks_for_placement(fp, mm(3.0), 2, mm(5.0), mm(3.0));
        // Trim boundary: 17..123 x 17..73
        let horizontal_tl = &marks[0];
        assert_eq!(
            (horizontal_tl.x1_mm, horizontal_tl.y1_mm),
            (9.0, 17.0) // 17 - 3 - 5
        );
        assert_eq!((horizontal_tl.x2_mm, horizontal_tl.y2_mm), (14.0, 17.0));
        let vertical_br = &marks[7];
        assert_eq!((vertical_br.x1_mm, vertical_br.y1_mm), (123.0, 76.0));
        assert_eq!((vertical_br.x2_mm, vertical_br.y2_mm), (123.0, 81.0));
        assert!(marks.iter().all(|m| m.sheet_index == 2));
    }

    #[test]
    fn test_marks_have_requested_length() {
        let fp = Rect::new(mm(0.0), mm(0.0), mm(10.0), mm(10.0));
        for m in marks_for_placement(fp, Mm::ZERO, 0, mm(5.0), mm(3.0)) {
            let len = (m.x2_mm - m.x1_mm).abs() + (m.y2_mm - m.y1_mm).abs();
            assert_eq!(len, 5.0);
        }
    }

    #[test]
    fn test_zero_length_emits_none() {
        let fp = Rect::new(mm(0.0), mm(0.0), mm(10.0), mm(10.0));
        assert!(marks_for_placement(fp, Mm::ZERO, 0, Mm::ZERO, mm(3.0)).is_empty());
    }

    #[test]
    fn test_zero_bleed_marks_hug_footprint() {
        let fp = Rect::new(mm(50.0), mm(50.0), mm(20.0), mm(20.0));
        let marks = marks_for_placement(fp, Mm::ZERO, 0, mm(5.0), mm(0.0));
        // With no offset the near end touches the footprint corner.
        assert_eq!((marks[0].x2_mm, marks[0].y2_mm), (50.0, 50.0));
    }
}
