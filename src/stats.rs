use crate::types::SheetResult;

/// Used-over-usable percentage for one sheet, clamped to 0–100 so a
/// degenerate usable area can never produce an out-of-range or
/// non-finite figure.
pub fn utilization_pct(used_area_mm2: f64, usable_area_mm2: f64) -> f64 {
    if usable_area_mm2 <= 0.0 {
        return 0.0;
    }
    (used_area_mm2 / usable_area_mm2 * 100.0).clamp(0.0, 100.0)
}

/// Area-weighted efficiency across sheets that hold at least one
/// placement, in percent with one decimal. Empty layouts report 0.0.
pub fn aggregate_efficiency_pct(sheets: &[SheetResult]) -> f64 {
    let (used, usable) = sheets
        .iter()
        .filter(|s| !s.placements.is_empty())
        .fold((0.0, 0.0), |(u, t), s| {
            (u + s.used_area_mm2, t + s.usable_area_mm2)
        });
    if usable <= 0.0 {
        return 0.0;
    }
    round1((used / usable * 100.0).clamp(0.0, 100.0))
}

pub fn rotated_count(sheets: &[SheetResult]) -> usize {
    sheets
        .iter()
        .flat_map(|s| &s.placements)
        .filter(|p| p.rotated)
        .count()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Placement;

    fn sheet(index: usize, used: f64, usable: f64, placements: usize) -> SheetResult {
        SheetResult {
            sheet_index: index,
            placements: (0..placements)
                .map(|i| Placement {
                    item_id: format!("u{i}"),
                    sheet_index: index,
                    x_mm: 0.0,
                    y_mm: 0.0,
                    width_mm: 1.0,
                    height_mm: 1.0,
                    rotated: i % 2 == 1,
                })
                .collect(),
            cutting_marks: vec![],
            used_area_mm2: used,
            usable_area_mm2: usable,
            utilization_pct: utilization_pct(used, usable),
        }
    }

    #[test]
    fn test_utilization_basics() {
        assert_eq!(utilization_pct(50.0, 200.0), 25.0);
        assert_eq!(utilization_pct(0.0, 200.0), 0.0);
        assert_eq!(utilization_pct(10.0, 0.0), 0.0);
        // Never above 100 even with inconsistent inputs
        assert_eq!(utilization_pct(300.0, 200.0), 100.0);
    }

    #[test]
    fn test_aggregate_is_area_weighted() {
        // 100/1000 and 400/1000: pooled 500/2000 = 25%, not the
        // per-sheet mean of 10% and 40%... which happens to also be 25;
        // use asymmetric usable areas instead.
        let sheets = vec![sheet(0, 100.0, 1000.0, 1), sheet(1, 400.0, 500.0, 1)];
        // pooled: 500 / 1500 = 33.333..% -> 33.3
        assert_eq!(aggregate_efficiency_pct(&sheets), 33.3);
    }

    #[test]
    fn test_aggregate_skips_empty_sheets() {
        let sheets = vec![sheet(0, 500.0, 1000.0, 2), sheet(1, 0.0, 1000.0, 0)];
        assert_eq!(aggregate_efficiency_pct(&sheets), 50.0);
    }

    #[test]
    fn test_aggregate_empty_layout() {
        assert_eq!(aggregate_efficiency_pct(&[]), 0.0);
    }

    #[test]
    fn test_aggregate_one_decimal() {
        let sheets = vec![sheet(0, 1.0, 3.0, 1)];
        assert_eq!(aggregate_efficiency_pct(&sheets), 33.3);
    }

    #[test]
    fn test_rotated_count() {
        let sheets = vec![sheet(0, 1.0, 2.0, 4), sheet(1, 1.0, 2.0, 3)];
        // Odd indices are rotated: 2 on the first sheet, 1 on the second
        assert_eq!(rotated_count(&sheets), 3);
    }
}
