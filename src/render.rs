use crate::types::{SheetConfig, SheetResult};

const MAX_COLS: f64 = 76.0;
const MAX_ROWS: f64 = 38.0;

/// Character-grid preview of one packed sheet: margins blank, the
/// printable area dotted, each placement filled with a letter keyed by
/// its position in the sheet (lowercase when rotated). Intended for
/// terminal inspection, not for print output.
pub fn render_sheet(config: &SheetConfig, sheet: &SheetResult) -> String {
    let scale = f64::min(MAX_COLS / config.width_mm, MAX_ROWS / config.height_mm);
    let cols = (config.width_mm * scale).round().max(1.0) as usize;
    let rows = (config.height_mm * scale).round().max(1.0) as usize;

    let mut grid = vec![vec![' '; cols]; rows];

    let to_cell = |v_mm: f64| (v_mm * scale).round() as isize;
    let mut fill = |x_mm: f64, y_mm: f64, w_mm: f64, h_mm: f64, ch: char| {
        let x0 = to_cell(x_mm).max(0) as usize;
        let y0 = to_cell(y_mm).max(0) as usize;
        let x1 = (to_cell(x_mm + w_mm).max(0) as usize).min(cols);
        let y1 = (to_cell(y_mm + h_mm).max(0) as usize).min(rows);
        for row in grid.iter_mut().take(y1).skip(y0) {
            for cell in row.iter_mut().take(x1).skip(x0) {
                *cell = ch;
            }
        }
    };

    fill(
        config.margin_left_mm,
        config.margin_top_mm,
        config.width_mm - config.margin_left_mm - config.margin_right_mm,
        config.height_mm - config.margin_top_mm - config.margin_bottom_mm,
        '.',
    );

    for (i, p) in sheet.placements.iter().enumerate() {
        let letter = (b'A' + (i % 26) as u8) as char;
        let ch = if p.rotated {
            letter.to_ascii_lowercase()
        } else {
            letter
        };
        fill(p.x_mm, p.y_mm, p.width_mm, p.height_mm, ch);
    }

    let mut out = String::with_capacity((cols + 3) * (rows + 2));
    out.push('+');
    out.push_str(&"-".repeat(cols));
    out.push_str("+\n");
    for row in &grid {
        out.push('|');
        out.extend(row.iter());
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&"-".repeat(cols));
    out.push_str("+\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::compute_layout;
    use crate::types::Item;

    fn layout(width: f64, height: f64, items: &[Item]) -> (SheetConfig, SheetResult) {
        let cfg = SheetConfig::bare(width, height);
        let result = compute_layout(items, &cfg).unwrap();
        (cfg, result.sheets.into_iter().next().unwrap())
    }

    fn item(id: &str, w: f64, h: f64) -> Item {
        Item {
            id: id.into(),
            name: id.into(),
            width_mm: w,
            height_mm: h,
            quantity: 1,
            allow_rotation: true,
        }
    }

    #[test]
    fn test_render_has_border_and_letter() {
        let (cfg, sheet) = layout(100.0, 100.0, &[item("a", 50.0, 50.0)]);
        let out = render_sheet(&cfg, &sheet);
        assert!(out.starts_with('+'));
        assert!(out.contains('|'));
        assert!(out.contains('A'));
    }

    #[test]
    fn test_render_marks_rotated_lowercase() {
        // Fits only rotated.
        let (cfg, sheet) = layout(100.0, 50.0, &[item("tall", 50.0, 100.0)]);
        let out = render_sheet(&cfg, &sheet);
        assert!(out.contains('a'));
        assert!(!out.contains('A'));
    }

    #[test]
    fn test_render_two_items_two_letters() {
        let (cfg, sheet) = layout(
            100.0,
            100.0,
            &[item("a", 50.0, 100.0), item("b", 50.0, 100.0)],
        );
        let out = render_sheet(&cfg, &sheet);
        assert!(out.contains('A'));
        assert!(out.contains('B'));
    }

    #[test]
    fn test_render_empty_sheet_shows_printable_area() {
        let mut cfg = SheetConfig::bare(100.0, 100.0);
        cfg.margin_top_mm = 10.0;
        cfg.margin_bottom_mm = 10.0;
        cfg.margin_left_mm = 10.0;
        cfg.margin_right_mm = 10.0;
        let sheet = SheetResult {
            sheet_index: 0,
            placements: vec![],
            cutting_marks: vec![],
            used_area_mm2: 0.0,
            usable_area_mm2: 6400.0,
            utilization_pct: 0.0,
        };
        let out = render_sheet(&cfg, &sheet);
        assert!(out.contains('.'));
    }
}
