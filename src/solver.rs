use crate::geometry::{Mm, Rect};
use crate::marks::marks_for_placement;
use crate::skyline::{PlacedRect, SheetPacker};
use crate::stats;
use crate::types::{Item, LayoutError, LayoutResult, Placement, SheetConfig, SheetResult};
use tracing::{debug, warn};

/// One placement unit after quantity expansion. Several units share
/// the same `item_id` when an item was requested with quantity > 1.
#[derive(Debug, Clone)]
struct Unit {
    item_id: String,
    width: Mm,
    height: Mm,
    allow_rotation: bool,
}

/// Validated sheet geometry in fixed-point millimeters.
#[derive(Debug, Clone, Copy)]
struct SheetGeom {
    printable: Rect,
    spacing_x: Mm,
    spacing_y: Mm,
    bleed: Mm,
    mark_length: Mm,
    mark_offset: Mm,
}

/// Computes a full layout for `items` on sheets described by `config`.
pub fn compute_layout(items: &[Item], config: &SheetConfig) -> Result<LayoutResult, LayoutError> {
    Solver::new(config.clone(), items.to_vec()).solve()
}

pub struct Solver {
    config: SheetConfig,
    items: Vec<Item>,
}

impl Solver {
    pub fn new(config: SheetConfig, items: Vec<Item>) -> Self {
        Self { config, items }
    }

    /// Validates the request, then packs sheet after sheet until every
    /// unit is placed, the sheet ceiling is reached, or a sheet comes
    /// back empty (nothing remaining can ever fit). Pure function of
    /// the solver's inputs.
    pub fn solve(&self) -> Result<LayoutResult, LayoutError> {
        let geom = validate_config(&self.config)?;
        validate_items(&self.items)?;

        let mut remaining = expand_units(&self.items, &self.config);
        let total_requested = remaining.len();
        sort_units(&mut remaining);

        let mut sheets: Vec<SheetResult> = Vec::new();
        let mut sheet_index = 0usize;
        while !remaining.is_empty() && sheet_index < self.config.max_sheets as usize {
            let (placed, leftover) = pack_sheet(&geom, &remaining);
            if placed.is_empty() {
                warn!(
                    units = remaining.len(),
                    "remaining units exceed the printable area, aborting"
                );
                break;
            }
            debug!(
                sheet = sheet_index,
                placed = placed.len(),
                leftover = leftover.len(),
                "sheet packed"
            );
            sheets.push(build_sheet_result(&geom, sheet_index, placed));
            remaining = leftover;
            sheet_index += 1;
        }

        let total_arranged = sheets.iter().map(|s| s.placements.len()).sum();
        let aggregate_efficiency_pct = stats::aggregate_efficiency_pct(&sheets);
        let rotated_count = stats::rotated_count(&sheets);
        Ok(LayoutResult {
            sheets,
            unplaced: remaining.into_iter().map(|u| u.item_id).collect(),
            total_requested,
            total_arranged,
            aggregate_efficiency_pct,
            rotated_count,
        })
    }
}

fn validate_config(config: &SheetConfig) -> Result<SheetGeom, LayoutError> {
    let invalid = |msg: &str| LayoutError::InvalidConfig(msg.to_string());

    let positive = |v: f64, what: &str| {
        if !v.is_finite() || v <= 0.0 {
            Err(invalid(&format!("{what} must be positive")))
        } else {
            Ok(Mm::from_mm(v))
        }
    };
    let non_negative = |v: f64, what: &str| {
        if !v.is_finite() || v < 0.0 {
            Err(invalid(&format!("{what} must not be negative")))
        } else {
            Ok(Mm::from_mm(v))
        }
    };

    let width = positive(config.width_mm, "sheet width")?;
    let height = positive(config.height_mm, "sheet height")?;
    let margin_top = non_negative(config.margin_top_mm, "top margin")?;
    let margin_bottom = non_negative(config.margin_bottom_mm, "bottom margin")?;
    let margin_left = non_negative(config.margin_left_mm, "left margin")?;
    let margin_right = non_negative(config.margin_right_mm, "right margin")?;
    let spacing_x = non_negative(config.spacing_x_mm, "horizontal spacing")?;
    let spacing_y = non_negative(config.spacing_y_mm, "vertical spacing")?;
    let bleed = non_negative(config.bleed_mm, "bleed")?;
    let mark_length = non_negative(config.mark_length_mm, "cutting mark length")?;
    let mark_offset = non_negative(config.mark_offset_mm, "cutting mark offset")?;

    if config.max_sheets == 0 {
        return Err(invalid("max sheets must be at least 1"));
    }

    let printable_w = width - margin_left - margin_right;
    let printable_h = height - margin_top - margin_bottom;
    if !printable_w.is_positive() || !printable_h.is_positive() {
        return Err(invalid("margins leave no printable area"));
    }

    Ok(SheetGeom {
        printable: Rect::new(margin_left, margin_top, printable_w, printable_h),
        spacing_x,
        spacing_y,
        bleed,
        mark_length,
        mark_offset,
    })
}

fn validate_items(items: &[Item]) -> Result<(), LayoutError> {
    for item in items {
        let fail = |reason: &str| LayoutError::InvalidItem {
            id: item.id.clone(),
            reason: reason.to_string(),
        };
        if !item.width_mm.is_finite() || item.width_mm <= 0.0 {
            return Err(fail("width must be positive"));
        }
        if !item.height_mm.is_finite() || item.height_mm <= 0.0 {
            return Err(fail("height must be positive"));
        }
        if item.quantity < 1 {
            return Err(fail("quantity must be at least 1"));
        }
    }
    Ok(())
}

fn expand_units(items: &[Item], config: &SheetConfig) -> Vec<Unit> {
    let mut units = Vec::with_capacity(items.iter().map(|i| i.quantity as usize).sum());
    for item in items {
        let unit = Unit {
            item_id: item.id.clone(),
            width: Mm::from_mm(item.width_mm),
            height: Mm::from_mm(item.height_mm),
            allow_rotation: item.allow_rotation && config.allow_rotation,
        };
        for _ in 0..item.quantity {
            units.push(unit.clone());
        }
    }
    units
}

/// Largest footprint area first; ties broken by the longer side, then
/// by submission order (the sort is stable).
fn sort_units(units: &mut [Unit]) {
    units.sort_by(|a, b| {
        let area_a = Mm::area_mm2(a.width, a.height);
        let area_b = Mm::area_mm2(b.width, b.height);
        area_b
            .total_cmp(&area_a)
            .then_with(|| b.width.max(b.height).cmp(&a.width.max(a.height)))
    });
}

fn pack_sheet(geom: &SheetGeom, units: &[Unit]) -> (Vec<(String, PlacedRect)>, Vec<Unit>) {
    let mut packer = SheetPacker::new(geom.printable, geom.spacing_x, geom.spacing_y, geom.bleed);
    let mut placed = Vec::new();
    let mut leftover = Vec::new();
    for unit in units {
        match packer.try_place(unit.width, unit.height, unit.allow_rotation) {
            Some(rect) => placed.push((unit.item_id.clone(), rect)),
            None => leftover.push(unit.clone()),
        }
    }
    (placed, leftover)
}

fn build_sheet_result(
    geom: &SheetGeom,
    sheet_index: usize,
    placed: Vec<(String, PlacedRect)>,
) -> SheetResult {
    let mut placements = Vec::with_capacity(placed.len());
    let mut cutting_marks = Vec::with_capacity(placed.len() * 8);
    let mut used_area_mm2 = 0.0;

    for (item_id, rect) in placed {
        let footprint = Rect::new(rect.x, rect.y, rect.width, rect.height);
        cutting_marks.extend(marks_for_placement(
            footprint,
            geom.bleed,
            sheet_index,
            geom.mark_length,
            geom.mark_offset,
        ));
        used_area_mm2 += footprint.area_mm2();
        placements.push(Placement {
            item_id,
            sheet_index,
            x_mm: rect.x.as_mm(),
            y_mm: rect.y.as_mm(),
            width_mm: rect.width.as_mm(),
            height_mm: rect.height.as_mm(),
            rotated: rect.rotated,
        });
    }

    let usable_area_mm2 = geom.printable.area_mm2();
    let utilization_pct = stats::utilization_pct(used_area_mm2, usable_area_mm2);
    SheetResult {
        sheet_index,
        placements,
        cutting_marks,
        used_area_mm2,
        usable_area_mm2,
        utilization_pct,
    }
}
