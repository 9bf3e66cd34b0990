use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A print design to be nested, as submitted by the caller.
///
/// `quantity` copies are placed independently; every resulting
/// placement carries the same `id` so the caller can tell which
/// design it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub width_mm: f64,
    pub height_mm: f64,
    pub quantity: u32,
    #[serde(default = "default_true")]
    pub allow_rotation: bool,
}

/// Sheet geometry and packing parameters for one layout request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default)]
    pub margin_top_mm: f64,
    #[serde(default)]
    pub margin_bottom_mm: f64,
    #[serde(default)]
    pub margin_left_mm: f64,
    #[serde(default)]
    pub margin_right_mm: f64,
    /// Minimum horizontal gap between neighboring items.
    #[serde(default)]
    pub spacing_x_mm: f64,
    /// Minimum vertical gap between neighboring items.
    #[serde(default)]
    pub spacing_y_mm: f64,
    /// Trim allowance around each item; collision and containment are
    /// checked on the bleed-expanded footprint.
    #[serde(default)]
    pub bleed_mm: f64,
    /// Hard ceiling on opened sheets, guarantees termination.
    #[serde(default = "default_max_sheets")]
    pub max_sheets: u32,
    /// Global rotation switch; an item is only ever rotated when both
    /// this and its own `allow_rotation` are true.
    #[serde(default = "default_true")]
    pub allow_rotation: bool,
    #[serde(default = "default_mark_length")]
    pub mark_length_mm: f64,
    #[serde(default = "default_mark_offset")]
    pub mark_offset_mm: f64,
}

fn default_true() -> bool {
    true
}

fn default_max_sheets() -> u32 {
    1000
}

fn default_mark_length() -> f64 {
    5.0
}

fn default_mark_offset() -> f64 {
    3.0
}

impl SheetConfig {
    /// Plain sheet with no margins, spacing, or bleed.
    pub fn bare(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            margin_top_mm: 0.0,
            margin_bottom_mm: 0.0,
            margin_left_mm: 0.0,
            margin_right_mm: 0.0,
            spacing_x_mm: 0.0,
            spacing_y_mm: 0.0,
            bleed_mm: 0.0,
            max_sheets: default_max_sheets(),
            allow_rotation: true,
            mark_length_mm: default_mark_length(),
            mark_offset_mm: default_mark_offset(),
        }
    }
}

/// One placed unit. `x_mm`/`y_mm` anchor the top-left of the item
/// footprint in sheet coordinates, bleed excluded; `width_mm` and
/// `height_mm` are the effective (post-rotation) dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub item_id: String,
    pub sheet_index: usize,
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub rotated: bool,
}

/// A short trim-line segment next to one corner of a placement's
/// bleed-expanded boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingMark {
    pub sheet_index: usize,
    pub x1_mm: f64,
    pub y1_mm: f64,
    pub x2_mm: f64,
    pub y2_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetResult {
    pub sheet_index: usize,
    pub placements: Vec<Placement>,
    pub cutting_marks: Vec<CuttingMark>,
    /// Sum of un-expanded item footprint areas on this sheet.
    pub used_area_mm2: f64,
    /// Sheet area minus margins.
    pub usable_area_mm2: f64,
    pub utilization_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub sheets: Vec<SheetResult>,
    /// One entry per unit that fit on no sheet, so
    /// `total_arranged + unplaced.len() == total_requested` always holds.
    pub unplaced: Vec<String>,
    pub total_requested: usize,
    pub total_arranged: usize,
    pub aggregate_efficiency_pct: f64,
    pub rotated_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Sheet geometry that cannot be packed against; the request is
    /// rejected without a partial result.
    #[error("invalid sheet configuration: {0}")]
    InvalidConfig(String),

    /// A malformed item rejects the whole batch so the caller gets
    /// explicit feedback instead of silently missing placements.
    #[error("invalid item '{id}': {reason}")]
    InvalidItem { id: String, reason: String },
}
