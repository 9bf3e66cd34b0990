pub mod geometry;
pub mod marks;
pub mod orientation;
pub mod render;
pub mod skyline;
pub mod solver;
pub mod stats;
pub mod types;

pub use solver::{Solver, compute_layout};
pub use types::{
    CuttingMark, Item, LayoutError, LayoutResult, Placement, SheetConfig, SheetResult,
};
