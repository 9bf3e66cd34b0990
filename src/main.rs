use clap::Parser;
use layout_optimizer::render;
use layout_optimizer::solver::compute_layout;
use layout_optimizer::types::{Item, SheetConfig};

#[derive(Parser)]
#[command(
    name = "layout_optimizer",
    about = "Automatic print sheet layout (nesting) optimizer"
)]
struct Cli {
    /// Sheet dimensions in mm (WxH, e.g. 330x480)
    #[arg(long)]
    sheet: String,

    /// Items as WxH:qty (e.g. 100x50:6 85x55:12)
    #[arg(long = "item", num_args = 1..)]
    items: Vec<String>,

    /// Margin on all four sides in mm
    #[arg(long, default_value_t = 0.0)]
    margin: f64,

    /// Gap between neighboring items in mm
    #[arg(long, default_value_t = 0.0)]
    spacing: f64,

    /// Trim allowance around each item in mm
    #[arg(long, default_value_t = 0.0)]
    bleed: f64,

    /// Maximum number of sheets to open
    #[arg(long, default_value_t = 1000)]
    max_sheets: u32,

    /// Disable 90° item rotation
    #[arg(long)]
    no_rotate: bool,

    /// Show ASCII preview of each sheet
    #[arg(long)]
    layout: bool,

    /// Print the full result as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn parse_dimensions(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected WxH", s));
    }
    let width = parts[0]
        .parse::<f64>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let height = parts[1]
        .parse::<f64>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    if width <= 0.0 || height <= 0.0 {
        return Err(format!("dimensions must be positive in '{}'", s));
    }
    Ok((width, height))
}

fn parse_item(s: &str, index: usize) -> Result<Item, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(format!("invalid item '{}', expected WxH:qty", s));
    }
    let (width_mm, height_mm) = parse_dimensions(parts[0])?;
    let quantity = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    if quantity == 0 {
        return Err(format!("quantity must be non-zero in '{}'", s));
    }
    let id = format!("item-{}", index + 1);
    Ok(Item {
        id: id.clone(),
        name: id,
        width_mm,
        height_mm,
        quantity,
        allow_rotation: true,
    })
}

fn main() {
    let cli = Cli::parse();

    let (width_mm, height_mm) = parse_dimensions(&cli.sheet).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let items: Vec<Item> = cli
        .items
        .iter()
        .enumerate()
        .map(|(i, s)| parse_item(s, i))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let config = SheetConfig {
        margin_top_mm: cli.margin,
        margin_bottom_mm: cli.margin,
        margin_left_mm: cli.margin,
        margin_right_mm: cli.margin,
        spacing_x_mm: cli.spacing,
        spacing_y_mm: cli.spacing,
        bleed_mm: cli.bleed,
        max_sheets: cli.max_sheets,
        allow_rotation: !cli.no_rotate,
        ..SheetConfig::bare(width_mm, height_mm)
    };

    let result = compute_layout(&items, &config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).expect("result serializes")
        );
        return;
    }

    for sheet in &result.sheets {
        println!(
            "Sheet {} ({:.1}% used):",
            sheet.sheet_index + 1,
            sheet.utilization_pct
        );
        for p in &sheet.placements {
            let rot = if p.rotated { " [rotated]" } else { "" };
            println!(
                "  {} {}x{} @ ({}, {}){}",
                p.item_id, p.width_mm, p.height_mm, p.x_mm, p.y_mm, rot
            );
        }
        if cli.layout {
            print!("{}", render::render_sheet(&config, sheet));
        }
        println!();
    }

    if !result.unplaced.is_empty() {
        println!("Unplaced: {}", result.unplaced.join(", "));
    }

    println!(
        "Summary: {} sheet{} used, {}/{} placed, {:.1}% efficiency, {} rotated",
        result.sheets.len(),
        if result.sheets.len() == 1 { "" } else { "s" },
        result.total_arranged,
        result.total_requested,
        result.aggregate_efficiency_pct,
        result.rotated_count,
    );
}
