#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use levee::{
    init_logging, newly_enclosed, render, CornerClosure, FloodEngine, Layout, ScoreWeights,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum ClosureArg {
    Disabled,
    Enabled,
    Fixpoint,
}

#[cfg(feature = "std")]
impl From<ClosureArg> for CornerClosure {
    fn from(arg: ClosureArg) -> Self {
        match arg {
            ClosureArg::Disabled => CornerClosure::Disabled,
            ClosureArg::Enabled => CornerClosure::Enabled,
            ClosureArg::Fixpoint => CornerClosure::Fixpoint,
        }
    }
}

#[derive(clap::Args)]
#[cfg(feature = "std")]
struct LayoutArgs {
    /// Grid in the text layout notation.
    layout: PathBuf,
    #[arg(long, value_parser = parse_cell, help = "Extra barrier as ROW,COL (repeatable)")]
    barrier: Vec<(usize, usize)>,
    #[arg(long, value_enum, default_value_t = ClosureArg::Enabled)]
    closure: ClosureArg,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Report containment, score and flood order for a layout.
    Evaluate {
        #[command(flatten)]
        args: LayoutArgs,
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
    /// Draw the layout with flooded cells marked.
    Render {
        #[command(flatten)]
        args: LayoutArgs,
    },
}

#[cfg(feature = "std")]
fn parse_cell(s: &str) -> Result<(usize, usize), String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("invalid row '{}'", row))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("invalid column '{}'", col))?;
    Ok((row, col))
}

#[cfg(feature = "std")]
fn load(args: &LayoutArgs) -> anyhow::Result<Layout> {
    let text = std::fs::read_to_string(&args.layout)?;
    let mut layout = Layout::parse(&text).map_err(|e| anyhow::anyhow!(e))?;
    for &(row, col) in &args.barrier {
        if !layout.barriers.insert(row, col) {
            log::warn!("barrier ({}, {}) is outside the grid or already placed", row, col);
        }
    }
    Ok(layout)
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate { args, json } => {
            let layout = load(&args)?;
            let closure = CornerClosure::from(args.closure);
            let engine = FloodEngine::new(ScoreWeights::default(), closure);
            let result = engine.run(&layout.grid, &layout.barriers);
            let enclosed = newly_enclosed(&layout.grid, &layout.barriers, closure);

            if json {
                let report = serde_json::json!({
                    "width": layout.grid.width(),
                    "height": layout.grid.height(),
                    "barriers": layout.barriers.iter().collect::<Vec<_>>(),
                    "containment_active": result.containment_active(),
                    "newly_enclosed": enclosed,
                    "score": result.score(),
                    "breakdown": result.breakdown(),
                    "dry_land": result.dry_land_count(),
                    "flooded": result.flooded_count(),
                    "flood_order": result.flood_order(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Grid {}x{} with {} barriers",
                    layout.grid.width(),
                    layout.grid.height(),
                    layout.barriers.len()
                );
                if result.containment_active() {
                    println!("Containment confirmed; water released.");
                    for point in &enclosed {
                        println!("  enclosed {:?} at ({}, {})", point.category, point.row, point.col);
                    }
                    println!("Flooded cells: {}", result.flooded_count());
                    println!("Dry land:      {}", result.dry_land_count());
                    println!("Score:         {}", result.score());
                } else {
                    println!("No residence newly enclosed; water stays put.");
                }
            }
        }
        Commands::Render { args } => {
            let layout = load(&args)?;
            let engine = FloodEngine::new(ScoreWeights::default(), args.closure.into());
            let result = engine.run(&layout.grid, &layout.barriers);
            print!("{}", render(&layout.grid, &layout.barriers, Some(&result)));
        }
    }
    Ok(())
}
