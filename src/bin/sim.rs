use levee::{init_logging, Layout, Session, SessionStatus};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Places seeded random barriers on a layout until a residence is enclosed
/// or no valid cell is left, then prints the outcome as JSON.
fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <layout> <seed>", args[0]);
        std::process::exit(1);
    }
    let text = std::fs::read_to_string(&args[1])?;
    let seed: u64 = args[2].parse()?;

    let layout = Layout::parse(&text).map_err(|e| anyhow::anyhow!(e))?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session = Session::from_state(
        layout.grid,
        levee::SessionState {
            barriers: layout.barriers.iter().collect(),
            history: Vec::new(),
            budget: None,
        },
    )
    .map_err(|e| anyhow::anyhow!(e))?;

    let mut placements = Vec::new();
    while session.status() == SessionStatus::Open {
        let Ok((row, col)) = session.random_placement(&mut rng) else {
            break;
        };
        session.place(row, col).map_err(|e| anyhow::anyhow!(e))?;
        placements.push((row, col));
    }

    let result = session.result();
    let summary = json!({
        "seed": seed,
        "placements": placements,
        "contained": session.status() == SessionStatus::Contained,
        "score": result.score(),
        "dry_land": result.dry_land_count(),
        "flooded": result.flooded_count(),
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
