//! Headless chase demo.
//!
//! Run: cargo run --bin chase -- [MAP_FILE] [CONFIG_JSON]
//!
//! Set `RUST_LOG=debug` (or `trace`) to watch the planner.

use tilechase_core::CellMapper;
use tilechase_demos::{DEFAULT_MAP, DemoConfig, Outcome, Simulation};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let map = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_MAP.to_string(),
    };
    let config = match args.next() {
        Some(path) => DemoConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => DemoConfig::default(),
    };

    let mut sim = Simulation::new(&map, config)?;
    let outcome = sim.run();
    let layout = config.layout;
    println!(
        "chaser {} target {}",
        layout.world_to_cell(sim.chaser().position),
        layout.world_to_cell(sim.target().position)
    );
    match outcome {
        Outcome::Caught { ticks } => {
            let secs = ticks as f32 * config.dt;
            println!("caught after {ticks} ticks ({secs:.2}s)");
        }
        Outcome::Escaped => println!("target escaped after {} ticks", sim.ticks()),
    }
    Ok(())
}
