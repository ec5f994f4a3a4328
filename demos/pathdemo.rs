//! Theta* on an ASCII map, printed to the terminal.
//!
//! Run: cargo run --bin pathdemo -- [MAP] [START GOAL]
//! Set RUST_LOG=debug to see the search log.

use sightline_demos::{Args, DemoError, render, summary};
use sightline_paths::ThetaStar;

fn run() -> Result<(), DemoError> {
    let args = Args::parse(std::env::args().skip(1))?;
    let grid = args.load_grid()?;
    log::info!(
        "map {} ({} walkable), {} -> {}",
        grid.bounds(),
        grid.count_walkable(),
        args.start,
        args.goal
    );

    let outcome = ThetaStar::default().search(&grid, args.start, args.goal)?;
    print!("{}", render(&grid, &outcome));
    println!("{}", summary(&outcome));
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
