//! Generate a maze on the default board, solve it, and print the result.
//!
//! Usage: `visualize [strategy] [solutions] [seed]`
//!
//! `strategy` is one of `dfs`, `bfs`, `gfs` or `astar` (default `astar`).

use mazepath_board::{Board, BoardConfig};
use mazepath_search::{SearchStatus, Strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let strategy: Strategy = match args.next() {
        Some(s) => s.parse()?,
        None => Strategy::AStar,
    };
    let mut config = BoardConfig::default();
    if let Some(n) = args.next() {
        config.solutions = n.parse()?;
    }
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => rand::random(),
    };

    let mut board = Board::new(config)?;
    let mut rng = StdRng::seed_from_u64(seed);
    board.generate_maze(&mut rng)?;
    board.select_strategy(strategy)?;
    board.start_search()?;
    log::debug!("visualize: seed {seed}, {strategy}");

    let mut ticks = 0usize;
    let status = loop {
        match board.tick()? {
            Some(status) if status.is_terminal() => break status,
            Some(_) => ticks += 1,
            None => break SearchStatus::Exhausted,
        }
    };

    println!("{}", board.render_ascii());
    let (expanded, path_len) = board
        .engine()
        .map_or((0, 0), |e| (e.expanded(), e.path().len()));
    println!(
        "{strategy}: {status:?} after {} ticks, {expanded} expanded, path {} (seed {seed}, {} solutions)",
        ticks + 1,
        path_len,
        board.config().solutions,
    );
    Ok(())
}
