use std::io::Write;
use std::time::Instant;

use chess_rules::perft::{divide, perft};
use chess_rules::{Position, SetupError, START_FEN};
use clap::Parser;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position as _, Role};

#[derive(Parser, Debug)]
#[command(author, version, about = "Count leaf nodes of the legal move tree", long_about = None)]
struct Args {
    /// Setup string (FEN) to start from
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Print the count below each root move
    #[arg(long)]
    divide: bool,

    /// Cross-check the total against shakmaty (queen promotions only)
    #[arg(long)]
    verify: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, thiserror::Error)]
enum PerftError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("oracle rejected setup: {0}")]
    Oracle(String),

    #[error("perft({depth}) mismatch: got {got}, shakmaty counts {expected}")]
    Mismatch { depth: u32, got: u64, expected: u64 },
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    chess_rules::init();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), PerftError> {
    let mut pos = Position::from_fen(&args.fen)?;
    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);
    print!("{}", pos);

    let start = Instant::now();
    let nodes = if args.divide {
        let split = divide(&mut pos, args.depth);
        for (mv, count) in &split {
            println!("{}: {}", mv, count);
        }
        split.iter().map(|(_, n)| n).sum()
    } else {
        perft(&mut pos, args.depth)
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );

    if args.verify {
        let fen = args
            .fen
            .parse::<Fen>()
            .map_err(|e| PerftError::Oracle(e.to_string()))?;
        let oracle: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| PerftError::Oracle(e.to_string()))?;
        let expected = perft_shakmaty(&oracle, args.depth);
        if expected != nodes {
            return Err(PerftError::Mismatch {
                depth: args.depth,
                got: nodes,
                expected,
            });
        }
        log::info!("shakmaty agrees: {} nodes", expected);
    }
    Ok(())
}

// Under-promotions are skipped: generation here only offers the queen.
fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for m in pos.legal_moves() {
        if matches!(m.promotion(), Some(role) if role != Role::Queen) {
            continue;
        }
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}
