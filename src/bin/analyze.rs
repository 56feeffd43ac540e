use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use connect_four_search::ai::movegen::legal_moves;
use connect_four_search::ai::{Agent, RandomAgent, SearchAgent, SearchEngine};
use connect_four_search::config::AppConfig;
use connect_four_search::game::{Board, GameOutcome, GameState, Player, Position, COLS};

/// Analyse a Connect Four position with the search engine.
#[derive(Parser)]
#[command(name = "analyze", about = "Analyse a Connect Four position")]
struct Cli {
    /// Comma-separated 1-based columns played from the empty board, Red first
    #[arg(long, value_delimiter = ',', conflicts_with = "board")]
    moves: Vec<usize>,

    /// File holding a 6-line board diagram ('.', 'R'/'X', 'Y'/'O')
    #[arg(long)]
    board: Option<PathBuf>,

    /// Side to move when analysing a diagram (red or yellow)
    #[arg(long, default_value = "red")]
    to_move: String,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Override the breadth-first node cap
    #[arg(long)]
    node_cap: Option<usize>,

    /// Disable alpha-beta pruning
    #[arg(long)]
    no_pruning: bool,

    /// Instead of analysing, play this many games against a random agent
    #[arg(long)]
    vs_random: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(depth) = cli.depth {
        config.search.max_depth = depth;
    }
    if let Some(cap) = cli.node_cap {
        config.search.node_cap = cap;
    }
    if cli.no_pruning {
        config.search.alpha_beta = false;
    }
    config.validate().context("validating overrides")?;

    if let Some(games) = cli.vs_random {
        return play_vs_random(&config, games);
    }

    let (board, to_move) = match &cli.board {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading board from {}", path.display()))?;
            let board = Board::from_diagram(&text)
                .with_context(|| format!("parsing board in {}", path.display()))?;
            (board, parse_player(&cli.to_move)?)
        }
        None => {
            let state = replay(&cli.moves)?;
            (*state.board(), state.current_player())
        }
    };

    analyze(&config, board, to_move)
}

fn parse_player(name: &str) -> Result<Player> {
    match name.to_ascii_lowercase().as_str() {
        "red" | "r" | "x" => Ok(Player::Red),
        "yellow" | "y" | "o" => Ok(Player::Yellow),
        other => bail!("unknown side '{}' (expected 'red' or 'yellow')", other),
    }
}

/// Replay 1-based columns from the start of a game.
fn replay(moves: &[usize]) -> Result<GameState> {
    let mut state = GameState::initial();
    for (i, &col) in moves.iter().enumerate() {
        if col == 0 || col > COLS {
            bail!("move {}: column {} is not in 1..={}", i + 1, col, COLS);
        }
        state
            .apply_move_mut(col - 1)
            .with_context(|| format!("move {}: column {}", i + 1, col))?;
    }
    Ok(state)
}

fn analyze(config: &AppConfig, board: Board, to_move: Player) -> Result<()> {
    let engine = SearchEngine::new(config.search.clone());
    let position = Position::root(board);

    println!("{board}");
    println!("Side to move:    {}", to_move.name());
    println!("Position score:  {}", engine.evaluate(&position, to_move));

    let legal: Vec<String> = legal_moves(&position)
        .iter()
        .map(|col| (col + 1).to_string())
        .collect();
    println!("Valid moves:     {}", legal.join(" "));

    let bfs = engine.bfs_evaluate(&position, to_move, to_move);
    match bfs.best_score {
        Some(score) => println!(
            "BFS estimate:    {score} ({} nodes expanded, {} discovered)",
            bfs.expanded, bfs.discovered
        ),
        None => println!("BFS estimate:    - (node cap is 0)"),
    }

    let outcome = engine
        .analyze(&position, to_move, config.search.max_depth)
        .context("choosing a move")?;
    let score = outcome
        .score
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    println!(
        "Engine move:     column {} ({:?}, score {score}, {} nodes)",
        outcome.column + 1,
        outcome.decision,
        outcome.nodes
    );

    Ok(())
}

fn play_vs_random(config: &AppConfig, games: usize) -> Result<()> {
    let mut engine = SearchAgent::new(config.search.clone());
    let mut random = RandomAgent::new();
    let mut wins = 0;
    let mut draws = 0;

    for game in 0..games {
        let engine_player = if game % 2 == 0 { Player::Red } else { Player::Yellow };
        let mut state = GameState::initial();

        while !state.is_terminal() {
            let col = if state.current_player() == engine_player {
                engine.select_action(&state)?
            } else {
                random.select_action(&state)?
            };
            state.apply_move_mut(col)?;
        }

        match state.outcome() {
            Some(GameOutcome::Winner(p)) if p == engine_player => wins += 1,
            Some(GameOutcome::Draw) => draws += 1,
            _ => {}
        }
        log::info!(
            "game {}: engine as {}, {} after {} moves",
            game + 1,
            engine_player.name(),
            state.status(),
            state.moves_played()
        );
    }

    println!(
        "{} vs {}: {wins} wins, {draws} draws, {} losses",
        engine.name(),
        random.name(),
        games - wins - draws
    );
    Ok(())
}
