use std::collections::{HashSet, VecDeque};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::game::{Player, Position, CENTER_COL};

use super::detect::{is_draw, is_win};
use super::heuristic::{Heuristic, WindowHeuristic};
use super::movegen::{apply_move, is_valid_move, legal_moves, next_states};

/// How `analyze` settled on its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Playing the column wins on the spot.
    ImmediateWin,
    /// The opponent would win by playing the column next.
    Block,
    /// Chosen by minimax plus the positional bias.
    Minimax,
}

/// Result of a move search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub column: usize,
    pub decision: Decision,
    /// Bias-adjusted minimax score of `column`; `None` for shortcut decisions.
    pub score: Option<i32>,
    /// Positions evaluated or expanded by minimax.
    pub nodes: u64,
}

/// Result of a bounded breadth-first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BfsReport {
    /// Best evaluation among dequeued nodes; `None` if nothing was dequeued.
    pub best_score: Option<i32>,
    /// Nodes taken off the frontier.
    pub expanded: usize,
    /// Distinct layouts admitted to the visited set, seed included.
    pub discovered: usize,
}

/// Bonus added to a column's minimax score, favouring the middle of the board.
pub fn column_bias(col: usize) -> i32 {
    match col.abs_diff(CENTER_COL) {
        0 => 10,
        1 => 5,
        2 => 2,
        _ => 0,
    }
}

/// Depth-limited minimax engine with immediate win/block shortcuts.
pub struct SearchEngine {
    config: SearchConfig,
    heuristic: Box<dyn Heuristic>,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        SearchEngine {
            config,
            heuristic: Box::new(WindowHeuristic),
        }
    }

    pub fn with_heuristic(config: SearchConfig, heuristic: Box<dyn Heuristic>) -> Self {
        SearchEngine { config, heuristic }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Change the horizon shared by minimax callers and the breadth-first
    /// estimator.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.config.max_depth = max_depth;
    }

    /// Score `position` from `side`'s point of view.
    pub fn evaluate(&self, position: &Position, side: Player) -> i32 {
        self.heuristic.evaluate(position, side)
    }

    /// Column for `side` to play, searching `max_depth` plies.
    pub fn choose_move(
        &self,
        position: &Position,
        side: Player,
        max_depth: usize,
    ) -> Result<usize, SearchError> {
        self.analyze(position, side, max_depth)
            .map(|outcome| outcome.column)
    }

    /// Like [`choose_move`](Self::choose_move), also reporting how the column
    /// was found.
    pub fn analyze(
        &self,
        position: &Position,
        side: Player,
        max_depth: usize,
    ) -> Result<SearchOutcome, SearchError> {
        let moves = legal_moves(position);
        if moves.is_empty() {
            return Err(SearchError::EmptyMoveSet);
        }

        if let Some(column) = moves.iter().copied().find(|&col| wins_with(position, col, side)) {
            log::debug!("{} wins immediately in column {column}", side.name());
            return Ok(SearchOutcome {
                column,
                decision: Decision::ImmediateWin,
                score: None,
                nodes: 0,
            });
        }

        if let Some(column) = moves
            .iter()
            .copied()
            .find(|&col| wins_with(position, col, side.other()))
        {
            log::debug!("{} blocks column {column}", side.name());
            return Ok(SearchOutcome {
                column,
                decision: Decision::Block,
                score: None,
                nodes: 0,
            });
        }

        let mut search = Minimax::new(self, side);
        let mut best_column = CENTER_COL;
        let mut best_score = i32::MIN;
        let child_depth = max_depth.saturating_sub(1);

        for col in moves {
            let Ok(child) = apply_move(position, col, side) else {
                continue;
            };
            let score = search
                .run(&child, child_depth, false, i32::MIN, i32::MAX)
                .saturating_add(column_bias(col));
            log::trace!("column {col}: {score}");
            if score > best_score {
                best_score = score;
                best_column = col;
            }
        }

        log::debug!(
            "{} plays column {best_column} (score {best_score}, depth {max_depth}, {} nodes)",
            side.name(),
            search.nodes
        );

        Ok(SearchOutcome {
            column: best_column,
            decision: Decision::Minimax,
            score: Some(best_score),
            nodes: search.nodes,
        })
    }

    /// Minimax value of `state` for `side`. When `maximizing`, `side` is to
    /// move; otherwise its opponent is.
    pub fn minimax(
        &self,
        state: &Position,
        side: Player,
        depth: usize,
        maximizing: bool,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        Minimax::new(self, side).run(state, depth, maximizing, alpha, beta)
    }

    /// Estimate the value of `seed` for `side` by breadth-first exploration.
    ///
    /// Dequeues at most `node_cap` nodes and never expands a node whose ply
    /// has reached `max_depth`. The side to move at each node is the opponent
    /// of its last mover, or `to_move` at a seed without a last move. `side`
    /// only chooses the point of view of the scores.
    pub fn bfs_evaluate(&self, seed: &Position, side: Player, to_move: Player) -> BfsReport {
        let mut frontier = VecDeque::new();
        let mut visited = HashSet::new();

        frontier.push_back(*seed);
        visited.insert(*seed);

        let mut best_score: Option<i32> = None;
        let mut expanded = 0;

        while expanded < self.config.node_cap {
            let Some(current) = frontier.pop_front() else {
                break;
            };
            expanded += 1;

            let score = self.evaluate(&current, side);
            if best_score.is_none_or(|best| score > best) {
                best_score = Some(score);
            }

            if current.ply() >= self.config.max_depth {
                continue;
            }

            let mover = current.last_player().map_or(to_move, Player::other);
            for next in next_states(&current, mover) {
                if visited.insert(next) {
                    frontier.push_back(next);
                }
            }
        }

        log::trace!(
            "bfs: {expanded} expanded, {} discovered, best {best_score:?}",
            visited.len()
        );

        BfsReport {
            best_score,
            expanded,
            discovered: visited.len(),
        }
    }

    /// True if `side` playing `col` wins on the spot.
    pub fn is_winning_move(&self, position: &Position, col: usize, side: Player) -> bool {
        wins_with(position, col, side)
    }

    /// True if the opponent of `side` would win by playing `col`.
    pub fn is_blocking_move(&self, position: &Position, col: usize, side: Player) -> bool {
        wins_with(position, col, side.other())
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

fn wins_with(position: &Position, col: usize, player: Player) -> bool {
    is_valid_move(position, col)
        && apply_move(position, col, player).is_ok_and(|next| is_win(&next))
}

/// One minimax run: the engine, the maximizing side and a node counter.
struct Minimax<'a> {
    engine: &'a SearchEngine,
    side: Player,
    nodes: u64,
}

impl<'a> Minimax<'a> {
    fn new(engine: &'a SearchEngine, side: Player) -> Self {
        Minimax {
            engine,
            side,
            nodes: 0,
        }
    }

    fn run(
        &mut self,
        state: &Position,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 || is_win(state) || is_draw(state) {
            return self.engine.evaluate(state, self.side);
        }

        let prune = self.engine.config.alpha_beta;

        if maximizing {
            let mut best = i32::MIN;
            for next in next_states(state, self.side) {
                let score = self.run(&next, depth - 1, false, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if prune && beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for next in next_states(state, self.side.other()) {
                let score = self.run(&next, depth - 1, true, alpha, beta);
                best = best.min(score);
                beta = beta.min(score);
                if prune && beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::ai::detect::is_terminal;
    use crate::game::{Board, COLS};

    fn engine() -> SearchEngine {
        SearchEngine::default()
    }

    fn engine_with(max_depth: usize, node_cap: usize, alpha_beta: bool) -> SearchEngine {
        SearchEngine::new(SearchConfig {
            max_depth,
            node_cap,
            alpha_beta,
        })
    }

    fn position(diagram: &str) -> Position {
        Position::root(Board::from_diagram(diagram).unwrap())
    }

    /// Random non-terminal position reached by alternating moves from Red.
    fn random_position(rng: &mut StdRng, max_pieces: usize) -> (Position, Player) {
        let mut position = Position::root(Board::new());
        let mut player = Player::Red;
        let pieces = rng.random_range(0..=max_pieces);
        for _ in 0..pieces {
            let moves = legal_moves(&position);
            let col = moves[rng.random_range(0..moves.len())];
            let next = apply_move(&position, col, player).unwrap();
            if is_terminal(&next) {
                break;
            }
            position = next;
            player = player.other();
        }
        (Position::root(*position.board()), player)
    }

    #[test]
    fn column_bias_favours_center() {
        let bias: Vec<i32> = (0..COLS).map(column_bias).collect();
        assert_eq!(bias, vec![0, 2, 5, 10, 5, 2, 0]);
    }

    #[test]
    fn empty_board_plays_center() {
        let root = Position::root(Board::new());
        for depth in [1, 2, 4] {
            assert_eq!(engine().choose_move(&root, Player::Yellow, depth), Ok(3));
            assert_eq!(engine().choose_move(&root, Player::Red, depth), Ok(3));
        }
    }

    #[test]
    fn odd_depth_opening_prefers_near_center() {
        // Odd depths end on the mover's own piece; column 2, the first of the
        // symmetric pair 2/4, outscores the center here.
        let root = Position::root(Board::new());
        let outcome = engine().analyze(&root, Player::Red, 3).unwrap();
        assert_eq!(outcome.column, 2);
        assert_eq!(outcome.score, Some(105));
    }

    #[test]
    fn takes_immediate_horizontal_win() {
        let root = position(
            "
            .......
            .......
            .......
            .......
            RRR....
            YYY....
            ",
        );
        // Yellow owns the bottom row 0..3; column 3 completes it.
        let outcome = engine().analyze(&root, Player::Yellow, 4).unwrap();
        assert_eq!(outcome.column, 3);
        assert_eq!(outcome.decision, Decision::ImmediateWin);
        assert_eq!(outcome.nodes, 0);
    }

    #[test]
    fn blocks_vertical_threat() {
        let root = position(
            "
            .......
            .......
            .......
            ..R....
            ..R...Y
            ..R..YY
            ",
        );
        let outcome = engine().analyze(&root, Player::Yellow, 4).unwrap();
        assert_eq!(outcome.column, 2);
        assert_eq!(outcome.decision, Decision::Block);
    }

    #[test]
    fn prefers_win_over_block() {
        let root = position(
            "
            .......
            .......
            .......
            .......
            YYY....
            RRR....
            ",
        );
        // Both sides threaten row-wise; Red to move wins first at column 3.
        let outcome = engine().analyze(&root, Player::Red, 4).unwrap();
        assert_eq!(outcome.column, 3);
        assert_eq!(outcome.decision, Decision::ImmediateWin);
    }

    #[test]
    fn first_winning_column_is_taken() {
        let root = position(
            "
            .......
            .......
            .......
            R.....Y
            R.....Y
            R.....Y
            ",
        );
        // Red wins in column 0 (vertical); Yellow's threat in column 6 is ignored.
        assert_eq!(engine().choose_move(&root, Player::Red, 3), Ok(0));
        // Yellow to move: win at 6 beats blocking at 0.
        assert_eq!(engine().choose_move(&root, Player::Yellow, 3), Ok(6));
    }

    #[test]
    fn full_board_is_an_empty_move_set() {
        let full = position(
            "
            YRYRYRY
            YRYRYRR
            YRYRYRY
            RYRYRYR
            RYRYRYY
            RYRYRYR
            ",
        );
        assert_eq!(
            engine().choose_move(&full, Player::Red, 3),
            Err(SearchError::EmptyMoveSet)
        );
    }

    #[test]
    fn depth_zero_scores_children_directly() {
        let root = Position::root(Board::new());
        let outcome = engine().analyze(&root, Player::Red, 0).unwrap();
        assert_eq!(outcome.column, 3);
        // One evaluation per child, no expansion.
        assert_eq!(outcome.nodes, COLS as u64);
    }

    #[test]
    fn minimax_terminal_and_leaf_values() {
        let e = engine();
        let mut state = Position::root(Board::new());
        for col in 0..4 {
            state = apply_move(&state, col, Player::Red).unwrap();
        }
        // A decided position is terminal regardless of remaining depth.
        assert_eq!(e.minimax(&state, Player::Red, 5, true, i32::MIN, i32::MAX), 1000);
        assert_eq!(e.minimax(&state, Player::Yellow, 5, true, i32::MIN, i32::MAX), -1000);

        let leaf = Position::root(Board::new());
        assert_eq!(e.minimax(&leaf, Player::Red, 0, true, i32::MIN, i32::MAX), 0);
    }

    #[test]
    fn minimax_one_ply_maximizes_and_minimizes() {
        let e = engine();
        let root = Position::root(Board::new());
        let best_child = next_states(&root, Player::Red)
            .iter()
            .map(|p| e.evaluate(p, Player::Red))
            .max()
            .unwrap();
        assert_eq!(
            e.minimax(&root, Player::Red, 1, true, i32::MIN, i32::MAX),
            best_child
        );
        assert_eq!(
            e.minimax(&root, Player::Red, 1, false, i32::MIN, i32::MAX),
            -best_child
        );
    }

    #[test]
    fn pruning_never_changes_the_choice() {
        let pruned = engine_with(4, 1000, true);
        let full = engine_with(4, 1000, false);
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..25 {
            let (root, side) = random_position(&mut rng, 16);
            if legal_moves(&root).is_empty() {
                continue;
            }
            for depth in 1..=4 {
                let a = pruned.analyze(&root, side, depth).unwrap();
                let b = full.analyze(&root, side, depth).unwrap();
                assert_eq!(a.column, b.column, "depth {depth} on\n{}", root.board());
                assert_eq!(a.score, b.score);
                assert!(a.nodes <= b.nodes);
            }
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes_on_open_board() {
        let root = Position::root(Board::new());
        let a = engine_with(4, 1000, true).analyze(&root, Player::Red, 4).unwrap();
        let b = engine_with(4, 1000, false).analyze(&root, Player::Red, 4).unwrap();
        assert_eq!(a.column, b.column);
        assert!(a.nodes < b.nodes, "{} vs {}", a.nodes, b.nodes);
    }

    #[test]
    fn engine_avoids_handing_over_a_win() {
        // Playing column 4 for Red lifts that column so Yellow can finish the
        // diagonal from (5,1) at (2,4).
        let root = position(
            "
            .......
            .......
            .......
            ...Y...
            ..YRR..
            .YRRY..
            ",
        );
        let e = engine();
        let col = e.choose_move(&root, Player::Red, 4).unwrap();
        let after = apply_move(&root, col, Player::Red).unwrap();
        let reply_wins = legal_moves(&after)
            .into_iter()
            .any(|c| e.is_winning_move(&after, c, Player::Yellow));
        assert!(!reply_wins, "column {col} lets Yellow win");
    }

    #[test]
    fn winning_and_blocking_helpers() {
        let root = position(
            "
            .......
            .......
            .......
            .......
            .......
            RRR.YYY
            ",
        );
        let e = engine();
        assert!(e.is_winning_move(&root, 3, Player::Red));
        assert!(e.is_blocking_move(&root, 3, Player::Red));
        assert!(!e.is_winning_move(&root, 0, Player::Red));
        assert!(!e.is_winning_move(&root, COLS, Player::Red));
    }

    /// All states reachable from `seed` under the breadth-first rules, by
    /// depth-first enumeration.
    fn enumerate(seed: &Position, side: Player, max_depth: usize) -> HashSet<Position> {
        fn walk(p: &Position, side: Player, max_depth: usize, out: &mut HashSet<Position>) {
            out.insert(*p);
            if p.ply() >= max_depth {
                return;
            }
            let to_move = p.last_player().map_or(side, Player::other);
            for next in next_states(p, to_move) {
                walk(&next, side, max_depth, out);
            }
        }
        let mut out = HashSet::new();
        walk(seed, side, max_depth, &mut out);
        out
    }

    #[test]
    fn bfs_visits_each_reachable_state_once() {
        let seed = position(
            "
            .......
            .......
            .......
            .......
            .......
            ..YR...
            ",
        );
        let e = engine_with(3, 1000, true);
        let report = e.bfs_evaluate(&seed, Player::Red, Player::Red);
        let all = enumerate(&seed, Player::Red, 3);

        assert!(all.len() < 1000);
        assert_eq!(report.expanded, all.len());
        assert_eq!(report.discovered, all.len());

        let best = all.iter().map(|p| e.evaluate(p, Player::Red)).max();
        assert_eq!(report.best_score, best);
    }

    #[test]
    fn bfs_respects_node_cap() {
        let seed = Position::root(Board::new());

        let capped =
            engine_with(6, 1000, true).bfs_evaluate(&seed, Player::Red, Player::Red);
        assert_eq!(capped.expanded, 1000);
        assert!(capped.discovered > 1000);

        let none = engine_with(6, 0, true).bfs_evaluate(&seed, Player::Red, Player::Red);
        assert_eq!(none.expanded, 0);
        assert_eq!(none.best_score, None);

        let one = engine_with(6, 1, true).bfs_evaluate(&seed, Player::Red, Player::Red);
        assert_eq!(one.expanded, 1);
        assert_eq!(one.best_score, Some(0));
        assert_eq!(one.discovered, 1 + COLS);
    }

    #[test]
    fn bfs_depth_zero_scores_only_the_seed() {
        let seed = position(
            "
            .......
            .......
            .......
            .......
            .......
            ...R...
            ",
        );
        let e = engine_with(0, 1000, true);
        let report = e.bfs_evaluate(&seed, Player::Red, Player::Red);
        assert_eq!(report.expanded, 1);
        assert_eq!(report.discovered, 1);
        assert_eq!(report.best_score, Some(e.evaluate(&seed, Player::Red)));
    }

    #[test]
    fn bfs_root_mover_is_independent_of_scoring_side() {
        // Red to move after 4,4, scored for Yellow: Red's replies are expanded
        let seed = position(
            "
            .......
            .......
            .......
            .......
            ...Y...
            ...R...
            ",
        );
        let e = engine_with(1, 1000, true);

        let red_moves = e.bfs_evaluate(&seed, Player::Yellow, Player::Red);
        assert_eq!(red_moves.best_score, Some(30));
        assert_eq!(red_moves.expanded, 1 + COLS);

        let yellow_moves = e.bfs_evaluate(&seed, Player::Yellow, Player::Yellow);
        assert_eq!(yellow_moves.best_score, Some(170));
    }

    #[test]
    fn bfs_is_deterministic() {
        let seed = Position::root(Board::new());
        let e = engine_with(4, 500, true);
        assert_eq!(
            e.bfs_evaluate(&seed, Player::Yellow, Player::Red),
            e.bfs_evaluate(&seed, Player::Yellow, Player::Red)
        );
    }

    #[test]
    fn search_leaves_the_root_untouched() {
        let root = position(
            "
            .......
            .......
            .......
            ...Y...
            ...R...
            ..RYR..
            ",
        );
        let before = *root.board();
        let _ = engine().choose_move(&root, Player::Yellow, 4);
        let _ = engine().bfs_evaluate(&root, Player::Yellow, Player::Red);
        assert_eq!(*root.board(), before);
        assert_eq!(root.board().piece_count(), 5);
    }
}
