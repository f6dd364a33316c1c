//! Game state and the turn driver.
//!
//! ## Overview
//!
//! [`Game`] ties the pieces together: the board, both hands, the draw
//! pile and the per-turn move log. All mutation happens through tile
//! relocations ([`Game::do_move`] / [`Game::undo_move`]), which keeps
//! apply and undo exactly symmetric; the exhaustive search leans on that
//! symmetry to explore thousands of positions on the live state and
//! leave it untouched.
//!
//! ## Turn cycle
//!
//! A turn is a sequence of hand-to-board relocations followed by
//! [`Game::finish_turn`], which banks the score, refills the hand and
//! passes play. [`Game::play_turn`] drives one full computer turn;
//! [`Game::run`] plays both sides to the end and reports the result.

pub mod turn;

pub use turn::Turn;

use std::cmp::Ordering;
use std::fmt;

use crate::board::{Board, BoardDetails};
use crate::core::{
    GameConfig, GameRng, Move, PlayerId, PlayerMap, TileLoc, TileOwner, TilePos,
};
use crate::search::{BestMove, MoveNode, MoveTree, NodeId, TreeStats};
use crate::tiles::{Hand, TileSet};

/// One player's hand and running score.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub hand: Hand,
    pub score: i32,
}

/// Outcome of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Winner(PlayerId),
    Draw,
}

/// Candidate placements for one position, with the position's own
/// score and partial flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnMoves {
    pub score: i32,
    pub partial: bool,
    pub moves: Vec<Move>,
}

/// Configures and creates a [`Game`].
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Shuffle, deal and hand play to player 0.
    #[must_use]
    pub fn build(self, seed: u64) -> Game {
        let config = self.config;
        let mut rng = GameRng::new(seed);

        let mut tile_set = TileSet::new(&config);
        tile_set.shuffle(&mut rng);

        let mut players = PlayerMap::new(|_| PlayerState {
            hand: Hand::new(config.hand_size),
            score: 0,
        });
        for (_, state) in players.iter_mut() {
            state.hand.refill_from(&mut tile_set);
        }

        let mut board = Board::new(&config);
        board.begin_turn(0);

        Game {
            config,
            board,
            players,
            tile_set,
            turn: Turn::new(0),
            history: Vec::new(),
            current: PlayerId::new(0),
            over: false,
            rng,
        }
    }
}

/// A two-player game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    players: PlayerMap<PlayerState>,
    tile_set: TileSet,
    turn: Turn,
    history: Vec<Turn>,
    current: PlayerId,
    over: bool,
    rng: GameRng,
}

impl Game {
    /// A standard game from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        GameBuilder::new().build(seed)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        self.players.get(player)
    }

    #[must_use]
    pub fn tile_set(&self) -> &TileSet {
        &self.tile_set
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Log of the turn in progress.
    #[must_use]
    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    /// Banked turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Analysis of the turn as it stands.
    pub fn details(&mut self) -> &BoardDetails {
        self.board.details()
    }

    /// Relocate one tile as `mv` directs and log it.
    ///
    /// This is the raw primitive: it does not consult the rules. Use
    /// [`Game::play_move`] for validated placement.
    ///
    /// # Panics
    ///
    /// Panics when an endpoint cannot give up or accept a tile, or when
    /// the endpoint pair is unsupported.
    pub fn do_move(&mut self, mv: Move) {
        debug_assert!(mv.is_valid());
        self.relocate(mv.from, mv.to);
        self.turn.add(mv);
    }

    /// Take back the last move of the current turn.
    ///
    /// [`None`] when the turn has no moves left; banked turns are
    /// final and cannot be unwound.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.turn.pop()?;
        self.relocate(mv.to, mv.from);
        Some(mv)
    }

    /// Return every tile placed this turn to where it came from.
    pub fn cancel_turn(&mut self) {
        while self.undo_move().is_some() {}
    }

    fn relocate(&mut self, from: TileLoc, to: TileLoc) {
        match (from.owner, to.owner) {
            (TileOwner::Player(player), TileOwner::Board) => {
                let slot = from.pos.ix as usize;
                let mut tile = match self.players.get_mut(player).hand.take(slot) {
                    Some(tile) => tile,
                    None => panic!("hand slot {} of {} is empty", slot, player),
                };
                tile.place(player, self.turn.ind);
                self.board.set_cell(to.pos, tile);
            }
            (TileOwner::Board, TileOwner::Player(player)) => {
                let mut tile = self.board.take_cell(from.pos);
                tile.lift();
                let slot = to.pos.ix as usize;
                self.players.get_mut(player).hand.put(slot, tile);
            }
            (TileOwner::Board, TileOwner::Board) => {
                let tile = self.board.take_cell(from.pos);
                self.board.set_cell(to.pos, tile);
            }
            (from_owner, to_owner) => {
                panic!("unsupported move {} -> {}", from_owner, to_owner);
            }
        }
    }

    /// Validated placement: the move must take a tile from the current
    /// player's hand to a cell the analysis allows.
    pub fn play_move(&mut self, mv: Move) -> bool {
        if self.over || !mv.is_valid() {
            return false;
        }
        let player = match mv.from.owner.player() {
            Some(player) => player,
            None => return false,
        };
        if player != self.current {
            return false;
        }
        let slot = mv.from.pos.ix as usize;
        if self.players.get(player).hand.get(slot).is_none() {
            return false;
        }
        if mv.to.owner != TileOwner::Board {
            return false;
        }
        if !self.board.details().positions.contains(&mv.to.pos) {
            return false;
        }

        self.do_move(mv);
        true
    }

    /// Whether the current player can still add a tile this turn.
    pub fn can_move(&mut self) -> bool {
        if self.players.get(self.current).hand.is_empty() {
            return false;
        }
        let details = self.board.details();
        details.valid && !details.positions.is_empty()
    }

    /// Face value of the tile now sitting at a played move's target;
    /// zero when the target is not a board cell or sits empty.
    #[must_use]
    pub fn move_score(&self, mv: Move) -> i32 {
        if mv.to.owner != TileOwner::Board {
            return 0;
        }
        self.board
            .tile(mv.to.pos)
            .map_or(0, |tile| i32::from(tile.value))
    }

    /// Face values this turn has put on the board, summed over the move
    /// log. Display-level accounting, distinct from line scoring.
    #[must_use]
    pub fn turn_score(&self) -> i32 {
        self.turn
            .moves()
            .iter()
            .map(|&mv| self.move_score(mv))
            .sum()
    }

    /// Candidate placements for the position as it stands, or [`None`]
    /// once the turn has gone invalid.
    ///
    /// Candidates pair every allowed cell (in position order) with one
    /// hand slot per distinct tile value.
    pub fn board_moves(&mut self) -> Option<TurnMoves> {
        let player = self.current;
        let details = self.board.details();
        if !details.valid {
            return None;
        }
        let score = details.score;
        let partial = details.partial;
        let positions: Vec<TilePos> = details.positions.iter().copied().collect();

        let values = self.players.get(player).hand.distinct_values();

        let mut moves = Vec::with_capacity(positions.len() * values.len());
        for &pos in &positions {
            for &(slot, _) in &values {
                moves.push(Move::new(TileLoc::hand(player, slot), TileLoc::board(pos)));
            }
        }
        Some(TurnMoves {
            score,
            partial,
            moves,
        })
    }

    /// Explore every continuation of the current turn.
    ///
    /// [`None`] when the position is already invalid. The game state is
    /// identical before and after the call.
    pub fn build_move_tree(&mut self) -> Option<MoveTree> {
        let candidates = self.board_moves()?;
        let mut tree = MoveTree::new();
        let root = tree.alloc(MoveNode::root(candidates.score, candidates.partial));
        self.grow(&mut tree, root, &candidates.moves, 2);
        Some(tree)
    }

    fn grow(&mut self, tree: &mut MoveTree, parent: NodeId, moves: &[Move], depth: u16) {
        debug_assert!(depth as usize <= self.config.hand_size + 1);
        for &mv in moves {
            let guard = MoveGuard::new(self, mv);
            if let Some(next) = guard.game.board_moves() {
                let child = tree.alloc(MoveNode::new(mv, next.score, next.partial, depth, parent));
                tree.add_child(parent, child);
                if !next.moves.is_empty() {
                    guard.game.grow(tree, child, &next.moves, depth + 1);
                }
            }
        }
    }

    /// Best sequence for the current turn, memoized until the board
    /// changes. An invalid result means nothing is worth playing.
    pub fn best_move(&mut self) -> BestMove {
        if let Some(best) = self.board.cached_best() {
            return best.clone();
        }
        let best = match self.build_move_tree() {
            Some(tree) => tree.best_move(),
            None => BestMove::invalid(),
        };
        self.board.store_best(best).clone()
    }

    /// Size and score counters of the current turn's full search tree.
    pub fn search_stats(&mut self) -> Option<TreeStats> {
        self.build_move_tree().map(|tree| tree.stats())
    }

    /// Search and play the best sequence, leaving the turn unbanked.
    pub fn play_best_move(&mut self) -> bool {
        let best = self.best_move();
        if !best.is_valid() {
            return false;
        }
        for &mv in &best.moves {
            self.do_move(mv);
        }
        true
    }

    /// Bank the turn: add its score, refill the hand, pass play.
    ///
    /// Refuses while the turn is invalid or partial (an empty turn is
    /// always partial, so play cannot simply be passed).
    pub fn finish_turn(&mut self) -> bool {
        if self.over {
            return false;
        }
        let details = self.board.details();
        if !details.can_finish() {
            return false;
        }
        let score = details.score;

        let state = self.players.get_mut(self.current);
        state.score += score;
        state.hand.refill_from(&mut self.tile_set);

        self.next_turn();
        true
    }

    fn next_turn(&mut self) {
        let next_ind = self.turn.ind + 1;
        let finished = std::mem::replace(&mut self.turn, Turn::new(next_ind));
        self.history.push(finished);
        self.current = self.current.opponent();
        self.board.begin_turn(next_ind);
    }

    /// Drive one full computer turn. `false` once the game is over.
    pub fn play_turn(&mut self) -> bool {
        if self.over {
            return false;
        }
        if !self.can_move() || !self.play_best_move() {
            self.over = true;
            return false;
        }
        let banked = self.finish_turn();
        assert!(banked, "best sequence did not finish the turn");
        true
    }

    /// Play both sides to completion.
    pub fn run(&mut self) -> GameResult {
        while self.play_turn() {}
        self.outcome()
    }

    /// Final result, [`None`] while the game is still running.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.over.then(|| self.outcome())
    }

    fn outcome(&self) -> GameResult {
        let p0 = self.players.get(PlayerId::new(0)).score;
        let p1 = self.players.get(PlayerId::new(1)).score;
        match p0.cmp(&p1) {
            Ordering::Greater => GameResult::Winner(PlayerId::new(0)),
            Ordering::Less => GameResult::Winner(PlayerId::new(1)),
            Ordering::Equal => GameResult::Draw,
        }
    }

    /// Reset to a fresh game on the same configuration, reshuffling
    /// with the game's own generator.
    pub fn new_game(&mut self) {
        for (_, state) in self.players.iter_mut() {
            state.hand.drain_into(&mut self.tile_set);
            state.score = 0;
        }
        for tile in self.board.drain_tiles() {
            self.tile_set.put_back(tile);
        }
        self.tile_set.shuffle(&mut self.rng);
        for (_, state) in self.players.iter_mut() {
            state.hand.refill_from(&mut self.tile_set);
        }

        self.history.clear();
        self.turn = Turn::new(0);
        self.current = PlayerId::new(0);
        self.over = false;
        self.board.begin_turn(0);
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p0 = self.players.get(PlayerId::new(0));
        let p1 = self.players.get(PlayerId::new(1));
        writeln!(
            f,
            "turn {} ({}), P0 {} - P1 {}",
            self.turn.ind, self.current, p0.score, p1.score
        )?;
        write!(f, "{}", self.board)
    }
}

/// Applies a move on creation and undoes it on drop, so an explored
/// branch restores the position no matter how the scope exits.
struct MoveGuard<'a> {
    game: &'a mut Game,
}

impl<'a> MoveGuard<'a> {
    fn new(game: &'a mut Game, mv: Move) -> Self {
        game.do_move(mv);
        Self { game }
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        let undone = self.game.undo_move();
        debug_assert!(undone.is_some());
    }
}
