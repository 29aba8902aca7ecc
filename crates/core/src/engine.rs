//! Engine module - the game-state engine
//!
//! Ties together the grid, the active piece, the shape source and the
//! score/speed progression. The grid only ever holds locked cells; the active
//! piece is kept separately and merged in by [`Engine::snapshot_into`].
//!
//! One gravity step is [`Engine::tick`]. The caller (see `webtris-engine`)
//! schedules ticks every [`Engine::speed_ms`] milliseconds and stops once the
//! phase is [`Phase::GameOver`].

use log::{debug, info, trace};

use crate::config::{EngineConfig, RotationPolicy};
use crate::error::InitializationError;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::{RandomShapes, ShapeSource};
use crate::snapshot::GameSnapshot;
use crate::types::{Cell, GameCommand, LastEvent, Phase, GRID_WIDTH, SPAWN_Y};

#[derive(Debug, Clone)]
pub struct Engine<S = RandomShapes> {
    grid: Grid,
    active: Option<Piece>,
    phase: Phase,
    score: u32,
    speed_ms: u32,
    lines: u32,
    /// Successful spawns so far.
    pieces: u32,
    /// Last lock/line-clear/game-over event (consumed by the presentation layer).
    last_event: Option<LastEvent>,
    config: EngineConfig,
    source: S,
}

impl Engine<RandomShapes> {
    /// Engine with uniformly random pieces, seeded from `config.seed` when set
    pub fn new(config: EngineConfig) -> Result<Self, InitializationError> {
        let source = match config.seed {
            Some(seed) => RandomShapes::seeded(seed),
            None => RandomShapes::from_entropy(),
        };
        Self::with_source(config, source)
    }
}

impl<S: ShapeSource> Engine<S> {
    /// Engine on an empty grid drawing pieces from `source`
    pub fn with_source(config: EngineConfig, source: S) -> Result<Self, InitializationError> {
        Self::with_grid(config, Grid::new(), source)
    }

    /// Engine starting from an existing grid
    ///
    /// Fails if the config is inconsistent or the first piece cannot spawn.
    pub fn with_grid(
        config: EngineConfig,
        grid: Grid,
        source: S,
    ) -> Result<Self, InitializationError> {
        config.validate()?;

        let mut engine = Self {
            grid,
            active: None,
            phase: Phase::Spawning,
            score: 0,
            speed_ms: config.initial_speed_ms,
            lines: 0,
            pieces: 0,
            last_event: None,
            config,
            source,
        };

        if engine.spawn_piece().is_none() {
            return Err(InitializationError::SpawnBlocked);
        }
        // Initial spawn is not an event the presentation layer should see.
        engine.last_event = None;

        debug!(
            "engine initialised: speed={}ms floor={}ms rotation={:?}",
            engine.speed_ms, engine.config.min_speed_ms, engine.config.rotation
        );
        Ok(engine)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the locked grid, for fixtures and tools.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current tick interval in milliseconds
    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Take and clear the last lock/line-clear/game-over event.
    pub fn take_last_event(&mut self) -> Option<LastEvent> {
        self.last_event.take()
    }

    fn event_mut(&mut self) -> &mut LastEvent {
        self.last_event.get_or_insert_with(LastEvent::default)
    }

    fn transition(&mut self, next: Phase) {
        if self.phase != next {
            trace!("phase {} -> {}", self.phase.as_str(), next.as_str());
        }
        self.phase = next;
    }

    /// Whether every occupied cell of `piece` lands on an empty cell inside the grid.
    ///
    /// The bounds check happens before any read, so probes above, below or
    /// beside the grid are simply invalid.
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .all(|(row, col)| self.grid.is_empty_at(row, col))
    }

    /// Spawn a new piece from the shape source, centered on the spawn row.
    ///
    /// Returns `None` and ends the game when the new piece does not fit.
    pub fn spawn_piece(&mut self) -> Option<Piece> {
        if self.is_game_over() {
            return None;
        }
        self.transition(Phase::Spawning);

        let kind = self.source.next_kind();
        let mut piece = Piece::new(kind);
        piece.x = ((GRID_WIDTH - piece.shape.cols()) / 2) as i8;
        piece.y = SPAWN_Y;

        if !self.is_valid(&piece) {
            debug!("spawn blocked for {:?} at ({}, {})", kind, piece.x, piece.y);
            self.game_over();
            return None;
        }

        self.active = Some(piece);
        self.pieces = self.pieces.wrapping_add(1);
        self.transition(Phase::Falling);
        Some(piece)
    }

    /// Try to move the active piece by `(dx, dy)`.
    ///
    /// A blocked downward move locks the piece and spawns the next one. A
    /// blocked sideways move changes nothing.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if self.is_valid(&moved) {
            self.active = Some(moved);
            return true;
        }

        if dy > 0 {
            self.lock_and_spawn();
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Rotate the active piece 90° clockwise.
    ///
    /// Under [`RotationPolicy::Revert`] an illegal result is rejected and the
    /// piece keeps its shape. Under [`RotationPolicy::Unchecked`] the rotated
    /// shape is kept regardless.
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated();
        let fits = self.is_valid(&rotated);
        match self.config.rotation {
            RotationPolicy::Revert if !fits => false,
            RotationPolicy::Revert => {
                self.active = Some(rotated);
                true
            }
            RotationPolicy::Unchecked => {
                if !fits {
                    debug!("unchecked rotation left {:?} in an illegal position", active.kind);
                }
                self.active = Some(rotated);
                true
            }
        }
    }

    /// Lowest valid position straight below `piece`
    ///
    /// Moves down until invalid, then steps back up one row. A piece that is
    /// already invalid is returned unchanged.
    pub fn resting_position(&self, piece: Piece) -> Piece {
        if !self.is_valid(&piece) {
            return piece;
        }
        let mut probe = piece;
        while self.is_valid(&probe) {
            probe.move_down();
        }
        probe.move_up();
        probe
    }

    /// Hard drop: bonus score, speed-up, then lock at the resting position.
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        self.score = self.score.saturating_add(self.config.hard_drop_bonus);
        self.speed_up(self.config.hard_drop_speedup_ms);

        self.active = Some(self.resting_position(active));
        self.lock_and_spawn();
        true
    }

    fn speed_up(&mut self, ms: u32) {
        self.speed_ms = self
            .speed_ms
            .saturating_sub(ms)
            .max(self.config.min_speed_ms);
    }

    /// Falling → Locking → Spawning → Falling | GameOver
    fn lock_and_spawn(&mut self) {
        self.transition(Phase::Locking);
        self.lock_piece();
        self.spawn_piece();
    }

    /// Commit the active piece into the grid.
    ///
    /// Cells outside the playfield (only reachable through unchecked
    /// rotations) are dropped so the border stays intact.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        for (row, col) in active.cells() {
            self.grid.set(row, col, Cell::Locked(active.kind));
        }
        debug!("locked {:?} at ({}, {})", active.kind, active.x, active.y);

        self.event_mut().locked = true;
    }

    fn game_over(&mut self) {
        self.active = None;
        self.transition(Phase::GameOver);
        self.event_mut().game_over = true;
        info!(
            "game over: score={} lines={} pieces={}",
            self.score, self.lines, self.pieces
        );
    }

    /// Clear every completed interior row. Returns the number cleared.
    pub fn check_completed_lines(&mut self) -> usize {
        let rows = self.grid.completed_rows();
        if rows.is_empty() {
            return 0;
        }
        self.delete_rows(&rows)
    }

    /// Remove `rows`, shift the rows above down, award score and speed up.
    pub fn delete_rows(&mut self, rows: &[usize]) -> usize {
        let cleared = self.grid.clear_rows(rows);
        if cleared == 0 {
            return 0;
        }
        let count = cleared as u32;

        let points = self.config.line_score.saturating_mul(count);
        self.score = self.score.saturating_add(points);
        self.speed_up(self.config.line_speedup_ms.saturating_mul(count));
        self.lines = self.lines.saturating_add(count);

        let event = self.event_mut();
        event.lines_cleared += count;
        event.line_clear_score += points;

        debug!(
            "cleared {} line(s) {:?}: score={} speed={}ms",
            cleared, rows, self.score, self.speed_ms
        );
        cleared
    }

    /// One iteration of the game loop.
    ///
    /// 1. gravity: move the active piece down (locking and spawning if blocked)
    /// 2. game over if the topmost interior row holds a locked cell
    /// 3. otherwise clear completed lines
    ///
    /// Returns false once the game is over; callers stop scheduling ticks.
    pub fn tick(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        self.try_move(0, 1);
        if self.is_game_over() {
            return false;
        }

        if self.grid.top_row_occupied() {
            self.game_over();
            return false;
        }

        self.check_completed_lines();
        true
    }

    /// Apply a command from the presentation layer. Ignored after game over.
    pub fn apply(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::MoveDown => self.move_down(),
            GameCommand::Rotate => self.rotate(),
            GameCommand::HardDrop => self.hard_drop(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cells = *self.grid.rows();
        if let Some(active) = self.active {
            for (row, col) in active.cells() {
                if Grid::is_interior(row, col) {
                    out.cells[row as usize][col as usize] = Cell::Locked(active.kind);
                }
            }
        }
        out.score = self.score;
        out.speed_ms = self.speed_ms;
        out.lines = self.lines;
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Shape;
    use crate::rng::ScriptedShapes;
    use crate::types::{PieceKind, GRID_HEIGHT};

    fn engine_with(kinds: &[PieceKind]) -> Engine<ScriptedShapes> {
        Engine::with_source(EngineConfig::default(), ScriptedShapes::new(kinds.to_vec())).unwrap()
    }

    fn locked(kind: PieceKind) -> Cell {
        Cell::Locked(kind)
    }

    #[test]
    fn test_new_engine() {
        let engine = engine_with(&[PieceKind::T]);

        assert_eq!(engine.phase(), Phase::Falling);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.speed_ms(), 500);
        assert_eq!(engine.pieces(), 1);
        assert!(engine.active().is_some());
        assert_eq!(engine.grid(), &Grid::new());
    }

    #[test]
    fn test_seeded_engine_is_repeatable() {
        let config = EngineConfig {
            seed: Some(99),
            ..EngineConfig::default()
        };
        let mut a = Engine::new(config).unwrap();
        let mut b = Engine::new(config).unwrap();
        for _ in 0..10 {
            assert_eq!(a.active().map(|p| p.kind), b.active().map(|p| p.kind));
            a.hard_drop();
            b.hard_drop();
        }
    }

    #[test]
    fn test_spawn_is_centered_on_row_one() {
        let engine = engine_with(&[PieceKind::I]);
        let piece = engine.active().unwrap();
        // (12 - 4) / 2
        assert_eq!((piece.x, piece.y), (4, 1));

        let engine = engine_with(&[PieceKind::T]);
        let piece = engine.active().unwrap();
        // (12 - 3) / 2
        assert_eq!((piece.x, piece.y), (4, 1));
    }

    #[test]
    fn test_spawn_blocked_is_initialization_error() {
        let mut grid = Grid::new();
        grid.fill_row(1, locked(PieceKind::Z));

        let err = Engine::with_grid(
            EngineConfig::default(),
            grid,
            ScriptedShapes::repeat(PieceKind::O),
        )
        .unwrap_err();
        assert_eq!(err, InitializationError::SpawnBlocked);
    }

    #[test]
    fn test_invalid_config_is_initialization_error() {
        let config = EngineConfig {
            min_speed_ms: 0,
            ..EngineConfig::default()
        };
        let err = Engine::with_source(config, ScriptedShapes::repeat(PieceKind::O)).unwrap_err();
        assert_eq!(err.code(), "invalid_config");
    }

    #[test]
    fn test_is_valid_rejects_border_and_outside() {
        let engine = engine_with(&[PieceKind::O]);

        let mut piece = Piece::new(PieceKind::O);
        piece.y = 5;
        for x in -2..GRID_WIDTH as i8 + 2 {
            piece.x = x;
            let inside = (1..=9).contains(&x);
            assert_eq!(engine.is_valid(&piece), inside, "x = {}", x);
        }

        piece.x = 5;
        for y in -2..GRID_HEIGHT as i8 + 2 {
            piece.y = y;
            let inside = (1..=19).contains(&y);
            assert_eq!(engine.is_valid(&piece), inside, "y = {}", y);
        }
    }

    #[test]
    fn test_is_valid_rejects_locked_cells() {
        let mut engine = engine_with(&[PieceKind::O]);
        engine.grid_mut().set(10, 5, locked(PieceKind::L));

        let mut piece = Piece::new(PieceKind::O);
        piece.x = 5;
        piece.y = 9;
        assert!(!engine.is_valid(&piece));
        piece.x = 6;
        assert!(engine.is_valid(&piece));
    }

    #[test]
    fn test_lateral_moves_stop_at_walls_without_locking() {
        let mut engine = engine_with(&[PieceKind::O]);

        let mut moved = 0;
        for _ in 0..10 {
            if engine.move_left() {
                moved += 1;
            }
        }
        // O spawns at x = 5, leftmost valid x is 1.
        assert_eq!(moved, 4);
        assert_eq!(engine.active().unwrap().x, 1);
        assert_eq!(engine.pieces(), 1);
        assert_eq!(engine.grid(), &Grid::new());
    }

    #[test]
    fn test_blocked_move_down_locks_and_spawns() {
        let mut engine = engine_with(&[PieceKind::O, PieceKind::T]);

        while engine.move_down() {}

        assert_eq!(engine.pieces(), 2);
        assert_eq!(engine.active().unwrap().kind, PieceKind::T);
        assert_eq!(engine.grid().get(20, 5), Some(locked(PieceKind::O)));
        assert_eq!(engine.grid().get(19, 6), Some(locked(PieceKind::O)));
        assert!(engine.take_last_event().unwrap().locked);
    }

    #[test]
    fn test_rotate_revert_policy_rejects_illegal_rotation() {
        let mut engine = engine_with(&[PieceKind::I]);
        // Lie the I piece flat on the floor; standing it up would poke into the border.
        while engine.move_down() {
            if engine.active().unwrap().y == 20 {
                break;
            }
        }
        let before = engine.active().unwrap();
        assert_eq!(before.y, 20);

        assert!(!engine.rotate());
        assert_eq!(engine.active().unwrap(), before);
    }

    #[test]
    fn test_rotate_unchecked_policy_keeps_illegal_rotation() {
        let config = EngineConfig {
            rotation: RotationPolicy::Unchecked,
            ..EngineConfig::default()
        };
        let mut engine =
            Engine::with_source(config, ScriptedShapes::repeat(PieceKind::I)).unwrap();
        while engine.active().unwrap().y < 20 {
            assert!(engine.move_down());
        }

        assert!(engine.rotate());
        let active = engine.active().unwrap();
        assert_eq!(active.shape, Shape::of(PieceKind::I).rotated_cw());
        assert!(!engine.is_valid(&active));
    }

    #[test]
    fn test_square_is_rotation_invariant() {
        let mut engine = engine_with(&[PieceKind::O]);
        let before = engine.active().unwrap();
        assert!(engine.rotate());
        assert_eq!(engine.active().unwrap().shape, before.shape);
    }

    #[test]
    fn test_two_rotations_restore_half_turn_symmetric_shapes() {
        for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
            let mut engine = engine_with(&[kind]);
            engine.move_down();
            engine.move_down();
            let before = engine.active().unwrap();
            assert!(engine.rotate());
            assert!(engine.rotate());
            let after = engine.active().unwrap();
            let a: Vec<_> = before.cells().collect();
            let b: Vec<_> = after.cells().collect();
            assert_eq!(a, b, "{:?}", kind);
        }
    }

    #[test]
    fn test_resting_position_is_valid_and_grounded() {
        let mut engine = engine_with(&[PieceKind::T]);
        engine.grid_mut().set(15, 5, locked(PieceKind::Z));

        let piece = engine.active().unwrap();
        let rest = engine.resting_position(piece);
        assert!(engine.is_valid(&rest));
        assert!(!engine.is_valid(&rest.shifted(0, 1)));
    }

    #[test]
    fn test_hard_drop_scores_and_speeds_up() {
        let mut engine = engine_with(&[PieceKind::I, PieceKind::O]);

        assert!(engine.hard_drop());

        assert_eq!(engine.score(), 5);
        assert_eq!(engine.speed_ms(), 495);
        for col in 4..8 {
            assert_eq!(engine.grid().get(20, col), Some(locked(PieceKind::I)));
        }
        assert_eq!(engine.active().unwrap().kind, PieceKind::O);
    }

    #[test]
    fn test_speed_is_clamped_at_floor() {
        let config = EngineConfig {
            initial_speed_ms: 110,
            min_speed_ms: 100,
            ..EngineConfig::default()
        };
        let mut engine =
            Engine::with_source(config, ScriptedShapes::repeat(PieceKind::O)).unwrap();

        for _ in 0..4 {
            engine.hard_drop();
        }
        assert_eq!(engine.speed_ms(), 100);
    }

    #[test]
    fn test_delete_single_row() {
        let mut engine = engine_with(&[PieceKind::O]);
        engine.grid_mut().fill_row(20, locked(PieceKind::I));
        engine.grid_mut().set(19, 2, locked(PieceKind::J));
        engine.grid_mut().set(18, 9, locked(PieceKind::S));

        assert_eq!(engine.check_completed_lines(), 1);

        assert_eq!(engine.score(), 10);
        assert_eq!(engine.speed_ms(), 490);
        assert_eq!(engine.lines(), 1);
        assert_eq!(engine.grid().get(20, 2), Some(locked(PieceKind::J)));
        assert_eq!(engine.grid().get(19, 9), Some(locked(PieceKind::S)));
        assert!(!engine.grid().is_row_complete(20));

        let event = engine.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.line_clear_score, 10);
    }

    #[test]
    fn test_delete_rows_scales_with_count() {
        let mut engine = engine_with(&[PieceKind::O]);
        for row in 17..=20 {
            engine.grid_mut().fill_row(row, locked(PieceKind::I));
        }

        assert_eq!(engine.check_completed_lines(), 4);
        assert_eq!(engine.score(), 40);
        assert_eq!(engine.speed_ms(), 460);
        assert!((1..=20).all(|row| engine.grid().interior_row(row).iter().all(Cell::is_empty)));
    }

    #[test]
    fn test_tick_applies_gravity() {
        let mut engine = engine_with(&[PieceKind::T]);
        let y = engine.active().unwrap().y;

        assert!(engine.tick());
        assert_eq!(engine.active().unwrap().y, y + 1);
    }

    #[test]
    fn test_tick_game_over_when_top_row_occupied() {
        let mut engine = engine_with(&[PieceKind::O]);
        engine.grid_mut().fill_row(1, locked(PieceKind::Z));
        let before = engine.grid().clone();

        assert!(!engine.tick());

        assert_eq!(engine.phase(), Phase::GameOver);
        // The full top row is not cleared as a line.
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.score(), 0);
        assert!(engine.take_last_event().unwrap().game_over);
    }

    #[test]
    fn test_commands_ignored_after_game_over() {
        let mut engine = engine_with(&[PieceKind::O]);
        engine.grid_mut().fill_row(1, locked(PieceKind::Z));
        engine.tick();
        assert!(engine.is_game_over());

        let snap = engine.snapshot();
        for command in [
            GameCommand::MoveLeft,
            GameCommand::MoveRight,
            GameCommand::MoveDown,
            GameCommand::Rotate,
            GameCommand::HardDrop,
        ] {
            assert!(!engine.apply(command));
        }
        assert!(!engine.tick());
        assert_eq!(engine.snapshot(), snap);
    }

    #[test]
    fn test_stacking_to_the_top_ends_the_game() {
        let mut engine = engine_with(&[PieceKind::O]);
        let mut ticks = 0;
        while engine.tick() {
            ticks += 1;
            assert!(ticks < 10_000, "game never ended");
        }
        assert!(engine.is_game_over());
        assert!(engine.active().is_none());
    }

    #[test]
    fn test_snapshot_composites_active_piece() {
        let mut engine = engine_with(&[PieceKind::O]);
        engine.grid_mut().set(20, 1, locked(PieceKind::L));

        let snap = engine.snapshot();
        assert_eq!(snap.cell(1, 5), Some(locked(PieceKind::O)));
        assert_eq!(snap.cell(2, 6), Some(locked(PieceKind::O)));
        assert_eq!(snap.cell(20, 1), Some(locked(PieceKind::L)));
        assert_eq!(snap.cell(0, 0), Some(Cell::Border));
        assert_eq!(snap.phase, Phase::Falling);
        // The grid itself never sees the falling piece.
        assert_eq!(engine.grid().get(1, 5), Some(Cell::Empty));
    }
}
