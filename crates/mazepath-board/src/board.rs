//! Editable board state.

use mazepath_core::{GridView, Point, WallGrid};
use mazepath_maze::MazeGen;
use mazepath_search::{SearchEngine, SearchStatus, Strategy};
use rand::Rng;

use crate::config::{BoardConfig, Speed};
use crate::error::BoardError;

/// What a board cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    Floor,
    Wall,
    /// Discovered by the search.
    Seen,
    /// On the path to the node being expanded.
    Path,
    /// The node being expanded.
    Current,
    Origin,
    Target,
}

impl Tile {
    pub fn glyph(self) -> char {
        match self {
            Self::Floor => '.',
            Self::Wall => '#',
            Self::Seen => ':',
            Self::Path => '*',
            Self::Current => '@',
            Self::Origin => 'O',
            Self::Target => 'T',
        }
    }
}

/// Whether the board accepts edits or is animating a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    Draw,
    Solve,
}

/// A wall grid with two endpoints and an optional search running over it.
///
/// Edits are refused with [`BoardError::Busy`] while a search runs. The
/// host calls [`tick`](Self::tick) once per frame; the board drops back to
/// [`Mode::Draw`] when the search finds the target or runs out of cells,
/// leaving the last search overlay visible until the next edit.
pub struct Board {
    config: BoardConfig,
    walls: WallGrid,
    origin: Point,
    target: Point,
    strategy: Strategy,
    speed: Speed,
    mode: Mode,
    engine: Option<SearchEngine<WallGrid>>,
    last_status: Option<SearchStatus>,
}

impl Board {
    /// An empty board with the origin in the top-left corner and the target
    /// in the bottom-right one.
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        let walls = WallGrid::new(config.width, config.height)?;
        Ok(Self {
            origin: Point::ZERO,
            target: Point::new(config.width - 1, config.height - 1),
            walls,
            config,
            strategy: Strategy::default(),
            speed: Speed::default(),
            mode: Mode::Draw,
            engine: None,
            last_status: None,
        })
    }

    fn check_editable(&self, p: Point) -> Result<(), BoardError> {
        if self.mode == Mode::Solve {
            return Err(BoardError::Busy);
        }
        if !self.walls.bounds().contains(p) {
            return Err(BoardError::OutOfBounds(p));
        }
        Ok(())
    }

    pub fn paint_wall(&mut self, p: Point) -> Result<(), BoardError> {
        self.check_editable(p)?;
        if p == self.origin || p == self.target {
            return Err(BoardError::Occupied(p));
        }
        self.clear_search();
        self.walls.set(p, true);
        Ok(())
    }

    pub fn erase_wall(&mut self, p: Point) -> Result<(), BoardError> {
        self.check_editable(p)?;
        self.clear_search();
        self.walls.set(p, false);
        Ok(())
    }

    /// Move the origin to `p`, opening the cell if it was a wall.
    pub fn move_origin(&mut self, p: Point) -> Result<(), BoardError> {
        self.check_editable(p)?;
        if p == self.target {
            return Err(BoardError::Occupied(p));
        }
        self.clear_search();
        self.walls.set(p, false);
        self.origin = p;
        Ok(())
    }

    /// Move the target to `p`, opening the cell if it was a wall.
    pub fn move_target(&mut self, p: Point) -> Result<(), BoardError> {
        self.check_editable(p)?;
        if p == self.origin {
            return Err(BoardError::Occupied(p));
        }
        self.clear_search();
        self.walls.set(p, false);
        self.target = p;
        Ok(())
    }

    pub fn select_strategy(&mut self, strategy: Strategy) -> Result<(), BoardError> {
        if self.mode == Mode::Solve {
            return Err(BoardError::Busy);
        }
        self.strategy = strategy;
        Ok(())
    }

    /// Speed can change while a search runs.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Remove every wall, stopping any running search.
    pub fn clear(&mut self) {
        self.clear_search();
        self.walls.fill(false);
    }

    /// Drop the search and its overlay, returning to draw mode.
    pub fn clear_search(&mut self) {
        if self.mode == Mode::Solve {
            log::debug!("board: search cancelled");
        }
        self.engine = None;
        self.last_status = None;
        self.mode = Mode::Draw;
    }

    /// Replace the walls with a freshly generated maze between the current
    /// endpoints.
    pub fn generate_maze<R: Rng>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        if self.mode == Mode::Solve {
            return Err(BoardError::Busy);
        }
        let mut mg = MazeGen::with_options(rng, self.config.maze.clone());
        let grid = mg.create_maze(
            self.config.width,
            self.config.height,
            self.origin,
            self.target,
            self.config.solutions,
        )?;
        self.clear_search();
        self.walls = grid;
        Ok(())
    }

    /// Begin searching with the selected strategy.
    pub fn start_search(&mut self) -> Result<(), BoardError> {
        if self.mode == Mode::Solve {
            return Err(BoardError::Busy);
        }
        self.clear_search();
        let engine = SearchEngine::new(self.strategy, self.origin, self.target, self.walls.clone())?;
        log::debug!(
            "board: {} search from {} to {}",
            self.strategy,
            self.origin,
            self.target
        );
        self.engine = Some(engine);
        self.mode = Mode::Solve;
        Ok(())
    }

    /// Advance the running search by one step. Returns `None` in draw mode.
    pub fn tick(&mut self) -> Result<Option<SearchStatus>, BoardError> {
        if self.mode != Mode::Solve {
            return Ok(None);
        }
        let Some(engine) = self.engine.as_mut() else {
            self.mode = Mode::Draw;
            return Ok(None);
        };
        let status = engine.step()?;
        if status.is_terminal() {
            log::debug!(
                "board: search {status:?} after {} expansions",
                engine.expanded()
            );
            self.last_status = Some(status);
            self.mode = Mode::Draw;
        }
        Ok(Some(status))
    }

    /// What the cell at `p` shows, or `None` outside the board.
    pub fn tile(&self, p: Point) -> Option<Tile> {
        if !self.walls.bounds().contains(p) {
            return None;
        }
        if p == self.origin {
            return Some(Tile::Origin);
        }
        if p == self.target {
            return Some(Tile::Target);
        }
        if let Some(engine) = &self.engine {
            if engine.expanded() > 0 && engine.current() == p {
                return Some(Tile::Current);
            }
            if engine.path().contains(&p) {
                return Some(Tile::Path);
            }
            if engine.visited().contains(&p) {
                return Some(Tile::Seen);
            }
        }
        Some(if self.walls.is_wall(p) {
            Tile::Wall
        } else {
            Tile::Floor
        })
    }

    /// One line of glyphs per row.
    pub fn render_ascii(&self) -> String {
        let width = self.walls.width() as usize;
        let mut out = String::with_capacity((width + 1) * self.walls.height() as usize);
        for p in self.walls.bounds() {
            if p.x == 0 && p.y > 0 {
                out.push('\n');
            }
            if let Some(tile) = self.tile(p) {
                out.push(tile.glyph());
            }
        }
        out
    }

    pub fn walls(&self) -> &WallGrid {
        &self.walls
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// How the last finished search ended.
    pub fn last_status(&self) -> Option<SearchStatus> {
        self.last_status
    }

    /// The running or last finished search.
    pub fn engine(&self) -> Option<&SearchEngine<WallGrid>> {
        self.engine.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small(width: i32, height: i32) -> Board {
        Board::new(BoardConfig {
            width,
            height,
            ..BoardConfig::default()
        })
        .unwrap()
    }

    fn run_to_end(board: &mut Board) -> SearchStatus {
        loop {
            if let Some(status) = board.tick().unwrap() {
                if status.is_terminal() {
                    return status;
                }
            }
        }
    }

    #[test]
    fn test_default_endpoints_are_corners() {
        let board = Board::new(BoardConfig::default()).unwrap();
        assert_eq!(board.origin(), Point::new(0, 0));
        assert_eq!(board.target(), Point::new(39, 23));
        assert_eq!(board.mode(), Mode::Draw);
        assert_eq!(board.strategy(), Strategy::DepthFirst);
        assert_eq!(board.tile(Point::new(5, 5)), Some(Tile::Floor));
        assert_eq!(board.tile(Point::new(40, 0)), None);
    }

    #[test]
    fn test_degenerate_config_is_rejected() {
        let err = Board::new(BoardConfig {
            width: 0,
            ..BoardConfig::default()
        })
        .err();
        assert!(matches!(err, Some(BoardError::Grid(_))));
    }

    #[test]
    fn test_editing_rules() {
        let mut board = small(5, 3);
        board.paint_wall(Point::new(2, 1)).unwrap();
        assert_eq!(board.tile(Point::new(2, 1)), Some(Tile::Wall));
        assert_eq!(
            board.paint_wall(Point::new(0, 0)),
            Err(BoardError::Occupied(Point::new(0, 0)))
        );
        assert_eq!(
            board.paint_wall(Point::new(5, 0)),
            Err(BoardError::OutOfBounds(Point::new(5, 0)))
        );
        assert_eq!(
            board.move_origin(Point::new(4, 2)),
            Err(BoardError::Occupied(Point::new(4, 2)))
        );
        // Moving onto a wall opens it.
        board.move_origin(Point::new(2, 1)).unwrap();
        assert!(!board.walls().is_wall(Point::new(2, 1)));
        assert_eq!(board.tile(Point::new(2, 1)), Some(Tile::Origin));
        board.erase_wall(Point::new(2, 1)).unwrap();
        board.move_target(Point::new(0, 0)).unwrap();
        assert_eq!(board.target(), Point::new(0, 0));
    }

    #[test]
    fn test_edits_are_refused_while_solving() {
        let mut board = small(5, 3);
        board.start_search().unwrap();
        assert_eq!(board.mode(), Mode::Solve);
        assert_eq!(board.paint_wall(Point::new(1, 1)), Err(BoardError::Busy));
        assert_eq!(board.erase_wall(Point::new(1, 1)), Err(BoardError::Busy));
        assert_eq!(board.move_target(Point::new(1, 1)), Err(BoardError::Busy));
        assert_eq!(
            board.select_strategy(Strategy::AStar),
            Err(BoardError::Busy)
        );
        assert_eq!(board.start_search(), Err(BoardError::Busy));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(board.generate_maze(&mut rng), Err(BoardError::Busy));
        board.set_speed(Speed::Fast);
        assert_eq!(board.speed(), Speed::Fast);
    }

    #[test]
    fn test_search_returns_to_draw_when_found() {
        let mut board = small(5, 3);
        board.select_strategy(Strategy::BreadthFirst).unwrap();
        assert_eq!(board.tick(), Ok(None));
        board.start_search().unwrap();
        assert_eq!(run_to_end(&mut board), SearchStatus::Found);
        assert_eq!(board.mode(), Mode::Draw);
        assert_eq!(board.last_status(), Some(SearchStatus::Found));
        assert_eq!(board.tick(), Ok(None));

        // Origin, five path cells, then the target.
        let frame = board.render_ascii();
        assert_eq!(frame.lines().count(), 3);
        assert_eq!(frame.matches('O').count(), 1);
        assert_eq!(frame.matches('T').count(), 1);
        assert_eq!(frame.matches('*').count(), 5);
    }

    #[test]
    fn test_search_returns_to_draw_when_exhausted() {
        let mut board = small(3, 3);
        for y in 0..3 {
            board.paint_wall(Point::new(1, y)).unwrap();
        }
        board.start_search().unwrap();
        assert_eq!(run_to_end(&mut board), SearchStatus::Exhausted);
        assert_eq!(board.mode(), Mode::Draw);
        assert_eq!(board.last_status(), Some(SearchStatus::Exhausted));
    }

    #[test]
    fn test_tile_precedence() {
        let mut board = small(5, 1);
        board.select_strategy(Strategy::BreadthFirst).unwrap();
        board.start_search().unwrap();
        // Before any step nothing but the endpoints is highlighted.
        assert_eq!(board.render_ascii(), "O...T");
        board.tick().unwrap();
        assert_eq!(board.render_ascii(), "O:..T");
        board.tick().unwrap();
        assert_eq!(board.render_ascii(), "O@:.T");
        board.tick().unwrap();
        assert_eq!(board.render_ascii(), "O*@:T");
    }

    #[test]
    fn test_edits_clear_the_overlay() {
        let mut board = small(5, 1);
        board.start_search().unwrap();
        run_to_end(&mut board);
        assert!(board.engine().is_some());
        board.paint_wall(Point::new(2, 0)).unwrap();
        assert!(board.engine().is_none());
        assert_eq!(board.last_status(), None);
        assert_eq!(board.render_ascii(), "O.#.T");
    }

    #[test]
    fn test_clear_stops_search_and_removes_walls() {
        let mut board = small(5, 3);
        board.paint_wall(Point::new(1, 1)).unwrap();
        board.start_search().unwrap();
        board.tick().unwrap();
        board.clear();
        assert_eq!(board.mode(), Mode::Draw);
        assert_eq!(board.walls().count_walls(), 0);
        assert!(board.engine().is_none());
    }

    #[test]
    fn test_generated_maze_is_solvable() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        board.generate_maze(&mut rng).unwrap();
        assert!(board.walls().count_walls() > 0);
        assert!(!board.walls().is_wall(board.origin()));
        assert!(!board.walls().is_wall(board.target()));
        for strategy in Strategy::ALL {
            board.select_strategy(strategy).unwrap();
            board.start_search().unwrap();
            assert_eq!(run_to_end(&mut board), SearchStatus::Found, "{strategy}");
        }
    }

    #[test]
    fn test_maze_errors_surface() {
        let mut board = Board::new(BoardConfig {
            width: 3,
            height: 3,
            solutions: 5,
            ..BoardConfig::default()
        })
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = board.generate_maze(&mut rng).unwrap_err();
        assert!(matches!(err, BoardError::Maze(_)));
        assert_eq!(board.walls().count_walls(), 0);
    }
}
