//! Game state and core simulation types
//!
//! Everything the loop mutates lives in [`Session`]; there is no global
//! state.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::level::Level;
use crate::consts::*;
use crate::settings::Config;

/// Current phase of a playing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No game started yet (menus, editor)
    Idle,
    /// Active gameplay
    Running,
    /// Physics frozen, pause menu shown
    Paused,
    /// All clearable bricks gone, next level pending
    LevelTransition,
    /// Run ended
    Terminated(Outcome),
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
    /// Player left from the pause menu
    Quit,
    /// The next level record could not be loaded
    LoadFailed,
}

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrickKind {
    /// Logically absent: no collision, not drawn
    #[default]
    Empty,
    Normal,
    Durable,
    Indestructible,
}

impl BrickKind {
    /// Type code used by the level file format
    pub fn code(self) -> Option<char> {
        match self {
            BrickKind::Empty => None,
            BrickKind::Normal => Some('@'),
            BrickKind::Durable => Some('#'),
            BrickKind::Indestructible => Some('*'),
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '@' => Some(BrickKind::Normal),
            '#' => Some(BrickKind::Durable),
            '*' => Some(BrickKind::Indestructible),
            _ => None,
        }
    }

    pub fn default_durability(self) -> i32 {
        match self {
            BrickKind::Empty => 0,
            BrickKind::Durable => DURABLE_DEFAULT_DURABILITY,
            BrickKind::Normal | BrickKind::Indestructible => 1,
        }
    }

    /// Returns true if this brick must be destroyed to clear the level
    pub fn counts_for_clear(self) -> bool {
        matches!(self, BrickKind::Normal | BrickKind::Durable)
    }
}

/// Result of the ball striking a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickStrike {
    pub broken: bool,
    pub score: u64,
}

/// A brick on the board grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brick {
    /// Board column
    pub x: i32,
    /// Board row
    pub y: i32,
    pub kind: BrickKind,
    pub durability: i32,
}

impl Brick {
    pub fn new(x: i32, y: i32, kind: BrickKind) -> Self {
        Self {
            x,
            y,
            kind,
            durability: kind.default_durability(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == BrickKind::Empty
    }

    /// Whether `pos` lies in the hit box anchored at the brick's corner
    pub fn footprint_contains(&self, pos: DVec2) -> bool {
        let (x, y) = (f64::from(self.x), f64::from(self.y));
        pos.x >= x && pos.x <= x + HIT_TOLERANCE && pos.y >= y && pos.y <= y + HIT_TOLERANCE
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(f64::from(self.x) + 0.5, f64::from(self.y) + 0.5)
    }

    /// Apply one ball hit
    pub fn strike(&mut self) -> BrickStrike {
        match self.kind {
            BrickKind::Normal => {
                self.kind = BrickKind::Empty;
                BrickStrike {
                    broken: true,
                    score: SCORE_NORMAL,
                }
            }
            BrickKind::Durable => {
                self.durability -= 1;
                if self.durability <= 0 {
                    self.kind = BrickKind::Empty;
                }
                BrickStrike {
                    broken: self.is_empty(),
                    score: SCORE_DURABLE,
                }
            }
            BrickKind::Indestructible | BrickKind::Empty => BrickStrike {
                broken: false,
                score: 0,
            },
        }
    }
}

/// Playfield bounds in board cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
        }
    }
}

impl Board {
    /// Board for a level `width` logical columns wide
    pub fn for_level(width: i32, height: i32) -> Self {
        Self {
            width: width.saturating_mul(2).saturating_add(1),
            height,
        }
    }

    /// Row where the ball meets the paddle (and rests while attached)
    pub fn contact_row(&self) -> i32 {
        self.height - 2
    }

    /// Row the paddle is drawn on
    pub fn paddle_row(&self) -> i32 {
        self.height - 1
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paddle {
    /// Left edge column
    pub x: i32,
    pub width: i32,
}

impl Paddle {
    pub fn centered(board_width: i32, width: i32) -> Self {
        let mut paddle = Self {
            x: board_width / 2 - width / 2,
            width,
        };
        paddle.clamp_to(board_width);
        paddle
    }

    /// Shift by `delta` columns, stopping at the walls
    pub fn move_by(&mut self, delta: i32, board_width: i32) {
        self.x = self.x.saturating_add(delta);
        self.clamp_to(board_width);
    }

    pub fn clamp_to(&mut self, board_width: i32) {
        self.x = self.x.clamp(0, (board_width - self.width).max(0));
    }

    pub fn center(&self) -> f64 {
        f64::from(self.x) + f64::from(self.width) / 2.0
    }

    /// Whether column position `x` lies on the paddle (edges inclusive)
    pub fn spans(&self, x: f64) -> bool {
        x >= f64::from(self.x) && x <= f64::from(self.x + self.width)
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Travel per tick once launched
    pub speed: f64,
    pub attached: bool,
}

impl Ball {
    pub fn new(speed: f64) -> Self {
        Self {
            pos: DVec2::ZERO,
            vel: DVec2::ZERO,
            speed,
            attached: true,
        }
    }

    /// Stick the ball to the paddle, zeroing its velocity
    pub fn attach(&mut self, paddle: &Paddle, board: &Board) {
        self.attached = true;
        self.vel = DVec2::ZERO;
        self.follow(paddle, board);
    }

    /// Keep an attached ball centered on the paddle
    pub fn follow(&mut self, paddle: &Paddle, board: &Board) {
        if self.attached {
            self.pos = DVec2::new(paddle.center(), f64::from(board.contact_row()));
        }
    }

    /// Upward vertical component that keeps `|vel| == speed` for this `dx`
    pub fn upward_dy(&self, dx: f64) -> f64 {
        -(self.speed * self.speed - dx * dx).max(0.0).sqrt()
    }

    /// Launch from the paddle; no-op unless attached
    pub fn launch(&mut self, rng: &mut Pcg32) -> bool {
        if !self.attached {
            return false;
        }
        let lane: i32 = rng.random_range(-1..=1);
        let dx = f64::from(lane) * LAUNCH_SPREAD * self.speed;
        self.vel = DVec2::new(dx, self.upward_dy(dx));
        self.attached = false;
        true
    }

    /// Advance one tick
    pub fn integrate(&mut self) {
        if !self.attached {
            self.pos += self.vel;
        }
    }
}

/// The whole game session: board, entities, score and loaded records
#[derive(Debug, Clone)]
pub struct Session {
    pub board: Board,
    pub score: u64,
    pub lives: i32,
    /// Current level number
    pub level: u32,
    pub fps: u32,
    pub phase: GamePhase,
    /// Board currently shows a level being edited
    pub editing: bool,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live bricks, in level order (hit bricks stay as `Empty`)
    pub bricks: Vec<Brick>,
    pub config: Config,
    /// Record the live board was derived from
    pub loaded: Level,
    rng: Pcg32,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let board = Board::default();
        let paddle = Paddle::centered(board.width, PADDLE_WIDTH);
        let mut ball = Ball::new(config.tick_speed(DEFAULT_FPS));
        ball.attach(&paddle, &board);
        Self {
            board,
            score: 0,
            lives: INITIAL_LIVES,
            level: FIRST_LEVEL,
            fps: DEFAULT_FPS,
            phase: GamePhase::Idle,
            editing: false,
            paddle,
            ball,
            bricks: Vec::new(),
            rng: config.rng(),
            config,
            loaded: Level::default(),
        }
    }

    /// Derive the live board from a level record
    pub fn apply_level(&mut self, level: Level) {
        self.board = level.board();
        self.level = level.initial_level;
        self.bricks = level.bricks.clone();
        self.loaded = level;
        self.paddle.clamp_to(self.board.width);
        self.ball.attach(&self.paddle, &self.board);
    }

    /// Replace the active config
    pub fn apply_config(&mut self, config: Config) {
        self.rng = config.rng();
        self.config = config;
    }

    /// Reset score/lives and start a run on the loaded layout
    pub fn start_game(&mut self) {
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.level = self.config.initial_level;
        self.rng = self.config.rng();
        self.ball = Ball::new(self.config.tick_speed(self.fps));
        self.paddle = Paddle::centered(self.board.width, PADDLE_WIDTH);
        self.bricks = self.loaded.bricks.clone();
        self.ball.attach(&self.paddle, &self.board);
        self.editing = false;
        self.phase = GamePhase::Running;
    }

    /// Put the bricks back to the loaded layout, keeping score and lives
    pub fn restart_level(&mut self) {
        self.bricks = self.loaded.bricks.clone();
        self.ball.attach(&self.paddle, &self.board);
    }

    /// Install the next level's layout mid-run, keeping score and lives
    pub fn enter_level(&mut self, level: Level) {
        let number = self.level;
        self.apply_level(level);
        self.level = number;
        self.phase = GamePhase::Running;
    }

    pub fn move_paddle(&mut self, delta: i32) {
        self.paddle.move_by(delta, self.board.width);
        self.ball.follow(&self.paddle, &self.board);
    }

    pub fn launch(&mut self) -> bool {
        self.ball.launch(&mut self.rng)
    }

    /// Returns true if no clearable bricks remain
    pub fn is_level_complete(&self) -> bool {
        self.bricks.iter().all(|b| !b.kind.counts_for_clear())
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Live board as a level record (hit bricks dropped)
    pub fn snapshot_level(&self, filename: &str) -> Level {
        Level {
            filename: filename.to_string(),
            width: self.board.width / 2,
            height: self.board.height,
            initial_level: self.level,
            bricks: self.bricks.iter().filter(|b| !b.is_empty()).copied().collect(),
        }
    }
}
