//! All game entity types — pure data, no logic.

/// Axis-aligned bounding box shared by every entity.
/// Origin is the top-left corner; y grows downward.
/// Invariant: `width` and `height` are positive.
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Lifecycle signals raised by a tick.  The core only raises them;
/// reacting (restart flow, level advance) is the front end's job.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// Player health reached zero.  Carries the score at that moment.
    GameOver { score: u32 },
    /// The hostile set just transitioned from non-empty to empty.
    LevelComplete,
}

/// Logical input state, sampled once at the start of a tick and treated
/// as immutable for the remainder of that tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub fire: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    /// May go negative transiently; the death check fires on the next tick.
    pub health: i32,
    pub facing: Facing,
    /// Frame of the most recent shot.  `None` until the first shot, so a
    /// freshly spawned player can fire immediately.
    pub last_fire_frame: Option<u64>,
}

// ── Projectiles, obstacles, hostiles ──────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub rect: Rect,
    /// Horizontal speed, signed by the facing the shot was fired with.
    pub speed: f32,
    /// Cleared when the projectile leaves the field or strikes a hostile;
    /// dead projectiles are compacted out before the tick returns.
    pub alive: bool,
}

/// A static platform.  Immutable after level load.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub rect: Rect,
}

#[derive(Clone, Debug)]
pub struct Hostile {
    pub rect: Rect,
    pub hp: i32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation context.  Cloneable so pure update functions can
/// return a new copy without mutating the original; there are no ambient
/// globals.  Collections iterate in insertion order.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub hostiles: Vec<Hostile>,
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    pub level: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Signals raised by the most recent tick; cleared at the start of
    /// each tick.
    pub events: Vec<GameEvent>,
}
