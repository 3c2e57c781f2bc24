//! Pure simulation functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (or a single entity) and returns a brand-new value.  There
//! are no side effects at all: time is a frame counter carried in the
//! state, so callers (and tests) control determinism completely.

use crate::entities::{
    Facing, GameEvent, GameState, GameStatus, Hostile, InputSnapshot, Obstacle, Player,
    Projectile, Rect,
};

// ── Field & physics constants ────────────────────────────────────────────────

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 400.0;

/// Vertical velocity gained per frame.
pub const GRAVITY: f32 = 0.5;
/// Horizontal speed while a direction is held.
pub const MOVE_SPEED: f32 = 5.0;
/// Vertical velocity set on jump (negative = upward).
pub const JUMP_VELOCITY: f32 = -12.0;

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
pub const PLAYER_START_X: f32 = 50.0;
pub const PLAYER_START_HEALTH: i32 = 100;

pub const PROJECTILE_SPEED: f32 = 10.0;
pub const PROJECTILE_WIDTH: f32 = 10.0;
pub const PROJECTILE_HEIGHT: f32 = 4.0;
/// Min frames between shots — ≈300 ms at the 30 FPS frame rate.
pub const FIRE_COOLDOWN_FRAMES: u64 = 9;

pub const HOSTILE_WIDTH: f32 = 30.0;
pub const HOSTILE_HEIGHT: f32 = 30.0;
pub const HOSTILE_START_HP: i32 = 2;
/// Score awarded once, at the moment a hostile is defeated.
pub const HOSTILE_SCORE: u32 = 100;

/// Health lost per overlapping hostile per frame (contact is continuous,
/// not debounced).
pub const CONTACT_DAMAGE: i32 = 1;
/// Horizontal push on hostile contact, opposite the player's facing.
pub const KNOCKBACK: f32 = 20.0;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Half-open AABB intersection test.  Boxes that touch exactly at an edge
/// do not overlap.  Commutative.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width
        && a.x + a.width > b.x
        && a.y < b.y + b.height
        && a.y + a.height > b.y
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn spawn_player() -> Player {
    Player {
        rect: Rect {
            x: PLAYER_START_X,
            y: FIELD_HEIGHT - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        },
        vx: 0.0,
        vy: 0.0,
        grounded: true,
        health: PLAYER_START_HEALTH,
        facing: Facing::Right,
        last_fire_frame: None,
    }
}

fn spawn_hostile(x: f32, y: f32) -> Hostile {
    Hostile {
        rect: Rect {
            x,
            y,
            width: HOSTILE_WIDTH,
            height: HOSTILE_HEIGHT,
        },
        hp: HOSTILE_START_HP,
    }
}

fn spawn_obstacle(x: f32, y: f32, width: f32, height: f32) -> Obstacle {
    Obstacle {
        rect: Rect { x, y, width, height },
    }
}

/// Build the initial game state: fresh player, score 0, level 1 loaded.
pub fn init_state() -> GameState {
    let empty = GameState {
        player: spawn_player(),
        obstacles: Vec::new(),
        hostiles: Vec::new(),
        projectiles: Vec::new(),
        score: 0,
        level: 1,
        status: GameStatus::Playing,
        frame: 0,
        events: Vec::new(),
    };
    load_level(&empty, 1)
}

// ── Level loader ─────────────────────────────────────────────────────────────

/// Clear the active sets and pending signals, reposition the player to
/// the level start, and populate the fixed content table for `level`.
/// Unknown level indices load an empty field; that is accepted behavior,
/// not an error.  Score, health, status and the frame counter are
/// untouched.
pub fn load_level(state: &GameState, level: u32) -> GameState {
    let player = Player {
        rect: Rect {
            x: PLAYER_START_X,
            y: FIELD_HEIGHT - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        },
        vx: 0.0,
        vy: 0.0,
        grounded: true,
        ..state.player.clone()
    };

    let (obstacles, hostiles) = match level {
        1 => (
            vec![
                spawn_obstacle(200.0, 300.0, 150.0, 20.0),
                spawn_obstacle(400.0, 250.0, 100.0, 20.0),
                spawn_obstacle(600.0, 150.0, 80.0, 20.0),
            ],
            vec![spawn_hostile(250.0, 270.0), spawn_hostile(450.0, 220.0)],
        ),
        _ => (Vec::new(), Vec::new()),
    };

    GameState {
        player,
        obstacles,
        hostiles,
        projectiles: Vec::new(),
        level,
        events: Vec::new(),
        ..state.clone()
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Jump, but only from the ground; a no-op while airborne.
pub fn jump(player: &Player) -> Player {
    if !player.grounded {
        return player.clone();
    }
    Player {
        vy: JUMP_VELOCITY,
        grounded: false,
        ..player.clone()
    }
}

/// Integrate one frame of player physics and resolve collisions, in fixed
/// order: jump intent, gravity, horizontal input, platform resolution,
/// ground clamp, boundary clamp.
pub fn advance_player(player: &Player, input: &InputSnapshot, obstacles: &[Obstacle]) -> Player {
    let mut p = player.clone();

    if input.jump {
        p = jump(&p);
    }

    // Vertical integration
    p.vy += GRAVITY;
    p.rect.y += p.vy;

    // Horizontal input.  Right is evaluated after left, so when both are
    // held right wins — a fixed tie-break, kept as-is.
    p.vx = 0.0;
    if input.left {
        p.vx = -MOVE_SPEED;
        p.facing = Facing::Left;
    }
    if input.right {
        p.vx = MOVE_SPEED;
        p.facing = Facing::Right;
    }
    p.rect.x += p.vx;

    // Platform resolution.  Every obstacle is tested against the position
    // the integration landed on, in insertion order, so the last matching
    // obstacle determines the final resting position (no nearest-contact
    // search).
    p.grounded = false;
    let landed = p.rect.clone();
    let fall = p.vy;
    let prev_bottom = landed.y + landed.height - fall;
    let prev_top = landed.y - fall;
    for obstacle in obstacles {
        if !overlaps(&landed, &obstacle.rect) {
            continue;
        }
        if fall > 0.0 && prev_bottom <= obstacle.rect.y {
            // Landing: snap the bottom edge onto the obstacle top
            p.rect.y = obstacle.rect.y - p.rect.height;
            p.vy = 0.0;
            p.grounded = true;
        } else if fall < 0.0 && prev_top >= obstacle.rect.y + obstacle.rect.height {
            // Head bump: snap just below the obstacle, keep falling state
            p.rect.y = obstacle.rect.y + obstacle.rect.height;
            p.vy = 0.0;
        }
    }

    // Ground clamp
    if !p.grounded && p.rect.y + p.rect.height > FIELD_HEIGHT {
        p.rect.y = FIELD_HEIGHT - p.rect.height;
        p.vy = 0.0;
        p.grounded = true;
    }

    // Boundary clamp
    p.rect.x = p.rect.x.clamp(0.0, FIELD_WIDTH - p.rect.width);

    p
}

/// Fire a projectile from the leading edge of the player, rate-limited by
/// `FIRE_COOLDOWN_FRAMES`.  Returns the player (with the shot recorded)
/// and the spawned projectile, or the player unchanged and `None` while
/// still within the cooldown.
pub fn player_fire(player: &Player, frame: u64) -> (Player, Option<Projectile>) {
    if let Some(last) = player.last_fire_frame {
        if frame.saturating_sub(last) < FIRE_COOLDOWN_FRAMES {
            return (player.clone(), None);
        }
    }

    let (x, speed) = match player.facing {
        Facing::Right => (player.rect.x + player.rect.width, PROJECTILE_SPEED),
        Facing::Left => (player.rect.x - PROJECTILE_WIDTH, -PROJECTILE_SPEED),
    };
    let projectile = Projectile {
        rect: Rect {
            x,
            // Gun height: vertically centered on the player
            y: player.rect.y + player.rect.height / 2.0 - PROJECTILE_HEIGHT / 2.0,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
        },
        speed,
        alive: true,
    };
    let player = Player {
        last_fire_frame: Some(frame),
        ..player.clone()
    };
    (player, Some(projectile))
}

// ── Projectile & hostile ─────────────────────────────────────────────────────

/// Move a projectile one frame; it dies the moment it leaves the field.
pub fn advance_projectile(projectile: &Projectile) -> Projectile {
    let x = projectile.rect.x + projectile.speed;
    Projectile {
        rect: Rect { x, ..projectile.rect.clone() },
        alive: projectile.alive && x >= 0.0 && x <= FIELD_WIDTH,
        ..projectile.clone()
    }
}

/// Apply one point of damage.  Returns the hostile and `true` when it is
/// defeated; the caller removes it from the active set and awards the
/// score bonus (the hostile never mutates the collection it lives in).
pub fn damage_hostile(hostile: &Hostile) -> (Hostile, bool) {
    let hp = hostile.hp - 1;
    (Hostile { hp, ..hostile.clone() }, hp <= 0)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame, in fixed order:
///
/// 1. advance the player (death check, then fire intent),
/// 2. advance projectiles and resolve projectile ↔ hostile hits,
/// 3. compact dead projectiles and defeated hostiles,
/// 4. resolve hostile ↔ player contact (damage + knockback),
/// 5. raise `LevelComplete` when the last hostile fell this frame.
///
/// Signals raised by this tick are left in `events`; the previous tick's
/// signals are cleared first.
pub fn tick(state: &GameState, input: &InputSnapshot) -> GameState {
    let frame = state.frame + 1;
    let mut events: Vec<GameEvent> = Vec::new();
    let mut score = state.score;
    let mut status = state.status.clone();

    // ── 1. Player ────────────────────────────────────────────────────────────
    let mut player = advance_player(&state.player, input, &state.obstacles);

    if player.health <= 0 && status == GameStatus::Playing {
        status = GameStatus::GameOver;
        events.push(GameEvent::GameOver { score });
    }

    let mut projectiles = state.projectiles.clone();
    if input.fire {
        let (updated, shot) = player_fire(&player, frame);
        player = updated;
        if let Some(projectile) = shot {
            projectiles.push(projectile);
        }
    }

    // ── 2. Projectiles vs hostiles ───────────────────────────────────────────
    let mut projectiles: Vec<Projectile> =
        projectiles.iter().map(advance_projectile).collect();
    let mut hostiles = state.hostiles.clone();
    // Mark-then-compact: defeated hostiles are skipped for the rest of the
    // scan and removed afterwards, so no later projectile can hit them and
    // nothing mutates a collection mid-iteration.
    let mut defeated: Vec<usize> = Vec::new();

    for projectile in projectiles.iter_mut() {
        if !projectile.alive {
            continue;
        }
        for (hi, hostile) in hostiles.iter_mut().enumerate() {
            if defeated.contains(&hi) {
                continue;
            }
            if overlaps(&projectile.rect, &hostile.rect) {
                // First hostile in iteration order takes the hit; the
                // projectile is consumed and cannot hit a second one.
                projectile.alive = false;
                let (damaged, dead) = damage_hostile(hostile);
                *hostile = damaged;
                if dead {
                    defeated.push(hi);
                    score += HOSTILE_SCORE;
                }
                break;
            }
        }
    }

    // ── 3. Compact ───────────────────────────────────────────────────────────
    projectiles.retain(|p| p.alive);
    let hostiles: Vec<Hostile> = hostiles
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !defeated.contains(i))
        .map(|(_, h)| h)
        .collect();

    // ── 4. Hostile contact ───────────────────────────────────────────────────
    for hostile in &hostiles {
        if overlaps(&hostile.rect, &player.rect) {
            player.health -= CONTACT_DAMAGE;
            player.rect.x += match player.facing {
                Facing::Right => -KNOCKBACK,
                Facing::Left => KNOCKBACK,
            };
        }
    }

    // ── 5. Level completion ──────────────────────────────────────────────────
    // Exactly on the non-empty → empty transition, never on later frames.
    if !state.hostiles.is_empty() && hostiles.is_empty() {
        events.push(GameEvent::LevelComplete);
    }

    GameState {
        player,
        hostiles,
        projectiles,
        score,
        status,
        frame,
        events,
        ..state.clone()
    }
}
