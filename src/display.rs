//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands, scaling the 800×400 field onto the
//! terminal cell grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use platform_shooter::compute::{FIELD_HEIGHT, FIELD_WIDTH, HOSTILE_START_HP};
use platform_shooter::entities::{Facing, GameState, GameStatus, Hostile, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_OBSTACLE: Color = Color::DarkGreen;
const C_HOSTILE_FULL: Color = Color::Red;
const C_HOSTILE_HURT: Color = Color::Yellow;
const C_PROJECTILE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Rows reserved outside the play area: HUD, top border, bottom border,
/// controls hint.
const CHROME_ROWS: u16 = 4;

// ── Field → cell mapping ──────────────────────────────────────────────────────

struct Viewport {
    term_width: u16,
    term_height: u16,
}

impl Viewport {
    fn cols(&self) -> f32 {
        self.term_width.saturating_sub(2) as f32
    }

    fn rows(&self) -> f32 {
        self.term_height.saturating_sub(CHROME_ROWS) as f32
    }

    /// Top-left cell of a field rectangle.
    fn cell(&self, rect: &Rect) -> (u16, u16) {
        let col = 1.0 + rect.x / FIELD_WIDTH * self.cols();
        let row = 2.0 + rect.y / FIELD_HEIGHT * self.rows();
        (col as u16, row as u16)
    }

    /// Field width in whole cells, at least one.
    fn span(&self, width: f32) -> usize {
        (width / FIELD_WIDTH * self.cols()).round().max(1.0) as usize
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (term_width, term_height) = terminal::size()?;
    let view = Viewport { term_width, term_height };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, &view, state)?;

    for obstacle in &state.obstacles {
        draw_obstacle(out, &view, &obstacle.rect)?;
    }
    for hostile in &state.hostiles {
        draw_hostile(out, &view, hostile)?;
    }
    for projectile in &state.projectiles {
        let (col, row) = view.cell(&projectile.rect);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_PROJECTILE))?;
        out.queue(Print(if projectile.speed >= 0.0 { "»" } else { "«" }))?;
    }

    draw_player(out, &view, state)?;
    draw_controls_hint(out, &view)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, &view, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.term_width as usize;
    let h = view.term_height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.term_width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;

    // Level — centre
    let level_str = format!("[ LEVEL {} ]", state.level);
    let lx = (view.term_width / 2).saturating_sub(level_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Health — right, never rendered below zero
    let health_str = format!("Health:{:>4}", state.player.health.max(0));
    let rx = view
        .term_width
        .saturating_sub(health_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&health_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_obstacle<W: Write>(out: &mut W, view: &Viewport, rect: &Rect) -> std::io::Result<()> {
    let (col, row) = view.cell(rect);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_OBSTACLE))?;
    out.queue(Print("═".repeat(view.span(rect.width))))?;
    Ok(())
}

fn draw_hostile<W: Write>(out: &mut W, view: &Viewport, hostile: &Hostile) -> std::io::Result<()> {
    let (col, row) = view.cell(&hostile.rect);
    // Colour tracks remaining hit-points
    let color = if hostile.hp >= HOSTILE_START_HP {
        C_HOSTILE_FULL
    } else {
        C_HOSTILE_HURT
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print("◢◣"))?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let (col, row) = view.cell(&state.player.rect);
    let sprite = match state.player.facing {
        Facing::Right => "█▶",
        Facing::Left => "◀█",
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print(sprite))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.term_height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   W / ↑ / SPACE : Jump   F : Fire   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Centered banner shown for a moment after the last hostile falls.
pub fn draw_level_clear<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (term_width, term_height) = terminal::size()?;
    let msg = format!("★ LEVEL {} CLEAR ★", state.level);
    let col = (term_width / 2).saturating_sub(msg.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, term_height / 2))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&msg))?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);

    let lines: &[&str] = &[
        "╔════════════════════╗",
        "║    GAME  OVER      ║",
        "╚════════════════════╝",
    ];

    let cx = view.term_width / 2;
    let total_rows = lines.len() + 2; // box + score + hint
    let start_row = (view.term_height / 2).saturating_sub(total_rows as u16 / 2);

    out.queue(style::SetForegroundColor(Color::Red))?;
    for (i, msg) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let hint = "R - Play Again  Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
