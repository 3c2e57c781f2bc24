mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};

use platform_shooter::compute::{init_state, load_level, tick};
use platform_shooter::entities::{GameEvent, GameStatus, InputSnapshot};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// How long the level-clear banner stays on screen.
const LEVEL_CLEAR_PAUSE: Duration = Duration::from_millis(900);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame the map is collapsed into an
/// `InputSnapshot` of the four logical actions, which the simulation reads
/// once at the start of its tick.  Input handlers never touch game state
/// directly, so a tick sees one consistent snapshot.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut state = init_state();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == GameStatus::GameOver =>
                        {
                            // Restart flow: full state reset
                            state = init_state();
                            key_frame.clear();
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Collapse held keys into this tick's input snapshot ────────────────
        let input = InputSnapshot {
            left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            jump: any_held(
                &key_frame,
                &[
                    KeyCode::Up,
                    KeyCode::Char('w'),
                    KeyCode::Char('W'),
                    KeyCode::Char(' '),
                ],
                frame,
            ),
            fire: any_held(
                &key_frame,
                &[KeyCode::Char('f'), KeyCode::Char('F'), KeyCode::Enter],
                frame,
            ),
        };

        if state.status == GameStatus::Playing {
            state = tick(&state, &input);
        }

        display::render(out, &state)?;

        // ── React to lifecycle signals ────────────────────────────────────────
        // The core raises them; advancing the level is our job, not its.
        if state.events.contains(&GameEvent::LevelComplete) {
            display::draw_level_clear(out, &state)?;
            thread::sleep(LEVEL_CLEAR_PAUSE);
            let next = state.level + 1;
            state = load_level(&state, next);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = game_loop(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
