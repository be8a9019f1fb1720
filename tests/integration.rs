// Integration tests (native) for the `neon-arcade` crate.
// These tests avoid wasm-specific functionality and drive the game
// simulations through their public APIs so they can run under `cargo test`
// on the host. Canvas, keyboard listeners and the frame loop are browser
// glue and are exercised manually instead.

use neon_arcade::Phase;
use neon_arcade::drive::DriveState;
use neon_arcade::input::{Dir, InputSnapshot, TypedKey};
use neon_arcade::pacman::PacmanState;
use neon_arcade::snake::SnakeState;
use neon_arcade::wordle::WordleState;

fn held(up: bool, down: bool, left: bool, right: bool) -> InputSnapshot {
    InputSnapshot {
        up,
        down,
        left,
        right,
        ..InputSnapshot::default()
    }
}

fn queued(dir: Dir) -> InputSnapshot {
    InputSnapshot {
        queued_dir: Some(dir),
        ..InputSnapshot::default()
    }
}

// Replaying the same input script must land the camera on the same spot.
#[test]
fn drive_replay_is_deterministic() {
    fn run() -> DriveState {
        let mut d = DriveState::new();
        for _ in 0..40 {
            d.step(&held(true, false, false, false));
        }
        for _ in 0..25 {
            d.step(&held(true, false, true, false));
        }
        for _ in 0..30 {
            d.step(&held(false, false, false, false));
        }
        for _ in 0..35 {
            d.step(&held(true, false, false, true));
        }
        for _ in 0..10 {
            d.step(&held(false, true, false, false));
        }
        d
    }
    let a = run();
    let b = run();
    assert_eq!(a.camera.track_position, b.camera.track_position);
    assert_eq!(a.camera.lateral_offset, b.camera.lateral_offset);
    assert_eq!(a.camera.speed, b.camera.speed);
    assert_eq!(a.score(), b.score());
    assert!(a.score() > 0, "the scripted run should cover distance");
}

// Holding the accelerator settles at the friction-limited terminal speed
// and keeps the camera on the circuit while laps wrap.
#[test]
fn drive_terminal_speed_and_lap_wrap() {
    let mut d = DriveState::new();
    let gas = held(true, false, false, false);
    for _ in 0..2000 {
        d.step(&gas);
    }
    let terminal =
        neon_arcade::drive::FRICTION * neon_arcade::drive::ACCEL / (1.0 - neon_arcade::drive::FRICTION);
    assert!((d.camera.speed - terminal).abs() < 1e-3);
    assert!(d.camera.speed < neon_arcade::drive::MAX_SPEED);
    let len = d.track().length();
    assert!(d.camera.track_position >= 0.0 && d.camera.track_position < len);
    // 2000 ticks near terminal speed cover the circuit several times over.
    assert!(d.score() > 1000);
}

// Scripted snake run: steer onto the first food, eat it, then march into
// the bottom wall. The lethal step freezes the board without mutating it.
#[test]
fn snake_eats_then_crashes_into_wall() {
    let mut s = SnakeState::new(7);
    assert_eq!(s.head(), (10, 10));
    assert_eq!(s.food(), (15, 15));

    let coast = InputSnapshot::default();
    for _ in 0..5 {
        s.step(&coast);
    }
    assert_eq!(s.head(), (15, 10));

    s.step(&queued(Dir::Down));
    for _ in 0..4 {
        s.step(&coast);
    }
    assert_eq!(s.head(), (15, 15));
    assert_eq!(s.score(), 10);
    assert_eq!(s.body_len(), 2);
    assert_eq!(s.phase(), Phase::Playing);
    let food = s.food();
    assert_ne!(food, (15, 15), "eaten food must respawn elsewhere");
    assert!(food.0 >= 0 && food.0 < neon_arcade::snake::GRID_W);
    assert!(food.1 >= 0 && food.1 < neon_arcade::snake::GRID_H);

    // Fourteen more rows down to the edge, then one lethal step.
    for _ in 0..14 {
        s.step(&coast);
    }
    assert_eq!(s.head(), (15, 29));
    assert_eq!(s.phase(), Phase::Playing);
    s.step(&coast);
    assert_eq!(s.phase(), Phase::Lost);
    assert_eq!(s.head(), (15, 29));
    assert_eq!(s.score(), 10);

    // A finished board ignores further input.
    s.step(&queued(Dir::Left));
    assert_eq!(s.head(), (15, 29));
    assert_eq!(s.phase(), Phase::Lost);
}

#[test]
fn snake_ignores_reversal_input() {
    let mut s = SnakeState::new(1);
    s.step(&queued(Dir::Left));
    assert_eq!(s.head(), (11, 10));
    assert_eq!(s.phase(), Phase::Playing);
}

// Three ticks of held-left eat the dots west of spawn before any ghost
// can leave the house region.
#[test]
fn pacman_clears_dots_west_of_spawn() {
    let mut p = PacmanState::new(0);
    assert_eq!(p.pacman_pos(), (9, 8));
    let left = queued(Dir::Left);
    for _ in 0..3 {
        p.step(&left);
    }
    assert_eq!(p.pacman_pos(), (6, 8));
    assert_eq!(p.score(), 30);
    assert_eq!(p.phase(), Phase::Playing);
}

#[test]
fn wordle_win_on_first_guess() {
    let mut w = WordleState::new(3);
    let target = w.target();
    for b in target.bytes() {
        w.key(TypedKey::Letter(b as char));
    }
    w.key(TypedKey::Enter);
    assert_eq!(w.phase(), Phase::Won);
    assert_eq!(w.guesses_used(), 1);
}

#[test]
fn wordle_six_misses_lock_out() {
    let mut w = WordleState::new(5);
    let miss = if w.target() == "GHOST" { "BLITZ" } else { "GHOST" };
    for _ in 0..6 {
        for b in miss.bytes() {
            w.key(TypedKey::Letter(b as char));
        }
        w.key(TypedKey::Enter);
    }
    assert_eq!(w.phase(), Phase::Lost);
    assert_eq!(w.guesses_used(), 6);

    // A locked board ignores further typing.
    w.key(TypedKey::Letter('A'));
    assert_eq!(w.entry(), "");
}
