//! Tile-grid Pac-Man with three pursuing ghosts.
//!
//! Actors live on maze cells and move one cell per logic tick; a logic tick
//! fires every eighth animation frame so the crawl speed is readable while
//! the mouth and pellet animations stay smooth. Ghost pursuit is greedy:
//! each ghost ranks its legal moves by straight-line distance to the player
//! and takes the closest, never reversing unless a dead end forces it.
//! While a power pellet is active the ranking is replaced by uniform random
//! moves and contact sends the ghost home for points instead of ending the
//! game.

pub mod maze;

use std::cmp::Ordering;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::input::InputSnapshot;
use crate::rng::Lcg;
use crate::runtime::Phase;
use maze::{BLOCK, MAZE_H, MAZE_W, Maze, Tile};

/// Logic ticks per power pellet, counted in frames.
pub const POWER_FRAMES: i32 = 300;
/// Frames burned off the power timer per logic tick.
pub const POWER_DECAY: i32 = 8;
/// Animation frames between logic ticks.
pub const FRAMES_PER_TICK: u32 = 8;

/// Candidate ghost moves in fixed order: down, up, right, left. Distance
/// sorting is stable, so equidistant options resolve toward the earlier
/// candidate and chases replay identically from the same seed.
const GHOST_MOVES: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[derive(Debug)]
struct Actor {
    x: i32,
    y: i32,
    dir: (i32, i32),
}

#[derive(Debug)]
struct Ghost {
    x: i32,
    y: i32,
    dir: (i32, i32),
    spawn: (i32, i32),
    color: &'static str,
}

impl Ghost {
    fn new(x: i32, y: i32, color: &'static str) -> Ghost {
        Ghost {
            x,
            y,
            dir: (0, -1),
            spawn: (x, y),
            color,
        }
    }
}

pub struct PacmanState {
    maze: Maze,
    pacman: Actor,
    ghosts: [Ghost; 3],
    frame_idx: u32,
    power_timer: i32,
    score: i64,
    phase: Phase,
    rng: Lcg,
}

impl PacmanState {
    pub fn new(seed: u32) -> Self {
        PacmanState {
            maze: Maze::classic(),
            pacman: Actor {
                x: 9,
                y: 8,
                dir: (0, 0),
            },
            ghosts: [
                Ghost::new(9, 6, "red"),
                Ghost::new(8, 6, "pink"),
                Ghost::new(10, 6, "cyan"),
            ],
            frame_idx: 0,
            power_timer: 0,
            score: 0,
            phase: Phase::Playing,
            rng: Lcg::new(seed),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn pacman_pos(&self) -> (i32, i32) {
        (self.pacman.x, self.pacman.y)
    }

    /// One logic tick: player turn and move, eating, ghost moves, power
    /// decay, then contact resolution. Losing contact aborts the tick so a
    /// frozen board shows the exact losing positions.
    pub fn step(&mut self, input: &InputSnapshot) {
        if self.phase != Phase::Playing {
            return;
        }
        if let Some(queued) = input.queued_dir {
            let next = queued.delta();
            if self.maze.walkable(self.pacman.x + next.0, self.pacman.y + next.1) {
                self.pacman.dir = next;
            }
        }
        let (dx, dy) = self.pacman.dir;
        if self.maze.walkable(self.pacman.x + dx, self.pacman.y + dy) {
            self.pacman.x += dx;
            self.pacman.y += dy;
        }

        match self.maze.tile(self.pacman.x, self.pacman.y) {
            Tile::Dot => {
                self.maze.clear(self.pacman.x, self.pacman.y);
                self.score += 10;
            }
            Tile::Power => {
                self.maze.clear(self.pacman.x, self.pacman.y);
                self.score += 50;
                self.power_timer = POWER_FRAMES;
            }
            _ => {}
        }

        let target = (self.pacman.x, self.pacman.y);
        let frightened = self.power_timer > 0;
        for g in &mut self.ghosts {
            let step = ghost_step(&self.maze, g, target, frightened, &mut self.rng);
            g.dir = step;
            g.x += step.0;
            g.y += step.1;
        }

        self.power_timer = (self.power_timer - POWER_DECAY).max(0);

        for g in &mut self.ghosts {
            if (g.x, g.y) == target {
                if self.power_timer > 0 {
                    g.x = g.spawn.0;
                    g.y = g.spawn.1;
                    self.score += 200;
                } else {
                    self.phase = Phase::Lost;
                    return;
                }
            }
        }

        if self.maze.edibles_left() == 0 {
            self.phase = Phase::Won;
        }
    }

    pub fn frame(
        &mut self,
        _now: f64,
        input: &InputSnapshot,
        ctx: &CanvasRenderingContext2d,
        width: f64,
        height: f64,
    ) {
        if self.phase == Phase::Playing {
            self.frame_idx = self.frame_idx.wrapping_add(1);
            if self.frame_idx % FRAMES_PER_TICK == 0 {
                self.step(input);
            }
        }
        self.render(ctx, width, height);
    }

    // --- Rendering ---------------------------------------------------------

    fn render(&self, ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, 0.0, w, h);

        for y in 0..MAZE_H {
            for x in 0..MAZE_W {
                let px = x as f64 * BLOCK;
                let py = y as f64 * BLOCK;
                match self.maze.tile(x, y) {
                    Tile::Wall => {
                        ctx.set_fill_style_str("#1e3a8a");
                        ctx.fill_rect(px, py, BLOCK, BLOCK);
                        ctx.set_stroke_style_str("#3b82f6");
                        ctx.stroke_rect(px + 4.0, py + 4.0, BLOCK - 8.0, BLOCK - 8.0);
                    }
                    Tile::Dot => {
                        ctx.set_fill_style_str("#fbbf24");
                        dot(ctx, px + BLOCK / 2.0, py + BLOCK / 2.0, 3.0);
                    }
                    Tile::Power => {
                        let flash = if self.frame_idx % 20 < 10 { "#fff" } else { "#fbbf24" };
                        ctx.set_fill_style_str(flash);
                        dot(ctx, px + BLOCK / 2.0, py + BLOCK / 2.0, 6.0);
                    }
                    Tile::Empty | Tile::House => {}
                }
            }
        }

        self.draw_pacman(ctx);
        for g in &self.ghosts {
            self.draw_ghost(ctx, g);
        }
        self.draw_hud(ctx, w, h);
    }

    fn draw_pacman(&self, ctx: &CanvasRenderingContext2d) {
        let cx = self.pacman.x as f64 * BLOCK + BLOCK / 2.0;
        let cy = self.pacman.y as f64 * BLOCK + BLOCK / 2.0;
        let angle = (self.pacman.dir.1 as f64).atan2(self.pacman.dir.0 as f64);
        let open = 0.2 + (self.frame_idx as f64 * 0.3).sin() * 0.2;
        ctx.set_fill_style_str("#fbbf24");
        ctx.begin_path();
        ctx.arc(cx, cy, 11.0, angle + open, angle + (2.0 * PI - open)).ok();
        ctx.line_to(cx, cy);
        ctx.fill();
    }

    fn draw_ghost(&self, ctx: &CanvasRenderingContext2d, g: &Ghost) {
        let cx = g.x as f64 * BLOCK + BLOCK / 2.0;
        let cy = g.y as f64 * BLOCK + BLOCK / 2.0;
        // Frightened ghosts turn blue and flash white as the timer runs out.
        let body = if self.power_timer > 0 {
            if self.power_timer < 60 && self.frame_idx % 10 < 5 {
                "#fff"
            } else {
                "#3b82f6"
            }
        } else {
            g.color
        };
        ctx.set_fill_style_str(body);
        ctx.begin_path();
        ctx.arc(cx, cy - 2.0, 11.0, PI, 0.0).ok();
        ctx.line_to(cx + 11.0, cy + 11.0);
        ctx.line_to(cx + 4.0, cy + 6.0);
        ctx.line_to(cx - 4.0, cy + 6.0);
        ctx.line_to(cx - 11.0, cy + 11.0);
        ctx.fill();

        ctx.set_fill_style_str("white");
        dot(ctx, cx - 4.0, cy - 4.0, 3.0);
        dot(ctx, cx + 4.0, cy - 4.0, 3.0);
    }

    fn draw_hud(&self, ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
        ctx.set_font("bold 16px 'Fira Code', monospace");
        ctx.set_text_align("left");
        ctx.set_line_width(4.0);
        ctx.set_stroke_style_str("#000000");
        let line = format!("SCORE: {}", self.score);
        ctx.stroke_text(&line, 8.0, 20.0).ok();
        ctx.set_fill_style_str("#facc15");
        ctx.fill_text(&line, 8.0, 20.0).ok();

        if self.phase == Phase::Playing {
            return;
        }
        ctx.set_fill_style_str("rgba(0,0,0,0.7)");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_text_align("center");
        ctx.set_font("bold 42px 'Fira Code', monospace");
        ctx.set_line_width(6.0);
        let (title, color) = match self.phase {
            Phase::Won => ("VICTORY!", "#22c55e"),
            _ => ("GAME OVER", "#ef4444"),
        };
        ctx.stroke_text(title, w / 2.0, h / 2.0).ok();
        ctx.set_fill_style_str(color);
        ctx.fill_text(title, w / 2.0, h / 2.0).ok();
        ctx.set_font("16px 'Fira Code', monospace");
        ctx.set_fill_style_str("#facc15");
        ctx.fill_text("Insert coin to restart", w / 2.0, h / 2.0 + 36.0).ok();
    }
}

/// Picks a ghost's next move. Legal moves are the non-wall candidates; the
/// reverse of the current direction is dropped while any alternative exists.
fn ghost_step(
    maze: &Maze,
    g: &Ghost,
    target: (i32, i32),
    frightened: bool,
    rng: &mut Lcg,
) -> (i32, i32) {
    let mut moves: Vec<(i32, i32)> = GHOST_MOVES
        .iter()
        .copied()
        .filter(|m| maze.walkable(g.x + m.0, g.y + m.1))
        .collect();
    if moves.len() > 1 {
        moves.retain(|m| *m != (-g.dir.0, -g.dir.1));
    }
    if moves.is_empty() {
        return (0, 0);
    }
    if frightened {
        moves[rng.pick(moves.len())]
    } else {
        moves.sort_by(|a, b| {
            let da = chase_dist(g.x + a.0, g.y + a.1, target);
            let db = chase_dist(g.x + b.0, g.y + b.1, target);
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        });
        moves[0]
    }
}

fn chase_dist(x: i32, y: i32, target: (i32, i32)) -> f64 {
    f64::from(x - target.0).hypot(f64::from(y - target.1))
}

fn dot(ctx: &CanvasRenderingContext2d, cx: f64, cy: f64, r: f64) {
    ctx.begin_path();
    ctx.arc(cx, cy, r, 0.0, 2.0 * PI).ok();
    ctx.fill();
}

// --- Tests -----------------------------------------------------------------
