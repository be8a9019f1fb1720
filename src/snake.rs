//! Classic grid snake.
//!
//! The board is 40x30 cells and the snake advances on a fixed 100 ms tick
//! derived from animation-frame timestamps, so movement speed is independent
//! of display refresh rate. Rendering happens every frame; late frames make
//! up for lost time by running several ticks at once.

use std::collections::VecDeque;

use web_sys::CanvasRenderingContext2d;

use crate::input::InputSnapshot;
use crate::rng::Lcg;
use crate::runtime::Phase;

pub const GRID_W: i32 = 40;
pub const GRID_H: i32 = 30;
/// Cell size in canvas pixels.
pub const CELL: f64 = 20.0;
/// Simulation period in milliseconds.
pub const TICK_MS: f64 = 100.0;

/// Fixed-period tick clock fed with `performance.now()` style timestamps.
struct TickClock {
    period_ms: f64,
    start_ms: f64,
    last_tick_idx: i64,
}

impl TickClock {
    fn new(period_ms: f64, now: f64) -> Self {
        TickClock {
            period_ms,
            start_ms: now,
            last_tick_idx: 0,
        }
    }

    /// Whole ticks elapsed since the previous call, clamped at zero.
    fn ticks_due(&mut self, now: f64) -> u32 {
        let whole = ((now - self.start_ms) / self.period_ms).floor() as i64;
        let due = (whole - self.last_tick_idx).max(0);
        self.last_tick_idx = self.last_tick_idx.max(whole);
        due as u32
    }
}

pub struct SnakeState {
    /// Front is the head.
    body: VecDeque<(i32, i32)>,
    dir: (i32, i32),
    food: (i32, i32),
    score: i64,
    phase: Phase,
    rng: Lcg,
    clock: Option<TickClock>,
}

impl SnakeState {
    pub fn new(seed: u32) -> Self {
        let mut body = VecDeque::new();
        body.push_front((10, 10));
        SnakeState {
            body,
            dir: (1, 0),
            food: (15, 15),
            score: 0,
            phase: Phase::Playing,
            rng: Lcg::new(seed),
            clock: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn head(&self) -> (i32, i32) {
        // Invariant: the body is never empty.
        *self.body.front().unwrap()
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn food(&self) -> (i32, i32) {
        self.food
    }

    /// Advances the snake by one grid step.
    pub fn step(&mut self, input: &InputSnapshot) {
        if self.phase != Phase::Playing {
            return;
        }
        if let Some(queued) = input.queued_dir {
            let next_dir = queued.delta();
            // Only perpendicular turns apply. A reversal stays queued and
            // can still take effect after a later legal turn.
            if next_dir.0 * self.dir.0 + next_dir.1 * self.dir.1 == 0 {
                self.dir = next_dir;
            }
        }

        let head = self.head();
        let next = (head.0 + self.dir.0, head.1 + self.dir.1);
        let hits_wall = next.0 < 0 || next.0 >= GRID_W || next.1 < 0 || next.1 >= GRID_H;
        // The tail cell counts as occupied even though it is about to move.
        if hits_wall || self.body.contains(&next) {
            self.phase = Phase::Lost;
            return;
        }

        self.body.push_front(next);
        if next == self.food {
            self.score += 10;
            if self.body.len() as i32 == GRID_W * GRID_H {
                self.phase = Phase::Won;
            } else {
                self.respawn_food();
            }
        } else {
            self.body.pop_back();
        }
    }

    fn respawn_food(&mut self) {
        // At least one free cell exists whenever this runs.
        loop {
            let cell = (
                self.rng.pick(GRID_W as usize) as i32,
                self.rng.pick(GRID_H as usize) as i32,
            );
            if !self.body.contains(&cell) {
                self.food = cell;
                return;
            }
        }
    }

    pub fn frame(
        &mut self,
        now: f64,
        input: &InputSnapshot,
        ctx: &CanvasRenderingContext2d,
        width: f64,
        height: f64,
    ) {
        let due = {
            let clock = self.clock.get_or_insert_with(|| TickClock::new(TICK_MS, now));
            clock.ticks_due(now)
        };
        for _ in 0..due {
            self.step(input);
        }
        self.render(ctx, width, height);
    }

    fn render(&self, ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
        ctx.set_fill_style_str("#111");
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_fill_style_str("#22d3ee");
        for (x, y) in &self.body {
            ctx.fill_rect(
                *x as f64 * CELL,
                *y as f64 * CELL,
                CELL - 2.0,
                CELL - 2.0,
            );
        }

        ctx.set_fill_style_str("#ef4444");
        ctx.fill_rect(
            self.food.0 as f64 * CELL,
            self.food.1 as f64 * CELL,
            CELL - 2.0,
            CELL - 2.0,
        );

        ctx.set_font("bold 18px 'Fira Code', monospace");
        ctx.set_text_align("left");
        ctx.set_line_width(4.0);
        ctx.set_stroke_style_str("#000000");
        let line = format!("SCORE {}", self.score);
        ctx.stroke_text(&line, 12.0, 26.0).ok();
        ctx.set_fill_style_str("#f8fafc");
        ctx.fill_text(&line, 12.0, 26.0).ok();

        if self.phase == Phase::Lost {
            self.draw_game_over(ctx, w, h);
        }
    }

    fn draw_game_over(&self, ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
        ctx.set_fill_style_str("rgba(0,0,0,0.55)");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("#ffffff");
        ctx.set_font("72px 'Fira Code', monospace");
        ctx.set_text_align("center");
        ctx.set_line_width(6.0);
        ctx.set_stroke_style_str("#000000");
        let (cx, cy) = (w / 2.0, h / 2.0);
        ctx.stroke_text("GAME OVER", cx, cy).ok();
        ctx.fill_text("GAME OVER", cx, cy).ok();
        ctx.set_font("20px 'Fira Code', monospace");
        ctx.fill_text(
            &format!("Score {} - restart to try again", self.score),
            cx,
            cy + 44.0,
        )
        .ok();
    }
}

// --- Tests -----------------------------------------------------------------
