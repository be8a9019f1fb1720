//! Shared driver for the arcade games.
//!
//! One game runs at a time. Its state lives in a thread-local cell, a single
//! reusable animation-frame closure dispatches into whichever game is
//! active, and the pending frame id is tracked so stopping cancels the loop
//! exactly once. Starting a game implicitly stops the previous one, which
//! keeps canvas, keyboard listeners and frame scheduling symmetric across
//! arbitrarily many game switches.

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window, window};

use crate::drive::DriveState;
use crate::input::InputController;
use crate::pacman::PacmanState;
use crate::snake::SnakeState;
use crate::wordle::WordleState;

/// Lifecycle of a running game. Terminal phases freeze the board on its
/// final frame; the loop stops scheduling and a restart builds fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Playing => "playing",
            Phase::Won => "won",
            Phase::Lost => "lost",
        }
    }
}

/// Which cabinet to boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Drive,
    Snake,
    Pacman,
    Wordle,
}

impl GameKind {
    pub fn from_name(name: &str) -> Option<GameKind> {
        match name {
            "drive" => Some(GameKind::Drive),
            "snake" => Some(GameKind::Snake),
            "pacman" => Some(GameKind::Pacman),
            "wordle" => Some(GameKind::Wordle),
            _ => None,
        }
    }

    fn canvas_size(self) -> (u32, u32) {
        match self {
            GameKind::Drive => (800, 600),
            GameKind::Snake => (800, 600),
            GameKind::Pacman => (475, 300),
            GameKind::Wordle => (480, 560),
        }
    }

    fn label(self) -> &'static str {
        match self {
            GameKind::Drive => "drive",
            GameKind::Snake => "snake",
            GameKind::Pacman => "pacman",
            GameKind::Wordle => "wordle",
        }
    }
}

/// Snapshot of the running game for the embedding page.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub game: &'static str,
    pub score: i64,
    pub state: &'static str,
}

enum Game {
    Drive(DriveState),
    Snake(SnakeState),
    Pacman(PacmanState),
    Wordle(WordleState),
}

impl Game {
    fn new(kind: GameKind, seed: u32) -> Game {
        match kind {
            GameKind::Drive => Game::Drive(DriveState::new()),
            GameKind::Snake => Game::Snake(SnakeState::new(seed)),
            GameKind::Pacman => Game::Pacman(PacmanState::new(seed)),
            GameKind::Wordle => Game::Wordle(WordleState::new(seed)),
        }
    }

    fn kind(&self) -> GameKind {
        match self {
            Game::Drive(_) => GameKind::Drive,
            Game::Snake(_) => GameKind::Snake,
            Game::Pacman(_) => GameKind::Pacman,
            Game::Wordle(_) => GameKind::Wordle,
        }
    }

    fn phase(&self) -> Phase {
        match self {
            // The cruise is endless; only stop_game ends it.
            Game::Drive(_) => Phase::Playing,
            Game::Snake(s) => s.phase(),
            Game::Pacman(p) => p.phase(),
            Game::Wordle(w) => w.phase(),
        }
    }

    fn score(&self) -> i64 {
        match self {
            Game::Drive(d) => d.score(),
            Game::Snake(s) => s.score(),
            Game::Pacman(p) => p.score(),
            Game::Wordle(w) => w.guesses_used() as i64,
        }
    }

    fn frame(
        &mut self,
        now: f64,
        input: &crate::input::InputSnapshot,
        ctx: &CanvasRenderingContext2d,
        w: f64,
        h: f64,
    ) {
        match self {
            Game::Drive(d) => d.frame(now, input, ctx, w, h),
            Game::Snake(s) => s.frame(now, input, ctx, w, h),
            Game::Pacman(p) => p.frame(now, input, ctx, w, h),
            Game::Wordle(wd) => wd.frame(now, input, ctx, w, h),
        }
    }

    fn summary(&self) -> GameSummary {
        GameSummary {
            game: self.kind().label(),
            score: self.score(),
            state: self.phase().as_str(),
        }
    }
}

struct Runtime {
    game: Game,
    input: InputController,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Runtime {
    fn frame(&mut self, now: f64) {
        let snap = self.input.snapshot();
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.game.frame(now, &snap, &self.ctx, w, h);
    }
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = RefCell::new(None);
    static FRAME_CB: RefCell<Option<Closure<dyn FnMut(f64)>>> = RefCell::new(None);
    static PENDING_FRAME: Cell<Option<i32>> = Cell::new(None);
}

/// Boots a game, replacing whatever ran before.
pub(crate) fn start(kind: GameKind) -> Result<(), JsValue> {
    stop();
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let (cw, ch) = kind.canvas_size();
    let canvas = acquire_canvas(&doc, cw, ch)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    let now = win
        .performance()
        .ok_or_else(|| JsValue::from_str("no performance"))?
        .now();

    let mut input = InputController::new();
    input.attach(&doc)?;
    let runtime = Runtime {
        game: Game::new(kind, now as u64 as u32),
        input,
        canvas,
        ctx,
    };
    RUNTIME.with(|cell| cell.replace(Some(runtime)));
    schedule_frame(&win)
}

/// Cancels the frame loop, detaches input and blanks the canvas. Calling
/// it twice, or with nothing running, is a no-op.
pub(crate) fn stop() {
    if let Some(id) = PENDING_FRAME.with(|p| p.take()) {
        if let Some(win) = window() {
            let _ = win.cancel_animation_frame(id);
        }
    }
    if let Some(mut rt) = RUNTIME.with(|cell| cell.borrow_mut().take()) {
        rt.input.detach();
        rt.ctx.set_fill_style_str("#000");
        rt.ctx
            .fill_rect(0.0, 0.0, rt.canvas.width() as f64, rt.canvas.height() as f64);
    }
}

pub(crate) fn summary() -> Option<GameSummary> {
    RUNTIME.with(|cell| cell.borrow().as_ref().map(|rt| rt.game.summary()))
}

/// Create / reuse the shared canvas and size it for the requested game.
fn acquire_canvas(doc: &Document, width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("na-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("na-canvas");
        c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(34,211,238,0.25); border-radius:12px; border:2px solid #1e293b; background:#000; z-index:20;").ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    canvas.set_width(width);
    canvas.set_height(height);
    Ok(canvas)
}

/// Requests the next frame, lazily building the dispatch closure. One
/// closure serves every game for the lifetime of the page.
fn schedule_frame(win: &Window) -> Result<(), JsValue> {
    FRAME_CB.with(|cb| {
        let mut cb = cb.borrow_mut();
        if cb.is_none() {
            *cb = Some(Closure::wrap(Box::new(on_frame) as Box<dyn FnMut(f64)>));
        }
        let id = win.request_animation_frame(cb.as_ref().unwrap().as_ref().unchecked_ref())?;
        PENDING_FRAME.with(|p| p.set(Some(id)));
        Ok(())
    })
}

fn on_frame(now: f64) {
    let running = RUNTIME.with(|cell| match cell.borrow_mut().as_mut() {
        Some(rt) => {
            rt.frame(now);
            rt.game.phase() == Phase::Playing
        }
        None => false,
    });
    if running {
        if let Some(win) = window() {
            let _ = schedule_frame(&win);
        }
    } else {
        // Terminal boards keep their final frame; the loop just ends.
        PENDING_FRAME.with(|p| p.set(None));
    }
}

// --- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_names_round_trip() {
        for kind in [
            GameKind::Drive,
            GameKind::Snake,
            GameKind::Pacman,
            GameKind::Wordle,
        ] {
            assert_eq!(GameKind::from_name(kind.label()), Some(kind));
        }
        assert_eq!(GameKind::from_name("tetris"), None);
        assert_eq!(GameKind::from_name(""), None);
    }

    #[test]
    fn fresh_games_summarize_as_playing() {
        for kind in [
            GameKind::Drive,
            GameKind::Snake,
            GameKind::Pacman,
            GameKind::Wordle,
        ] {
            let game = Game::new(kind, 99);
            let summary = game.summary();
            assert_eq!(summary.game, kind.label());
            assert_eq!(summary.score, 0);
            assert_eq!(summary.state, "playing");
        }
    }

    #[test]
    fn phase_strings_are_stable() {
        assert_eq!(Phase::Playing.as_str(), "playing");
        assert_eq!(Phase::Won.as_str(), "won");
        assert_eq!(Phase::Lost.as_str(), "lost");
    }
}
