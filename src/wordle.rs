//! PASSWORD_DECRYPT, a six-guess word puzzle.
//!
//! The target password is drawn from a fixed pool at startup. Guesses are
//! typed on the keyboard, committed with Enter and verdicts painted per
//! letter: green for a positional hit, yellow for a letter the target
//! contains elsewhere, slate for a miss. Unlike the simulations this game
//! is purely key-driven; frames only repaint.

use web_sys::CanvasRenderingContext2d;

use crate::input::{InputSnapshot, TypedKey};
use crate::rng::Lcg;
use crate::runtime::Phase;

pub const WORD_LEN: usize = 5;
pub const MAX_GUESSES: usize = 6;

/// Candidate passwords. Every entry is five ASCII uppercase letters.
pub static WORD_POOL: [&str; 12] = [
    "CYBER", "PIXEL", "SYNTH", "LASER", "GHOST", "RETRO", "DRIVE", "SNAKE", "POWER", "SCORE",
    "BLITZ", "TURBO",
];

const TILE: f64 = 48.0;
const GAP: f64 = 8.0;

/// Per-letter verdict for a committed guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterMark {
    Correct,
    Present,
    Absent,
}

/// Scores a guess against the target. Positional matches win over
/// containment; duplicates are not budgeted, so every occurrence of a
/// contained letter lights up yellow.
pub fn mark(guess: &str, target: &str) -> [LetterMark; WORD_LEN] {
    let mut marks = [LetterMark::Absent; WORD_LEN];
    let target_bytes = target.as_bytes();
    for (i, g) in guess.bytes().take(WORD_LEN).enumerate() {
        marks[i] = if target_bytes.get(i) == Some(&g) {
            LetterMark::Correct
        } else if target_bytes.contains(&g) {
            LetterMark::Present
        } else {
            LetterMark::Absent
        };
    }
    marks
}

pub struct WordleState {
    target: &'static str,
    committed: Vec<String>,
    entry: String,
    phase: Phase,
}

impl WordleState {
    pub fn new(seed: u32) -> Self {
        let mut rng = Lcg::new(seed);
        WordleState {
            target: WORD_POOL[rng.pick(WORD_POOL.len())],
            committed: Vec::new(),
            entry: String::new(),
            phase: Phase::Playing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn guesses_used(&self) -> usize {
        self.committed.len()
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Applies a single typed key.
    pub fn key(&mut self, key: TypedKey) {
        if self.phase != Phase::Playing {
            return;
        }
        match key {
            TypedKey::Letter(c) => {
                if self.entry.len() < WORD_LEN {
                    self.entry.push(c);
                }
            }
            TypedKey::Backspace => {
                self.entry.pop();
            }
            TypedKey::Enter => {
                // Only a full row commits; a short Enter is ignored.
                if self.entry.len() == WORD_LEN {
                    self.commit();
                }
            }
        }
    }

    fn commit(&mut self) {
        let guess = std::mem::take(&mut self.entry);
        let solved = guess == self.target;
        self.committed.push(guess);
        if solved {
            self.phase = Phase::Won;
        } else if self.committed.len() == MAX_GUESSES {
            self.phase = Phase::Lost;
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
        for key in &input.typed {
            self.key(*key);
        }
        self.render(ctx, width, height);
    }

    // --- Rendering ---------------------------------------------------------

    fn render(&self, ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_fill_style_str("#22d3ee");
        ctx.set_font("bold 24px 'Fira Code', monospace");
        ctx.set_text_align("center");
        ctx.fill_text("PASSWORD_DECRYPT", w / 2.0, 48.0).ok();

        let grid_w = WORD_LEN as f64 * TILE + (WORD_LEN as f64 - 1.0) * GAP;
        let grid_h = MAX_GUESSES as f64 * TILE + (MAX_GUESSES as f64 - 1.0) * GAP;
        let ox = (w - grid_w) / 2.0;
        let oy = 88.0;

        ctx.set_text_baseline("middle");
        ctx.set_font("bold 20px 'Fira Code', monospace");
        for row in 0..MAX_GUESSES {
            let marks = self.committed.get(row).map(|g| mark(g, self.target));
            for col in 0..WORD_LEN {
                let x = ox + col as f64 * (TILE + GAP);
                let y = oy + row as f64 * (TILE + GAP);
                let fill = match marks.as_ref().map(|m| m[col]) {
                    Some(LetterMark::Correct) => "#16a34a",
                    Some(LetterMark::Present) => "#ca8a04",
                    Some(LetterMark::Absent) => "#1e293b",
                    None => "#000",
                };
                ctx.set_fill_style_str(fill);
                ctx.fill_rect(x, y, TILE, TILE);
                ctx.set_stroke_style_str("#334155");
                ctx.set_line_width(2.0);
                ctx.stroke_rect(x, y, TILE, TILE);

                let letter = if row < self.committed.len() {
                    self.committed[row].as_bytes().get(col).copied()
                } else if row == self.committed.len() {
                    self.entry.as_bytes().get(col).copied()
                } else {
                    None
                };
                if let Some(b) = letter {
                    ctx.set_fill_style_str("#ffffff");
                    ctx.fill_text(
                        &(b as char).to_string(),
                        x + TILE / 2.0,
                        y + TILE / 2.0 + 1.0,
                    )
                    .ok();
                }
            }
        }
        ctx.set_text_baseline("alphabetic");

        let status_y = oy + grid_h + 40.0;
        match self.phase {
            Phase::Won => {
                ctx.set_fill_style_str("#22c55e");
                ctx.set_font("bold 22px 'Fira Code', monospace");
                ctx.fill_text("ACCESS GRANTED", w / 2.0, status_y).ok();
            }
            Phase::Lost => {
                ctx.set_fill_style_str("#ef4444");
                ctx.set_font("bold 22px 'Fira Code', monospace");
                ctx.fill_text(&format!("LOCKED OUT - {}", self.target), w / 2.0, status_y)
                    .ok();
            }
            Phase::Playing => {
                ctx.set_fill_style_str("#64748b");
                ctx.set_font("14px 'Fira Code', monospace");
                ctx.fill_text("type a guess, ENTER submits", w / 2.0, status_y)
                    .ok();
            }
        }
    }
}

// --- Tests -----------------------------------------------------------------
