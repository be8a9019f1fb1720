//! Keyboard input sampling.
//!
//! Key events fire whenever the browser likes; the games only want to see
//! input at simulation boundaries. Event handlers therefore write into a
//! shared [`KeyState`] and each animation frame takes one [`InputSnapshot`]
//! from it, so a whole catch-up burst of ticks sees a single coherent view.
//!
//! [`InputController`] owns the two event closures and detaches them again
//! when a game stops. Listener registration is symmetric: no `forget()`, no
//! leaked handlers when games are switched repeatedly.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent};

/// One of the four arrow directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Grid delta, with screen-style y growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    fn from_key(key: &str) -> Option<Dir> {
        match key {
            "ArrowUp" => Some(Dir::Up),
            "ArrowDown" => Some(Dir::Down),
            "ArrowLeft" => Some(Dir::Left),
            "ArrowRight" => Some(Dir::Right),
            _ => None,
        }
    }
}

/// Discrete key press consumed by the word game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedKey {
    Letter(char),
    Enter,
    Backspace,
}

/// Live keyboard state mutated by DOM event handlers.
#[derive(Debug, Default)]
struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    /// Most recent directional press. Persists until a newer arrow replaces
    /// it so a turn requested early still applies at the next legal tick.
    queued_dir: Option<Dir>,
    /// Typed keys accumulated since the last snapshot.
    typed: Vec<TypedKey>,
}

impl KeyState {
    fn key_down(&mut self, key: &str) {
        if let Some(dir) = Dir::from_key(key) {
            match dir {
                Dir::Up => self.up = true,
                Dir::Down => self.down = true,
                Dir::Left => self.left = true,
                Dir::Right => self.right = true,
            }
            self.queued_dir = Some(dir);
            return;
        }
        match key {
            "Enter" => self.typed.push(TypedKey::Enter),
            "Backspace" => self.typed.push(TypedKey::Backspace),
            k if k.len() == 1 => {
                let c = k.chars().next().unwrap();
                if c.is_ascii_alphabetic() {
                    self.typed.push(TypedKey::Letter(c.to_ascii_uppercase()));
                }
            }
            _ => {}
        }
    }

    fn key_up(&mut self, key: &str) {
        match Dir::from_key(key) {
            Some(Dir::Up) => self.up = false,
            Some(Dir::Down) => self.down = false,
            Some(Dir::Left) => self.left = false,
            Some(Dir::Right) => self.right = false,
            None => {}
        }
    }
}

/// Immutable view of the keyboard taken once per animation frame.
#[derive(Debug, Default, Clone)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub queued_dir: Option<Dir>,
    pub typed: Vec<TypedKey>,
}

type KeyClosure = Closure<dyn FnMut(KeyboardEvent)>;

/// Owns the keydown/keyup listeners for the active game.
pub struct InputController {
    keys: Rc<RefCell<KeyState>>,
    target: Option<Document>,
    on_down: Option<KeyClosure>,
    on_up: Option<KeyClosure>,
}

impl InputController {
    pub fn new() -> Self {
        InputController {
            keys: Rc::new(RefCell::new(KeyState::default())),
            target: None,
            on_down: None,
            on_up: None,
        }
    }

    /// Registers keydown/keyup listeners on `doc`. A second attach without a
    /// detach in between is a no-op.
    pub fn attach(&mut self, doc: &Document) -> Result<(), JsValue> {
        if self.target.is_some() {
            return Ok(());
        }
        let keys = self.keys.clone();
        let down: KeyClosure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            keys.borrow_mut().key_down(&evt.key());
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref())?;

        let keys = self.keys.clone();
        let up: KeyClosure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            keys.borrow_mut().key_up(&evt.key());
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref())?;

        self.on_down = Some(down);
        self.on_up = Some(up);
        self.target = Some(doc.clone());
        Ok(())
    }

    /// Unregisters the listeners and drops the closures. Safe to call twice.
    pub fn detach(&mut self) {
        let Some(doc) = self.target.take() else {
            return;
        };
        if let Some(down) = self.on_down.take() {
            let _ = doc.remove_event_listener_with_callback("keydown", down.as_ref().unchecked_ref());
        }
        if let Some(up) = self.on_up.take() {
            let _ = doc.remove_event_listener_with_callback("keyup", up.as_ref().unchecked_ref());
        }
    }

    /// Copies held state and drains typed keys accumulated since last call.
    pub fn snapshot(&self) -> InputSnapshot {
        let mut keys = self.keys.borrow_mut();
        InputSnapshot {
            up: keys.up,
            down: keys.down,
            left: keys.left,
            right: keys.right,
            queued_dir: keys.queued_dir,
            typed: mem::take(&mut keys.typed),
        }
    }
}

impl Drop for InputController {
    fn drop(&mut self) {
        self.detach();
    }
}

// --- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_track_held_state() {
        let mut keys = KeyState::default();
        keys.key_down("ArrowUp");
        keys.key_down("ArrowLeft");
        assert!(keys.up && keys.left);
        assert!(!keys.down && !keys.right);
        keys.key_up("ArrowUp");
        assert!(!keys.up && keys.left);
    }

    #[test]
    fn queued_dir_keeps_most_recent_press() {
        let mut keys = KeyState::default();
        keys.key_down("ArrowUp");
        keys.key_down("ArrowRight");
        assert_eq!(keys.queued_dir, Some(Dir::Right));
        // Releasing a key never clears the queued turn.
        keys.key_up("ArrowRight");
        assert_eq!(keys.queued_dir, Some(Dir::Right));
    }

    #[test]
    fn letters_are_uppercased_and_specials_mapped() {
        let mut keys = KeyState::default();
        keys.key_down("c");
        keys.key_down("Y");
        keys.key_down("Enter");
        keys.key_down("Backspace");
        assert_eq!(
            keys.typed,
            vec![
                TypedKey::Letter('C'),
                TypedKey::Letter('Y'),
                TypedKey::Enter,
                TypedKey::Backspace
            ]
        );
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut keys = KeyState::default();
        keys.key_down("Shift");
        keys.key_down("F5");
        keys.key_down("3");
        keys.key_down(" ");
        assert!(keys.typed.is_empty());
        assert_eq!(keys.queued_dir, None);
    }

    #[test]
    fn snapshot_drains_typed_but_keeps_held() {
        let ctl = InputController::new();
        {
            let mut keys = ctl.keys.borrow_mut();
            keys.key_down("ArrowDown");
            keys.key_down("a");
        }
        let first = ctl.snapshot();
        assert!(first.down);
        assert_eq!(first.typed, vec![TypedKey::Letter('A')]);
        let second = ctl.snapshot();
        assert!(second.down, "held keys survive snapshots");
        assert!(second.typed.is_empty(), "typed queue drains once");
        assert_eq!(second.queued_dir, Some(Dir::Down));
    }

    #[test]
    fn dir_deltas_are_unit_axis_steps() {
        assert_eq!(Dir::Up.delta(), (0, -1));
        assert_eq!(Dir::Down.delta(), (0, 1));
        assert_eq!(Dir::Left.delta(), (-1, 0));
        assert_eq!(Dir::Right.delta(), (1, 0));
    }
}
