//! Hellish Kitchen: toss emoji ingredients into the pot and serve them to
//! impatient customers before the clock or your lives run out.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod logic;
pub mod render;
pub mod state;
pub mod timers;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::Ingredient;
use config::KitchenConfig;
use logic::ServeOutcome;
use state::{Cue, KitchenState};

/// Shelf keys in shelf order. `r` is skipped; it resets the pot.
pub const SHELF_KEYS: [char; 17] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'q', 'w', 'e', 't', 'y', 'u', 'i',
];

pub fn shelf_key(ingredient: Ingredient) -> char {
    SHELF_KEYS[ingredient.index()]
}

/// Everything a key or a tap can ask the kitchen to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Select(Ingredient),
    Serve,
    ResetPot,
    BoostFire,
    ToggleMute,
    Restart,
}

pub struct KitchenGame {
    pub state: KitchenState,
}

impl KitchenGame {
    pub fn new(config: KitchenConfig, seed: u64) -> Self {
        Self {
            state: logic::start_session(config, seed),
        }
    }

    /// Returns true if the event did something.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let command = match event {
            InputEvent::Key(ch) => command_for_key(*ch),
            InputEvent::Click(id) => command_for_click(*id),
        };
        match command {
            Some(cmd) => apply(&mut self.state, cmd),
            None => false,
        }
    }

    pub fn tick(&mut self, delta_ms: u64) {
        logic::advance(&mut self.state, delta_ms);
    }

    /// Cues raised since the last call, oldest first.
    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.state.cues)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

fn command_for_key(ch: char) -> Option<Command> {
    match ch.to_ascii_lowercase() {
        ' ' => Some(Command::Serve),
        'r' => Some(Command::ResetPot),
        'f' => Some(Command::BoostFire),
        'm' => Some(Command::ToggleMute),
        '\n' => Some(Command::Restart),
        key => SHELF_KEYS
            .iter()
            .position(|&k| k == key)
            .and_then(Ingredient::from_index)
            .map(Command::Select),
    }
}

fn command_for_click(id: u16) -> Option<Command> {
    match id {
        SERVE => Some(Command::Serve),
        RESET_POT => Some(Command::ResetPot),
        BOOST_FIRE => Some(Command::BoostFire),
        TOGGLE_MUTE => Some(Command::ToggleMute),
        RESTART => Some(Command::Restart),
        id if id >= SELECT_INGREDIENT_BASE => {
            Ingredient::from_index((id - SELECT_INGREDIENT_BASE) as usize).map(Command::Select)
        }
        _ => None,
    }
}

fn apply(state: &mut KitchenState, command: Command) -> bool {
    match command {
        Command::Select(ingredient) => logic::select_ingredient(state, ingredient),
        Command::Serve => logic::serve(state) != ServeOutcome::Ignored,
        Command::ResetPot => {
            let had_pot = state.is_running() && !state.pot.is_empty();
            logic::reset_selection(state);
            had_pot
        }
        Command::BoostFire => logic::boost_fire(state),
        Command::ToggleMute => {
            logic::toggle_mute(state);
            true
        }
        // Mid-service restarts would be too easy to hit by accident.
        Command::Restart if state.is_running() => false,
        Command::Restart => {
            logic::restart(state);
            true
        }
    }
}
