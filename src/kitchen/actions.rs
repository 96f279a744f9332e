//! Semantic action IDs for kitchen click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Pot controls ────────────────────────────────────────────────
pub const SERVE: u16 = 1;
pub const RESET_POT: u16 = 2;
pub const BOOST_FIRE: u16 = 3;
pub const TOGGLE_MUTE: u16 = 4;

// ── Game over ───────────────────────────────────────────────────
pub const RESTART: u16 = 5;

// ── Shelf (base + shelf index 0..17) ────────────────────────────
pub const SELECT_INGREDIENT_BASE: u16 = 100;
