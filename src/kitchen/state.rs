//! Hellish Kitchen session state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::catalog::{Ingredient, Recipe};
use super::config::KitchenConfig;
use super::timers::{TimerEvent, TimerId, Timers};

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    OutOfLives,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Terminal.
    Ended(EndReason),
}

/// Feedback for the host to play or flash. Drained every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Chop,
    Success,
    Fail,
    Warning,
    GameOver { cleared: bool },
}

/// End-of-session tier chosen by final score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Apprentice,
    LineCook,
    SousChef,
    HellChef,
}

impl Rank {
    pub fn from_score(score: u64) -> Rank {
        match score {
            0..=999 => Rank::Apprentice,
            1_000..=2_999 => Rank::LineCook,
            3_000..=4_999 => Rank::SousChef,
            _ => Rank::HellChef,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Rank::Apprentice => "Apprentice",
            Rank::LineCook => "Line Cook",
            Rank::SousChef => "Sous Chef",
            Rank::HellChef => "Hell Chef",
        }
    }

    pub fn message(self, score: u64) -> String {
        match self {
            Rank::Apprentice => format!("Needs more practice... Score: {score}"),
            Rank::LineCook => format!("Service is over! Score: {score}"),
            Rank::SousChef => format!("Excellent service! Score: {score}"),
            Rank::HellChef => format!("A Hell Chef is born! Score: {score}"),
        }
    }
}

/// A pending customer order.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: u32,
    pub recipe: &'static Recipe,
    pub customer: &'static str,
    pub patience_ms: u64,
    pub created_at_ms: u64,
}

impl Order {
    pub fn new(
        id: u32,
        recipe: &'static Recipe,
        customer: &'static str,
        patience_ms: u64,
        created_at_ms: u64,
    ) -> Self {
        Self { id, recipe, customer, patience_ms, created_at_ms }
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.created_at_ms);
        self.patience_ms.saturating_sub(elapsed)
    }

    /// Remaining patience in `0.0..=1.0`.
    pub fn patience_fraction(&self, now_ms: u64) -> f64 {
        if self.patience_ms == 0 {
            return 0.0;
        }
        self.remaining_ms(now_ms) as f64 / self.patience_ms as f64
    }
}

/// Log entry shown in the kitchen ticket rail.
#[derive(Clone, Debug)]
pub struct KitchenLogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full state of one kitchen session.
pub struct KitchenState {
    pub config: KitchenConfig,
    pub phase: Phase,
    /// Virtual time since the session started.
    pub now_ms: u64,
    pub time_left: u32,
    pub lives: u32,
    pub score: u64,
    pub combo: u32,
    /// Fire gauge, `0.0..=100.0`.
    pub fire: f64,
    pub burnt: bool,
    pub muted: bool,
    /// Ingredients in the pot, in the order they were added.
    pub pot: Vec<Ingredient>,
    /// Remaining stock per ingredient, indexed by `Ingredient::index()`.
    pub stocks: Vec<u32>,
    pub orders: Vec<Order>,
    pub next_order_id: u32,
    pub timers: Timers,
    /// Pending combo reset, re-armed on every success.
    pub combo_timer: Option<TimerId>,
    pub cues: Vec<Cue>,
    pub log: Vec<KitchenLogEntry>,
    pub rng: ChaCha8Rng,
}

impl KitchenState {
    /// A fresh, idle session. `logic::start_session` opens the kitchen.
    pub fn new(config: KitchenConfig, seed: u64) -> Self {
        Self {
            phase: Phase::Running,
            now_ms: 0,
            time_left: config.initial_time_secs,
            lives: config.initial_lives,
            score: 0,
            combo: 0,
            fire: 100.0,
            burnt: false,
            muted: false,
            pot: Vec::new(),
            stocks: vec![config.ingredient_stock; Ingredient::ALL.len()],
            orders: Vec::new(),
            next_order_id: 0,
            timers: Timers::new(),
            combo_timer: None,
            cues: Vec::new(),
            log: vec![KitchenLogEntry {
                text: "The kitchen of hell is open!".into(),
                is_important: true,
            }],
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn stock(&self, ingredient: Ingredient) -> u32 {
        self.stocks[ingredient.index()]
    }

    /// Chops of `ingredient` still on the board.
    pub fn chopping(&self, ingredient: Ingredient) -> u32 {
        self.timers.count(TimerEvent::ChopDone(ingredient)) as u32
    }

    /// Stock not yet claimed by a chop in progress.
    pub fn available(&self, ingredient: Ingredient) -> u32 {
        self.stock(ingredient).saturating_sub(self.chopping(ingredient))
    }

    pub fn rank(&self) -> Option<Rank> {
        match self.phase {
            Phase::Running => None,
            Phase::Ended(_) => Some(Rank::from_score(self.score)),
        }
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(KitchenLogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > 30 {
            self.log.remove(0);
        }
    }

    /// Snapshot of everything a presentation layer needs.
    pub fn view(&self) -> KitchenView {
        let warning = self.config.warning_fraction;
        KitchenView {
            time_left: self.time_left,
            time_critical: self.time_left <= self.config.countdown_critical_secs,
            score: self.score,
            combo: self.combo,
            lives: self.lives,
            max_lives: self.config.initial_lives,
            fire_percent: self.fire,
            burnt: self.burnt,
            pot: self.pot.clone(),
            shelf: Ingredient::ALL
                .iter()
                .map(|&ingredient| ShelfSlot {
                    ingredient,
                    stock: self.stock(ingredient),
                    chopping: self.chopping(ingredient),
                    sold_out: self.available(ingredient) == 0,
                })
                .collect(),
            orders: self
                .orders
                .iter()
                .map(|o| {
                    let fraction = o.patience_fraction(self.now_ms);
                    OrderView {
                        id: o.id,
                        recipe: o.recipe,
                        customer: o.customer,
                        patience_fraction: fraction,
                        urgent: fraction < warning,
                    }
                })
                .collect(),
            phase: self.phase,
            rank: self.rank(),
            muted: self.muted,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShelfSlot {
    pub ingredient: Ingredient,
    pub stock: u32,
    pub chopping: u32,
    pub sold_out: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderView {
    pub id: u32,
    pub recipe: &'static Recipe,
    pub customer: &'static str,
    pub patience_fraction: f64,
    pub urgent: bool,
}

/// Read-only snapshot for rendering (or headless inspection).
#[derive(Clone, Debug, PartialEq)]
pub struct KitchenView {
    pub time_left: u32,
    pub time_critical: bool,
    pub score: u64,
    pub combo: u32,
    pub lives: u32,
    pub max_lives: u32,
    pub fire_percent: f64,
    pub burnt: bool,
    pub pot: Vec<Ingredient>,
    pub shelf: Vec<ShelfSlot>,
    pub orders: Vec<OrderView>,
    pub phase: Phase,
    pub rank: Option<Rank>,
    pub muted: bool,
}
