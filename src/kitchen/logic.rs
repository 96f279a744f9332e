//! Hellish Kitchen game logic. Pure functions over `KitchenState`.
//!
//! Nothing here reads a wall clock or touches the DOM. Virtual time only
//! moves through [`advance`]; randomness only comes from the session's
//! seeded RNG, so a seed plus a command sequence replays exactly.

use rand::{Rng, RngCore};

use super::catalog::{Ingredient, CUSTOMERS, RECIPES};
use super::config::KitchenConfig;
use super::state::{Cue, EndReason, KitchenState, Order, Phase, Rank};
use super::timers::TimerEvent;

const COUNTDOWN_INTERVAL_MS: u64 = 1_000;

/// What a serve attempt did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServeOutcome {
    /// Empty pot or session over.
    Ignored,
    /// Pot was burnt and got scraped clean. No penalty.
    Burnt,
    Matched { order_id: u32, points: u64 },
    Missed,
}

/// Open a kitchen: first order on the rail, countdown running.
pub fn start_session(config: KitchenConfig, seed: u64) -> KitchenState {
    let mut state = KitchenState::new(config, seed);
    tracing::info!(seed, "kitchen session started");
    state
        .timers
        .schedule(0, COUNTDOWN_INTERVAL_MS, TimerEvent::Countdown);
    generate_order(&mut state);
    state
}

/// Replace the session with a fresh one. Mute carries over.
pub fn restart(state: &mut KitchenState) {
    let seed = state.rng.next_u64();
    let muted = state.muted;
    *state = start_session(state.config.clone(), seed);
    state.muted = muted;
}

/// Move virtual time forward by one animation frame.
///
/// Every timer due within the frame fires in due order (with `now_ms` set
/// to its due time), then the frame step runs at the new time.
pub fn advance(state: &mut KitchenState, delta_ms: u64) {
    if !state.is_running() {
        return;
    }
    let target = state.now_ms.saturating_add(delta_ms);
    while state.is_running() {
        let Some((due_ms, event)) = state.timers.pop_due(target) else {
            break;
        };
        state.now_ms = state.now_ms.max(due_ms);
        fire_timer(state, event);
    }
    if state.is_running() {
        state.now_ms = target;
        frame(state);
    }
}

fn fire_timer(state: &mut KitchenState, event: TimerEvent) {
    match event {
        TimerEvent::Countdown => countdown(state),
        TimerEvent::ComboReset => {
            state.combo_timer = None;
            if state.combo > 0 {
                tracing::debug!(combo = state.combo, "combo timed out");
            }
            state.combo = 0;
        }
        TimerEvent::SpawnOrder => {
            generate_order(state);
        }
        TimerEvent::ChopDone(ingredient) => finish_chop(state, ingredient),
    }
}

fn countdown(state: &mut KitchenState) {
    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left == 0 {
        end_session(state, EndReason::TimeUp);
    } else {
        state
            .timers
            .schedule(state.now_ms, COUNTDOWN_INTERVAL_MS, TimerEvent::Countdown);
    }
}

/// Per-frame step: fire decay, then patience.
pub fn frame(state: &mut KitchenState) {
    if !state.is_running() {
        return;
    }
    decay_fire(state);
    update_patience(state);
}

fn decay_fire(state: &mut KitchenState) {
    state.fire -= state.config.fire_decay_per_frame;
    if state.fire <= 0.0 {
        state.fire = 0.0;
        if !state.burnt {
            tracing::debug!("pot burnt");
            state.add_log("The pot is burnt! Scrape it before serving.", true);
        }
        state.burnt = true;
    }
}

fn update_patience(state: &mut KitchenState) {
    let now = state.now_ms;
    let warning_fraction = state.config.warning_fraction;
    let cue_chance = state.config.warning_cue_probability;

    let mut expired = Vec::new();
    let mut warnings = 0;
    for order in &state.orders {
        if order.remaining_ms(now) == 0 {
            expired.push(order.id);
        } else if order.patience_fraction(now) < warning_fraction && state.rng.gen_bool(cue_chance) {
            warnings += 1;
        }
    }
    for _ in 0..warnings {
        state.cues.push(Cue::Warning);
    }

    for order_id in expired {
        if !state.is_running() {
            break;
        }
        fail_order(state, order_id);
    }
}

fn fail_order(state: &mut KitchenState, order_id: u32) {
    let Some(pos) = state.orders.iter().position(|o| o.id == order_id) else {
        return;
    };
    let order = state.orders.remove(pos);
    tracing::debug!(order_id, recipe = order.recipe.name, "order expired");
    state.add_log(
        &format!("{} stormed out waiting for {}", order.customer, order.recipe.name),
        false,
    );
    lose_life(state);
    generate_order(state);
}

/// Shared failure path: cue, combo reset, one life.
fn lose_life(state: &mut KitchenState) {
    state.cues.push(Cue::Fail);
    reset_combo(state);
    state.lives = state.lives.saturating_sub(1);
    tracing::debug!(lives = state.lives, "life lost");
    if state.lives == 0 {
        end_session(state, EndReason::OutOfLives);
    }
}

fn reset_combo(state: &mut KitchenState) {
    state.combo = 0;
    if let Some(id) = state.combo_timer.take() {
        state.timers.cancel(id);
    }
}

fn end_session(state: &mut KitchenState, reason: EndReason) {
    if !state.is_running() {
        return;
    }
    state.phase = Phase::Ended(reason);
    state.timers.clear();
    state.combo_timer = None;
    state.cues.push(Cue::GameOver { cleared: state.score > 0 });

    let rank = Rank::from_score(state.score);
    let message = rank.message(state.score);
    state.add_log(&message, true);
    tracing::info!(?reason, score = state.score, rank = rank.title(), "kitchen closed");
}

/// Put a random order on the rail unless the rail is full or the kitchen
/// is closed. May schedule one cascaded order.
pub fn generate_order(state: &mut KitchenState) -> bool {
    if !state.is_running() || state.orders.len() >= state.config.max_orders {
        return false;
    }

    let recipe = &RECIPES[state.rng.gen_range(0..RECIPES.len())];
    let customer = CUSTOMERS[state.rng.gen_range(0..CUSTOMERS.len())];
    let id = state.next_order_id;
    state.next_order_id = state.next_order_id.wrapping_add(1);

    state.orders.push(Order::new(
        id,
        recipe,
        customer,
        state.config.patience_ms,
        state.now_ms,
    ));
    tracing::debug!(order_id = id, recipe = recipe.name, "order placed");
    state.add_log(&format!("{} ordered {}", customer, recipe.name), false);

    if state.rng.gen_bool(state.config.cascade_probability)
        && state.orders.len() < state.config.max_orders
    {
        state.timers.schedule(
            state.now_ms,
            state.config.cascade_delay_ms,
            TimerEvent::SpawnOrder,
        );
    }
    true
}

/// Start chopping an ingredient. It lands in the pot after the chop delay.
pub fn select_ingredient(state: &mut KitchenState, ingredient: Ingredient) -> bool {
    if !state.is_running() || state.available(ingredient) == 0 {
        return false;
    }
    state.cues.push(Cue::Chop);
    state.timers.schedule(
        state.now_ms,
        state.config.chop_delay_ms,
        TimerEvent::ChopDone(ingredient),
    );
    true
}

fn finish_chop(state: &mut KitchenState, ingredient: Ingredient) {
    let stock = &mut state.stocks[ingredient.index()];
    *stock = stock.saturating_sub(1);
    let sold_out = *stock == 0;
    state.pot.push(ingredient);
    if sold_out {
        state.add_log(&format!("{} is sold out", ingredient.label()), false);
    }
}

/// Empty the pot. Ingredients already in it are not refunded.
pub fn reset_selection(state: &mut KitchenState) {
    if !state.is_running() {
        return;
    }
    state.pot.clear();
}

pub fn boost_fire(state: &mut KitchenState) -> bool {
    if !state.is_running() {
        return false;
    }
    state.fire = (state.fire + state.config.fire_boost).min(100.0);
    true
}

/// Works in any phase. Returns the new mute state.
pub fn toggle_mute(state: &mut KitchenState) -> bool {
    state.muted = !state.muted;
    tracing::info!(muted = state.muted, "sound toggled");
    state.muted
}

/// Serve the pot to the first pending order it matches.
pub fn serve(state: &mut KitchenState) -> ServeOutcome {
    if state.pot.is_empty() || !state.is_running() {
        return ServeOutcome::Ignored;
    }

    if state.burnt {
        state.pot.clear();
        state.burnt = false;
        state.cues.push(Cue::Fail);
        state.add_log("Burnt food can't be served. Pot scraped clean.", false);
        return ServeOutcome::Burnt;
    }

    let matched = state
        .orders
        .iter()
        .position(|o| pot_matches(&state.pot, o.recipe.ingredients));

    let outcome = match matched {
        Some(pos) => {
            let order = state.orders.remove(pos);
            let points = complete_order(state, &order);
            ServeOutcome::Matched { order_id: order.id, points }
        }
        None => {
            state.add_log("Nobody ordered that!", false);
            lose_life(state);
            ServeOutcome::Missed
        }
    };
    state.pot.clear();
    outcome
}

fn complete_order(state: &mut KitchenState, order: &Order) -> u64 {
    state.combo += 1;
    if let Some(id) = state.combo_timer.take() {
        state.timers.cancel(id);
    }
    state.combo_timer = Some(state.timers.schedule(
        state.now_ms,
        state.config.combo_timeout_ms,
        TimerEvent::ComboReset,
    ));

    let points = combo_points(&state.config, state.combo);
    state.score = state.score.saturating_add(points);
    state.cues.push(Cue::Success);
    tracing::debug!(
        order_id = order.id,
        recipe = order.recipe.name,
        combo = state.combo,
        points,
        score = state.score,
        "order served"
    );
    let text = if state.combo > 1 {
        format!("{} served! +{} ({} combo)", order.recipe.name, points, state.combo)
    } else {
        format!("{} served! +{}", order.recipe.name, points)
    };
    state.add_log(&text, true);

    generate_order(state);
    points
}

/// Points for a success at the given (already incremented) combo.
pub fn combo_points(config: &KitchenConfig, combo: u32) -> u64 {
    let multiplier = 1.0 + combo.saturating_sub(1) as f64 * config.combo_multiplier_step;
    (config.base_score as f64 * multiplier).floor() as u64
}

/// Multiset equality: order is ignored, multiplicity is not.
pub fn pot_matches(pot: &[Ingredient], recipe: &[Ingredient]) -> bool {
    if pot.len() != recipe.len() {
        return false;
    }
    let mut a = pot.to_vec();
    let mut b = recipe.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // ── Strategy helpers ──────────────────────────────────

    fn arb_ingredient() -> impl Strategy<Value = Ingredient> {
        prop::sample::select(Ingredient::ALL.to_vec())
    }

    fn arb_recipe_shuffled() -> impl Strategy<Value = (usize, Vec<Ingredient>)> {
        (0..RECIPES.len()).prop_flat_map(|i| {
            (Just(i), Just(RECIPES[i].ingredients.to_vec()).prop_shuffle())
        })
    }

    #[derive(Clone, Debug)]
    enum Command {
        Select(Ingredient),
        Serve,
        Reset,
        Boost,
        /// Cook the first pending order's recipe and serve it.
        CookFirst,
        Advance(u64),
    }

    fn arb_command() -> impl Strategy<Value = Command> {
        prop_oneof![
            arb_ingredient().prop_map(Command::Select),
            Just(Command::Serve),
            Just(Command::Reset),
            Just(Command::Boost),
            Just(Command::CookFirst),
            (0u64..3_000).prop_map(Command::Advance),
        ]
    }

    /// Serve and check the bookkeeping each outcome promises.
    fn checked_serve(s: &mut KitchenState) -> Result<(), TestCaseError> {
        let (score, lives, combo) = (s.score, s.lives, s.combo);
        match serve(s) {
            ServeOutcome::Ignored | ServeOutcome::Burnt => {
                prop_assert_eq!((s.score, s.lives, s.combo), (score, lives, combo));
            }
            ServeOutcome::Matched { points, .. } => {
                prop_assert_eq!(s.combo, combo + 1);
                prop_assert_eq!(points, combo_points(&s.config, s.combo));
                prop_assert_eq!(s.score, score + points);
                prop_assert_eq!(s.lives, lives);
            }
            ServeOutcome::Missed => {
                prop_assert_eq!(s.combo, 0);
                prop_assert_eq!(s.lives, lives - 1);
                prop_assert_eq!(s.score, score);
            }
        }
        prop_assert!(s.pot.is_empty() || !s.is_running());
        Ok(())
    }

    fn apply(s: &mut KitchenState, cmd: &Command) -> Result<(), TestCaseError> {
        match cmd {
            Command::Select(i) => {
                select_ingredient(s, *i);
            }
            Command::Serve => checked_serve(s)?,
            Command::Reset => reset_selection(s),
            Command::Boost => {
                boost_fire(s);
            }
            Command::CookFirst => {
                if let Some(order) = s.orders.first() {
                    let recipe = order.recipe.ingredients;
                    reset_selection(s);
                    for &i in recipe {
                        select_ingredient(s, i);
                    }
                    let delay = s.config.chop_delay_ms;
                    advance(s, delay);
                    checked_serve(s)?;
                }
            }
            Command::Advance(ms) => advance(s, *ms),
        }
        Ok(())
    }

    // ── Matching properties ───────────────────────────────

    proptest! {
        #[test]
        fn prop_any_permutation_matches((idx, pot) in arb_recipe_shuffled()) {
            prop_assert!(pot_matches(&pot, RECIPES[idx].ingredients));
        }

        #[test]
        fn prop_extra_ingredient_never_matches(
            (idx, mut pot) in arb_recipe_shuffled(),
            extra in arb_ingredient(),
        ) {
            pot.push(extra);
            prop_assert!(!pot_matches(&pot, RECIPES[idx].ingredients));
        }

        #[test]
        fn prop_missing_ingredient_never_matches(
            (idx, mut pot) in arb_recipe_shuffled(),
            slot in 0usize..4,
        ) {
            let slot = slot % pot.len();
            pot.remove(slot);
            prop_assert!(!pot_matches(&pot, RECIPES[idx].ingredients));
        }

        #[test]
        fn prop_swapped_ingredient_never_matches(
            (idx, mut pot) in arb_recipe_shuffled(),
            slot in 0usize..4,
            replacement in arb_ingredient(),
        ) {
            let slot = slot % pot.len();
            prop_assume!(pot[slot] != replacement);
            pot[slot] = replacement;
            prop_assert!(!pot_matches(&pot, RECIPES[idx].ingredients));
        }
    }

    // ── Session invariants ────────────────────────────────

    proptest! {
        #[test]
        fn prop_session_invariants_hold(
            seed in any::<u64>(),
            commands in prop::collection::vec(arb_command(), 0..150),
        ) {
            let mut s = start_session(KitchenConfig::default(), seed);
            let max_lives = s.config.initial_lives;
            let mut last_score = 0;
            let mut ended = false;

            for cmd in &commands {
                apply(&mut s, cmd)?;

                prop_assert!(s.lives <= max_lives);
                prop_assert!((0.0..=100.0).contains(&s.fire), "fire = {}", s.fire);
                prop_assert!(s.orders.len() <= s.config.max_orders);
                prop_assert!(s.score >= last_score);
                prop_assert!(s.stocks.iter().all(|&n| n <= s.config.ingredient_stock));
                prop_assert_eq!(s.is_running(), s.lives > 0 && s.time_left > 0);
                if ended {
                    prop_assert!(!s.is_running());
                }
                last_score = s.score;
                ended = !s.is_running();
            }
        }

        #[test]
        fn prop_failure_always_zeroes_combo(seed in any::<u64>(), combo in 1u32..20) {
            let mut s = start_session(KitchenConfig::default(), seed);
            s.combo = combo;
            s.pot = vec![Ingredient::Beef, Ingredient::Chicken, Ingredient::Fish];
            prop_assert_eq!(serve(&mut s), ServeOutcome::Missed);
            prop_assert_eq!(s.combo, 0);
            prop_assert_eq!(s.lives, s.config.initial_lives - 1);
        }
    }
}
