//! Hellish Kitchen rendering.
//!
//! Wide layout: header, then orders + pot on the left and shelf + log on the
//! right. Narrow layout stacks header, orders, pot and a two-column shelf.
//! When the session ends a game-over popup is drawn on top.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::catalog::{Recipe, RECIPES};
use super::shelf_key;
use super::state::{EndReason, KitchenState, KitchenView, OrderView, Phase, ShelfSlot};

pub fn render(
    state: &KitchenState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let view = state.view();
    let borders = borders_for(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    render_header(&view, f, chunks[0], borders);
    if is_narrow_layout(area.width) {
        render_narrow(state, &view, f, chunks[1], borders, click_state);
    } else {
        render_wide(state, &view, f, chunks[1], borders, click_state);
    }

    if let Phase::Ended(reason) = view.phase {
        render_game_over(&view, reason, f, area, click_state);
    }
}

// ── Helpers ─────────────────────────────────────────────────

/// Filled/empty bar plus a traffic-light color for `fraction`.
fn gauge(fraction: f64, width: usize) -> (String, Color) {
    let ratio = fraction.clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let bar = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width.saturating_sub(filled));
    let color = if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.2 {
        Color::Yellow
    } else {
        Color::Red
    };
    (bar, color)
}

fn borders_for(area_width: u16) -> Borders {
    if is_narrow_layout(area_width) { Borders::TOP | Borders::BOTTOM } else { Borders::ALL }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(area.x + (area.width - w) / 2, area.y + (area.height - h) / 2, w, h)
}

fn panel<'a>(title: &'a str, color: Color, borders: Borders) -> Block<'a> {
    Block::default()
        .borders(borders)
        .border_style(Style::default().fg(color))
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)))
}

// ── Layouts ─────────────────────────────────────────────────

fn render_wide(
    state: &KitchenState,
    view: &KitchenView,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let orders_h = state.config.max_orders as u16 * 2 + 2;
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(orders_h),
            Constraint::Length(6),
            Constraint::Min(4),
        ])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(7)])
        .split(columns[1]);

    render_orders(state, view, f, left[0], borders);
    render_pot(view, f, left[1], borders, click_state);
    render_recipes(view, f, left[2], borders);
    render_shelf(view, f, right[0], borders, click_state);
    render_log(state, f, right[1], borders);
}

fn render_narrow(
    state: &KitchenState,
    view: &KitchenView,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let orders_h = (view.orders.len() as u16 * 2 + 2).max(4);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(orders_h),
            Constraint::Length(6),
            Constraint::Min(5),
        ])
        .split(area);

    render_orders(state, view, f, chunks[0], borders);
    render_pot(view, f, chunks[1], borders, click_state);
    render_shelf_compact(view, f, chunks[2], borders, click_state);
}

// ── Header ──────────────────────────────────────────────────

fn render_header(view: &KitchenView, f: &mut Frame, area: Rect, borders: Borders) {
    let time_style = if view.time_critical {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let hearts: String = (0..view.max_lives)
        .map(|i| if i < view.lives { '\u{2665}' } else { '\u{2661}' })
        .collect();

    let mut spans = vec![
        Span::styled(format!(" \u{23f1} {}s", view.time_left), time_style),
        Span::styled(
            format!("  \u{2605} {}", view.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ];
    if view.combo > 1 {
        spans.push(Span::styled(
            format!("  x{} combo", view.combo),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(format!("  {}", hearts), Style::default().fg(Color::Red)));
    if view.muted {
        spans.push(Span::styled("  \u{1f507}", Style::default().fg(Color::DarkGray)));
    }

    let block = panel(" \u{1f525} Hellish Kitchen ", Color::Red, borders);
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

// ── Orders ──────────────────────────────────────────────────

fn order_lines<'a>(order: &OrderView, patience_ms: u64, bar_width: usize) -> [Line<'a>; 2] {
    let name_style = if order.urgent {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let wanted: String = order
        .recipe
        .ingredients
        .iter()
        .map(|i| i.emoji())
        .collect::<Vec<_>>()
        .join(" ");
    let (bar, color) = gauge(order.patience_fraction, bar_width);
    let secs = (order.patience_fraction * patience_ms as f64 / 1000.0).ceil() as u64;

    [
        Line::from(vec![
            Span::styled(format!(" #{:<3}", order.id), Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} ", order.customer)),
            Span::styled(order.recipe.name, name_style),
            Span::styled(format!("  {}", wanted), Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(bar, Style::default().fg(color)),
            Span::styled(format!(" {}s", secs), Style::default().fg(Color::DarkGray)),
        ]),
    ]
}

fn render_orders(
    state: &KitchenState,
    view: &KitchenView,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
) {
    let bar_width = if is_narrow_layout(area.width) { 10 } else { 16 };
    let mut lines = Vec::new();
    if view.orders.is_empty() {
        lines.push(Line::from(Span::styled(
            " Waiting for customers...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for order in &view.orders {
        lines.extend(order_lines(order, state.config.patience_ms, bar_width));
    }

    let block = panel(" Orders ", Color::Yellow, borders);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Recipe book ─────────────────────────────────────────────

/// Dishes someone is waiting for are highlighted.
fn recipe_line<'a>(recipe: &Recipe, ordered: bool) -> Line<'a> {
    let style = if ordered {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let wanted: Vec<&str> = recipe.ingredients.iter().map(|i| i.emoji()).collect();
    Line::from(vec![
        Span::styled(format!(" {:<22}", recipe.name), style),
        Span::raw(wanted.join(" ")),
    ])
}

fn render_recipes(view: &KitchenView, f: &mut Frame, area: Rect, borders: Borders) {
    let lines: Vec<Line> = RECIPES
        .iter()
        .map(|recipe| {
            let ordered = view.orders.iter().any(|o| o.recipe.name == recipe.name);
            recipe_line(recipe, ordered)
        })
        .collect();
    let block = panel(" Recipe book ", Color::Cyan, borders);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Pot ─────────────────────────────────────────────────────

fn render_pot(
    view: &KitchenView,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();

    let contents = if view.pot.is_empty() {
        Span::styled("(empty)", Style::default().fg(Color::DarkGray))
    } else {
        let emoji: Vec<&str> = view.pot.iter().map(|i| i.emoji()).collect();
        Span::styled(emoji.join(" "), Style::default().fg(Color::White))
    };
    let mut pot_line = vec![Span::raw(" Pot: "), contents];
    if view.burnt {
        pot_line.push(Span::styled(
            "  BURNT!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    cl.push(Line::from(pot_line));

    let (bar, color) = gauge(view.fire_percent / 100.0, 12);
    cl.push(Line::from(vec![
        Span::raw(" Fire "),
        Span::styled(bar, Style::default().fg(color)),
        Span::styled(
            format!(" {:.0}%", view.fire_percent),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    cl.push_buttons(
        vec![
            (Span::styled(" [Space] Serve", key), SERVE),
            (Span::styled("[R] Reset", key), RESET_POT),
        ],
        "  ",
    );
    let sound = if view.muted { "[M] Sound: off" } else { "[M] Sound: on" };
    cl.push_buttons(
        vec![
            (Span::styled(" [F] Stoke fire", key), BOOST_FIRE),
            (Span::styled(sound, Style::default().fg(Color::DarkGray)), TOGGLE_MUTE),
        ],
        "  ",
    );

    let block = panel(" Pot ", Color::LightRed, borders);
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Shelf ───────────────────────────────────────────────────

fn slot_style(slot: &ShelfSlot) -> Style {
    if slot.sold_out {
        Style::default().fg(Color::DarkGray)
    } else if slot.chopping > 0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_shelf(
    view: &KitchenView,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    for slot in &view.shelf {
        let stock = if slot.sold_out && slot.chopping == 0 {
            " sold out".to_string()
        } else if slot.chopping > 0 {
            format!(" x{} \u{1f52a}", slot.stock)
        } else {
            format!(" x{}", slot.stock)
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", shelf_key(slot.ingredient)),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(slot.ingredient.label(), slot_style(slot)),
                Span::styled(stock, Style::default().fg(Color::DarkGray)),
            ]),
            SELECT_INGREDIENT_BASE + slot.ingredient.index() as u16,
        );
    }

    let block = panel(" Shelf ", Color::Green, borders);
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

/// Two slots per row for phone screens.
fn render_shelf_compact(
    view: &KitchenView,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let cell_width = (area.width / 2).saturating_sub(1) as usize;
    let mut cl = ClickableList::new();
    for pair in view.shelf.chunks(2) {
        let buttons = pair
            .iter()
            .map(|slot| {
                let text = format!(
                    "[{}]{}{:>3}",
                    shelf_key(slot.ingredient),
                    slot.ingredient.emoji(),
                    slot.stock
                );
                let padded = format!("{:<width$}", text, width = cell_width);
                (
                    Span::styled(padded, slot_style(slot)),
                    SELECT_INGREDIENT_BASE + slot.ingredient.index() as u16,
                )
            })
            .collect();
        cl.push_buttons(buttons, " ");
    }

    let block = panel(" Shelf ", Color::Green, borders);
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs);
    drop(cs);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Log ─────────────────────────────────────────────────────

fn render_log(state: &KitchenState, f: &mut Frame, area: Rect, borders: Borders) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!(" > {}", entry.text), style))
        })
        .collect();

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

// ── Game Over ───────────────────────────────────────────────

fn render_game_over(
    view: &KitchenView,
    reason: EndReason,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let popup = centered(area, 44, 10);
    let headline = match reason {
        EndReason::TimeUp => " Time's up! The kitchen is closed.",
        EndReason::OutOfLives => " The customers have revolted!",
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(headline, Style::default().fg(Color::White))));
    cl.push(Line::from(""));
    if let Some(rank) = view.rank {
        cl.push(Line::from(Span::styled(
            format!(" \u{2605} {} \u{2605}", rank.title()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        cl.push(Line::from(Span::styled(
            format!(" {}", rank.message(view.score)),
            Style::default().fg(Color::White),
        )));
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [Enter] Open the kitchen again",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        RESTART,
    );

    let block = panel(" Game Over ", Color::Red, Borders::ALL);
    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(popup, &block, &mut cs);
    drop(cs);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}
