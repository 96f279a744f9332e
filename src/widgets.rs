//! Clickable text lines.
//!
//! [`ClickableList`] pairs the lines of a `Paragraph` with the actions they
//! trigger, so a panel's click targets always sit on the rows its text was
//! drawn on.
//!
//! ```ignore
//! let mut cl = ClickableList::new();
//! cl.push(Line::from("Pot: 🕷 🌶"));
//! cl.push_buttons(vec![(Span::raw("[Space] Serve"), SERVE), (Span::raw("[R] Reset"), RESET_POT)], "  ");
//! cl.register_targets_with_block(area, &block, &mut cs);
//! f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
//! ```

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Block;

use crate::input::ClickState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LineAction {
    line: u16,
    action_id: u16,
    /// `(column offset, width)` inside the line. `None` is the whole row.
    columns: Option<(u16, u16)>,
}

#[derive(Default)]
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    actions: Vec<LineAction>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// The whole row triggers `action_id`.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push(LineAction {
            line: self.lines.len() as u16,
            action_id,
            columns: None,
        });
        self.lines.push(line);
    }

    /// Several buttons on one row, each clickable over its own label.
    pub fn push_buttons(&mut self, buttons: Vec<(Span<'a>, u16)>, separator: &'a str) {
        let line_idx = self.lines.len() as u16;
        let sep_width = Span::raw(separator).width() as u16;
        let mut spans = Vec::with_capacity(buttons.len() * 2);
        let mut x = 0u16;

        for (i, (label, action_id)) in buttons.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(separator));
                x += sep_width;
            }
            let width = label.width() as u16;
            self.actions.push(LineAction {
                line: line_idx,
                action_id,
                columns: Some((x, width)),
            });
            spans.push(label);
            x += width;
        }
        self.lines.push(Line::from(spans));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register targets for a paragraph drawn in `area` with its text in
    /// `content` (the area minus borders). Lines past the bottom of
    /// `content` are clipped. Whole-row targets span the outer area for
    /// easier tapping.
    pub fn register_targets(&self, area: Rect, content: Rect, cs: &mut ClickState) {
        let content_end = content.y + content.height;
        for action in &self.actions {
            let row = content.y + action.line;
            if row >= content_end {
                continue;
            }
            match action.columns {
                None => cs.add_row_target(area, row, action.action_id),
                Some((offset, width)) => {
                    let x = content.x + offset;
                    let right = content.x + content.width;
                    if x >= right {
                        continue;
                    }
                    let width = width.min(right - x);
                    cs.add_click_target(Rect::new(x, row, width, 1), action.action_id);
                }
            }
        }
    }

    pub fn register_targets_with_block(&self, area: Rect, block: &Block, cs: &mut ClickState) {
        self.register_targets(area, block.inner(area), cs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratzilla::ratatui::widgets::Borders;

    #[test]
    fn clickable_rows_land_below_border() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Shelf"));
        cl.push_clickable(Line::from("[1] 🐙 Octopus x10"), 100);
        cl.push_clickable(Line::from("[2] 🐌 Snail x10"), 101);

        let area = Rect::new(0, 5, 40, 10);
        let block = Block::default().borders(Borders::ALL);
        let mut cs = ClickState::new();
        cl.register_targets_with_block(area, &block, &mut cs);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 7), Some(100));
        assert_eq!(cs.hit_test(10, 8), Some(101));
        // Row targets cover the border columns too.
        assert_eq!(cs.hit_test(0, 7), Some(100));
    }

    #[test]
    fn rows_past_content_are_clipped() {
        let mut cl = ClickableList::new();
        for i in 0..17u16 {
            cl.push_clickable(Line::from(format!("slot {}", i)), 100 + i);
        }
        // Three content rows between the borders.
        let area = Rect::new(0, 0, 40, 5);
        let block = Block::default().borders(Borders::ALL);
        let mut cs = ClickState::new();
        cl.register_targets_with_block(area, &block, &mut cs);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(5, 3), Some(102));
        assert_eq!(cs.hit_test(5, 4), None);
    }

    #[test]
    fn buttons_get_column_targets() {
        let mut cl = ClickableList::new();
        cl.push_buttons(
            vec![(Span::raw("[Space] Serve"), 1), (Span::raw("[R] Reset"), 2)],
            "  ",
        );
        assert_eq!(cl.len(), 1);

        let area = Rect::new(10, 0, 60, 3);
        let block = Block::default().borders(Borders::ALL);
        let mut cs = ClickState::new();
        cl.register_targets_with_block(area, &block, &mut cs);

        // Content starts at x=11. "[Space] Serve" is 13 wide, then 2 of separator.
        assert_eq!(cs.hit_test(11, 1), Some(1));
        assert_eq!(cs.hit_test(23, 1), Some(1));
        assert_eq!(cs.hit_test(24, 1), None);
        assert_eq!(cs.hit_test(26, 1), Some(2));
        assert_eq!(cs.hit_test(34, 1), Some(2));
        assert_eq!(cs.hit_test(35, 1), None);
    }

    #[test]
    fn buttons_are_clipped_to_content_width() {
        let mut cl = ClickableList::new();
        cl.push_buttons(vec![(Span::raw("[F] Fire"), 3), (Span::raw("[M] Mute"), 4)], " ");

        let area = Rect::new(0, 0, 12, 3);
        let block = Block::default().borders(Borders::ALL);
        let mut cs = ClickState::new();
        cl.register_targets_with_block(area, &block, &mut cs);

        // Content is columns 1..11; the second button starts at column 10.
        assert_eq!(cs.hit_test(9, 1), None);
        assert_eq!(cs.hit_test(10, 1), Some(4));
        assert_eq!(cs.hit_test(11, 1), None);
    }

    #[test]
    fn inserting_a_line_shifts_targets() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Pot"));
        cl.push(Line::from("🔥 fire"));
        cl.push_clickable(Line::from("[F] Fire"), 3);

        let area = Rect::new(0, 0, 40, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, area, &mut cs);

        assert_eq!(cs.hit_test(0, 2), Some(3));
        assert_eq!(cs.hit_test(0, 1), None);
    }

    #[test]
    fn empty_list_registers_nothing() {
        let cl: ClickableList = ClickableList::new();
        assert!(cl.is_empty());
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 80, 10), Rect::new(0, 0, 80, 10), &mut cs);
        assert!(cs.targets.is_empty());
    }
}
