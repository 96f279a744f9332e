//! Input plumbing: normalized events, click targets, pixel-to-cell mapping.
//!
//! Render code registers targets every frame; the mouse handler maps a DOM
//! pixel to a terminal cell and asks [`ClickState::hit_test`] which action
//! lives there.

use ratzilla::ratatui::layout::Rect;

/// Keyboard and pointer input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A tap on a registered target, identified by its action ID
    /// (see `kitchen::actions`).
    Click(u16),
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared between the render loop (writer) and the mouse handler (reader).
#[derive(Debug, Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: record the terminal size and drop last frame's targets.
    pub fn begin_frame(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Full-width target on one row of `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action under a cell. Later targets win where they overlap, so an
    /// overlay registered after the board covers it.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }

    /// Map a click (pixels relative to the grid's top-left corner) to the
    /// action under it.
    pub fn hit_test_pixel(
        &self,
        click_x: f64,
        click_y: f64,
        grid_width: f64,
        grid_height: f64,
    ) -> Option<u16> {
        let col = pixel_x_to_col(click_x, grid_width, self.terminal_cols)?;
        let row = pixel_y_to_row(click_y, grid_height, self.terminal_rows)?;
        self.hit_test(col, row)
    }
}

/// Phones and narrow browser windows get the stacked layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Row under a pixel offset from the grid top. `None` outside the grid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;
    if row >= terminal_rows { None } else { Some(row) }
}

/// Column under a pixel offset from the grid's left edge.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols { None } else { Some(col) }
}
