use ratatui::layout::Constraint;
use ratatui::prelude::{Direction, Layout, Rect};

/// Area inside a one-cell border. Saturates on degenerate terminals.
pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = split3(Direction::Vertical, percent_y, r);
    let [_, center, _] = split3(Direction::Horizontal, percent_x, middle);
    center
}

fn split3(direction: Direction, percent: u16, r: Rect) -> [Rect; 3] {
    let margin = (100 - percent.min(100)) / 2;
    let chunks = Layout::default()
        .direction(direction)
        .constraints([
            Constraint::Percentage(margin),
            Constraint::Percentage(percent),
            Constraint::Percentage(margin),
        ])
        .split(r);
    [chunks[0], chunks[1], chunks[2]]
}

/// Horizontal slots of `width` cells each, left to right.
pub(super) fn card_slots(area: Rect, count: usize, width: u16) -> Vec<Rect> {
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Length(width)).collect();
    Layout::default().direction(Direction::Horizontal).constraints(constraints).split(area).to_vec()
}
