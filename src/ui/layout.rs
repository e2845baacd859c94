use ratatui::layout::{Constraint, Layout, Rect};

/// Header / body / footer split used by every screen.
pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let regions = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(4),
    ])
    .split(area);
    (regions[0], regions[1], regions[2])
}

/// Side-by-side split for screens with a detail panel and a list.
pub fn split_panels(area: Rect) -> (Rect, Rect) {
    let panels = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    (panels[0], panels[1])
}
