use ratatui::Frame;

use crate::ui::app::{ActiveView, App};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::views;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let (header, body, footer) = layout_regions(frame.area());

    let header_widget = Header::new();
    frame.render_widget(
        header_widget.widget(app.state_id(), &app.location_string(), app.base()),
        header,
    );

    match app.view() {
        ActiveView::Cluster(controller) => views::cluster::render(frame, body, controller),
        ActiveView::User(controller) => views::user::render(frame, body, controller),
        ActiveView::App(controller) => views::app::render(frame, body, controller),
        ActiveView::Task(controller) => views::task::render(frame, body, controller),
    }

    let latest = app.notifications().latest();
    let footer_widget = Footer::new();
    frame.render_widget(footer_widget.widget(latest.as_ref(), app.stream()), footer);
}
