use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

use crate::api::ApiClient;
use crate::notify::{NotificationBuffer, Notify};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

const NOTIFICATION_HISTORY: usize = 64;

pub fn run(base: String, runtime: Handle, initial: &str) -> anyhow::Result<()> {
    let notifications = Arc::new(NotificationBuffer::new(NOTIFICATION_HISTORY));
    let api = ApiClient::new(base, Arc::clone(&notifications) as Arc<dyn Notify>);

    let tick_rate = Duration::from_millis(250);
    let events = EventHandler::new(tick_rate);
    let mut app = App::new(api, notifications, runtime, events.sender(), initial);

    let (mut terminal, guard) = setup_terminal()?;
    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Input(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) | Ok(AppEvent::Resize(_, _)) => {}
            Ok(event) => app.on_event(event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    Ok(())
}
