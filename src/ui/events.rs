//! The application event channel.
//!
//! Input, ticks, fetch completions, and stream messages all arrive on one
//! mpsc channel whose single consumer is the UI loop, so every state
//! mutation is serialized there. Completion events carry the activation
//! generation that started them; stale ones are dropped by the consumer.

use crossterm::event::{self, Event, KeyEvent};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::api::stream::StreamEvent;
use crate::api::types::{Application, Stats, Task};

pub enum AppEvent {
    Input(KeyEvent),
    Resize(u16, u16),
    Tick,
    StatsLoaded { generation: u64, stats: Stats },
    AppsLoaded { generation: u64, apps: Vec<Application> },
    AppLoaded { generation: u64, app: Application },
    TaskLoaded { generation: u64, task: Task },
    Stream { generation: u64, event: StreamEvent },
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(AppEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(Event::Resize(cols, rows)) => {
                            if input_tx.send(AppEvent::Resize(cols, rows)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    },
                    Ok(false) => {}
                    Err(_) => break,
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, tx }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}
