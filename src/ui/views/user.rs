//! Per-user application list.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;
use std::sync::mpsc::Sender;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::api::types::Application;
use crate::api::ApiClient;
use crate::route::ResolvedState;
use crate::ui::events::AppEvent;
use crate::ui::format::or_dash;
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, DIM_TEXT, GLOBAL_BORDER, HEADER_TEXT};
use crate::ui::views::Phase;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserViewModel {
    pub apps: Vec<Application>,
}

pub struct UserController {
    pub phase: Phase,
    pub vm: UserViewModel,
    selected: usize,
}

impl UserController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Created,
            vm: UserViewModel::default(),
            selected: 0,
        }
    }

    /// Fetches the user's apps only when the `user` param is present;
    /// otherwise the screen stays idle on the empty view-model.
    pub fn activate(
        resolved: &ResolvedState,
        api: &ApiClient,
        runtime: &Handle,
        tx: &Sender<AppEvent>,
        generation: u64,
    ) -> (Self, Vec<AbortHandle>) {
        let mut controller = Self::new();

        let Some(user) = resolved.param("user") else {
            controller.phase = Phase::Idle;
            return (controller, Vec::new());
        };
        controller.phase = Phase::Activating;

        let endpoint = api.apps(user);
        let apps_tx = tx.clone();
        let fetch = runtime.spawn(async move {
            if let Some(apps) = endpoint.query().await {
                let _ = apps_tx.send(AppEvent::AppsLoaded { generation, apps });
            }
        });

        (controller, vec![fetch.abort_handle()])
    }

    pub fn on_apps(&mut self, apps: Vec<Application>) {
        self.vm = UserViewModel { apps };
        self.phase = Phase::Populated;
        self.selected = self.selected.min(self.vm.apps.len().saturating_sub(1));
    }

    pub fn selected_app(&self) -> Option<&Application> {
        self.vm.apps.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.vm.apps.is_empty() && self.selected + 1 < self.vm.apps.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

impl Default for UserController {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame<'_>, area: Rect, controller: &UserController) {
    let header = Row::new(
        ["id", "name", "alias", "cluster", "prio", "status", "op", "tasks", "versions"]
            .into_iter()
            .map(|title| Cell::from(Span::styled(title, Style::default().fg(DIM_TEXT)))),
    );

    let rows: Vec<Row> = controller
        .vm
        .apps
        .iter()
        .map(|app| {
            Row::new(vec![
                Cell::from(or_dash(&app.id).to_string()),
                Cell::from(or_dash(&app.name).to_string()),
                Cell::from(or_dash(&app.alias).to_string()),
                Cell::from(or_dash(&app.cluster).to_string()),
                Cell::from(app.priority.to_string()),
                Cell::from(or_dash(&app.status).to_string()),
                Cell::from(or_dash(&app.op_status).to_string()),
                Cell::from(app.tasks.len().to_string()),
                Cell::from(app.current_version.len().to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Min(12),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Length(5),
        Constraint::Min(10),
        Constraint::Min(8),
        Constraint::Length(6),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .style(Style::default().fg(HEADER_TEXT))
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" applications ({}) ", controller.phase.label()),
                    Style::default().fg(ACCENT),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
        .row_highlight_style(
            Style::default()
                .bg(ACTIVE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if !controller.vm.apps.is_empty() {
        state.select(Some(controller.selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
