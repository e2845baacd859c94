//! Application detail with its task list.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;
use std::sync::mpsc::Sender;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::api::types::Application;
use crate::api::ApiClient;
use crate::route::ResolvedState;
use crate::ui::events::AppEvent;
use crate::ui::format::{self, or_dash};
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, DIM_TEXT, GLOBAL_BORDER, HEADER_TEXT};
use crate::ui::views::Phase;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppViewModel {
    pub app: Application,
}

pub struct AppController {
    pub phase: Phase,
    pub vm: AppViewModel,
    selected: usize,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Created,
            vm: AppViewModel::default(),
            selected: 0,
        }
    }

    /// Fetches the app only when the `app` param is present.
    pub fn activate(
        resolved: &ResolvedState,
        api: &ApiClient,
        runtime: &Handle,
        tx: &Sender<AppEvent>,
        generation: u64,
    ) -> (Self, Vec<AbortHandle>) {
        let mut controller = Self::new();

        let Some(app_id) = resolved.param("app") else {
            controller.phase = Phase::Idle;
            return (controller, Vec::new());
        };
        controller.phase = Phase::Activating;

        let endpoint = api.app(app_id);
        let app_tx = tx.clone();
        let fetch = runtime.spawn(async move {
            if let Some(app) = endpoint.get().await {
                let _ = app_tx.send(AppEvent::AppLoaded { generation, app });
            }
        });

        (controller, vec![fetch.abort_handle()])
    }

    pub fn on_app(&mut self, app: Application) {
        self.vm = AppViewModel { app };
        self.phase = Phase::Populated;
        self.selected = self.selected.min(self.vm.app.tasks.len().saturating_sub(1));
    }

    /// Index addressing the selected task in the task-detail endpoint.
    pub fn selected_task_index(&self) -> Option<&str> {
        self.vm.app.tasks.get(self.selected).map(|task| task.index())
    }

    pub fn select_next(&mut self) {
        let len = self.vm.app.tasks.len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame<'_>, area: Rect, controller: &AppController) {
    let regions = Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).split(area);
    let app = &controller.vm.app;

    let label = Style::default().fg(DIM_TEXT);
    let value = Style::default().fg(HEADER_TEXT);
    let summary = vec![
        Line::from(vec![
            Span::styled("id       ", label),
            Span::styled(or_dash(&app.id).to_string(), value),
            Span::styled("   name ", label),
            Span::styled(or_dash(&app.name).to_string(), value),
            Span::styled("   alias ", label),
            Span::styled(or_dash(&app.alias).to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("user     ", label),
            Span::styled(or_dash(&app.run_as).to_string(), value),
            Span::styled("   cluster ", label),
            Span::styled(or_dash(&app.cluster).to_string(), value),
            Span::styled("   priority ", label),
            Span::styled(app.priority.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("status   ", label),
            Span::styled(or_dash(&app.status).to_string(), value),
            Span::styled("   op ", label),
            Span::styled(or_dash(&app.op_status).to_string(), value),
            Span::styled("   versions ", label),
            Span::styled(app.current_version.join(", "), value),
        ]),
        Line::from(vec![
            Span::styled("tasks    ", label),
            Span::styled(app.tasks.len().to_string(), value),
        ]),
    ];

    let summary_widget = Paragraph::new(summary).block(
        Block::default()
            .title(Span::styled(
                format!(" application ({}) ", controller.phase.label()),
                Style::default().fg(ACCENT),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    );
    frame.render_widget(summary_widget, regions[0]);

    let header = Row::new(
        ["idx", "id", "name", "ip", "ports", "agent", "status", "healthy", "weight"]
            .into_iter()
            .map(|title| Cell::from(Span::styled(title, label))),
    );

    let rows: Vec<Row> = app
        .tasks
        .iter()
        .map(|task| {
            Row::new(vec![
                Cell::from(task.index().to_string()),
                Cell::from(or_dash(&task.id).to_string()),
                Cell::from(or_dash(&task.name).to_string()),
                Cell::from(or_dash(&task.ip).to_string()),
                Cell::from(format::ports(&task.ports)),
                Cell::from(or_dash(&task.agent_id).to_string()),
                Cell::from(or_dash(&task.status).to_string()),
                Cell::from(or_dash(&task.healthy).to_string()),
                Cell::from(format!("{:.1}", task.weight)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Min(14),
        Constraint::Min(12),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Min(9),
        Constraint::Min(8),
        Constraint::Length(7),
    ];

    let tasks_widget = Table::new(rows, widths)
        .header(header)
        .style(value)
        .block(
            Block::default()
                .title(Span::styled(" tasks ", Style::default().fg(ACCENT)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
        .row_highlight_style(
            Style::default()
                .bg(ACTIVE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if !app.tasks.is_empty() {
        state.select(Some(controller.selected));
    }
    frame.render_stateful_widget(tasks_widget, regions[1], &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Task;
    use crate::notify::NotificationBuffer;
    use crate::route::{Location, RouteTable};
    use std::sync::Arc;

    #[test]
    fn on_app_replaces_model_wholesale() {
        let mut controller = AppController::new();
        controller.on_app(Application {
            id: "web".to_string(),
            tasks: vec![
                Task {
                    name: "0.web.alice".to_string(),
                    ..Task::default()
                },
                Task {
                    name: "1.web.alice".to_string(),
                    ..Task::default()
                },
            ],
            ..Application::default()
        });
        assert_eq!(controller.phase, Phase::Populated);
        assert_eq!(controller.selected_task_index(), Some("0"));
        controller.select_next();
        assert_eq!(controller.selected_task_index(), Some("1"));
    }

    #[test]
    fn missing_app_param_means_idle() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let routes = RouteTable::new();
        let resolved = routes.resolve(&Location::parse("/app?cluster=dev&user=alice"));
        let api = ApiClient::new("http://host:1", Arc::new(NotificationBuffer::new(4)));
        let (tx, _rx) = std::sync::mpsc::channel();

        let (controller, handles) =
            AppController::activate(&resolved, &api, runtime.handle(), &tx, 1);
        assert_eq!(controller.phase, Phase::Idle);
        assert!(handles.is_empty());
    }
}
