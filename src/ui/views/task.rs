//! Task detail.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::sync::mpsc::Sender;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::api::types::Task;
use crate::api::ApiClient;
use crate::route::ResolvedState;
use crate::ui::events::AppEvent;
use crate::ui::format::{self, or_dash};
use crate::ui::theme::{ACCENT, DIM_TEXT, GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR};
use crate::ui::views::Phase;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskViewModel {
    pub task: Task,
}

pub struct TaskController {
    pub phase: Phase,
    pub vm: TaskViewModel,
}

impl TaskController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Created,
            vm: TaskViewModel::default(),
        }
    }

    /// Requires both `app` and `task`. With either missing, no request is
    /// issued and the empty view-model stays in place.
    pub fn activate(
        resolved: &ResolvedState,
        api: &ApiClient,
        runtime: &Handle,
        tx: &Sender<AppEvent>,
        generation: u64,
    ) -> (Self, Vec<AbortHandle>) {
        let mut controller = Self::new();

        let (Some(app_id), Some(task_index)) = (resolved.param("app"), resolved.param("task"))
        else {
            controller.phase = Phase::Idle;
            return (controller, Vec::new());
        };
        controller.phase = Phase::Activating;

        let endpoint = api.task(app_id, task_index);
        let task_tx = tx.clone();
        let fetch = runtime.spawn(async move {
            if let Some(task) = endpoint.get().await {
                let _ = task_tx.send(AppEvent::TaskLoaded { generation, task });
            }
        });

        (controller, vec![fetch.abort_handle()])
    }

    pub fn on_task(&mut self, task: Task) {
        self.vm = TaskViewModel { task };
        self.phase = Phase::Populated;
    }
}

impl Default for TaskController {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame<'_>, area: Rect, controller: &TaskController) {
    let task = &controller.vm.task;
    let label = Style::default().fg(DIM_TEXT);
    let value = Style::default().fg(HEADER_TEXT);
    let row = |name: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{name:<16}"), label),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![
        row("id", or_dash(&task.id).to_string()),
        row("name", or_dash(&task.name).to_string()),
        row("ip", or_dash(&task.ip).to_string()),
        row("ports", format::ports(&task.ports)),
        row("agent", or_dash(&task.agent_id).to_string()),
        row("version", or_dash(&task.version).to_string()),
        row("status", or_dash(&task.status).to_string()),
        row("healthy", or_dash(&task.healthy).to_string()),
        row("op", or_dash(&task.op_status).to_string()),
        row("weight", format!("{:.1}", task.weight)),
        row("container", or_dash(&task.container_id).to_string()),
        row("container name", or_dash(&task.container_name).to_string()),
        row("max retries", task.max_retries.to_string()),
        row("restarts", task.histories.len().to_string()),
        row("created", or_dash(&task.created).to_string()),
        row("updated", or_dash(&task.updated).to_string()),
    ];

    if !task.err_msg.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", "error"), label),
            Span::styled(task.err_msg.clone(), Style::default().fg(STATUS_ERROR)),
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                format!(" task ({}) ", controller.phase.label()),
                Style::default().fg(ACCENT),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    );
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationBuffer;
    use crate::route::{Location, RouteTable};
    use std::sync::Arc;

    #[test]
    fn app_without_task_index_stays_idle() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let routes = RouteTable::new();
        let resolved =
            routes.resolve(&Location::parse("/task?cluster=dev&user=alice&app=web"));
        let api = ApiClient::new("http://host:1", Arc::new(NotificationBuffer::new(4)));
        let (tx, _rx) = std::sync::mpsc::channel();

        let (controller, handles) =
            TaskController::activate(&resolved, &api, runtime.handle(), &tx, 1);
        assert_eq!(controller.phase, Phase::Idle);
        assert!(handles.is_empty());
        assert_eq!(controller.vm, TaskViewModel::default());
    }

    #[test]
    fn on_task_marks_populated() {
        let mut controller = TaskController::new();
        controller.on_task(Task {
            id: "t-1".to_string(),
            ..Task::default()
        });
        assert_eq!(controller.phase, Phase::Populated);
        assert_eq!(controller.vm.task.id, "t-1");
    }
}
