//! Cluster overview: `/stats` plus the `/events` push channel.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use std::sync::mpsc::Sender;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::api::stream;
use crate::api::types::Stats;
use crate::api::ApiClient;
use crate::ui::events::AppEvent;
use crate::ui::format;
use crate::ui::layout::split_panels;
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, DIM_TEXT, GLOBAL_BORDER, HEADER_TEXT};
use crate::ui::views::Phase;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterViewModel {
    pub stats: Stats,
}

pub struct ClusterController {
    pub phase: Phase,
    pub vm: ClusterViewModel,
    selected: usize,
}

impl ClusterController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Created,
            vm: ClusterViewModel::default(),
            selected: 0,
        }
    }

    /// The cluster screen has no required params: it always fetches stats
    /// and opens the event stream.
    pub fn activate(
        api: &ApiClient,
        runtime: &Handle,
        tx: &Sender<AppEvent>,
        generation: u64,
    ) -> (Self, Vec<AbortHandle>) {
        let mut controller = Self::new();
        controller.phase = Phase::Activating;

        let endpoint = api.stats();
        let stats_tx = tx.clone();
        let fetch = runtime.spawn(async move {
            if let Some(stats) = endpoint.get().await {
                let _ = stats_tx.send(AppEvent::StatsLoaded { generation, stats });
            }
        });

        let stream_api = api.clone();
        let stream_tx = tx.clone();
        let events = runtime.spawn(async move {
            stream::read_events(stream_api, |event| {
                let _ = stream_tx.send(AppEvent::Stream { generation, event });
            })
            .await;
        });

        (controller, vec![fetch.abort_handle(), events.abort_handle()])
    }

    /// Wholesale replacement of the view-model.
    pub fn on_stats(&mut self, stats: Stats) {
        self.vm = ClusterViewModel { stats };
        self.phase = Phase::Populated;
        self.selected = self
            .selected
            .min(self.vm.stats.app_stats.len().saturating_sub(1));
    }

    /// Per-user app counts, sorted by user name.
    pub fn users(&self) -> Vec<(&str, i64)> {
        self.vm
            .stats
            .app_stats
            .iter()
            .map(|(user, count)| (user.as_str(), *count))
            .collect()
    }

    pub fn selected_user(&self) -> Option<&str> {
        self.users().get(self.selected).map(|(user, _)| *user)
    }

    pub fn select_next(&mut self) {
        let len = self.vm.stats.app_stats.len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

impl Default for ClusterController {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame<'_>, area: Rect, controller: &ClusterController) {
    let (stats_area, users_area) = split_panels(area);
    let stats = &controller.vm.stats;

    let label = Style::default().fg(DIM_TEXT);
    let value = Style::default().fg(HEADER_TEXT);
    let row = |name: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{name:<16}"), label),
            Span::styled(text, value),
        ])
    };

    let lines = vec![
        row("cluster", format::or_dash(&stats.cluster_id).to_string()),
        row("master", format::or_dash(&stats.master).to_string()),
        row("slaves", format::or_dash(&stats.slaves).to_string()),
        row("up", format::age(stats.created)),
        row("attributes", stats.attributes.len().to_string()),
        Line::default(),
        row("apps", stats.app_count.to_string()),
        row("tasks", stats.task_count.to_string()),
        Line::default(),
        row(
            "cpu",
            format!(
                "{} total / {} offered / {} used",
                format::cpus(stats.total_cpu),
                format::cpus(stats.cpu_total_offered),
                format::cpus(stats.cpu_total_used)
            ),
        ),
        row(
            "mem",
            format!(
                "{} total / {} offered / {} used",
                format::mem(stats.total_mem),
                format::mem(stats.mem_total_offered),
                format::mem(stats.mem_total_used)
            ),
        ),
        row(
            "disk",
            format!(
                "{} total / {} offered / {} used",
                format::mem(stats.total_disk),
                format::mem(stats.disk_total_offered),
                format::mem(stats.disk_total_used)
            ),
        ),
    ];

    let stats_widget = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                format!(" cluster ({}) ", controller.phase.label()),
                Style::default().fg(ACCENT),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    );
    frame.render_widget(stats_widget, stats_area);

    let items: Vec<ListItem> = controller
        .users()
        .into_iter()
        .map(|(user, count)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{user:<24}"), value),
                Span::styled(format!("{count} apps"), label),
            ]))
        })
        .collect();

    let users_widget = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(" users ", Style::default().fg(ACCENT)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
        .highlight_style(
            Style::default()
                .bg(ACTIVE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !controller.vm.stats.app_stats.is_empty() {
        state.select(Some(controller.selected));
    }
    frame.render_stateful_widget(users_widget, users_area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn populated() -> ClusterController {
        let mut controller = ClusterController::new();
        let mut app_stats = BTreeMap::new();
        app_stats.insert("alice".to_string(), 1);
        app_stats.insert("group1".to_string(), 2);
        controller.on_stats(Stats {
            app_stats,
            ..Stats::default()
        });
        controller
    }

    #[test]
    fn on_stats_replaces_model_and_marks_populated() {
        let controller = populated();
        assert_eq!(controller.phase, Phase::Populated);
        assert_eq!(controller.vm.stats.app_stats.len(), 2);
    }

    #[test]
    fn selection_is_clamped_and_sorted() {
        let mut controller = populated();
        assert_eq!(controller.selected_user(), Some("alice"));
        controller.select_next();
        assert_eq!(controller.selected_user(), Some("group1"));
        controller.select_next();
        assert_eq!(controller.selected_user(), Some("group1"));
        controller.select_prev();
        assert_eq!(controller.selected_user(), Some("alice"));
    }

    #[test]
    fn empty_model_has_no_selection() {
        let controller = ClusterController::new();
        assert_eq!(controller.phase, Phase::Created);
        assert_eq!(controller.selected_user(), None);
    }
}
