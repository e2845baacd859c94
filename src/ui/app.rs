//! Application state: the current location, its resolved view-state, and
//! the active controller.
//!
//! Navigation always goes through the route table; a state transition
//! discards the previous controller, aborts its outstanding requests, and
//! bumps the activation generation so any completion that already escaped
//! the abort is recognized as stale and dropped instead of writing into
//! the new view-model.

use std::collections::BTreeMap;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::api::stream::StreamEvent;
use crate::api::ApiClient;
use crate::notify::NotificationBuffer;
use crate::route::{Location, ResolvedState, RouteTable, ViewKind};
use crate::ui::events::AppEvent;
use crate::ui::views::app::AppController;
use crate::ui::views::cluster::ClusterController;
use crate::ui::views::task::TaskController;
use crate::ui::views::user::UserController;

const STREAM_PREVIEW_CHARS: usize = 120;

/// The controller/view pair for the current state. Exactly one exists at a
/// time; transitions replace it wholesale.
pub enum ActiveView {
    Cluster(ClusterController),
    User(UserController),
    App(AppController),
    Task(TaskController),
}

/// Liveness of the `/events` push channel, surfaced in the footer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStatus {
    pub active: bool,
    pub messages: u64,
    pub last: Option<String>,
}

pub struct App {
    should_quit: bool,
    routes: RouteTable,
    api: ApiClient,
    notifications: Arc<NotificationBuffer>,
    runtime: Handle,
    tx: Sender<AppEvent>,
    generation: u64,
    location: Location,
    resolved: ResolvedState,
    view: ActiveView,
    pending: Vec<AbortHandle>,
    stream: StreamStatus,
}

impl App {
    pub fn new(
        api: ApiClient,
        notifications: Arc<NotificationBuffer>,
        runtime: Handle,
        tx: Sender<AppEvent>,
        initial: &str,
    ) -> Self {
        let routes = RouteTable::new();
        let location = Location::default();
        let resolved = routes.resolve(&location);

        let mut app = Self {
            should_quit: false,
            routes,
            api,
            notifications,
            runtime,
            tx,
            generation: 0,
            location,
            resolved,
            view: ActiveView::Cluster(ClusterController::new()),
            pending: Vec::new(),
            stream: StreamStatus::default(),
        };
        app.navigate(initial);
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn state_id(&self) -> &'static str {
        self.resolved.state
    }

    pub fn location_string(&self) -> String {
        self.location.to_string()
    }

    pub fn base(&self) -> &str {
        self.api.base()
    }

    pub fn notifications(&self) -> &NotificationBuffer {
        &self.notifications
    }

    pub fn stream(&self) -> &StreamStatus {
        &self.stream
    }

    /// Resolve a location and activate its state. The only way a view
    /// changes.
    pub fn navigate(&mut self, target: &str) {
        let location = Location::parse(target);
        let resolved = self.routes.resolve(&location);
        // the location bar reflects redirects
        let location = if resolved.redirected {
            let path = self
                .routes
                .node(resolved.state)
                .and_then(|node| node.path)
                .unwrap_or("/cluster");
            Location::parse(path)
        } else {
            location
        };

        self.generation += 1;
        for handle in self.pending.drain(..) {
            handle.abort();
        }

        tracing::info!(state = resolved.state, location = %location, "state transition");
        let (view, pending) = self.activate(&resolved);
        self.stream = StreamStatus {
            active: matches!(resolved.view, ViewKind::Cluster),
            messages: 0,
            last: None,
        };
        self.location = location;
        self.resolved = resolved;
        self.view = view;
        self.pending = pending;
    }

    /// Re-run the current location through the router.
    pub fn refresh(&mut self) {
        let target = self.location.to_string();
        self.navigate(&target);
    }

    fn activate(&self, resolved: &ResolvedState) -> (ActiveView, Vec<AbortHandle>) {
        match resolved.view {
            ViewKind::Cluster => {
                let (controller, pending) =
                    ClusterController::activate(&self.api, &self.runtime, &self.tx, self.generation);
                (ActiveView::Cluster(controller), pending)
            }
            ViewKind::User => {
                let (controller, pending) = UserController::activate(
                    resolved,
                    &self.api,
                    &self.runtime,
                    &self.tx,
                    self.generation,
                );
                (ActiveView::User(controller), pending)
            }
            ViewKind::App => {
                let (controller, pending) = AppController::activate(
                    resolved,
                    &self.api,
                    &self.runtime,
                    &self.tx,
                    self.generation,
                );
                (ActiveView::App(controller), pending)
            }
            ViewKind::Task => {
                let (controller, pending) = TaskController::activate(
                    resolved,
                    &self.api,
                    &self.runtime,
                    &self.tx,
                    self.generation,
                );
                (ActiveView::Task(controller), pending)
            }
        }
    }

    /// Fetch completions and stream traffic. Input, ticks, and resizes are
    /// handled by the runtime loop.
    pub fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(_) | AppEvent::Tick | AppEvent::Resize(_, _) => {}
            AppEvent::StatsLoaded { generation, stats } => {
                if self.current(generation) {
                    if let ActiveView::Cluster(controller) = &mut self.view {
                        controller.on_stats(stats);
                    }
                }
            }
            AppEvent::AppsLoaded { generation, apps } => {
                if self.current(generation) {
                    if let ActiveView::User(controller) = &mut self.view {
                        controller.on_apps(apps);
                    }
                }
            }
            AppEvent::AppLoaded { generation, app } => {
                if self.current(generation) {
                    if let ActiveView::App(controller) = &mut self.view {
                        controller.on_app(app);
                    }
                }
            }
            AppEvent::TaskLoaded { generation, task } => {
                if self.current(generation) {
                    if let ActiveView::Task(controller) = &mut self.view {
                        controller.on_task(task);
                    }
                }
            }
            AppEvent::Stream { generation, event } => {
                if self.current(generation) {
                    match event {
                        StreamEvent::Message(message) => {
                            self.stream.messages += 1;
                            let mut preview = message;
                            if preview.chars().count() > STREAM_PREVIEW_CHARS {
                                preview = preview.chars().take(STREAM_PREVIEW_CHARS).collect();
                            }
                            self.stream.last = Some(preview);
                        }
                        StreamEvent::Closed => {
                            self.stream.active = false;
                        }
                    }
                }
            }
        }
    }

    fn current(&self, generation: u64) -> bool {
        if generation == self.generation {
            true
        } else {
            tracing::debug!(generation, "dropping completion from a discarded view");
            false
        }
    }

    pub fn select_next(&mut self) {
        match &mut self.view {
            ActiveView::Cluster(controller) => controller.select_next(),
            ActiveView::User(controller) => controller.select_next(),
            ActiveView::App(controller) => controller.select_next(),
            ActiveView::Task(_) => {}
        }
    }

    pub fn select_prev(&mut self) {
        match &mut self.view {
            ActiveView::Cluster(controller) => controller.select_prev(),
            ActiveView::User(controller) => controller.select_prev(),
            ActiveView::App(controller) => controller.select_prev(),
            ActiveView::Task(_) => {}
        }
    }

    /// Open the selected entity's screen, carrying the inherited params
    /// forward.
    pub fn drill_down(&mut self) {
        let target = match &self.view {
            ActiveView::Cluster(controller) => controller.selected_user().map(|user| {
                let cluster = controller.vm.stats.cluster_id.clone();
                self.child_target("/user", &[("cluster", &cluster), ("user", user)])
            }),
            ActiveView::User(controller) => controller
                .selected_app()
                .map(|app| self.child_target("/app", &[("app", &app.id)])),
            ActiveView::App(controller) => controller
                .selected_task_index()
                .map(|index| self.child_target("/task", &[("task", index)])),
            ActiveView::Task(_) => None,
        };

        if let Some(target) = target {
            self.navigate(&target);
        }
    }

    /// Return to the parent state, keeping only the params it declares.
    pub fn go_up(&mut self) {
        let target = {
            let Some(parent) = self.routes.parent_of(self.resolved.state) else {
                return;
            };
            let Some(path) = parent.path else {
                return;
            };
            let names = self.routes.declared_params(parent.id);
            let query: Vec<String> = names
                .into_iter()
                .filter_map(|name| {
                    self.resolved
                        .param(name)
                        .map(|value| format!("{name}={value}"))
                })
                .collect();
            if query.is_empty() {
                path.to_string()
            } else {
                format!("{path}?{}", query.join("&"))
            }
        };
        self.navigate(&target);
    }

    fn child_target(&self, path: &str, extra: &[(&str, &str)]) -> String {
        let mut params: BTreeMap<String, String> = self.resolved.params.clone();
        for (name, value) in extra {
            params.insert((*name).to_string(), (*value).to_string());
        }
        let query: Vec<String> = params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", query.join("&"))
        }
    }
}
