//! Typed handles for the scheduler's REST surface.

use std::sync::Arc;

use crate::api::interceptor::{FetchError, Http};
use crate::api::resource::{Endpoint, Resource};
use crate::api::types::{Application, Stats, Task};
use crate::notify::Notify;

const STATS: &str = "/stats";
const APPS: &str = "/v1/apps/:appId";
const TASKS: &str = "/v1/apps/:appId/tasks/:taskIndex";
const EVENTS: &str = "/events";

/// One client per process; cheap to clone into fetch tasks.
#[derive(Clone)]
pub struct ApiClient {
    http: Http,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, notify: Arc<dyn Notify>) -> Self {
        Self {
            http: Http::new(base, notify),
        }
    }

    pub fn base(&self) -> &str {
        self.http.base()
    }

    pub fn stats(&self) -> Endpoint<Stats> {
        Resource::new(self.base(), STATS).endpoint(self.http.clone())
    }

    /// Applications owned by `run_as`, via the backend's field filter.
    pub fn apps(&self, run_as: &str) -> Endpoint<Application> {
        Resource::new(self.base(), APPS)
            .query_param("fields", format!("runAs=={run_as}"))
            .endpoint(self.http.clone())
    }

    pub fn app(&self, app_id: &str) -> Endpoint<Application> {
        Resource::new(self.base(), APPS)
            .path_param("appId", app_id)
            .endpoint(self.http.clone())
    }

    pub fn task(&self, app_id: &str, task_index: &str) -> Endpoint<Task> {
        Resource::new(self.base(), TASKS)
            .path_param("appId", app_id)
            .path_param("taskIndex", task_index)
            .endpoint(self.http.clone())
    }

    /// Opens the long-lived `/events` push channel. Open failures go
    /// through the same interception path as any other call.
    pub(crate) async fn open_events(&self) -> Result<reqwest::Response, FetchError> {
        let url = Resource::new(self.base(), EVENTS).url();
        self.http.get_stream(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationBuffer;

    fn client() -> ApiClient {
        ApiClient::new(
            "http://host:1",
            Arc::new(NotificationBuffer::new(8)),
        )
    }

    #[test]
    fn endpoints_render_expected_urls() {
        let api = client();
        assert_eq!(api.stats().url(), "http://host:1/stats");
        assert_eq!(
            api.apps("alice").url(),
            "http://host:1/v1/apps?fields=runAs==alice"
        );
        assert_eq!(api.app("web").url(), "http://host:1/v1/apps/web");
        assert_eq!(
            api.task("web", "3").url(),
            "http://host:1/v1/apps/web/tasks/3"
        );
    }
}
