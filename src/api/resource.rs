//! REST resource construction.
//!
//! A [`Resource`] turns a path template with `:name` placeholders into a
//! concrete URL. Placeholders without a supplied value drop their segment
//! entirely, so one template serves both collection and item endpoints
//! (`/v1/apps/:appId` without `appId` is `/v1/apps`).

use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::api::interceptor::Http;

/// A parameterized endpoint descriptor. Built per call site and consumed
/// immediately; never retained.
pub struct Resource {
    base: String,
    template: String,
    path_params: Vec<(String, String)>,
    query_params: Vec<(String, String)>,
}

impl Resource {
    pub fn new(base: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            template: template.into(),
            path_params: Vec::new(),
            query_params: Vec::new(),
        }
    }

    pub fn path_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.path_params.push((name.to_string(), value.into()));
        self
    }

    pub fn query_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query_params.push((name.to_string(), value.into()));
        self
    }

    /// Renders the URL. Unfilled placeholders are omitted rather than
    /// rejected; query params append in insertion order.
    pub fn url(&self) -> String {
        let mut url = self.base.trim_end_matches('/').to_string();

        for segment in self.template.split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix(':') {
                Some(name) => {
                    if let Some((_, value)) =
                        self.path_params.iter().find(|(n, _)| n == name)
                    {
                        url.push('/');
                        url.push_str(value);
                    }
                }
                None => {
                    url.push('/');
                    url.push_str(segment);
                }
            }
        }

        for (i, (name, value)) in self.query_params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(name);
            url.push('=');
            url.push_str(value);
        }

        url
    }

    pub(crate) fn endpoint<T>(self, http: Http) -> Endpoint<T> {
        Endpoint {
            http,
            url: self.url(),
            _payload: PhantomData,
        }
    }
}

/// A callable endpoint typed by its payload.
///
/// Failures never reach the caller as a second signal: the interception
/// layer has already notified, and `get`/`query` simply return `None`.
/// Calls are independent; identical concurrent requests are not coalesced.
pub struct Endpoint<T> {
    http: Http,
    url: String,
    _payload: PhantomData<T>,
}

impl<T: DeserializeOwned> Endpoint<T> {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Single-entity fetch. `Some` exactly once on a decodable 2xx body.
    pub async fn get(&self) -> Option<T> {
        self.http.get_json::<T>(&self.url).await.ok()
    }

    /// Collection fetch, same semantics with an ordered payload.
    pub async fn query(&self) -> Option<Vec<T>> {
        self.http.get_json::<Vec<T>>(&self.url).await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_path_params() {
        let url = Resource::new("http://host:1/", "/v1/apps/:appId/tasks/:taskIndex")
            .path_param("appId", "web")
            .path_param("taskIndex", "3")
            .url();
        assert_eq!(url, "http://host:1/v1/apps/web/tasks/3");
    }

    #[test]
    fn round_trips_a_path_param() {
        let value = "app-42";
        let url = Resource::new("http://host:1", "/v1/apps/:appId")
            .path_param("appId", value)
            .url();
        let extracted = url.rsplit('/').next().unwrap();
        assert_eq!(extracted, value);
    }

    #[test]
    fn omitted_param_drops_its_segment() {
        let url = Resource::new("http://host:1", "/v1/apps/:appId").url();
        assert_eq!(url, "http://host:1/v1/apps");
    }

    #[test]
    fn omitted_middle_param_collapses_slashes() {
        let url = Resource::new("http://host:1", "/v1/apps/:appId/tasks/:taskIndex")
            .path_param("taskIndex", "3")
            .url();
        assert_eq!(url, "http://host:1/v1/apps/tasks/3");
    }

    #[test]
    fn query_params_append_in_order() {
        let url = Resource::new("http://host:1", "/v1/apps/:appId")
            .query_param("fields", "runAs==alice")
            .query_param("limit", "10")
            .url();
        assert_eq!(url, "http://host:1/v1/apps?fields=runAs==alice&limit=10");
    }
}
