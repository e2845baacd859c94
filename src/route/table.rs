//! The fixed view-state tree.
//!
//! Query parameter names cascade from ancestors to descendants; each name is
//! declared at exactly one level. `home` is abstract and never matched
//! directly.

use crate::route::{StateNode, ViewKind};

/// State resolved when a location matches nothing.
pub const DEFAULT_STATE: &str = "home.cluster";

pub(crate) const NODES: &[StateNode] = &[
    StateNode {
        id: "home",
        parent: None,
        path: None,
        query_params: &[],
        view: None,
    },
    StateNode {
        id: "home.cluster",
        parent: Some("home"),
        path: Some("/cluster"),
        query_params: &[],
        view: Some(ViewKind::Cluster),
    },
    StateNode {
        id: "home.user",
        parent: Some("home.cluster"),
        path: Some("/user"),
        query_params: &["cluster", "user"],
        view: Some(ViewKind::User),
    },
    StateNode {
        id: "home.app",
        parent: Some("home.user"),
        path: Some("/app"),
        query_params: &["app"],
        view: Some(ViewKind::App),
    },
    StateNode {
        id: "home.task",
        parent: Some("home.app"),
        path: Some("/task"),
        query_params: &["task"],
        view: Some(ViewKind::Task),
    },
];
