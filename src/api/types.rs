//! Wire shapes for the scheduler's REST API.
//!
//! One explicit schema per endpoint, deserialized (and therefore validated)
//! at the boundary. Every field defaults so a sparse backend response still
//! decodes; the renderer never sees an absent field.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Cluster-wide stats from `GET /stats`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    #[serde(rename = "clusterID")]
    pub cluster_id: String,
    pub app_count: i64,
    pub task_count: i64,
    /// Epoch seconds the cluster came up.
    pub created: f64,
    pub master: String,
    pub slaves: String,
    pub attributes: Vec<serde_json::Value>,
    pub total_cpu: f64,
    pub total_mem: f64,
    pub total_disk: f64,
    pub cpu_total_offered: f64,
    pub mem_total_offered: f64,
    pub disk_total_offered: f64,
    pub cpu_total_used: f64,
    pub mem_total_used: f64,
    pub disk_total_used: f64,
    /// App count per owning user.
    pub app_stats: BTreeMap<String, i64>,
}

/// One application, from `GET /v1/apps` and `GET /v1/apps/:appId`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub alias: String,
    pub run_as: String,
    pub priority: i64,
    pub cluster: String,
    #[serde(rename = "operationStatus")]
    pub op_status: String,
    pub status: String,
    pub tasks: Vec<Task>,
    pub current_version: Vec<String>,
}

/// One task, from `GET /v1/apps/:appId/tasks/:taskIndex` and embedded in
/// [`Application`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub ports: Vec<u64>,
    pub healthy: String,
    pub weight: f64,
    pub agent_id: String,
    pub version: String,
    pub status: String,
    #[serde(rename = "errmsg")]
    pub err_msg: String,
    #[serde(rename = "opstatus")]
    pub op_status: String,
    #[serde(rename = "container_id")]
    pub container_id: String,
    #[serde(rename = "container_name")]
    pub container_name: String,
    pub max_retries: i64,
    pub histories: Vec<Task>,
    pub created: String,
    pub updated: String,
}

impl Task {
    /// Ordinal prefix of the task name (`"3.web.alice"` → `"3"`), the
    /// index the task-detail endpoint addresses.
    pub fn index(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_decodes_backend_payload() {
        let stats: Stats = serde_json::from_str(
            r#"{
                "clusterID": "dev",
                "appCount": 3,
                "taskCount": 6,
                "cpuTotalOffered": 0.06,
                "memTotalOffered": 30,
                "appStats": {"group1": 2, "alice": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(stats.cluster_id, "dev");
        assert_eq!(stats.app_count, 3);
        assert_eq!(stats.task_count, 6);
        assert_eq!(stats.app_stats.get("group1"), Some(&2));
        // absent fields fall back to defaults
        assert_eq!(stats.master, "");
        assert_eq!(stats.total_cpu, 0.0);
    }

    #[test]
    fn task_decodes_snake_and_camel_mix() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": "t-1",
                "name": "0.web.alice",
                "agentId": "agent-7",
                "errmsg": "",
                "opstatus": "noop",
                "container_id": "abc",
                "maxRetries": 3
            }"#,
        )
        .unwrap();
        assert_eq!(task.agent_id, "agent-7");
        assert_eq!(task.container_id, "abc");
        assert_eq!(task.max_retries, 3);
        assert_eq!(task.index(), "0");
    }

    #[test]
    fn task_index_handles_undotted_names() {
        let task = Task {
            name: "solo".to_string(),
            ..Task::default()
        };
        assert_eq!(task.index(), "solo");
    }
}
