//! telemetry - 可观测性库

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// 初始化 tracing
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// 初始化 Prometheus metrics，返回用于渲染抓取内容的句柄
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// 组件状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Up,
    Down,
}

impl Status {
    fn from_healthy(healthy: bool) -> Self {
        if healthy { Status::Up } else { Status::Down }
    }
}

/// 健康检查状态
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Status,
    pub components: Vec<HealthCheck>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn new() -> Self {
        Self {
            status: Status::Up,
            components: Vec::new(),
        }
    }

    pub fn add_check(&mut self, name: impl Into<String>, healthy: bool, message: Option<String>) {
        if !healthy {
            self.status = Status::Down;
        }
        self.components.push(HealthCheck {
            name: name.into(),
            status: Status::from_healthy(healthy),
            message,
        });
    }

    pub fn is_healthy(&self) -> bool {
        self.status == Status::Up
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_goes_down_on_failed_check() {
        let mut health = HealthStatus::new();
        health.add_check("store", true, None);
        assert!(health.is_healthy());

        health.add_check("db", false, Some("connection refused".to_string()));
        assert!(!health.is_healthy());

        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["status"], "DOWN");
        assert_eq!(json["components"][0]["status"], "UP");
        assert!(json["components"][0].get("message").is_none());
        assert_eq!(json["components"][1]["message"], "connection refused");
    }
}
