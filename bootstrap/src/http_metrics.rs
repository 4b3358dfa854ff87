//! Metrics 模块
//!
//! HTTP 请求计数与耗时，以及 Prometheus 抓取端点

use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus 抓取路径
pub const PROMETHEUS_PATH: &str = "/management/prometheus";

/// 记录 HTTP 请求
pub fn record_http_request(method: &str, uri: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("uri", uri.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_server_requests_total", &labels).increment(1);
    histogram!("http_server_requests_seconds", &labels).record(duration_secs);
}

/// 请求计量中间件，按路由模板（而非实际路径）打标签
pub async fn track_http_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let uri = match req.extensions().get::<MatchedPath>() {
        Some(path) => path.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };

    let response = next.run(req).await;

    record_http_request(
        &method,
        &uri,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}

/// GET /management/prometheus
pub async fn render_metrics(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}
