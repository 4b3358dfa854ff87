//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::net::SocketAddr;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use cuba_config::AppConfig;
use cuba_errors::AppResult;
use cuba_telemetry::init_metrics;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::http_metrics::{render_metrics, track_http_metrics, PROMETHEUS_PATH};
use crate::runtime::{init_runtime, shutdown_signal};

/// 传给服务构建闭包的上下文
#[derive(Clone)]
pub struct ServiceContext {
    pub config: AppConfig,
    pub metrics: PrometheusHandle,
}

/// 为业务路由挂载公共端点与中间件
///
/// 包括 Prometheus 抓取端点、请求计量和 HTTP 访问日志。
pub fn with_common_layers(router: Router, metrics: PrometheusHandle) -> Router {
    let management = Router::new()
        .route(PROMETHEUS_PATH, get(render_metrics))
        .with_state(metrics);

    router
        .merge(management)
        .route_layer(middleware::from_fn(track_http_metrics))
        .layer(TraceLayer::new_for_http())
}

/// 运行 HTTP 服务
///
/// 这是所有服务的统一入口点。它负责：
/// 1. 加载配置
/// 2. 初始化运行时（日志）和 metrics 记录器
/// 3. 调用服务提供的闭包构建路由
/// 4. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use cuba_bootstrap::run;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run("config", |ctx| async move { Ok(my_routes(ctx)) }).await
/// }
/// ```
pub async fn run<F, Fut>(config_dir: &str, app_builder: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(ServiceContext) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    // 1. 加载配置
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);
    let metrics = init_metrics()?;

    info!("Starting {} service", config.app_name);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // 3. 构建路由
    let ctx = ServiceContext {
        config,
        metrics: metrics.clone(),
    };
    let app = with_common_layers(app_builder(ctx).await?, metrics);

    // 4. 启动服务器
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    fn app() -> Router {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let routes = Router::new().route("/ping", get(|| async { "pong" }));
        with_common_layers(routes, handle)
    }

    #[tokio::test]
    async fn test_business_routes_pass_through() {
        let response = app()
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_prometheus_endpoint_mounted() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(PROMETHEUS_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
