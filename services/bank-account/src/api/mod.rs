//! API 层

pub mod dto;
mod extract;
pub mod headers;
mod health;
mod rest;

pub use rest::BASE_PATH;

use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use cuba_config::{AppConfig, PaginationConfig};

use crate::application::BankAccountService;

/// 健康检查路径
pub const HEALTH_PATH: &str = "/management/health";

/// 处理器共享状态
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BankAccountService>,
    pub app_name: String,
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(service: Arc<BankAccountService>, config: &AppConfig) -> Self {
        Self {
            service,
            app_name: config.app_name.clone(),
            pagination: config.pagination.clone(),
        }
    }
}

/// 构建服务路由
pub fn router(state: AppState) -> Router {
    let app_name = state.app_name.clone();

    Router::new()
        .route(
            BASE_PATH,
            get(rest::list_bank_accounts).post(rest::create_bank_account),
        )
        .route(
            &format!("{}/{{id}}", BASE_PATH),
            get(rest::get_bank_account)
                .put(rest::update_bank_account)
                .patch(rest::partial_update_bank_account)
                .delete(rest::delete_bank_account),
        )
        .route(HEALTH_PATH, get(health::health))
        .with_state(state)
        .layer(middleware::map_response_with_state(
            app_name,
            headers::add_failure_alert_headers,
        ))
}
