//! bank-account Service - 银行账户 REST 服务

use std::sync::Arc;

use axum::Router;
use bank_account::api::{router, AppState};
use bank_account::application::BankAccountService;
use bank_account::infrastructure::persistence::build_repository;
use cuba_bootstrap::{run, ServiceContext};
use cuba_errors::AppResult;
use tracing::info;

async fn build_app(ctx: ServiceContext) -> AppResult<Router> {
    info!("Initializing bank-account service...");

    let repo = build_repository(&ctx.config).await?;
    let service = Arc::new(BankAccountService::new(repo));
    info!("BankAccount service initialized");

    Ok(router(AppState::new(service, &ctx.config)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config_dir = std::env::var("APP_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    run(&config_dir, build_app).await
}
