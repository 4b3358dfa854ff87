//! 银行账户 REST 处理器

use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cuba_common::{Pagination, Sort};
use cuba_config::PaginationConfig;
use cuba_errors::{AppError, AppResult};
use tracing::debug;
use url::form_urlencoded;

use crate::domain::entities::BankAccount;
use crate::domain::value_objects::BankAccountId;

use super::dto::BankAccountDto;
use super::extract::ApiJson;
use super::headers::{
    creation_alert, deletion_alert, pagination_headers, update_alert, ENTITY_NAME,
};
use super::AppState;

pub const BASE_PATH: &str = "/api/bank-accounts";

fn parse_id(raw: &str) -> AppResult<BankAccountId> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid BankAccount id: {}", raw)))
}

fn parse_number(name: &str, value: &str) -> AppResult<u32> {
    value
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid {} parameter: {}", name, value)))
}

/// 解析 `page`（从 0 开始）、`size`、可重复的 `sort` 查询参数
fn parse_pagination(query: Option<&str>, config: &PaginationConfig) -> AppResult<Pagination> {
    let mut page = 0;
    let mut size = config.default_page_size;
    let mut sort = Vec::new();

    for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        match key.as_ref() {
            "page" => page = parse_number("page", &value)?,
            "size" => size = parse_number("size", &value)?,
            "sort" => sort.push(value.parse::<Sort>().map_err(AppError::validation)?),
            _ => {}
        }
    }

    let mut pagination = Pagination::new(page.saturating_add(1), size.clamp(1, config.max_page_size));
    pagination.sort = sort;
    Ok(pagination)
}

/// 校验更新请求的 ID：请求体必须带 ID，且与路径一致，且账户存在
async fn check_target(state: &AppState, id: &BankAccountId, dto: BankAccountDto) -> AppResult<BankAccount> {
    let Some(body_id) = dto.id else {
        return Err(AppError::bad_request_alert("Invalid id", ENTITY_NAME, "idnull"));
    };
    if body_id != id.0 {
        return Err(AppError::bad_request_alert("Invalid ID", ENTITY_NAME, "idinvalid"));
    }
    if !state.service.exists(id).await? {
        return Err(AppError::bad_request_alert("Entity not found", ENTITY_NAME, "idnotfound"));
    }
    Ok(dto.into())
}

pub async fn create_bank_account(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<BankAccountDto>,
) -> AppResult<Response> {
    debug!(?dto, "REST request to save BankAccount");
    if dto.id.is_some() {
        return Err(AppError::bad_request_alert(
            "A new bankAccount cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let saved = state.service.save(dto.into()).await?;
    let id = saved
        .id()
        .copied()
        .ok_or_else(|| AppError::internal("Saved BankAccount has no id"))?;

    let mut headers = creation_alert(&state.app_name, &id.to_string());
    let location = HeaderValue::from_str(&format!("{}/{}", BASE_PATH, id))
        .map_err(|e| AppError::internal(e.to_string()))?;
    headers.insert(header::LOCATION, location);

    Ok((StatusCode::CREATED, headers, Json(BankAccountDto::from(saved))).into_response())
}

pub async fn update_bank_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<BankAccountDto>,
) -> AppResult<Response> {
    debug!(%id, ?dto, "REST request to update BankAccount");
    let id = parse_id(&id)?;
    let account = check_target(&state, &id, dto).await?;

    let saved = state.service.update(account).await?;
    Ok((
        update_alert(&state.app_name, &id.to_string()),
        Json(BankAccountDto::from(saved)),
    )
        .into_response())
}

/// PATCH 同时接受 `application/json` 与 `application/merge-patch+json`
pub async fn partial_update_bank_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<BankAccountDto>,
) -> AppResult<Response> {
    debug!(%id, ?dto, "REST request to partially update BankAccount");
    let id = parse_id(&id)?;
    let patch = check_target(&state, &id, dto).await?;

    match state.service.partial_update(patch).await? {
        Some(saved) => Ok((
            update_alert(&state.app_name, &id.to_string()),
            Json(BankAccountDto::from(saved)),
        )
            .into_response()),
        None => Err(AppError::not_found(format!("BankAccount {}", id))),
    }
}

pub async fn list_bank_accounts(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    let pagination = parse_pagination(query.as_deref(), &state.pagination)?;
    debug!(
        page = pagination.page,
        size = pagination.page_size,
        "REST request to get a page of BankAccounts"
    );

    let page = state.service.find_all(&pagination).await?;
    let headers = pagination_headers(BASE_PATH, &pagination.sort, &page);
    let body: Vec<BankAccountDto> = page.items.into_iter().map(BankAccountDto::from).collect();

    Ok((headers, Json(body)).into_response())
}

pub async fn get_bank_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    debug!(%id, "REST request to get BankAccount");
    let id = parse_id(&id)?;

    state
        .service
        .find_one(&id)
        .await?
        .map(|account| Json(BankAccountDto::from(account)).into_response())
        .ok_or_else(|| AppError::not_found(format!("BankAccount {}", id)))
}

pub async fn delete_bank_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    debug!(%id, "REST request to delete BankAccount");
    let id = parse_id(&id)?;

    state.service.delete(&id).await?;
    Ok((
        StatusCode::NO_CONTENT,
        deletion_alert(&state.app_name, &id.to_string()),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuba_common::SortDirection;

    fn config() -> PaginationConfig {
        PaginationConfig {
            default_page_size: 20,
            max_page_size: 100,
        }
    }

    #[test]
    fn test_parse_pagination_defaults() {
        let pagination = parse_pagination(None, &config()).unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.page_size, 20);
        assert!(pagination.sort.is_empty());
    }

    #[test]
    fn test_parse_pagination_zero_based_page_and_repeated_sort() {
        let pagination =
            parse_pagination(Some("page=2&size=5&sort=balance,desc&sort=id"), &config()).unwrap();
        assert_eq!(pagination.page, 3);
        assert_eq!(pagination.page_size, 5);
        assert_eq!(pagination.sort.len(), 2);
        assert_eq!(pagination.sort[0].direction, SortDirection::Desc);
        assert_eq!(pagination.sort[1], Sort::asc("id"));
    }

    #[test]
    fn test_parse_pagination_clamps_size() {
        let pagination = parse_pagination(Some("size=5000"), &config()).unwrap();
        assert_eq!(pagination.page_size, 100);

        let pagination = parse_pagination(Some("size=0"), &config()).unwrap();
        assert_eq!(pagination.page_size, 1);
    }

    #[test]
    fn test_parse_pagination_rejects_garbage() {
        assert!(parse_pagination(Some("page=-1"), &config()).is_err());
        assert!(parse_pagination(Some("sort=balance,sideways"), &config()).is_err());
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("not-a-uuid").is_err());
        let id = BankAccountId::new();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
