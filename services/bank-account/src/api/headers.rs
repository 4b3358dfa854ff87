//! 告警头与分页头

use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::Response;
use cuba_common::{PagedResult, Sort};
use cuba_errors::FailureAlert;
use tracing::warn;
use url::form_urlencoded;

/// 对外实体名
pub const ENTITY_NAME: &str = "bankAccount";

pub const TOTAL_COUNT: &str = "x-total-count";

fn insert(headers: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => warn!(header = name, "Skipping invalid response header"),
    }
}

fn alert(app_name: &str, message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, &format!("X-{}-alert", app_name), message);
    insert(&mut headers, &format!("X-{}-params", app_name), param);
    headers
}

pub fn creation_alert(app_name: &str, param: &str) -> HeaderMap {
    alert(
        app_name,
        &format!("{}.{}.created", app_name, ENTITY_NAME),
        param,
    )
}

pub fn update_alert(app_name: &str, param: &str) -> HeaderMap {
    alert(
        app_name,
        &format!("{}.{}.updated", app_name, ENTITY_NAME),
        param,
    )
}

pub fn deletion_alert(app_name: &str, param: &str) -> HeaderMap {
    alert(
        app_name,
        &format!("{}.{}.deleted", app_name, ENTITY_NAME),
        param,
    )
}

pub fn failure_alert(app_name: &str, entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(
        &mut headers,
        &format!("X-{}-error", app_name),
        &format!("error.{}", error_key),
    );
    insert(&mut headers, &format!("X-{}-params", app_name), entity_name);
    headers
}

/// 为带 `FailureAlert` 扩展的错误响应补充告警头
pub async fn add_failure_alert_headers(
    State(app_name): State<String>,
    mut response: Response,
) -> Response {
    if let Some(alert) = response.extensions_mut().remove::<FailureAlert>() {
        let headers = failure_alert(&app_name, &alert.entity_name, &alert.error_key);
        response.headers_mut().extend(headers);
    }
    response
}

fn page_link(path: &str, page: u32, size: u32, sort: &[Sort], rel: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", &page.to_string());
    query.append_pair("size", &size.to_string());
    for s in sort {
        query.append_pair("sort", &s.to_string());
    }
    format!("<{}?{}>; rel=\"{}\"", path, query.finish(), rel)
}

/// 生成 `X-Total-Count` 与 RFC 5988 `Link` 头
///
/// 链接中的页码从 0 开始，与请求参数一致。
pub fn pagination_headers<T>(path: &str, sort: &[Sort], page: &PagedResult<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, TOTAL_COUNT, &page.total.to_string());

    let current = page.page.saturating_sub(1);
    let last = page.total_pages().saturating_sub(1);
    let size = page.page_size;

    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(page_link(path, current + 1, size, sort, "next"));
    }
    if !page.is_first() {
        links.push(page_link(path, current - 1, size, sort, "prev"));
    }
    links.push(page_link(path, last, size, sort, "last"));
    links.push(page_link(path, 0, size, sort, "first"));

    insert(&mut headers, "link", &links.join(","));
    headers
}
