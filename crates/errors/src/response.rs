//! HTTP 响应映射

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::AppError;

/// Problem Details 的媒体类型
pub const PROBLEM_JSON: &str = "application/problem+json";

/// 请求告警信息
///
/// `BadRequestAlert` 渲染成响应时作为响应扩展附带，服务可据此补充带应用名的告警头。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureAlert {
    pub entity_name: String,
    pub error_key: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self.to_problem_details())).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_JSON),
        );
        if let AppError::BadRequestAlert {
            entity_name,
            error_key,
            ..
        } = self
        {
            response.extensions_mut().insert(FailureAlert {
                entity_name,
                error_key,
            });
        }
        response
    }
}
