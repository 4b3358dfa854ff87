//! 请求体提取器

use axum::extract::{FromRequest, Request};
use axum::Json;
use cuba_errors::AppError;
use serde::de::DeserializeOwned;

/// JSON 请求体
///
/// 与 `axum::Json` 相同，但解析失败时返回 Problem Details 格式的校验错误。
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::validation(rejection.body_text())),
        }
    }
}
