use crate::error::AppError;
use axum::{
    Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use serde::de::DeserializeOwned;
use std::net::SocketAddr;

/// Logs who called what before the request reaches its handler.
pub async fn log_request(request: Request, next: Next) -> Response {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.to_string());

    tracing::info!(
        remote_addr = %remote_addr,
        method = %request.method(),
        path = %request.uri().path(),
        "Incoming request"
    );

    next.run(request).await
}

/// JSON body extractor that reports every rejection as a 400 with the
/// standard error body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
                Err(AppError::BadRequest("invalid request payload".into()))
            }
        }
    }
}

/// Path extractor for the user id segment; any rejection, such as a segment
/// that is not valid UTF-8 once percent-decoded, becomes a 400 with the
/// standard error body.
#[derive(Debug)]
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected path parameter");
                Err(AppError::BadRequest("invalid user id".into()))
            }
        }
    }
}
