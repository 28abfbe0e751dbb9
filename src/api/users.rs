use crate::api::AppState;
use crate::api::middleware::{JsonBody, PathParam};
use crate::api::schemas::users::{CreateUser, User};
use crate::error::Result;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUser>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.create(payload.username, payload.password).await?;
    Ok((StatusCode::CREATED, Json(User::from(user))))
}

pub async fn get_user(State(state): State<AppState>, PathParam(id): PathParam<String>) -> Result<impl IntoResponse> {
    let user = state.user_service.get(&id).await?;
    Ok(Json(User::from(user)))
}

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_service.list().await?;
    Ok(Json(users.into_iter().map(User::from).collect::<Vec<_>>()))
}
