use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::GateContext;
use crate::error::{Result, RoomQError};
use crate::state::AppState;

/// Gate routes
pub fn gate_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(protected_page))
        .route("/serving", get(get_serving).delete(delete_serving))
        .route("/serving/extend", post(extend_serving))
        .route("/locker", get(fetch_locker))
}

#[derive(Debug, Deserialize)]
struct ExtendQuery {
    minutes: u32,
}

#[derive(Debug, Serialize)]
pub struct ServingDeadline {
    pub deadline: i64,
}

fn require_token(state: &AppState, ctx: &GateContext) -> Result<String> {
    state
        .controller
        .current_token(ctx)
        .ok_or(RoomQError::MissingToken)
}

/// GET / - Protected page, admitted visitors only
async fn protected_page(
    State(state): State<AppState>,
    mut ctx: GateContext,
) -> Result<(GateContext, Response)> {
    let admission = state.controller.validate(&mut ctx, None, None)?;

    let response = match admission.result.redirect_url() {
        Some(url) => Redirect::to(url).into_response(),
        None => Html("<h1>You are in.</h1>").into_response(),
    };

    Ok((ctx, response))
}

/// GET /serving - Deadline of the visitor's serving slot
async fn get_serving(
    State(state): State<AppState>,
    ctx: GateContext,
) -> Result<Json<ServingDeadline>> {
    let token = require_token(&state, &ctx)?;
    let deadline = state.controller.get_serving(&token).await?;
    Ok(Json(ServingDeadline { deadline }))
}

/// POST /serving/extend?minutes=N - Extend the serving slot
async fn extend_serving(
    State(state): State<AppState>,
    Query(query): Query<ExtendQuery>,
    mut ctx: GateContext,
) -> Result<(GateContext, StatusCode)> {
    let token = require_token(&state, &ctx)?;
    state
        .controller
        .extend(&mut ctx, &token, query.minutes)
        .await?;
    Ok((ctx, StatusCode::NO_CONTENT))
}

/// DELETE /serving - Leave the serving slot
async fn delete_serving(
    State(state): State<AppState>,
    mut ctx: GateContext,
) -> Result<(GateContext, StatusCode)> {
    let token = require_token(&state, &ctx)?;
    state.controller.delete_serving(&mut ctx, &token).await?;
    Ok((ctx, StatusCode::NO_CONTENT))
}

/// GET /locker - Locker content of the visitor's session
async fn fetch_locker(State(state): State<AppState>, ctx: GateContext) -> Result<Response> {
    let (Some(api_key), Some(url)) = (
        state.config.api_key.as_deref(),
        state.config.locker_url.as_deref(),
    ) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let token = require_token(&state, &ctx)?;
    let content = state.controller.locker(api_key, url, &token).fetch().await?;
    Ok(Json(content).into_response())
}
