use axum::extract::State;

use crate::api::handlers;
use crate::api::util::prelude::*;
use crate::api::AppState;

pub async fn health_check(
	State(AppState { backend, .. }): State<AppState>,
) -> WebResult<&'static str, &'static str> {
	Ok(handlers::health::health_check(&backend).await?.into())
}
