use axum::extract::{Query, State};

use crate::api::handlers;
use crate::api::handlers::week::{NavigateQuery, WeekQuery, WeekView};
use crate::api::util::prelude::*;
use crate::api::AppState;
use crate::calendar;

#[allow(clippy::unused_async)]
pub async fn current(State(AppState { timezone, .. }): State<AppState>) -> WebResult<WeekView, &'static str> {
	Ok(handlers::week::current(timezone)?.into())
}

#[allow(clippy::unused_async)]
pub async fn view(
	State(AppState { timezone, .. }): State<AppState>,
	Query(q): Query<WeekQuery>,
) -> WebResult<WeekView, &'static str> {
	Ok(handlers::week::view(q.into(), calendar::today(timezone))?.into())
}

#[allow(clippy::unused_async)]
pub async fn navigate(
	State(AppState { timezone, .. }): State<AppState>,
	Query(q): Query<NavigateQuery>,
) -> WebResult<WeekView, &'static str> {
	Ok(handlers::week::navigate(q, calendar::today(timezone))?.into())
}
