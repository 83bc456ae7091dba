use axum::extract::{Json, Query, State};

use crate::api::handlers;
use crate::api::handlers::plan::{CopyWeek, DayRef, PlanOverview, PlanQuery, SaveDay, SuggestionQuery};
use crate::api::util::prelude::*;
use crate::api::AppState;
use crate::backend::model::WeekPlan;

pub async fn get(
	State(AppState { backend, timezone }): State<AppState>,
	Query(q): Query<PlanQuery>,
) -> WebResult<PlanOverview, &'static str> {
	Ok(handlers::plan::get(&backend, timezone, q).await??.into())
}

pub async fn save_day(
	State(AppState { backend, .. }): State<AppState>,
	Json(r): Json<SaveDay>,
) -> WebResult<WeekPlan, &'static str> {
	Ok(handlers::plan::save_day(&backend, r).await??.into())
}

pub async fn clear_day(
	State(AppState { backend, .. }): State<AppState>,
	Json(r): Json<DayRef>,
) -> WebResult<WeekPlan, &'static str> {
	Ok(handlers::plan::clear(&backend, r).await??.into())
}

pub async fn copy(
	State(AppState { backend, timezone }): State<AppState>,
	Json(r): Json<CopyWeek>,
) -> WebResult<WeekPlan, &'static str> {
	Ok(handlers::plan::copy(&backend, timezone, r).await??.into())
}

pub async fn suggestions(
	State(AppState { backend, .. }): State<AppState>,
	Query(q): Query<SuggestionQuery>,
) -> WebResult<Vec<String>, &'static str> {
	Ok(handlers::plan::suggestions(&backend, q).await?.into())
}
