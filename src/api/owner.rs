use axum::extract::{Json, Query, State};

use crate::api::handlers;
use crate::api::handlers::owner::{CreateOwner, OwnerList, OwnerQuery};
use crate::api::util::prelude::*;
use crate::api::AppState;
use crate::backend::model::Owner;

pub async fn list(
	State(AppState { backend, .. }): State<AppState>,
	Query(q): Query<OwnerQuery>,
) -> WebResult<OwnerList, &'static str> {
	Ok(handlers::owner::list(&backend, q).await?.into())
}

pub async fn create(
	State(AppState { backend, .. }): State<AppState>,
	Json(r): Json<CreateOwner>,
) -> WebResult<Owner, &'static str> {
	Ok(WebOk::created(handlers::owner::create(&backend, r).await??))
}
