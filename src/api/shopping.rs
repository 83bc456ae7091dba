use axum::extract::{Json, Path, Query, State};

use crate::api::handlers;
use crate::api::handlers::shopping::{AddIngredients, AddItem, SetChecked, ShoppingQuery};
use crate::api::logic::shopping::ShoppingList;
use crate::api::util::prelude::*;
use crate::api::AppState;
use crate::backend::model::ShoppingItem;

pub async fn list(
	State(AppState { backend, .. }): State<AppState>,
	Query(q): Query<ShoppingQuery>,
) -> WebResult<ShoppingList, &'static str> {
	Ok(handlers::shopping::list(&backend, q).await??.into())
}

pub async fn add(
	State(AppState { backend, .. }): State<AppState>,
	Json(r): Json<AddItem>,
) -> WebResult<ShoppingItem, &'static str> {
	Ok(WebOk::created(handlers::shopping::add(&backend, r).await??))
}

pub async fn set_checked(
	State(AppState { backend, .. }): State<AppState>,
	Path(id): Path<String>,
	Json(r): Json<SetChecked>,
) -> WebResult<ShoppingItem, &'static str> {
	Ok(handlers::shopping::set_checked(&backend, &id, r).await?.into())
}

pub async fn delete(
	State(AppState { backend, .. }): State<AppState>,
	Path(id): Path<String>,
) -> WebResult<&'static str, &'static str> {
	handlers::shopping::delete(&backend, &id).await?;

	Ok("deleted item".into())
}

pub async fn add_ingredients(
	State(AppState { backend, .. }): State<AppState>,
	Json(r): Json<AddIngredients>,
) -> WebResult<usize, &'static str> {
	Ok(handlers::shopping::add_ingredients(&backend, r).await??.into())
}
