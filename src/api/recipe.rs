use axum::body::Bytes;
use axum::extract::{Json, Path, Query, State};

use crate::api::handlers;
use crate::api::handlers::recipe::{CreateRecipe, ImportUrl, RecipeQuery};
use crate::api::logic::recipe::RecipeInput;
use crate::api::util::prelude::*;
use crate::api::AppState;
use crate::backend::model::{ImportedRecipe, Recipe};

pub async fn list(
	State(AppState { backend, .. }): State<AppState>,
	Query(q): Query<RecipeQuery>,
) -> WebResult<Vec<Recipe>, &'static str> {
	Ok(handlers::recipe::list(&backend, q).await?.into())
}

pub async fn get(
	State(AppState { backend, .. }): State<AppState>,
	Path(id): Path<String>,
) -> WebResult<Recipe, &'static str> {
	Ok(handlers::recipe::get(&backend, &id).await??.into())
}

pub async fn create(
	State(AppState { backend, .. }): State<AppState>,
	Json(r): Json<CreateRecipe>,
) -> WebResult<Recipe, &'static str> {
	Ok(WebOk::created(handlers::recipe::create(&backend, r).await??))
}

pub async fn update(
	State(AppState { backend, .. }): State<AppState>,
	Path(id): Path<String>,
	Json(r): Json<RecipeInput>,
) -> WebResult<Recipe, &'static str> {
	Ok(handlers::recipe::update(&backend, &id, r).await??.into())
}

pub async fn delete(
	State(AppState { backend, .. }): State<AppState>,
	Path(id): Path<String>,
) -> WebResult<&'static str, &'static str> {
	handlers::recipe::delete(&backend, &id).await?;

	Ok("deleted recipe".into())
}

pub async fn import_url(
	State(AppState { backend, .. }): State<AppState>,
	Json(r): Json<ImportUrl>,
) -> WebResult<ImportedRecipe, String> {
	Ok(handlers::recipe::import_url(&backend, r).await??.into())
}

pub async fn import_image(
	State(AppState { backend, .. }): State<AppState>,
	image: Bytes,
) -> WebResult<ImportedRecipe, String> {
	Ok(handlers::recipe::import_image(&backend, image).await??.into())
}
