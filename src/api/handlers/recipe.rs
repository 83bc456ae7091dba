use axum::body::Bytes;
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::api::logic::recipe::{filter_recipes, recipe_fields, RecipeInput, RecipeInputError};
use crate::api::util::WebError;
use crate::backend::model::{ImportedRecipe, Recipe};
use crate::backend::queries::recipe::{
	delete_recipe_by_id, get_recipe_by_id, get_recipes, import_from_image, import_from_url,
	insert_recipe, update_recipe,
};
use crate::backend::{Backend, BackendError};

#[derive(Deserialize, Debug)]
pub struct RecipeQuery {
	pub owner: String,
	pub search: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateRecipe {
	pub owner: String,
	#[serde(flatten)]
	pub recipe: RecipeInput,
}

#[derive(Deserialize, Debug)]
pub struct ImportUrl {
	pub url: String,
}

pub enum RecipeError {
	NotFound,
	MissingTitle,
}

impl From<RecipeInputError> for RecipeError {
	fn from(v: RecipeInputError) -> Self {
		match v {
			RecipeInputError::MissingTitle => RecipeError::MissingTitle,
		}
	}
}

impl From<RecipeError> for WebError<&'static str> {
	fn from(v: RecipeError) -> Self {
		use RecipeError::*;
		match v {
			NotFound => (StatusCode::NOT_FOUND, "recipe not found").into(),
			MissingTitle => (StatusCode::UNPROCESSABLE_ENTITY, "title must not be empty").into(),
		}
	}
}

pub enum ImportError {
	InvalidUrl,
	EmptyImage,
	Failed(String),
}

impl From<ImportError> for WebError<String> {
	fn from(v: ImportError) -> Self {
		use ImportError::*;
		match v {
			InvalidUrl => (StatusCode::UNPROCESSABLE_ENTITY, "invalid url".to_owned()).into(),
			EmptyImage => (StatusCode::UNPROCESSABLE_ENTITY, "empty image".to_owned()).into(),
			Failed(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg).into(),
		}
	}
}

pub async fn list(backend: &Backend, q: RecipeQuery) -> anyhow::Result<Vec<Recipe>> {
	let recipes = get_recipes(backend, &q.owner).await?;

	Ok(filter_recipes(recipes, q.search.as_deref().unwrap_or_default()))
}

pub async fn get(backend: &Backend, id: &str) -> anyhow::Result<Result<Recipe, RecipeError>> {
	match get_recipe_by_id(backend, id).await? {
		Some(recipe) => Ok(Ok(recipe)),
		None => Ok(Err(RecipeError::NotFound)),
	}
}

pub async fn create(
	backend: &Backend,
	r: CreateRecipe,
) -> anyhow::Result<Result<Recipe, RecipeError>> {
	let fields = match recipe_fields(r.recipe) {
		Ok(f) => f,
		Err(e) => return Ok(Err(e.into())),
	};

	Ok(Ok(insert_recipe(backend, &r.owner, &fields).await?))
}

pub async fn update(
	backend: &Backend,
	id: &str,
	r: RecipeInput,
) -> anyhow::Result<Result<Recipe, RecipeError>> {
	let fields = match recipe_fields(r) {
		Ok(f) => f,
		Err(e) => return Ok(Err(e.into())),
	};

	if get_recipe_by_id(backend, id).await?.is_none() {
		return Ok(Err(RecipeError::NotFound));
	}

	Ok(Ok(update_recipe(backend, id, &fields).await?))
}

pub async fn delete(backend: &Backend, id: &str) -> anyhow::Result<()> {
	delete_recipe_by_id(backend, id).await?;

	Ok(())
}

fn import_result(
	res: Result<ImportedRecipe, BackendError>,
) -> anyhow::Result<Result<ImportedRecipe, ImportError>> {
	match res {
		Ok(recipe) => Ok(Ok(recipe)),
		Err(BackendError::Import(msg)) => {
			warn!(%msg, "recipe import failed");
			Ok(Err(ImportError::Failed(msg)))
		}
		Err(e) => Err(e.into()),
	}
}

pub async fn import_url(
	backend: &Backend,
	r: ImportUrl,
) -> anyhow::Result<Result<ImportedRecipe, ImportError>> {
	let url = match Url::parse(r.url.trim()) {
		Ok(u) if matches!(u.scheme(), "http" | "https") => u,
		_ => {
			debug!(url = %r.url, "rejecting import url");
			return Ok(Err(ImportError::InvalidUrl));
		}
	};

	import_result(import_from_url(backend, &url).await)
}

pub async fn import_image(
	backend: &Backend,
	image: Bytes,
) -> anyhow::Result<Result<ImportedRecipe, ImportError>> {
	if image.is_empty() {
		return Ok(Err(ImportError::EmptyImage));
	}

	import_result(import_from_image(backend, &image).await)
}
