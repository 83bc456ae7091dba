use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::backend::model::{ImportedRecipe, Recipe, RecipeFields};
use crate::backend::{required, Backend, BackendError};

#[derive(Serialize)]
struct NewRecipe<'a> {
	#[serde(rename = "ejerId")]
	owner_id: &'a str,
	#[serde(flatten)]
	fields: &'a RecipeFields,
}

#[derive(Serialize)]
struct RecipeUpdate<'a> {
	id: &'a str,
	#[serde(flatten)]
	fields: &'a RecipeFields,
}

pub async fn get_recipes(backend: &Backend, owner_id: &str) -> Result<Vec<Recipe>, BackendError> {
	let recipes = backend
		.get("/madplan/opskrifter", &[("ejerId", owner_id.to_owned())])
		.await?;

	Ok(recipes.unwrap_or_default())
}

pub async fn get_recipe_by_id(backend: &Backend, id: &str) -> Result<Option<Recipe>, BackendError> {
	backend.get("/madplan/opskrift", &[("id", id.to_owned())]).await
}

pub async fn insert_recipe(
	backend: &Backend,
	owner_id: &str,
	fields: &RecipeFields,
) -> Result<Recipe, BackendError> {
	let recipe = backend
		.send(
			Method::POST,
			"/madplan/opskrift/opret",
			&NewRecipe { owner_id, fields },
		)
		.await?;

	required(recipe, "recipe")
}

pub async fn update_recipe(
	backend: &Backend,
	id: &str,
	fields: &RecipeFields,
) -> Result<Recipe, BackendError> {
	let recipe = backend
		.send(
			Method::PUT,
			"/madplan/opskrift/opdater",
			&RecipeUpdate { id, fields },
		)
		.await?;

	required(recipe, "recipe")
}

pub async fn delete_recipe_by_id(backend: &Backend, id: &str) -> Result<(), BackendError> {
	backend
		.send::<Value, _>(Method::DELETE, "/madplan/opskrift/slet", &json!({ "id": id }))
		.await?;

	Ok(())
}

pub async fn import_from_url(backend: &Backend, url: &Url) -> Result<ImportedRecipe, BackendError> {
	backend
		.import(
			"/madplan/opskrift/import-url",
			&json!({ "url": url }),
			"Kunne ikke importere opskrift fra URL",
		)
		.await
}

pub async fn import_from_image(
	backend: &Backend,
	image: &[u8],
) -> Result<ImportedRecipe, BackendError> {
	backend
		.import(
			"/madplan/opskrift/import-billede",
			&json!({ "imageBase64": STANDARD.encode(image) }),
			"Kunne ikke importere opskrift fra billede",
		)
		.await
}
