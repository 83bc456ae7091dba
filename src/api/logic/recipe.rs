use serde::Deserialize;

use crate::backend::model::{Recipe, RecipeFields};
use crate::util::contains_ignore_case;

const DEFAULT_SERVINGS: u32 = 4;

#[derive(Deserialize, Debug)]
pub struct RecipeInput {
	pub title: String,
	pub servings: Option<u32>,
	#[serde(default)]
	pub ingredients: Vec<String>,
	#[serde(default)]
	pub method: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RecipeInputError {
	MissingTitle,
}

/// Recipes whose title contains `search`, ignoring case. Untitled recipes
/// never match.
pub fn filter_recipes(recipes: Vec<Recipe>, search: &str) -> Vec<Recipe> {
	recipes
		.into_iter()
		.filter(|r| !r.title.is_empty() && contains_ignore_case(&r.title, search))
		.collect()
}

pub fn recipe_fields(input: RecipeInput) -> Result<RecipeFields, RecipeInputError> {
	let title = input.title.trim();
	if title.is_empty() {
		return Err(RecipeInputError::MissingTitle);
	}

	let ingredients = input
		.ingredients
		.iter()
		.map(|i| i.trim())
		.filter(|i| !i.is_empty())
		.map(str::to_owned)
		.collect();

	Ok(RecipeFields {
		title: title.to_owned(),
		servings: input.servings.unwrap_or(DEFAULT_SERVINGS),
		ingredients,
		method: input.method.trim().to_owned(),
	})
}
