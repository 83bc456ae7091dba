use axum::http::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::api::handlers::week;
use crate::api::logic::shopping::{clean_ingredients, clean_item_name, partition_items, ShoppingList};
use crate::api::util::WebError;
use crate::backend::model::ShoppingItem;
use crate::backend::queries::recipe::get_recipe_by_id;
use crate::backend::queries::shopping::{
	delete_item_by_id, get_shopping_list, insert_manual_item, set_item_checked,
};
use crate::backend::Backend;
use crate::calendar::WeekKey;

#[derive(Deserialize, Debug)]
pub struct ShoppingQuery {
	pub owner: String,
	pub year: i32,
	pub week: i32,
}

#[derive(Deserialize, Debug)]
pub struct AddItem {
	pub owner: String,
	pub year: i32,
	pub week: i32,
	pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct SetChecked {
	pub checked: bool,
}

/// Either a stored recipe or a literal ingredient list.
#[derive(Deserialize, Debug)]
pub struct AddIngredients {
	pub owner: String,
	pub year: i32,
	pub week: i32,
	pub recipe_id: Option<String>,
	#[serde(default)]
	pub ingredients: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ShoppingError {
	InvalidWeekYear,
	MissingName,
	RecipeNotFound,
}

impl From<ShoppingError> for WebError<&'static str> {
	fn from(v: ShoppingError) -> Self {
		use ShoppingError::*;
		match v {
			InvalidWeekYear => (StatusCode::UNPROCESSABLE_ENTITY, "invalid week/year").into(),
			MissingName => (StatusCode::UNPROCESSABLE_ENTITY, "item name must not be empty").into(),
			RecipeNotFound => (StatusCode::NOT_FOUND, "recipe not found").into(),
		}
	}
}

pub async fn list(
	backend: &Backend,
	q: ShoppingQuery,
) -> anyhow::Result<Result<ShoppingList, ShoppingError>> {
	let Ok(key) = week::resolve(WeekKey::new(q.year, q.week)) else {
		return Ok(Err(ShoppingError::InvalidWeekYear));
	};

	let items = get_shopping_list(backend, &q.owner, key).await?;

	Ok(Ok(partition_items(items)))
}

pub async fn add(
	backend: &Backend,
	r: AddItem,
) -> anyhow::Result<Result<ShoppingItem, ShoppingError>> {
	let Ok(key) = week::resolve(WeekKey::new(r.year, r.week)) else {
		return Ok(Err(ShoppingError::InvalidWeekYear));
	};

	let Some(name) = clean_item_name(&r.name) else {
		return Ok(Err(ShoppingError::MissingName));
	};

	Ok(Ok(insert_manual_item(backend, &r.owner, key, name).await?))
}

pub async fn set_checked(backend: &Backend, id: &str, r: SetChecked) -> anyhow::Result<ShoppingItem> {
	Ok(set_item_checked(backend, id, r.checked).await?)
}

pub async fn delete(backend: &Backend, id: &str) -> anyhow::Result<()> {
	delete_item_by_id(backend, id).await?;

	Ok(())
}

/// Adds every non-blank ingredient as a manual item, in order, and returns
/// how many were added.
pub async fn add_ingredients(
	backend: &Backend,
	r: AddIngredients,
) -> anyhow::Result<Result<usize, ShoppingError>> {
	let Ok(key) = week::resolve(WeekKey::new(r.year, r.week)) else {
		return Ok(Err(ShoppingError::InvalidWeekYear));
	};

	let ingredients = match r.recipe_id.as_deref() {
		Some(id) => match get_recipe_by_id(backend, id).await? {
			Some(recipe) => recipe.ingredients,
			None => return Ok(Err(ShoppingError::RecipeNotFound)),
		},
		None => r.ingredients,
	};

	let names = clean_ingredients(&ingredients);

	for name in &names {
		insert_manual_item(backend, &r.owner, key, name).await?;
	}

	debug!(owner = %r.owner, %key, added = names.len(), "added ingredients to shopping list");

	Ok(Ok(names.len()))
}
