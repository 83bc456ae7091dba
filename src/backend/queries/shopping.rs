use reqwest::Method;
use serde_json::{json, Value};

use crate::backend::model::ShoppingItem;
use crate::backend::{required, Backend, BackendError};
use crate::calendar::WeekKey;

pub async fn get_shopping_list(
	backend: &Backend,
	owner_id: &str,
	week: WeekKey,
) -> Result<Vec<ShoppingItem>, BackendError> {
	let items = backend
		.get(
			"/madplan/indkob",
			&[
				("ejerId", owner_id.to_owned()),
				("aar", week.year.to_string()),
				("uge", week.week.to_string()),
			],
		)
		.await?;

	Ok(items.unwrap_or_default())
}

pub async fn insert_manual_item(
	backend: &Backend,
	owner_id: &str,
	week: WeekKey,
	name: &str,
) -> Result<ShoppingItem, BackendError> {
	let item = backend
		.send(
			Method::POST,
			"/madplan/indkob/tilfoej",
			&json!({
				"ejerId": owner_id,
				"aar": week.year,
				"uge": week.week,
				"navn": name,
			}),
		)
		.await?;

	required(item, "shopping item")
}

pub async fn set_item_checked(
	backend: &Backend,
	id: &str,
	checked: bool,
) -> Result<ShoppingItem, BackendError> {
	let item = backend
		.send(
			Method::PUT,
			"/madplan/indkob/opdater",
			&json!({ "id": id, "afkrydset": checked }),
		)
		.await?;

	required(item, "shopping item")
}

pub async fn delete_item_by_id(backend: &Backend, id: &str) -> Result<(), BackendError> {
	backend
		.send::<Value, _>(Method::DELETE, "/madplan/indkob/slet", &json!({ "id": id }))
		.await?;

	Ok(())
}
