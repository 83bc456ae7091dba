use serde::Serialize;

use crate::backend::model::ShoppingItem;

#[derive(Serialize, Debug, PartialEq, Eq, Default)]
pub struct ShoppingList {
	pub unchecked: Vec<ShoppingItem>,
	pub checked: Vec<ShoppingItem>,
}

/// Splits the list into items still to buy and items already bought,
/// keeping the backend's order within each part.
pub fn partition_items(items: Vec<ShoppingItem>) -> ShoppingList {
	let (checked, unchecked) = items.into_iter().partition(|i| i.checked);

	ShoppingList { unchecked, checked }
}

pub fn clean_item_name(name: &str) -> Option<&str> {
	let name = name.trim();
	(!name.is_empty()).then_some(name)
}

/// Ingredients worth adding to a shopping list: trimmed, blanks dropped.
pub fn clean_ingredients(ingredients: &[String]) -> Vec<&str> {
	ingredients.iter().filter_map(|i| clean_item_name(i)).collect()
}
