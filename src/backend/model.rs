use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Owner {
	pub id: String,
	#[serde(rename = "navn")]
	pub name: String,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Recipe {
	pub id: String,
	#[serde(rename = "ejerId")]
	pub owner_id: String,
	#[serde(rename = "titel", default)]
	pub title: String,
	#[serde(rename = "portioner", default)]
	pub servings: u32,
	#[serde(rename = "ingredienser", default)]
	pub ingredients: Vec<String>,
	#[serde(rename = "fremgangsmaade", default)]
	pub method: String,
	#[serde(rename = "oprettetDato", default)]
	pub created: String,
}

/// Fields sent when creating or updating a recipe.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct RecipeFields {
	#[serde(rename = "titel")]
	pub title: String,
	#[serde(rename = "portioner")]
	pub servings: u32,
	#[serde(rename = "ingredienser")]
	pub ingredients: Vec<String>,
	#[serde(rename = "fremgangsmaade")]
	pub method: String,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct ImportedRecipe {
	#[serde(rename = "titel", default)]
	pub title: String,
	#[serde(rename = "portioner", default)]
	pub servings: u32,
	#[serde(rename = "ingredienser", default)]
	pub ingredients: Vec<String>,
	#[serde(rename = "fremgangsmaade", default)]
	pub method: String,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct DayEntry {
	#[serde(rename = "ret", default)]
	pub dish: Option<String>,
	#[serde(rename = "opskriftId", default)]
	pub recipe_id: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlanDay {
	Mandag,
	Tirsdag,
	Onsdag,
	Torsdag,
	Fredag,
	Loerdag,
	Soendag,
}

impl PlanDay {
	pub const ALL: [PlanDay; 7] = [
		PlanDay::Mandag,
		PlanDay::Tirsdag,
		PlanDay::Onsdag,
		PlanDay::Torsdag,
		PlanDay::Fredag,
		PlanDay::Loerdag,
		PlanDay::Soendag,
	];

	pub fn label(self) -> &'static str {
		use PlanDay::*;
		match self {
			Mandag => "Mandag",
			Tirsdag => "Tirsdag",
			Onsdag => "Onsdag",
			Torsdag => "Torsdag",
			Fredag => "Fredag",
			Loerdag => "Lørdag",
			Soendag => "Søndag",
		}
	}

	/// Column name of the day in the backend's week plan table.
	pub fn field_name(self) -> &'static str {
		use PlanDay::*;
		match self {
			Mandag => "Mandag",
			Tirsdag => "Tirsdag",
			Onsdag => "Onsdag",
			Torsdag => "Torsdag",
			Fredag => "Fredag",
			Loerdag => "Loerdag",
			Soendag => "Soendag",
		}
	}
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct PlanDays {
	#[serde(default)]
	pub mandag: DayEntry,
	#[serde(default)]
	pub tirsdag: DayEntry,
	#[serde(default)]
	pub onsdag: DayEntry,
	#[serde(default)]
	pub torsdag: DayEntry,
	#[serde(default)]
	pub fredag: DayEntry,
	#[serde(default)]
	pub loerdag: DayEntry,
	#[serde(default)]
	pub soendag: DayEntry,
}

impl PlanDays {
	pub fn get(&self, day: PlanDay) -> &DayEntry {
		match day {
			PlanDay::Mandag => &self.mandag,
			PlanDay::Tirsdag => &self.tirsdag,
			PlanDay::Onsdag => &self.onsdag,
			PlanDay::Torsdag => &self.torsdag,
			PlanDay::Fredag => &self.fredag,
			PlanDay::Loerdag => &self.loerdag,
			PlanDay::Soendag => &self.soendag,
		}
	}

	pub fn get_mut(&mut self, day: PlanDay) -> &mut DayEntry {
		match day {
			PlanDay::Mandag => &mut self.mandag,
			PlanDay::Tirsdag => &mut self.tirsdag,
			PlanDay::Onsdag => &mut self.onsdag,
			PlanDay::Torsdag => &mut self.torsdag,
			PlanDay::Fredag => &mut self.fredag,
			PlanDay::Loerdag => &mut self.loerdag,
			PlanDay::Soendag => &mut self.soendag,
		}
	}
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct WeekPlan {
	/// `None` for a plan the backend has not stored yet.
	#[serde(default)]
	pub id: Option<String>,
	#[serde(rename = "ejerId")]
	pub owner_id: String,
	#[serde(rename = "aar")]
	pub year: i32,
	#[serde(rename = "uge")]
	pub week: i32,
	#[serde(rename = "dage", default)]
	pub days: PlanDays,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub enum ItemSource {
	#[serde(rename = "ret")]
	Dish,
	#[serde(rename = "manuel")]
	Manual,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct ShoppingItem {
	pub id: String,
	#[serde(rename = "ejerId")]
	pub owner_id: String,
	#[serde(rename = "aar")]
	pub year: i32,
	#[serde(rename = "uge")]
	pub week: i32,
	#[serde(rename = "navn")]
	pub name: String,
	#[serde(rename = "kilde")]
	pub source: ItemSource,
	#[serde(rename = "afkrydset", default)]
	pub checked: bool,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn week_plan_with_missing_days() {
		let plan: WeekPlan = serde_json::from_value(json!({
			"id": "rec42",
			"ejerId": "own1",
			"aar": 2024,
			"uge": 3,
			"dage": {
				"mandag": {"ret": "Lasagne", "opskriftId": "rec7"},
				"fredag": {"ret": "Pizza"}
			}
		}))
		.unwrap();

		assert_eq!((plan.year, plan.week), (2024, 3));
		assert_eq!(plan.days.get(PlanDay::Mandag).dish.as_deref(), Some("Lasagne"));
		assert_eq!(plan.days.get(PlanDay::Fredag).recipe_id, None);
		assert_eq!(plan.days.get(PlanDay::Soendag), &DayEntry::default());
	}

	#[test]
	fn shopping_item_wire_names() {
		let item: ShoppingItem = serde_json::from_value(json!({
			"id": "i1",
			"ejerId": "own1",
			"aar": 2024,
			"uge": 1,
			"navn": "Mælk",
			"kilde": "manuel",
			"afkrydset": true
		}))
		.unwrap();

		assert_eq!(item.source, ItemSource::Manual);
		assert!(item.checked);
	}

	#[test]
	fn plan_day_keys() {
		let days: Vec<String> = PlanDay::ALL
			.iter()
			.map(|d| serde_json::to_value(d).unwrap().as_str().unwrap().to_owned())
			.collect();

		assert_eq!(
			days,
			["mandag", "tirsdag", "onsdag", "torsdag", "fredag", "loerdag", "soendag"]
		);
		assert_eq!(PlanDay::Loerdag.field_name(), "Loerdag");
		assert_eq!(PlanDay::Loerdag.label(), "Lørdag");
	}
}
