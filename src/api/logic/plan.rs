use itertools::Itertools;

use crate::backend::model::{PlanDays, WeekPlan};
use crate::calendar::WeekKey;
use crate::util::contains_ignore_case;

const MAX_SUGGESTIONS: usize = 5;

/// Plan shown for a week the backend has nothing stored for.
pub fn empty_plan(owner_id: &str, week: WeekKey) -> WeekPlan {
	WeekPlan {
		id: None,
		owner_id: owner_id.to_owned(),
		year: week.year,
		week: week.week,
		days: PlanDays::default(),
	}
}

/// Previously planned dishes matching what has been typed so far, excluding
/// an exact match of the input itself. Surrounding whitespace in the input is
/// ignored and each dish is suggested once.
pub fn suggest_dishes(previous: Vec<String>, input: &str) -> Vec<String> {
	let input = input.trim();

	previous
		.into_iter()
		.filter(|dish| dish != input && contains_ignore_case(dish, input))
		.unique()
		.take(MAX_SUGGESTIONS)
		.collect()
}

pub fn clean_dish(dish: &str) -> Option<&str> {
	let dish = dish.trim();
	(!dish.is_empty()).then_some(dish)
}

#[cfg(test)]
mod tests {
	use crate::backend::model::{DayEntry, PlanDay};

	use super::*;

	fn dishes(v: &[&str]) -> Vec<String> {
		v.iter().map(|s| (*s).to_owned()).collect()
	}

	#[test]
	fn empty_plan_has_seven_empty_days() {
		let plan = empty_plan("own1", WeekKey::new(2024, 7));

		assert_eq!(plan.id, None);
		assert_eq!((plan.year, plan.week), (2024, 7));
		for day in PlanDay::ALL {
			assert_eq!(plan.days.get(day), &DayEntry::default());
		}
	}

	#[test]
	fn suggestions_match_case_insensitively() {
		let previous = dishes(&["Pasta carbonara", "Pizza", "Kylling i karry", "PASTA pesto"]);

		assert_eq!(
			suggest_dishes(previous, "pasta"),
			["Pasta carbonara", "PASTA pesto"]
		);
	}

	#[test]
	fn exact_input_is_not_suggested() {
		let previous = dishes(&["Pizza", "Pizza hawaii"]);

		assert_eq!(suggest_dishes(previous, "Pizza"), ["Pizza hawaii"]);
	}

	#[test]
	fn input_is_trimmed_before_matching() {
		let previous = dishes(&["Pizza", "Pizza hawaii", "Pizza hawaii"]);

		assert_eq!(suggest_dishes(previous, "Pizza "), ["Pizza hawaii"]);
	}

	#[test]
	fn suggestions_are_capped() {
		let previous = dishes(&["a1", "a2", "a3", "a4", "a5", "a6", "a1"]);

		assert_eq!(
			suggest_dishes(previous, "a"),
			["a1", "a2", "a3", "a4", "a5"]
		);
	}

	#[test]
	fn empty_input_suggests_everything_up_to_cap() {
		let previous = dishes(&["Suppe", "Stuvning"]);

		assert_eq!(suggest_dishes(previous, ""), ["Suppe", "Stuvning"]);
	}

	#[test]
	fn blank_dish_is_rejected() {
		assert_eq!(clean_dish(" Tarteletter "), Some("Tarteletter"));
		assert_eq!(clean_dish(""), None);
	}
}
