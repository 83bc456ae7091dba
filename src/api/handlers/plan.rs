use axum::http::StatusCode;
use chrono_tz::Tz;
use futures_util::future::{join, try_join};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::handlers::week::{self, WeekView};
use crate::api::logic::plan::{clean_dish, empty_plan, suggest_dishes};
use crate::api::util::WebError;
use crate::backend::model::{DayEntry, PlanDay, Recipe, WeekPlan};
use crate::backend::queries::plan::{
	clear_day, copy_week, get_plan, get_previous_dishes, insert_plan, update_day,
};
use crate::backend::queries::recipe::get_recipes;
use crate::backend::Backend;
use crate::calendar::{self, WeekKey};

#[derive(Deserialize, Debug)]
pub struct PlanQuery {
	pub owner: String,
	pub year: i32,
	pub week: i32,
}

#[derive(Serialize, Debug)]
pub struct PlanOverview {
	pub week: WeekView,
	pub plan: WeekPlan,
	pub recipes: Vec<Recipe>,
	pub previous_dishes: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct SaveDay {
	pub owner: String,
	pub year: i32,
	pub week: i32,
	pub day: PlanDay,
	pub dish: String,
	pub recipe_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct DayRef {
	pub owner: String,
	pub year: i32,
	pub week: i32,
	pub day: PlanDay,
}

#[derive(Deserialize, Debug)]
pub struct CopyWeek {
	pub owner: String,
	pub from_year: i32,
	pub from_week: i32,
	pub to_year: Option<i32>,
	pub to_week: Option<i32>,
}

#[derive(Deserialize, Debug)]
pub struct SuggestionQuery {
	pub owner: String,
	#[serde(default)]
	pub input: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PlanError {
	InvalidWeekYear,
	MissingDish,
	SameWeek,
}

impl From<PlanError> for WebError<&'static str> {
	fn from(v: PlanError) -> Self {
		use PlanError::*;
		match v {
			InvalidWeekYear => (StatusCode::UNPROCESSABLE_ENTITY, "invalid week/year").into(),
			MissingDish => (StatusCode::UNPROCESSABLE_ENTITY, "dish must not be empty").into(),
			SameWeek => (
				StatusCode::UNPROCESSABLE_ENTITY,
				"cannot copy a week onto itself",
			)
				.into(),
		}
	}
}

/// Week plan of the week together with what the planner needs to fill it:
/// the owner's recipes and previously planned dishes.
pub async fn get(
	backend: &Backend,
	tz: Tz,
	q: PlanQuery,
) -> anyhow::Result<Result<PlanOverview, PlanError>> {
	let Ok(key) = week::resolve(WeekKey::new(q.year, q.week)) else {
		return Ok(Err(PlanError::InvalidWeekYear));
	};

	let Ok(week) = week::view(key, calendar::today(tz)) else {
		return Ok(Err(PlanError::InvalidWeekYear));
	};

	let (plan, lists) = join(
		get_plan(backend, &q.owner, key),
		try_join(
			get_recipes(backend, &q.owner),
			get_previous_dishes(backend, &q.owner),
		),
	)
	.await;

	let (recipes, previous_dishes) = lists?;

	Ok(Ok(PlanOverview {
		week,
		plan: plan.unwrap_or_else(|| empty_plan(&q.owner, key)),
		recipes,
		previous_dishes,
	}))
}

/// Stores a dish for one day, creating the week plan first if the backend
/// has none yet.
pub async fn save_day(backend: &Backend, r: SaveDay) -> anyhow::Result<Result<WeekPlan, PlanError>> {
	let Ok(key) = week::resolve(WeekKey::new(r.year, r.week)) else {
		return Ok(Err(PlanError::InvalidWeekYear));
	};

	let Some(dish) = clean_dish(&r.dish) else {
		return Ok(Err(PlanError::MissingDish));
	};

	let recipe_id = r.recipe_id.as_deref().filter(|id| !id.is_empty());

	let existing = get_plan(backend, &r.owner, key).await;

	let plan_id = match existing.as_ref().and_then(|p| p.id.clone()) {
		Some(id) => id,
		None => {
			debug!(owner = %r.owner, %key, "creating week plan");
			insert_plan(backend, &r.owner, key).await?
		}
	};

	update_day(backend, &plan_id, r.day, dish, recipe_id).await?;

	if let Some(plan) = get_plan(backend, &r.owner, key).await {
		return Ok(Ok(plan));
	}

	let mut plan = existing.unwrap_or_else(|| empty_plan(&r.owner, key));
	plan.id = Some(plan_id);
	*plan.days.get_mut(r.day) = DayEntry {
		dish: Some(dish.to_owned()),
		recipe_id: recipe_id.map(str::to_owned),
	};

	Ok(Ok(plan))
}

pub async fn clear(backend: &Backend, r: DayRef) -> anyhow::Result<Result<WeekPlan, PlanError>> {
	let Ok(key) = week::resolve(WeekKey::new(r.year, r.week)) else {
		return Ok(Err(PlanError::InvalidWeekYear));
	};

	let Some(mut plan) = get_plan(backend, &r.owner, key).await else {
		return Ok(Ok(empty_plan(&r.owner, key)));
	};

	let filled = plan.days.get(r.day) != &DayEntry::default();

	if let (Some(id), true) = (plan.id.as_deref(), filled) {
		clear_day(backend, id, r.day).await?;
	}

	*plan.days.get_mut(r.day) = DayEntry::default();

	Ok(Ok(plan))
}

/// Copies dishes, recipe links and manual shopping items to another week.
/// Without an explicit target the week after the current one is used.
pub async fn copy(
	backend: &Backend,
	tz: Tz,
	r: CopyWeek,
) -> anyhow::Result<Result<WeekPlan, PlanError>> {
	let Ok(from) = week::resolve(WeekKey::new(r.from_year, r.from_week)) else {
		return Ok(Err(PlanError::InvalidWeekYear));
	};

	let to = match (r.to_year, r.to_week) {
		(Some(year), Some(week)) => week::resolve(WeekKey::new(year, week)).ok(),
		_ => calendar::default_copy_target(tz),
	};

	let Some(to) = to else {
		return Ok(Err(PlanError::InvalidWeekYear));
	};

	if from == to {
		return Ok(Err(PlanError::SameWeek));
	}

	info!(owner = %r.owner, %from, %to, "copying week plan");

	copy_week(backend, &r.owner, from, to).await?;

	let plan = get_plan(backend, &r.owner, to)
		.await
		.unwrap_or_else(|| empty_plan(&r.owner, to));

	Ok(Ok(plan))
}

pub async fn suggestions(backend: &Backend, q: SuggestionQuery) -> anyhow::Result<Vec<String>> {
	let previous = get_previous_dishes(backend, &q.owner).await?;

	Ok(suggest_dishes(previous, &q.input))
}
