use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::backend::model::{PlanDay, WeekPlan};
use crate::backend::{required, Backend, BackendError};
use crate::calendar::WeekKey;

#[derive(Serialize)]
struct DayUpdate<'a> {
	id: &'a str,
	#[serde(rename = "feltNavn")]
	field_name: &'static str,
	#[serde(rename = "ret")]
	dish: &'a str,
	#[serde(rename = "opskriftId", skip_serializing_if = "Option::is_none")]
	recipe_id: Option<&'a str>,
}

#[derive(Deserialize)]
struct CreatedPlan {
	id: String,
}

/// Any backend failure reads as "no plan stored for this week".
pub async fn get_plan(backend: &Backend, owner_id: &str, week: WeekKey) -> Option<WeekPlan> {
	let res = backend
		.get(
			"/madplan/uge",
			&[
				("ejerId", owner_id.to_owned()),
				("aar", week.year.to_string()),
				("uge", week.week.to_string()),
			],
		)
		.await;

	match res {
		Ok(plan) => plan,
		Err(e) => {
			warn!(err=%e, %week, owner_id, "unable to fetch week plan, treating as missing");
			None
		}
	}
}

pub async fn insert_plan(
	backend: &Backend,
	owner_id: &str,
	week: WeekKey,
) -> Result<String, BackendError> {
	let created: Option<CreatedPlan> = backend
		.send(
			Method::POST,
			"/madplan/uge/opret",
			&json!({ "ejerId": owner_id, "aar": week.year, "uge": week.week }),
		)
		.await?;

	Ok(required(created, "week plan id")?.id)
}

pub async fn update_day(
	backend: &Backend,
	plan_id: &str,
	day: PlanDay,
	dish: &str,
	recipe_id: Option<&str>,
) -> Result<(), BackendError> {
	backend
		.send::<Value, _>(
			Method::POST,
			"/madplan/dag/opdater",
			&DayUpdate {
				id: plan_id,
				field_name: day.field_name(),
				dish,
				recipe_id,
			},
		)
		.await?;

	Ok(())
}

pub async fn clear_day(backend: &Backend, plan_id: &str, day: PlanDay) -> Result<(), BackendError> {
	backend
		.send::<Value, _>(
			Method::POST,
			"/madplan/dag/slet",
			&json!({ "id": plan_id, "feltNavn": day.field_name() }),
		)
		.await?;

	Ok(())
}

pub async fn copy_week(
	backend: &Backend,
	owner_id: &str,
	from: WeekKey,
	to: WeekKey,
) -> Result<(), BackendError> {
	backend
		.send::<Value, _>(
			Method::POST,
			"/madplan/uge/kopier",
			&json!({
				"ejerId": owner_id,
				"fraAar": from.year,
				"fraUge": from.week,
				"tilAar": to.year,
				"tilUge": to.week,
			}),
		)
		.await?;

	Ok(())
}

pub async fn get_previous_dishes(
	backend: &Backend,
	owner_id: &str,
) -> Result<Vec<String>, BackendError> {
	let dishes = backend
		.get("/madplan/retter", &[("ejerId", owner_id.to_owned())])
		.await?;

	Ok(dishes.unwrap_or_default())
}
