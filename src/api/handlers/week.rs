use axum::http::StatusCode;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::api::util::WebError;
use crate::backend::model::PlanDay;
use crate::calendar::{self, Direction, WeekKey};

#[derive(Deserialize, Debug)]
pub struct WeekQuery {
	pub year: i32,
	pub week: i32,
}

#[derive(Deserialize, Debug)]
pub struct NavigateQuery {
	pub year: i32,
	pub week: i32,
	pub direction: Direction,
}

#[derive(Serialize, Debug)]
pub struct DayView {
	pub day: PlanDay,
	pub label: &'static str,
	pub date: NaiveDate,
	pub formatted: String,
}

#[derive(Serialize, Debug)]
pub struct WeekView {
	pub year: i32,
	pub week: i32,
	pub label: String,
	pub range: String,
	pub weeks_in_year: i32,
	/// Whether `today` falls in this week.
	pub current: bool,
	pub days: Vec<DayView>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum WeekError {
	InvalidWeekYear,
}

impl From<WeekError> for WebError<&'static str> {
	fn from(v: WeekError) -> Self {
		match v {
			WeekError::InvalidWeekYear => {
				(StatusCode::UNPROCESSABLE_ENTITY, "invalid week/year").into()
			}
		}
	}
}

impl From<WeekQuery> for WeekKey {
	fn from(q: WeekQuery) -> Self {
		WeekKey::new(q.year, q.week)
	}
}

/// Canonical key for a possibly extrapolated week from a client.
pub fn resolve(key: WeekKey) -> Result<WeekKey, WeekError> {
	key.normalized().ok_or(WeekError::InvalidWeekYear)
}

pub fn view(key: WeekKey, today: NaiveDate) -> Result<WeekView, WeekError> {
	let key = resolve(key)?;
	let dates = calendar::week_dates(key).ok_or(WeekError::InvalidWeekYear)?;

	let days = PlanDay::ALL
		.iter()
		.zip(dates.days())
		.map(|(day, date)| DayView {
			day: *day,
			label: day.label(),
			date: *date,
			formatted: calendar::format_date(*date),
		})
		.collect();

	Ok(WeekView {
		year: key.year,
		week: key.week,
		label: key.label(),
		range: dates.range_label(),
		weeks_in_year: calendar::weeks_in_year(key.year),
		current: dates.contains(today),
		days,
	})
}

pub fn current(tz: Tz) -> Result<WeekView, WeekError> {
	view(calendar::current_week(tz), calendar::today(tz))
}

pub fn navigate(q: NavigateQuery, today: NaiveDate) -> Result<WeekView, WeekError> {
	let key = calendar::navigate_week(WeekKey::new(q.year, q.week), q.direction)
		.ok_or(WeekError::InvalidWeekYear)?;

	view(key, today)
}
