use std::fmt;

use chrono::{Datelike, Days, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const MONTHS: [&str; 12] = [
	"jan", "feb", "mar", "apr", "maj", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
];

/// An ISO-8601 week, identified by ISO year and week number.
///
/// `week` is 1..=53 for canonical keys, but any value is accepted and
/// extrapolated by date arithmetic (week 0 is the last week of the
/// previous ISO year, week 54 rolls into the next one).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey {
	pub year: i32,
	pub week: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	#[serde(alias = "prev")]
	Previous,
	Next,
}

/// The seven civil dates of one ISO week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDates([NaiveDate; 7]);

impl WeekKey {
	pub fn new(year: i32, week: i32) -> Self {
		Self { year, week }
	}

	/// Canonical form of a possibly extrapolated key.
	pub fn normalized(self) -> Option<Self> {
		week_dates(self).map(|d| iso_week_of(d.monday()))
	}

	pub fn label(self) -> String {
		format!("Uge {}, {}", self.week, self.year)
	}
}

impl fmt::Display for WeekKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-W{:02}", self.year, self.week)
	}
}

impl WeekDates {
	pub fn days(&self) -> &[NaiveDate; 7] {
		&self.0
	}

	pub fn monday(&self) -> NaiveDate {
		self.0[0]
	}

	pub fn sunday(&self) -> NaiveDate {
		self.0[6]
	}

	pub fn contains(&self, date: NaiveDate) -> bool {
		self.0.contains(&date)
	}

	pub fn range_label(&self) -> String {
		format!("{} - {}", format_date(self.monday()), format_date(self.sunday()))
	}
}

pub fn today(tz: Tz) -> NaiveDate {
	Utc::now().with_timezone(&tz).date_naive()
}

/// ISO week of today in the given zone.
pub fn current_week(tz: Tz) -> WeekKey {
	current_week_at(today(tz))
}

pub fn current_week_at(today: NaiveDate) -> WeekKey {
	iso_week_of(today)
}

/// Dates of the week `key`, anchored on January 4th of `key.year`.
///
/// Returns `None` only when the week falls outside the range chrono can
/// represent.
pub fn week_dates(key: WeekKey) -> Option<WeekDates> {
	let monday = week_monday(key)?;

	let mut days = [monday; 7];
	for (offset, day) in (0u64..).zip(days.iter_mut()) {
		*day = monday.checked_add_days(Days::new(offset))?;
	}

	Some(WeekDates(days))
}

/// Renders a date as "3. jan".
pub fn format_date(date: NaiveDate) -> String {
	format!("{}. {}", date.day(), MONTHS[date.month0() as usize])
}

/// Steps one week in `direction`, re-deriving the ISO year/week from the
/// shifted Monday so year boundaries and 53-week years roll over correctly.
pub fn navigate_week(key: WeekKey, direction: Direction) -> Option<WeekKey> {
	let monday = week_monday(key)?;

	let shifted = match direction {
		Direction::Previous => monday.checked_sub_days(Days::new(7))?,
		Direction::Next => monday.checked_add_days(Days::new(7))?,
	};

	Some(iso_week_of(shifted))
}

/// ISO year and week of `date`.
///
/// The Thursday of the date's Monday-start week decides the ISO year, and
/// the week number is the Thursday's zero-based ordinal divided by seven.
pub fn iso_week_of(date: NaiveDate) -> WeekKey {
	let from_monday = i64::from(date.weekday().num_days_from_monday());

	let mut year = date.year();
	let mut ordinal0 = i64::from(date.ordinal0()) + 3 - from_monday;

	if ordinal0 < 0 {
		year -= 1;
		ordinal0 += days_in_year(year);
	} else if ordinal0 >= days_in_year(year) {
		ordinal0 -= days_in_year(year);
		year += 1;
	}

	// ordinal0 < 366 here
	#[allow(clippy::cast_possible_truncation)]
	let week = (ordinal0 / 7) as i32 + 1;

	WeekKey { year, week }
}

/// Number of ISO weeks in `year`: 52 or 53.
pub fn weeks_in_year(year: i32) -> i32 {
	// December 28th is always in the last ISO week of its year.
	match NaiveDate::from_ymd_opt(year, 12, 28) {
		Some(d) => iso_week_of(d).week,
		None => 52,
	}
}

/// Week after the current one, the default target when copying a week.
pub fn default_copy_target(tz: Tz) -> Option<WeekKey> {
	navigate_week(current_week(tz), Direction::Next)
}

fn week_monday(key: WeekKey) -> Option<NaiveDate> {
	let anchor = NaiveDate::from_ymd_opt(key.year, 1, 4)?;

	let first_monday = anchor.checked_sub_days(Days::new(u64::from(
		anchor.weekday().num_days_from_monday(),
	)))?;

	first_monday.checked_add_signed(Duration::weeks(i64::from(key.week) - 1))
}

fn days_in_year(year: i32) -> i64 {
	if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
		366
	} else {
		365
	}
}
