use std::net::SocketAddr;

use chrono_tz::Tz;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
	pub hosturl: SocketAddr,
	pub tls: Option<Tls>,
	pub backend: BackendConfig,
	#[serde(default)]
	pub calendar: CalendarConfig,
}

#[derive(Deserialize)]
pub struct BackendConfig {
	/// Base URL of the webhook endpoints, e.g. `https://n8n.example.com/webhook`.
	pub url: url::Url,
	#[serde(default = "default_timeout")]
	pub timeoutsecs: u64,
}

#[derive(Deserialize)]
pub struct CalendarConfig {
	pub timezone: Tz,
}

impl Default for CalendarConfig {
	fn default() -> Self {
		Self {
			timezone: chrono_tz::Europe::Copenhagen,
		}
	}
}

#[derive(Deserialize)]
pub struct Tls {
	pub certpath: String,
	pub keypath: String,
}

fn default_timeout() -> u64 {
	30
}
