use std::str::FromStr;

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::fmt::format::{json, FmtSpan, JsonFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output format picked with the `LOGGING` env var.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	#[default]
	Basic,
	Json,
	Bunyan,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown log format {0:?}, expected basic, json or bunyan")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
	type Err = UnknownLogFormat;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"" | "basic" => Ok(Self::Basic),
			"json" => Ok(Self::Json),
			"bunyan" => Ok(Self::Bunyan),
			_ => Err(UnknownLogFormat(s.to_owned())),
		}
	}
}

impl LogFormat {
	pub fn init(self) {
		match self {
			Self::Basic => basic_logging(),
			Self::Json => json_logging(),
			Self::Bunyan => bunyan_logging(),
		}
	}
}

fn env_filter() -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into())
}

fn bunyan_logging() {
	let formatting_layer = BunyanFormattingLayer::new("madplan".into(), std::io::stdout);

	tracing_subscriber::registry()
		.with(env_filter())
		.with(JsonStorageLayer)
		.with(formatting_layer)
		.init();
}

fn json_logging() {
	tracing_subscriber::fmt()
		.with_env_filter(env_filter())
		.with_span_events(FmtSpan::CLOSE)
		.event_format(
			json()
				.flatten_event(true)
				.with_current_span(true)
				.with_span_list(true),
		)
		.fmt_fields(JsonFields::new())
		.init();
}

fn basic_logging() {
	tracing_subscriber::fmt()
		.with_env_filter(env_filter())
		.with_span_events(FmtSpan::CLOSE)
		.init();
}
