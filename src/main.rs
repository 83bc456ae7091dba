#![deny(clippy::todo)]
#![forbid(unsafe_code)]
#![deny(clippy::pedantic)]
// This lint is stupid
#![allow(clippy::module_name_repetitions)]
// I like the match operator
#![allow(clippy::single_match_else)]
#![allow(clippy::manual_let_else)]
// I like using globbed enums
#![allow(clippy::enum_glob_use)]

use anyhow::Context;

use backend::Backend;
use util::logging::LogFormat;

mod api;
mod backend;
mod calendar;
mod configuration;
mod util;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	if let Err(e) = dotenvy::dotenv() {
		println!("WARN: Error getting dotenv file: {e}");
	}

	match std::env::var("LOGGING") {
		Ok(v) => match v.parse::<LogFormat>() {
			Ok(format) => format.init(),
			Err(e) => {
				LogFormat::Basic.init();
				tracing::warn!(err=%e, "invalid LOGGING env var, using basic formatter");
			}
		},
		Err(std::env::VarError::NotPresent) => LogFormat::default().init(),
		Err(std::env::VarError::NotUnicode(v)) => {
			LogFormat::Basic.init();
			tracing::warn!(v=%v.to_string_lossy(), "invalid Unicode value for LOGGING env var, using basic formatter");
		}
	}

	let cfg: configuration::Config = config::Config::builder()
		.add_source(
			config::Environment::with_prefix("MADPLAN")
				.separator("_")
				.try_parsing(true),
		)
		.build()
		.and_then(|c| c.try_deserialize())
		.context("invalid MADPLAN_* configuration")?;

	let backend = Backend::new(&cfg).context("unable to build backend client")?;

	api::run(backend, cfg).await
}
