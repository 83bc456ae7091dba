use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::routing::{get, post, put};
use axum::Router;

use axum_server::tls_rustls::RustlsConfig;

use chrono_tz::Tz;

use tower_http::trace::TraceLayer;
use tower_request_id::{RequestId, RequestIdLayer};
use tracing::{info, info_span};

use crate::backend::Backend;
use crate::configuration::Config;

mod handlers;
mod health;
mod logic;
mod owner;
mod plan;
mod recipe;
mod shopping;
mod util;
mod week;

const IMAGE_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
	pub backend: Backend,
	pub timezone: Tz,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health::health_check))
		.route("/week", get(week::view))
		.route("/week/current", get(week::current))
		.route("/week/navigate", get(week::navigate))
		.route("/owners", get(owner::list).post(owner::create))
		.route("/plan", get(plan::get))
		.route("/plan/day", put(plan::save_day).delete(plan::clear_day))
		.route("/plan/copy", post(plan::copy))
		.route("/plan/suggestions", get(plan::suggestions))
		.route("/recipes", get(recipe::list).post(recipe::create))
		.route(
			"/recipes/:id",
			get(recipe::get).put(recipe::update).delete(recipe::delete),
		)
		.route("/recipes/import/url", post(recipe::import_url))
		.route(
			"/recipes/import/image",
			post(recipe::import_image).layer(DefaultBodyLimit::max(IMAGE_LIMIT)),
		)
		.route("/shopping", get(shopping::list).post(shopping::add))
		.route(
			"/shopping/:id",
			put(shopping::set_checked).delete(shopping::delete),
		)
		.route("/shopping/ingredients", post(shopping::add_ingredients))
		.with_state(state)
}

pub async fn run(backend: Backend, cfg: Config) -> anyhow::Result<()> {
	let state = AppState {
		backend,
		timezone: cfg.calendar.timezone,
	};

	let app = router(state)
		.layer(
			TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
				let request_id = request
					.extensions()
					.get::<RequestId>()
					.map(ToString::to_string)
					.unwrap_or_else(|| "unknown".into());

				info_span!("request", id = %request_id, method = %request.method(), uri = %request.uri())
			}),
		)
		.layer(RequestIdLayer);

	info!(uri=%cfg.hosturl, backend=%cfg.backend.url, timezone=%cfg.calendar.timezone, "Starting server");

	match cfg.tls {
		Some(tls) => {
			let rustls = RustlsConfig::from_pem_file(tls.certpath, tls.keypath).await?;

			axum_server::bind_rustls(cfg.hosturl, rustls)
				.serve(app.into_make_service())
				.await?;
		}
		None => {
			let listener = tokio::net::TcpListener::bind(cfg.hosturl).await?;

			axum::serve(listener, app).await?;
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests;
