use std::time::Duration;

use axum::http::StatusCode;
use tokio::time::timeout;
use tracing::error;

use crate::api::util::prelude::*;
use crate::backend::queries::owner::get_owners;
use crate::backend::Backend;

pub enum HealthCheckError {
	BackendUnavailable,
}

impl From<HealthCheckError> for WebError<&'static str> {
	fn from(v: HealthCheckError) -> WebError<&'static str> {
		use HealthCheckError::*;
		match v {
			BackendUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "backend unavailable").into(),
		}
	}
}

pub async fn backend_test(backend: Backend) -> bool {
	let res = timeout(
		Duration::from_millis(500),
		spawn_in_current_span(async move { get_owners(&backend).await }),
	)
	.await;

	match res {
		Ok(Ok(Ok(_))) => true,
		Ok(Ok(Err(e))) => {
			error!(err=%e, "health check error");
			false
		}
		Ok(Err(e)) => {
			error!(err=%e, "health check task failed");
			false
		}
		Err(_) => {
			error!("health check timed out");
			false
		}
	}
}

pub async fn health_check(backend: &Backend) -> Result<&'static str, HealthCheckError> {
	if !backend_test(backend.clone()).await {
		return Err(HealthCheckError::BackendUnavailable);
	}

	Ok("healthy")
}
