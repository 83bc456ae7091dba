use std::future::Future;

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use serde::Serialize;

use tokio::task::JoinHandle;

use tracing::{error, Instrument, Span};

use crate::backend::BackendError;

#[must_use]
pub struct WebOk<M: Serialize> {
	code: StatusCode,
	msg: M,
}

#[must_use]
#[derive(Debug)]
pub struct WebError<E: Serialize> {
	code: StatusCode,
	error: E,
}

pub type WebResult<M, E> = Result<WebOk<M>, WebError<E>>;

#[derive(Serialize)]
struct Msg<T> {
	msg: T,
}

#[derive(Serialize)]
struct Error<T> {
	error: T,
}

impl<M: Serialize> WebOk<M> {
	pub fn created(msg: M) -> Self {
		Self {
			code: StatusCode::CREATED,
			msg,
		}
	}
}

impl<M: Serialize> From<M> for WebOk<M> {
	fn from(msg: M) -> Self {
		Self {
			code: StatusCode::OK,
			msg,
		}
	}
}

impl<E: Serialize> From<(StatusCode, E)> for WebError<E> {
	fn from((code, error): (StatusCode, E)) -> Self {
		Self { code, error }
	}
}

#[cfg(test)]
impl<E: Serialize> WebError<E> {
	pub fn code(&self) -> StatusCode {
		self.code
	}
}

/// Unexpected failures never leak their details to the client.
impl<E: Serialize + From<&'static str>> From<anyhow::Error> for WebError<E> {
	fn from(e: anyhow::Error) -> Self {
		if let Some(backend) = e.downcast_ref::<BackendError>() {
			error!(err=%backend, "workflow backend error");
			return (StatusCode::BAD_GATEWAY, E::from("backend error")).into();
		}

		error!(err=?e, "internal error");
		(StatusCode::INTERNAL_SERVER_ERROR, E::from("internal server error")).into()
	}
}

impl<M: Serialize> IntoResponse for WebOk<M> {
	fn into_response(self) -> axum::response::Response {
		(self.code, Json(Msg { msg: self.msg })).into_response()
	}
}

impl<E: Serialize> IntoResponse for WebError<E> {
	fn into_response(self) -> axum::response::Response {
		(self.code, Json(Error { error: self.error })).into_response()
	}
}

pub fn spawn_in_current_span<T: Send + 'static>(
	f: impl Future<Output = T> + Send + 'static,
) -> JoinHandle<T> {
	tokio::spawn(f.instrument(Span::current()))
}

pub mod prelude {
	pub use super::spawn_in_current_span;
	pub use super::{WebError, WebOk, WebResult};
}
