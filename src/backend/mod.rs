use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::configuration::Config;

pub mod model;
pub mod queries;

use model::ImportedRecipe;

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
	#[error("request to workflow backend failed")]
	Request(#[from] reqwest::Error),
	#[error("workflow backend responded with status {0}")]
	Status(u16),
	#[error("workflow backend returned malformed data")]
	Decode(#[from] serde_json::Error),
	#[error("workflow backend returned no {0}")]
	Empty(&'static str),
	#[error("{0}")]
	Import(String),
}

/// HTTP client for the webhook endpoints of the workflow backend.
#[derive(Clone)]
pub struct Backend {
	client: Client,
	base: String,
}

#[derive(Deserialize)]
struct ImportEnvelope {
	#[serde(default)]
	success: bool,
	data: Option<ImportedRecipe>,
	error: Option<String>,
}

impl Backend {
	pub fn new(cfg: &Config) -> anyhow::Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_secs(cfg.backend.timeoutsecs))
			.build()?;

		Ok(Self::with_client(client, cfg.backend.url.as_str()))
	}

	pub fn with_client(client: Client, base: &str) -> Self {
		Self {
			client,
			base: base.trim_end_matches('/').to_owned(),
		}
	}

	fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
		self.client.request(method, format!("{}{endpoint}", self.base))
	}

	pub async fn get<T: DeserializeOwned>(
		&self,
		endpoint: &str,
		query: &[(&str, String)],
	) -> Result<Option<T>, BackendError> {
		fetch(self.request(Method::GET, endpoint).query(query)).await
	}

	pub async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
		&self,
		method: Method,
		endpoint: &str,
		body: &B,
	) -> Result<Option<T>, BackendError> {
		fetch(self.request(method, endpoint).json(body)).await
	}

	/// Import endpoints answer with `{success, data, error}` instead of the
	/// usual envelope.
	pub async fn import<B: Serialize + ?Sized>(
		&self,
		endpoint: &str,
		body: &B,
		fallback: &str,
	) -> Result<ImportedRecipe, BackendError> {
		let res = self.request(Method::POST, endpoint).json(body).send().await?;

		let status = res.status();
		if !status.is_success() {
			return Err(BackendError::Status(status.as_u16()));
		}

		let envelope: ImportEnvelope = serde_json::from_slice(&res.bytes().await?)?;

		match envelope {
			ImportEnvelope {
				success: true,
				data: Some(recipe),
				..
			} => Ok(recipe),
			ImportEnvelope { error, .. } => {
				Err(BackendError::Import(error.unwrap_or_else(|| fallback.to_owned())))
			}
		}
	}
}

async fn fetch<T: DeserializeOwned>(req: RequestBuilder) -> Result<Option<T>, BackendError> {
	let res = req.send().await?;

	let status = res.status();
	if !status.is_success() {
		debug!(status = status.as_u16(), url = %res.url(), "backend call failed");
		return Err(BackendError::Status(status.as_u16()));
	}

	let text = res.text().await?;

	unwrap_envelope(&text)
}

/// Empty bodies and `null` payloads are `None`. A JSON object carrying a
/// `data` key yields that key's value, anything else is the payload itself.
pub fn unwrap_envelope<T: DeserializeOwned>(text: &str) -> Result<Option<T>, BackendError> {
	if text.trim().is_empty() {
		return Ok(None);
	}

	let mut payload: Value = serde_json::from_str(text)?;

	if let Some(data) = payload.as_object_mut().and_then(|o| o.remove("data")) {
		payload = data;
	}

	if payload.is_null() {
		return Ok(None);
	}

	Ok(Some(serde_json::from_value(payload)?))
}

pub fn required<T>(v: Option<T>, what: &'static str) -> Result<T, BackendError> {
	v.ok_or(BackendError::Empty(what))
}
