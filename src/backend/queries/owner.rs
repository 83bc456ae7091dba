use reqwest::Method;
use serde_json::json;

use crate::backend::model::Owner;
use crate::backend::{required, Backend, BackendError};

pub async fn get_owners(backend: &Backend) -> Result<Vec<Owner>, BackendError> {
	Ok(backend.get("/madplan/ejere", &[]).await?.unwrap_or_default())
}

pub async fn insert_owner(backend: &Backend, name: &str) -> Result<Owner, BackendError> {
	let owner = backend
		.send(Method::POST, "/madplan/ejer/opret", &json!({ "navn": name }))
		.await?;

	required(owner, "owner")
}
