use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::api::util::WebError;
use crate::backend::model::Owner;
use crate::backend::queries::owner::{get_owners, insert_owner};
use crate::backend::Backend;

#[derive(Deserialize, Debug)]
pub struct OwnerQuery {
	pub selected: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct OwnerList {
	pub owners: Vec<Owner>,
	pub selected: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateOwner {
	pub name: String,
}

pub enum OwnerError {
	MissingName,
}

impl From<OwnerError> for WebError<&'static str> {
	fn from(v: OwnerError) -> Self {
		match v {
			OwnerError::MissingName => {
				(StatusCode::UNPROCESSABLE_ENTITY, "owner name must not be empty").into()
			}
		}
	}
}

/// The requested owner if it exists, otherwise the first one.
pub fn select_owner(owners: &[Owner], requested: Option<&str>) -> Option<String> {
	requested
		.and_then(|id| owners.iter().find(|o| o.id == id))
		.or_else(|| owners.first())
		.map(|o| o.id.clone())
}

pub async fn list(backend: &Backend, q: OwnerQuery) -> anyhow::Result<OwnerList> {
	let owners = get_owners(backend).await?;
	let selected = select_owner(&owners, q.selected.as_deref());

	Ok(OwnerList { owners, selected })
}

pub async fn create(
	backend: &Backend,
	r: CreateOwner,
) -> anyhow::Result<Result<Owner, OwnerError>> {
	let name = r.name.trim();
	if name.is_empty() {
		return Ok(Err(OwnerError::MissingName));
	}

	Ok(Ok(insert_owner(backend, name).await?))
}
