pub mod plan;
pub mod recipe;
pub mod shopping;
