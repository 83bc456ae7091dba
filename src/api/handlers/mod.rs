pub mod health;
pub mod owner;
pub mod plan;
pub mod recipe;
pub mod shopping;
pub mod week;
