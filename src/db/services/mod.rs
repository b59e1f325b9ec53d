//! Data access for the application's tables. Handlers work with the domain
//! models in `crate::db::models` and never touch the entities directly.

pub mod recipe_service;

pub use recipe_service::*;
