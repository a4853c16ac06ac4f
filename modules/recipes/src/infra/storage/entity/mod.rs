//! SeaORM entities for the cookbook schema.

pub mod favorite;
pub mod ingredient;
pub mod recipe;
pub mod recipe_ingredient;
pub mod recipe_tag;
pub mod review;
pub mod user;
