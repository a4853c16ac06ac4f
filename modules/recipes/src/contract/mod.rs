pub mod client;
pub mod error;
pub mod model;
pub mod search;

pub use client::RecipesApi;
pub use error::RecipesError;
pub use model::{Recipe, RecipeIngredient, RecipeTag, UnitOfMeasure};
pub use search::{FilterKey, Operator, SearchFilter, SearchRequest, SearchSort, SortKey};
